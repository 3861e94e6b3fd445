//! Issue ID generation.
//!
//! IDs have the form `<prefix>-<suffix>` (or bare `<suffix>` when the prefix
//! is empty). The suffix is drawn uniformly from lowercase base36 with a
//! length that grows with the number of existing issues.

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::error::{MintError, Result};

/// Suffix alphabet: `0-9a-z`.
pub const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Separator between prefix and suffix.
pub const SEPARATOR: char = '-';

/// Suffix length tuning.
#[derive(Debug, Clone)]
pub struct IdConfig {
    /// Minimum suffix length.
    pub min_length: usize,
    /// Maximum suffix length.
    pub max_length: usize,
    /// Maximum collision probability before increasing length.
    pub max_collision_prob: f64,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            min_length: 4,
            max_length: 12,
            max_collision_prob: 0.01,
        }
    }
}

impl IdConfig {
    /// Suffix length for a store holding `issue_count` issues.
    ///
    /// Birthday approximation: P(collision) ≈ 1 - e^(-n²/2d) with d = 36^len.
    /// Non-decreasing in `issue_count`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn optimal_length(&self, issue_count: usize) -> usize {
        let n = issue_count as f64;

        for len in self.min_length..=self.max_length {
            let space = 36_f64.powi(len as i32);
            let prob = 1.0 - (-n * n / (2.0 * space)).exp();
            if prob < self.max_collision_prob {
                return len;
            }
        }
        self.max_length
    }
}

/// Source of candidate IDs.
///
/// Implementations only draw candidates; collision checks and retries belong
/// to the caller.
pub trait IdSource {
    /// Produce one candidate ID for a store of `issue_count` issues.
    ///
    /// # Errors
    ///
    /// Returns `RandomSource` if no randomness is available.
    fn next_id(&mut self, prefix: &str, issue_count: usize) -> Result<String>;
}

/// Production ID source backed by the OS random number generator.
#[derive(Debug, Clone, Default)]
pub struct RandomIdSource {
    config: IdConfig,
}

impl IdSource for RandomIdSource {
    fn next_id(&mut self, prefix: &str, issue_count: usize) -> Result<String> {
        let suffix = random_suffix(self.config.optimal_length(issue_count))?;
        Ok(compose_id(prefix, &suffix))
    }
}

/// Draw `length` uniform symbols from [`ALPHABET`].
///
/// # Errors
///
/// Returns `RandomSource` if the OS generator fails.
pub fn random_suffix(length: usize) -> Result<String> {
    // 252 = 7 * 36; bytes at or above it would bias the modulo.
    const ACCEPT_BELOW: u8 = 252;

    let mut suffix = String::with_capacity(length);
    let mut buf = [0u8; 16];
    while suffix.len() < length {
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| MintError::RandomSource(e.to_string()))?;
        for &byte in buf.iter().filter(|&&b| b < ACCEPT_BELOW) {
            if suffix.len() == length {
                break;
            }
            suffix.push(char::from(ALPHABET[usize::from(byte % 36)]));
        }
    }
    Ok(suffix)
}

/// Join a prefix and suffix with [`SEPARATOR`]; an empty prefix yields the
/// bare suffix.
#[must_use]
pub fn compose_id(prefix: &str, suffix: &str) -> String {
    if prefix.is_empty() {
        suffix.to_string()
    } else {
        format!("{prefix}{SEPARATOR}{suffix}")
    }
}

/// Strip surrounding whitespace and any trailing separators.
#[must_use]
pub fn normalize_prefix(prefix: &str) -> &str {
    prefix.trim().trim_end_matches(SEPARATOR)
}

/// The part of `id` after `prefix` and its separator.
///
/// IDs that do not carry `prefix` are returned whole.
#[must_use]
pub fn id_suffix<'a>(id: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return id;
    }
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(SEPARATOR))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(id)
}
