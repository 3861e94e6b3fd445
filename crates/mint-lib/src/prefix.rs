//! Minimal unique prefixes and partial-ID resolution.

use std::collections::HashMap;

use crate::error::{MintError, Result};

/// Number of leading characters `a` and `b` share.
#[must_use]
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}

/// For every ID, the shortest leading length (in characters) that no other
/// ID in the set shares.
///
/// After sorting, the longest common prefix of any ID is with one of its two
/// neighbours, so only adjacent pairs are compared. Lengths are clamped to
/// `1..=id length`. The result is a display hint only.
#[must_use]
pub fn min_unique_prefix_lengths<'a>(
    ids: impl IntoIterator<Item = &'a str>,
) -> HashMap<String, usize> {
    let mut sorted: Vec<&str> = ids.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut lengths = HashMap::with_capacity(sorted.len());
    for (i, id) in sorted.iter().enumerate() {
        let before = i
            .checked_sub(1)
            .map_or(0, |prev| common_prefix_len(sorted[prev], id));
        let after = sorted
            .get(i + 1)
            .map_or(0, |next| common_prefix_len(id, next));
        let len = (before.max(after) + 1).min(id.chars().count()).max(1);
        lengths.insert((*id).to_string(), len);
    }
    lengths
}

/// Resolve user input to exactly one full ID.
///
/// An exact match wins even when it is also a prefix of other IDs.
///
/// # Errors
///
/// Returns `InvalidId` for blank input, `IssueNotFound` when nothing matches,
/// or `AmbiguousId` with the sorted candidates when several IDs match.
pub fn resolve_partial_id<'a>(
    input: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(MintError::InvalidId {
            id: String::new(),
        });
    }

    let mut matches = Vec::new();
    for id in ids {
        if id == input {
            return Ok(id.to_string());
        }
        if id.starts_with(input) {
            matches.push(id.to_string());
        }
    }

    match matches.len() {
        0 => Err(MintError::IssueNotFound {
            id: input.to_string(),
        }),
        1 => Ok(matches.swap_remove(0)),
        _ => {
            matches.sort();
            Err(MintError::AmbiguousId {
                partial: input.to_string(),
                matches,
            })
        }
    }
}
