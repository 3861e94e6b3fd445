//! Doctor command implementation.

use anyhow::{Result, bail};
use mint_lib::Store;
use serde::Serialize;

use super::CommandContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Ok,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
struct CheckResult {
    name: &'static str,
    status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
struct DoctorReport {
    ok: bool,
    checks: Vec<CheckResult>,
}

fn push_check(
    checks: &mut Vec<CheckResult>,
    name: &'static str,
    status: CheckStatus,
    message: Option<String>,
    details: Vec<String>,
) {
    checks.push(CheckResult {
        name,
        status,
        message,
        details,
    });
}

fn has_error(checks: &[CheckResult]) -> bool {
    checks
        .iter()
        .any(|check| check.status == CheckStatus::Error)
}

fn print_report(report: &DoctorReport, ctx: &CommandContext) -> Result<()> {
    if ctx.output.is_json() {
        return ctx.output.json(report);
    }

    println!("mint doctor");
    for check in &report.checks {
        let label = match check.status {
            CheckStatus::Ok => "OK",
            CheckStatus::Warn => "WARN",
            CheckStatus::Error => "ERROR",
        };
        if let Some(message) = &check.message {
            println!("{label} {}: {}", check.name, message);
        } else {
            println!("{label} {}", check.name);
        }
        for detail in &check.details {
            println!("  - {detail}");
        }
    }
    Ok(())
}

/// Reference checks over an already-loaded store.
fn store_checks(store: &Store, checks: &mut Vec<CheckResult>) {
    let problems: Vec<String> = store
        .inconsistencies()
        .iter()
        .map(ToString::to_string)
        .collect();
    if problems.is_empty() {
        push_check(checks, "graph.references", CheckStatus::Ok, None, Vec::new());
    } else {
        push_check(
            checks,
            "graph.references",
            CheckStatus::Error,
            Some(format!("{} broken reference(s)", problems.len())),
            problems,
        );
    }

    let expected = format!("{}-", store.prefix());
    let foreign: Vec<String> = if store.prefix().is_empty() {
        Vec::new()
    } else {
        store
            .graph()
            .sorted()
            .into_iter()
            .filter(|issue| !issue.id.starts_with(&expected))
            .map(|issue| issue.id.clone())
            .collect()
    };
    if foreign.is_empty() {
        push_check(checks, "ids.prefix", CheckStatus::Ok, None, Vec::new());
    } else {
        push_check(
            checks,
            "ids.prefix",
            CheckStatus::Warn,
            Some(format!("{} ID(s) without prefix {:?}", foreign.len(), store.prefix())),
            foreign,
        );
    }
}

/// Execute the doctor command.
///
/// # Errors
///
/// Returns an error if any check fails.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let mut checks = Vec::new();
    let document = &ctx.config.document;

    if ctx.config.document_found {
        push_check(
            &mut checks,
            "document.exists",
            CheckStatus::Ok,
            Some(document.display().to_string()),
            Vec::new(),
        );
    } else {
        push_check(
            &mut checks,
            "document.exists",
            CheckStatus::Warn,
            Some(format!("{} not found; run `mint init`", document.display())),
            Vec::new(),
        );
    }

    match ctx.load_store() {
        Ok(store) => {
            push_check(
                &mut checks,
                "document.parse",
                CheckStatus::Ok,
                Some(format!("{} issue(s)", store.len())),
                Vec::new(),
            );
            store_checks(&store, &mut checks);
        }
        Err(e) => push_check(
            &mut checks,
            "document.parse",
            CheckStatus::Error,
            Some(format!("{e:#}")),
            Vec::new(),
        ),
    }

    let report = DoctorReport {
        ok: !has_error(&checks),
        checks,
    };
    print_report(&report, ctx)?;

    if !report.ok {
        bail!("doctor found problems");
    }
    Ok(())
}
