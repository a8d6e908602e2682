//! CLI command for viewing the audit log

use crate::error::{ExpenseError, ExpenseResult};

use super::AppContext;

/// Print the most recent audit entries for the current owner
pub fn handle_audit_command(ctx: &AppContext, limit: usize) -> ExpenseResult<()> {
    let owner = ctx.owner()?.ok_or(ExpenseError::NotAuthenticated)?;

    let entries: Vec<_> = ctx
        .audit
        .read_all()?
        .into_iter()
        .filter(|entry| entry.owner == Some(owner))
        .collect();

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    let start = entries.len().saturating_sub(limit);
    for entry in &entries[start..] {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
