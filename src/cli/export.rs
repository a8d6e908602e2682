//! CLI command for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::{Local, Utc};
use clap::Args;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_expenses_csv, export_json, export_yaml, ExpenseExport, ExportFormat};

use super::AppContext;

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format: csv, json or yaml
    pub format: ExportFormat,

    /// Output file (default: standard output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Export the owner's expenses
pub fn handle_export_command(ctx: &AppContext, args: ExportArgs) -> ExpenseResult<()> {
    let session = ctx.expense_session()?;
    let expenses = session.expenses();

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ExportFormat::Csv => export_expenses_csv(&expenses, &mut writer)?,
        ExportFormat::Json | ExportFormat::Yaml => {
            let owner = ctx.current_session()?.map(|s| s.username);
            let summary = session.summary(Local::now().date_naive(), ctx.settings.week_start);
            let export = ExpenseExport::new(expenses.to_vec(), summary, owner, Utc::now());

            if args.format == ExportFormat::Json {
                export_json(&export, &mut writer)?;
            } else {
                export_yaml(&export, &mut writer)?;
            }
        }
    }

    writer.flush().map_err(|e| ExpenseError::Export(e.to_string()))?;

    if let Some(path) = &args.output {
        println!("Exported {} expense(s) to: {}", expenses.len(), path.display());
    }

    Ok(())
}
