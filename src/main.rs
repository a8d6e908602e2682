use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_add_command, handle_audit_command, handle_auth_command, handle_delete_command,
    handle_export_command, handle_list_command, handle_summary_command, AddArgs, AppContext,
    AuthCommands, DeleteArgs, ExportArgs, ListArgs, SummaryArgs,
};
use expense_tracker::config::{ExpensePaths, Settings, StorageBackend};
use expense_tracker::display::format_category_registry;
use expense_tracker::reports::WeekStart;
use expense_tracker::storage::Backend;
use expense_tracker::ExpenseError;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Personal expense tracker",
    long_about = "Record what you spend, then see today's, this week's and this \
                  month's totals along with a breakdown by category."
)]
struct Cli {
    /// Storage backend for this command (local or database)
    #[arg(long, global = true)]
    backend: Option<StorageBackend>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default configuration
    Init,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },

    /// Record an expense
    Add(AddArgs),

    /// List expenses
    #[command(alias = "ls")]
    List(ListArgs),

    /// Delete an expense
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Show spending totals and the category breakdown
    Summary(SummaryArgs),

    /// List the expense categories
    Categories,

    /// Export expenses as CSV, JSON or YAML
    Export(ExportArgs),

    /// Account commands (database backend)
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Change one setting: backend, currency, date-format or week-start
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            let existed = paths.is_initialized();
            settings.save(&paths)?;
            let backend = cli.backend.unwrap_or(settings.backend);
            Backend::open(backend, &paths)?;

            if existed {
                println!("Already initialized at: {}", paths.base_dir().display());
            } else {
                println!("Initialized expense tracker at: {}", paths.base_dir().display());
            }
            println!("Storage backend: {}", backend);
            println!();
            println!("Record an expense with 'expenses add 12.50 \"Lunch\"'.");
        }
        Some(Commands::Config { action: None }) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Expenses file:  {}", paths.expenses_file().display());
            println!("Database file:  {}", paths.database_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Backend:     {}", settings.backend);
            println!("  Currency:    {}", settings.currency_symbol);
            println!("  Date format: {}", settings.date_format);
            println!("  Week start:  {}", settings.week_start);
        }
        Some(Commands::Config {
            action: Some(ConfigCommands::Set { key, value }),
        }) => {
            apply_setting(&mut settings, &key, &value)?;
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Set {} = {}", key, value);
        }
        Some(Commands::Categories) => {
            print!("{}", format_category_registry());
        }
        Some(command) => {
            let ctx = AppContext::open(paths, settings, cli.backend)?;
            match command {
                Commands::Add(args) => handle_add_command(&ctx, args)?,
                Commands::List(args) => handle_list_command(&ctx, args)?,
                Commands::Delete(args) => handle_delete_command(&ctx, args)?,
                Commands::Summary(args) => handle_summary_command(&ctx, args)?,
                Commands::Export(args) => handle_export_command(&ctx, args)?,
                Commands::Auth(cmd) => handle_auth_command(&ctx, cmd)?,
                Commands::Audit { limit } => handle_audit_command(&ctx, limit)?,
                Commands::Init | Commands::Config { .. } | Commands::Categories => {}
            }
        }
        None => {
            println!("Expense Tracker - personal spending at a glance");
            println!();
            println!("Run 'expenses --help' for usage information.");
        }
    }

    Ok(())
}

fn apply_setting(settings: &mut Settings, key: &str, value: &str) -> Result<(), ExpenseError> {
    match key {
        "backend" => settings.backend = value.parse()?,
        "currency" => settings.currency_symbol = value.to_string(),
        "date-format" => settings.date_format = value.to_string(),
        "week-start" => settings.week_start = value.parse::<WeekStart>()?,
        other => {
            return Err(ExpenseError::Config(format!(
                "Unknown setting '{}'. Use backend, currency, date-format or week-start",
                other
            )))
        }
    }
    Ok(())
}
