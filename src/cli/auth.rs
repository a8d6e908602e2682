//! Account CLI commands
//!
//! Sign-up and sign-in are only available with the database backend.

use chrono::Utc;
use clap::Subcommand;

use crate::error::{ExpenseError, ExpenseResult};

use super::AppContext;

/// Environment variable read when `--password` is not given
pub const PASSWORD_ENV: &str = "EXPENSE_TRACKER_PASSWORD";

/// Auth subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Create an account and sign in
    Signup {
        username: String,
        /// Password (prompted if omitted)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign in to an existing account
    Signin {
        username: String,
        /// Password (prompted if omitted)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out of the current account
    Signout,

    /// Show who is signed in
    Whoami,
}

/// Handle auth commands
pub fn handle_auth_command(ctx: &AppContext, cmd: AuthCommands) -> ExpenseResult<()> {
    match cmd {
        AuthCommands::Signup { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_new_password()?,
            };
            let session = ctx.auth()?.sign_up(&username, &password, Utc::now())?;
            println!("Account created. Signed in as '{}'.", session.username);
        }
        AuthCommands::Signin { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password: ")?,
            };
            let session = ctx.auth()?.sign_in(&username, &password, Utc::now())?;
            println!("Signed in as '{}'.", session.username);
        }
        AuthCommands::Signout => {
            if ctx.auth()?.sign_out()? {
                println!("Signed out.");
            } else {
                println!("Not signed in.");
            }
        }
        AuthCommands::Whoami => match ctx.backend.users() {
            None => println!("Local mode: all expenses belong to the local user."),
            Some(_) => match ctx.current_session()? {
                Some(session) => println!(
                    "Signed in as '{}' since {}",
                    session.username,
                    session.signed_in_at.format("%Y-%m-%d %H:%M UTC")
                ),
                None => println!("Not signed in."),
            },
        },
    }

    Ok(())
}

/// Prompt for a new password with confirmation
fn prompt_new_password() -> ExpenseResult<String> {
    let first = prompt_password("Choose a password: ")?;
    let second = prompt_password("Confirm password: ")?;

    if first != second {
        return Err(ExpenseError::Validation("Passwords do not match".into()));
    }
    Ok(first)
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> ExpenseResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| ExpenseError::Auth(format!("Failed to read password: {}", e)))
}
