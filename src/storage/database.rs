//! SQLite expense store with user accounts
//!
//! Each expense row carries the id of the user who created it, and every
//! query filters on it.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseCategory, ExpenseDraft, ExpenseId, Money, User, UserId};

use super::{build_expense, require_owner, ExpenseStore, UserDirectory};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL UNIQUE COLLATE NOCASE,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS expenses (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        amount_cents INTEGER NOT NULL CHECK (amount_cents >= 0),
        category TEXT NOT NULL CHECK (category IN (
            'food', 'travel', 'shopping', 'utilities', 'entertainment', 'health', 'other'
        )),
        description TEXT NOT NULL,
        date TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_expenses_user_created
        ON expenses (user_id, created_at DESC);
";

const EXPENSE_COLUMNS: &str = "id, amount_cents, category, description, date, created_at";

/// SQLite-backed store
pub struct DatabaseStore {
    conn: Mutex<Connection>,
}

impl DatabaseStore {
    /// Open (creating if needed) the database file and apply the schema
    pub fn open<P: AsRef<Path>>(path: P) -> ExpenseResult<Self> {
        let conn = Connection::open(path.as_ref()).map_err(|e| {
            ExpenseError::Database(format!(
                "Failed to open {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::with_connection(conn)
    }

    /// In-memory database, for tests and throwaway sessions
    pub fn open_in_memory() -> ExpenseResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> ExpenseResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> ExpenseResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire database lock: {}", e)))
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_error<E>(index: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
}

fn parse_uuid_column(row: &Row<'_>, index: usize) -> rusqlite::Result<uuid::Uuid> {
    let text: String = row.get(index)?;
    uuid::Uuid::parse_str(&text).map_err(|e| conversion_error(index, e))
}

fn parse_timestamp_column(row: &Row<'_>, index: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(index)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(index, e))
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let category: String = row.get(2)?;
    let date: String = row.get(4)?;

    Ok(Expense {
        id: ExpenseId::from_uuid(parse_uuid_column(row, 0)?),
        amount: Money::from_cents(row.get(1)?),
        category: category
            .parse::<ExpenseCategory>()
            .map_err(|e| conversion_error(2, e))?,
        description: row.get(3)?,
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| conversion_error(4, e))?,
        created_at: parse_timestamp_column(row, 5)?,
    })
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId::from_uuid(parse_uuid_column(row, 0)?),
        username: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: parse_timestamp_column(row, 3)?,
    })
}

impl ExpenseStore for DatabaseStore {
    fn list(&self, owner: Option<UserId>) -> ExpenseResult<Vec<Expense>> {
        let owner = require_owner(owner)?;
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
            EXPENSE_COLUMNS
        ))?;
        let rows = stmt.query_map([owner.to_string()], expense_from_row)?;

        let mut expenses = Vec::new();
        for expense in rows {
            expenses.push(expense?);
        }
        Ok(expenses)
    }

    fn add(
        &self,
        owner: Option<UserId>,
        draft: ExpenseDraft,
        created_at: DateTime<Utc>,
    ) -> ExpenseResult<Expense> {
        let owner = require_owner(owner)?;
        // Timestamps are stored with microsecond precision
        let expense = build_expense(draft, created_at.trunc_subsecs(6))?;

        self.conn()?.execute(
            "INSERT INTO expenses (id, user_id, amount_cents, category, description, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                expense.id.to_string(),
                owner.to_string(),
                expense.amount.cents(),
                expense.category.as_str(),
                expense.description,
                expense.date.format("%Y-%m-%d").to_string(),
                format_timestamp(&expense.created_at),
            ],
        )?;

        Ok(expense)
    }

    fn delete(&self, owner: Option<UserId>, id: ExpenseId) -> ExpenseResult<Expense> {
        let owner = require_owner(owner)?;
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let existing = tx
            .query_row(
                &format!(
                    "SELECT {} FROM expenses WHERE id = ?1 AND user_id = ?2",
                    EXPENSE_COLUMNS
                ),
                params![id.to_string(), owner.to_string()],
                expense_from_row,
            )
            .optional()?
            .ok_or_else(|| ExpenseError::expense_not_found(id.short()))?;

        tx.execute(
            "DELETE FROM expenses WHERE id = ?1 AND user_id = ?2",
            params![id.to_string(), owner.to_string()],
        )?;
        tx.commit()?;

        Ok(existing)
    }
}

impl UserDirectory for DatabaseStore {
    fn find_user(&self, username: &str) -> ExpenseResult<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
                [username],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn insert_user(&self, user: &User) -> ExpenseResult<()> {
        let result = self.conn()?.execute(
            "INSERT INTO users (id, username, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                user.id.to_string(),
                user.username,
                user.password_hash,
                format_timestamp(&user.created_at),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(ExpenseError::username_taken(&user.username))
            }
            Err(e) => Err(e.into()),
        }
    }
}
