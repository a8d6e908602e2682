//! Shared state for one CLI invocation

use crate::audit::AuditLogger;
use crate::config::{ExpensePaths, Settings, StorageBackend};
use crate::display::DisplayOptions;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Session, UserId};
use crate::services::{AuthService, ExpenseSession};
use crate::storage::{Backend, UserDirectory};

/// Paths, settings and the opened store for the current command
pub struct AppContext {
    pub paths: ExpensePaths,
    pub settings: Settings,
    pub backend: Backend,
    pub audit: AuditLogger,
}

impl AppContext {
    /// Open the configured backend, or `backend_override` if given
    pub fn open(
        paths: ExpensePaths,
        settings: Settings,
        backend_override: Option<StorageBackend>,
    ) -> ExpenseResult<Self> {
        let kind = backend_override.unwrap_or(settings.backend);
        let backend = Backend::open(kind, &paths)?;
        let audit = AuditLogger::new(paths.audit_log());

        Ok(Self {
            paths,
            settings,
            backend,
            audit,
        })
    }

    /// The account directory, or an error explaining that local mode has none
    pub fn users(&self) -> ExpenseResult<&dyn UserDirectory> {
        self.backend.users().ok_or_else(|| {
            ExpenseError::Config(
                "Accounts need the database backend. Re-run with '--backend database' \
                 or set it with 'expenses config set backend database'"
                    .into(),
            )
        })
    }

    pub fn auth(&self) -> ExpenseResult<AuthService<'_>> {
        Ok(AuthService::new(self.users()?, self.paths.session_file()).with_audit(&self.audit))
    }

    /// The signed-in session for the database backend
    pub fn current_session(&self) -> ExpenseResult<Option<Session>> {
        match self.backend.users() {
            Some(_) => self.auth()?.current(),
            None => Ok(None),
        }
    }

    /// Whose records this command touches
    ///
    /// Local mode always acts as the implicit local user. The database
    /// backend acts as the signed-in user, or nobody.
    pub fn owner(&self) -> ExpenseResult<Option<UserId>> {
        match self.backend.users() {
            None => Ok(Some(UserId::local())),
            Some(_) => Ok(self.current_session()?.map(|s| s.user_id)),
        }
    }

    /// Load the owner's expenses into a fresh session
    pub fn expense_session(&self) -> ExpenseResult<ExpenseSession<'_>> {
        let mut session = ExpenseSession::new(self.backend.store(), self.owner()?).with_audit(&self.audit);
        session.load()?;
        Ok(session)
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions::from(&self.settings)
    }
}
