//! Operator session.
//!
//! The dashboard identifies its operator by email only. The session is an
//! explicit value created by [`Session::init`] and handed to whoever needs it;
//! persistence sits behind [`SessionStore`] so the CLI can keep the email in a
//! file and tests can keep it in memory.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("not logged in; run `studio login <email>` first")]
    NotLoggedIn,
    #[error("session store {path}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl crate::error::ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "E_EMPTY_EMAIL",
            Self::NotLoggedIn => "E_NOT_LOGGED_IN",
            Self::Store { .. } => "E_SESSION_STORE",
        }
    }
}

/// Where the logged-in email lives between runs.
pub trait SessionStore: Send + Sync {
    /// # Errors
    /// Propagates storage failures.
    fn load(&self) -> Result<Option<String>, SessionError>;
    /// # Errors
    /// Propagates storage failures.
    fn save(&self, email: &str) -> Result<(), SessionError>;
    /// # Errors
    /// Propagates storage failures.
    fn clear(&self) -> Result<(), SessionError>;
}

// =============================================================================
// STORES
// =============================================================================

/// Stores the email as the whole content of a single file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn store_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Store { path: self.path.clone(), source }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let email = raw.trim();
                Ok((!email.is_empty()).then(|| email.to_owned()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.store_error(e)),
        }
    }

    fn save(&self, email: &str) -> Result<(), SessionError> {
        std::fs::write(&self.path, email).map_err(|e| self.store_error(e))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.store_error(e)),
        }
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    email: Mutex<Option<String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn with_email(email: impl Into<String>) -> Self {
        Self { email: Mutex::new(Some(email.into())) }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.email.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.slot().clone())
    }

    fn save(&self, email: &str) -> Result<(), SessionError> {
        *self.slot() = Some(email.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot() = None;
        Ok(())
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// The current operator, backed by a store.
pub struct Session<S: SessionStore> {
    store: S,
    user: Option<String>,
}

impl<S: SessionStore> Session<S> {
    /// Restore whatever the store remembers.
    ///
    /// # Errors
    /// Propagates store read failures.
    pub fn init(store: S) -> Result<Self, SessionError> {
        let user = store.load()?;
        tracing::debug!(logged_in = user.is_some(), "session restored");
        Ok(Self { store, user })
    }

    /// # Errors
    /// [`SessionError::EmptyEmail`] for a blank email; store write failures.
    pub fn login(&mut self, email: &str) -> Result<(), SessionError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(SessionError::EmptyEmail);
        }
        self.store.save(email)?;
        self.user = Some(email.to_owned());
        tracing::info!(%email, "logged in");
        Ok(())
    }

    /// # Errors
    /// Propagates store failures; the in-memory user is cleared regardless.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.user = None;
        self.store.clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// # Errors
    /// [`SessionError::NotLoggedIn`] when nobody is logged in.
    pub fn require_user(&self) -> Result<&str, SessionError> {
        self.current_user().ok_or(SessionError::NotLoggedIn)
    }

    /// Drop the session and hand the store back. Nothing is persisted here;
    /// every mutation was already written through.
    pub fn teardown(self) -> S {
        tracing::debug!(logged_in = self.user.is_some(), "session torn down");
        self.store
    }
}
