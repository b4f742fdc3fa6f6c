//! Session state holder: the authenticated/unauthenticated flag the UI
//! boundary reads. All mutation goes through the credential service.

use crate::auth::service::{AuthService, Registration};
use crate::auth::session::SessionRecord;
use crate::errors::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Session not yet checked.
    Unknown,
    Unauthenticated,
    Authenticated(SessionRecord),
}

pub struct SessionManager<'a> {
    auth: AuthService<'a>,
    state: AuthState,
}

impl<'a> SessionManager<'a> {
    pub fn new(auth: AuthService<'a>) -> Self {
        Self {
            auth,
            state: AuthState::Unknown,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    pub fn current_user(&self) -> Option<&SessionRecord> {
        match &self.state {
            AuthState::Authenticated(record) => Some(record),
            _ => None,
        }
    }

    /// Resolve Unknown into one of the two settled states by reading the
    /// persisted session. Calling it again later is a no-op.
    pub fn restore(&mut self) -> &AuthState {
        if self.state == AuthState::Unknown {
            self.state = match self.auth.restore_session() {
                Some(record) => AuthState::Authenticated(record),
                None => AuthState::Unauthenticated,
            };
        }
        &self.state
    }

    /// Login while already authenticated is a full re-authentication: the
    /// new session replaces the old one. A failed attempt leaves the
    /// current state untouched.
    pub fn login(&mut self, email: &str, password: &str) -> AppResult<SessionRecord> {
        let record = self.auth.login(email, password)?;
        self.state = AuthState::Authenticated(record.clone());
        Ok(record)
    }

    pub fn register(&mut self, req: &Registration) -> AppResult<SessionRecord> {
        let record = self.auth.register(req)?;
        self.state = AuthState::Authenticated(record.clone());
        Ok(record)
    }

    pub fn logout(&mut self) -> AppResult<()> {
        self.auth.logout()?;
        self.state = AuthState::Unauthenticated;
        Ok(())
    }
}
