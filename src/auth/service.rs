//! Credential service: registration, login, session restore and logout.
//!
//! Registration writes the employee and the credential row inside one
//! transaction so a failed second insert can never leave an orphaned
//! employee behind.

use crate::auth::password;
use crate::auth::session::{SessionRecord, SessionStore};
use crate::db::gateway::{Storage, insert_into};
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;

#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub role: Role,
}

pub struct AuthService<'a> {
    storage: &'a Storage,
    sessions: &'a dyn SessionStore,
}

impl<'a> AuthService<'a> {
    pub fn new(storage: &'a Storage, sessions: &'a dyn SessionStore) -> Self {
        Self { storage, sessions }
    }

    /// Register a new employee account and sign it in. Returns the session
    /// record carrying the new employee and user identifiers.
    pub fn register(&self, req: &Registration) -> AppResult<SessionRecord> {
        let email = req.email.trim().to_lowercase();
        let password_hash = password::hash_password(&req.password);

        let (employee_id, user_id) = self.storage.with_tx(|tx| {
            let employee_id = insert_into(
                tx,
                "employee",
                &[
                    ("first_name", &req.first_name),
                    ("last_name", &req.last_name),
                    ("email", &email),
                    ("phone_number", &req.phone_number),
                    ("role", &req.role.to_db_str()),
                ],
            )
            .map_err(translate_unique)?;

            let user_id = insert_into(
                tx,
                "users",
                &[
                    ("email", &email),
                    ("password_hash", &password_hash),
                    ("employee_id", &employee_id),
                ],
            )
            .map_err(translate_unique)?;

            Ok((employee_id, user_id))
        })?;

        let record = SessionRecord {
            user_id,
            employee_id,
            email,
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            role: req.role,
        };
        self.persist(&record)?;
        Ok(record)
    }

    /// Authenticate and persist the session. Unknown email and wrong
    /// password are deliberately indistinguishable.
    pub fn login(&self, email: &str, password: &str) -> AppResult<SessionRecord> {
        let user = queries::user_by_email(self.storage, email.trim())?
            .ok_or(AppError::InvalidCredentials)?;

        if !password::verify_password(password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        let employee = queries::employee_by_id(self.storage, user.employee_id)?
            .ok_or(AppError::InvalidCredentials)?;

        let record = SessionRecord {
            user_id: user.user_id,
            employee_id: employee.employee_id,
            email: user.email,
            first_name: employee.first_name,
            last_name: employee.last_name,
            role: employee.role,
        };
        self.persist(&record)?;
        Ok(record)
    }

    /// Read the persisted session, if any. A missing or corrupt record is
    /// "not signed in", never an error.
    pub fn restore_session(&self) -> Option<SessionRecord> {
        let raw = self.sessions.get()?;
        serde_json::from_str(&raw).ok()
    }

    /// Clear the persisted session. Idempotent.
    pub fn logout(&self) -> AppResult<()> {
        self.sessions.remove()
    }

    fn persist(&self, record: &SessionRecord) -> AppResult<()> {
        let raw =
            serde_json::to_string(record).map_err(|e| AppError::Session(e.to_string()))?;
        self.sessions.set(&raw)
    }
}

/// A UNIQUE violation on either insert means the email is taken; every
/// other storage error passes through unchanged.
fn translate_unique(err: AppError) -> AppError {
    match &err {
        AppError::Insert(rusqlite::Error::SqliteFailure(f, Some(msg)))
            if f.code == rusqlite::ErrorCode::ConstraintViolation && msg.contains("UNIQUE") =>
        {
            AppError::DuplicateEmail
        }
        _ => err,
    }
}
