use crate::auth::service::{AuthService, Registration};
use crate::auth::state::SessionManager;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::schema::init_schema;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Register {
        email,
        password,
        first_name,
        last_name,
        phone,
        role,
    } = cmd
    {
        let role = Role::parse(role).ok_or_else(|| AppError::InvalidRole(role.clone()))?;

        let storage = cfg.storage();
        init_schema(&storage)?;

        let sessions = cfg.session_store();
        let mut manager = SessionManager::new(AuthService::new(&storage, &sessions));

        let record = manager.register(&Registration {
            email: email.clone(),
            password: password.clone(),
            first_name: first_name.clone(),
            last_name: last_name.clone(),
            phone_number: phone.clone(),
            role,
        })?;

        success(format!(
            "Account created: {} <{}> (employee #{}, user #{})",
            record.full_name(),
            record.email,
            record.employee_id,
            record.user_id
        ));
        success("Signed in.");
    }
    Ok(())
}
