use crate::auth::service::AuthService;
use crate::auth::state::{AuthState, SessionManager};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let storage = cfg.storage();
    let sessions = cfg.session_store();
    let mut manager = SessionManager::new(AuthService::new(&storage, &sessions));

    match manager.restore() {
        AuthState::Authenticated(user) => {
            info(format!(
                "{} <{}>, {} (employee #{})",
                user.full_name(),
                user.email,
                user.role.to_db_str(),
                user.employee_id
            ));
        }
        _ => warning("Not signed in."),
    }
    Ok(())
}
