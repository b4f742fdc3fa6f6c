use crate::auth::service::AuthService;
use crate::auth::state::SessionManager;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let storage = cfg.storage();
    let sessions = cfg.session_store();
    let mut manager = SessionManager::new(AuthService::new(&storage, &sessions));

    manager.logout()?;
    success("Signed out.");
    Ok(())
}
