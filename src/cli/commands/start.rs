use crate::auth::service::AuthService;
use crate::auth::state::SessionManager;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::shift;
use crate::db::queries;
use crate::db::schema::init_schema;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { store } = cmd {
        let storage = cfg.storage();
        init_schema(&storage)?;

        let sessions = cfg.session_store();
        let mut manager = SessionManager::new(AuthService::new(&storage, &sessions));
        manager.restore();
        let user = manager.current_user().ok_or(AppError::AuthRequired)?;

        let shift_log_id = shift::start_shift(&storage, user.employee_id, *store)?;

        let store_name = queries::store_by_id(&storage, *store)?
            .map(|s| s.store_name)
            .unwrap_or_else(|| format!("store {}", store));
        success(format!(
            "Shift {} started at {}",
            shift_log_id, store_name
        ));
    }
    Ok(())
}
