use crate::auth::service::AuthService;
use crate::auth::state::SessionManager;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::shift;
use crate::db::queries;
use crate::db::schema::init_schema;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::End { question, feedback } = cmd {
        let storage = cfg.storage();
        init_schema(&storage)?;

        let sessions = cfg.session_store();
        let mut manager = SessionManager::new(AuthService::new(&storage, &sessions));
        manager.restore();
        let user = manager.current_user().ok_or(AppError::AuthRequired)?;

        let open = queries::open_shift_for(&storage, user.employee_id)?
            .ok_or(AppError::NoOpenShift)?;

        shift::end_shift(
            &storage,
            open.shift_log_id,
            question.as_deref().unwrap_or(""),
            feedback.as_deref().unwrap_or(""),
        )?;

        success(format!("Shift {} completed.", open.shift_log_id));
        let has_text = question.as_deref().is_some_and(|s| !s.trim().is_empty())
            || feedback.as_deref().is_some_and(|s| !s.trim().is_empty());
        if has_text {
            info("Consumer feedback recorded.");
        }
    }
    Ok(())
}
