use crate::auth::service::AuthService;
use crate::auth::state::SessionManager;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::shift::{self, TallyUpdate};
use crate::db::queries;
use crate::db::schema::init_schema;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Tally {
        cups,
        cans,
        blanco,
        reposado,
    } = cmd
    {
        let update = TallyUpdate {
            cups_used: *cups,
            cans_used: *cans,
            blanco_sold: *blanco,
            reposado_sold: *reposado,
        };
        if update.is_empty() {
            warning("Nothing to update: pass at least one of --cups, --cans, --blanco, --reposado.");
            return Ok(());
        }

        let storage = cfg.storage();
        init_schema(&storage)?;

        let sessions = cfg.session_store();
        let mut manager = SessionManager::new(AuthService::new(&storage, &sessions));
        manager.restore();
        let user = manager.current_user().ok_or(AppError::AuthRequired)?;

        let open = queries::open_shift_for(&storage, user.employee_id)?
            .ok_or(AppError::NoOpenShift)?;

        let updated = shift::record_activity(&storage, open.shift_log_id, &update)?;
        success(format!(
            "Shift {}: cups {}, cans {}, blanco {}, reposado {}",
            updated.shift_log_id,
            updated.cups_used,
            updated.cans_used,
            updated.blanco_sold,
            updated.reposado_sold
        ));
    }
    Ok(())
}
