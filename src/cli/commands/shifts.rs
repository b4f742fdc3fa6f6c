use std::collections::HashMap;

use crate::auth::service::AuthService;
use crate::auth::state::SessionManager;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::queries;
use crate::db::schema::init_schema;
use crate::errors::{AppError, AppResult};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Shifts { all } = cmd {
        let storage = cfg.storage();
        init_schema(&storage)?;

        let shifts = if *all {
            queries::all_shifts(&storage)?
        } else {
            let sessions = cfg.session_store();
            let mut manager = SessionManager::new(AuthService::new(&storage, &sessions));
            manager.restore();
            let user = manager.current_user().ok_or(AppError::AuthRequired)?;
            queries::shifts_for_employee(&storage, user.employee_id)?
        };

        if shifts.is_empty() {
            println!("No shifts recorded.");
            return Ok(());
        }

        let store_names: HashMap<i64, String> = queries::all_stores(&storage)?
            .into_iter()
            .map(|s| (s.store_id, s.store_name))
            .collect();

        let mut table = Table::new(&[
            "ID", "DATE", "DAY", "START", "END", "CUPS", "CANS", "BLANCO", "REPOSADO", "STORE",
        ]);
        for s in &shifts {
            table.add_row(vec![
                s.shift_log_id.to_string(),
                s.date_str(),
                s.day_of_week.clone(),
                s.start_str(),
                s.end_str(),
                s.cups_used.to_string(),
                s.cans_used.to_string(),
                s.blanco_sold.to_string(),
                s.reposado_sold.to_string(),
                store_names
                    .get(&s.store_id)
                    .cloned()
                    .unwrap_or_else(|| format!("store {}", s.store_id)),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
