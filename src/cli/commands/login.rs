use crate::auth::service::AuthService;
use crate::auth::state::SessionManager;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::schema::init_schema;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Login { email, password } = cmd {
        let storage = cfg.storage();
        init_schema(&storage)?;

        let sessions = cfg.session_store();
        let mut manager = SessionManager::new(AuthService::new(&storage, &sessions));

        let record = manager.login(email, password)?;
        success(format!(
            "Signed in as {} <{}>",
            record.full_name(),
            record.email
        ));
    }
    Ok(())
}
