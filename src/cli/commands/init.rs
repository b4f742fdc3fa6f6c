use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::schema::init_schema;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database file and its schema (five tables + store seed)
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    Config::init_all(cli.db.as_deref(), cli.test)?;

    println!("Initializing agavelog…");
    if !cli.test {
        println!("Config file : {}", Config::config_file().display());
    }
    println!("Database    : {}", &cfg.database);

    let storage = cfg.storage();
    init_schema(&storage)?;

    success(format!("Database initialized at {}", &cfg.database));
    Ok(())
}
