use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::auth::session::FileSessionStore;
use crate::db::gateway::{DEFAULT_BUSY_TIMEOUT_MS, Storage};
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    pub session_file: String,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            session_file: Self::session_path().to_string_lossy().to_string(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("agavelog")
        } else {
            match dirs::home_dir() {
                Some(home) => home.join(".agavelog"),
                None => PathBuf::from(".agavelog"),
            }
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("agavelog.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("agavelog.sqlite")
    }

    pub fn session_path() -> PathBuf {
        Self::config_dir().join("session.json")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Create the config directory, the config file and an empty database
    /// file. With `is_test` the config file is left untouched.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Self::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(())
    }

    /// Build the storage gateway for the configured database.
    pub fn storage(&self) -> Storage {
        Storage::with_busy_timeout(
            expand_tilde(&self.database),
            Duration::from_millis(self.busy_timeout_ms),
        )
    }

    /// Build the session store for the configured session file.
    pub fn session_store(&self) -> FileSessionStore {
        FileSessionStore::new(expand_tilde(&self.session_file))
    }
}
