#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn agv() -> Command {
    cargo_bin_cmd!("agavelog")
}

pub struct TestPaths {
    pub db: String,
    pub session: String,
}

/// Create unique test DB + session paths inside the system temp dir and
/// remove any leftovers from a previous run.
pub fn setup_test_paths(name: &str) -> TestPaths {
    let mut db: PathBuf = env::temp_dir();
    db.push(format!("{}_agavelog.sqlite", name));
    let mut session: PathBuf = env::temp_dir();
    session.push(format!("{}_agavelog_session.json", name));

    fs::remove_file(&db).ok();
    fs::remove_file(&session).ok();

    TestPaths {
        db: db.to_string_lossy().to_string(),
        session: session.to_string_lossy().to_string(),
    }
}

/// Base args every invocation needs: path overrides + test mode.
pub fn base_args(paths: &TestPaths) -> Vec<String> {
    vec![
        "--db".to_string(),
        paths.db.clone(),
        "--session".to_string(),
        paths.session.clone(),
        "--test".to_string(),
    ]
}

/// Register (and thereby sign in) a default employee for shift tests.
pub fn register_user(paths: &TestPaths, email: &str, password: &str) {
    let mut args = base_args(paths);
    args.extend(
        [
            "register",
            "--email",
            email,
            "--password",
            password,
            "--first-name",
            "Ana",
            "--last-name",
            "Torres",
            "--phone",
            "555-0100",
            "--role",
            "ambassador",
        ]
        .map(String::from),
    );
    agv().args(&args).assert().success();
}
