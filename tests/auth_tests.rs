use predicates::str::contains;

mod common;
use common::{agv, base_args, register_user, setup_test_paths};

#[test]
fn test_register_then_login_round_trip() {
    let paths = setup_test_paths("register_login_round_trip");
    register_user(&paths, "ana@example.com", "p1");

    // sign out, then back in with the same credentials
    let mut args = base_args(&paths);
    args.push("logout".to_string());
    agv().args(&args).assert().success();

    let mut args = base_args(&paths);
    args.extend(["login", "ana@example.com", "p1"].map(String::from));
    agv()
        .args(&args)
        .assert()
        .success()
        .stdout(contains("Signed in as Ana Torres"));
}

#[test]
fn test_login_wrong_password_rejected() {
    let paths = setup_test_paths("login_wrong_password");
    register_user(&paths, "ana@example.com", "p1");

    let mut args = base_args(&paths);
    args.extend(["login", "ana@example.com", "wrong"].map(String::from));
    agv()
        .args(&args)
        .assert()
        .failure()
        .stderr(contains("Invalid email or password"));
}

#[test]
fn test_login_unknown_email_same_message() {
    let paths = setup_test_paths("login_unknown_email");
    register_user(&paths, "ana@example.com", "p1");

    // unknown email and wrong password must be indistinguishable
    let mut args = base_args(&paths);
    args.extend(["login", "nobody@example.com", "p1"].map(String::from));
    agv()
        .args(&args)
        .assert()
        .failure()
        .stderr(contains("Invalid email or password"));
}

#[test]
fn test_login_email_is_case_insensitive() {
    let paths = setup_test_paths("login_case_insensitive");
    register_user(&paths, "Ana.Torres@Example.com", "p1");

    let mut args = base_args(&paths);
    args.extend(["login", "ana.torres@example.com", "p1"].map(String::from));
    agv().args(&args).assert().success();
}

#[test]
fn test_duplicate_email_rejected() {
    let paths = setup_test_paths("duplicate_email");
    register_user(&paths, "ana@example.com", "p1");

    let mut args = base_args(&paths);
    args.extend(
        [
            "register",
            "--email",
            "ana@example.com",
            "--password",
            "other",
            "--first-name",
            "Someone",
            "--last-name",
            "Else",
        ]
        .map(String::from),
    );
    agv()
        .args(&args)
        .assert()
        .failure()
        .stderr(contains("already exists"));

    // no second employee/user pair was created
    let conn = rusqlite::Connection::open(&paths.db).expect("open db");
    let employees: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM employee WHERE email = 'ana@example.com'",
            [],
            |row| row.get(0),
        )
        .expect("count employees");
    let users: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM users WHERE email = 'ana@example.com'",
            [],
            |row| row.get(0),
        )
        .expect("count users");
    assert_eq!(employees, 1);
    assert_eq!(users, 1);
}

#[test]
fn test_session_persists_across_invocations() {
    let paths = setup_test_paths("session_persists");
    register_user(&paths, "ana@example.com", "p1");

    // a fresh process restores the persisted session
    let mut args = base_args(&paths);
    args.push("whoami".to_string());
    agv()
        .args(&args)
        .assert()
        .success()
        .stdout(contains("ana@example.com"));

    let mut args = base_args(&paths);
    args.push("logout".to_string());
    agv().args(&args).assert().success();

    let mut args = base_args(&paths);
    args.push("whoami".to_string());
    agv()
        .args(&args)
        .assert()
        .success()
        .stdout(contains("Not signed in"));
}

#[test]
fn test_logout_is_idempotent() {
    let paths = setup_test_paths("logout_idempotent");

    // no session exists yet, logging out must still succeed
    let mut args = base_args(&paths);
    args.push("logout".to_string());
    agv().args(&args).assert().success();
    let mut args = base_args(&paths);
    args.push("logout".to_string());
    agv().args(&args).assert().success();
}

#[test]
fn test_register_rejects_unknown_role() {
    let paths = setup_test_paths("register_bad_role");

    let mut args = base_args(&paths);
    args.extend(
        [
            "register",
            "--email",
            "ana@example.com",
            "--password",
            "p1",
            "--first-name",
            "Ana",
            "--last-name",
            "Torres",
            "--role",
            "manager",
        ]
        .map(String::from),
    );
    agv()
        .args(&args)
        .assert()
        .failure()
        .stderr(contains("Invalid role"));
}
