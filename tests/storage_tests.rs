//! Library-level tests for the storage gateway, schema initializer and
//! credential service.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use agavelog::auth::password::{hash_password, verify_password};
use agavelog::auth::service::{AuthService, Registration};
use agavelog::auth::session::{FileSessionStore, MemorySessionStore, SessionStore};
use agavelog::auth::state::{AuthState, SessionManager};
use agavelog::db::gateway::Storage;
use agavelog::db::queries;
use agavelog::db::schema::init_schema;
use agavelog::errors::AppError;
use agavelog::models::role::Role;

fn setup_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_agavelog_lib.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

fn registration(email: &str) -> Registration {
    Registration {
        email: email.to_string(),
        password: "p1".to_string(),
        first_name: "Ana".to_string(),
        last_name: "Torres".to_string(),
        phone_number: "555-0100".to_string(),
        role: Role::Ambassador,
    }
}

// ---------------------------
// Schema initializer
// ---------------------------

#[test]
fn test_init_schema_is_idempotent() {
    let db_path = setup_db("schema_idempotent");
    let storage = Storage::new(&db_path);

    init_schema(&storage).expect("first init");
    init_schema(&storage).expect("second init");

    // five tables, one set of seed rows
    let tables = storage
        .query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
            &[],
            |row| row.get::<_, String>(0),
        )
        .expect("list tables");
    assert_eq!(
        tables,
        vec![
            "consumer_feedback",
            "employee",
            "shift_log",
            "store_location",
            "users"
        ]
    );

    let stores = queries::all_stores(&storage).expect("stores");
    assert_eq!(stores.len(), 25);
}

// ---------------------------
// Storage gateway
// ---------------------------

#[test]
fn test_insert_binds_hostile_values() {
    let db_path = setup_db("insert_binding");
    let storage = Storage::new(&db_path);
    init_schema(&storage).expect("init");

    // values that would corrupt a naively interpolated statement
    let last_name = "O'Brien'); DROP TABLE employee;--";
    let id = storage
        .insert(
            "employee",
            &[
                ("first_name", &"Méabh"),
                ("last_name", &last_name),
                ("email", &"meabh@example.com"),
                ("phone_number", &""),
                ("role", &"ambassador"),
            ],
        )
        .expect("insert");
    assert!(id > 0);

    let employee = queries::employee_by_id(&storage, id)
        .expect("query")
        .expect("row");
    assert_eq!(employee.last_name, last_name);
}

#[test]
fn test_insert_returns_sequential_ids() {
    let db_path = setup_db("insert_ids");
    let storage = Storage::new(&db_path);
    init_schema(&storage).expect("init");

    let a = storage
        .insert(
            "employee",
            &[
                ("first_name", &"A"),
                ("last_name", &"One"),
                ("email", &"a@example.com"),
                ("phone_number", &""),
                ("role", &"ambassador"),
            ],
        )
        .expect("insert a");
    let b = storage
        .insert(
            "employee",
            &[
                ("first_name", &"B"),
                ("last_name", &"Two"),
                ("email", &"b@example.com"),
                ("phone_number", &""),
                ("role", &"supervisor"),
            ],
        )
        .expect("insert b");
    assert_eq!(b, a + 1);
}

#[test]
fn test_open_failure_is_retryable() {
    let mut bad: PathBuf = env::temp_dir();
    bad.push("agavelog_no_such_dir");
    bad.push("nested");
    bad.push("db.sqlite");
    let storage = Storage::new(&bad);

    // both attempts fail the same way: a failed open must not latch
    assert!(matches!(storage.open(), Err(AppError::Connection(_))));
    assert!(matches!(storage.open(), Err(AppError::Connection(_))));
}

#[test]
fn test_get_first_returns_none_for_missing_row() {
    let db_path = setup_db("get_first_none");
    let storage = Storage::new(&db_path);
    init_schema(&storage).expect("init");

    let missing = queries::employee_by_id(&storage, 4242).expect("query");
    assert!(missing.is_none());
}

#[test]
fn test_locked_database_surfaces_timeout() {
    let db_path = setup_db("locked_timeout");
    let storage = Storage::with_busy_timeout(&db_path, Duration::from_millis(50));
    init_schema(&storage).expect("init");

    // hold an exclusive lock from a second connection
    let blocker = rusqlite::Connection::open(&db_path).expect("open blocker");
    blocker
        .execute_batch("BEGIN EXCLUSIVE")
        .expect("acquire lock");

    let err = storage
        .execute("UPDATE store_location SET store_contact = 'x'", &[])
        .expect_err("write against a locked db");
    assert!(matches!(err, AppError::Timeout(_)));

    blocker.execute_batch("ROLLBACK").expect("release lock");
}

// ---------------------------
// Credential service
// ---------------------------

#[test]
fn test_register_rolls_back_on_user_insert_failure() {
    let db_path = setup_db("register_atomicity");
    let storage = Storage::new(&db_path);
    init_schema(&storage).expect("init");

    // occupy the users.email slot without touching employee.email, so the
    // employee insert succeeds and the users insert hits UNIQUE
    let anchor = storage
        .insert(
            "employee",
            &[
                ("first_name", &"Anchor"),
                ("last_name", &"Row"),
                ("email", &"anchor@example.com"),
                ("phone_number", &""),
                ("role", &"supervisor"),
            ],
        )
        .expect("anchor employee");
    storage
        .insert(
            "users",
            &[
                ("email", &"victim@example.com"),
                ("password_hash", &"x"),
                ("employee_id", &anchor),
            ],
        )
        .expect("conflicting user");

    let sessions = MemorySessionStore::new();
    let auth = AuthService::new(&storage, &sessions);
    let err = auth
        .register(&registration("victim@example.com"))
        .expect_err("registration must fail");
    assert!(matches!(err, AppError::DuplicateEmail));

    // the employee insert was rolled back with it
    let orphans = storage
        .query(
            "SELECT employee_id FROM employee WHERE email = 'victim@example.com'",
            &[],
            |row| row.get::<_, i64>(0),
        )
        .expect("query orphans");
    assert!(orphans.is_empty());

    // and no session was persisted
    assert!(auth.restore_session().is_none());
}

#[test]
fn test_register_login_ids_match() {
    let db_path = setup_db("register_login_ids");
    let storage = Storage::new(&db_path);
    init_schema(&storage).expect("init");

    let sessions = MemorySessionStore::new();
    let auth = AuthService::new(&storage, &sessions);

    let registered = auth.register(&registration("ana@example.com")).expect("register");
    let logged_in = auth.login("ana@example.com", "p1").expect("login");
    assert_eq!(registered.employee_id, logged_in.employee_id);
    assert_eq!(registered.user_id, logged_in.user_id);

    let err = auth
        .login("ana@example.com", "wrong")
        .expect_err("wrong password");
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[test]
fn test_restore_session_tolerates_corrupt_record() {
    let mut path: PathBuf = env::temp_dir();
    path.push("corrupt_session_agavelog.json");
    fs::write(&path, "{ not json").expect("write corrupt file");

    let db_path = setup_db("corrupt_session");
    let storage = Storage::new(&db_path);
    let sessions = FileSessionStore::new(&path);
    let auth = AuthService::new(&storage, &sessions);

    assert!(auth.restore_session().is_none());
    fs::remove_file(&path).ok();
}

#[test]
fn test_file_session_store_round_trip() {
    let mut path: PathBuf = env::temp_dir();
    path.push("round_trip_session_agavelog.json");
    fs::remove_file(&path).ok();

    let store = FileSessionStore::new(&path);
    assert!(store.get().is_none());
    store.set("{\"k\":1}").expect("set");
    assert_eq!(store.get().as_deref(), Some("{\"k\":1}"));
    store.remove().expect("remove");
    assert!(store.get().is_none());
    store.remove().expect("second remove is a no-op");
}

// ---------------------------
// Session state machine
// ---------------------------

#[test]
fn test_state_machine_transitions() {
    let db_path = setup_db("state_machine");
    let storage = Storage::new(&db_path);
    init_schema(&storage).expect("init");

    let sessions = MemorySessionStore::new();
    let mut manager = SessionManager::new(AuthService::new(&storage, &sessions));

    assert_eq!(*manager.state(), AuthState::Unknown);
    assert!(matches!(manager.restore(), AuthState::Unauthenticated));

    manager.register(&registration("ana@example.com")).expect("register");
    assert!(manager.is_authenticated());

    // a failed login leaves the authenticated state untouched
    let err = manager.login("ana@example.com", "wrong").expect_err("bad login");
    assert!(matches!(err, AppError::InvalidCredentials));
    assert!(manager.is_authenticated());

    manager.logout().expect("logout");
    assert_eq!(*manager.state(), AuthState::Unauthenticated);

    manager.login("ana@example.com", "p1").expect("login");
    assert!(manager.is_authenticated());
    assert_eq!(
        manager.current_user().map(|u| u.email.as_str()),
        Some("ana@example.com")
    );
}

#[test]
fn test_restore_picks_up_persisted_session() {
    let db_path = setup_db("restore_persisted");
    let storage = Storage::new(&db_path);
    init_schema(&storage).expect("init");

    let sessions = MemorySessionStore::new();
    {
        let mut manager = SessionManager::new(AuthService::new(&storage, &sessions));
        manager.register(&registration("ana@example.com")).expect("register");
    }

    // a fresh manager over the same store restores the session
    let mut manager = SessionManager::new(AuthService::new(&storage, &sessions));
    match manager.restore() {
        AuthState::Authenticated(user) => assert_eq!(user.email, "ana@example.com"),
        other => panic!("expected authenticated state, got {:?}", other),
    }
}

// ---------------------------
// Password hashing
// ---------------------------

#[test]
fn test_password_hash_round_trip() {
    let stored = hash_password("correct horse");
    assert!(verify_password("correct horse", &stored));
    assert!(!verify_password("wrong horse", &stored));
}

#[test]
fn test_password_hashes_are_salted() {
    let a = hash_password("same input");
    let b = hash_password("same input");
    assert_ne!(a, b);
    assert!(verify_password("same input", &a));
    assert!(verify_password("same input", &b));
}

#[test]
fn test_malformed_stored_hash_fails_verification() {
    assert!(!verify_password("p1", ""));
    assert!(!verify_password("p1", "sha256$deadbeef"));
    assert!(!verify_password("p1", "pbkdf2-sha256$notanumber$AAAA$AAAA"));
}
