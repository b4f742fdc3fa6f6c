//! Schema initializer: creates the five tables in foreign-key dependency
//! order and seeds the store reference list on first run. Safe to call on
//! every startup.

use rusqlite::Connection;

use crate::db::gateway::Storage;
use crate::errors::{AppError, AppResult};

/// Initialize the database schema. Idempotent: re-running never duplicates
/// tables or seed rows. Any failure here is fatal to startup.
pub fn init_schema(storage: &Storage) -> AppResult<()> {
    storage.with_conn(|conn| {
        create_tables(conn).map_err(AppError::Schema)?;
        seed_store_locations(conn)
    })
}

/// Employee and store_location first, then users and shift_log, then
/// consumer_feedback: referenced tables before referencing ones.
fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employee (
            employee_id  INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name   TEXT NOT NULL,
            last_name    TEXT NOT NULL,
            email        TEXT UNIQUE NOT NULL,
            phone_number TEXT,
            role         TEXT NOT NULL CHECK(role IN ('ambassador','supervisor'))
        );

        CREATE TABLE IF NOT EXISTS store_location (
            store_id      INTEGER PRIMARY KEY AUTOINCREMENT,
            store_name    TEXT NOT NULL,
            store_address TEXT NOT NULL,
            store_city    TEXT NOT NULL,
            store_state   TEXT NOT NULL,
            store_zip     TEXT NOT NULL,
            store_contact TEXT
        );

        CREATE TABLE IF NOT EXISTS users (
            user_id       INTEGER PRIMARY KEY AUTOINCREMENT,
            email         TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            employee_id   INTEGER NOT NULL,
            FOREIGN KEY (employee_id) REFERENCES employee (employee_id)
        );

        CREATE TABLE IF NOT EXISTS shift_log (
            shift_log_id     INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id      INTEGER NOT NULL,
            store_id         INTEGER NOT NULL,
            shift_date       TEXT NOT NULL,
            shift_start_time TEXT NOT NULL,
            shift_end_time   TEXT,
            day_of_week      TEXT NOT NULL,
            cups_used        INTEGER,
            cans_used        INTEGER,
            blanco_sold      INTEGER NOT NULL,
            repasado_sold    INTEGER NOT NULL,
            FOREIGN KEY (employee_id) REFERENCES employee (employee_id),
            FOREIGN KEY (store_id) REFERENCES store_location (store_id)
        );

        CREATE TABLE IF NOT EXISTS consumer_feedback (
            feedback_id       INTEGER PRIMARY KEY AUTOINCREMENT,
            shift_log_id      INTEGER NOT NULL,
            consumer_question TEXT,
            consumer_feedback TEXT,
            FOREIGN KEY (shift_log_id) REFERENCES shift_log (shift_log_id)
        );

        CREATE INDEX IF NOT EXISTS idx_shift_log_employee ON shift_log(employee_id, shift_date);
        CREATE INDEX IF NOT EXISTS idx_feedback_shift ON consumer_feedback(shift_log_id);
        "#,
    )
}

/// Fixed reference list of sampling locations: (name, address, city, state, zip).
const STORE_SEED: &[(&str, &str, &str, &str, &str)] = &[
    ("Whole Foods - Brentwood", "11737 San Vicente Blvd", "Los Angeles", "CA", "90049"),
    ("Whole Foods - Sherman Oaks", "12905 Riverside Dr", "Sherman Oaks", "CA", "91423"),
    ("Whole Foods - Pico", "11666 National Blvd", "Los Angeles", "CA", "90064"),
    ("Whole Foods - Silverlake", "2520 Glendale Blvd", "Los Angeles", "CA", "90039"),
    ("Whole Foods - Culver City", "10250 Santa Monica Blvd", "Los Angeles", "CA", "90067"),
    ("Whole Foods - Playa Vista", "12746 Jefferson Blvd", "Los Angeles", "CA", "90094"),
    ("Whole Foods - Downtown LA", "788 S Grand Ave", "Los Angeles", "CA", "90017"),
    ("Whole Foods - Redondo", "405 N Pacific Coast Hwy", "Redondo Beach", "CA", "90277"),
    ("Whole Foods - Porter Ranch", "20209 Rinaldi St", "Porter Ranch", "CA", "91326"),
    ("Whole Foods - Pasadena", "465 S Arroyo Pkwy", "Pasadena", "CA", "91105"),
    ("Whole Foods - Newport Beach", "415 Newport Center Dr", "Newport Beach", "CA", "92660"),
    ("Whole Foods - El Segundo", "780 S Sepulveda Blvd", "El Segundo", "CA", "90245"),
    ("Whole Foods - Burbank", "3401 W Olive Ave", "Burbank", "CA", "91505"),
    ("Whole Foods - Huntington Beach", "7881 Edinger Ave", "Huntington Beach", "CA", "92647"),
    ("Erewhon - Beverly Hills", "339 N Beverly Dr", "Beverly Hills", "CA", "90210"),
    ("Erewhon - Pacific Palisades", "15285 Sunset Blvd", "Pacific Palisades", "CA", "90272"),
    ("Bristol Farms - Manhattan Beach", "1570 Rosecrans Ave", "Manhattan Beach", "CA", "90266"),
    ("Bristol Farms - West Hollywood", "9039 Beverly Blvd", "West Hollywood", "CA", "90048"),
    ("Bristol Farms - Woodland Hills", "23379 Mulholland Dr", "Woodland Hills", "CA", "91364"),
    ("Lazy Acres - Hermosa Beach", "2510 Pacific Coast Hwy", "Hermosa Beach", "CA", "90254"),
    ("Total Wine - Culver City", "10850 Washington Blvd", "Culver City", "CA", "90232"),
    ("Total Wine - Redondo", "1505 Hawthorne Blvd", "Redondo Beach", "CA", "90278"),
    ("Vintage Grocers", "30745 Pacific Coast Hwy", "Malibu", "CA", "90265"),
    ("FarmShop", "225 26th St", "Santa Monica", "CA", "90402"),
    ("Hi-Lo - Culver City", "4035 Grand View Blvd", "Los Angeles", "CA", "90066"),
];

/// Seed the store_location table, only when it is currently empty.
fn seed_store_locations(conn: &Connection) -> AppResult<()> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM store_location", [], |row| row.get(0))
        .map_err(AppError::Schema)?;
    if count > 0 {
        return Ok(());
    }

    let mut stmt = conn
        .prepare(
            "INSERT INTO store_location
             (store_name, store_address, store_city, store_state, store_zip, store_contact)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .map_err(AppError::Schema)?;

    for (name, address, city, state, zip) in STORE_SEED {
        stmt.execute(rusqlite::params![name, address, city, state, zip, ""])
            .map_err(AppError::Schema)?;
    }

    Ok(())
}
