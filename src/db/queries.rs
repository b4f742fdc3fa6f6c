//! Typed queries over the storage gateway: row mapping plus the lookups
//! used by the auth and shift flows.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::Row;

use crate::db::gateway::Storage;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::feedback::ConsumerFeedback;
use crate::models::role::Role;
use crate::models::shift::ShiftLog;
use crate::models::store::StoreLocation;
use crate::models::user::User;

pub fn map_employee(row: &Row) -> rusqlite::Result<Employee> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    Ok(Employee {
        employee_id: row.get("employee_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        phone_number: row.get::<_, Option<String>>("phone_number")?.unwrap_or_default(),
        role,
    })
}

pub fn map_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        user_id: row.get("user_id")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        employee_id: row.get("employee_id")?,
    })
}

pub fn map_store(row: &Row) -> rusqlite::Result<StoreLocation> {
    Ok(StoreLocation {
        store_id: row.get("store_id")?,
        store_name: row.get("store_name")?,
        store_address: row.get("store_address")?,
        store_city: row.get("store_city")?,
        store_state: row.get("store_state")?,
        store_zip: row.get("store_zip")?,
        store_contact: row.get::<_, Option<String>>("store_contact")?.unwrap_or_default(),
    })
}

pub fn map_shift(row: &Row) -> rusqlite::Result<ShiftLog> {
    let date_str: String = row.get("shift_date")?;
    let shift_date = parse_date_col(&date_str)?;

    let start_str: String = row.get("shift_start_time")?;
    let start_time = parse_time_col(&start_str)?;

    let end_time = match row.get::<_, Option<String>>("shift_end_time")? {
        Some(s) => Some(parse_time_col(&s)?),
        None => None,
    };

    Ok(ShiftLog {
        shift_log_id: row.get("shift_log_id")?,
        employee_id: row.get("employee_id")?,
        store_id: row.get("store_id")?,
        shift_date,
        start_time,
        end_time,
        day_of_week: row.get("day_of_week")?,
        cups_used: row.get::<_, Option<i64>>("cups_used")?.unwrap_or(0),
        cans_used: row.get::<_, Option<i64>>("cans_used")?.unwrap_or(0),
        blanco_sold: row.get("blanco_sold")?,
        reposado_sold: row.get("repasado_sold")?,
    })
}

pub fn map_feedback(row: &Row) -> rusqlite::Result<ConsumerFeedback> {
    Ok(ConsumerFeedback {
        feedback_id: row.get("feedback_id")?,
        shift_log_id: row.get("shift_log_id")?,
        consumer_question: row
            .get::<_, Option<String>>("consumer_question")?
            .unwrap_or_default(),
        consumer_feedback: row
            .get::<_, Option<String>>("consumer_feedback")?
            .unwrap_or_default(),
    })
}

fn parse_date_col(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(s.to_string())),
        )
    })
}

fn parse_time_col(s: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(s.to_string())),
        )
    })
}

// ---------------------------
// Lookups
// ---------------------------

pub fn employee_by_id(storage: &Storage, employee_id: i64) -> AppResult<Option<Employee>> {
    storage.get_first(
        "SELECT * FROM employee WHERE employee_id = ?1",
        &[&employee_id],
        map_employee,
    )
}

/// Case-insensitive credential lookup: emails are stored lowercased and
/// matched with LOWER() so historical mixed-case rows still resolve.
pub fn user_by_email(storage: &Storage, email: &str) -> AppResult<Option<User>> {
    storage.get_first(
        "SELECT * FROM users WHERE LOWER(email) = LOWER(?1)",
        &[&email],
        map_user,
    )
}

pub fn all_stores(storage: &Storage) -> AppResult<Vec<StoreLocation>> {
    storage.query("SELECT * FROM store_location ORDER BY store_id", &[], map_store)
}

pub fn store_by_id(storage: &Storage, store_id: i64) -> AppResult<Option<StoreLocation>> {
    storage.get_first(
        "SELECT * FROM store_location WHERE store_id = ?1",
        &[&store_id],
        map_store,
    )
}

pub fn shift_by_id(storage: &Storage, shift_log_id: i64) -> AppResult<Option<ShiftLog>> {
    storage.get_first(
        "SELECT * FROM shift_log WHERE shift_log_id = ?1",
        &[&shift_log_id],
        map_shift,
    )
}

/// The employee's open shift, if any. At most one exists, see start_shift.
pub fn open_shift_for(storage: &Storage, employee_id: i64) -> AppResult<Option<ShiftLog>> {
    storage.get_first(
        "SELECT * FROM shift_log
         WHERE employee_id = ?1 AND shift_end_time IS NULL
         ORDER BY shift_log_id DESC",
        &[&employee_id],
        map_shift,
    )
}

pub fn shifts_for_employee(storage: &Storage, employee_id: i64) -> AppResult<Vec<ShiftLog>> {
    storage.query(
        "SELECT * FROM shift_log
         WHERE employee_id = ?1
         ORDER BY shift_date DESC, shift_start_time DESC",
        &[&employee_id],
        map_shift,
    )
}

pub fn all_shifts(storage: &Storage) -> AppResult<Vec<ShiftLog>> {
    storage.query(
        "SELECT * FROM shift_log ORDER BY shift_date DESC, shift_start_time DESC",
        &[],
        map_shift,
    )
}

pub fn feedback_for_shift(storage: &Storage, shift_log_id: i64) -> AppResult<Vec<ConsumerFeedback>> {
    storage.query(
        "SELECT * FROM consumer_feedback WHERE shift_log_id = ?1 ORDER BY feedback_id",
        &[&shift_log_id],
        map_feedback,
    )
}
