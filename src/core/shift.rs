//! Shift lifecycle: start at a store, tally activity in place, end with
//! optional consumer feedback.

use rusqlite::params;

use crate::db::gateway::{self, Storage, insert_into};
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::shift::ShiftLog;
use crate::utils::date;

/// Partial counter update: unset fields keep their current value.
#[derive(Debug, Default, Clone, Copy)]
pub struct TallyUpdate {
    pub cups_used: Option<i64>,
    pub cans_used: Option<i64>,
    pub blanco_sold: Option<i64>,
    pub reposado_sold: Option<i64>,
}

impl TallyUpdate {
    pub fn is_empty(&self) -> bool {
        self.cups_used.is_none()
            && self.cans_used.is_none()
            && self.blanco_sold.is_none()
            && self.reposado_sold.is_none()
    }
}

/// Start a shift for an employee at a store. One open shift per employee:
/// a second start is rejected until the first one ends.
pub fn start_shift(storage: &Storage, employee_id: i64, store_id: i64) -> AppResult<i64> {
    if queries::store_by_id(storage, store_id)?.is_none() {
        return Err(AppError::StoreNotFound(store_id));
    }
    if let Some(open) = queries::open_shift_for(storage, employee_id)? {
        return Err(AppError::ShiftAlreadyOpen(open.shift_log_id));
    }

    let shift_date = date::today_str();
    let start_time = date::now_time_str();
    let day_of_week = date::weekday_str();

    storage.insert(
        "shift_log",
        &[
            ("employee_id", &employee_id),
            ("store_id", &store_id),
            ("shift_date", &shift_date),
            ("shift_start_time", &start_time),
            ("day_of_week", &day_of_week),
            ("cups_used", &0i64),
            ("cans_used", &0i64),
            ("blanco_sold", &0i64),
            ("repasado_sold", &0i64),
        ],
    )
}

/// Update the activity counters of an open shift and return the new row.
pub fn record_activity(
    storage: &Storage,
    shift_log_id: i64,
    update: &TallyUpdate,
) -> AppResult<ShiftLog> {
    let shift = queries::shift_by_id(storage, shift_log_id)?
        .ok_or(AppError::ShiftNotFound(shift_log_id))?;
    if !shift.is_open() {
        return Err(AppError::ShiftClosed(shift_log_id));
    }

    let cups = update.cups_used.unwrap_or(shift.cups_used);
    let cans = update.cans_used.unwrap_or(shift.cans_used);
    let blanco = update.blanco_sold.unwrap_or(shift.blanco_sold);
    let reposado = update.reposado_sold.unwrap_or(shift.reposado_sold);

    storage.execute(
        "UPDATE shift_log
         SET cups_used = ?1, cans_used = ?2, blanco_sold = ?3, repasado_sold = ?4
         WHERE shift_log_id = ?5",
        &[&cups, &cans, &blanco, &reposado, &shift_log_id],
    )?;

    Ok(ShiftLog {
        cups_used: cups,
        cans_used: cans,
        blanco_sold: blanco,
        reposado_sold: reposado,
        ..shift
    })
}

/// Close a shift: set the end time and, when any trimmed text was entered,
/// record the consumer feedback, both inside one transaction. Closing an
/// already closed shift is rejected, which also caps feedback at one row
/// per shift.
pub fn end_shift(
    storage: &Storage,
    shift_log_id: i64,
    question: &str,
    feedback: &str,
) -> AppResult<()> {
    let end_time = date::now_time_str();
    let question = question.trim();
    let feedback = feedback.trim();

    storage.with_tx(|tx| {
        let end_state: Option<Option<String>> = {
            use rusqlite::OptionalExtension;
            tx.query_row(
                "SELECT shift_end_time FROM shift_log WHERE shift_log_id = ?1",
                params![shift_log_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| gateway::classify(e, AppError::Query))?
        };
        match end_state {
            None => return Err(AppError::ShiftNotFound(shift_log_id)),
            Some(Some(_)) => return Err(AppError::ShiftClosed(shift_log_id)),
            Some(None) => {}
        }

        tx.execute(
            "UPDATE shift_log SET shift_end_time = ?1 WHERE shift_log_id = ?2",
            params![end_time, shift_log_id],
        )
        .map_err(|e| gateway::classify(e, AppError::Statement))?;

        if !question.is_empty() || !feedback.is_empty() {
            insert_into(
                tx,
                "consumer_feedback",
                &[
                    ("shift_log_id", &shift_log_id),
                    ("consumer_question", &question),
                    ("consumer_feedback", &feedback),
                ],
            )?;
        }

        Ok(())
    })
}
