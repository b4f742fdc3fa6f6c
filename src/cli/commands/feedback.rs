use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::queries;
use crate::db::schema::init_schema;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Feedback { shift } = cmd {
        let storage = cfg.storage();
        init_schema(&storage)?;

        if queries::shift_by_id(&storage, *shift)?.is_none() {
            return Err(AppError::ShiftNotFound(*shift));
        }

        let entries = queries::feedback_for_shift(&storage, *shift)?;
        if entries.is_empty() {
            info(format!("No consumer feedback recorded for shift {}.", shift));
            return Ok(());
        }

        for entry in &entries {
            if !entry.consumer_question.is_empty() {
                println!("Questions: {}", entry.consumer_question);
            }
            if !entry.consumer_feedback.is_empty() {
                println!("Feedback : {}", entry.consumer_feedback);
            }
        }
    }
    Ok(())
}
