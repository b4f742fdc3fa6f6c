use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone)]
pub struct ShiftLog {
    pub shift_log_id: i64,
    pub employee_id: i64,            // ⇔ shift_log.employee_id (FK employee)
    pub store_id: i64,               // ⇔ shift_log.store_id (FK store_location)
    pub shift_date: NaiveDate,       // ⇔ shift_log.shift_date (TEXT "YYYY-MM-DD")
    pub start_time: NaiveTime,       // ⇔ shift_log.shift_start_time (TEXT "HH:MM:SS")
    pub end_time: Option<NaiveTime>, // ⇔ shift_log.shift_end_time, NULL while open
    pub day_of_week: String,         // ⇔ shift_log.day_of_week ("Monday"…)
    pub cups_used: i64,
    pub cans_used: i64,
    pub blanco_sold: i64,
    pub reposado_sold: i64, // ⇔ shift_log.repasado_sold (historical column spelling)
}

impl ShiftLog {
    /// A shift is open from start until its end time is set.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn date_str(&self) -> String {
        self.shift_date.format("%Y-%m-%d").to_string()
    }

    pub fn start_str(&self) -> String {
        self.start_time.format("%H:%M:%S").to_string()
    }

    pub fn end_str(&self) -> String {
        match self.end_time {
            Some(t) => t.format("%H:%M:%S").to_string(),
            None => "open".to_string(),
        }
    }
}
