use chrono::Local;

/// Today as the DB date format "YYYY-MM-DD".
pub fn today_str() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Current local time as the DB time format "HH:MM:SS".
pub fn now_time_str() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Full weekday name, "Monday" … "Sunday".
pub fn weekday_str() -> String {
    Local::now().format("%A").to_string()
}
