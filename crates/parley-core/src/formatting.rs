/// Format a streak count with its day unit.
///
/// # Examples
///
/// ```
/// use parley_core::formatting::streak_label;
///
/// assert_eq!(streak_label(0), "0 days");
/// assert_eq!(streak_label(1), "1 day");
/// assert_eq!(streak_label(6), "6 days");
/// ```
pub fn streak_label(streak: u32) -> String {
    if streak == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", streak)
    }
}

/// Format today's practice count against the daily limit.
///
/// # Examples
///
/// ```
/// use parley_core::formatting::practice_label;
///
/// assert_eq!(practice_label(0, 3), "0 / 3");
/// assert_eq!(practice_label(2, 3), "2 / 3");
/// ```
pub fn practice_label(done: u32, limit: u32) -> String {
    format!("{} / {}", done, limit)
}

/// Format the number of free conversations left today.
///
/// # Examples
///
/// ```
/// use parley_core::formatting::remaining_label;
///
/// assert_eq!(remaining_label(3), "3 conversations remaining today");
/// assert_eq!(remaining_label(1), "1 conversation remaining today");
/// assert_eq!(remaining_label(0), "No conversations remaining today");
/// ```
pub fn remaining_label(remaining: u32) -> String {
    match remaining {
        0 => "No conversations remaining today".to_string(),
        1 => "1 conversation remaining today".to_string(),
        n => format!("{} conversations remaining today", n),
    }
}

/// Format a duration in whole minutes as a compact label.
///
/// # Examples
///
/// ```
/// use parley_core::formatting::format_minutes;
///
/// assert_eq!(format_minutes(45),  "45m");
/// assert_eq!(format_minutes(60),  "1h");
/// assert_eq!(format_minutes(180), "3h");
/// assert_eq!(format_minutes(225), "3h 45m");
/// assert_eq!(format_minutes(0),   "0m");
/// ```
pub fn format_minutes(minutes: u32) -> String {
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        let hours = minutes / 60;
        let mins = minutes % 60;
        if mins == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, mins)
        }
    }
}
