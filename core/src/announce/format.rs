//! Time formatting helpers for display and speech.

/// Format seconds as `mm:ss` for display.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format seconds as a spoken phrase ("1 minute and 5 seconds").
pub fn format_time_to_words(seconds: u32) -> String {
    if seconds == 60 {
        return "1 minute".to_string();
    }

    if seconds > 60 {
        let minutes = seconds / 60;
        let secs = seconds % 60;
        let minute_part = if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        };
        if secs == 0 {
            return minute_part;
        }
        return format!("{minute_part} and {}", seconds_part(secs));
    }

    seconds_part(seconds)
}

fn seconds_part(secs: u32) -> String {
    if secs == 1 {
        "1 second".to_string()
    } else {
        format!("{secs} seconds")
    }
}
