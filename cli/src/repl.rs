//! Line input for the interactive prompt.

use std::io::Write;

const PROMPT: &str = "apnea> ";

pub fn readline() -> Result<String, String> {
    write!(std::io::stdout(), "{PROMPT}").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;

    let mut buffer = String::new();
    std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    Ok(buffer)
}

/// Write a message arriving from a background task, then restore the prompt
/// so the input line is not left dangling mid-notification.
pub fn write_notification(out: &mut impl Write, message: &str) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{message}")?;
    write!(out, "{PROMPT}")?;
    out.flush()
}

/// Print a background notification to stdout. Write failures are ignored;
/// a notification is best-effort.
pub fn notify(message: &str) {
    let _ = write_notification(&mut std::io::stdout(), message);
}

#[cfg(test)]
mod tests {
    use super::write_notification;

    #[test]
    fn notifications_restore_the_prompt() {
        let mut out = Vec::new();
        write_notification(&mut out, "saved practice record").expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "\nsaved practice record\napnea> ");
    }
}
