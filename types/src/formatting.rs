//! Countdown and duration formatting.
//!
//! All cooldown text goes through this module so every front-end agrees on
//! where the minutes cutover sits.

/// Seconds at and above which a countdown switches to `M:SS`.
pub const MINUTES_CUTOVER_SECS: u32 = 60;

/// Format a whole-second cooldown countdown.
///
/// - Values >= 60: `M:SS` (seconds zero-padded)
/// - Values below 60: bare integer
///
/// # Examples
/// ```
/// use spellwatch_types::formatting::format_cooldown;
/// assert_eq!(format_cooldown(75), "1:15");
/// assert_eq!(format_cooldown(60), "1:00");
/// assert_eq!(format_cooldown(59), "59");
/// assert_eq!(format_cooldown(45), "45");
/// ```
pub fn format_cooldown(remaining_secs: u32) -> String {
    if remaining_secs >= MINUTES_CUTOVER_SECS {
        format_duration(u64::from(remaining_secs))
    } else {
        remaining_secs.to_string()
    }
}

/// Format a duration as `M:SS`.
///
/// # Examples
/// ```
/// use spellwatch_types::formatting::format_duration;
/// assert_eq!(format_duration(125), "2:05");
/// assert_eq!(format_duration(59), "0:59");
/// assert_eq!(format_duration(0), "0:00");
/// ```
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cooldown_minutes() {
        assert_eq!(format_cooldown(75), "1:15");
        assert_eq!(format_cooldown(60), "1:00");
        assert_eq!(format_cooldown(300), "5:00");
        assert_eq!(format_cooldown(361), "6:01");
    }

    #[test]
    fn test_format_cooldown_seconds() {
        assert_eq!(format_cooldown(59), "59");
        assert_eq!(format_cooldown(45), "45");
        assert_eq!(format_cooldown(9), "9");
        assert_eq!(format_cooldown(1), "1");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(60), "1:00");
        assert_eq!(format_duration(125), "2:05");
    }
}
