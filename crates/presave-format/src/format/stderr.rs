use once_cell::sync::Lazy;
use regex::Regex;

// ex. "\x1b[31m" or "\x1b[0m"
static ANSI_COLOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[\d{1,2}m").unwrap());

/// Removes color codes from a formatter's stderr and trims it for display.
pub fn clean_stderr(text: &str) -> String {
  ANSI_COLOR_RE.replace_all(text, "").trim().to_string()
}
