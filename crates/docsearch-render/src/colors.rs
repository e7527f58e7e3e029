//! ANSI styling for terminal output.

/// Bold text.
pub const BOLD: &str = "\x1b[1m";
/// Cyan text (for headers).
pub const CYAN: &str = "\x1b[36m";
/// Green text (for success).
pub const GREEN: &str = "\x1b[32m";
/// Yellow text (for matched terms and warnings).
pub const YELLOW: &str = "\x1b[33m";
/// Red text (for errors).
pub const RED: &str = "\x1b[31m";
/// Dim/gray text (for less important info).
pub const DIM: &str = "\x1b[2m";
/// Reset all formatting.
pub const RESET: &str = "\x1b[0m";

/// Opening sequence for a highlighted term.
pub const MATCH: &str = "\x1b[1;33m";

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    format!("{BOLD}{CYAN}{text}{RESET}")
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{DIM}{text}{RESET}")
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    format!("{GREEN}{text}{RESET}")
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{YELLOW}{text}{RESET}")
}

/// Formats text as an error (red).
pub fn error(text: &str) -> String {
    format!("{RED}{text}{RESET}")
}

/// Returns a dimmed horizontal rule for visual separation.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_formatting() {
        let h = header("Results");
        assert!(h.starts_with(BOLD));
        assert!(h.contains(CYAN));
        assert!(h.ends_with(RESET));
        assert!(h.contains("Results"));
    }

    #[test]
    fn dim_formatting() {
        let d = dim("faint");
        assert!(d.contains(DIM));
        assert!(d.ends_with(RESET));
    }

    #[test]
    fn rule_has_requested_width() {
        let r = rule(4);
        assert!(r.contains("────"));
        assert!(!r.contains("─────"));
    }
}
