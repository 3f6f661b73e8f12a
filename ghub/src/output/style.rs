//! ANSI styling for text output

// ANSI color codes
const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";
pub const GRAY: &str = "\x1b[90m";

/// Text styling, a no-op when colors are off
#[derive(Debug, Clone, Copy, Default)]
pub struct Style {
    use_colors: bool,
}

impl Style {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Enable colors only when stdout is a TTY and `enabled` is set
    pub fn auto(enabled: bool) -> Self {
        use std::io::IsTerminal;
        Self {
            use_colors: enabled && std::io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    pub fn color(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.color(BOLD, text)
    }

    /// Green check mark for completed actions
    pub fn success_mark(&self) -> String {
        self.color(GREEN, "✓")
    }

    pub fn dim(&self, text: &str) -> String {
        self.color(GRAY, text)
    }

    /// Color a PR/issue/run state by its meaning
    pub fn state(&self, state: &str) -> String {
        let code = match state {
            "open" | "success" | "completed" => GREEN,
            "merged" => MAGENTA,
            "closed" | "failure" | "cancelled" | "timed_out" => RED,
            "draft" | "skipped" | "neutral" => GRAY,
            _ => YELLOW,
        };
        self.color(code, state)
    }
}
