//! CLI output helpers: cargo-style status lines and the batch progress bar.

/// ANSI color codes for terminal styling
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const GREEN: &str = "\x1b[32m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &str = "\x1b[93m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
    pub const BRIGHT_RED: &str = "\x1b[91m";
}

/// Whether stderr is an interactive terminal.
pub fn stderr_is_terminal() -> bool {
    atty::is(atty::Stream::Stderr)
}

/// Check if colors should be enabled
pub fn colors_enabled() -> bool {
    // Respect NO_COLOR and TERM conventions
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }
    stderr_is_terminal()
}

/// Get terminal width, defaulting to 80
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Keep the tail of a path, prefixed with an ellipsis, when it is too long.
pub fn truncate_path(path: &str, max_len: usize) -> String {
    let len = path.chars().count();
    if len <= max_len {
        return path.to_string();
    }
    if max_len <= 3 {
        return "...".to_string();
    }
    let tail: String = path.chars().skip(len - (max_len - 3)).collect();
    format!("...{}", tail)
}

/// Status line printer with consistent formatting
/// Inspired by cargo's output style: `   Analyzing src/main.c`
pub struct StatusPrinter {
    use_colors: bool,
}

impl StatusPrinter {
    pub fn new() -> Self {
        Self {
            use_colors: colors_enabled(),
        }
    }

    fn styled(&self, color: &str, bold: bool, text: &str) -> String {
        if self.use_colors {
            let bold_code = if bold { colors::BOLD } else { "" };
            format!("{}{}{}{}", bold_code, color, text, colors::RESET)
        } else {
            text.to_string()
        }
    }

    pub fn status(&self, keyword: &str, message: &str) {
        let keyword_styled = self.styled(colors::BRIGHT_GREEN, true, &format!("{:>12}", keyword));
        eprintln!("{} {}", keyword_styled, message);
    }

    pub fn info(&self, keyword: &str, message: &str) {
        let keyword_styled = self.styled(colors::BRIGHT_CYAN, true, &format!("{:>12}", keyword));
        eprintln!("{} {}", keyword_styled, message);
    }

    pub fn warning(&self, keyword: &str, message: &str) {
        let keyword_styled = self.styled(colors::BRIGHT_YELLOW, true, &format!("{:>12}", keyword));
        eprintln!("{} {}", keyword_styled, message);
    }

    pub fn error(&self, keyword: &str, message: &str) {
        let keyword_styled = self.styled(colors::BRIGHT_RED, true, &format!("{:>12}", keyword));
        eprintln!("{} {}", keyword_styled, message);
    }

    pub fn success(&self, keyword: &str, message: &str) {
        let keyword_styled = self.styled(colors::GREEN, true, &format!("{:>12}", keyword));
        eprintln!("{} {}", keyword_styled, message);
    }

    /// Print a dim/secondary info line
    pub fn dim(&self, message: &str) {
        let msg = if self.use_colors {
            format!("{}{}{}", colors::DIM, message, colors::RESET)
        } else {
            message.to_string()
        };
        eprintln!("             {}", msg);
    }

    pub fn section(&self, title: &str) {
        let title_styled = self.styled(colors::BOLD, false, title);
        eprintln!();
        eprintln!("{}", title_styled);
    }
}

impl Default for StatusPrinter {
    fn default() -> Self {
        Self::new()
    }
}

pub mod progress {
    use indicatif::{ProgressBar, ProgressStyle};

    /// Create a styled progress bar
    pub fn create_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{elapsed_precise}] {bar:30.cyan/blue} {pos}/{len} {msg:.dim}")
            .map(|style| style.progress_chars("━━╸").tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}
