//! Text output formatting with progress bars and colors.

use chrono::{DateTime, Local, Utc};
use classwatch_entity::{CalendarEvent, ClassProgressSensor, MemberProgressSensor};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 10,
        }
    }

    /// Formats one account: a header, one line per member, and the
    /// member's classes indented underneath.
    pub fn format_account(
        &self,
        account_id: &str,
        members: &[MemberProgressSensor],
        classes: &[ClassProgressSensor],
        refreshed_at: Option<DateTime<Utc>>,
    ) -> String {
        let mut lines = Vec::new();

        let mut header = format!("Account {}", self.bold(account_id));
        if let Some(at) = refreshed_at {
            let local = at.with_timezone(&Local);
            header.push_str(&format!(
                " {}",
                self.dim(&format!("(refreshed {})", local.format("%H:%M:%S")))
            ));
        }
        lines.push(header);

        if members.is_empty() {
            lines.push("  No members found.".to_string());
        }

        for member in members {
            let member_id = member.info.device.identifiers.1;
            let bar = self.progress_bar(member.value());
            let pct = self.color_for_percent(member.value(), &format!("{:.2}%", member.value()));
            lines.push(format!(
                "  {:<14} {bar} {pct}",
                member.info.device.name
            ));

            for class in classes.iter().filter(|c| c.member_id() == member_id) {
                let mut line = format!(
                    "    {}: {:.2}% ({}/{} sessions",
                    self.cyan(&class.info.name),
                    class.value(),
                    class.sessions_completed(),
                    class.total_sessions(),
                );
                if let Some(next) = class.next_session() {
                    let local = next.with_timezone(&Local);
                    line.push_str(&format!(", next {}", local.format("%Y-%m-%d %H:%M")));
                }
                line.push(')');
                lines.push(line);
            }
        }

        lines.join("\n")
    }

    /// Formats calendar events as one line each.
    pub fn format_events(&self, events: &[(String, CalendarEvent)]) -> String {
        if events.is_empty() {
            return "No sessions in this window.".to_string();
        }

        let mut lines = Vec::new();
        for (calendar, event) in events {
            let local = event.start.with_timezone(&Local);
            lines.push(format!(
                "{}  {} {}",
                local.format("%Y-%m-%d %H:%M"),
                self.bold(&event.summary),
                self.dim(&format!("[{calendar}]")),
            ));
        }
        lines.join("\n")
    }

    /// Formats a per-account failure.
    pub fn format_error(&self, account_id: &str, message: &str, reauth_required: bool) -> String {
        let prefix = if reauth_required {
            self.red("reauth required")
        } else {
            self.yellow("update failed")
        };
        format!("Account {}: {prefix} - {message}", self.bold(account_id))
    }

    /// Formats a progress bar showing completed percentage.
    fn progress_bar(&self, percent: f64) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let filled = ((percent / 100.0) * self.bar_width as f64).round() as usize;
        let filled = filled.min(self.bar_width);

        let mut bar = String::with_capacity(self.bar_width);
        for _ in 0..filled {
            bar.push(BAR_FULL);
        }
        for _ in filled..self.bar_width {
            bar.push(BAR_EMPTY);
        }
        bar
    }

    /// Colors a percentage by how far along it is.
    fn color_for_percent(&self, percent: f64, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        let color = if percent >= 80.0 {
            GREEN
        } else if percent >= 40.0 {
            YELLOW
        } else {
            RED
        };
        format!("{color}{text}{RESET}")
    }

    fn bold(&self, text: &str) -> String {
        self.wrap(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.wrap(DIM, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.wrap(CYAN, text)
    }

    fn red(&self, text: &str) -> String {
        self.wrap(RED, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.wrap(YELLOW, text)
    }

    fn wrap(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
