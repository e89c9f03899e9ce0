use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative accent string placed either side of the application title.
pub const ACCENTS: &str = "· ✦ ·";

/// Application header rendering four lines:
///
/// 1. Application title with accent decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Signed-in email and connection state in `[ email | state ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Email address of the signed-in user.
    pub email: &'a str,
    /// Connection state label (e.g. "connected", "reconnecting").
    pub connection: &'a str,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Construct a new header.
    pub fn new(email: &'a str, connection: &'a str, theme: &'a Theme) -> Self {
        Self {
            email,
            connection,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            // Title line.
            Line::from(vec![
                Span::styled(ACCENTS, self.theme.header_accent),
                Span::styled(" PARLEY · ENGLISH PRACTICE ", self.theme.header),
                Span::styled(ACCENTS, self.theme.header_accent),
            ]),
            // Separator line.
            Line::from(Span::styled(separator, self.theme.separator)),
            // Identity / connection info line.
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.email.to_lowercase(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.connection.to_lowercase(), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            // Empty line.
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
