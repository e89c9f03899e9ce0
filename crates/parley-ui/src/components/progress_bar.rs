use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Configuration controlling visual appearance of a progress bar.
pub struct ProgressBarConfig {
    /// Total width in terminal columns of the bar portion (excluding label).
    pub width: u16,
    /// Character used to fill the completed portion of the bar.
    pub filled_char: char,
    /// Character used to fill the empty portion of the bar.
    pub empty_char: char,
}

impl Default for ProgressBarConfig {
    fn default() -> Self {
        Self {
            width: 30,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

// ── StatProgressBar ──────────────────────────────────────────────────────────

/// Horizontal progress bar for a dashboard stat panel.
///
/// Renders as a coloured fill + empty portion followed by a free-form label
/// (e.g. `"2 / 3"` for daily practice or `"4 days"` for the streak).
pub struct StatProgressBar<'a> {
    /// Fill percentage, clamped to `[0.0, 100.0]` at render time.
    pub percentage: f64,
    /// Label text appended after the bar.
    pub label: String,
    /// Theme from which colour styles are taken.
    pub theme: &'a Theme,
    /// Visual configuration.
    pub config: ProgressBarConfig,
}

impl<'a> StatProgressBar<'a> {
    /// Construct a new bar.
    pub fn new(percentage: f64, label: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            percentage,
            label: label.into(),
            theme,
            config: ProgressBarConfig::default(),
        }
    }

    /// Render the progress bar as a [`Line`] suitable for embedding in any
    /// ratatui widget that accepts `Line` values.
    pub fn to_line(&self) -> Line<'a> {
        let capped = self.percentage.clamp(0.0, 100.0);
        let filled = ((capped / 100.0) * self.config.width as f64).round() as u16;
        let empty = self.config.width.saturating_sub(filled);

        let bar_style = self.theme.progress_style(capped);

        let filled_str: String =
            std::iter::repeat_n(self.config.filled_char, filled as usize).collect();
        let empty_str: String =
            std::iter::repeat_n(self.config.empty_char, empty as usize).collect();

        Line::from(vec![
            Span::styled(filled_str, bar_style),
            Span::styled(empty_str, self.theme.progress_empty),
            Span::styled(format!(" {}", self.label), self.theme.progress_label),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::Theme;

    #[test]
    fn test_stat_progress_bar_to_line() {
        let theme = Theme::dark();
        let bar = StatProgressBar::new(50.0, "2 / 3", &theme);

        let line = bar.to_line();
        assert_eq!(line.spans.len(), 3, "expected 3 spans: filled, empty, label");

        // 50 % of 30 columns = 15 chars of '█'.
        let filled = &line.spans[0];
        assert_eq!(filled.content.chars().count(), 15);
        assert!(filled.content.chars().all(|c| c == '█'));

        // Remaining 15 chars of '░'.
        let empty = &line.spans[1];
        assert_eq!(empty.content.chars().count(), 15);
        assert!(empty.content.chars().all(|c| c == '░'));

        assert_eq!(line.spans[2].content.as_ref(), " 2 / 3");
    }

    #[test]
    fn test_stat_progress_bar_zero() {
        let theme = Theme::dark();
        let bar = StatProgressBar::new(0.0, "0 / 3", &theme);
        let line = bar.to_line();

        assert_eq!(line.spans[0].content.len(), 0);
        assert_eq!(line.spans[1].content.chars().count(), 30);
    }

    #[test]
    fn test_stat_progress_bar_full() {
        let theme = Theme::dark();
        let bar = StatProgressBar::new(100.0, "3 / 3", &theme);
        let line = bar.to_line();

        assert_eq!(line.spans[0].content.chars().count(), 30);
        assert_eq!(line.spans[1].content.len(), 0);
    }

    #[test]
    fn test_stat_progress_bar_clamps_out_of_range() {
        let theme = Theme::dark();

        // Over 100 % renders a full bar instead of overflowing.
        let over = StatProgressBar::new(250.0, "x", &theme).to_line();
        assert_eq!(over.spans[0].content.chars().count(), 30);

        // Negative renders an empty bar.
        let under = StatProgressBar::new(-10.0, "x", &theme).to_line();
        assert_eq!(under.spans[0].content.len(), 0);
    }

    #[test]
    fn test_stat_progress_bar_high_fill_uses_high_style() {
        let theme = Theme::dark();
        let bar = StatProgressBar::new(90.0, "3 / 3", &theme);
        let line = bar.to_line();
        assert_eq!(line.spans[0].style, theme.progress_high);
    }
}
