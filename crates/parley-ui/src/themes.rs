use parley_core::models::Difficulty;
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all UI styles used by parley-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Progress bars ────────────────────────────────────────────────────────
    /// Filled portion when usage is below 50 %.
    pub progress_low: Style,
    /// Filled portion when usage is between 50 % and 80 %.
    pub progress_medium: Style,
    /// Filled portion when usage is at or above 80 %.
    pub progress_high: Style,
    /// Unfilled (empty) portion of a progress bar.
    pub progress_empty: Style,
    pub progress_label: Style,

    // ── Chat ─────────────────────────────────────────────────────────────────
    pub user_bubble: Style,
    pub agent_bubble: Style,
    pub typing: Style,
    pub input: Style,
    pub input_placeholder: Style,

    // ── Scenario cards ───────────────────────────────────────────────────────
    pub card_title: Style,
    pub card_description: Style,
    pub card_meta: Style,
    pub card_locked: Style,
    pub card_premium: Style,
    pub card_active_border: Style,
    pub card_border: Style,

    // ── Difficulty badges ────────────────────────────────────────────────────
    pub difficulty_easy: Style,
    pub difficulty_medium: Style,
    pub difficulty_hard: Style,

    // ── Carousel indicators ──────────────────────────────────────────────────
    pub indicator_active: Style,
    pub indicator_inactive: Style,

    // ── Modal ────────────────────────────────────────────────────────────────
    pub modal_title: Style,
    pub modal_text: Style,
    pub modal_highlight: Style,
    pub modal_border: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            progress_low: Style::default().fg(Color::Green),
            progress_medium: Style::default().fg(Color::Yellow),
            progress_high: Style::default().fg(Color::Red),
            progress_empty: Style::default().fg(Color::DarkGray),
            progress_label: Style::default().fg(Color::Gray),

            user_bubble: Style::default().fg(Color::Cyan),
            agent_bubble: Style::default().fg(Color::White),
            typing: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            input: Style::default().fg(Color::White),
            input_placeholder: Style::default().fg(Color::DarkGray),

            card_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            card_description: Style::default().fg(Color::Gray),
            card_meta: Style::default().fg(Color::DarkGray),
            card_locked: Style::default().fg(Color::DarkGray),
            card_premium: Style::default().fg(Color::Yellow),
            card_active_border: Style::default().fg(Color::Cyan),
            card_border: Style::default().fg(Color::DarkGray),

            difficulty_easy: Style::default().fg(Color::Green),
            difficulty_medium: Style::default().fg(Color::Yellow),
            difficulty_hard: Style::default().fg(Color::Red),

            indicator_active: Style::default().fg(Color::Cyan),
            indicator_inactive: Style::default().fg(Color::DarkGray),

            modal_title: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            modal_text: Style::default().fg(Color::White),
            modal_highlight: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            modal_border: Style::default().fg(Color::Yellow),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Magenta),
            error: Style::default().fg(Color::Red),

            progress_low: Style::default().fg(Color::Green),
            progress_medium: Style::default().fg(Color::Magenta),
            progress_high: Style::default().fg(Color::Red),
            progress_empty: Style::default().fg(Color::Gray),
            progress_label: Style::default().fg(Color::DarkGray),

            user_bubble: Style::default().fg(Color::Blue),
            agent_bubble: Style::default().fg(Color::Black),
            typing: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            input: Style::default().fg(Color::Black),
            input_placeholder: Style::default().fg(Color::Gray),

            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_description: Style::default().fg(Color::DarkGray),
            card_meta: Style::default().fg(Color::Gray),
            card_locked: Style::default().fg(Color::Gray),
            card_premium: Style::default().fg(Color::Magenta),
            card_active_border: Style::default().fg(Color::Blue),
            card_border: Style::default().fg(Color::Gray),

            difficulty_easy: Style::default().fg(Color::Green),
            difficulty_medium: Style::default().fg(Color::Magenta),
            difficulty_hard: Style::default().fg(Color::Red),

            indicator_active: Style::default().fg(Color::Blue),
            indicator_inactive: Style::default().fg(Color::Gray),

            modal_title: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            modal_text: Style::default().fg(Color::Black),
            modal_highlight: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            modal_border: Style::default().fg(Color::Magenta),
        }
    }

    /// Resolve a theme by name. `"auto"` (and anything unrecognised) falls
    /// back to background detection.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => match detect_background() {
                BackgroundType::Light => Self::light(),
                _ => Self::dark(),
            },
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    /// Progress fill style for a usage percentage.
    pub fn progress_style(&self, percentage: f64) -> Style {
        if percentage >= 80.0 {
            self.progress_high
        } else if percentage >= 50.0 {
            self.progress_medium
        } else {
            self.progress_low
        }
    }

    /// Badge style for a difficulty tier.
    pub fn difficulty_style(&self, difficulty: Difficulty) -> Style {
        match difficulty {
            Difficulty::Easy => self.difficulty_easy,
            Difficulty::Medium => self.difficulty_medium,
            Difficulty::Hard => self.difficulty_hard,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
