//! Magic-link sign-in form.
//!
//! Two stages: enter an email and request the link, then enter the one-time
//! code from the email. Identity errors render inline under the active
//! field, per the error-handling contract.

use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

// ── View state ────────────────────────────────────────────────────────────────

/// Which stage the form is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigninStage {
    /// Collecting the email address.
    EnterEmail,
    /// Link requested; collecting the emailed one-time code.
    EnterCode,
}

/// All data required to render the sign-in form.
#[derive(Debug, Clone)]
pub struct SigninViewData {
    /// Current stage.
    pub stage: SigninStage,
    /// Email field contents.
    pub email: String,
    /// Code field contents.
    pub code: String,
    /// Inline identity error, if the last operation failed.
    pub error: Option<String>,
    /// `true` while a request to the identity service is in flight.
    pub busy: bool,
}

impl SigninViewData {
    /// Fresh form at the email stage.
    pub fn new() -> Self {
        Self {
            stage: SigninStage::EnterEmail,
            email: String::new(),
            code: String::new(),
            error: None,
            busy: false,
        }
    }

    /// The text of the field the current stage edits.
    pub fn active_field_mut(&mut self) -> &mut String {
        match self.stage {
            SigninStage::EnterEmail => &mut self.email,
            SigninStage::EnterCode => &mut self.code,
        }
    }
}

impl Default for SigninViewData {
    fn default() -> Self {
        Self::new()
    }
}

// ── Line builders ─────────────────────────────────────────────────────────────

/// Prompt copy for the current stage.
pub fn stage_prompt(stage: SigninStage) -> &'static str {
    match stage {
        SigninStage::EnterEmail => "Sign in via magic link with your email below",
        SigninStage::EnterCode => "Check your email! Enter the sign-in code from the link",
    }
}

/// Build the form lines for the current state.
pub fn form_lines<'a>(data: &'a SigninViewData, theme: &'a Theme) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled("Welcome to Parley", theme.header)),
        Line::from(""),
        Line::from(Span::styled(stage_prompt(data.stage), theme.label)),
        Line::from(""),
    ];

    match data.stage {
        SigninStage::EnterEmail => {
            lines.push(field_line("Email", &data.email, theme));
        }
        SigninStage::EnterCode => {
            lines.push(Line::from(vec![
                Span::styled("Email: ", theme.label),
                Span::styled(data.email.as_str(), theme.dim),
            ]));
            lines.push(field_line("Code", &data.code, theme));
        }
    }

    lines.push(Line::from(""));
    if data.busy {
        lines.push(Line::from(Span::styled("Sending…", theme.info)));
    } else if let Some(error) = &data.error {
        lines.push(Line::from(Span::styled(error.as_str(), theme.error)));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter to submit · Esc to quit",
            theme.dim,
        )));
    }

    lines
}

/// One editable field line with a trailing cursor block.
fn field_line<'a>(label: &'static str, value: &'a str, theme: &'a Theme) -> Line<'a> {
    let mut spans = vec![Span::styled(format!("{label}: "), theme.label)];
    if value.is_empty() {
        spans.push(Span::styled("▏", theme.input_placeholder));
    } else {
        spans.push(Span::styled(value, theme.input));
        spans.push(Span::styled("▏", theme.input_placeholder));
    }
    Line::from(spans)
}

// ── Render ────────────────────────────────────────────────────────────────────

/// Render the sign-in form centred in `area`.
pub fn render_signin(frame: &mut Frame, area: Rect, data: &SigninViewData, theme: &Theme) {
    let lines = form_lines(data, theme);

    let height = (lines.len() as u16 + 2).min(area.height);
    let width = 64.min(area.width);
    let form_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.separator);
    let paragraph = Paragraph::new(Text::from(lines)).block(block);
    frame.render_widget(paragraph, form_area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
