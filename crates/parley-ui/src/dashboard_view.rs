//! Dashboard: stats header, scenario carousel, and the upgrade modal.
//!
//! Layout mirrors the product's home screen: a hero/stats card with three
//! panels (streak, today's practice, level), the scenario carousel with
//! wrap-around arrows and indicator dots, and a modal that replaces
//! navigation when a locked scenario is selected.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use parley_core::catalog::Catalog;
use parley_core::formatting::{practice_label, remaining_label, streak_label};
use parley_core::gating::{self, LockReason, DAILY_CONVERSATION_LIMIT};
use parley_core::models::Profile;

use crate::components::header::Header;
use crate::components::progress_bar::StatProgressBar;
use crate::components::scenario_card::ScenarioCard;
use crate::themes::Theme;

// ── View data ─────────────────────────────────────────────────────────────────

/// All data required to render the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardViewData {
    /// Signed-in email for the header.
    pub email: String,
    /// Connection state label for the header.
    pub connection: String,
    /// Profile, or `None` while the first snapshot is still loading.
    pub profile: Option<Profile>,
    /// Carousel position.
    pub active_index: usize,
    /// Open upgrade modal, if any.
    pub modal: Option<LockReason>,
    /// Transient notice line (errors, transport drops).
    pub notice: Option<String>,
}

// ── Line builders ─────────────────────────────────────────────────────────────

/// Lines for the streak stat panel.
pub fn streak_panel_lines<'a>(profile: &Profile, theme: &'a Theme) -> Vec<Line<'a>> {
    vec![
        Line::from(Span::styled("🔥 Streak", theme.label)),
        Line::from(Span::styled(streak_label(profile.streak), theme.value)),
        StatProgressBar::new(gating::streak_progress(profile.streak), "of 7", theme).to_line(),
    ]
}

/// Lines for the today's-practice stat panel.
pub fn practice_panel_lines<'a>(profile: &Profile, theme: &'a Theme) -> Vec<Line<'a>> {
    vec![
        Line::from(Span::styled("📖 Today's Practice", theme.label)),
        Line::from(Span::styled(
            practice_label(profile.daily_conversations, DAILY_CONVERSATION_LIMIT),
            theme.value,
        )),
        StatProgressBar::new(gating::daily_progress(profile), "", theme).to_line(),
    ]
}

/// Lines for the level stat panel.
pub fn level_panel_lines<'a>(profile: &Profile, theme: &'a Theme) -> Vec<Line<'a>> {
    let badge = if profile.is_premium { "Premium" } else { "Free" };
    vec![
        Line::from(Span::styled("🏆 Level", theme.label)),
        Line::from(Span::styled("1", theme.value)),
        Line::from(Span::styled(badge, theme.info)),
    ]
}

/// Carousel indicator dots, e.g. `"● ○ ○ ○ ○"`.
pub fn indicator_line<'a>(active: usize, len: usize, theme: &'a Theme) -> Line<'a> {
    let mut spans = Vec::with_capacity(len * 2);
    for i in 0..len {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        if i == active {
            spans.push(Span::styled("●", theme.indicator_active));
        } else {
            spans.push(Span::styled("○", theme.indicator_inactive));
        }
    }
    Line::from(spans)
}

/// Title and body copy for the upgrade modal.
pub fn modal_copy(reason: LockReason) -> (&'static str, &'static str) {
    match reason {
        LockReason::DailyLimit => (
            "Daily Limit Reached",
            "You've used your 3 free conversations for today. \
             For unlimited practice, upgrade to Premium!",
        ),
        LockReason::Premium => (
            "Premium Feature",
            "This scenario is a Premium feature. \
             Unlock this and more with a Premium account!",
        ),
    }
}

// ── Render ────────────────────────────────────────────────────────────────────

/// Render the loading placeholder shown before the first profile arrives.
pub fn render_loading(frame: &mut Frame, area: Rect, theme: &Theme) {
    let paragraph = Paragraph::new(Text::from(vec![
        Line::from(""),
        Line::from(Span::styled("Loading…", theme.dim)),
    ]))
    .centered();
    frame.render_widget(paragraph, area);
}

/// Render the full dashboard into `area`.
pub fn render_dashboard(frame: &mut Frame, area: Rect, data: &DashboardViewData, theme: &Theme) {
    let Some(profile) = &data.profile else {
        render_loading(frame, area, theme);
        return;
    };

    let [header_area, stats_area, title_area, carousel_area, dots_area, footer_area] =
        Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(2),
            Constraint::Min(7),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .areas(area);

    // Header.
    let header = Header::new(&data.email, &data.connection, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

    // Stats card: three bordered panels side by side.
    let [streak_area, practice_area, level_area] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(stats_area);

    fn panel<'a>(lines: Vec<Line<'a>>, theme: &Theme) -> Paragraph<'a> {
        Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).border_style(theme.separator))
    }
    frame.render_widget(panel(streak_panel_lines(profile, theme), theme), streak_area);
    frame.render_widget(panel(practice_panel_lines(profile, theme), theme), practice_area);
    frame.render_widget(panel(level_panel_lines(profile, theme), theme), level_area);

    // Section title + remaining subtitle.
    frame.render_widget(
        Paragraph::new(Text::from(vec![
            Line::from(Span::styled("Practice Scenarios", theme.bold)),
            Line::from(Span::styled(
                remaining_label(gating::conversations_remaining(profile)),
                theme.dim,
            )),
        ])),
        title_area,
    );

    // Carousel: ◀ [active card] ▶.
    let [left_area, card_area, right_area] = Layout::horizontal([
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(3),
    ])
    .areas(carousel_area);

    let arrow = |sym: &'static str| {
        Paragraph::new(Text::from(Span::styled(sym, theme.label))).centered()
    };
    frame.render_widget(arrow("◀"), left_area);
    frame.render_widget(arrow("▶"), right_area);

    let scenarios = Catalog::all();
    if let Some(scenario) = scenarios.get(data.active_index) {
        let gate = gating::evaluate(profile, scenario);
        let card = ScenarioCard::new(scenario, gate, theme);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.card_active_border);
        frame.render_widget(
            Paragraph::new(Text::from(card.to_lines()))
                .wrap(ratatui::widgets::Wrap { trim: true })
                .block(block),
            card_area,
        );
    }

    // Indicator dots.
    frame.render_widget(
        Paragraph::new(indicator_line(data.active_index, scenarios.len(), theme)).centered(),
        dots_area,
    );

    // Footer: notice or key hints.
    let footer = match &data.notice {
        Some(notice) => Line::from(Span::styled(notice.as_str(), theme.warning)),
        None => Line::from(Span::styled(
            "←/→ scenario · Enter start · q quit",
            theme.dim,
        )),
    };
    frame.render_widget(Paragraph::new(footer), footer_area);

    // Modal floats above everything else.
    if let Some(reason) = data.modal {
        render_upgrade_modal(frame, area, reason, theme);
    }
}

/// Render the upgrade modal centred over `area`.
pub fn render_upgrade_modal(frame: &mut Frame, area: Rect, reason: LockReason, theme: &Theme) {
    let (title, body) = modal_copy(reason);

    let mut lines = vec![
        Line::from(Span::styled(format!("{title} ✨"), theme.modal_title)),
        Line::from(""),
        Line::from(Span::styled(body, theme.modal_text)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Monthly $9.99/mo", theme.modal_text),
            Span::styled("   ", theme.modal_text),
            Span::styled("Yearly $5.99/mo · Save 40%", theme.modal_highlight),
        ]),
        Line::from(""),
    ];
    if reason == LockReason::DailyLimit {
        lines.push(Line::from(Span::styled(
            "Come back tomorrow, or upgrade any time.",
            theme.dim,
        )));
    }
    lines.push(Line::from(Span::styled("Esc to dismiss", theme.dim)));

    let width = 56.min(area.width);
    let height = (lines.len() as u16 + 4).min(area.height);
    let modal_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.modal_border);
    frame.render_widget(Clear, modal_area);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(block),
        modal_area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
