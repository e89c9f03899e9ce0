//! Conversation view: transcript bubbles, typing indicator, input line.
//!
//! User messages align right and agent messages align left, mirroring the
//! product's chat layout. Wrapping is column-accurate via `unicode-width`
//! so double-width characters don't overflow the bubble column.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use parley_core::models::{Message, MessageSender};

use crate::themes::Theme;

/// Fraction of the transcript width a single bubble may occupy (2/3).
const BUBBLE_WIDTH_NUM: u16 = 2;
const BUBBLE_WIDTH_DEN: u16 = 3;

// ── View data ─────────────────────────────────────────────────────────────────

/// All data required to render the conversation view.
#[derive(Debug, Clone)]
pub struct ChatViewData {
    /// Scenario title for the view header.
    pub scenario_title: String,
    /// Ordered transcript.
    pub transcript: Vec<Message>,
    /// Whether the typing indicator should show.
    pub typing: bool,
    /// Current contents of the input line.
    pub input: String,
    /// Transient notice line (errors), if any.
    pub notice: Option<String>,
}

// ── Text wrapping ─────────────────────────────────────────────────────────────

/// Word-wrap `text` to at most `max_cols` display columns per line.
///
/// Words wider than the limit are hard-broken. Always returns at least one
/// (possibly empty) line.
pub fn wrap_text(text: &str, max_cols: usize) -> Vec<String> {
    if max_cols == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_cols = word.width();
        let current_cols = current.width();

        if current.is_empty() {
            if word_cols <= max_cols {
                current.push_str(word);
            } else {
                hard_break(word, max_cols, &mut lines, &mut current);
            }
        } else if current_cols + 1 + word_cols <= max_cols {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            if word_cols <= max_cols {
                current.push_str(word);
            } else {
                hard_break(word, max_cols, &mut lines, &mut current);
            }
        }
    }

    lines.push(current);
    lines
}

/// Split an over-wide word into column-bounded pieces; the final piece is
/// left in `current` so following words can share its line.
fn hard_break(word: &str, max_cols: usize, lines: &mut Vec<String>, current: &mut String) {
    let mut piece = String::new();
    let mut piece_cols = 0;
    for ch in word.chars() {
        let ch_cols = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if piece_cols + ch_cols > max_cols && !piece.is_empty() {
            lines.push(std::mem::take(&mut piece));
            piece_cols = 0;
        }
        piece.push(ch);
        piece_cols += ch_cols;
    }
    *current = piece;
}

// ── Line builders ─────────────────────────────────────────────────────────────

/// Render one message as wrapped, aligned bubble lines.
///
/// `area_cols` is the full transcript width; bubbles take up to two thirds
/// of it, with user bubbles padded to the right edge.
pub fn bubble_lines<'a>(message: &'a Message, area_cols: u16, theme: &'a Theme) -> Vec<Line<'a>> {
    let bubble_cols = (area_cols * BUBBLE_WIDTH_NUM / BUBBLE_WIDTH_DEN).max(8) as usize;
    let is_user = message.sender == MessageSender::User;
    let style = if is_user {
        theme.user_bubble
    } else {
        theme.agent_bubble
    };

    let mut wrapped = wrap_text(&message.text, bubble_cols);
    // An open agent message shows a streaming cursor on its last line.
    if message.is_open_agent() {
        if let Some(last) = wrapped.last_mut() {
            last.push('▋');
        }
    }

    wrapped
        .into_iter()
        .map(|line| {
            if is_user {
                let pad = (area_cols as usize).saturating_sub(line.width());
                Line::from(vec![
                    Span::raw(" ".repeat(pad)),
                    Span::styled(line, style),
                ])
            } else {
                Line::from(Span::styled(line, style))
            }
        })
        .collect()
}

/// Build the full transcript as lines, one blank line between messages,
/// with the typing indicator appended while a response is pending.
pub fn transcript_lines<'a>(data: &'a ChatViewData, area_cols: u16, theme: &'a Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for (i, message) in data.transcript.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.extend(bubble_lines(message, area_cols, theme));
    }
    if data.typing {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled("Agent is typing…", theme.typing)));
    }
    lines
}

// ── Render ────────────────────────────────────────────────────────────────────

/// Render the conversation view into `area`.
pub fn render_chat(frame: &mut Frame, area: Rect, data: &ChatViewData, theme: &Theme) {
    let [header_area, transcript_area, notice_area, input_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .areas(area);

    // Header: scenario title + back hint.
    frame.render_widget(
        Paragraph::new(Text::from(vec![
            Line::from(vec![
                Span::styled("‹ Esc back   ", theme.dim),
                Span::styled(data.scenario_title.as_str(), theme.header),
            ]),
            Line::from(Span::styled("─".repeat(area.width as usize), theme.separator)),
        ])),
        header_area,
    );

    // Transcript, pinned to the bottom like a chat log.
    let lines = transcript_lines(data, transcript_area.width, theme);
    let visible = transcript_area.height as usize;
    let tail: Vec<Line> = if lines.len() > visible {
        lines[lines.len() - visible..].to_vec()
    } else {
        lines
    };
    frame.render_widget(Paragraph::new(Text::from(tail)), transcript_area);

    // Notice row.
    if let Some(notice) = &data.notice {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(notice.as_str(), theme.warning))),
            notice_area,
        );
    }

    // Input line.
    let input_line = if data.input.is_empty() {
        Line::from(Span::styled("Type or speak…", theme.input_placeholder))
    } else {
        Line::from(vec![
            Span::styled(data.input.as_str(), theme.input),
            Span::styled("▏", theme.input_placeholder),
        ])
    };
    frame.render_widget(
        Paragraph::new(input_line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.separator),
        ),
        input_area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    // ── wrap_text ─────────────────────────────────────────────────────────

    #[test]
    fn test_wrap_text_fits_on_one_line() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_text_breaks_at_word_boundary() {
        assert_eq!(
            wrap_text("the quick brown fox", 9),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_text_hard_breaks_long_word() {
        assert_eq!(
            wrap_text("antidisestablishment", 6),
            vec!["antidi", "sestab", "lishme", "nt"]
        );
    }

    #[test]
    fn test_wrap_text_empty_returns_one_line() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_wrap_text_zero_width_does_not_panic() {
        assert_eq!(wrap_text("abc", 0), vec![""]);
    }

    #[test]
    fn test_wrap_text_counts_display_columns_for_wide_chars() {
        // Each CJK char is 2 columns; 4 columns fit two chars.
        assert_eq!(wrap_text("你好世界", 4), vec!["你好", "世界"]);
    }

    // ── bubble_lines ──────────────────────────────────────────────────────

    #[test]
    fn test_user_bubble_right_aligned() {
        let theme = Theme::dark();
        let msg = Message::user("hi");
        let lines = bubble_lines(&msg, 30, &theme);

        assert_eq!(lines.len(), 1);
        let text = text_of(&lines[0]);
        assert_eq!(text.len(), 30, "user line must be padded to full width");
        assert!(text.ends_with("hi"));
    }

    #[test]
    fn test_agent_bubble_left_aligned() {
        let theme = Theme::dark();
        let msg = Message::agent("hello");
        let lines = bubble_lines(&msg, 30, &theme);

        assert_eq!(text_of(&lines[0]), "hello");
    }

    #[test]
    fn test_open_agent_bubble_shows_streaming_cursor() {
        let theme = Theme::dark();
        let msg = Message::agent_streaming("partial");
        let lines = bubble_lines(&msg, 30, &theme);
        assert!(text_of(lines.last().unwrap()).ends_with('▋'));
    }

    #[test]
    fn test_sealed_agent_bubble_has_no_cursor() {
        let theme = Theme::dark();
        let msg = Message::agent("done");
        let lines = bubble_lines(&msg, 30, &theme);
        assert!(!text_of(lines.last().unwrap()).contains('▋'));
    }

    // ── transcript_lines ──────────────────────────────────────────────────

    fn sample_data(typing: bool) -> ChatViewData {
        ChatViewData {
            scenario_title: "coffee shop".to_string(),
            transcript: vec![Message::user("hi"), Message::agent("hello!")],
            typing,
            input: String::new(),
            notice: None,
        }
    }

    #[test]
    fn test_transcript_orders_messages_with_separators() {
        let theme = Theme::dark();
        let data = sample_data(false);
        let lines = transcript_lines(&data, 30, &theme);

        // user line, blank, agent line.
        assert_eq!(lines.len(), 3);
        assert!(text_of(&lines[0]).ends_with("hi"));
        assert_eq!(text_of(&lines[1]), "");
        assert_eq!(text_of(&lines[2]), "hello!");
    }

    #[test]
    fn test_transcript_appends_typing_indicator() {
        let theme = Theme::dark();
        let data = sample_data(true);
        let lines = transcript_lines(&data, 30, &theme);
        assert_eq!(text_of(lines.last().unwrap()), "Agent is typing…");
    }

    #[test]
    fn test_transcript_empty_with_typing_has_no_leading_blank() {
        let theme = Theme::dark();
        let data = ChatViewData {
            scenario_title: "x".to_string(),
            transcript: vec![],
            typing: true,
            input: String::new(),
            notice: None,
        };
        let lines = transcript_lines(&data, 30, &theme);
        assert_eq!(lines.len(), 1);
        assert_eq!(text_of(&lines[0]), "Agent is typing…");
    }
}
