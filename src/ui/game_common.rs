//! Screen frame around the play field: title border, run header, key hints
//! and the side panel.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Smallest play field worth drawing.
const MIN_FIELD_HEIGHT: u16 = 8;

/// Areas produced by [`split_screen`].
pub struct ScreenAreas {
    /// One line above the field: run number and best score.
    pub header: Rect,
    pub field: Rect,
    /// Two lines under the field: status message and key hints.
    pub hints: Rect,
    /// Inside of the bordered side panel.
    pub side: Rect,
}

/// Clear `area` and carve it up.
///
/// ```text
/// ┌ Dino Run ──────────────────────┬ Info ───────┐
/// │ run 2                 best 770 │             │
/// │ [field]                        │  [side]     │
/// │ [status]                       │             │
/// │ [keys]                         │             │
/// └────────────────────────────────┴─────────────┘
/// ```
pub fn split_screen(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    accent: Color,
    side_width: u16,
) -> ScreenAreas {
    frame.render_widget(Clear, area);
    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(side_width)])
        .split(inner);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(MIN_FIELD_HEIGHT),
            Constraint::Length(2),
        ])
        .split(columns[0]);

    let panel = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let side = panel.inner(columns[1]);
    frame.render_widget(panel, columns[1]);

    ScreenAreas {
        header: rows[0],
        field: rows[1],
        hints: rows[2],
        side,
    }
}

/// Run number on the left, best score on the right.
pub fn render_header(frame: &mut Frame, area: Rect, run: u32, best: u64) {
    if area.height == 0 {
        return;
    }
    let dim = Style::default().fg(Color::DarkGray);
    let bright = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let left = Line::from(vec![
        Span::styled("run ", dim),
        Span::styled(run.to_string(), bright),
    ]);
    let right = Line::from(vec![
        Span::styled("best ", dim),
        Span::styled(format_score(best), bright),
    ]);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    frame.render_widget(Paragraph::new(left), halves[0]);
    frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), halves[1]);
}

/// Status message, then `key action` pairs on the line below.
pub fn render_hints(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    color: Color,
    keys: &[(&str, &str)],
) {
    let mut lines = vec![Line::from(Span::styled(message, Style::default().fg(color)))];
    let pairs = keys.iter().enumerate().flat_map(|(i, (key, action))| {
        let gap = if i == 0 { "" } else { "  " };
        [
            Span::raw(gap),
            Span::styled(*key, Style::default().fg(Color::White)),
            Span::styled(format!(" {action}"), Style::default().fg(Color::DarkGray)),
        ]
    });
    lines.push(Line::from(pairs.collect::<Vec<_>>()));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Format a score with thousands separators: `12345` -> `12,345`.
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
