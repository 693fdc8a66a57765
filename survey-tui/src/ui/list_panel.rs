//! List panel: breadcrumbs, question prompt, and the current list of choices.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Path: ", theme::muted()),
        Span::styled(app.path().to_string(), theme::accent()),
    ]));
    if let Some(prompt) = app.question_prompt() {
        lines.push(Line::from(Span::styled(prompt.to_string(), theme::text())));
    }
    lines.push(Line::from(""));

    let entries = app.list_entries();
    if entries.is_empty() {
        lines.push(Line::from(Span::styled("(nothing to select)", theme::muted())));
    }

    // Keep the cursor in view on short terminals.
    let header = lines.len();
    let visible = (area.height as usize).saturating_sub(header).max(1);
    let start = app.cursor.saturating_sub(visible - 1);

    for (i, entry) in entries.iter().enumerate().skip(start).take(visible) {
        let marker = if entry.active { "▸ " } else { "  " };
        let style = if i == app.cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else if entry.active {
            theme::positive()
        } else {
            theme::neutral()
        };
        lines.push(Line::from(vec![
            Span::styled(marker, theme::positive()),
            Span::styled(entry.label.clone(), style),
        ]));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
