use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::images::decode_data_uri;
use crate::models::WardrobeItem;

/// One list row per item: category, season, date, and the description cut to
/// fit `width`.
pub(crate) fn item_row_line(item: &WardrobeItem, width: usize) -> Line<'static> {
    let head = format!(
        "{:<20} {:<7} {}  ",
        item.category.label(),
        item.season.label(),
        item.created_on()
    );
    let remaining = width.saturating_sub(head.chars().count());
    Line::from(vec![
        Span::styled(head, Style::default().fg(Color::Cyan)),
        Span::raw(truncate(item.display_description(), remaining)),
    ])
}

/// Lines for the detail pane of the selected item.
pub(crate) fn item_detail_lines(item: &WardrobeItem) -> Vec<Line<'static>> {
    let label_style = Style::default().add_modifier(Modifier::BOLD);
    let photo = match decode_data_uri(&item.image_base64) {
        Ok((mime, bytes)) => format!("{mime}, {}", human_size(bytes.len())),
        Err(_) => "unreadable".to_string(),
    };

    vec![
        Line::from(vec![
            Span::styled("Category: ", label_style),
            Span::raw(item.category.label()),
        ]),
        Line::from(vec![
            Span::styled("Season:   ", label_style),
            Span::raw(item.season.label()),
        ]),
        Line::from(vec![
            Span::styled("Added:    ", label_style),
            Span::raw(item.created_on()),
        ]),
        Line::from(vec![
            Span::styled("Photo:    ", label_style),
            Span::raw(photo),
        ]),
        Line::from(""),
        Line::from(item.display_description().to_string()),
    ]
}

pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn human_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{bytes} B")
    }
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, column, _] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .areas(area);

    let [_, popup, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .areas(column);

    popup
}

/// Extract the innermost cause of a chained error for the status footer.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("red boots", 20), "red boots");
        assert_eq!(truncate("red boots", 4), "red…");
        assert_eq!(truncate("red boots", 0), "");
    }

    #[test]
    fn human_size_picks_unit() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn surface_error_shows_innermost_cause() {
        let err = Err::<(), _>(anyhow::anyhow!("disk full"))
            .context("failed to add item")
            .unwrap_err();
        assert_eq!(surface_error(&err), "disk full");
    }
}
