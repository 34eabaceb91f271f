use binwise_core::{ClassificationResult, DisplaySource, Visible};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, Screen, ScanEntry};
use crate::output::match_label;

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new("binwise – which bin does it go in?")
        .block(Block::default().borders(Borders::ALL).title("Binwise"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::RegionSelect => draw_region_select(frame, app, *content_area),
        Screen::Lookup => draw_lookup(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::RegionSelect => "↑/↓ move · Enter/Space select region · q/Ctrl-C quit",
        Screen::Lookup => "Type to search · Ctrl-U clear · Esc change region · Ctrl-C quit",
    };

    let status_text = match &app.status_message {
        Some(msg) => format!("{msg} · {nav_hint}"),
        None => nav_hint.to_owned(),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, *status_area);
}

fn draw_region_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = app
        .regions
        .iter()
        .enumerate()
        .map(|(idx, (code, name))| {
            let prefix = if idx == app.region_list_index {
                "> "
            } else {
                "  "
            };
            ListItem::new(format!("{prefix}{name} ({code})"))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select region (↑/↓, Enter)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.regions.is_empty() {
        state.select(Some(app.region_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_lookup(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box
            Constraint::Min(0),    // result
            Constraint::Length(3), // last scan
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [input_area, result_area, scan_area] = chunks else {
        return;
    };

    let input = Paragraph::new(app.query.as_str())
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Search in {} (e.g. \"banana peel\", \"glass jar\")",
            app.region_name()
        )))
        .wrap(Wrap { trim: true });
    frame.render_widget(input, *input_area);

    draw_result(frame, app, *result_area);
    draw_scan(frame, app, *scan_area);
}

fn draw_result(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let (title, body) = match app.display.visible() {
        Visible::Waiting(DisplaySource::Search) => (
            "Result".to_owned(),
            Text::from("Start typing, or point the camera at an item."),
        ),
        Visible::Waiting(DisplaySource::Scan) => (
            "Result".to_owned(),
            Text::from("Waiting for a confident scan…"),
        ),
        Visible::NotFound => (
            "Result".to_owned(),
            Text::from(Line::styled(
                format!(
                    "No material recognised in \"{}\". Try e.g. glass, paper, battery.",
                    app.query.trim()
                ),
                Style::default().fg(Color::Red),
            )),
        ),
        Visible::Bin(source, result) => (source_title(source), result_text(result)),
    };

    let paragraph = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn source_title(source: DisplaySource) -> String {
    match source {
        DisplaySource::Scan => "Result (from scan)".to_owned(),
        DisplaySource::Search => "Result (from search)".to_owned(),
    }
}

fn result_text(result: &ClassificationResult) -> Text<'static> {
    let bin = &result.bin;
    let mut lines = vec![
        Line::styled(
            bin.name.clone(),
            Style::default()
                .fg(bin_color(&bin.color))
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(format!("Material: {}", result.material)),
    ];
    if !bin.description.is_empty() {
        lines.push(Line::from(bin.description.clone()));
    }
    if !bin.example_items.is_empty() {
        lines.push(Line::from(format!("Examples: {}", bin.example_items.join(", "))));
    }
    if let Some(notes) = &bin.notes {
        lines.push(Line::styled(
            format!("Note: {notes}"),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(
        result.advice.clone(),
        Style::default().fg(Color::Cyan),
    ));
    lines.push(Line::styled(
        format!("matched by {}", match_label(result.matched_by)),
        Style::default().fg(Color::DarkGray),
    ));
    Text::from(lines)
}

fn draw_scan(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = app
        .feed_label
        .as_deref()
        .map_or_else(|| "Scanner (no feed)".to_owned(), |feed| format!("Scanner ({feed})"));

    let (text, style) = match &app.last_scan {
        None => ("No scans yet".to_owned(), Style::default().fg(Color::DarkGray)),
        Some(scan) => scan_line(scan, app.min_confidence),
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn scan_line(scan: &ScanEntry, min_confidence: f32) -> (String, Style) {
    let time = scan.received_at.format("%H:%M:%S");
    let percent = scan.prediction.confidence * 100.0;
    if scan.accepted {
        (
            format!("{time} {} ({percent:.0}%)", scan.prediction.label),
            Style::default().fg(Color::Green),
        )
    } else {
        (
            format!(
                "{time} {} ({percent:.0}%) below {:.0}%, ignored",
                scan.prediction.label,
                min_confidence * 100.0
            ),
            Style::default().fg(Color::Yellow),
        )
    }
}

/// Terminal color for a catalog color token.
fn bin_color(token: &str) -> Color {
    match token.trim().to_ascii_lowercase().as_str() {
        "blue" => Color::Blue,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "brown" => Color::Rgb(150, 90, 40),
        "red" => Color::Red,
        "orange" => Color::LightRed,
        "purple" => Color::Magenta,
        "white" => Color::White,
        "black" => Color::DarkGray,
        "gray" | "grey" => Color::Gray,
        _ => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use binwise_core::Prediction;
    use chrono::{Local, TimeZone};

    use super::*;

    #[test]
    fn catalog_colors_map_to_terminal_colors() {
        assert_eq!(bin_color("Yellow"), Color::Yellow);
        assert_eq!(bin_color(" grey "), Color::Gray);
        assert_eq!(bin_color("chartreuse"), Color::Reset);
    }

    #[test]
    fn ignored_scans_explain_the_threshold() {
        let scan = ScanEntry {
            prediction: Prediction::new("Glass", 0.42),
            received_at: Local
                .with_ymd_and_hms(2026, 3, 1, 9, 5, 7)
                .single()
                .expect("unambiguous time"),
            accepted: false,
        };
        let (text, _) = scan_line(&scan, 0.8);
        assert_eq!(text, "09:05:07 Glass (42%) below 80%, ignored");
    }
}
