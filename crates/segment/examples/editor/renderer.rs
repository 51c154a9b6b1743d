use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use segment::text::char_len;

use crate::App;

const WORDS_PANEL_WIDTH: u16 = 34;

pub fn render(frame: &mut Frame, app: &App) {
    let [header_area, body_area, status_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [blocks_area, words_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(WORDS_PANEL_WIDTH)])
            .areas(body_area);

    render_header(frame, app, header_area);
    render_blocks(frame, app, blocks_area);
    if app.active_block().picker().is_open() {
        render_picker(frame, app, words_area);
    } else {
        render_words(frame, app, words_area);
    }
    render_status(frame, app, status_area);
    render_hints(frame, hint_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let text = format!(
        " {} | segment {}/{} ",
        app.fixture_name,
        app.active + 1,
        app.blocks.len()
    );
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_blocks(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for (index, block) in app.blocks.iter().enumerate() {
        let is_active = index == app.active;

        let mut spans: Vec<Span> = vec![
            Span::styled(
                format!("[{}] ", block.timestamp_label()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("{}: ", block.speaker_label()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        if block.segment().was_split() {
            spans.push(Span::styled("⑂ ", Style::default().fg(Color::Yellow)));
        }

        for (node_index, node) in block.view().nodes().iter().enumerate() {
            if is_active && node_index == app.caret_node {
                spans.extend(caret_spans(node.text(), app));
            } else if app.select_all && is_active {
                spans.push(Span::styled(
                    node.text().to_string(),
                    Style::default().bg(Color::DarkGray),
                ));
            } else {
                spans.push(Span::raw(node.text().to_string()));
            }
        }

        lines.push(Line::from(spans));
        lines.push(Line::raw(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// Render the caret node with the caret character reversed.
fn caret_spans(text: &str, app: &App) -> Vec<Span<'static>> {
    let lead = text.chars().take_while(|c| c.is_whitespace()).count();
    let at = lead + app.caret_offset;

    let mut before = String::new();
    let mut caret_char = None;
    let mut after = String::new();

    for (i, c) in text.chars().enumerate() {
        if i < at {
            before.push(c);
        } else if i == at {
            caret_char = Some(c);
        } else {
            after.push(c);
        }
    }

    let mut spans = vec![Span::raw(before)];
    match caret_char {
        Some(c) => spans.push(Span::styled(
            c.to_string(),
            Style::default().add_modifier(Modifier::REVERSED),
        )),
        None => spans.push(Span::styled(
            "▏",
            Style::default().fg(Color::DarkGray),
        )),
    }
    spans.push(Span::raw(after));
    spans
}

fn render_words(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" words ", Style::default().fg(Color::DarkGray)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let words = app.active_block().view().extract();
    let mut lines: Vec<Line> = Vec::new();

    for word in &words {
        let label_width = (inner.width as usize).saturating_sub(14).max(4);
        let mut text = word.text.clone();
        if char_len(&text) > label_width {
            text = text.chars().take(label_width).collect();
        }
        lines.push(Line::from(vec![
            Span::raw(format!("{text:<label_width$}")),
            Span::styled(
                format!(" {:>5.2}–{:<5.2}", word.start, word.end),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("words ", Style::default().fg(Color::DarkGray)),
        Span::raw(words.len().to_string()),
        Span::styled("  nodes ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.active_block().view().len().to_string()),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_picker(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " speakers ",
            Style::default().fg(Color::DarkGray),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let picker = app.active_block().picker();
    let mut lines: Vec<Line> = Vec::new();

    if picker.speakers().is_empty() {
        lines.push(Line::from(Span::styled(
            "no speakers found",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (index, speaker) in picker.speakers().iter().enumerate() {
        let selected = picker.selected().is_some_and(|s| s.id == speaker.id);
        let marker = if selected { "●" } else { " " };
        let style = if selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(format!("{marker} {}", speaker.name), style),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "[1-9] pick  [Esc] close",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    frame.render_widget(
        Paragraph::new(format!(" {}", app.status)).style(Style::default().fg(Color::Yellow)),
        area,
    );
}

fn render_hints(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(
            " [←/→] caret  [↑/↓] segment  [Enter] break  [Ctrl-Enter] split  [Space] split word  [Ctrl-P] speaker  [Ctrl-A] select  [Ctrl-Q] quit ",
        )
        .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
