use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::TuiApp;

pub fn render(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Stories pane
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_stories_pane(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_stories_pane(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let title = format!(
        " {} · {} ({}) ",
        app.params.section,
        app.params.order_by,
        app.list.len()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.list.is_loading() || app.list.is_empty() {
        let text = if app.list.is_loading() {
            "Loading..."
        } else {
            app.list.message().unwrap_or("")
        };
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .list
        .stories()
        .iter()
        .map(|story| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    story.section().to_string(),
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(Span::styled(
                    story.display_title().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.story_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let status = if let Some(input) = &app.section_input {
        format!("Section: {}_  (Enter:Apply  Esc:Cancel)", input)
    } else if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        "j/k:Nav  Enter/o:Open  R:Refresh  b:Order  s:Section  q:Quit".to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}
