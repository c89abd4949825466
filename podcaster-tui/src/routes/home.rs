use podcaster_core::PlayerContext;
use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use crate::{
    router::{RouteAction, RouteHandler},
    routes::episode::EpisodeRoute,
    state::AppState,
};

/// Homepage: latest releases on top, the rest in a table
#[derive(Debug, Clone)]
pub struct HomeRoute;

impl RouteHandler for HomeRoute {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        draw_home_panel(frame, area, state);
    }

    fn handle_input(
        &mut self,
        key: KeyCode,
        state: &mut AppState,
        player: &mut PlayerContext,
    ) -> anyhow::Result<RouteAction> {
        match key {
            KeyCode::Up => state.home_prev(),
            KeyCode::Down => state.home_next(),
            KeyCode::Enter => {
                // Rows index the combined queue, so the whole page becomes the queue
                if let Some(index) = state.home_state.selected() {
                    player.play_list(state.catalog.queue(), index);
                }
            }
            KeyCode::Right | KeyCode::Char('d') => {
                if let Some(episode) = state.home_selected() {
                    return Ok(RouteAction::Push(Box::new(EpisodeRoute::new(
                        episode.id.clone(),
                    ))));
                }
            }
            _ => {}
        }
        Ok(RouteAction::None)
    }

    fn name(&self) -> &str {
        "Home"
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![
            ("↑/↓", "Navigate"),
            ("Enter", "Play from here"),
            ("→/D", "Details"),
            ("Tab", "Switch Tab"),
            ("Q", "Quit"),
        ]
    }
}

/// Draw the homepage
pub fn draw_home_panel(f: &mut Frame, area: Rect, state: &AppState) {
    if state.catalog.is_empty() {
        let empty_msg = Paragraph::new("No episodes. Pass a catalog with --catalog.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(" Home ").borders(Borders::ALL));
        f.render_widget(empty_msg, area);
        return;
    }

    let latest_len = state.catalog.latest.len();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(latest_height(latest_len)), // Latest releases
            Constraint::Min(0),                             // All episodes
        ])
        .split(area);

    let selected = state.home_state.selected();
    draw_latest(f, chunks[0], state, selected.filter(|i| *i < latest_len));
    draw_all(
        f,
        chunks[1],
        state,
        selected.and_then(|i| i.checked_sub(latest_len)),
    );
}

/// Two lines per latest release plus the borders
fn latest_height(latest_len: usize) -> u16 {
    u16::try_from(latest_len)
        .unwrap_or(u16::MAX)
        .saturating_mul(2)
        .saturating_add(2)
}

fn draw_latest(f: &mut Frame, area: Rect, state: &AppState, selected: Option<usize>) {
    let items: Vec<ListItem> = state
        .catalog
        .latest
        .iter()
        .map(|episode| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    episode.title.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!(
                        "{}  ·  {}  ·  {}",
                        episode.members,
                        episode.published_date(),
                        episode.duration_string()
                    ),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Latest releases ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut list_state = ListState::default();
    list_state.select(selected);
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_all(f: &mut Frame, area: Rect, state: &AppState, selected: Option<usize>) {
    let rows: Vec<Row> = state
        .catalog
        .all
        .iter()
        .map(|episode| {
            Row::new(vec![
                episode.title.clone(),
                episode.members.clone(),
                episode.published_date().to_string(),
                episode.duration_string(),
            ])
        })
        .collect();

    let header = Row::new(vec!["Podcast", "Members", "Date", "Duration"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(45),
            Constraint::Percentage(30),
            Constraint::Length(12),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(" All episodes ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol(">> ");

    let mut table_state = TableState::default();
    table_state.select(selected);
    f.render_stateful_widget(table, area, &mut table_state);
}
