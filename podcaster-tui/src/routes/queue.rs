use podcaster_core::PlayerContext;
use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::{
    router::{RouteAction, RouteHandler},
    state::AppState,
};

/// Queue route
#[derive(Debug, Clone)]
pub struct QueueRoute;

impl RouteHandler for QueueRoute {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        draw_queue_panel(frame, area, state);
    }

    fn handle_input(
        &mut self,
        key: KeyCode,
        state: &mut AppState,
        player: &mut PlayerContext,
    ) -> anyhow::Result<RouteAction> {
        match key {
            KeyCode::Up => state.queue_prev(),
            KeyCode::Down => state.queue_next(),
            KeyCode::Enter => {
                if let Some(index) = state.queue_selected() {
                    player.play_list(state.player.episode_list.clone(), index);
                }
            }
            _ => {}
        }
        Ok(RouteAction::None)
    }

    fn name(&self) -> &str {
        "Queue"
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![
            ("↑/↓", "Navigate"),
            ("Enter", "Jump"),
            ("C", "Clear"),
            ("Tab", "Switch Tab"),
            ("Q", "Quit"),
        ]
    }
}

/// Draw the queue panel
pub fn draw_queue_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let snapshot = &state.player;

    let title = format!(" Queue ({} episodes) ", snapshot.episode_list.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = snapshot
        .episode_list
        .iter()
        .enumerate()
        .map(|(i, episode)| {
            let is_current = snapshot.current_episode_index == i;
            let prefix = if is_current { "▶ " } else { "  " };
            let style = if is_current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(
                "{}{}  [{}]",
                prefix,
                episode.title,
                episode.duration_string()
            ))
            .style(style)
        })
        .collect();

    if items.is_empty() {
        let empty_msg = Paragraph::new("Queue is empty. Play something from Home.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty_msg, area);
    } else {
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = state.queue_state.clone();
        f.render_stateful_widget(list, area, &mut list_state);
    }
}
