use podcaster_core::episode::duration_to_time_string;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use strum::IntoEnumIterator;

use crate::{
    router::{Router, Tab},
    state::AppState,
};

/// Draw the TUI interface
pub fn draw(f: &mut Frame, state: &AppState, router: &Router) {
    // Main horizontal split: Sidebar (left) and Main Content (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Length(15), // Sidebar navigation
            Constraint::Min(40),    // Main content area
        ])
        .split(f.area());

    draw_sidebar(f, main_chunks[0], router);
    draw_main_content(f, main_chunks[1], state, router);
}

/// Draw the sidebar navigation
fn draw_sidebar(f: &mut Frame, area: Rect, router: &Router) {
    let block = Block::default()
        .title(" Navigation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let active = Tab::for_route(router.root().name());
    let nav_text: Vec<Line> = Tab::iter()
        .map(|tab| {
            let is_active = tab == active;
            let prefix = if is_active { "▶ " } else { "  " };
            let style = if is_active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!("{}{}", prefix, tab), style))
        })
        .collect();

    f.render_widget(Paragraph::new(nav_text), inner);
}

/// Route content on top, player and footers below
fn draw_main_content(f: &mut Frame, area: Rect, state: &AppState, router: &Router) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Route content
            Constraint::Length(5), // Player
            Constraint::Length(3), // Controls info
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    router.current().render(f, chunks[0], state);
    draw_player(f, chunks[1], state);
    draw_controls(f, chunks[2], state, router);
    draw_status(f, chunks[3], state);
}

/// Now playing, progress and transport flags
fn draw_player(f: &mut Frame, area: Rect, state: &AppState) {
    let snapshot = &state.player;

    let block = Block::default()
        .title(" 🎧 Now Playing ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title and members
            Constraint::Length(1), // Flags
            Constraint::Length(1), // Progress
        ])
        .split(inner);

    let Some(episode) = snapshot.current_episode() else {
        let text = Paragraph::new("Select a podcast to listen")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(text, rows[0]);
        return;
    };

    let title = Line::from(vec![
        Span::styled(
            episode.title.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(episode.members.as_str(), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(title), rows[0]);

    let flag = |on: bool, label: &'static str| {
        let style = if on {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(label, style)
    };
    let flags = Line::from(vec![
        flag(snapshot.is_playing, if snapshot.is_playing { "▶ Playing" } else { "⏸ Paused" }),
        Span::raw("  "),
        flag(snapshot.is_looping, "🔂 Loop"),
        Span::raw("  "),
        flag(snapshot.is_shuffling, "🔀 Shuffle"),
        Span::raw("  "),
        flag(snapshot.has_previous(), "⏮ Prev"),
        Span::raw("  "),
        flag(snapshot.has_next(), "⏭ Next"),
    ]);
    f.render_widget(Paragraph::new(flags), rows[1]);

    let progress_pct = (state.clock.progress(snapshot) * 100.0) as u16;
    let label = format!(
        "{} / {}",
        state.clock.position_string(),
        duration_to_time_string(episode.duration)
    );
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .percent(progress_pct.min(100))
        .label(label);
    f.render_widget(gauge, rows[2]);
}

fn draw_controls(f: &mut Frame, area: Rect, state: &AppState, router: &Router) {
    let mut controls = vec![
        Span::styled("[Space]", Style::default().fg(Color::Yellow)),
        Span::raw(" Play/Pause  "),
        Span::styled("[N/P]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next/Prev  "),
        Span::styled("[L/S]", Style::default().fg(Color::Yellow)),
        Span::raw(" Loop/Shuffle  "),
        Span::styled("[,/.]", Style::default().fg(Color::Yellow)),
        Span::raw(" Seek  "),
    ];
    for (key, label) in router.current().help_items(state) {
        controls.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Magenta),
        ));
        controls.push(Span::raw(format!(" {}  ", label)));
    }

    let paragraph = Paragraph::new(Line::from(controls))
        .block(Block::default().borders(Borders::ALL).title(" Controls "));
    f.render_widget(paragraph, area);
}

fn draw_status(f: &mut Frame, area: Rect, state: &AppState) {
    let status_style = if state.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if state.player.is_playing {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let status_text = format!(
        "{}  |  Queue: {}  |  Catalog: {}",
        state.status_message,
        state.player.episode_list.len(),
        state.catalog.len()
    );

    let paragraph = Paragraph::new(status_text)
        .style(status_style)
        .block(Block::default().borders(Borders::ALL).title(" Status "));
    f.render_widget(paragraph, area);
}
