use podcaster_core::PlayerContext;
use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
};
use tui_logger::{TuiLoggerWidget, TuiWidgetEvent, TuiWidgetState};

use crate::{
    router::{RouteAction, RouteHandler},
    state::AppState,
};

/// Log route backed by tui-logger's buffer
pub struct LogRoute {
    widget_state: TuiWidgetState,
}

impl std::fmt::Debug for LogRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogRoute")
    }
}

impl LogRoute {
    pub fn new() -> Self {
        Self {
            widget_state: TuiWidgetState::new(),
        }
    }
}

impl RouteHandler for LogRoute {
    fn render(&self, frame: &mut Frame, area: Rect, _state: &AppState) {
        let log_widget = TuiLoggerWidget::default()
            .block(
                Block::default()
                    .title(" 📋 Log (PgUp/PgDn to Scroll) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .style(Style::default().fg(Color::White))
            .state(&self.widget_state);

        frame.render_widget(log_widget, area);
    }

    fn handle_input(
        &mut self,
        key: KeyCode,
        _state: &mut AppState,
        _player: &mut PlayerContext,
    ) -> anyhow::Result<RouteAction> {
        let event = match key {
            KeyCode::PageUp | KeyCode::Up => Some(TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown | KeyCode::Down => Some(TuiWidgetEvent::NextPageKey),
            KeyCode::End => Some(TuiWidgetEvent::EscapeKey),
            _ => None,
        };
        if let Some(event) = event {
            self.widget_state.transition(event);
        }
        Ok(RouteAction::None)
    }

    fn name(&self) -> &str {
        "Log"
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![("↑/↓", "Scroll"), ("End", "Follow"), ("Tab", "Switch Tab"), ("Q", "Quit")]
    }
}
