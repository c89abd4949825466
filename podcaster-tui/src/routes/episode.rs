use podcaster_core::PlayerContext;
use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    router::{RouteAction, RouteHandler},
    state::AppState,
};

/// Detail view for one episode
#[derive(Debug, Clone)]
pub struct EpisodeRoute {
    id: String,
}

impl EpisodeRoute {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

impl RouteHandler for EpisodeRoute {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .title(" Episode ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let episode = match state.catalog.find(&self.id) {
            Ok(episode) => episode,
            Err(err) => {
                let text = Paragraph::new(err.to_string())
                    .style(Style::default().fg(Color::Red))
                    .block(block);
                frame.render_widget(text, area);
                return;
            }
        };

        let mut text = vec![
            Line::from(Span::styled(
                episode.title.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(episode.members.as_str(), Style::default().fg(Color::Gray)),
                Span::raw("  ·  "),
                Span::styled(episode.published_date(), Style::default().fg(Color::Gray)),
                Span::raw("  ·  "),
                Span::styled(episode.duration_string(), Style::default().fg(Color::Gray)),
            ]),
            Line::default(),
        ];
        text.extend(strip_html(&episode.description).lines().map(|l| Line::from(l.to_string())));

        let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn handle_input(
        &mut self,
        key: KeyCode,
        state: &mut AppState,
        player: &mut PlayerContext,
    ) -> anyhow::Result<RouteAction> {
        match key {
            KeyCode::Enter => {
                let episode = state.catalog.find(&self.id)?;
                player.play(episode.to_episode());
            }
            KeyCode::Left | KeyCode::Backspace => return Ok(RouteAction::Pop),
            _ => {}
        }
        Ok(RouteAction::None)
    }

    fn name(&self) -> &str {
        "Episode"
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![("Enter", "Play episode"), ("←/Esc", "Back"), ("Q", "Quit")]
    }
}

/// Descriptions are HTML; keep the text and turn paragraph ends into newlines
fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut tag = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                let name = tag.trim_start_matches('/').to_ascii_lowercase();
                if name.starts_with("br") || (tag.starts_with('/') && name == "p") {
                    out.push('\n');
                }
            }
            _ if in_tag => tag.push(c),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::strip_html;

    #[test]
    fn strips_tags_and_keeps_paragraphs() {
        assert_eq!(
            strip_html("<p>Open source.</p><p>Nesse <a href=\"x\">episódio</a><br/>vamos</p>"),
            "Open source.\nNesse episódio\nvamos\n"
        );
    }
}
