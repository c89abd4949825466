use std::str::FromStr;

use anyhow::Result;
use podcaster_core::PlayerContext;
use ratatui::crossterm::event::KeyCode;
use ratatui::{Frame, layout::Rect};
use strum::{EnumIter, IntoEnumIterator};

use crate::{
    routes::{home::HomeRoute, log::LogRoute, queue::QueueRoute},
    state::AppState,
};

/// Trait that all routes must implement
pub trait RouteHandler: std::fmt::Debug {
    /// Render this route's UI
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState);

    /// Handle keyboard input for this route
    fn handle_input(
        &mut self,
        key: KeyCode,
        state: &mut AppState,
        player: &mut PlayerContext,
    ) -> Result<RouteAction>;

    /// Display name for the sidebar and breadcrumbs
    fn name(&self) -> &str;

    /// Called when entering this route
    fn on_enter(&mut self, _state: &mut AppState, _player: &mut PlayerContext) -> Result<()> {
        Ok(())
    }

    /// Called when leaving this route
    fn on_exit(&mut self, _state: &mut AppState, _player: &mut PlayerContext) -> Result<()> {
        Ok(())
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![("Tab", "Switch Tab"), ("Q", "Quit")]
    }
}

/// Actions that can be returned from route handlers
#[derive(Debug)]
pub enum RouteAction {
    /// Stay on the current route
    None,
    /// Go back to previous route
    Pop,
    /// Navigate to a new route
    Push(Box<dyn RouteHandler>),
}

/// Router manages the navigation stack
pub struct Router {
    /// Stack of route handlers, last element is current route
    stack: Vec<Box<dyn RouteHandler>>,
}

impl Router {
    pub fn new(initial_route: Box<dyn RouteHandler>) -> Self {
        Self {
            stack: vec![initial_route],
        }
    }

    /// Current route (top of stack)
    pub fn current(&self) -> &dyn RouteHandler {
        self.stack
            .last()
            .expect("Stack should never be empty")
            .as_ref()
    }

    pub fn current_mut(&mut self) -> &mut Box<dyn RouteHandler> {
        self.stack.last_mut().expect("Stack should never be empty")
    }

    /// The tab the current route was opened from
    pub fn root(&self) -> &dyn RouteHandler {
        self.stack
            .first()
            .expect("Stack should never be empty")
            .as_ref()
    }

    pub fn execute_action(
        &mut self,
        action: RouteAction,
        state: &mut AppState,
        player: &mut PlayerContext,
    ) -> Result<()> {
        match action {
            RouteAction::None => Ok(()),
            RouteAction::Pop => self.pop(state, player),
            RouteAction::Push(route) => self.push(route, state, player),
        }
    }

    pub fn push(
        &mut self,
        mut route: Box<dyn RouteHandler>,
        state: &mut AppState,
        player: &mut PlayerContext,
    ) -> Result<()> {
        route.on_enter(state, player)?;
        self.stack.push(route);
        Ok(())
    }

    /// Go back, keeping at least one route on the stack
    pub fn pop(&mut self, state: &mut AppState, player: &mut PlayerContext) -> Result<()> {
        if self.stack.len() > 1 {
            if let Some(mut route) = self.stack.pop() {
                route.on_exit(state, player)?;
            }
        }
        Ok(())
    }

    /// Clear the stack and show `new_route` (tab switching)
    pub fn replace(
        &mut self,
        mut new_route: Box<dyn RouteHandler>,
        state: &mut AppState,
        player: &mut PlayerContext,
    ) -> Result<()> {
        while let Some(mut old_route) = self.stack.pop() {
            old_route.on_exit(state, player)?;
        }
        new_route.on_enter(state, player)?;
        self.stack.push(new_route);
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Main tabs, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, strum::Display, strum::EnumString)]
pub enum Tab {
    Home,
    Queue,
    Log,
}

impl Tab {
    /// Tab a route name belongs to, Home for anything else
    pub fn for_route(name: &str) -> Tab {
        Tab::from_str(name).unwrap_or(Tab::Home)
    }

    pub fn next(self) -> Tab {
        Tab::iter()
            .cycle()
            .skip_while(|tab| *tab != self)
            .nth(1)
            .unwrap_or(Tab::Home)
    }

    pub fn route(self) -> Box<dyn RouteHandler> {
        match self {
            Tab::Home => Box::new(HomeRoute),
            Tab::Queue => Box::new(QueueRoute),
            Tab::Log => Box::new(LogRoute::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_cycle_in_order() {
        assert_eq!(Tab::Home.next(), Tab::Queue);
        assert_eq!(Tab::Queue.next(), Tab::Log);
        assert_eq!(Tab::Log.next(), Tab::Home);
    }

    #[test]
    fn pushed_routes_fall_back_to_home() {
        assert_eq!(Tab::for_route("Queue"), Tab::Queue);
        assert_eq!(Tab::for_route("Episode"), Tab::Home);
        assert_eq!(Tab::Log.route().name(), "Log");
    }
}
