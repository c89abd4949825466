use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use podcaster_core::{PlayerCommand, PlayerContext, catalog::Catalog};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};

mod cli;
mod router;
mod routes;
mod state;
mod ui;

use cli::Cli;
use router::{Router, Tab};
use routes::home::HomeRoute;
use state::AppState;

const SEEK_STEP: f32 = 10.0;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tui_logger for the Log tab
    tui_logger::init_logger(cli.log_level).context("Failed to init tui_logger")?;
    tui_logger::set_default_level(cli.log_level);

    log::info!("Starting Podcaster TUI");

    let catalog = Catalog::load(&cli.catalog, cli.catalog_options())
        .with_context(|| format!("Cannot load episodes from {}", cli.catalog.display()))?;

    // One player for the whole session, handed to every route by reference
    let mut player = PlayerContext::new();

    run_tui(catalog, &mut player)
}

fn run_tui(catalog: Catalog, player: &mut PlayerContext) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    leave_raw_mode_on_error(execute!(stdout, EnterAlternateScreen))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = leave_raw_mode_on_error(Terminal::new(backend))?;

    let result = event_loop(&mut terminal, catalog, player);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Setup step after `enable_raw_mode`: a failure must not leave the shell raw
fn leave_raw_mode_on_error<T>(result: io::Result<T>) -> anyhow::Result<T> {
    result.or_else(|err| {
        if let Err(restore) = disable_raw_mode() {
            log::error!("Failed to leave raw mode: {}", restore);
        }
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        Err(anyhow::Error::from(err).context("Failed to set up the terminal"))
    })
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    catalog: Catalog,
    player: &mut PlayerContext,
) -> anyhow::Result<()> {
    let updates = player.subscribe_channel();
    let mut state = AppState::new(catalog, player.snapshot());
    let mut router = Router::new(Box::new(HomeRoute));
    let mut last_tick = Instant::now();

    loop {
        // Advance the simulated media element
        let now = Instant::now();
        state.clock.tick(player, now - last_tick);
        last_tick = now;

        // Pick up every snapshot published since the last frame
        while let Ok(snapshot) = updates.try_recv() {
            state.handle_update(snapshot);
        }

        terminal.draw(|f| ui::draw(f, &state, &router))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_global_keys(key.code, &mut state, player, &mut router) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(err) => state.report_error(&err),
                    }
                }
            }
        }
    }

    log::info!("Shutting down");
    Ok(())
}

/// Handle global keys and delegate route-specific input to router
fn handle_global_keys(
    key: KeyCode,
    state: &mut AppState,
    player: &mut PlayerContext,
    router: &mut Router,
) -> anyhow::Result<bool> {
    if let Some(command) = transport_command(key) {
        player.dispatch(command);
        return Ok(false);
    }

    match key {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char(',') | KeyCode::Char('.') => {
            let step = if key == KeyCode::Char(',') { -SEEK_STEP } else { SEEK_STEP };
            let target = state.clock.position() + step;
            state.clock.seek(&state.player, target);
            return Ok(false);
        }
        KeyCode::Tab => {
            let next_tab = Tab::for_route(router.root().name()).next();
            router.replace(next_tab.route(), state, player)?;
            return Ok(false);
        }
        KeyCode::Esc => {
            if router.depth() > 1 {
                router.pop(state, player)?;
                return Ok(false);
            }
        }
        _ => {}
    }

    // Delegate to the current route's input handler
    let action = router.current_mut().handle_input(key, state, player)?;
    router.execute_action(action, state, player)?;
    Ok(false)
}

/// Transport keys that work the same on every route
fn transport_command(key: KeyCode) -> Option<PlayerCommand> {
    match key {
        KeyCode::Char(' ') => Some(PlayerCommand::TogglePlay),
        KeyCode::Char('n') => Some(PlayerCommand::Next),
        KeyCode::Char('p') => Some(PlayerCommand::Previous),
        KeyCode::Char('l') => Some(PlayerCommand::ToggleLoop),
        KeyCode::Char('s') => Some(PlayerCommand::ToggleShuffle),
        KeyCode::Char('c') => Some(PlayerCommand::Clear),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_keys_map_to_commands() {
        assert_eq!(transport_command(KeyCode::Char(' ')), Some(PlayerCommand::TogglePlay));
        assert_eq!(transport_command(KeyCode::Char('s')), Some(PlayerCommand::ToggleShuffle));
        assert_eq!(transport_command(KeyCode::Enter), None);
    }

    #[test]
    fn setup_failure_is_reported() {
        assert_eq!(leave_raw_mode_on_error(Ok(3)).unwrap(), 3);

        let err = leave_raw_mode_on_error::<()>(Err(io::Error::other("no tty"))).unwrap_err();
        assert_eq!(err.to_string(), "Failed to set up the terminal");
        assert_eq!(err.root_cause().to_string(), "no tty");
    }
}
