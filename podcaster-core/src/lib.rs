pub mod catalog;
pub mod commands;
pub mod episode;
pub mod error;
pub mod player;
pub mod transport;

pub use commands::PlayerCommand;
pub use episode::Episode;
pub use error::{CatalogError, PlayerError};
pub use player::{PlayerContext, PlayerState, Subscription};
