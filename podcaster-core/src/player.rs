use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, unbounded};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::commands::PlayerCommand;
use crate::episode::Episode;
use crate::error::PlayerError;

/// Snapshot of what is queued and what the player intends to do with it.
///
/// Snapshots are never mutated once published. Every operation on
/// [`PlayerContext`] builds a new one and hands the same `Arc` to all
/// listeners, so no subscriber can observe a half-applied update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerState {
    /// The queue, in playback order
    pub episode_list: Arc<Vec<Episode>>,
    /// Cursor into `episode_list`; 0 when the queue is empty
    pub current_episode_index: usize,
    pub is_playing: bool,
    /// The playback surface restarts the episode on end instead of advancing
    pub is_looping: bool,
    /// `play_next` picks a random position instead of advancing
    pub is_shuffling: bool,
}

impl PlayerState {
    pub fn has_previous(&self) -> bool {
        self.current_episode_index > 0
    }

    /// True whenever shuffle is on, even for a queue of one (or none).
    pub fn has_next(&self) -> bool {
        self.is_shuffling || self.current_episode_index + 1 < self.episode_list.len()
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.episode_list.get(self.current_episode_index)
    }

    pub fn is_empty(&self) -> bool {
        self.episode_list.is_empty()
    }
}

enum Listener {
    Callback(Box<dyn FnMut(&PlayerState)>),
    Channel(Sender<Arc<PlayerState>>),
}

type ListenerId = u64;

#[derive(Default)]
struct Registry {
    next_id: ListenerId,
    listeners: Vec<(ListenerId, Rc<RefCell<Listener>>)>,
}

impl Registry {
    fn insert(&mut self, listener: Listener) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Rc::new(RefCell::new(listener))));
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}

/// Handle returned by [`PlayerContext::subscribe`].
///
/// Dropping it leaves the listener registered; call
/// [`Subscription::unsubscribe`] to stop receiving updates.
pub struct Subscription {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Remove the listener. Returns false if the player is gone or the
    /// listener was already removed.
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.borrow_mut().remove(self.id),
            None => false,
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscription({})", self.id)
    }
}

/// The shared player state container.
///
/// Built once per session and passed by reference to whatever needs to read
/// or drive playback.
pub struct PlayerContext {
    state: Arc<PlayerState>,
    registry: Rc<RefCell<Registry>>,
    rng: StdRng,
}

impl fmt::Debug for PlayerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerContext")
            .field("state", &self.state)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Default for PlayerContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerContext {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic shuffle order, for tests and replays
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            state: Arc::new(PlayerState::default()),
            registry: Rc::new(RefCell::new(Registry::default())),
            rng,
        }
    }

    // ==============================================
    // Read side
    // ==============================================

    pub fn snapshot(&self) -> Arc<PlayerState> {
        Arc::clone(&self.state)
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.state.current_episode()
    }

    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.state.has_previous()
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    // ==============================================
    // Subscriptions
    // ==============================================

    /// Register a callback invoked with every new snapshot.
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&PlayerState) + 'static,
    {
        let id = self
            .registry
            .borrow_mut()
            .insert(Listener::Callback(Box::new(listener)));
        log::debug!("Listener {} subscribed", id);
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Receive snapshots over a channel. The listener is dropped once the
    /// receiver is.
    pub fn subscribe_channel(&mut self) -> Receiver<Arc<PlayerState>> {
        let (tx, rx) = unbounded();
        let id = self.registry.borrow_mut().insert(Listener::Channel(tx));
        log::debug!("Channel listener {} subscribed", id);
        rx
    }

    // ==============================================
    // Operations
    // ==============================================

    /// Replace the queue with a single episode and start playing it.
    pub fn play(&mut self, episode: Episode) {
        log::info!("Playing '{}'", episode.title);
        self.update(|state| {
            state.episode_list = Arc::new(vec![episode]);
            state.current_episode_index = 0;
            state.is_playing = true;
        });
    }

    /// Replace the queue and start playing at `index`.
    ///
    /// An out-of-range index is clamped to the last episode (0 for an empty
    /// list). Use [`PlayerContext::try_play_list`] to reject it instead.
    pub fn play_list(&mut self, list: impl Into<Arc<Vec<Episode>>>, index: usize) {
        let list = list.into();
        let clamped = index.min(list.len().saturating_sub(1));
        if clamped != index {
            log::warn!(
                "Episode index {} out of range for queue of {}, clamped to {}",
                index,
                list.len(),
                clamped
            );
        }
        self.start_list(list, clamped);
    }

    /// Like [`PlayerContext::play_list`], but leaves the state untouched and
    /// fails when `index` is outside the list.
    pub fn try_play_list(
        &mut self,
        list: impl Into<Arc<Vec<Episode>>>,
        index: usize,
    ) -> Result<(), PlayerError> {
        let list = list.into();
        if index >= list.len() {
            return Err(PlayerError::InvalidIndex {
                index,
                len: list.len(),
            });
        }
        self.start_list(list, index);
        Ok(())
    }

    fn start_list(&mut self, list: Arc<Vec<Episode>>, index: usize) {
        log::info!("Playing queue of {} from {}", list.len(), index);
        self.update(|state| {
            state.episode_list = list;
            state.current_episode_index = index;
            state.is_playing = true;
        });
    }

    pub fn toggle_play(&mut self) {
        self.update(|state| state.is_playing = !state.is_playing);
    }

    /// Mirror a play/pause event reported by the playback surface.
    pub fn set_play_state(&mut self, is_playing: bool) {
        self.update(|state| state.is_playing = is_playing);
    }

    pub fn toggle_loop(&mut self) {
        self.update(|state| state.is_looping = !state.is_looping);
    }

    pub fn toggle_shuffle(&mut self) {
        self.update(|state| state.is_shuffling = !state.is_shuffling);
    }

    /// Advance the cursor.
    ///
    /// While shuffling, picks any position in the queue (the current one
    /// included). Otherwise moves forward by one, stopping at the last episode.
    pub fn play_next(&mut self) {
        let len = self.state.episode_list.len();
        let next_index = if self.state.is_shuffling {
            if len == 0 {
                log::debug!("Shuffle requested on an empty queue, ignoring");
                return;
            }
            self.rng.random_range(0..len)
        } else if self.state.has_next() {
            self.state.current_episode_index + 1
        } else {
            return;
        };

        self.update(|state| state.current_episode_index = next_index);
    }

    pub fn play_previous(&mut self) {
        if !self.state.has_previous() {
            return;
        }
        self.update(|state| state.current_episode_index -= 1);
    }

    /// Empty the queue. Play, loop and shuffle flags are kept.
    pub fn clear_player_state(&mut self) {
        log::info!("Clearing player queue");
        self.update(|state| {
            state.episode_list = Arc::new(Vec::new());
            state.current_episode_index = 0;
        });
    }

    /// Apply a command
    pub fn dispatch(&mut self, command: PlayerCommand) {
        log::debug!("Dispatching {}", command);
        match command {
            PlayerCommand::Play(episode) => self.play(episode),
            PlayerCommand::PlayList { list, index } => self.play_list(list, index),
            PlayerCommand::TogglePlay => self.toggle_play(),
            PlayerCommand::SetPlayState(is_playing) => self.set_play_state(is_playing),
            PlayerCommand::ToggleLoop => self.toggle_loop(),
            PlayerCommand::ToggleShuffle => self.toggle_shuffle(),
            PlayerCommand::Next => self.play_next(),
            PlayerCommand::Previous => self.play_previous(),
            PlayerCommand::Clear => self.clear_player_state(),
        }
    }

    // ==============================================
    // Internals
    // ==============================================

    fn update(&mut self, apply: impl FnOnce(&mut PlayerState)) {
        let mut next = PlayerState::clone(&self.state);
        apply(&mut next);
        self.state = Arc::new(next);
        self.notify();
    }

    fn notify(&self) {
        // Clone the handles out so listeners may unsubscribe while being called
        let listeners: Vec<_> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        let mut disconnected = Vec::new();
        for (id, listener) in listeners {
            let delivered = match &mut *listener.borrow_mut() {
                Listener::Callback(callback) => {
                    callback(self.state.as_ref());
                    true
                }
                Listener::Channel(tx) => tx.send(Arc::clone(&self.state)).is_ok(),
            };
            if !delivered {
                disconnected.push(id);
            }
        }

        if !disconnected.is_empty() {
            let mut registry = self.registry.borrow_mut();
            for id in disconnected {
                log::debug!("Channel listener {} disconnected", id);
                registry.remove(id);
            }
        }
    }
}
