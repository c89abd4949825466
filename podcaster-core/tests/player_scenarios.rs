use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use podcaster_core::catalog::{Catalog, CatalogOptions};
use podcaster_core::transport::{PlaybackClock, TickOutcome};
use podcaster_core::{Episode, PlayerContext, PlayerState};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn episode(title: &str, duration: u64) -> Episode {
    Episode::new(title, format!("https://cdn.example/{title}.mp3"), duration)
}

const SERVER_JSON: &str = r#"{
  "episodes": [
    {
      "id": "a-importancia-da-contribuicao-em-open-source",
      "title": "A importância da contribuição em Open Source",
      "members": "Diego Fernandes, João Pedro, Diego Haz e Bruno Lemos",
      "published_at": "2021-01-22 19:53:00",
      "thumbnail": "https://storage.example/opensource.jpg",
      "description": "<p>Contribuir com projetos open source.</p>",
      "file": { "url": "https://storage.example/opensource.m4a", "type": "audio/x-m4a", "duration": 3981 }
    },
    {
      "id": "como-virar-lider-desenvolvimento",
      "title": "Como se tornar um líder de desenvolvimento",
      "members": "Diego Fernandes e Richard Nascimento",
      "published_at": "2021-01-21 16:00:00",
      "thumbnail": "https://storage.example/lideranca.jpg",
      "description": "<p>Liderança técnica.</p>",
      "file": { "url": "https://storage.example/lideranca.m4a", "type": "audio/x-m4a", "duration": 3340 }
    },
    {
      "id": "uma-conversa-sobre-programacao-funcional",
      "title": "Uma conversa sobre programação funcional",
      "members": "Diego Fernandes, Mayk Brito e Rodrigo Gonçalves",
      "published_at": "2021-01-21 11:00:00",
      "thumbnail": "https://storage.example/funcional.jpg",
      "description": "<p>Programação funcional.</p>",
      "file": { "url": "https://storage.example/funcional.m4a", "type": "audio/x-m4a", "duration": 2000 }
    }
  ]
}"#;

#[test]
fn homepage_row_plays_whole_catalog_from_that_row() {
    init_logger();
    let catalog = Catalog::from_json(SERVER_JSON, CatalogOptions::default()).unwrap();
    let mut player = PlayerContext::with_seed(7);

    player.play_list(catalog.queue(), catalog.queue_index_of_all(0));

    let state = player.snapshot();
    assert!(Arc::ptr_eq(&state.episode_list, &catalog.queue()));
    assert_eq!(state.current_episode_index, 2);
    assert_eq!(
        player.current_episode().map(|e| e.title.as_str()),
        Some("Uma conversa sobre programação funcional")
    );
    assert!(player.has_previous());
    assert!(!player.has_next());
}

#[test]
fn detail_page_plays_only_that_episode() {
    init_logger();
    let catalog = Catalog::from_json(SERVER_JSON, CatalogOptions::default()).unwrap();
    let mut player = PlayerContext::with_seed(7);
    player.play_list(catalog.queue(), 0);

    let detail = catalog.find("como-virar-lider-desenvolvimento").unwrap();
    player.play(detail.to_episode());

    let state = player.snapshot();
    assert_eq!(state.episode_list.len(), 1);
    assert_eq!(state.current_episode_index, 0);
    assert_eq!(state.episode_list[0].duration, 3340);
    assert!(!player.has_next());
}

#[test]
fn three_episode_walkthrough() {
    init_logger();
    let mut player = PlayerContext::with_seed(7);
    player.play_list(vec![episode("a", 10), episode("b", 10), episode("c", 10)], 0);
    assert!(player.has_next());
    assert!(!player.has_previous());

    player.play_next();
    assert_eq!(player.snapshot().current_episode_index, 1);
    player.play_next();
    assert_eq!(player.snapshot().current_episode_index, 2);
    assert!(!player.has_next());
    player.play_next();
    assert_eq!(player.snapshot().current_episode_index, 2);
}

#[test]
fn every_subscriber_sees_the_same_snapshot() {
    init_logger();
    let mut player = PlayerContext::with_seed(7);
    let seen: Rc<RefCell<Vec<PlayerState>>> = Rc::new(RefCell::new(Vec::new()));

    for _ in 0..3 {
        let seen = Rc::clone(&seen);
        player.subscribe(move |state| seen.borrow_mut().push(state.clone()));
    }
    let rx = player.subscribe_channel();

    player.play_list(vec![episode("a", 10), episode("b", 10)], 1);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|state| *state == *player.snapshot()));
    assert_eq!(*rx.try_recv().unwrap(), *player.snapshot());
    assert!(rx.try_recv().is_err());
}

#[test]
fn clock_walks_the_queue_until_it_ends() {
    init_logger();
    let mut player = PlayerContext::with_seed(7);
    let mut clock = PlaybackClock::new();
    player.play_list(vec![episode("a", 3), episode("b", 3)], 0);

    let mut outcomes = Vec::new();
    for _ in 0..6 {
        outcomes.push(clock.tick(&mut player, Duration::from_secs(1)));
    }

    assert_eq!(
        outcomes,
        [
            TickOutcome::Advanced,
            TickOutcome::Advanced,
            TickOutcome::Skipped,
            TickOutcome::Advanced,
            TickOutcome::Advanced,
            TickOutcome::Finished,
        ]
    );
    assert!(player.snapshot().is_empty());
}
