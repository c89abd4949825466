use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::episode::{Episode, duration_to_time_string};
use crate::error::CatalogError;

/// Audio file attached to an episode
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpisodeFile {
    pub url: String,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    #[serde(deserialize_with = "seconds")]
    pub duration: u64,
}

/// An episode as served by the podcast API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogEpisode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub members: String,
    /// ISO-8601 timestamp
    pub published_at: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    pub file: EpisodeFile,
}

impl CatalogEpisode {
    /// The fields the player cares about
    pub fn to_episode(&self) -> Episode {
        Episode {
            title: self.title.clone(),
            members: self.members.clone(),
            thumbnail: self.thumbnail.clone(),
            duration: self.file.duration,
            url: self.file.url.clone(),
        }
    }

    /// Calendar date part of `published_at`
    pub fn published_date(&self) -> &str {
        self.published_at.get(..10).unwrap_or(&self.published_at)
    }

    pub fn duration_string(&self) -> String {
        duration_to_time_string(self.file.duration)
    }
}

// The API serves durations as numbers, but older dumps quote them
fn seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(secs) => Ok(secs),
        Raw::Float(secs) => Ok(secs.max(0.0) as u64),
        Raw::Text(text) => text
            .trim()
            .parse::<f64>()
            .map(|secs| secs.max(0.0) as u64)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Wrapped { episodes: Vec<CatalogEpisode> },
    Bare(Vec<CatalogEpisode>),
}

/// How many episodes to keep and how many count as "latest"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOptions {
    pub limit: usize,
    pub latest: usize,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            limit: 12,
            latest: 2,
        }
    }
}

/// Episodes for the homepage, newest first
#[derive(Debug, Clone)]
pub struct Catalog {
    pub latest: Vec<CatalogEpisode>,
    pub all: Vec<CatalogEpisode>,
    queue: Arc<Vec<Episode>>,
}

impl Catalog {
    pub fn load(path: &Path, options: CatalogOptions) -> Result<Catalog, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&raw, options)?;
        log::info!(
            "Loaded {} episodes from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json(raw: &str, options: CatalogOptions) -> Result<Catalog, CatalogError> {
        let mut episodes = match serde_json::from_str::<Document>(raw)? {
            Document::Wrapped { episodes } => episodes,
            Document::Bare(episodes) => episodes,
        };

        episodes.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        episodes.truncate(options.limit);

        let split = options.latest.min(episodes.len());
        let all = episodes.split_off(split);
        let latest = episodes;

        let queue = latest.iter().chain(all.iter()).map(CatalogEpisode::to_episode).collect();

        Ok(Catalog {
            latest,
            all,
            queue: Arc::new(queue),
        })
    }

    /// Latest followed by all, the order the homepage plays in
    pub fn queue(&self) -> Arc<Vec<Episode>> {
        Arc::clone(&self.queue)
    }

    /// Position in [`Catalog::queue`] of the `index`th entry of `all`
    pub fn queue_index_of_all(&self, index: usize) -> usize {
        index + self.latest.len()
    }

    /// Entry at a queue position
    pub fn get(&self, index: usize) -> Option<&CatalogEpisode> {
        self.latest.iter().chain(self.all.iter()).nth(index)
    }

    pub fn find(&self, id: &str) -> Result<&CatalogEpisode, CatalogError> {
        self.latest
            .iter()
            .chain(self.all.iter())
            .find(|episode| episode.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.latest.len() + self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
