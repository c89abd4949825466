use std::path::PathBuf;

use clap::Parser;
use podcaster_core::catalog::CatalogOptions;

#[derive(Debug, Parser)]
#[command(
    name = "podcaster",
    version,
    about = "Browse a podcast catalog and play episodes from a shared queue"
)]
pub struct Cli {
    /// Episode catalog, as served by the podcast API
    #[arg(short, long, default_value = "server.json")]
    pub catalog: PathBuf,

    /// Maximum number of episodes to show
    #[arg(long, default_value_t = 12)]
    pub limit: usize,

    /// How many of the newest episodes count as latest releases
    #[arg(long, default_value_t = 2)]
    pub latest: usize,

    /// Log level shown in the Log tab
    #[arg(long, default_value = "debug")]
    pub log_level: log::LevelFilter,
}

impl Cli {
    pub fn catalog_options(&self) -> CatalogOptions {
        CatalogOptions {
            limit: self.limit,
            latest: self.latest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_homepage() {
        let cli = Cli::parse_from(["podcaster"]);
        assert_eq!(cli.catalog, PathBuf::from("server.json"));
        assert_eq!(cli.catalog_options(), CatalogOptions::default());
        assert_eq!(cli.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "podcaster",
            "--catalog",
            "db.json",
            "--limit",
            "5",
            "--latest",
            "1",
            "--log-level",
            "warn",
        ]);
        assert_eq!(cli.catalog, PathBuf::from("db.json"));
        assert_eq!(cli.catalog_options(), CatalogOptions { limit: 5, latest: 1 });
        assert_eq!(cli.log_level, log::LevelFilter::Warn);
    }
}
