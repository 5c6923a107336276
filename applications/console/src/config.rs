//! Console configuration

use groove_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    /// Directory holding the playlist store
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Length reported for every staged file (the simulator does not decode)
    #[serde(default = "default_track_secs")]
    pub simulated_track_secs: f64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("groove-data")
}

fn default_track_secs() -> f64 {
    180.0
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            data_dir: default_data_dir(),
            simulated_track_secs: default_track_secs(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from an optional TOML file and the environment
    ///
    /// Environment variables use the `GROOVE_` prefix and `__` between
    /// nesting levels, e.g. `GROOVE_PLAYER__STORAGE__KEY`.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path.to_path_buf()));
        } else {
            let default_path = PathBuf::from("groove.toml");
            if default_path.exists() {
                settings = settings.add_source(config::File::from(default_path));
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("GROOVE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        settings.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_without_sources() {
        let config = ConsoleConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("groove-data"));
        assert_eq!(config.player.storage.default_playlist_name, "My Music");
        assert_eq!(config.simulated_track_secs, 180.0);
    }

    #[test]
    fn file_overrides_nested_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groove.toml");
        fs::write(
            &path,
            r#"
data_dir = "/tmp/groove"
simulated_track_secs = 42.0

[player.storage]
default_playlist_name = "Library"
"#,
        )
        .unwrap();

        let config = ConsoleConfig::load(Some(&path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/groove"));
        assert_eq!(config.simulated_track_secs, 42.0);
        assert_eq!(config.player.storage.default_playlist_name, "Library");
        // Untouched keys keep their defaults
        assert_eq!(config.player.storage.unknown_artist, "Unknown Artist");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConsoleConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
