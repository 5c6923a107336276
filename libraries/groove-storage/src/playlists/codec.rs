//! JSON shape of the persisted playlist collection
//!
//! ```json
//! [{ "name": "My Music", "tracks": [{ "title": "...", "artist": "...", "id": "..." }] }]
//! ```
//!
//! Encoding is strict. Decoding is tolerant: anything short of "not JSON" or
//! "not an array" restores as much as it can and fills in defaults.

use super::RepositoryConfig;
use groove_core::{Playlist, Track, TrackId};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

#[derive(Serialize)]
struct StoredPlaylist<'a> {
    name: &'a str,
    tracks: Vec<StoredTrack<'a>>,
}

#[derive(Serialize)]
struct StoredTrack<'a> {
    title: &'a str,
    artist: &'a str,
    id: &'a str,
}

/// Why a stored value could not be restored
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The value is not JSON at all
    #[error("stored value is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The value is JSON but the top level is not an array
    #[error("stored value is a JSON {0}, expected an array")]
    NotAnArray(&'static str),
}

/// Serialize playlists, dropping session-local source handles
pub fn encode(playlists: &[Playlist]) -> serde_json::Result<String> {
    let stored: Vec<StoredPlaylist<'_>> = playlists
        .iter()
        .map(|p| StoredPlaylist {
            name: &p.name,
            tracks: p
                .tracks
                .iter()
                .map(|t| StoredTrack {
                    title: &t.title,
                    artist: &t.artist,
                    id: t.id.as_str(),
                })
                .collect(),
        })
        .collect();

    serde_json::to_string(&stored)
}

/// Restore playlists from a stored value
///
/// Every restored track has `source = None`.
pub fn decode(raw: &str, config: &RepositoryConfig) -> Result<Vec<Playlist>, DecodeError> {
    let value: Value = serde_json::from_str(raw)?;

    let entries = match value {
        Value::Array(entries) => entries,
        other => return Err(DecodeError::NotAnArray(kind_of(&other))),
    };

    let mut playlists = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match entry {
            Value::Object(fields) => playlists.push(decode_playlist(fields, config)),
            other => warn!(index, kind = kind_of(other), "Skipping non-object playlist entry"),
        }
    }

    Ok(playlists)
}

fn decode_playlist(fields: &Map<String, Value>, config: &RepositoryConfig) -> Playlist {
    let name = non_empty_str(fields.get("name")).unwrap_or(&config.untitled_playlist_name);

    // Older snapshots called the list "songs"
    let entries = fields
        .get("tracks")
        .or_else(|| fields.get("songs"))
        .and_then(Value::as_array);

    let tracks = entries
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| match entry {
                    Value::Object(track) => Some(decode_track(track, config)),
                    other => {
                        warn!(playlist = name, kind = kind_of(other), "Skipping non-object track entry");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    Playlist::with_tracks(name, tracks)
}

fn decode_track(fields: &Map<String, Value>, config: &RepositoryConfig) -> Track {
    let title = non_empty_str(fields.get("title")).unwrap_or(&config.unknown_title);
    let artist = non_empty_str(fields.get("artist")).unwrap_or(&config.unknown_artist);

    let id = match fields.get("id") {
        Some(Value::String(id)) if !id.is_empty() => TrackId::new(id.as_str()),
        Some(Value::Number(n)) => TrackId::new(n.to_string()),
        _ => TrackId::generate(),
    };

    Track::restored(id, title, artist)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groove_core::SourceKey;

    fn config() -> RepositoryConfig {
        RepositoryConfig::default()
    }

    #[test]
    fn encode_strips_sources() {
        let mut track = Track::new("Song", "Artist", Some(SourceKey::new(9)));
        track.id = TrackId::new("t1");
        let json = encode(&[Playlist::with_tracks("Mix", vec![track])]).unwrap();

        assert_eq!(
            json,
            r#"[{"name":"Mix","tracks":[{"title":"Song","artist":"Artist","id":"t1"}]}]"#
        );
    }

    #[test]
    fn decode_rejects_non_json() {
        let err = decode("definitely not json", &config()).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn decode_rejects_non_array() {
        let err = decode(r#"{"name":"x"}"#, &config()).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnArray("object")));
        assert_eq!(
            err.to_string(),
            "stored value is a JSON object, expected an array"
        );
    }

    #[test]
    fn decode_fills_missing_fields() {
        let raw = r#"[{"tracks":[{"id":"a"},{"title":"","artist":"Someone"}]}]"#;
        let playlists = decode(raw, &config()).unwrap();

        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].name, "Untitled Playlist");

        let first = &playlists[0].tracks[0];
        assert_eq!(first.id.as_str(), "a");
        assert_eq!(first.title, "Unknown Title");
        assert_eq!(first.artist, "Unknown Artist");

        let second = &playlists[0].tracks[1];
        assert_eq!(second.title, "Unknown Title");
        assert_eq!(second.artist, "Someone");
        assert!(!second.id.as_str().is_empty());
    }

    #[test]
    fn decode_accepts_legacy_songs_field() {
        let raw = r#"[{"name":"Old","songs":[{"title":"T","artist":"A","id":"1"}]}]"#;
        let playlists = decode(raw, &config()).unwrap();
        assert_eq!(playlists[0].tracks.len(), 1);
        assert_eq!(playlists[0].tracks[0].title, "T");
    }

    #[test]
    fn decode_treats_non_array_tracks_as_empty() {
        let raw = r#"[{"name":"Odd","tracks":"nope"}]"#;
        let playlists = decode(raw, &config()).unwrap();
        assert!(playlists[0].tracks.is_empty());
    }

    #[test]
    fn decode_skips_non_object_entries() {
        let raw = r#"[null, {"name":"Kept"}, 3]"#;
        let playlists = decode(raw, &config()).unwrap();
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].name, "Kept");
    }
}
