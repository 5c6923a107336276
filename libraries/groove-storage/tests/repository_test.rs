//! Repository tests: restore fallbacks, corruption recovery, round trips.

use groove_core::{CoreError, KeyValueStore, Playlist, SourceKey, Track, TrackId};
use groove_storage::{
    MemoryStore, PlaylistRepository, Recovery, RepositoryConfig, PLAYLISTS_KEY,
};
use proptest::prelude::*;

// ===== Helpers =====

fn repo(store: &MemoryStore) -> PlaylistRepository<MemoryStore> {
    PlaylistRepository::new(store.clone(), RepositoryConfig::default())
}

fn track(id: &str, title: &str, artist: &str, source: Option<u64>) -> Track {
    Track {
        id: TrackId::new(id),
        title: title.to_string(),
        artist: artist.to_string(),
        source: source.map(SourceKey::new),
    }
}

/// Store whose reads always fail
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> groove_core::Result<Option<String>> {
        Err(CoreError::storage("disk on fire"))
    }

    fn set(&mut self, _key: &str, _value: &str) -> groove_core::Result<()> {
        Err(CoreError::storage("disk on fire"))
    }

    fn remove(&mut self, _key: &str) -> groove_core::Result<()> {
        Err(CoreError::storage("disk on fire"))
    }
}

// ===== Restore =====

#[test]
fn missing_key_restores_default_playlist() {
    let store = MemoryStore::new();
    let restored = repo(&store).load();

    assert_eq!(restored.recovery, Recovery::Missing);
    assert_eq!(restored.playlists.len(), 1);
    assert_eq!(restored.playlists[0].name, "My Music");
    assert!(restored.playlists[0].is_empty());
}

#[test]
fn corrupted_value_restores_default_and_clears_key() {
    let store = MemoryStore::with_entry(PLAYLISTS_KEY, "this is not json {");
    let restored = repo(&store).load();

    assert!(restored.discarded_data());
    assert_eq!(restored.playlists.len(), 1);
    assert_eq!(restored.playlists[0].name, "My Music");
    assert!(store.raw(PLAYLISTS_KEY).is_none(), "bad key must be cleared");
}

#[test]
fn non_array_value_is_corruption() {
    let store = MemoryStore::with_entry(PLAYLISTS_KEY, r#"{"name":"Mix"}"#);
    let restored = repo(&store).load();

    assert!(matches!(restored.recovery, Recovery::Corrupted(_)));
    assert_eq!(restored.playlists.len(), 1);
    assert!(store.raw(PLAYLISTS_KEY).is_none());
}

#[test]
fn empty_array_restores_default_playlist() {
    let store = MemoryStore::with_entry(PLAYLISTS_KEY, "[]");
    let restored = repo(&store).load();

    assert_eq!(restored.recovery, Recovery::Empty);
    assert_eq!(restored.playlists.len(), 1);
    // Not corruption: the value stays
    assert_eq!(store.raw(PLAYLISTS_KEY).as_deref(), Some("[]"));
}

#[test]
fn unreadable_store_restores_default_playlist() {
    let mut repo = PlaylistRepository::new(BrokenStore, RepositoryConfig::default());
    let restored = repo.load();

    assert!(matches!(restored.recovery, Recovery::Unreadable(_)));
    assert_eq!(restored.playlists.len(), 1);
}

#[test]
fn custom_key_and_names_are_honored() {
    let config = RepositoryConfig {
        key: "groove".to_string(),
        default_playlist_name: "Inbox".to_string(),
        unknown_artist: "Anonymous".to_string(),
        ..Default::default()
    };

    let mut empty = PlaylistRepository::new(MemoryStore::new(), config.clone());
    assert_eq!(empty.load().playlists[0].name, "Inbox");

    let store = MemoryStore::with_entry("groove", r#"[{"name":"A","tracks":[{"title":"x"}]}]"#);
    let mut stored = PlaylistRepository::new(store, config);
    assert_eq!(stored.load().playlists[0].tracks[0].artist, "Anonymous");
}

// ===== Save =====

#[test]
fn save_then_load_drops_sources() {
    let store = MemoryStore::new();
    let mut repo = repo(&store);

    let playlists = vec![
        Playlist::with_tracks(
            "Road Trip",
            vec![
                track("1", "Song Title", "Artist Name", Some(1)),
                track("2", "just a title", "Unknown Artist", Some(2)),
            ],
        ),
        Playlist::new("Empty"),
    ];
    repo.save(&playlists).unwrap();

    let restored = repo.load();
    assert_eq!(restored.recovery, Recovery::None);
    assert_eq!(restored.playlists.len(), 2);
    assert_eq!(restored.playlists[0].tracks[0].title, "Song Title");
    assert_eq!(restored.playlists[0].tracks[1].id.as_str(), "2");
    assert!(restored.playlists.iter().flat_map(|p| &p.tracks).all(|t| t.source.is_none()));
    assert!(restored.playlists[1].is_empty());
}

#[test]
fn save_failure_is_reported() {
    let store = MemoryStore::new();
    store.set_fail_writes(true);
    let mut repo = repo(&store);

    let err = repo.save(&[Playlist::new("x")]).unwrap_err();
    assert!(err.to_string().contains("rejected"));
}

#[test]
fn clear_removes_collection() {
    let store = MemoryStore::new();
    let mut repo = repo(&store);
    repo.save(&[Playlist::new("x")]).unwrap();
    repo.clear().unwrap();
    assert_eq!(repo.load().recovery, Recovery::Missing);
}

// ===== Properties =====

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        "[a-z0-9-]{1,12}",
        "[A-Za-z0-9 ]{1,24}",
        "[A-Za-z ]{1,16}",
        proptest::option::of(0u64..1000),
    )
        .prop_map(|(id, title, artist, source)| Track {
            id: TrackId::new(id),
            title,
            artist,
            source: source.map(SourceKey::new),
        })
}

fn arbitrary_playlist() -> impl Strategy<Value = Playlist> {
    (
        "[A-Za-z0-9 ]{1,20}",
        prop::collection::vec(arbitrary_track(), 0..8),
    )
        .prop_map(|(name, tracks)| Playlist::with_tracks(name, tracks))
}

proptest! {
    /// Property: metadata survives a save/load cycle and every source comes back empty
    #[test]
    fn round_trip_preserves_metadata(playlists in prop::collection::vec(arbitrary_playlist(), 1..5)) {
        let store = MemoryStore::new();
        let mut repo = repo(&store);
        repo.save(&playlists).unwrap();

        let restored = repo.load();
        prop_assert_eq!(restored.recovery, Recovery::None);
        prop_assert_eq!(restored.playlists.len(), playlists.len());

        for (saved, loaded) in playlists.iter().zip(&restored.playlists) {
            prop_assert_eq!(&saved.name, &loaded.name);
            prop_assert_eq!(saved.tracks.len(), loaded.tracks.len());
            for (a, b) in saved.tracks.iter().zip(&loaded.tracks) {
                prop_assert_eq!(&a.id, &b.id);
                prop_assert_eq!(&a.title, &b.title);
                prop_assert_eq!(&a.artist, &b.artist);
                prop_assert!(b.source.is_none());
            }
        }
    }
}
