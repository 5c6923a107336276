//! End-to-end console sessions over real files and an on-disk store.

use groove_console::{Command, ConsoleConfig, Outcome, Session};
use groove_core::ConfirmPrompt;
use groove_storage::FileStore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn config(dir: &Path) -> ConsoleConfig {
    ConsoleConfig {
        data_dir: dir.join("data"),
        simulated_track_secs: 30.0,
        ..ConsoleConfig::default()
    }
}

fn open(config: &ConsoleConfig) -> Session<FileStore> {
    Session::new(config, FileStore::new(&config.data_dir))
}

fn write_track(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"ID3").unwrap();
    path
}

fn run(session: &mut Session<FileStore>, command: Command) -> String {
    let mut yes = |_: &ConfirmPrompt| true;
    match session.execute(command, &mut yes).unwrap() {
        Outcome::Continue(output) => output,
        Outcome::Quit => panic!("session quit unexpectedly"),
    }
}

#[test]
fn play_through_a_playlist_and_restore_it() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    let first = write_track(dir.path(), "Nina Simone - Feeling Good.mp3");
    let second = write_track(dir.path(), "Miles Davis - So What.mp3");

    let mut session = open(&config);
    run(&mut session, Command::Add(vec![first, second.clone()]));

    let state = session.player().state();
    assert_eq!(state.active_track, 0);
    assert!(!state.play_intent);
    assert_eq!(state.duration, 30.0);

    let output = run(&mut session, Command::Toggle);
    assert!(output.contains("[playing] Nina Simone - Feeling Good"), "{}", output);
    assert!(session.player().backend().is_playing());

    run(&mut session, Command::Tick(12.0));
    assert_eq!(session.player().state().position, 12.0);

    // Finishing a track moves on and keeps playing
    run(&mut session, Command::End);
    let state = session.player().state();
    assert_eq!(state.active_track, 1);
    assert!(state.play_intent);
    assert!(session.player().backend().is_playing());
    let canonical = fs::canonicalize(&second).unwrap();
    assert_eq!(
        session.player().backend().source(),
        Some(canonical.to_string_lossy().as_ref())
    );

    drop(session);

    // Sources do not survive a restart; metadata does
    let restored = open(&config);
    let playlist = &restored.player().playlists()[0];
    assert_eq!(playlist.len(), 2);
    assert_eq!(playlist.tracks[1].title, "So What");
    assert_eq!(playlist.tracks[1].artist, "Miles Davis");
    assert!(playlist.tracks.iter().all(|t| !t.is_playable()));
    assert!(!restored.player().state().play_intent);
}

#[test]
fn missing_file_reports_playback_failure() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    let mut session = open(&config);

    run(
        &mut session,
        Command::Add(vec![dir.path().join("Ghost - Gone.mp3")]),
    );
    let output = run(&mut session, Command::Toggle);

    assert!(output.contains("! Playback failed"), "{}", output);
    assert!(!session.player().state().play_intent);
    assert!(!session.player().backend().is_playing());
}

#[test]
fn non_audio_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, "not music").unwrap();

    let mut session = open(&config);
    run(&mut session, Command::Add(vec![notes]));

    assert!(session.player().playlists()[0].is_empty());
}

#[test]
fn list_and_delete_with_confirmation() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    let mut session = open(&config);

    run(&mut session, Command::Create("Road Trip".to_string()));
    let listing = run(&mut session, Command::List);
    assert!(listing.contains("* 2. Road Trip (0 tracks)"), "{}", listing);

    let mut no = |_: &ConfirmPrompt| false;
    assert!(session.execute(Command::Delete(1), &mut no).is_err());
    assert_eq!(session.player().playlists().len(), 2);

    run(&mut session, Command::Delete(1));
    assert_eq!(session.player().playlists().len(), 1);

    let mut yes = |_: &ConfirmPrompt| true;
    assert_eq!(session.execute(Command::Quit, &mut yes).unwrap(), Outcome::Quit);
}
