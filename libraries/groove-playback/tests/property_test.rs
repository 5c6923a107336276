//! Property-based tests for the coordinator
//!
//! Uses proptest to verify invariants across many random operation sequences.
//! No shallow tests - every property test verifies meaningful invariants.


use groove_playback::{AudioEvent, Coordinator, PlayerConfig};
use proptest::prelude::*;
use test_helpers::audio_files;

// ===== Helpers =====

#[derive(Debug, Clone)]
enum Op {
    Create(String),
    Select(usize),
    Delete(usize),
    Add(usize),
    Remove(usize),
    Play(usize),
    Toggle,
    Next,
    Previous,
    Seek(f64),
    Native(AudioEvent),
    Settle(bool),
}

fn arbitrary_event() -> impl Strategy<Value = AudioEvent> {
    prop_oneof![
        (0.0f64..600.0).prop_map(|position| AudioEvent::TimeUpdated { position }),
        (0.0f64..600.0).prop_map(|duration| AudioEvent::MetadataLoaded { duration }),
        proptest::option::of(0.0f64..600.0).prop_map(|duration| AudioEvent::ReadyToPlay { duration }),
        Just(AudioEvent::Started),
        Just(AudioEvent::Paused),
        Just(AudioEvent::Ended),
        Just(AudioEvent::Errored {
            message: "decode".to_string()
        }),
    ]
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[A-Za-z ]{0,12}".prop_map(Op::Create),
        (0usize..6).prop_map(Op::Select),
        (0usize..6).prop_map(Op::Delete),
        (0usize..4).prop_map(Op::Add),
        (0usize..10).prop_map(Op::Remove),
        (0usize..10).prop_map(Op::Play),
        Just(Op::Toggle),
        Just(Op::Next),
        Just(Op::Previous),
        (-10.0f64..700.0).prop_map(Op::Seek),
        arbitrary_event().prop_map(Op::Native),
        any::<bool>().prop_map(Op::Settle),
    ]
}

fn apply(c: &mut Coordinator, op: Op, batch: &mut usize, last_ticket: &mut Option<groove_core::PlayTicket>) {
    let tx = match op {
        Op::Create(name) => c.create_playlist(&name).unwrap_or_default(),
        Op::Select(i) => c.select_playlist(i).unwrap_or_default(),
        Op::Delete(i) => c.delete_playlist(i).unwrap_or_default(),
        Op::Add(n) => {
            *batch += 1;
            c.add_files(audio_files(&batch.to_string(), n))
                .unwrap_or_default()
        }
        Op::Remove(i) => c.remove_track(i).unwrap_or_default(),
        Op::Play(i) => c.play_track(i).unwrap_or_default(),
        Op::Toggle => c.toggle_play_pause().unwrap_or_default(),
        Op::Next => c.next_track().unwrap_or_default(),
        Op::Previous => c.previous_track().unwrap_or_default(),
        Op::Seek(t) => c.seek(t).unwrap_or_default(),
        Op::Native(event) => c.handle_event(event),
        Op::Settle(ok) => match last_ticket.take() {
            Some(ticket) => c.play_settled(ticket, if ok { Ok(()) } else { Err("rejected".into()) }),
            None => Default::default(),
        },
    };

    for command in tx.commands {
        if let groove_playback::AudioCommand::Play { ticket } = command {
            *last_ticket = Some(ticket);
        }
    }
}

fn coordinator() -> Coordinator {
    Coordinator::new(PlayerConfig::default(), Vec::new())
}

// ===== Property Tests =====

proptest! {
    /// Track count follows additions minus removals; the active index stays valid
    #[test]
    fn prop_add_remove_keeps_count_and_index(
        ops in prop::collection::vec((any::<bool>(), 0usize..5, 0usize..8), 1..40)
    ) {
        let mut c = coordinator();
        let mut expected = 0usize;

        for (step, (is_add, count, index)) in ops.into_iter().enumerate() {
            if is_add {
                c.add_files(audio_files(&step.to_string(), count)).unwrap();
                expected += count;
            } else {
                c.remove_track(index).unwrap();
                if index < expected {
                    expected -= 1;
                }
            }

            let len = c.active_playlist().unwrap().len();
            prop_assert_eq!(len, expected);
            prop_assert!(len == 0 || c.active_track_index() < len);
            // Every live track owns exactly one registered handle
            prop_assert_eq!(c.sources().len(), len);
        }
    }

    /// next then previous (and previous then next) return to the start
    #[test]
    fn prop_next_previous_are_inverse(n in 1usize..20, start in 0usize..20) {
        let start = start % n;
        let mut c = coordinator();
        c.add_files(audio_files("a", n)).unwrap();
        c.play_track(start).unwrap();
        prop_assert_eq!(c.active_track_index(), start);

        c.next_track().unwrap();
        prop_assert_eq!(c.active_track_index(), (start + 1) % n);
        c.previous_track().unwrap();
        prop_assert_eq!(c.active_track_index(), start);

        c.previous_track().unwrap();
        c.next_track().unwrap();
        prop_assert_eq!(c.active_track_index(), start);
    }

    /// Arbitrary interleavings of user operations and native events never
    /// leave the coordinator in an invalid state
    #[test]
    fn prop_random_sequences_keep_state_valid(ops in prop::collection::vec(arbitrary_op(), 1..80)) {
        let mut c = coordinator();
        let mut batch = 0usize;
        let mut last_ticket = None;

        for op in ops {
            apply(&mut c, op, &mut batch, &mut last_ticket);

            let state = c.state();
            prop_assert!(!c.playlists().is_empty());
            prop_assert!(state.active_playlist < c.playlists().len());

            let len = c.active_playlist().unwrap().len();
            prop_assert!(len == 0 || state.active_track < len);

            // Nothing playable means nothing may claim to be playing
            if !c.active_track().is_some_and(|t| t.is_playable()) {
                prop_assert!(!state.play_intent);
            }

            prop_assert!(state.position.is_finite() && state.position >= 0.0);
            prop_assert!(state.duration.is_finite() && state.duration >= 0.0);

            let live: usize = c.playlists().iter().map(|p| p.len()).sum();
            prop_assert_eq!(c.sources().len(), live);
        }
    }

    /// Deleting a non-active playlist never changes the active track
    #[test]
    fn prop_deleting_other_playlist_keeps_active_track(
        extra in 1usize..5,
        active in 0usize..5,
        victim in 0usize..5,
        tracks in 1usize..5,
    ) {
        let mut c = coordinator();
        for i in 0..extra {
            c.create_playlist(&format!("List {}", i)).unwrap();
        }
        let total = extra + 1;
        let active = active % total;
        let victim = victim % total;
        prop_assume!(victim != active);

        c.select_playlist(active).unwrap();
        c.add_files(audio_files("a", tracks)).unwrap();
        c.play_track(tracks - 1).unwrap();
        let before = c.active_track().map(|t| t.id.clone());
        let playing = c.is_playing();

        c.delete_playlist(victim).unwrap();

        prop_assert_eq!(c.active_track().map(|t| t.id.clone()), before);
        prop_assert_eq!(c.is_playing(), playing);
        prop_assert_eq!(c.active_playlist().unwrap().len(), tracks);
    }
}
