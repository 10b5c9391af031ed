use super::*;
use crate::audio::VoiceEvent;
use crate::audio::fake::{Call, FakeVoice};
use crate::catalog::{RawTrack, TitleLookup, build};

fn engine() -> Engine<FakeVoice> {
    let raw = vec![
        RawTrack::new("1", "a.mp3"),
        RawTrack::new("2", "a.mp3"),
        RawTrack::new("3", "b.mp3"),
        RawTrack {
            id: Some("silent".into()),
            ..RawTrack::default()
        },
    ];
    Engine::new(FakeVoice::default(), build(&raw, &TitleLookup::new()))
}

fn started(token: u64, source: &str) -> VoiceEvent {
    VoiceEvent::Started {
        token,
        source: source.to_string(),
    }
}

/// Request `id` and acknowledge it.
fn play(e: &mut Engine<FakeVoice>, id: &str) -> u64 {
    let PlayRequest::Requested(token) = e.play_by_id(id) else {
        panic!("expected a start request for {id}");
    };
    let source = e.catalog().get(id).unwrap().source.clone();
    assert!(e.handle_event(started(token, &source)));
    token
}

#[test]
fn starts_idle_at_default_volume() {
    let e = engine();
    assert_eq!(e.state(), EngineState::Idle);
    assert_eq!(
        e.player_state(),
        PlayerState {
            current_track_id: None,
            is_playing: false,
            volume: DEFAULT_VOLUME,
            state: EngineState::Idle,
        }
    );
}

#[test]
fn play_by_id_loads_then_commits_on_acknowledgment() {
    let mut e = engine();
    e.set_volume(0.8);

    let req = e.play_by_id("3");
    let PlayRequest::Requested(token) = req else {
        panic!("unexpected {req:?}");
    };
    assert_eq!(e.state(), EngineState::Loading);
    assert_eq!(e.current_track_id(), None);
    assert!(!e.player_state().is_playing);
    assert_eq!(e.now_playing().map(|t| t.id.as_str()), Some("3"));

    let calls = &e.voice().calls;
    assert!(calls.contains(&Call::Load("b.mp3".into())));
    assert_eq!(calls.last(), Some(&Call::Start(token)));
    assert_eq!(e.voice().volume, Some(0.8));

    assert!(e.handle_event(started(token, "b.mp3")));
    assert_eq!(e.state(), EngineState::Playing);
    assert_eq!(e.current_track_id(), Some("3"));
    assert!(e.player_state().is_playing);
}

#[test]
fn unknown_id_falls_back_to_idle() {
    let mut e = engine();
    assert_eq!(e.play_by_id("nope"), PlayRequest::Unavailable);
    assert!(e.is_idle());
    assert_eq!(e.current_track_id(), None);

    play(&mut e, "1");
    assert_eq!(e.play_by_id("nope"), PlayRequest::Unavailable);
    assert_eq!(e.state(), EngineState::Stopped);
    assert_eq!(e.current_track_id(), None);
    assert!(!e.player_state().is_playing);
}

#[test]
fn deduplicated_id_is_unknown() {
    let mut e = engine();
    assert_eq!(e.play_by_id("2"), PlayRequest::Unavailable);
}

#[test]
fn empty_source_falls_back_to_idle() {
    let mut e = engine();
    assert_eq!(e.play_by_id("silent"), PlayRequest::Unavailable);
    assert!(e.is_idle());
    assert!(e.voice().starts().is_empty());
}

#[test]
fn replaying_the_playing_track_is_a_no_op() {
    let mut e = engine();
    play(&mut e, "1");
    let before = e.player_state();
    let calls_before = e.voice().calls.len();

    assert_eq!(e.play_by_id("1"), PlayRequest::AlreadyPlaying);
    assert_eq!(e.play_by_id("1"), PlayRequest::AlreadyPlaying);

    assert_eq!(e.player_state(), before);
    assert_eq!(e.voice().calls.len(), calls_before);
}

#[test]
fn switching_tracks_pauses_before_loading() {
    let mut e = engine();
    play(&mut e, "1");
    e.voice_mut().calls.clear();

    let PlayRequest::Requested(token) = e.play_by_id("3") else {
        panic!("expected a start request");
    };
    assert_eq!(
        e.voice().calls,
        vec![
            Call::Pause,
            Call::Load("b.mp3".into()),
            Call::Volume(DEFAULT_VOLUME),
            Call::Start(token),
        ]
    );

    // The pause of the old source must not knock the new request over.
    assert!(!e.handle_event(VoiceEvent::Paused {
        source: "a.mp3".into()
    }));
    assert_eq!(e.state(), EngineState::Loading);
}

#[test]
fn stop_is_idempotent() {
    let mut e = engine();
    play(&mut e, "3");

    for _ in 0..3 {
        e.stop();
        assert!(e.is_idle());
        assert_eq!(e.current_track_id(), None);
        assert!(!e.player_state().is_playing);
    }
    assert!(e.voice().calls.ends_with(&[Call::Pause, Call::Rewind]));
}

#[test]
fn stop_on_fresh_engine_stays_idle() {
    let mut e = engine();
    e.stop();
    assert_eq!(e.state(), EngineState::Idle);
}

#[test]
fn set_volume_clamps_and_ignores_nan() {
    let mut e = engine();
    e.set_volume(1.7);
    assert_eq!(e.volume(), 1.0);
    e.set_volume(-0.3);
    assert_eq!(e.volume(), 0.0);
    e.set_volume(0.4);
    assert_eq!(e.volume(), 0.4);
    e.set_volume(f32::NAN);
    assert_eq!(e.volume(), 0.4);
    e.set_volume(f32::INFINITY);
    assert_eq!(e.volume(), 1.0);
}

#[test]
fn rejection_reverts_to_idle() {
    let mut e = engine();
    let PlayRequest::Requested(token) = e.play_by_id("1") else {
        panic!("expected a start request");
    };
    assert!(e.handle_event(VoiceEvent::Rejected {
        token,
        reason: "autoplay blocked".into(),
    }));
    assert_eq!(e.state(), EngineState::Idle);
    assert_eq!(e.current_track_id(), None);
    assert!(e.now_playing().is_none());
}

#[test]
fn stale_acknowledgment_cannot_overwrite_newer_request() {
    let mut e = engine();
    let PlayRequest::Requested(first) = e.play_by_id("1") else {
        panic!("expected a start request");
    };
    let PlayRequest::Requested(second) = e.play_by_id("3") else {
        panic!("expected a start request");
    };
    assert!(second > first);

    assert!(!e.handle_event(started(first, "a.mp3")));
    assert_eq!(e.state(), EngineState::Loading);
    assert_eq!(e.current_track_id(), None);

    assert!(!e.handle_event(VoiceEvent::Rejected {
        token: first,
        reason: "late".into(),
    }));
    assert_eq!(e.state(), EngineState::Loading);

    assert!(e.handle_event(started(second, "b.mp3")));
    assert_eq!(e.current_track_id(), Some("3"));
}

#[test]
fn acknowledgment_after_stop_is_ignored() {
    let mut e = engine();
    let PlayRequest::Requested(token) = e.play_by_id("1") else {
        panic!("expected a start request");
    };
    e.stop();
    assert!(!e.handle_event(started(token, "a.mp3")));
    assert!(e.is_idle());
    assert_eq!(e.current_track_id(), None);
}

#[test]
fn external_pause_and_end_clear_playing() {
    let mut e = engine();
    play(&mut e, "1");
    assert!(e.handle_event(VoiceEvent::Paused {
        source: "a.mp3".into()
    }));
    assert_eq!(e.state(), EngineState::Idle);
    assert_eq!(e.current_track_id(), None);

    play(&mut e, "3");
    // End of a source that is no longer loaded changes nothing.
    assert!(!e.handle_event(VoiceEvent::Ended {
        source: "a.mp3".into()
    }));
    assert!(e.handle_event(VoiceEvent::Ended {
        source: "b.mp3".into()
    }));
    assert!(!e.player_state().is_playing);

    // After an end the same id starts again rather than being a no-op.
    assert!(matches!(e.play_by_id("3"), PlayRequest::Requested(_)));
}

#[test]
fn undispatchable_start_is_treated_as_failure() {
    let mut e = engine();
    e.voice_mut().refuse_start = true;
    assert_eq!(e.play_by_id("1"), PlayRequest::Failed);
    assert_eq!(e.state(), EngineState::Idle);
    assert_eq!(e.current_track_id(), None);
}
