use super::*;

const FRAME_MS: u64 = 33;

fn hold_cfg(stable_frames_required: u16) -> DebounceConfig {
    DebounceConfig {
        stable_frames_required,
        cooldown_frames: 0,
    }
}

fn kick_cfg(cooldown_frames: u16) -> DebounceConfig {
    DebounceConfig {
        stable_frames_required: 1,
        cooldown_frames,
    }
}

fn met(frame: u64, measure: f32) -> ActivationSample {
    ActivationSample {
        now_ms: frame * FRAME_MS,
        measure,
        condition_met: true,
    }
}

fn lost(frame: u64) -> ActivationSample {
    ActivationSample::inactive(frame * FRAME_MS)
}

fn collect(engine: &mut DebounceEngine, samples: &[ActivationSample]) -> std::vec::Vec<PoseEvent> {
    samples
        .iter()
        .filter_map(|sample| engine.tick(*sample).event)
        .collect()
}

#[test]
fn short_hold_never_becomes_active() {
    let mut engine = DebounceEngine::new(hold_cfg(5));
    let samples = [met(1, 2.0), met(2, 2.0), met(3, 2.0), met(4, 2.0), lost(5)];
    let events = collect(&mut engine, &samples);

    assert!(events.is_empty());
    assert_eq!(engine.state_id(), MachineStateId::Idle);
    assert_eq!(engine.stable_frames(), 0);
}

#[test]
fn hold_starts_on_the_stable_frame_and_ends_on_loss() {
    let mut engine = DebounceEngine::new(hold_cfg(3));

    let first = engine.tick(met(1, 2.0));
    assert_eq!(first.event, None);
    assert_eq!(first.trace.state_id, MachineStateId::Stabilizing);
    assert_eq!(first.trace.stable_frames, 1);

    assert_eq!(engine.tick(met(2, 2.0)).event, None);

    let third = engine.tick(met(3, 2.0));
    assert!(matches!(
        third.event,
        Some(PoseEvent::Started(span)) if span.started_ms == 3 * FRAME_MS
    ));
    assert_eq!(third.trace.state_id, MachineStateId::Active);

    assert!(matches!(
        engine.tick(met(4, 2.0)).event,
        Some(PoseEvent::Updated(_))
    ));
    assert!(matches!(
        engine.tick(met(5, 2.0)).event,
        Some(PoseEvent::Updated(_))
    ));

    let end = engine.tick(lost(6));
    let Some(PoseEvent::Ended(span)) = end.event else {
        panic!("expected end event, got {:?}", end.event);
    };
    assert_eq!(span.started_ms, 3 * FRAME_MS);
    assert_eq!(span.elapsed_ms(), 3 * FRAME_MS);
    assert_eq!(end.trace.state_id, MachineStateId::Idle);
    assert_eq!(end.trace.stable_frames, 0);
}

#[test]
fn single_frame_requirement_activates_immediately() {
    let mut engine = DebounceEngine::new(hold_cfg(1));
    assert!(matches!(
        engine.tick(met(1, 2.0)).event,
        Some(PoseEvent::Started(_))
    ));
}

#[test]
fn zero_stable_frames_is_treated_as_one() {
    let engine = DebounceEngine::new(hold_cfg(0));
    assert_eq!(engine.config().stable_frames_required, 1);
}

#[test]
fn stabilizing_loss_resets_counter() {
    let mut engine = DebounceEngine::new(hold_cfg(3));
    engine.tick(met(1, 2.0));
    engine.tick(met(2, 2.0));
    let out = engine.tick(lost(3));
    assert_eq!(out.event, None);
    assert_eq!(out.trace.state_id, MachineStateId::Idle);
    assert_eq!(out.trace.stable_frames, 0);

    // Counting restarts from scratch.
    engine.tick(met(4, 2.0));
    engine.tick(met(5, 2.0));
    assert!(matches!(
        engine.tick(met(6, 2.0)).event,
        Some(PoseEvent::Started(_))
    ));
}

#[test]
fn repeated_lost_frames_stay_idle() {
    let mut engine = DebounceEngine::new(hold_cfg(5));
    for frame in 0..50 {
        let out = engine.tick(lost(frame));
        assert_eq!(out.event, None);
        assert_eq!(out.trace.state_id, MachineStateId::Idle);
        assert_eq!(out.trace.stable_frames, 0);
    }
}

#[test]
fn peak_tracks_maximum_while_active() {
    let mut engine = DebounceEngine::new(kick_cfg(15));
    let samples = [
        met(1, 18.0),
        met(2, 31.5),
        met(3, 24.0),
        lost(4),
    ];
    let events = collect(&mut engine, &samples);

    let Some(PoseEvent::Ended(span)) = events.last().copied() else {
        panic!("expected end event, got {events:?}");
    };
    assert_eq!(span.peak_measure, 31.5);
    assert_eq!(events.len(), 4);
}

#[test]
fn cooldown_ignores_recrossing_then_returns_to_idle() {
    let mut engine = DebounceEngine::new(kick_cfg(3));
    engine.tick(met(1, 20.0));
    let end = engine.tick(lost(2));
    assert_eq!(end.trace.state_id, MachineStateId::CoolingDown);
    assert_eq!(end.trace.cooldown_remaining, 3);

    let a = engine.tick(met(3, 90.0));
    assert_eq!(a.event, None);
    assert_eq!(a.trace.cooldown_remaining, 2);
    let b = engine.tick(met(4, 90.0));
    assert_eq!(b.event, None);
    let c = engine.tick(met(5, 90.0));
    assert_eq!(c.event, None);
    assert_eq!(c.trace.state_id, MachineStateId::Idle);

    let next = engine.tick(met(6, 40.0));
    let Some(PoseEvent::Started(span)) = next.event else {
        panic!("expected a fresh start, got {:?}", next.event);
    };
    assert_eq!(span.peak_measure, 40.0);
}

#[test]
fn every_end_follows_a_start() {
    let mut engine = DebounceEngine::new(kick_cfg(2));
    let mut samples = std::vec::Vec::new();
    for frame in 0..200u64 {
        let sample = if (frame / 3) % 2 == 0 {
            met(frame, 20.0 + (frame % 7) as f32)
        } else {
            lost(frame)
        };
        samples.push(sample);
    }

    let mut open = false;
    for event in collect(&mut engine, &samples) {
        match event {
            PoseEvent::Started(_) => {
                assert!(!open, "two starts without an end");
                open = true;
            }
            PoseEvent::Updated(_) => assert!(open, "update outside an attempt"),
            PoseEvent::Ended(_) => {
                assert!(open, "end without a start");
                open = false;
            }
        }
    }
}
