//! Per-frame orchestration of one exercise session.
//!
//! `update` is the only mutating entry point: calibrate, evaluate, debounce,
//! record, then copy the result into a `RenderSnapshot`.

use super::{
    config::{
        handstand_config, high_kick_config, DebounceConfig, HandstandConfig, HighKickConfig,
        HistoryConfig,
    },
    debounce_hsm::DebounceEngine,
    evaluator::{EvaluationPolicy, GroundContactPolicy, HeightPercentagePolicy},
    history::{AttemptHistory, ATTEMPT_CAPACITY},
    landmarks::LandmarkFrame,
    snapshot::{HistoryRow, RenderSnapshot, StatusLabel},
    trace::DebounceTraceSample,
    types::{AttemptSpan, CalibrationStatus, PoseEvent, SessionMode},
};

pub type HandstandSession = PoseSession<GroundContactPolicy>;
pub type HighKickSession = PoseSession<HeightPercentagePolicy>;

pub struct PoseSession<P: EvaluationPolicy> {
    policy: P,
    engine: DebounceEngine,
    history: AttemptHistory,
}

struct FrameOutcome {
    status: StatusLabel,
    calibration: CalibrationStatus,
    live_value: Option<f32>,
    event: Option<PoseEvent>,
    trace: Option<DebounceTraceSample>,
    capacity_reached_now: bool,
}

impl<P: EvaluationPolicy> PoseSession<P> {
    pub fn new(policy: P, debounce: DebounceConfig, history: HistoryConfig) -> Self {
        log::debug!(
            "session: {:?} mode, stable={} cooldown={} max_attempts={} retention={:?}",
            policy.mode(),
            debounce.stable_frames_required,
            debounce.cooldown_frames,
            history.max_attempts,
            history.retention
        );
        Self {
            policy,
            engine: DebounceEngine::new(debounce),
            history: AttemptHistory::new(history),
        }
    }

    pub fn update(&mut self, frame: &LandmarkFrame, now_ms: u64) -> RenderSnapshot {
        let calibration = self.policy.calibrate(frame);
        if !calibration.is_armed() {
            return self.snapshot(
                now_ms,
                FrameOutcome {
                    status: StatusLabel::Calibrating,
                    calibration,
                    live_value: None,
                    event: None,
                    trace: None,
                    capacity_reached_now: false,
                },
            );
        }

        let sample = self.policy.evaluate(frame, now_ms);
        let output = self.engine.tick(sample);
        let capacity_before = self.history.capacity_reached();

        let live_value = match output.event {
            Some(PoseEvent::Started(span)) | Some(PoseEvent::Updated(span)) => {
                Some(self.policy.attempt_value(&span))
            }
            Some(PoseEvent::Ended(span)) => {
                self.close_attempt(&span);
                None
            }
            None => None,
        };

        let capacity_reached_now = !capacity_before && self.history.capacity_reached();
        self.snapshot(
            now_ms,
            FrameOutcome {
                status: StatusLabel::from_state(output.trace.state_id),
                calibration,
                live_value,
                event: output.event,
                trace: Some(output.trace),
                capacity_reached_now,
            },
        )
    }

    fn close_attempt(&mut self, span: &AttemptSpan) {
        let value = self.policy.attempt_value(span);
        if !self.policy.on_attempt_end(value) {
            log::debug!("session: attempt {value:.2} not recordable");
            return;
        }
        if let Some(index) = self.history.record(value) {
            log::info!(
                "session: attempt #{index} recorded, {value:.2}{}",
                self.policy.mode().unit()
            );
        }
    }

    fn snapshot(&self, now_ms: u64, outcome: FrameOutcome) -> RenderSnapshot {
        let best = self.history.best();
        let mut history = heapless::Vec::<HistoryRow, ATTEMPT_CAPACITY>::new();
        for (position, record) in self.history.entries().iter().enumerate() {
            let row = HistoryRow {
                record: *record,
                rank: (position + 1) as u8,
                is_best: best.is_some_and(|b| b.sequence_index == record.sequence_index),
            };
            if history.push(row).is_err() {
                break;
            }
        }

        RenderSnapshot {
            mode: self.policy.mode(),
            now_ms,
            status: outcome.status,
            live_value: outcome.live_value,
            last_value: self.history.last_value(),
            best_value: best.map(|b| b.value),
            history,
            attempts_left: self.history.attempts_left(),
            capacity_reached: self.history.capacity_reached(),
            capacity_reached_now: outcome.capacity_reached_now,
            calibration: outcome.calibration,
            baseline: self.policy.calibration_baseline(),
            event: outcome.event,
            trace: outcome.trace,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.policy.mode()
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn history(&self) -> &AttemptHistory {
        &self.history
    }

    pub fn capacity_reached(&self) -> bool {
        self.history.capacity_reached()
    }

    /// Prompt text for the host once capacity is reached.
    pub fn capacity_headline(&self) -> heapless::String<48> {
        self.policy
            .mode()
            .capacity_headline(self.history.max_attempts())
    }
}

impl PoseSession<GroundContactPolicy> {
    pub fn handstand(config: &HandstandConfig) -> Self {
        Self::new(
            GroundContactPolicy::new(config.ground_contact),
            config.debounce,
            config.history,
        )
    }
}

impl Default for PoseSession<GroundContactPolicy> {
    fn default() -> Self {
        Self::handstand(handstand_config())
    }
}

impl PoseSession<HeightPercentagePolicy> {
    pub fn high_kick(config: &HighKickConfig) -> Self {
        Self::new(
            HeightPercentagePolicy::new(config.height_percentage),
            config.debounce,
            config.history,
        )
    }
}

impl Default for PoseSession<HeightPercentagePolicy> {
    fn default() -> Self {
        Self::high_kick(high_kick_config())
    }
}
