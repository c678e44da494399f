//! Per-mode condition evaluators.
//!
//! A policy turns one `LandmarkFrame` into an `ActivationSample` and decides
//! how a finished attempt is valued. Missing landmarks never fail: they read
//! as "condition not met" for that frame.

use super::{
    calibration::{Baseline, BaselineTracker},
    config::{GroundContactConfig, HeightPercentageConfig},
    landmarks::{
        HandLandmarks, LandmarkFrame, PoseLandmarks, INDEX_FINGER_TIP, LEFT_ANKLE,
        LEFT_FOOT_INDEX, MIDDLE_FINGER_TIP, RIGHT_ANKLE, RIGHT_FOOT_INDEX, WRIST,
    },
    types::{ActivationSample, AttemptSpan, CalibrationStatus, SessionMode},
};

pub trait EvaluationPolicy {
    fn mode(&self) -> SessionMode;

    /// Consumes the frame while warming up. Policies without a warm-up are
    /// always armed.
    fn calibrate(&mut self, frame: &LandmarkFrame) -> CalibrationStatus {
        let _ = frame;
        CalibrationStatus::Armed
    }

    /// Reference the policy measures against, if it keeps one.
    fn calibration_baseline(&self) -> Option<Baseline> {
        None
    }

    fn evaluate(&self, frame: &LandmarkFrame, now_ms: u64) -> ActivationSample;

    /// Value recorded for a finished attempt.
    fn attempt_value(&self, span: &AttemptSpan) -> f32;

    /// Whether a finished attempt with `value` goes into the history.
    fn on_attempt_end(&self, value: f32) -> bool;
}

/// Wrist above both tracked fingertips, and a fingertip past the ground line.
pub fn hand_on_ground(hand: &HandLandmarks, ground_threshold_ratio: f32) -> bool {
    let (Some(wrist), Some(index_tip), Some(middle_tip)) = (
        hand.get(WRIST),
        hand.get(INDEX_FINGER_TIP),
        hand.get(MIDDLE_FINGER_TIP),
    ) else {
        return false;
    };

    let wrist_above_tips = wrist.y < index_tip.y && wrist.y < middle_tip.y;
    let tips_near_ground =
        index_tip.y > ground_threshold_ratio || middle_tip.y > ground_threshold_ratio;
    wrist_above_tips && tips_near_ground
}

#[derive(Clone, Copy, Debug)]
pub struct GroundContactPolicy {
    config: GroundContactConfig,
}

impl GroundContactPolicy {
    pub fn new(config: GroundContactConfig) -> Self {
        Self { config }
    }

    pub fn hands_on_ground(&self, frame: &LandmarkFrame) -> usize {
        frame
            .hands
            .iter()
            .filter(|hand| hand_on_ground(hand, self.config.ground_threshold_ratio))
            .count()
    }
}

impl EvaluationPolicy for GroundContactPolicy {
    fn mode(&self) -> SessionMode {
        SessionMode::Duration
    }

    fn evaluate(&self, frame: &LandmarkFrame, now_ms: u64) -> ActivationSample {
        let count = self.hands_on_ground(frame);
        ActivationSample {
            now_ms,
            measure: count as f32,
            condition_met: count >= usize::from(self.config.min_hands_required),
        }
    }

    fn attempt_value(&self, span: &AttemptSpan) -> f32 {
        span.elapsed_secs()
    }

    fn on_attempt_end(&self, value: f32) -> bool {
        value >= 0.0
    }
}

/// Height of each foot as the higher of its ankle and toe points.
/// Returns `(left, right)`; either foot missing yields `None`.
pub fn foot_heights(pose: &PoseLandmarks) -> Option<(f32, f32)> {
    let left_ankle = pose.get(LEFT_ANKLE)?;
    let right_ankle = pose.get(RIGHT_ANKLE)?;
    let left_toe = pose.get(LEFT_FOOT_INDEX)?;
    let right_toe = pose.get(RIGHT_FOOT_INDEX)?;

    Some((
        left_ankle.y.min(left_toe.y),
        right_ankle.y.min(right_toe.y),
    ))
}

/// How far `current` sits above `baseline`, as a percentage of the baseline.
pub fn kick_height_percent(baseline: f32, current: f32) -> f32 {
    if baseline <= 0.0 {
        return 0.0;
    }
    (baseline - current) / baseline * 100.0
}

#[derive(Clone, Copy, Debug)]
pub struct HeightPercentagePolicy {
    config: HeightPercentageConfig,
    baseline: BaselineTracker,
}

impl HeightPercentagePolicy {
    pub fn new(config: HeightPercentageConfig) -> Self {
        Self {
            config,
            baseline: BaselineTracker::new(config.baseline_frames_required),
        }
    }

    pub fn baseline(&self) -> &BaselineTracker {
        &self.baseline
    }

    pub fn threshold_percent(&self) -> f32 {
        self.config.detection_threshold_percent
    }
}

impl EvaluationPolicy for HeightPercentagePolicy {
    fn mode(&self) -> SessionMode {
        SessionMode::Peak
    }

    fn calibrate(&mut self, frame: &LandmarkFrame) -> CalibrationStatus {
        if self.baseline.is_complete() {
            return CalibrationStatus::Armed;
        }
        if let Some((left, right)) = frame.pose.as_ref().and_then(foot_heights) {
            self.baseline.observe(left.max(right));
        }
        // The frame that completes warm-up is still a calibration frame.
        CalibrationStatus::Warming {
            frames_accumulated: self.baseline.frames_accumulated(),
            frames_required: self.baseline.frames_required(),
        }
    }

    fn calibration_baseline(&self) -> Option<Baseline> {
        self.baseline.baseline()
    }

    fn evaluate(&self, frame: &LandmarkFrame, now_ms: u64) -> ActivationSample {
        let Some(baseline) = self.baseline.armed_value() else {
            return ActivationSample::inactive(now_ms);
        };
        let Some((left, right)) = frame.pose.as_ref().and_then(foot_heights) else {
            return ActivationSample::inactive(now_ms);
        };

        let measure = kick_height_percent(baseline, left.min(right));
        ActivationSample {
            now_ms,
            measure,
            condition_met: measure > self.config.detection_threshold_percent,
        }
    }

    fn attempt_value(&self, span: &AttemptSpan) -> f32 {
        span.peak_measure
    }

    fn on_attempt_end(&self, value: f32) -> bool {
        value > self.config.detection_threshold_percent
    }
}
