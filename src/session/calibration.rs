use super::types::CalibrationStatus;

/// Resting reference established during warm-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Baseline {
    pub value: f32,
    pub frames_accumulated: u16,
    pub frames_required: u16,
}

/// Tracks the lowest resting foot position (largest `y`) over the first
/// `frames_required` observed frames, then freezes.
#[derive(Clone, Copy, Debug)]
pub struct BaselineTracker {
    value: Option<f32>,
    frames_accumulated: u16,
    frames_required: u16,
}

impl BaselineTracker {
    pub fn new(frames_required: u16) -> Self {
        Self {
            value: None,
            frames_accumulated: 0,
            frames_required: frames_required.max(1),
        }
    }

    pub fn frames_accumulated(&self) -> u16 {
        self.frames_accumulated
    }

    pub fn frames_required(&self) -> u16 {
        self.frames_required
    }

    pub fn is_complete(&self) -> bool {
        self.frames_accumulated >= self.frames_required
    }

    /// Folds one raw height into the baseline. Returns `true` once complete;
    /// frames after that leave the baseline untouched.
    pub fn observe(&mut self, raw: f32) -> bool {
        if self.is_complete() {
            return true;
        }
        if !raw.is_finite() {
            return false;
        }

        self.value = Some(self.value.map_or(raw, |current| current.max(raw)));
        self.frames_accumulated += 1;

        if self.is_complete() {
            log::info!(
                "baseline established at {:.3} after {} frames",
                self.value.unwrap_or(raw),
                self.frames_accumulated
            );
            return true;
        }
        false
    }

    /// Baseline value, only once warm-up has finished.
    pub fn armed_value(&self) -> Option<f32> {
        if self.is_complete() {
            self.value
        } else {
            None
        }
    }

    pub fn baseline(&self) -> Option<Baseline> {
        self.value.map(|value| Baseline {
            value,
            frames_accumulated: self.frames_accumulated,
            frames_required: self.frames_required,
        })
    }

    pub fn status(&self) -> CalibrationStatus {
        if self.is_complete() {
            CalibrationStatus::Armed
        } else {
            CalibrationStatus::Warming {
                frames_accumulated: self.frames_accumulated,
                frames_required: self.frames_required,
            }
        }
    }
}
