use core::fmt;

use super::{
    calibration::Baseline,
    history::ATTEMPT_CAPACITY,
    trace::DebounceTraceSample,
    types::{AttemptRecord, CalibrationStatus, MachineStateId, PoseEvent, SessionMode},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatusLabel {
    Calibrating,
    Ready,
    Stabilizing,
    Recording,
    CoolingDown,
}

impl StatusLabel {
    pub const fn from_state(state: MachineStateId) -> Self {
        match state {
            MachineStateId::Idle => StatusLabel::Ready,
            MachineStateId::Stabilizing => StatusLabel::Stabilizing,
            MachineStateId::Active => StatusLabel::Recording,
            MachineStateId::CoolingDown => StatusLabel::CoolingDown,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StatusLabel::Calibrating => "Establishing baseline",
            StatusLabel::Ready => "Ready",
            StatusLabel::Stabilizing => "Stabilizing",
            StatusLabel::Recording => "RECORDING",
            StatusLabel::CoolingDown => "Cooldown",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoryRow {
    pub record: AttemptRecord,
    /// 1-based display position.
    pub rank: u8,
    pub is_best: bool,
}

/// Read-only view of a session after one `update`.
///
/// Copies out everything a renderer needs; holding one never borrows the
/// session.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSnapshot {
    pub mode: SessionMode,
    pub now_ms: u64,
    pub status: StatusLabel,
    /// Running value of the attempt in progress.
    pub live_value: Option<f32>,
    pub last_value: Option<f32>,
    pub best_value: Option<f32>,
    pub history: heapless::Vec<HistoryRow, ATTEMPT_CAPACITY>,
    pub attempts_left: u32,
    pub capacity_reached: bool,
    /// True only on the frame that reached capacity.
    pub capacity_reached_now: bool,
    pub calibration: CalibrationStatus,
    /// Peak mode only; partial while warming up, frozen once armed.
    pub baseline: Option<Baseline>,
    pub event: Option<PoseEvent>,
    /// `None` while calibrating; the debounce engine did not run.
    pub trace: Option<DebounceTraceSample>,
}

impl RenderSnapshot {
    /// Timer text source: the running attempt, else the last finished one.
    pub fn current_value(&self) -> Option<f32> {
        self.live_value.or(self.last_value)
    }

    pub fn unit(&self) -> &'static str {
        self.mode.unit()
    }
}
