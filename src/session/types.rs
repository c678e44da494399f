use core::fmt::Write as _;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionMode {
    /// Records how long a held pose lasts, in seconds.
    Duration,
    /// Records the highest activation reached by a motion, in percent.
    Peak,
}

impl SessionMode {
    pub const fn unit(self) -> &'static str {
        match self {
            SessionMode::Duration => "s",
            SessionMode::Peak => "%",
        }
    }

    /// Text the host shows once every attempt is used.
    pub fn capacity_headline(self, max_attempts: usize) -> heapless::String<48> {
        let mut text = heapless::String::new();
        match self {
            SessionMode::Duration => {
                let _ = text.push_str("Maximum attempts reached!");
            }
            SessionMode::Peak => {
                let _ = write!(text, "{max_attempts} highest kicks recorded!");
            }
        }
        text
    }
}

/// Per-frame output of a condition evaluator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActivationSample {
    pub now_ms: u64,
    pub measure: f32,
    pub condition_met: bool,
}

impl ActivationSample {
    pub const fn inactive(now_ms: u64) -> Self {
        Self {
            now_ms,
            measure: 0.0,
            condition_met: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CalibrationStatus {
    Armed,
    Warming {
        frames_accumulated: u16,
        frames_required: u16,
    },
}

impl CalibrationStatus {
    pub const fn is_armed(self) -> bool {
        matches!(self, CalibrationStatus::Armed)
    }
}

/// Extent of one attempt from the frame it became active.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AttemptSpan {
    pub started_ms: u64,
    pub now_ms: u64,
    pub peak_measure: f32,
}

impl AttemptSpan {
    pub fn elapsed_ms(&self) -> u64 {
        self.now_ms.saturating_sub(self.started_ms)
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_ms() as f32 / 1_000.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PoseEvent {
    Started(AttemptSpan),
    Updated(AttemptSpan),
    Ended(AttemptSpan),
}

impl PoseEvent {
    pub const fn span(&self) -> AttemptSpan {
        match self {
            PoseEvent::Started(span) | PoseEvent::Updated(span) | PoseEvent::Ended(span) => *span,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum MachineStateId {
    #[default]
    Idle = 0,
    Stabilizing = 1,
    Active = 2,
    CoolingDown = 3,
}

impl MachineStateId {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// One finished attempt as kept by the history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttemptRecord {
    pub value: f32,
    /// 1-based, counts every attempt recorded, including ones later dropped.
    pub sequence_index: u32,
}
