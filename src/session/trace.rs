use crate::session::types::MachineStateId;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DebounceTraceSample {
    pub now_ms: u64,
    pub state_id: MachineStateId,
    pub stable_frames: u16,
    pub cooldown_remaining: u16,
    pub measure: f32,
    pub condition_met: bool,
}
