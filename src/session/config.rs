#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetentionPolicy {
    /// Append-only, display in insertion order.
    Chronological,
    /// Sorted descending by value, truncated to `max_attempts`.
    TopK,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HistoryConfig {
    pub max_attempts: u16,
    pub retention: RetentionPolicy,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DebounceConfig {
    pub stable_frames_required: u16,
    pub cooldown_frames: u16,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundContactConfig {
    pub min_hands_required: u8,
    pub ground_threshold_ratio: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightPercentageConfig {
    pub detection_threshold_percent: f32,
    pub baseline_frames_required: u16,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandstandConfig {
    pub history: HistoryConfig,
    pub debounce: DebounceConfig,
    pub ground_contact: GroundContactConfig,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighKickConfig {
    pub history: HistoryConfig,
    pub debounce: DebounceConfig,
    pub height_percentage: HeightPercentageConfig,
}

include!(concat!(env!("OUT_DIR"), "/session_config.rs"));

pub fn handstand_config() -> &'static HandstandConfig {
    &HANDSTAND_CONFIG
}

pub fn high_kick_config() -> &'static HighKickConfig {
    &HIGH_KICK_CONFIG
}
