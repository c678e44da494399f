// @generated by session_config_compiler. Do not edit.

pub const HANDSTAND_CONFIG: HandstandConfig = HandstandConfig {
    history: HistoryConfig {
        max_attempts: 10,
        retention: RetentionPolicy::Chronological,
    },
    debounce: DebounceConfig {
        stable_frames_required: 5,
        cooldown_frames: 0,
    },
    ground_contact: GroundContactConfig {
        min_hands_required: 2,
        ground_threshold_ratio: 0.85,
    },
};

pub const HIGH_KICK_CONFIG: HighKickConfig = HighKickConfig {
    history: HistoryConfig {
        max_attempts: 10,
        retention: RetentionPolicy::TopK,
    },
    debounce: DebounceConfig {
        stable_frames_required: 1,
        cooldown_frames: 15,
    },
    height_percentage: HeightPercentageConfig {
        detection_threshold_percent: 15.0,
        baseline_frames_required: 30,
    },
};
