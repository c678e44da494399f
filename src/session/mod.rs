pub mod calibration;
pub mod config;
pub mod controller;
pub mod debounce_hsm;
pub mod evaluator;
pub mod history;
pub mod landmarks;
pub mod snapshot;
pub mod trace;
pub mod types;

pub use calibration::{Baseline, BaselineTracker};
pub use config::{
    handstand_config, high_kick_config, DebounceConfig, GroundContactConfig, HandstandConfig,
    HeightPercentageConfig, HighKickConfig, HistoryConfig, RetentionPolicy,
};
pub use controller::{HandstandSession, HighKickSession, PoseSession};
pub use debounce_hsm::{DebounceEngine, EngineOutput};
pub use evaluator::{EvaluationPolicy, GroundContactPolicy, HeightPercentagePolicy};
pub use history::{AttemptHistory, ATTEMPT_CAPACITY};
pub use landmarks::{HandLandmarks, Landmark, LandmarkDecodeError, LandmarkFrame, PoseLandmarks};
pub use snapshot::{HistoryRow, RenderSnapshot, StatusLabel};
pub use trace::DebounceTraceSample;
pub use types::{
    ActivationSample, AttemptRecord, AttemptSpan, CalibrationStatus, MachineStateId, PoseEvent,
    SessionMode,
};
