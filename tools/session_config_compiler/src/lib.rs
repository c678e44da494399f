//! Build-time compiler for `config/session.toml`.
//!
//! Parses the per-mode session tables, checks them against the limits the
//! engine can honor, and renders a Rust source file of `const` configs that
//! the engine pulls in with `include!`.

use std::{fmt::Write as _, fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

/// Fixed history capacity of the engine; `max_attempts` may not exceed it.
pub const ATTEMPT_CAPACITY_LIMIT: u16 = 32;

#[derive(Debug, Error)]
pub enum ConfigCompilerError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Retention {
    Chronological,
    TopK,
}

impl Retention {
    fn rust_path(self) -> &'static str {
        match self {
            Retention::Chronological => "RetentionPolicy::Chronological",
            Retention::TopK => "RetentionPolicy::TopK",
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HistorySection {
    pub max_attempts: u16,
    pub retention: Retention,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DebounceSection {
    pub stable_frames_required: u16,
    pub cooldown_frames: u16,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GroundContactSection {
    pub min_hands_required: u8,
    pub ground_threshold_ratio: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HeightPercentageSection {
    pub detection_threshold_percent: f64,
    pub baseline_frames_required: u16,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HandstandSection {
    pub history: HistorySection,
    pub debounce: DebounceSection,
    pub ground_contact: GroundContactSection,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HighKickSection {
    pub history: HistorySection,
    pub debounce: DebounceSection,
    pub height_percentage: HeightPercentageSection,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SessionFile {
    pub handstand: HandstandSection,
    pub high_kick: HighKickSection,
}

pub fn parse_session_str(text: &str) -> Result<SessionFile, ConfigCompilerError> {
    toml::from_str(text).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn parse_session_file(path: &Path) -> Result<SessionFile, ConfigCompilerError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigCompilerError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_session_str(&text)
}

fn check_history(prefix: &str, history: &HistorySection, problems: &mut Vec<String>) {
    if history.max_attempts == 0 || history.max_attempts > ATTEMPT_CAPACITY_LIMIT {
        problems.push(format!(
            "{prefix}.history.max_attempts must be between 1 and {ATTEMPT_CAPACITY_LIMIT}"
        ));
    }
}

fn check_debounce(prefix: &str, debounce: &DebounceSection, problems: &mut Vec<String>) {
    if debounce.stable_frames_required == 0 {
        problems.push(format!(
            "{prefix}.debounce.stable_frames_required must be >= 1"
        ));
    }
}

pub fn validate_config(cfg: &SessionFile) -> Result<(), ConfigCompilerError> {
    let mut problems = Vec::new();

    check_history("handstand", &cfg.handstand.history, &mut problems);
    check_debounce("handstand", &cfg.handstand.debounce, &mut problems);
    let ground = &cfg.handstand.ground_contact;
    if !(1..=2).contains(&ground.min_hands_required) {
        problems.push("handstand.ground_contact.min_hands_required must be 1 or 2".into());
    }
    if !(ground.ground_threshold_ratio > 0.0 && ground.ground_threshold_ratio < 1.0) {
        problems
            .push("handstand.ground_contact.ground_threshold_ratio must be within (0, 1)".into());
    }

    check_history("high_kick", &cfg.high_kick.history, &mut problems);
    check_debounce("high_kick", &cfg.high_kick.debounce, &mut problems);
    let height = &cfg.high_kick.height_percentage;
    if !(height.detection_threshold_percent > 0.0 && height.detection_threshold_percent < 100.0)
    {
        problems.push(
            "high_kick.height_percentage.detection_threshold_percent must be within (0, 100)"
                .into(),
        );
    }
    if height.baseline_frames_required == 0 {
        problems.push("high_kick.height_percentage.baseline_frames_required must be >= 1".into());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ConfigCompilerError::Validation(problems.join("; ")))
    }
}

fn render_history(out: &mut String, history: &HistorySection) {
    let _ = writeln!(out, "    history: HistoryConfig {{");
    let _ = writeln!(out, "        max_attempts: {},", history.max_attempts);
    let _ = writeln!(out, "        retention: {},", history.retention.rust_path());
    let _ = writeln!(out, "    }},");
}

fn render_debounce(out: &mut String, debounce: &DebounceSection) {
    let _ = writeln!(out, "    debounce: DebounceConfig {{");
    let _ = writeln!(
        out,
        "        stable_frames_required: {},",
        debounce.stable_frames_required
    );
    let _ = writeln!(out, "        cooldown_frames: {},", debounce.cooldown_frames);
    let _ = writeln!(out, "    }},");
}

pub fn render_generated_config(cfg: &SessionFile) -> String {
    let mut out = String::new();
    out.push_str("// @generated by session_config_compiler. Do not edit.\n\n");

    let handstand = &cfg.handstand;
    out.push_str("pub const HANDSTAND_CONFIG: HandstandConfig = HandstandConfig {\n");
    render_history(&mut out, &handstand.history);
    render_debounce(&mut out, &handstand.debounce);
    let _ = writeln!(out, "    ground_contact: GroundContactConfig {{");
    let _ = writeln!(
        out,
        "        min_hands_required: {},",
        handstand.ground_contact.min_hands_required
    );
    let _ = writeln!(
        out,
        "        ground_threshold_ratio: {:?},",
        handstand.ground_contact.ground_threshold_ratio
    );
    let _ = writeln!(out, "    }},");
    out.push_str("};\n\n");

    let high_kick = &cfg.high_kick;
    out.push_str("pub const HIGH_KICK_CONFIG: HighKickConfig = HighKickConfig {\n");
    render_history(&mut out, &high_kick.history);
    render_debounce(&mut out, &high_kick.debounce);
    let _ = writeln!(out, "    height_percentage: HeightPercentageConfig {{");
    let _ = writeln!(
        out,
        "        detection_threshold_percent: {:?},",
        high_kick.height_percentage.detection_threshold_percent
    );
    let _ = writeln!(
        out,
        "        baseline_frames_required: {},",
        high_kick.height_percentage.baseline_frames_required
    );
    let _ = writeln!(out, "    }},");
    out.push_str("};\n");

    out
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let cfg = parse_session_file(path)?;
    validate_config(&cfg)?;
    Ok(render_generated_config(&cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[handstand.history]
max_attempts = 10
retention = "chronological"

[handstand.debounce]
stable_frames_required = 5
cooldown_frames = 0

[handstand.ground_contact]
min_hands_required = 2
ground_threshold_ratio = 0.85

[high_kick.history]
max_attempts = 10
retention = "top_k"

[high_kick.debounce]
stable_frames_required = 1
cooldown_frames = 15

[high_kick.height_percentage]
detection_threshold_percent = 15.0
baseline_frames_required = 30
"#;

    #[test]
    fn retention_names_use_snake_case() {
        let cfg = parse_session_str(MINIMAL).expect("minimal config should parse");
        assert_eq!(cfg.handstand.history.retention, Retention::Chronological);
        assert_eq!(cfg.high_kick.history.retention, Retention::TopK);
    }

    #[test]
    fn validation_collects_every_problem() {
        let mut cfg = parse_session_str(MINIMAL).expect("minimal config should parse");
        cfg.handstand.history.max_attempts = 0;
        cfg.high_kick.debounce.stable_frames_required = 0;

        let Err(ConfigCompilerError::Validation(msg)) = validate_config(&cfg) else {
            panic!("expected validation failure");
        };
        assert!(msg.contains("handstand.history.max_attempts"));
        assert!(msg.contains("high_kick.debounce.stable_frames_required"));
    }

    #[test]
    fn floats_render_as_rust_literals() {
        let cfg = parse_session_str(MINIMAL).expect("minimal config should parse");
        let rendered = render_generated_config(&cfg);
        assert!(rendered.contains("ground_threshold_ratio: 0.85,"));
        assert!(rendered.contains("detection_threshold_percent: 15.0,"));
    }
}
