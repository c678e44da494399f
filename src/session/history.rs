use super::{
    config::{HistoryConfig, RetentionPolicy},
    types::AttemptRecord,
};

/// Upper bound on `HistoryConfig::max_attempts`.
pub const ATTEMPT_CAPACITY: usize = 32;

/// Completed attempts, bounded by `max_attempts`.
///
/// The capacity flag counts attempts made, not rows kept: a top-K history
/// reaches capacity after `max_attempts` records even though lower ones
/// were discarded along the way. Once set it stays set.
#[derive(Clone, Debug)]
pub struct AttemptHistory {
    retention: RetentionPolicy,
    max_attempts: usize,
    entries: heapless::Vec<AttemptRecord, ATTEMPT_CAPACITY>,
    attempts_made: u32,
    last_value: Option<f32>,
    capacity_reached: bool,
}

impl AttemptHistory {
    pub fn new(config: HistoryConfig) -> Self {
        let requested = usize::from(config.max_attempts);
        let max_attempts = requested.clamp(1, ATTEMPT_CAPACITY);
        if max_attempts != requested {
            log::warn!(
                "history: max_attempts {requested} out of range, using {max_attempts}"
            );
        }

        Self {
            retention: config.retention,
            max_attempts,
            entries: heapless::Vec::new(),
            attempts_made: 0,
            last_value: None,
            capacity_reached: false,
        }
    }

    /// Records one finished attempt and returns its sequence index, or
    /// `None` when a chronological history is already full. A dropped
    /// attempt still becomes `last_value`.
    pub fn record(&mut self, value: f32) -> Option<u32> {
        self.last_value = Some(value);
        let sequence_index = self.attempts_made + 1;
        let record = AttemptRecord {
            value,
            sequence_index,
        };

        match self.retention {
            RetentionPolicy::Chronological => {
                if self.entries.len() >= self.max_attempts || self.entries.push(record).is_err() {
                    log::warn!("history: full, dropping attempt {value:.2}");
                    return None;
                }
            }
            RetentionPolicy::TopK => self.insert_ranked(record),
        }

        self.attempts_made = sequence_index;
        if !self.capacity_reached && self.attempts_made as usize >= self.max_attempts {
            self.capacity_reached = true;
            log::info!("history: {} attempts recorded, capacity reached", self.attempts_made);
        }
        Some(sequence_index)
    }

    /// Keeps `entries` sorted descending; equal values keep insertion order.
    fn insert_ranked(&mut self, record: AttemptRecord) {
        let position = self
            .entries
            .iter()
            .position(|entry| record.value > entry.value)
            .unwrap_or(self.entries.len());

        if position >= self.max_attempts {
            log::debug!(
                "history: attempt #{} ({:.2}) below the top {}",
                record.sequence_index,
                record.value,
                self.max_attempts
            );
            return;
        }
        if self.entries.len() >= self.max_attempts {
            self.entries.pop();
        }
        if self.entries.insert(position, record).is_err() {
            log::warn!("history: no room for attempt #{}", record.sequence_index);
        }
    }

    /// Display order: insertion order, or best-first for top-K.
    pub fn entries(&self) -> &[AttemptRecord] {
        &self.entries
    }

    /// Highest value kept; ties go to the earliest attempt.
    pub fn best(&self) -> Option<AttemptRecord> {
        self.entries.iter().copied().fold(None, |best, entry| match best {
            Some(current) if current.value >= entry.value => Some(current),
            _ => Some(entry),
        })
    }

    pub fn last_value(&self) -> Option<f32> {
        self.last_value
    }

    pub fn attempts_made(&self) -> u32 {
        self.attempts_made
    }

    pub fn attempts_left(&self) -> u32 {
        (self.max_attempts as u32).saturating_sub(self.attempts_made)
    }

    pub fn capacity_reached(&self) -> bool {
        self.capacity_reached
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
