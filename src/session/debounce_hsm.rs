use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{
    config::DebounceConfig,
    trace::DebounceTraceSample,
    types::{ActivationSample, AttemptSpan, MachineStateId, PoseEvent},
};

#[derive(Default)]
struct DispatchContext {
    event: Option<PoseEvent>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EngineOutput {
    pub event: Option<PoseEvent>,
    pub trace: DebounceTraceSample,
}

/// Turns per-frame activation samples into at most one lifecycle event per
/// frame: `Idle -> Stabilizing -> Active -> (CoolingDown ->) Idle`.
pub struct DebounceEngine {
    machine: statig::blocking::StateMachine<DebounceHsm>,
}

impl DebounceEngine {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            machine: DebounceHsm::new(config).state_machine(),
        }
    }

    pub fn tick(&mut self, sample: ActivationSample) -> EngineOutput {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&sample, &mut context);
        self.finish(sample, context)
    }

    pub fn state_id(&self) -> MachineStateId {
        self.machine.inner().state_id
    }

    pub fn stable_frames(&self) -> u16 {
        self.machine.inner().stable_frames
    }

    pub fn config(&self) -> DebounceConfig {
        self.machine.inner().config
    }

    fn finish(&self, sample: ActivationSample, context: DispatchContext) -> EngineOutput {
        let hsm = self.machine.inner();
        EngineOutput {
            event: context.event,
            trace: DebounceTraceSample {
                now_ms: sample.now_ms,
                state_id: hsm.state_id,
                stable_frames: hsm.stable_frames,
                cooldown_remaining: hsm.cooldown_remaining,
                measure: sample.measure,
                condition_met: sample.condition_met,
            },
        }
    }
}

struct DebounceHsm {
    config: DebounceConfig,
    state_id: MachineStateId,
    stable_frames: u16,
    cooldown_remaining: u16,
    started_ms: u64,
    peak_measure: f32,
}

impl DebounceHsm {
    fn new(config: DebounceConfig) -> Self {
        Self {
            config: DebounceConfig {
                stable_frames_required: config.stable_frames_required.max(1),
                ..config
            },
            state_id: MachineStateId::Idle,
            stable_frames: 0,
            cooldown_remaining: 0,
            started_ms: 0,
            peak_measure: 0.0,
        }
    }

    fn enter(&mut self, next: MachineStateId) {
        if self.state_id != next {
            log::debug!("debounce: {:?} -> {:?}", self.state_id, next);
        }
        self.state_id = next;
    }

    fn span(&self, now_ms: u64) -> AttemptSpan {
        AttemptSpan {
            started_ms: self.started_ms,
            now_ms,
            peak_measure: self.peak_measure,
        }
    }

    fn stable_enough(&self) -> bool {
        self.stable_frames >= self.config.stable_frames_required
    }

    fn start_attempt(
        &mut self,
        context: &mut DispatchContext,
        sample: &ActivationSample,
    ) -> Outcome<State> {
        self.started_ms = sample.now_ms;
        self.peak_measure = sample.measure;
        context.event = Some(PoseEvent::Started(self.span(sample.now_ms)));
        self.enter(MachineStateId::Active);
        Transition(State::active())
    }

    fn finish_attempt(&mut self, context: &mut DispatchContext, now_ms: u64) -> Outcome<State> {
        context.event = Some(PoseEvent::Ended(self.span(now_ms)));
        self.stable_frames = 0;
        self.peak_measure = 0.0;

        if self.config.cooldown_frames == 0 {
            self.enter(MachineStateId::Idle);
            return Transition(State::idle());
        }
        self.cooldown_remaining = self.config.cooldown_frames;
        self.enter(MachineStateId::CoolingDown);
        Transition(State::cooling_down())
    }

    fn lose_signal(&mut self) -> Outcome<State> {
        self.stable_frames = 0;
        self.enter(MachineStateId::Idle);
        Transition(State::idle())
    }
}

#[state_machine(initial = "State::idle()")]
impl DebounceHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &ActivationSample) -> Outcome<State> {
        if !event.condition_met {
            self.stable_frames = 0;
            return Handled;
        }

        self.stable_frames = 1;
        if self.stable_enough() {
            return self.start_attempt(context, event);
        }
        self.enter(MachineStateId::Stabilizing);
        Transition(State::stabilizing())
    }

    #[state]
    fn stabilizing(
        &mut self,
        context: &mut DispatchContext,
        event: &ActivationSample,
    ) -> Outcome<State> {
        if !event.condition_met {
            return self.lose_signal();
        }

        self.stable_frames = self.stable_frames.saturating_add(1);
        if self.stable_enough() {
            return self.start_attempt(context, event);
        }
        Handled
    }

    #[state]
    fn active(
        &mut self,
        context: &mut DispatchContext,
        event: &ActivationSample,
    ) -> Outcome<State> {
        if !event.condition_met {
            return self.finish_attempt(context, event.now_ms);
        }

        self.peak_measure = self.peak_measure.max(event.measure);
        context.event = Some(PoseEvent::Updated(self.span(event.now_ms)));
        Handled
    }

    /// Fixed dead-time: samples are ignored, including ones that would
    /// start a new attempt.
    #[state]
    fn cooling_down(&mut self) -> Outcome<State> {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
        if self.cooldown_remaining == 0 {
            self.enter(MachineStateId::Idle);
            return Transition(State::idle());
        }
        Handled
    }
}

#[cfg(test)]
mod tests;
