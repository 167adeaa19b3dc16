//! Reaction: one animated value with from/to operands, easing, delays and
//! loops, advanced by an explicit per-tick call.
//!
//! Lifecycle:
//! Idle → play → [InStartDelay] → Playing → ([InLoopDelay] → Playing)* → Idle
//!
//! Paused is a flag on top of any active phase. `stop` returns to Idle at
//! once; natural completion emits `Stop` then `Finish`.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::callbacks::Callback;
use crate::error::ReactorError;
use crate::reference::ReferencePoint;
use crate::settings::{LoopType, PlayDirection, ReactionSettings};
use crate::target::Target;
use crate::time::{step_progress, TickDelta};
use crate::value::Animatable;

/// Observable state of a reaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionState {
    Idle,
    InStartDelay,
    Playing,
    InLoopDelay,
    Paused,
}

impl ReactionState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InStartDelay => "in_start_delay",
            Self::Playing => "playing",
            Self::InLoopDelay => "in_loop_delay",
            Self::Paused => "paused",
        }
    }
}

/// Discrete lifecycle signals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionEvent {
    /// A play cycle began (emitted by the play call, before any start delay)
    Start,
    /// Interpolation began (after the start delay)
    Play,
    /// One iteration ended and another follows
    Loop,
    Pause,
    Resume,
    Stop,
    Finish,
}

/// Iteration boundaries stepped one by one within a tick. Longer spans are
/// skipped whole: counted in `loops_completed` without a `Loop` each.
const MAX_SIMULATED_LOOPS: u32 = 64;

/// Hard bound on phase transitions per tick.
const MAX_STEPS_PER_TICK: u32 = 4 * MAX_SIMULATED_LOOPS + 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    StartDelay,
    Playing,
    LoopDelay,
}

/// Per-event observers.
#[derive(Debug, Default)]
pub struct ReactionCallbacks {
    pub on_start: Callback,
    pub on_play: Callback,
    pub on_loop: Callback,
    pub on_pause: Callback,
    pub on_resume: Callback,
    pub on_stop: Callback,
    pub on_finish: Callback,
    /// Invoked with linear progress every time the value is written.
    pub on_update: Callback<f32>,
}

impl ReactionCallbacks {
    fn invoke(&mut self, event: ReactionEvent) {
        match event {
            ReactionEvent::Start => self.on_start.invoke(()),
            ReactionEvent::Play => self.on_play.invoke(()),
            ReactionEvent::Loop => self.on_loop.invoke(()),
            ReactionEvent::Pause => self.on_pause.invoke(()),
            ReactionEvent::Resume => self.on_resume.invoke(()),
            ReactionEvent::Stop => self.on_stop.invoke(()),
            ReactionEvent::Finish => self.on_finish.invoke(()),
        }
    }
}

#[derive(Debug)]
pub struct Reaction<T: Animatable> {
    /// Disabled reactions ignore play calls and are skipped by animations.
    pub enabled: bool,
    pub from: ReferencePoint<T>,
    pub to: ReferencePoint<T>,
    pub callbacks: ReactionCallbacks,
    settings: ReactionSettings,
    start_value: T,
    from_value: T,
    to_value: T,
    current_value: T,
    resolved: bool,
    target: Option<Target<T>>,
    phase: Phase,
    paused: bool,
    direction: PlayDirection,
    initial_direction: PlayDirection,
    progress: f32,
    delay_elapsed: f32,
    loops_done: u32,
    /// Set while running a single leg toward an explicit progress.
    leg_target: Option<f32>,
    record_events: bool,
    events: Vec<ReactionEvent>,
}

impl<T: Animatable> Default for Reaction<T> {
    fn default() -> Self {
        Self {
            enabled: true,
            from: ReferencePoint::current(),
            to: ReferencePoint::start(),
            callbacks: ReactionCallbacks::default(),
            settings: ReactionSettings::default(),
            start_value: T::default(),
            from_value: T::default(),
            to_value: T::default(),
            current_value: T::default(),
            resolved: false,
            target: None,
            phase: Phase::Idle,
            paused: false,
            direction: PlayDirection::Forward,
            initial_direction: PlayDirection::Forward,
            progress: 0.0,
            delay_elapsed: 0.0,
            loops_done: 0,
            leg_target: None,
            record_events: false,
            events: Vec::new(),
        }
    }
}

impl<T: Animatable> Reaction<T> {
    /// Create a reaction with validated settings.
    pub fn new(settings: ReactionSettings) -> Result<Self, ReactorError> {
        settings.validate()?;
        Ok(Self {
            settings,
            ..Self::default()
        })
    }

    /// Custom from/to values; the most common authoring shape.
    pub fn between(from: T, to: T, settings: ReactionSettings) -> Result<Self, ReactorError> {
        Ok(Self::new(settings)?
            .with_from(ReferencePoint::custom(from))
            .with_to(ReferencePoint::custom(to)))
    }

    pub fn with_from(mut self, from: ReferencePoint<T>) -> Self {
        self.from = from;
        self.resolved = false;
        self
    }

    pub fn with_to(mut self, to: ReferencePoint<T>) -> Self {
        self.to = to;
        self.resolved = false;
        self
    }

    pub fn with_target(mut self, target: Target<T>) -> Self {
        self.set_target(target);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[inline]
    pub fn settings(&self) -> &ReactionSettings {
        &self.settings
    }

    /// Replace settings; takes effect from the next tick.
    pub fn set_settings(&mut self, settings: ReactionSettings) -> Result<(), ReactorError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Bind a host property. Its current value becomes the start value.
    pub fn set_target(&mut self, target: Target<T>) {
        let value = target.get();
        self.start_value = value;
        self.current_value = value;
        self.target = Some(target);
        self.resolved = false;
    }

    /// Shorthand for `set_target(Target::new(getter, setter))`.
    pub fn bind(&mut self, getter: impl Fn() -> T + 'static, setter: impl FnMut(T) + 'static) {
        self.set_target(Target::new(getter, setter));
    }

    pub fn clear_target(&mut self) -> Option<Target<T>> {
        self.target.take()
    }

    #[inline]
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    #[inline]
    pub fn start_value(&self) -> T {
        self.start_value
    }

    pub fn set_start_value(&mut self, value: T) {
        self.start_value = value;
    }

    #[inline]
    pub fn from_value(&self) -> T {
        self.from_value
    }

    #[inline]
    pub fn to_value(&self) -> T {
        self.to_value
    }

    /// Last value written by this reaction (or by `set_value`).
    #[inline]
    pub fn current_value(&self) -> T {
        self.current_value
    }

    /// Write a value to the reaction and its target without touching progress.
    pub fn set_value(&mut self, value: T) {
        self.current_value = value;
        if let Some(target) = self.target.as_mut() {
            target.set(value);
        }
    }

    /// The host's live value when bound, else the last written value.
    fn live_value(&self) -> T {
        match &self.target {
            Some(target) => target.get(),
            None => self.current_value,
        }
    }

    /// Re-derive from/to from the reference points. Safe at any time.
    pub fn update_values(&mut self) {
        let current = self.live_value();
        self.current_value = current;
        self.from_value = self.from.resolve(self.start_value, current);
        self.to_value = self.to.resolve(self.start_value, current);
        self.resolved = true;
    }

    /// Value the reaction would write at `progress`, without side effects.
    pub fn value_at(&self, progress: f32) -> T {
        let eased = self.settings.ease.apply(progress.clamp(0.0, 1.0));
        self.from_value.lerp(self.to_value, eased)
    }

    pub fn state(&self) -> ReactionState {
        match self.phase {
            Phase::Idle => ReactionState::Idle,
            _ if self.paused => ReactionState::Paused,
            Phase::StartDelay => ReactionState::InStartDelay,
            Phase::Playing => ReactionState::Playing,
            Phase::LoopDelay => ReactionState::InLoopDelay,
        }
    }

    /// Playing, paused, or waiting in a delay.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.is_active() && !self.paused
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.is_active() && self.paused
    }

    /// Linear (un-eased) progress in [0, 1].
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    /// Repeats completed in the current cycle.
    #[inline]
    pub fn loops_completed(&self) -> u32 {
        self.loops_done
    }

    /// Start a play cycle. Ignored while active or disabled.
    pub fn play(&mut self, direction: PlayDirection) {
        if !self.enabled {
            trace!("reaction play ignored: disabled");
            return;
        }
        if self.is_active() {
            trace!("reaction play ignored: already active");
            return;
        }
        self.begin_cycle(direction);
        self.progress = direction.start_progress();
        self.apply_progress();
        debug!(
            "reaction play {:?}: {:?} -> {:?} over {}s",
            direction, self.from_value, self.to_value, self.settings.duration
        );
        self.emit(ReactionEvent::Start);
        if self.settings.start_delay > 0.0 {
            self.phase = Phase::StartDelay;
            self.delay_elapsed = 0.0;
        } else {
            self.begin_playing();
        }
    }

    /// Jump to `progress` and play forward from there, skipping the start
    /// delay. Retargets an active reaction without starting a new cycle.
    pub fn play_from_progress(&mut self, progress: f32) {
        if !self.enabled {
            trace!("reaction play_from_progress ignored: disabled");
            return;
        }
        let progress = sanitize_progress(progress);
        if self.is_active() {
            self.direction = PlayDirection::Forward;
        } else {
            self.begin_cycle(PlayDirection::Forward);
            self.emit(ReactionEvent::Start);
        }
        self.leg_target = None;
        self.progress = progress;
        self.apply_progress();
        self.run_now();
    }

    /// Play a single leg from the current progress to `progress`, ignoring
    /// delays and loops. Retargets an active reaction.
    pub fn play_to_progress(&mut self, progress: f32) {
        if !self.enabled {
            trace!("reaction play_to_progress ignored: disabled");
            return;
        }
        let progress = sanitize_progress(progress);
        let direction = if progress >= self.progress {
            PlayDirection::Forward
        } else {
            PlayDirection::Reverse
        };
        if self.is_active() {
            self.direction = direction;
        } else {
            self.begin_cycle(direction);
            self.apply_progress();
            self.emit(ReactionEvent::Start);
        }
        self.leg_target = Some(progress);
        self.run_now();
    }

    /// Scrub to `progress` and write the value. Does not change the phase.
    pub fn set_progress_at(&mut self, progress: f32) {
        if !self.resolved {
            self.update_values();
        }
        self.progress = sanitize_progress(progress);
        self.apply_progress();
    }

    pub fn pause(&mut self) {
        if !self.is_active() || self.paused {
            trace!("reaction pause ignored: not running");
            return;
        }
        self.paused = true;
        self.emit(ReactionEvent::Pause);
    }

    pub fn resume(&mut self) {
        if !self.is_paused() {
            trace!("reaction resume ignored: not paused");
            return;
        }
        self.paused = false;
        self.emit(ReactionEvent::Resume);
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Flip direction mid-flight. No-op while idle.
    pub fn reverse(&mut self) {
        if !self.is_active() {
            trace!("reaction reverse ignored: idle");
            return;
        }
        self.direction = self.direction.opposite();
        self.leg_target = None;
        debug!("reaction reversed to {:?} at {}", self.direction, self.progress);
    }

    /// Halt immediately, leaving the value where it is. Idempotent.
    pub fn stop(&mut self) {
        if !self.is_active() {
            trace!("reaction stop ignored: idle");
            return;
        }
        self.halt();
        debug!("reaction stopped at progress {}", self.progress);
        self.emit(ReactionEvent::Stop);
    }

    /// Jump to the end of the current leg and complete.
    pub fn finish(&mut self) {
        if !self.is_active() {
            trace!("reaction finish ignored: idle");
            return;
        }
        self.progress = self.leg_target.unwrap_or(self.direction.end_progress());
        self.apply_progress();
        self.complete();
    }

    /// Stop if needed and return to where the last cycle started.
    pub fn rewind(&mut self) {
        self.stop();
        self.direction = self.initial_direction;
        self.set_progress_at(self.initial_direction.start_progress());
    }

    /// Advance by one host tick.
    pub fn advance(&mut self, delta: &TickDelta) {
        if !self.is_playing() {
            return;
        }
        let mut dt = delta.for_timescale(self.settings.timescale);
        let mut steps = 0u32;
        loop {
            steps += 1;
            if steps > MAX_STEPS_PER_TICK {
                warn!("reaction advance gave up after {MAX_STEPS_PER_TICK} steps with {dt}s left");
                break;
            }
            match self.phase {
                Phase::Idle => break,
                Phase::StartDelay | Phase::LoopDelay => {
                    let delay = if self.phase == Phase::StartDelay {
                        self.settings.start_delay
                    } else {
                        self.settings.loop_delay
                    };
                    let remaining = delay - self.delay_elapsed;
                    if dt < remaining {
                        self.delay_elapsed += dt;
                        break;
                    }
                    dt -= remaining;
                    self.delay_elapsed = 0.0;
                    if self.phase == Phase::StartDelay {
                        self.begin_playing();
                    } else {
                        self.restart_iteration();
                    }
                }
                Phase::Playing => {
                    let target = self.leg_target.unwrap_or(self.direction.end_progress());
                    let step = step_progress(self.progress, target, dt, self.settings.duration);
                    self.progress = step.progress;
                    self.apply_progress();
                    if !step.reached {
                        break;
                    }
                    dt = step.overflow;
                    self.end_of_leg();
                    // A zero-length play-through consumes no time; stop here to stay finite.
                    if self.settings.duration <= 0.0 {
                        break;
                    }
                    dt = self.skip_whole_iterations(dt);
                }
            }
        }
    }

    /// Take events recorded since the last call.
    pub(crate) fn take_events(&mut self) -> Vec<ReactionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Owners that drain events (animations, the reactor) turn recording on.
    pub(crate) fn set_record_events(&mut self, record: bool) {
        self.record_events = record;
        if !record {
            self.events.clear();
        }
    }

    /// Return to Idle without emitting anything.
    pub(crate) fn halt(&mut self) {
        self.phase = Phase::Idle;
        self.paused = false;
        self.leg_target = None;
        self.delay_elapsed = 0.0;
    }

    fn begin_cycle(&mut self, direction: PlayDirection) {
        self.update_values();
        self.direction = direction;
        self.initial_direction = direction;
        self.loops_done = 0;
        self.leg_target = None;
        self.paused = false;
        self.delay_elapsed = 0.0;
    }

    fn begin_playing(&mut self) {
        self.phase = Phase::Playing;
        self.emit(ReactionEvent::Play);
    }

    /// Enter Playing now, as explicit progress plays do.
    fn run_now(&mut self) {
        if self.paused {
            self.paused = false;
            self.emit(ReactionEvent::Resume);
        }
        match self.phase {
            Phase::Playing => {}
            Phase::LoopDelay => {
                self.delay_elapsed = 0.0;
                self.phase = Phase::Playing;
            }
            Phase::Idle | Phase::StartDelay => {
                self.delay_elapsed = 0.0;
                self.begin_playing();
            }
        }
    }

    /// Called at an iteration boundary with `dt` left in the tick. When `dt`
    /// spans more than [`MAX_SIMULATED_LOOPS`] full iterations, jump over them
    /// (never past the final one) and return the remainder.
    fn skip_whole_iterations(&mut self, dt: f32) -> f32 {
        if self.phase == Phase::Idle || self.leg_target.is_some() {
            return dt;
        }
        let period = f64::from(self.settings.duration) + f64::from(self.settings.loop_delay);
        let mut whole = (f64::from(dt) / period).floor();
        if !self.settings.is_infinite() {
            let left = (self.settings.loops as u32).saturating_sub(self.loops_done);
            whole = whole.min(f64::from(left));
        }
        if whole <= f64::from(MAX_SIMULATED_LOOPS) {
            return dt;
        }
        self.loops_done = self.loops_done.saturating_add(whole as u32);
        if self.settings.loop_type == LoopType::PingPong && whole % 2.0 == 1.0 {
            self.direction = self.direction.opposite();
            self.progress = self.direction.start_progress();
            self.apply_progress();
        }
        trace!("reaction skipped {whole} whole iterations");
        (f64::from(dt) - whole * period).max(0.0) as f32
    }

    fn restart_iteration(&mut self) {
        self.phase = Phase::Playing;
        self.progress = self.direction.start_progress();
        self.apply_progress();
    }

    fn end_of_leg(&mut self) {
        if self.leg_target.is_some() {
            self.complete();
            return;
        }
        let more = self.settings.is_infinite() || self.loops_done < self.settings.loops as u32;
        if !more {
            self.complete();
            return;
        }
        self.loops_done = self.loops_done.saturating_add(1);
        self.emit(ReactionEvent::Loop);
        if self.settings.loop_type == LoopType::PingPong {
            self.direction = self.direction.opposite();
        }
        if self.settings.loop_delay > 0.0 {
            self.phase = Phase::LoopDelay;
            self.delay_elapsed = 0.0;
        } else {
            self.restart_iteration();
        }
    }

    fn complete(&mut self) {
        self.halt();
        debug!(
            "reaction finished at {:?} after {} loops",
            self.current_value, self.loops_done
        );
        self.emit(ReactionEvent::Stop);
        self.emit(ReactionEvent::Finish);
    }

    fn apply_progress(&mut self) {
        let value = self.value_at(self.progress);
        self.set_value(value);
        self.callbacks.on_update.invoke(self.progress);
    }

    fn emit(&mut self, event: ReactionEvent) {
        if self.record_events {
            self.events.push(event);
        }
        self.callbacks.invoke(event);
    }
}

#[inline]
fn sanitize_progress(p: f32) -> f32 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
