//! Animation: named reactions sharing one lifecycle.
//!
//! Every verb fans out to enabled reactions in registration order. Child
//! events are collected after the fan-out and fed to the [`Barrier`], so a
//! child that completes synchronously cannot close the cycle before its
//! siblings have started.

pub mod barrier;

use log::{debug, trace};

use crate::any_reaction::{AnyReaction, ChannelKind};
use crate::callbacks::Callback;
use crate::error::ReactorError;
use crate::outputs::AnimationEvent;
use crate::reaction::{Reaction, ReactionEvent};
use crate::settings::PlayDirection;
use crate::time::TickDelta;
use crate::value::{Color, Vec2, Vec3};

pub use barrier::{Barrier, Signals};

#[derive(Debug)]
struct Slot {
    name: String,
    reaction: AnyReaction,
    /// Started in this cycle and not yet stopped.
    in_cycle: bool,
}

#[derive(Debug, Default)]
pub struct Animation {
    pub name: String,
    pub on_play: Callback,
    pub on_stop: Callback,
    pub on_finish: Callback,
    slots: Vec<Slot>,
    barrier: Barrier,
    record_events: bool,
    events: Vec<AnimationEvent>,
}

impl Animation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Register a reaction under a unique name.
    pub fn add_reaction(
        &mut self,
        name: impl Into<String>,
        reaction: impl Into<AnyReaction>,
    ) -> Result<(), ReactorError> {
        let name = name.into();
        if self.slots.iter().any(|s| s.name == name) {
            return Err(ReactorError::DuplicateReaction { name });
        }
        let mut reaction = reaction.into();
        reaction.set_record_events(true);
        self.slots.push(Slot {
            name,
            reaction,
            in_cycle: false,
        });
        Ok(())
    }

    pub fn with_reaction(
        mut self,
        name: impl Into<String>,
        reaction: impl Into<AnyReaction>,
    ) -> Result<Self, ReactorError> {
        self.add_reaction(name, reaction)?;
        Ok(self)
    }

    /// Detach a reaction. If it was mid-cycle it leaves the barrier, which
    /// may let the remaining reactions close the cycle.
    pub fn remove_reaction(&mut self, name: &str) -> Result<AnyReaction, ReactorError> {
        let idx = self
            .slots
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| ReactorError::ReactionNotFound {
                name: name.to_string(),
            })?;
        let mut slot = self.slots.remove(idx);
        if slot.in_cycle {
            self.barrier.withdraw();
        }
        slot.reaction.set_record_events(false);
        self.fire_due();
        Ok(slot.reaction)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn reaction_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.name.as_str())
    }

    pub fn reaction(&self, name: &str) -> Option<&AnyReaction> {
        self.slots
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.reaction)
    }

    /// Direct access. Enabled flags changed through this handle are
    /// reconciled on the next aggregate call.
    pub fn reaction_mut(&mut self, name: &str) -> Option<&mut AnyReaction> {
        self.slots
            .iter_mut()
            .find(|s| s.name == name)
            .map(|s| &mut s.reaction)
    }

    /// Toggle a reaction. Disabling one mid-cycle halts it silently and
    /// withdraws it from the barrier.
    pub fn set_reaction_enabled(&mut self, name: &str, enabled: bool) -> Result<(), ReactorError> {
        let reaction = self
            .reaction_mut(name)
            .ok_or_else(|| ReactorError::ReactionNotFound {
                name: name.to_string(),
            })?;
        reaction.set_enabled(enabled);
        self.collect();
        Ok(())
    }

    // ---- aggregate state ----

    pub fn is_active(&self) -> bool {
        self.enabled().any(|r| r.is_active())
    }

    /// Every active reaction is paused (and at least one is active).
    pub fn is_paused(&self) -> bool {
        let mut active = self.enabled().filter(|r| r.is_active()).peekable();
        active.peek().is_some() && active.all(|r| r.is_paused())
    }

    /// Mean linear progress of enabled reactions; 0 when none are enabled.
    pub fn progress(&self) -> f32 {
        let (sum, n) = self
            .enabled()
            .fold((0.0f32, 0usize), |(s, n), r| (s + r.progress(), n + 1));
        if n == 0 {
            0.0
        } else {
            sum / n as f32
        }
    }

    #[inline]
    pub fn barrier(&self) -> &Barrier {
        &self.barrier
    }

    // ---- lifecycle ----

    /// Reset barrier counters and guards for a new cycle. Disabled reactions
    /// still running from an earlier cycle are halted.
    pub fn register_callbacks(&mut self) {
        self.barrier.reset();
        for slot in self.slots.iter_mut() {
            if !slot.reaction.enabled() && slot.reaction.is_active() {
                slot.reaction.halt();
            }
            slot.reaction.take_events();
            slot.in_cycle = false;
        }
    }

    /// Start a play cycle on every enabled reaction. Ignored while active.
    pub fn play(&mut self, direction: PlayDirection) {
        self.collect();
        if self.is_active() {
            trace!("animation '{}' play ignored: already active", self.name);
            return;
        }
        self.register_callbacks();
        debug!("animation '{}' play {:?}", self.name, direction);
        self.fan_out(|r| r.play(direction));
    }

    /// Like [`play`](Self::play), but rejects enabled reactions without a
    /// bound target.
    pub fn try_play(&mut self, direction: PlayDirection) -> Result<(), ReactorError> {
        self.check_targets()?;
        self.play(direction);
        Ok(())
    }

    pub fn check_targets(&self) -> Result<(), ReactorError> {
        match self
            .slots
            .iter()
            .find(|s| s.reaction.enabled() && !s.reaction.has_target())
        {
            Some(slot) => Err(ReactorError::MissingTarget {
                reaction: slot.name.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn play_from_progress(&mut self, progress: f32) {
        self.collect();
        if !self.is_active() {
            self.register_callbacks();
        }
        self.fan_out(|r| r.play_from_progress(progress));
    }

    pub fn play_to_progress(&mut self, progress: f32) {
        self.collect();
        if !self.is_active() {
            self.register_callbacks();
        }
        self.fan_out(|r| r.play_to_progress(progress));
    }

    pub fn set_progress_at(&mut self, progress: f32) {
        self.fan_out(|r| r.set_progress_at(progress));
    }

    pub fn pause(&mut self) {
        self.fan_out(AnyReaction::pause);
    }

    pub fn resume(&mut self) {
        self.fan_out(AnyReaction::resume);
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn reverse(&mut self) {
        self.fan_out(AnyReaction::reverse);
    }

    pub fn stop(&mut self) {
        self.fan_out(AnyReaction::stop);
    }

    pub fn finish(&mut self) {
        self.fan_out(AnyReaction::finish);
    }

    pub fn rewind(&mut self) {
        self.fan_out(AnyReaction::rewind);
    }

    /// Re-derive from/to on every enabled reaction without playing.
    pub fn update_values(&mut self) {
        self.fan_out(AnyReaction::update_values);
    }

    /// Advance enabled reactions, in registration order, by one host tick.
    pub fn advance(&mut self, delta: &TickDelta) {
        self.fan_out(|r| r.advance(delta));
    }

    pub(crate) fn set_record_events(&mut self, record: bool) {
        self.record_events = record;
        if !record {
            self.events.clear();
        }
    }

    pub(crate) fn take_events(&mut self) -> Vec<AnimationEvent> {
        std::mem::take(&mut self.events)
    }

    fn enabled(&self) -> impl Iterator<Item = &AnyReaction> {
        self.slots
            .iter()
            .map(|s| &s.reaction)
            .filter(|r| r.enabled())
    }

    fn fan_out(&mut self, mut f: impl FnMut(&mut AnyReaction)) {
        for slot in self.slots.iter_mut() {
            if slot.reaction.enabled() {
                f(&mut slot.reaction);
            }
        }
        self.collect();
    }

    /// Drain child events into the barrier, reconcile disabled children, then
    /// fire whatever became due.
    fn collect(&mut self) {
        for slot in self.slots.iter_mut() {
            for event in slot.reaction.take_events() {
                match event {
                    ReactionEvent::Start => slot.in_cycle = true,
                    ReactionEvent::Stop => slot.in_cycle = false,
                    _ => {}
                }
                self.barrier.record(event);
            }
            if slot.in_cycle && !slot.reaction.enabled() {
                debug!(
                    "animation '{}': '{}' disabled mid-cycle, withdrawn",
                    self.name, slot.name
                );
                slot.reaction.halt();
                slot.in_cycle = false;
                self.barrier.withdraw();
            }
        }
        self.fire_due();
    }

    fn fire_due(&mut self) {
        let signals = self.barrier.poll();
        if signals.play {
            debug!("animation '{}' played", self.name);
            self.emit(AnimationEvent::Played);
        }
        if signals.stop {
            debug!("animation '{}' stopped", self.name);
            self.emit(AnimationEvent::Stopped);
        }
        if signals.finish {
            debug!("animation '{}' finished", self.name);
            self.emit(AnimationEvent::Finished);
        }
    }

    fn emit(&mut self, event: AnimationEvent) {
        if self.record_events {
            self.events.push(event);
        }
        match event {
            AnimationEvent::Played => self.on_play.invoke(()),
            AnimationEvent::Stopped => self.on_stop.invoke(()),
            AnimationEvent::Finished => self.on_finish.invoke(()),
        }
    }
}

macro_rules! typed_access {
    ($ty:ty, $kind:ident, $as_ref:ident, $as_mut:ident, $get:ident, $get_mut:ident) => {
        impl Animation {
            pub fn $get(&self, name: &str) -> Result<&Reaction<$ty>, ReactorError> {
                let any = self
                    .reaction(name)
                    .ok_or_else(|| ReactorError::ReactionNotFound {
                        name: name.to_string(),
                    })?;
                let actual = any.kind();
                any.$as_ref().ok_or_else(|| ReactorError::ChannelMismatch {
                    name: name.to_string(),
                    expected: ChannelKind::$kind.to_string(),
                    actual: actual.to_string(),
                })
            }

            pub fn $get_mut(&mut self, name: &str) -> Result<&mut Reaction<$ty>, ReactorError> {
                let any = self
                    .reaction_mut(name)
                    .ok_or_else(|| ReactorError::ReactionNotFound {
                        name: name.to_string(),
                    })?;
                let actual = any.kind();
                any.$as_mut().ok_or_else(|| ReactorError::ChannelMismatch {
                    name: name.to_string(),
                    expected: ChannelKind::$kind.to_string(),
                    actual: actual.to_string(),
                })
            }
        }
    };
}

typed_access!(f32, Float, as_float, as_float_mut, float, float_mut);
typed_access!(i32, Int, as_int, as_int_mut, int, int_mut);
typed_access!(Vec2, Vec2, as_vec2, as_vec2_mut, vec2, vec2_mut);
typed_access!(Vec3, Vec3, as_vec3, as_vec3_mut, vec3, vec3_mut);
typed_access!(Color, Color, as_color, as_color_mut, color, color_mut);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ReactionSettings;

    fn scalar(duration: f32) -> Reaction<f32> {
        Reaction::between(0.0, 1.0, ReactionSettings::new(duration)).unwrap()
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut anim = Animation::new("a");
        anim.add_reaction("x", scalar(1.0)).unwrap();
        assert!(matches!(
            anim.add_reaction("x", scalar(1.0)),
            Err(ReactorError::DuplicateReaction { .. })
        ));
    }

    #[test]
    fn typed_access_checks_channel() {
        let anim = Animation::new("a").with_reaction("x", scalar(1.0)).unwrap();
        assert!(anim.float("x").is_ok());
        assert!(matches!(
            anim.vec3("x"),
            Err(ReactorError::ChannelMismatch { .. })
        ));
        assert!(matches!(
            anim.float("y"),
            Err(ReactorError::ReactionNotFound { .. })
        ));
    }

    #[test]
    fn try_play_requires_targets() {
        let mut anim = Animation::new("a").with_reaction("x", scalar(1.0)).unwrap();
        assert!(matches!(
            anim.try_play(PlayDirection::Forward),
            Err(ReactorError::MissingTarget { .. })
        ));
        assert!(!anim.is_active());
    }

    #[test]
    fn progress_is_mean_of_enabled() {
        let mut anim = Animation::new("a")
            .with_reaction("fast", scalar(1.0))
            .unwrap()
            .with_reaction("slow", scalar(2.0))
            .unwrap();
        anim.play(PlayDirection::Forward);
        anim.advance(&TickDelta::uniform(0.5));
        assert!((anim.progress() - 0.375).abs() < 1e-5);
    }
}
