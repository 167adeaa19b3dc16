//! Reactor: owns animations and standalone reactions and advances them once
//! per host tick.
//!
//! Methods:
//! - new, add_animation, load_animation_json, add_reaction, remove_*, advance (→ Outputs)

use log::{debug, warn};

use crate::animation::Animation;
use crate::any_reaction::AnyReaction;
use crate::config::Config;
use crate::error::ReactorError;
use crate::ids::{AnimationId, IdAllocator, ReactionId};
use crate::outputs::{Outputs, ReactorEvent};
use crate::stored_animation::StoredAnimation;
use crate::time::TickDelta;

#[derive(Debug)]
pub struct Reactor {
    cfg: Config,
    ids: IdAllocator,
    animations: Vec<(AnimationId, Animation)>,
    reactions: Vec<(ReactionId, AnyReaction)>,

    // Per-tick outputs
    outputs: Outputs,
}

impl Default for Reactor {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Reactor {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            animations: Vec::new(),
            reactions: Vec::new(),
            outputs: Outputs::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Take ownership of an animation. Its aggregate events are reported in
    /// [`Outputs`] from now on.
    pub fn add_animation(&mut self, mut animation: Animation) -> AnimationId {
        let id = self.ids.alloc_animation();
        animation.set_record_events(true);
        debug!("reactor: added {} '{}'", id, animation.name);
        self.animations.push((id, animation));
        id
    }

    /// Parse a JSON preset and register the resulting animation. Reactions
    /// whose settings omit a timescale use `Config::default_timescale`.
    pub fn load_animation_json(&mut self, json: &str) -> Result<AnimationId, ReactorError> {
        let stored = StoredAnimation::from_json(json)?;
        let animation = stored.build(self.cfg.default_timescale)?;
        Ok(self.add_animation(animation))
    }

    /// Register a reaction outside any animation. Its own events are reported
    /// in [`Outputs`].
    pub fn add_reaction(&mut self, reaction: impl Into<AnyReaction>) -> ReactionId {
        let id = self.ids.alloc_reaction();
        let mut reaction = reaction.into();
        reaction.set_record_events(true);
        debug!("reactor: added {} ({})", id, reaction.kind());
        self.reactions.push((id, reaction));
        id
    }

    pub fn remove_animation(&mut self, id: AnimationId) -> Result<Animation, ReactorError> {
        let idx = self
            .animations
            .iter()
            .position(|(a, _)| *a == id)
            .ok_or(ReactorError::AnimationNotFound { id: id.0 })?;
        let (_, mut animation) = self.animations.remove(idx);
        animation.set_record_events(false);
        Ok(animation)
    }

    pub fn remove_reaction(&mut self, id: ReactionId) -> Result<AnyReaction, ReactorError> {
        let idx = self
            .reactions
            .iter()
            .position(|(r, _)| *r == id)
            .ok_or(ReactorError::StandaloneReactionNotFound { id: id.0 })?;
        let (_, mut reaction) = self.reactions.remove(idx);
        reaction.set_record_events(false);
        Ok(reaction)
    }

    pub fn animation(&self, id: AnimationId) -> Option<&Animation> {
        self.animations
            .iter()
            .find_map(|(a, anim)| if *a == id { Some(anim) } else { None })
    }

    pub fn animation_mut(&mut self, id: AnimationId) -> Option<&mut Animation> {
        self.animations
            .iter_mut()
            .find_map(|(a, anim)| if *a == id { Some(anim) } else { None })
    }

    pub fn reaction(&self, id: ReactionId) -> Option<&AnyReaction> {
        self.reactions
            .iter()
            .find_map(|(r, reaction)| if *r == id { Some(reaction) } else { None })
    }

    pub fn reaction_mut(&mut self, id: ReactionId) -> Option<&mut AnyReaction> {
        self.reactions
            .iter_mut()
            .find_map(|(r, reaction)| if *r == id { Some(reaction) } else { None })
    }

    /// Like [`animation_mut`](Self::animation_mut) for callers that propagate.
    pub fn try_animation_mut(&mut self, id: AnimationId) -> Result<&mut Animation, ReactorError> {
        self.animation_mut(id)
            .ok_or(ReactorError::AnimationNotFound { id: id.0 })
    }

    pub fn try_reaction_mut(&mut self, id: ReactionId) -> Result<&mut AnyReaction, ReactorError> {
        self.reaction_mut(id)
            .ok_or(ReactorError::StandaloneReactionNotFound { id: id.0 })
    }

    pub fn animation_ids(&self) -> impl Iterator<Item = AnimationId> + '_ {
        self.animations.iter().map(|(id, _)| *id)
    }

    pub fn reaction_ids(&self) -> impl Iterator<Item = ReactionId> + '_ {
        self.reactions.iter().map(|(id, _)| *id)
    }

    /// True while any owned animation or standalone reaction is active.
    pub fn is_active(&self) -> bool {
        self.animations.iter().any(|(_, a)| a.is_active())
            || self.reactions.iter().any(|(_, r)| r.is_active())
    }

    /// Advance everything by one host tick and report the events emitted
    /// since the previous tick, lifecycle calls made in between included.
    ///
    /// Standalone reactions advance first, then animations, each in
    /// registration order.
    pub fn advance(&mut self, delta: TickDelta) -> &Outputs {
        self.outputs.clear();

        let mut delta = delta;
        if let Some(max) = self.cfg.max_delta {
            if delta.scaled > max || delta.unscaled > max {
                warn!(
                    "reactor: clamping hitch delta ({}s scaled, {}s unscaled) to {}s",
                    delta.scaled, delta.unscaled, max
                );
                delta = delta.clamped(max);
            }
        }

        for (_, reaction) in self.reactions.iter_mut() {
            reaction.advance(&delta);
        }
        for (_, animation) in self.animations.iter_mut() {
            animation.advance(&delta);
        }

        self.collect();
        &self.outputs
    }

    /// Report events from lifecycle calls made since the last tick without
    /// advancing time.
    pub fn flush_events(&mut self) -> &Outputs {
        self.outputs.clear();
        self.collect();
        &self.outputs
    }

    /// Outputs of the last `advance` or `flush_events`.
    #[inline]
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    fn collect(&mut self) {
        let cap = self.cfg.max_events_per_tick;
        for (id, reaction) in self.reactions.iter_mut() {
            for event in reaction.take_events() {
                self.outputs
                    .push_event(ReactorEvent::Reaction { reaction: *id, event }, cap);
            }
        }
        for (id, animation) in self.animations.iter_mut() {
            for event in animation.take_events() {
                self.outputs.push_event(
                    ReactorEvent::Animation {
                        animation: *id,
                        name: animation.name.clone(),
                        event,
                    },
                    cap,
                );
            }
        }
        if self.outputs.dropped_events > 0 {
            warn!(
                "reactor: dropped {} events over max_events_per_tick ({})",
                self.outputs.dropped_events, cap
            );
        }
    }
}
