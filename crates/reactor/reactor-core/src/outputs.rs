//! Output contracts from the reactor.
//!
//! The reactor does not write host state itself beyond what targets do; it
//! reports the semantic events of one `advance` (or lifecycle call) so hosts
//! can route them without registering closures.

use serde::{Deserialize, Serialize};

use crate::ids::{AnimationId, ReactionId};
use crate::reaction::ReactionEvent;

/// Aggregate signals of an animation's play cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationEvent {
    Played,
    Stopped,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ReactorEvent {
    Animation {
        animation: AnimationId,
        name: String,
        event: AnimationEvent,
    },
    /// Signals of reactions registered standalone (not inside an animation).
    Reaction {
        reaction: ReactionId,
        event: ReactionEvent,
    },
}

/// Events collected by the reactor since the last `advance`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<ReactorEvent>,
    /// Events dropped because `max_events_per_tick` was reached.
    #[serde(default)]
    pub dropped_events: usize,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped_events = 0;
    }

    #[inline]
    pub fn push_event(&mut self, event: ReactorEvent, cap: usize) {
        if self.events.len() < cap {
            self.events.push(event);
        } else {
            self.dropped_events += 1;
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Aggregate events of one animation, in emission order.
    pub fn animation_events(&self, id: AnimationId) -> Vec<AnimationEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReactorEvent::Animation {
                    animation, event, ..
                } if *animation == id => Some(*event),
                _ => None,
            })
            .collect()
    }

    /// Events of one standalone reaction, in emission order.
    pub fn reaction_events(&self, id: ReactionId) -> Vec<ReactionEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReactorEvent::Reaction { reaction, event } if *reaction == id => Some(*event),
                _ => None,
            })
            .collect()
    }
}
