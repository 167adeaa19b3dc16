//! Identifiers and a simple allocator for reactor-owned entities.

use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ReactionId(pub u32);

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "animation#{}", self.0)
    }
}

impl fmt::Display for ReactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reaction#{}", self.0)
    }
}

/// Monotonic allocator. Ids are never reused within one reactor, so a stale
/// id cannot address a newer entity.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_animation: u32,
    next_reaction: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_animation(&mut self) -> AnimationId {
        let id = AnimationId(self.next_animation);
        self.next_animation = self.next_animation.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_reaction(&mut self) -> ReactionId {
        let id = ReactionId(self.next_reaction);
        self.next_reaction = self.next_reaction.wrapping_add(1);
        id
    }
}
