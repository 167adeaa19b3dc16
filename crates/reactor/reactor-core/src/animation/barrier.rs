//! Join barrier over a play cycle's child reactions.
//!
//! Counts, not indices: the aggregate fires Play on the first started child,
//! Stop once every started child stopped, Finish once every started child
//! finished. Each fires at most once per cycle.

use crate::reaction::ReactionEvent;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Barrier {
    started: usize,
    stopped: usize,
    finished: usize,
    play_invoked: bool,
    stop_invoked: bool,
    finish_invoked: bool,
}

/// Which aggregate signals became due on the last poll.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Signals {
    pub play: bool,
    pub stop: bool,
    pub finish: bool,
}

impl Signals {
    #[inline]
    pub fn any(&self) -> bool {
        self.play || self.stop || self.finish
    }
}

impl Barrier {
    /// Start a new cycle.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record(&mut self, event: ReactionEvent) {
        match event {
            ReactionEvent::Start => self.started += 1,
            ReactionEvent::Stop => self.stopped += 1,
            ReactionEvent::Finish => self.finished += 1,
            ReactionEvent::Play
            | ReactionEvent::Loop
            | ReactionEvent::Pause
            | ReactionEvent::Resume => {}
        }
    }

    /// Drop a started-but-unstopped child from the cycle.
    pub fn withdraw(&mut self) {
        self.started = self.started.saturating_sub(1);
    }

    pub fn poll(&mut self) -> Signals {
        let mut signals = Signals::default();
        if self.started == 0 {
            return signals;
        }
        if !self.play_invoked {
            self.play_invoked = true;
            signals.play = true;
        }
        if !self.stop_invoked && self.stopped >= self.started {
            self.stop_invoked = true;
            signals.stop = true;
        }
        if !self.finish_invoked && self.finished >= self.started {
            self.finish_invoked = true;
            signals.finish = true;
        }
        signals
    }

    #[inline]
    pub fn started(&self) -> usize {
        self.started
    }

    #[inline]
    pub fn stopped(&self) -> usize {
        self.stopped
    }

    #[inline]
    pub fn finished(&self) -> usize {
        self.finished
    }
}
