//! Page navigation state machine.
//!
//! The navigator is `Idle` or `Transitioning`. A request is only accepted
//! while idle; the accepted transition records its target and a due time,
//! and the page changes when the caller reports that the settle delay has
//! elapsed. Requests arriving mid-flip are dropped, never queued, so at most
//! one transition exists at any time.

use log::debug;

use crate::catalog::Catalog;
use crate::config::BookConfig;
use crate::input::{InputEvent, NavCommand};
use crate::motif::Motif;
use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

/// An accepted page flip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    /// Instant at which `to` becomes the current page.
    pub due_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Transitioning(Transition),
}

/// Observable navigation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationState {
    /// Page being shown; during a flip this is still the page being left.
    pub current_page: usize,
    pub is_transitioning: bool,
    /// Direction of the most recent flip (`Forward` before the first one).
    pub direction: Direction,
}

/// Outcome of routing one input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Handled {
    /// The shell should suppress the event's default behaviour.
    pub consumed: bool,
    pub transition: Option<Transition>,
}

pub struct Navigator {
    /// `N`: pages are `0..=last_page`, 0 being the cover.
    last_page: usize,
    current: usize,
    direction: Direction,
    phase: Phase,
    settle_delay_ms: f64,
    swipe_threshold: f32,
}

impl Navigator {
    pub fn new(page_count: usize, config: &BookConfig) -> Self {
        Self {
            last_page: page_count,
            current: 0,
            direction: Direction::Forward,
            phase: Phase::Idle,
            settle_delay_ms: config.settle_delay_ms,
            swipe_threshold: config.swipe_threshold,
        }
    }

    pub fn for_catalog(catalog: &Catalog, config: &BookConfig) -> Self {
        Self::new(catalog.len(), config)
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Number of movement pages, `N`.
    pub fn page_count(&self) -> usize {
        self.last_page
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning(_))
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending(&self) -> Option<Transition> {
        match self.phase {
            Phase::Idle => None,
            Phase::Transitioning(t) => Some(t),
        }
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            current_page: self.current,
            is_transitioning: self.is_transitioning(),
            direction: self.direction,
        }
    }

    pub fn advance(&mut self, now_ms: f64) -> Option<Transition> {
        if self.current >= self.last_page {
            debug!("nav: advance ignored at last page={}", self.current);
            return None;
        }
        self.begin(self.current + 1, now_ms)
    }

    pub fn retreat(&mut self, now_ms: f64) -> Option<Transition> {
        if self.current == 0 {
            debug!("nav: retreat ignored at cover");
            return None;
        }
        self.begin(self.current - 1, now_ms)
    }

    /// Flip straight to `target`, skipping intermediate pages. Out-of-range
    /// targets and the current page are rejected without touching state.
    pub fn jump_to(&mut self, target: usize, now_ms: f64) -> Option<Transition> {
        if target > self.last_page {
            debug!("nav: jump ignored target={} out of range 0..={}", target, self.last_page);
            return None;
        }
        if target == self.current {
            debug!("nav: jump ignored target={} is current", target);
            return None;
        }
        self.begin(target, now_ms)
    }

    pub fn execute(&mut self, command: NavCommand, now_ms: f64) -> Option<Transition> {
        match command {
            NavCommand::Advance => self.advance(now_ms),
            NavCommand::Retreat => self.retreat(now_ms),
            NavCommand::JumpTo(page) => self.jump_to(page, now_ms),
            NavCommand::JumpToEnd => self.jump_to(self.last_page, now_ms),
        }
    }

    /// Route an input event. Mapped keys are consumed even when the flip is
    /// rejected, including mid-flip: a held arrow key would otherwise scroll
    /// the page under the book until the flip settles. Earlier builds let
    /// such keys through while flipping; this is a deliberate change.
    pub fn handle(&mut self, event: InputEvent, now_ms: f64) -> Handled {
        let (consumed, command) = match event {
            InputEvent::Key(key) => (true, Some(key.command())),
            InputEvent::Swipe(gesture) => (false, gesture.classify(self.swipe_threshold)),
            InputEvent::Click(control) => (false, Some(control.command())),
        };
        let transition = command.and_then(|c| self.execute(c, now_ms));
        Handled {
            consumed,
            transition,
        }
    }

    /// Apply the in-flight transition if its settle delay has elapsed.
    /// Returns the new current page when it changed.
    pub fn tick(&mut self, now_ms: f64) -> Option<usize> {
        match self.phase {
            Phase::Transitioning(t) if now_ms >= t.due_ms => self.complete_pending(),
            _ => None,
        }
    }

    /// Apply the in-flight transition now. Used by a timer that fires
    /// exactly when the settle delay ends.
    pub fn complete_pending(&mut self) -> Option<usize> {
        let Phase::Transitioning(t) = self.phase else {
            return None;
        };
        self.current = t.to;
        self.phase = Phase::Idle;
        debug!("nav: settled page={}", self.current);
        Some(self.current)
    }

    /// Motif of the page currently shown; the cover has none.
    pub fn active_motif(&self, catalog: &Catalog) -> Option<Motif> {
        catalog.track(self.current).map(|t| t.motif)
    }

    pub fn theme(&self, catalog: &Catalog) -> Theme {
        catalog
            .track(self.current)
            .map(|t| t.theme.clone())
            .unwrap_or_else(Theme::cover)
    }

    fn begin(&mut self, target: usize, now_ms: f64) -> Option<Transition> {
        if let Phase::Transitioning(t) = self.phase {
            debug!(
                "nav: request to={} dropped, flip {}->{} in flight",
                target, t.from, t.to
            );
            return None;
        }
        let direction = if target > self.current {
            Direction::Forward
        } else {
            Direction::Backward
        };
        let transition = Transition {
            from: self.current,
            to: target,
            direction,
            due_ms: now_ms + self.settle_delay_ms,
        };
        debug!(
            "nav: {} accepted from={} to={}",
            direction.as_str(),
            transition.from,
            transition.to
        );
        self.direction = direction;
        self.phase = Phase::Transitioning(transition);
        Some(transition)
    }
}
