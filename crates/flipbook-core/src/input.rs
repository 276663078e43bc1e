//! Input sources and their mapping onto navigation commands.
//!
//! Every source is reduced to a [`NavCommand`] here; whether the command is
//! allowed to run is decided only by the navigator.

use glam::Vec2;

/// What an input asks the navigator to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavCommand {
    Advance,
    Retreat,
    JumpTo(usize),
    /// Jump to the last page, whatever `N` is.
    JumpToEnd,
}

/// Keys the book responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowDown,
    Space,
    ArrowLeft,
    ArrowUp,
    Home,
    End,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value. Unhandled keys return `None` and
    /// must keep their default browser behaviour.
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowDown" => Some(Key::ArrowDown),
            " " | "Spacebar" => Some(Key::Space),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowUp" => Some(Key::ArrowUp),
            "Home" => Some(Key::Home),
            "End" => Some(Key::End),
            _ => None,
        }
    }

    pub fn command(self) -> NavCommand {
        match self {
            Key::ArrowRight | Key::ArrowDown | Key::Space => NavCommand::Advance,
            Key::ArrowLeft | Key::ArrowUp => NavCommand::Retreat,
            Key::Home => NavCommand::JumpTo(0),
            Key::End => NavCommand::JumpToEnd,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarginSide {
    Left,
    Right,
}

/// Clickable navigation controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Prev,
    Next,
    /// Page dot for page `i` (0 is the cover).
    Dot(usize),
    Margin(MarginSide),
}

impl Control {
    pub fn command(self) -> NavCommand {
        match self {
            Control::Prev | Control::Margin(MarginSide::Left) => NavCommand::Retreat,
            Control::Next | Control::Margin(MarginSide::Right) => NavCommand::Advance,
            Control::Dot(page) => NavCommand::JumpTo(page),
        }
    }
}

/// A finished touch interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeGesture {
    pub start: Vec2,
    pub end: Vec2,
}

impl SwipeGesture {
    /// Horizontal-dominant drags longer than `threshold` navigate: dragging
    /// left (content moves toward the next page) advances, dragging right
    /// retreats. Everything else is ignored.
    pub fn classify(&self, threshold: f32) -> Option<NavCommand> {
        let distance = self.start - self.end;
        let horizontal = distance.x.abs() > distance.y.abs();
        if !horizontal || distance.x.abs() <= threshold {
            return None;
        }
        if distance.x > 0.0 {
            Some(NavCommand::Advance)
        } else {
            Some(NavCommand::Retreat)
        }
    }
}

/// Accumulates a touch-start / touch-move / touch-end sequence.
#[derive(Clone, Debug, Default)]
pub struct SwipeTracker {
    start: Option<Vec2>,
    end: Option<Vec2>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.start = Some(Vec2::new(x, y));
        self.end = None;
    }

    pub fn touch_move(&mut self, x: f32, y: f32) {
        if self.start.is_some() {
            self.end = Some(Vec2::new(x, y));
        }
    }

    /// Consume the interaction. A tap (no move) produces no gesture.
    pub fn touch_end(&mut self) -> Option<SwipeGesture> {
        let start = self.start.take()?;
        let end = self.end.take()?;
        Some(SwipeGesture { start, end })
    }
}

/// Raw input after source-specific decoding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Key(Key),
    Swipe(SwipeGesture),
    Click(Control),
}
