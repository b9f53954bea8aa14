//! Drag-to-swipe decisions for the candidate card.
//!
//! A gesture is `Idle -> Dragging -> Idle`. The decision is made once, at
//! release, from the cumulative horizontal offset; nothing is decided mid-drag.

use serde::{Deserialize, Serialize};

/// Horizontal distance a drag must exceed to count as a decision.
pub const SWIPE_THRESHOLD: f64 = 100.0;

/// Offset past which the accept/reject stamps become visible.
pub const AFFORDANCE_THRESHOLD: f64 = 50.0;

const OPACITY_FALLOFF: f64 = 500.0;
const MIN_OPACITY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    pub fn is_like(&self) -> bool {
        matches!(self, SwipeDirection::Right)
    }
}

/// Decision for a drag released at `offset`, if any.
pub fn decide(offset: f64) -> Option<SwipeDirection> {
    if offset.abs() > SWIPE_THRESHOLD {
        Some(if offset > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        })
    } else {
        None
    }
}

/// Card tilt in degrees.
pub fn rotation_degrees(offset: f64) -> f64 {
    offset / 10.0
}

/// Card opacity, fading linearly from 1.0 down to a floor of 0.5.
pub fn opacity(offset: f64) -> f64 {
    (1.0 - offset.abs() / OPACITY_FALLOFF).max(MIN_OPACITY)
}

pub fn shows_reject(offset: f64) -> bool {
    offset < -AFFORDANCE_THRESHOLD
}

pub fn shows_accept(offset: f64) -> bool {
    offset > AFFORDANCE_THRESHOLD
}

/// Everything the card needs to draw itself for a given drag offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardVisuals {
    pub offset: f64,
    pub rotation: f64,
    pub opacity: f64,
    pub reject_visible: bool,
    pub accept_visible: bool,
}

impl CardVisuals {
    pub fn from_offset(offset: f64) -> Self {
        Self {
            offset,
            rotation: rotation_degrees(offset),
            opacity: opacity(offset),
            reject_visible: shows_reject(offset),
            accept_visible: shows_accept(offset),
        }
    }
}

/// Local state of one drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SwipeGesture {
    #[default]
    Idle,
    Dragging { start: f64, offset: f64 },
}

impl SwipeGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer pressed at `x`.
    pub fn begin(&mut self, x: f64) {
        *self = SwipeGesture::Dragging {
            start: x,
            offset: 0.0,
        };
    }

    /// Pointer moved to `x`. Ignored unless a drag is in progress.
    pub fn move_to(&mut self, x: f64) {
        if let SwipeGesture::Dragging { start, offset } = self {
            *offset = x - *start;
        }
    }

    /// Pointer released (or left the card). Always returns to idle.
    pub fn release(&mut self) -> Option<SwipeDirection> {
        let decision = match *self {
            SwipeGesture::Dragging { offset, .. } => decide(offset),
            SwipeGesture::Idle => None,
        };
        *self = SwipeGesture::Idle;
        decision
    }

    pub fn offset(&self) -> f64 {
        match self {
            SwipeGesture::Dragging { offset, .. } => *offset,
            SwipeGesture::Idle => 0.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, SwipeGesture::Dragging { .. })
    }

    pub fn visuals(&self) -> CardVisuals {
        CardVisuals::from_offset(self.offset())
    }
}
