//! Gesture event model
//!
//! Platform-agnostic pan gestures. A platform recognizer (or the
//! [`PanRecognizer`](crate::gesture::PanRecognizer) in this crate) produces
//! samples; consumers read them through [`GestureSource`].

use serde::{Deserialize, Serialize};

use crate::geometry::{Point2, Vec2};

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// Drag recognized (pointer moved past slop)
    pub const DRAG_BEGIN: EventType = 1;
    /// Drag update
    pub const DRAG: EventType = 2;
    /// Drag ended or was cancelled
    pub const DRAG_END: EventType = 3;
    /// A release animation settled at its target
    pub const ANIMATION_END: EventType = 4;
}

/// Lifecycle phase of a continuous gesture
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// Pointer is down but the gesture is not recognized yet
    #[default]
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    /// Recognition failed; nothing should react
    Failed,
}

impl GesturePhase {
    /// The drag event this phase maps to, if any
    pub fn event_type(&self) -> Option<EventType> {
        match self {
            GesturePhase::Began => Some(event_types::DRAG_BEGIN),
            GesturePhase::Changed => Some(event_types::DRAG),
            GesturePhase::Ended | GesturePhase::Cancelled => Some(event_types::DRAG_END),
            GesturePhase::Possible | GesturePhase::Failed => None,
        }
    }
}

/// Read access to the current state of a pan gesture.
///
/// Translation is cumulative since the gesture started, velocity is in
/// units per second, and location is the pointer position; all in the
/// dragged element's parent coordinates.
pub trait GestureSource {
    fn phase(&self) -> GesturePhase;

    fn translation(&self) -> Vec2;

    fn velocity(&self) -> Vec2;

    fn location(&self) -> Point2;
}

/// A single pan gesture sample
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    #[serde(default)]
    pub translation: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
    #[serde(default)]
    pub location: Point2,
    /// Milliseconds, monotonic
    #[serde(default)]
    pub timestamp: f64,
}

impl GestureEvent {
    pub fn new(phase: GesturePhase, translation: Vec2, velocity: Vec2, location: Point2) -> Self {
        Self {
            phase,
            translation,
            velocity,
            location,
            timestamp: 0.0,
        }
    }

    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl GestureSource for GestureEvent {
    fn phase(&self) -> GesturePhase {
        self.phase
    }

    fn translation(&self) -> Vec2 {
        self.translation
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn location(&self) -> Point2 {
        self.location
    }
}

impl<T: GestureSource + ?Sized> GestureSource for &T {
    fn phase(&self) -> GesturePhase {
        (**self).phase()
    }

    fn translation(&self) -> Vec2 {
        (**self).translation()
    }

    fn velocity(&self) -> Vec2 {
        (**self).velocity()
    }

    fn location(&self) -> Point2 {
        (**self).location()
    }
}
