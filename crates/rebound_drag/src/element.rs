//! The draggable element and the ways it can be moved

use rebound_core::{Point2, Rect, Transform, Vec2};
use serde::{Deserialize, Serialize};

/// The geometry of something that can be dragged
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DragElement {
    /// Untransformed frame in parent coordinates
    pub frame: Rect,
    /// Render transform applied on top of the frame
    #[serde(default)]
    pub transform: Transform,
}

impl DragElement {
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            transform: Transform::IDENTITY,
        }
    }

    pub fn center(&self) -> Point2 {
        self.frame.center()
    }

    pub fn set_center(&mut self, center: Point2) {
        self.frame.set_center(center);
    }

    /// Where the element appears on screen (frame origin plus transform)
    pub fn presented_origin(&self) -> Point2 {
        self.transform.apply(self.frame.origin)
    }
}

/// How a drag moves the element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    /// Reposition the frame; rests at the origin it had when attached
    #[default]
    Position,
    /// Translate through the transform; rests at identity
    Transform,
}

impl DragMode {
    /// The animatable value this mode drives
    pub fn value(&self, element: &DragElement) -> Vec2 {
        match self {
            DragMode::Position => element.frame.origin.to_vec(),
            DragMode::Transform => element.transform.translation,
        }
    }

    pub fn apply(&self, element: &mut DragElement, value: Vec2) {
        match self {
            DragMode::Position => element.frame.origin = Point2::from_vec(value),
            DragMode::Transform => element.transform.translation = value,
        }
    }

    /// The value this mode returns to after a release
    pub fn rest_value(&self, element: &DragElement) -> Vec2 {
        match self {
            DragMode::Position => element.frame.origin.to_vec(),
            DragMode::Transform => Transform::IDENTITY.translation,
        }
    }
}
