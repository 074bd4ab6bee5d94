//! Pan gesture recognition
//!
//! Converts raw pointer samples into [`GestureEvent`]s carrying cumulative
//! translation and a smoothed velocity, the same data a platform pan
//! recognizer hands to its target.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::events::{GestureEvent, GesturePhase};
use crate::geometry::{Point2, Vec2};

/// Smoothing factor for the velocity moving average
const VELOCITY_ALPHA: f32 = 0.3;

/// Samples further apart than this (seconds) don't contribute to velocity
const MAX_SAMPLE_GAP: f32 = 0.5;

/// Assumed frame rate for the first move after pointer-down
const FIRST_SAMPLE_FPS: f32 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A raw pointer sample; `timestamp` is in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub kind: PointerKind,
    pub position: Point2,
    pub timestamp: f64,
}

impl PointerSample {
    pub fn down(position: Point2, timestamp: f64) -> Self {
        Self {
            kind: PointerKind::Down,
            position,
            timestamp,
        }
    }

    pub fn moved(position: Point2, timestamp: f64) -> Self {
        Self {
            kind: PointerKind::Move,
            position,
            timestamp,
        }
    }

    pub fn up(position: Point2, timestamp: f64) -> Self {
        Self {
            kind: PointerKind::Up,
            position,
            timestamp,
        }
    }

    pub fn cancel(position: Point2, timestamp: f64) -> Self {
        Self {
            kind: PointerKind::Cancel,
            position,
            timestamp,
        }
    }
}

/// Tracks one pointer and reports pan gesture phases
#[derive(Clone, Debug, Default)]
pub struct PanRecognizer {
    /// Minimum distance before the pan begins
    slop: f32,
    start: Option<Point2>,
    last_position: Point2,
    last_time: Option<f64>,
    velocity: Vec2,
    recognized: bool,
}

impl PanRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the pointer to travel `slop` units before the pan begins
    pub fn with_slop(mut self, slop: f32) -> Self {
        self.slop = slop.max(0.0);
        self
    }

    /// Whether a pan is currently recognized
    pub fn is_active(&self) -> bool {
        self.recognized
    }

    /// Current smoothed velocity (units per second)
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Feed a pointer sample; returns a gesture event once the pan is recognized
    pub fn handle(&mut self, sample: PointerSample) -> Option<GestureEvent> {
        match sample.kind {
            PointerKind::Down => {
                self.reset();
                self.start = Some(sample.position);
                self.last_position = sample.position;
                None
            }
            PointerKind::Move => {
                let start = self.start?;
                self.track_velocity(sample);

                let translation = sample.position - start;
                let phase = if self.recognized {
                    GesturePhase::Changed
                } else if translation != Vec2::ZERO && translation.length() >= self.slop {
                    self.recognized = true;
                    GesturePhase::Began
                } else {
                    return None;
                };

                Some(self.event(phase, translation, sample))
            }
            PointerKind::Up | PointerKind::Cancel => {
                let start = self.start?;
                if !self.recognized {
                    tracing::trace!("pointer released before pan was recognized");
                    self.reset();
                    return None;
                }

                // A pointer that rested before lifting has no release momentum
                if let Some(last) = self.last_time {
                    if ((sample.timestamp - last) / 1000.0) as f32 >= MAX_SAMPLE_GAP {
                        self.velocity = Vec2::ZERO;
                    }
                }

                let phase = if sample.kind == PointerKind::Up {
                    GesturePhase::Ended
                } else {
                    GesturePhase::Cancelled
                };
                let event = self.event(phase, sample.position - start, sample);
                self.reset();
                Some(event)
            }
        }
    }

    /// Feed a batch of samples, collecting the gesture events they produce
    pub fn handle_all<I>(&mut self, samples: I) -> SmallVec<[GestureEvent; 8]>
    where
        I: IntoIterator<Item = PointerSample>,
    {
        samples
            .into_iter()
            .filter_map(|sample| self.handle(sample))
            .collect()
    }

    fn track_velocity(&mut self, sample: PointerSample) {
        let delta = sample.position - self.last_position;

        if let Some(last_time) = self.last_time {
            let dt_seconds = ((sample.timestamp - last_time) / 1000.0) as f32;
            if dt_seconds > 0.0 && dt_seconds < MAX_SAMPLE_GAP {
                let instant = delta * (1.0 / dt_seconds);
                self.velocity =
                    self.velocity * (1.0 - VELOCITY_ALPHA) + instant * VELOCITY_ALPHA;
            }
        } else {
            self.velocity = delta * FIRST_SAMPLE_FPS;
        }

        self.last_time = Some(sample.timestamp);
        self.last_position = sample.position;
    }

    fn event(
        &self,
        phase: GesturePhase,
        translation: Vec2,
        sample: PointerSample,
    ) -> GestureEvent {
        GestureEvent::new(phase, translation, self.velocity, sample.position).at(sample.timestamp)
    }

    fn reset(&mut self) {
        self.start = None;
        self.last_time = None;
        self.velocity = Vec2::ZERO;
        self.recognized = false;
    }
}
