//! Debug velocity overlay
//!
//! A marker dot that follows the pointer during a drag, and a text readout
//! of raw versus relative velocity.

use rebound_core::{Point2, Vec2};
use smallvec::SmallVec;

/// Marker dot radius in parent units
const MARKER_RADIUS: f32 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub center: Point2,
    pub radius: f32,
}

/// Format the velocity readout, values truncated to two decimals
pub fn format_readout(velocity: Vec2, relative: Vec2) -> String {
    format!(
        "Velocity X: {:.2}, Y: {:.2} \n Relative Velocity X: {:.2}, Y: {:.2}",
        truncate2(velocity.x),
        truncate2(velocity.y),
        truncate2(relative.x),
        truncate2(relative.y),
    )
}

/// Truncate toward zero at the second decimal; `+ 0.0` folds -0.0 into 0.0
fn truncate2(value: f32) -> f32 {
    (value * 100.0).trunc() / 100.0 + 0.0
}

#[derive(Clone, Debug, Default)]
pub struct VelocityOverlay {
    markers: SmallVec<[Marker; 1]>,
    readout: String,
    spawned: usize,
}

impl VelocityOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers currently shown
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn readout(&self) -> &str {
        &self.readout
    }

    /// Total markers created over the overlay's lifetime
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    /// Sweep any leftover marker, then place a fresh one at `location`
    pub fn begin(&mut self, location: Point2) {
        self.clear();
        self.markers.push(Marker {
            center: location,
            radius: MARKER_RADIUS,
        });
        self.spawned += 1;
    }

    pub fn track(&mut self, location: Point2) {
        for marker in self.markers.iter_mut() {
            marker.center = location;
        }
    }

    pub fn update_readout(&mut self, velocity: Vec2, relative: Vec2) {
        self.readout = format_readout(velocity, relative);
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_format() {
        let text = format_readout(Vec2::new(1234.5678, -98.761), Vec2::new(-2.0, 0.0));
        assert_eq!(
            text,
            "Velocity X: 1234.56, Y: -98.76 \n Relative Velocity X: -2.00, Y: 0.00"
        );
    }

    #[test]
    fn test_readout_truncates_toward_zero() {
        let text = format_readout(Vec2::new(0.999, -0.999), Vec2::new(-0.004, 0.0));
        assert_eq!(
            text,
            "Velocity X: 0.99, Y: -0.99 \n Relative Velocity X: 0.00, Y: 0.00"
        );
    }

    #[test]
    fn test_begin_sweeps_previous_marker() {
        let mut overlay = VelocityOverlay::new();

        overlay.begin(Point2::new(1.0, 1.0));
        overlay.begin(Point2::new(2.0, 2.0));
        overlay.begin(Point2::new(3.0, 3.0));

        assert_eq!(overlay.markers().len(), 1);
        assert_eq!(overlay.markers()[0].center, Point2::new(3.0, 3.0));
        assert_eq!(overlay.spawned(), 3);
    }

    #[test]
    fn test_track_and_clear() {
        let mut overlay = VelocityOverlay::new();
        overlay.begin(Point2::new(0.0, 0.0));
        overlay.track(Point2::new(10.0, -4.0));
        assert_eq!(overlay.markers()[0].center, Point2::new(10.0, -4.0));

        overlay.clear();
        assert!(overlay.markers().is_empty());
    }
}
