//! Headless drag-release simulation
//!
//! Replays pointer samples through the pan recognizer and the drag animator,
//! then ticks the scheduler until the release spring settles.

use anyhow::{Context, Result};
use rebound_animation::AnimationScheduler;
use rebound_core::gesture::{PanRecognizer, PointerSample};
use rebound_core::{Point2, Rect, Vec2};
use rebound_drag::{DragElement, DragMode, DragReleaseAnimator, SpringControls};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Everything a simulation run needs
#[derive(Debug, Clone, Copy)]
pub struct SimulationOptions {
    pub mode: DragMode,
    pub debug: bool,
    pub fps: u32,
    pub max_seconds: f32,
    pub controls: SpringControls,
    pub element: Rect,
}

/// One observed frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    /// Milliseconds since the first pointer sample
    pub time_ms: f64,
    pub phase: String,
    /// Where the element is drawn
    pub origin: Point2,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readout: Option<String>,
}

/// Load pointer samples from a JSON array
pub fn load_script(path: &Path) -> Result<Vec<PointerSample>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let samples: Vec<PointerSample> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse pointer script {}", path.display()))?;

    if samples.is_empty() {
        anyhow::bail!("Pointer script {} is empty", path.display());
    }
    Ok(samples)
}

/// A quick fling up and to the right, starting on the element's center
pub fn default_script(element: &Rect) -> Vec<PointerSample> {
    let start = element.center();
    let step = Vec2::new(14.0, -6.0);
    let mut samples = vec![PointerSample::down(start, 0.0)];

    let mut position = start;
    for i in 1..=12 {
        position = position + step;
        samples.push(PointerSample::moved(position, i as f64 * 8.0));
    }
    samples.push(PointerSample::up(position, 100.0));
    samples
}

/// Run the simulation and collect frames
pub fn run(options: &SimulationOptions, samples: &[PointerSample]) -> Result<Vec<Frame>> {
    let mut element = DragElement::new(options.element);
    let mut animator =
        DragReleaseAnimator::new(options.mode, &element).with_controls(options.controls);
    if options.debug {
        animator = animator.with_debug_overlay();
    }

    let mut scheduler = AnimationScheduler::new();
    scheduler.set_target_fps(options.fps);
    let mut pan = PanRecognizer::new();
    let mut frames = Vec::new();

    let start_time = samples.first().map(|s| s.timestamp).unwrap_or_default();
    let mut time_ms = start_time;

    for sample in samples {
        // Keep the previous spring moving between gestures
        if animator.is_animating() && sample.timestamp > time_ms {
            let dt = ((sample.timestamp - time_ms) / 1000.0) as f32;
            scheduler.tick(dt);
            animator.update(&mut scheduler, &mut element);
        }
        time_ms = time_ms.max(sample.timestamp);

        if let Some(event) = pan.handle(*sample) {
            animator.handle(&event, &mut element, &mut scheduler);
            frames.push(frame(time_ms - start_time, &animator, &element));
        }
    }

    let frame_ms = 1000.0 / options.fps as f64;
    let deadline = time_ms + options.max_seconds as f64 * 1000.0;
    while animator.is_animating() {
        if time_ms >= deadline {
            tracing::warn!(
                max_seconds = options.max_seconds,
                "release spring did not settle, stopping simulation"
            );
            break;
        }

        scheduler.tick(scheduler.frame_duration());
        animator.update(&mut scheduler, &mut element);
        time_ms += frame_ms;
        frames.push(frame(time_ms - start_time, &animator, &element));
    }

    tracing::info!(
        frames = frames.len(),
        origin = ?element.presented_origin(),
        "simulation finished"
    );
    Ok(frames)
}

fn frame(time_ms: f64, animator: &DragReleaseAnimator, element: &DragElement) -> Frame {
    Frame {
        time_ms,
        phase: format!("{:?}", animator.phase()).to_lowercase(),
        origin: element.presented_origin(),
        readout: animator
            .overlay()
            .map(|overlay| overlay.readout().to_string())
            .filter(|text| !text.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(mode: DragMode) -> SimulationOptions {
        SimulationOptions {
            mode,
            debug: true,
            fps: 120,
            max_seconds: 5.0,
            controls: SpringControls::default(),
            element: Rect::new(100.0, 200.0, 120.0, 120.0),
        }
    }

    #[test]
    fn test_default_fling_settles_at_rest() {
        for mode in [DragMode::Position, DragMode::Transform] {
            let options = options(mode);
            let frames = run(&options, &default_script(&options.element)).unwrap();

            let last = frames.last().unwrap();
            assert_eq!(last.phase, "idle");
            assert_eq!(last.origin, Point2::new(100.0, 200.0));
            assert!(frames.iter().any(|f| f.phase == "dragging"));
            assert!(frames.iter().any(|f| f.phase == "settling"));
        }
    }

    #[test]
    fn test_frames_carry_readout_in_debug() {
        let options = options(DragMode::Position);
        let frames = run(&options, &default_script(&options.element)).unwrap();

        let readout = frames.iter().find_map(|f| f.readout.clone()).unwrap();
        assert!(readout.starts_with("Velocity X: "));
    }

    #[test]
    fn test_deadline_stops_unsettled_spring() {
        let mut options = options(DragMode::Transform);
        options.max_seconds = 0.05;
        let frames = run(&options, &default_script(&options.element)).unwrap();

        assert_eq!(frames.last().unwrap().phase, "settling");
    }
}
