//! Integration tests for pan recognition + drag animator + spring scheduler
//!
//! These tests verify that:
//! - Raw pointer samples drive the element 1:1 through the pan recognizer
//! - Releases always come to rest exactly at the rest target
//! - The debug overlay never accumulates markers across gestures
//! - Completion notifications and interruption behave like a platform animator

use rebound_animation::{AnimationDriver, AnimationScheduler, SpringAnimation, SpringParameters};
use rebound_core::gesture::{PanRecognizer, PointerSample};
use rebound_core::{GesturePhase, Point2, Rect, Vec2};
use rebound_drag::{DragElement, DragMode, DragPhase, DragReleaseAnimator, SpringControls};
use std::sync::{Arc, Mutex};

/// A horizontal fling: pointer-down at `start`, moves every 8ms by `step`
fn fling(start: Point2, step: Vec2, moves: usize) -> Vec<PointerSample> {
    let mut samples = vec![PointerSample::down(start, 0.0)];
    let mut position = start;
    for i in 1..=moves {
        position = position + step;
        samples.push(PointerSample::moved(position, i as f64 * 8.0));
    }
    samples.push(PointerSample::up(position, moves as f64 * 8.0 + 4.0));
    samples
}

fn run_until_idle(
    animator: &mut DragReleaseAnimator,
    scheduler: &mut AnimationScheduler,
    element: &mut DragElement,
) -> usize {
    let mut frames = 0;
    while animator.is_animating() {
        scheduler.tick(1.0 / 120.0);
        animator.update(scheduler, element);
        frames += 1;
        assert!(frames < 2400, "release animation did not settle");
    }
    frames
}

#[test]
fn test_pointer_fling_returns_to_rest_origin() {
    let mut element = DragElement::new(Rect::new(40.0, 60.0, 100.0, 100.0));
    let mut animator = DragReleaseAnimator::new(DragMode::Position, &element)
        .with_controls(SpringControls::new(0.6, 0.35));
    let mut scheduler = AnimationScheduler::new();
    let mut pan = PanRecognizer::new();

    let samples = fling(Point2::new(90.0, 110.0), Vec2::new(12.0, 4.0), 10);
    let mut began_at = Vec2::ZERO;
    for sample in samples {
        if let Some(event) = pan.handle(sample) {
            animator.handle(&event, &mut element, &mut scheduler);
            match event.phase {
                // The pan is recognized on the first move; the element is grabbed there
                GesturePhase::Began => began_at = event.translation,
                GesturePhase::Changed => assert_eq!(
                    element.frame.origin,
                    Point2::new(40.0, 60.0) + (event.translation - began_at)
                ),
                _ => {}
            }
        }
    }

    assert_eq!(animator.phase(), DragPhase::Settling);
    let release = *animator.last_release().unwrap();
    // Moving away from rest: relative velocity is negative on both axes
    assert!(release.initial_velocity.x < 0.0);
    assert!(release.initial_velocity.y < 0.0);

    let frames = run_until_idle(&mut animator, &mut scheduler, &mut element);
    assert!(frames > 1);
    assert_eq!(element.frame.origin, Point2::new(40.0, 60.0));
    assert_eq!(animator.phase(), DragPhase::Idle);
}

#[test]
fn test_momentum_overshoots_past_release_point() {
    let mut element = DragElement::new(Rect::new(0.0, 0.0, 50.0, 50.0));
    let mut animator = DragReleaseAnimator::new(DragMode::Transform, &element)
        .with_controls(SpringControls::new(1.0, 0.4));
    let mut scheduler = AnimationScheduler::new();
    let mut pan = PanRecognizer::new();

    for sample in fling(Point2::new(25.0, 25.0), Vec2::new(10.0, 0.0), 8) {
        if let Some(event) = pan.handle(sample) {
            animator.handle(&event, &mut element, &mut scheduler);
        }
    }
    let released_at = element.transform.translation.x;

    // The element keeps travelling outward for a moment before returning
    scheduler.tick(1.0 / 120.0);
    animator.update(&mut scheduler, &mut element);
    assert!(element.transform.translation.x > released_at);

    run_until_idle(&mut animator, &mut scheduler, &mut element);
    assert!(element.transform.is_identity());
}

#[test]
fn test_overlay_markers_do_not_accumulate() {
    let mut element = DragElement::new(Rect::new(0.0, 0.0, 50.0, 50.0));
    let mut animator = DragReleaseAnimator::new(DragMode::Position, &element).with_debug_overlay();
    let mut scheduler = AnimationScheduler::new();
    let mut pan = PanRecognizer::new();

    // Three gestures, each interrupting the previous spring
    for round in 0..3 {
        pan.handle(PointerSample::down(Point2::new(25.0, 25.0), round as f64 * 1000.0));
        let began = pan
            .handle(PointerSample::moved(Point2::new(35.0, 25.0), round as f64 * 1000.0 + 8.0))
            .unwrap();
        animator.handle(&began, &mut element, &mut scheduler);

        let overlay = animator.overlay().unwrap();
        assert_eq!(overlay.markers().len(), 1);
        assert_eq!(overlay.markers()[0].center, Point2::new(35.0, 25.0));

        let moved = pan
            .handle(PointerSample::moved(Point2::new(45.0, 30.0), round as f64 * 1000.0 + 16.0))
            .unwrap();
        animator.handle(&moved, &mut element, &mut scheduler);
        let overlay = animator.overlay().unwrap();
        assert_eq!(overlay.markers()[0].center, Point2::new(45.0, 30.0));
        assert!(overlay.readout().starts_with("Velocity X: "));
        assert!(overlay.readout().contains("\n Relative Velocity X: "));

        let ended = pan
            .handle(PointerSample::up(Point2::new(45.0, 30.0), round as f64 * 1000.0 + 20.0))
            .unwrap();
        animator.handle(&ended, &mut element, &mut scheduler);
        assert!(animator.overlay().unwrap().markers().is_empty());

        scheduler.tick(1.0 / 120.0);
        animator.update(&mut scheduler, &mut element);
    }

    assert_eq!(animator.overlay().unwrap().spawned(), 3);
    // Only the last spring is still held by the scheduler
    assert_eq!(scheduler.animation_count(), 1);
}

#[test]
fn test_readout_reports_release_velocity() {
    let mut element = DragElement::new(Rect::new(0.0, 0.0, 50.0, 50.0));
    let mut animator = DragReleaseAnimator::new(DragMode::Transform, &element).with_debug_overlay();
    let mut scheduler = AnimationScheduler::new();

    use rebound_core::GestureEvent;
    let translation = Vec2::new(50.0, -25.0);
    for event in [
        GestureEvent::new(GesturePhase::Began, Vec2::ZERO, Vec2::ZERO, Point2::ORIGIN),
        GestureEvent::new(GesturePhase::Changed, translation, Vec2::ZERO, Point2::ORIGIN),
        GestureEvent::new(
            GesturePhase::Ended,
            translation,
            Vec2::new(100.0, 100.0),
            Point2::ORIGIN,
        ),
    ] {
        animator.handle(&event, &mut element, &mut scheduler);
    }

    assert_eq!(
        animator.overlay().unwrap().readout(),
        "Velocity X: 100.00, Y: 100.00 \n Relative Velocity X: -2.00, Y: 4.00"
    );
}

#[test]
fn test_driver_completion_notification() {
    let completions = Arc::new(Mutex::new(0));
    let completions_clone = completions.clone();

    let mut scheduler = AnimationScheduler::new();
    let parameters = SpringParameters::new(0.8, 0.4, Vec2::new(-2.0, 0.0));
    let id = scheduler.start(
        SpringAnimation::new(&parameters, Vec2::new(50.0, 0.0), Vec2::ZERO).on_complete(move |_| {
            *completions_clone.lock().unwrap() += 1;
        }),
    );

    for _ in 0..1200 {
        scheduler.tick(1.0 / 60.0);
    }

    assert_eq!(*completions.lock().unwrap(), 1);
    let sample = scheduler.sample(id).unwrap();
    assert!(sample.finished);
    assert_eq!(sample.value, Vec2::ZERO);
}
