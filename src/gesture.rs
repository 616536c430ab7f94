//! Touch swipe interpretation for the carousels.

use crate::config::{FLICK_DISTANCE, FLICK_MAX_MS, SWIPE_DISTANCE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved right-to-left; show the next slide.
    Forward,
    /// Finger moved left-to-right; show the previous slide.
    Backward,
}

impl SwipeDirection {
    /// Index step this swipe applies to the carousel.
    pub fn step(self) -> isize {
        match self {
            SwipeDirection::Forward => 1,
            SwipeDirection::Backward => -1,
        }
    }
}

/// Where and when a touch began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchStart {
    pub x: f64,
    pub at_ms: f64,
}

impl TouchStart {
    pub fn new(x: f64, at_ms: f64) -> Self {
        Self { x, at_ms }
    }

    /// Classify the gesture ending at `end_x` / `end_ms`.
    pub fn finish(&self, end_x: f64, end_ms: f64) -> Option<SwipeDirection> {
        classify_swipe(self.x - end_x, end_ms - self.at_ms)
    }
}

/// A long drag (> 50) or a quick flick (> 20 in under 300 ms) counts as a swipe.
///
/// `displacement` is start minus end, so positive means leftward movement.
pub fn classify_swipe(displacement: f64, elapsed_ms: f64) -> Option<SwipeDirection> {
    let distance = displacement.abs();
    let long_drag = distance > SWIPE_DISTANCE;
    let flick = distance > FLICK_DISTANCE && elapsed_ms < FLICK_MAX_MS;

    if !(long_drag || flick) {
        return None;
    }
    if displacement > 0.0 {
        Some(SwipeDirection::Forward)
    } else {
        Some(SwipeDirection::Backward)
    }
}
