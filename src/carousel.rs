//! Carousel controller shared by the testimonial slider and the hero rotator.
//!
//! The controller owns the slide index, the transition lock and the auto-play
//! timer. It never touches the DOM itself: every state change is published as a
//! [`CarouselFrame`] to a [`CarouselView`], and all timing goes through a
//! [`Scheduler`].
//!
//! # State machine
//! - `Idle` → `AnimatingLock` on any accepted [`CarouselController::go_to_slide`]
//! - `AnimatingLock` → `Idle` when the lock timer fires
//!
//! Requests arriving while locked are dropped, not queued.

use crate::config::{
    ACTIVATION_STAGGER_MS, HERO_MIN_SLIDES, HERO_ROTATE_MS, TESTIMONIAL_AUTOPLAY_MS,
    TRANSITION_LOCK_MS,
};
use crate::gesture::TouchStart;
use crate::scheduler::{Scheduler, TaskHandle};
use log::{debug, info};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Timing and sizing parameters for one carousel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    /// Used in log lines only.
    pub name: &'static str,
    pub autoplay_ms: u32,
    pub lock_ms: u32,
    /// Delay before the new slide gets its active class. Zero means immediately.
    pub stagger_ms: u32,
    /// Below this many slides the carousel stays disabled.
    pub min_slides: usize,
}

impl CarouselConfig {
    pub const fn testimonials() -> Self {
        Self {
            name: "testimonial",
            autoplay_ms: TESTIMONIAL_AUTOPLAY_MS,
            lock_ms: TRANSITION_LOCK_MS,
            stagger_ms: ACTIVATION_STAGGER_MS,
            min_slides: 1,
        }
    }

    pub const fn hero() -> Self {
        Self {
            name: "hero",
            autoplay_ms: HERO_ROTATE_MS,
            lock_ms: 0,
            stagger_ms: 0,
            min_slides: HERO_MIN_SLIDES,
        }
    }
}

/// What the render surface should currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarouselFrame {
    pub index: usize,
    /// `None` during the stagger between the dot and the slide switching over.
    pub active_slide: Option<usize>,
    pub active_dot: usize,
}

impl CarouselFrame {
    /// CSS transform for the slide track.
    pub fn track_transform(&self) -> String {
        format!("translateX(-{}%)", self.index * 100)
    }

    pub fn is_slide_active(&self, i: usize) -> bool {
        self.active_slide == Some(i)
    }

    pub fn is_dot_active(&self, i: usize) -> bool {
        self.active_dot == i
    }
}

/// Presentation layer receiving carousel frames.
pub trait CarouselView {
    fn render(&self, frame: &CarouselFrame);
}

impl<F: Fn(&CarouselFrame)> CarouselView for F {
    fn render(&self, frame: &CarouselFrame) {
        self(frame)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AnimatingLock,
}

#[derive(Debug, Default)]
struct CarouselState {
    current_index: usize,
    is_animating: bool,
    is_dragging: bool,
    touch: Option<TouchStart>,
    autoplay: Option<TaskHandle>,
    activation: Option<TaskHandle>,
    frame: CarouselFrame,
}

/// Wrap a requested index back into `[0, len)`.
///
/// Only single steps past either end are meaningful: anything at or beyond
/// `len` goes to the first slide and anything negative goes to the last.
pub fn normalize_index(target: isize, len: usize) -> usize {
    if target < 0 {
        len.saturating_sub(1)
    } else if target as usize >= len {
        0
    } else {
        target as usize
    }
}

struct Shared<S: Scheduler> {
    config: CarouselConfig,
    slide_count: usize,
    scheduler: Rc<S>,
    view: Box<dyn CarouselView>,
    state: RefCell<CarouselState>,
}

/// Handle to one carousel. Clones share the same state.
pub struct CarouselController<S: Scheduler + 'static> {
    shared: Rc<Shared<S>>,
}

impl<S: Scheduler + 'static> Clone for CarouselController<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<S: Scheduler + 'static> CarouselController<S> {
    /// Build a controller and render slide 0.
    ///
    /// Returns `None` when there are too few slides; the feature is then simply
    /// disabled. Auto-play is not started here.
    pub fn new(
        slide_count: usize,
        config: CarouselConfig,
        scheduler: Rc<S>,
        view: impl CarouselView + 'static,
    ) -> Option<Self> {
        if slide_count == 0 || slide_count < config.min_slides {
            debug!(
                "Not enough slides for the {} carousel ({}), skipping initialization",
                config.name, slide_count
            );
            return None;
        }

        let controller = Self {
            shared: Rc::new(Shared {
                config,
                slide_count,
                scheduler,
                view: Box::new(view),
                state: RefCell::new(CarouselState::default()),
            }),
        };
        controller.render();
        info!(
            "{} carousel initialized with {} slides",
            config.name, slide_count
        );
        Some(controller)
    }

    fn downgrade(&self) -> Weak<Shared<S>> {
        Rc::downgrade(&self.shared)
    }

    fn upgrade(weak: &Weak<Shared<S>>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    pub fn current_index(&self) -> usize {
        self.shared.state.borrow().current_index
    }

    pub fn is_animating(&self) -> bool {
        self.shared.state.borrow().is_animating
    }

    pub fn is_dragging(&self) -> bool {
        self.shared.state.borrow().is_dragging
    }

    pub fn is_auto_playing(&self) -> bool {
        self.shared.state.borrow().autoplay.is_some()
    }

    pub fn phase(&self) -> Phase {
        if self.is_animating() {
            Phase::AnimatingLock
        } else {
            Phase::Idle
        }
    }

    /// Last frame published to the view.
    pub fn frame(&self) -> CarouselFrame {
        self.shared.state.borrow().frame
    }

    /// Move to `target`, wrapping at the ends. Returns whether the request was
    /// accepted; while the transition lock is held it is dropped.
    pub fn go_to_slide(&self, target: isize) -> bool {
        {
            let mut state = self.shared.state.borrow_mut();
            if state.is_animating {
                debug!(
                    "{} carousel busy, dropping request for slide {}",
                    self.shared.config.name, target
                );
                return false;
            }
            state.is_animating = true;
            state.current_index = normalize_index(target, self.shared.slide_count);
        }

        self.render();

        let weak = self.downgrade();
        self.shared.scheduler.schedule_once(
            self.shared.config.lock_ms,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.state.borrow_mut().is_animating = false;
                }
            }),
        );
        true
    }

    fn publish(shared: &Shared<S>, frame: CarouselFrame) {
        shared.state.borrow_mut().frame = frame;
        shared.view.render(&frame);
    }

    fn render(&self) {
        let shared = &self.shared;
        let (index, stale) = {
            let mut state = shared.state.borrow_mut();
            (state.current_index, state.activation.take())
        };
        if let Some(handle) = stale {
            shared.scheduler.cancel(handle);
        }

        let stagger = shared.config.stagger_ms;
        let frame = CarouselFrame {
            index,
            active_slide: (stagger == 0).then_some(index),
            active_dot: index,
        };
        Self::publish(shared, frame);
        if stagger == 0 {
            return;
        }

        let weak = self.downgrade();
        let handle = shared.scheduler.schedule_once(
            stagger,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    let frame = {
                        let mut state = shared.state.borrow_mut();
                        state.activation = None;
                        CarouselFrame {
                            active_slide: Some(index),
                            ..state.frame
                        }
                    };
                    Self::publish(&shared, frame);
                }
            }),
        );
        shared.state.borrow_mut().activation = Some(handle);
    }

    /// (Re)start the auto-play timer. Any previous timer is replaced, so there is
    /// never more than one.
    pub fn start_auto_play(&self) {
        let weak = self.downgrade();
        let tick: Box<dyn FnMut()> = Box::new(move || {
            if let Some(carousel) = Self::upgrade(&weak) {
                let next = carousel.current_index() as isize + 1;
                carousel.go_to_slide(next);
            }
        });

        let previous = self.shared.state.borrow_mut().autoplay.take();
        let period = self.shared.config.autoplay_ms;
        let handle = match previous {
            Some(old) => self.shared.scheduler.reschedule(old, period, tick),
            None => self.shared.scheduler.schedule_repeating(period, tick),
        };
        self.shared.state.borrow_mut().autoplay = Some(handle);
    }

    pub fn stop_auto_play(&self) {
        let active = self.shared.state.borrow_mut().autoplay.take();
        if let Some(handle) = active {
            self.shared.scheduler.cancel(handle);
        }
    }

    /// User-driven navigation: move, then restart the auto-play cycle.
    pub fn navigate(&self, target: isize) {
        self.go_to_slide(target);
        self.stop_auto_play();
        self.start_auto_play();
    }

    pub fn show_next(&self) {
        self.navigate(self.current_index() as isize + 1);
    }

    pub fn show_previous(&self) {
        self.navigate(self.current_index() as isize - 1);
    }

    /// Dot indicator click.
    pub fn show_slide(&self, index: usize) {
        self.navigate(index as isize);
    }

    /// Arrow keys navigate, but only while the carousel is on screen.
    /// Returns whether the key was handled.
    pub fn handle_key(&self, key: &str, in_view: bool) -> bool {
        if !in_view {
            return false;
        }
        match key {
            "ArrowLeft" => self.show_previous(),
            "ArrowRight" => self.show_next(),
            _ => return false,
        }
        true
    }

    pub fn touch_start(&self, x: f64, now_ms: f64) {
        {
            let mut state = self.shared.state.borrow_mut();
            state.touch = Some(TouchStart::new(x, now_ms));
            state.is_dragging = true;
        }
        self.stop_auto_play();
    }

    pub fn touch_end(&self, x: f64, now_ms: f64) {
        let start = {
            let mut state = self.shared.state.borrow_mut();
            if !state.is_dragging {
                return;
            }
            state.is_dragging = false;
            state.touch.take()
        };

        if let Some(direction) = start.and_then(|s| s.finish(x, now_ms)) {
            debug!("{} carousel swipe {:?}", self.shared.config.name, direction);
            self.go_to_slide(self.current_index() as isize + direction.step());
        }
        self.start_auto_play();
    }

    pub fn pointer_enter(&self) {
        self.stop_auto_play();
    }

    pub fn pointer_leave(&self) {
        self.start_auto_play();
    }

    pub fn visibility_changed(&self, hidden: bool) {
        if hidden {
            self.stop_auto_play();
        } else {
            self.start_auto_play();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;

    type Frames = Rc<RefCell<Vec<CarouselFrame>>>;

    fn testimonials(n: usize) -> (CarouselController<ManualScheduler>, Rc<ManualScheduler>, Frames) {
        build(n, CarouselConfig::testimonials()).expect("carousel should initialize")
    }

    fn build(
        n: usize,
        config: CarouselConfig,
    ) -> Option<(CarouselController<ManualScheduler>, Rc<ManualScheduler>, Frames)> {
        let sched = Rc::new(ManualScheduler::new());
        let frames: Frames = Rc::new(RefCell::new(Vec::new()));
        let sink = frames.clone();
        let view = move |f: &CarouselFrame| sink.borrow_mut().push(*f);
        CarouselController::new(n, config, sched.clone(), view).map(|c| (c, sched, frames))
    }

    #[test]
    fn missing_slides_disable_the_carousel() {
        assert!(build(0, CarouselConfig::testimonials()).is_none());
        assert!(build(1, CarouselConfig::hero()).is_none());
        assert!(build(2, CarouselConfig::hero()).is_some());
    }

    #[test]
    fn first_render_shows_slide_zero_after_stagger() {
        let (carousel, sched, frames) = testimonials(3);
        assert_eq!(frames.borrow().len(), 1);
        assert_eq!(carousel.frame().active_dot, 0);
        assert_eq!(carousel.frame().active_slide, None);

        sched.advance(ACTIVATION_STAGGER_MS as u64);
        assert_eq!(carousel.frame().active_slide, Some(0));
        assert_eq!(carousel.frame().track_transform(), "translateX(-0%)");
    }

    #[test]
    fn negative_target_wraps_to_last_slide() {
        let (carousel, _, _) = testimonials(3);
        assert!(carousel.go_to_slide(-1));
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(carousel.frame().track_transform(), "translateX(-200%)");
    }

    #[test]
    fn targets_past_the_end_wrap_to_first_slide() {
        let (carousel, sched, _) = testimonials(3);
        carousel.go_to_slide(2);
        sched.advance(TRANSITION_LOCK_MS as u64);
        carousel.go_to_slide(3);
        assert_eq!(carousel.current_index(), 0);

        sched.advance(TRANSITION_LOCK_MS as u64);
        carousel.go_to_slide(7);
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn requests_during_the_lock_are_dropped() {
        let (carousel, sched, _) = testimonials(4);
        assert!(carousel.go_to_slide(1));
        assert_eq!(carousel.phase(), Phase::AnimatingLock);

        assert!(!carousel.go_to_slide(3));
        assert_eq!(carousel.current_index(), 1);

        sched.advance(TRANSITION_LOCK_MS as u64 - 1);
        assert!(!carousel.go_to_slide(3));
        assert_eq!(carousel.current_index(), 1);

        sched.advance(1);
        assert_eq!(carousel.phase(), Phase::Idle);
        assert!(carousel.go_to_slide(3));
        assert_eq!(carousel.current_index(), 3);
    }

    #[test]
    fn one_slide_and_one_dot_active_after_the_window() {
        let (carousel, sched, _) = testimonials(5);
        carousel.go_to_slide(3);
        sched.advance(TRANSITION_LOCK_MS as u64);

        let frame = carousel.frame();
        let slides: Vec<usize> = (0..5).filter(|&i| frame.is_slide_active(i)).collect();
        let dots: Vec<usize> = (0..5).filter(|&i| frame.is_dot_active(i)).collect();
        assert_eq!(slides, vec![3]);
        assert_eq!(dots, vec![3]);
    }

    #[test]
    fn previous_slide_is_deactivated_before_the_new_one_activates() {
        let (carousel, sched, frames) = testimonials(3);
        sched.advance(ACTIVATION_STAGGER_MS as u64);
        frames.borrow_mut().clear();

        carousel.go_to_slide(1);
        sched.advance(ACTIVATION_STAGGER_MS as u64);

        let frames = frames.borrow();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].active_slide, None);
        assert_eq!(frames[0].active_dot, 1);
        assert_eq!(frames[1].active_slide, Some(1));
    }

    #[test]
    fn index_stays_in_bounds_for_any_sequence() {
        for n in 2..7usize {
            let (carousel, sched, _) = testimonials(n);
            let mut seed: u64 = 0x2545_f491_4f6c_dd1d ^ n as u64;
            for _ in 0..200 {
                seed = seed
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                let target = (seed >> 33) as isize % (3 * n as isize) - n as isize;
                carousel.go_to_slide(target);
                assert!(carousel.current_index() < n);
                sched.advance(TRANSITION_LOCK_MS as u64);
            }
        }
    }

    #[test]
    fn starting_auto_play_twice_keeps_one_timer() {
        let (carousel, sched, _) = testimonials(3);
        carousel.start_auto_play();
        carousel.start_auto_play();
        assert_eq!(sched.repeating(), 1);

        sched.advance(TESTIMONIAL_AUTOPLAY_MS as u64);
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn stop_auto_play_is_idempotent() {
        let (carousel, sched, _) = testimonials(3);
        carousel.stop_auto_play();
        carousel.start_auto_play();
        carousel.stop_auto_play();
        carousel.stop_auto_play();
        assert!(!carousel.is_auto_playing());
        assert_eq!(sched.repeating(), 0);
    }

    #[test]
    fn prev_click_inside_lock_is_dropped_then_accepted() {
        let (carousel, sched, _) = testimonials(3);
        carousel.start_auto_play();

        sched.advance(TESTIMONIAL_AUTOPLAY_MS as u64);
        assert_eq!(carousel.current_index(), 1);

        sched.advance(200);
        carousel.show_previous();
        assert_eq!(carousel.current_index(), 1);

        sched.advance(TRANSITION_LOCK_MS as u64);
        carousel.show_previous();
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn manual_navigation_resets_the_auto_play_cycle() {
        let (carousel, sched, _) = testimonials(4);
        carousel.start_auto_play();

        sched.advance(5_000);
        carousel.show_slide(2);
        assert_eq!(carousel.current_index(), 2);

        // The tick that was due at 6000 ms must not fire.
        sched.advance(1_500);
        assert_eq!(carousel.current_index(), 2);

        sched.advance(TESTIMONIAL_AUTOPLAY_MS as u64 - 1_500);
        assert_eq!(carousel.current_index(), 3);
        assert_eq!(sched.repeating(), 1);
    }

    #[test]
    fn hidden_page_stops_auto_advance_until_visible() {
        let (carousel, sched, _) = testimonials(3);
        carousel.start_auto_play();

        carousel.visibility_changed(true);
        sched.advance(TESTIMONIAL_AUTOPLAY_MS as u64 * 5);
        assert_eq!(carousel.current_index(), 0);

        carousel.visibility_changed(false);
        sched.advance(TESTIMONIAL_AUTOPLAY_MS as u64);
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn hover_pauses_and_resumes() {
        let (carousel, sched, _) = testimonials(3);
        carousel.start_auto_play();
        carousel.pointer_enter();
        sched.advance(20_000);
        assert_eq!(carousel.current_index(), 0);

        carousel.pointer_leave();
        sched.advance(TESTIMONIAL_AUTOPLAY_MS as u64);
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn long_swipe_advances_and_restarts_auto_play() {
        let (carousel, sched, _) = testimonials(3);
        carousel.start_auto_play();

        carousel.touch_start(300.0, 0.0);
        assert!(carousel.is_dragging());
        assert!(!carousel.is_auto_playing());

        carousel.touch_end(240.0, 800.0);
        assert!(!carousel.is_dragging());
        assert!(carousel.is_auto_playing());
        assert_eq!(carousel.current_index(), 1);
        assert_eq!(sched.repeating(), 1);
    }

    #[test]
    fn rightward_swipe_goes_back() {
        let (carousel, _, _) = testimonials(3);
        carousel.touch_start(100.0, 0.0);
        carousel.touch_end(180.0, 500.0);
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn short_slow_swipe_does_not_navigate() {
        let (carousel, _, _) = testimonials(3);
        carousel.touch_start(300.0, 0.0);
        carousel.touch_end(270.0, 400.0);
        assert_eq!(carousel.current_index(), 0);
        assert!(carousel.is_auto_playing());
    }

    #[test]
    fn touch_end_without_start_is_ignored() {
        let (carousel, _, _) = testimonials(3);
        carousel.touch_end(0.0, 10.0);
        assert_eq!(carousel.current_index(), 0);
        assert!(!carousel.is_auto_playing());
    }

    #[test]
    fn arrow_keys_only_work_in_view() {
        let (carousel, sched, _) = testimonials(3);
        assert!(!carousel.handle_key("ArrowRight", false));
        assert_eq!(carousel.current_index(), 0);

        assert!(carousel.handle_key("ArrowRight", true));
        assert_eq!(carousel.current_index(), 1);

        sched.advance(TRANSITION_LOCK_MS as u64);
        assert!(carousel.handle_key("ArrowLeft", true));
        assert_eq!(carousel.current_index(), 0);
        assert!(!carousel.handle_key("Enter", true));
    }

    #[test]
    fn hero_rotation_activates_immediately() {
        let (carousel, sched, _) = build(3, CarouselConfig::hero()).expect("hero");
        assert_eq!(carousel.frame().active_slide, Some(0));

        carousel.start_auto_play();
        sched.advance(HERO_ROTATE_MS as u64 * 3);
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.frame().active_slide, Some(0));

        sched.advance(HERO_ROTATE_MS as u64);
        assert_eq!(carousel.frame().active_slide, Some(1));
    }

    #[test]
    fn independent_instances_do_not_interfere() {
        let sched = Rc::new(ManualScheduler::new());
        let config = CarouselConfig::testimonials();
        let a = CarouselController::new(3, config, sched.clone(), |_: &CarouselFrame| {})
            .expect("a");
        let b = CarouselController::new(3, config, sched.clone(), |_: &CarouselFrame| {})
            .expect("b");

        a.go_to_slide(2);
        assert!(b.go_to_slide(1));
        assert_eq!((a.current_index(), b.current_index()), (2, 1));
    }

    #[test]
    fn dropped_controller_leaves_timers_inert() {
        let (carousel, sched, frames) = testimonials(3);
        carousel.start_auto_play();
        let before = frames.borrow().len();
        drop(carousel);

        sched.advance(TESTIMONIAL_AUTOPLAY_MS as u64 * 2);
        assert_eq!(frames.borrow().len(), before);
    }
}
