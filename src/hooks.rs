use crate::dom::{self, EventListener, RevealObserver};
use gloo_utils::{document, window};
use std::cell::RefCell;
use std::rc::Rc;
use tarteel_landing::carousel::{CarouselConfig, CarouselController, CarouselFrame};
use tarteel_landing::config::REVEAL_THRESHOLD;
use tarteel_landing::scheduler::GlooScheduler;
use web_sys::{Element, Event, EventTarget};
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalTarget {
    Window,
    Document,
}

/// Subscribe to a window/document event for the lifetime of the component.
///
/// The handler is captured on first render, so it should only talk to state
/// handles and refs.
#[hook]
pub fn use_global_event<F>(target: GlobalTarget, event: &'static str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    use_effect_with((), move |_| {
        let target: EventTarget = match target {
            GlobalTarget::Window => window().into(),
            GlobalTarget::Document => document().into(),
        };
        let listener = dom::report(event, EventListener::new(&target, event, handler));
        move || drop(listener)
    });
}

/// True once the referenced element has been in the viewport.
#[hook]
pub fn use_reveal(node: NodeRef) -> bool {
    let revealed = use_state_eq(|| false);
    {
        let revealed = revealed.clone();
        use_effect_with(node, move |node| {
            let mut observer = None;
            if let Some(element) = node.cast::<Element>() {
                if dom::element_in_viewport(&element) {
                    revealed.set(true);
                } else {
                    let on_visible = move || revealed.set(true);
                    observer = dom::report(
                        "scroll reveal",
                        RevealObserver::observe(&element, REVEAL_THRESHOLD, on_visible),
                    );
                }
            }
            move || drop(observer)
        });
    }
    *revealed
}

/// Shared slot for a carousel living as long as its component.
pub type CarouselSlot = Rc<RefCell<Option<CarouselController<GlooScheduler>>>>;

#[derive(Clone)]
pub struct CarouselHandle {
    pub frame: CarouselFrame,
    slot: CarouselSlot,
}

impl CarouselHandle {
    pub fn enabled(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Callback running `f` against the controller, if there is one.
    pub fn callback<E: 'static>(
        &self,
        f: impl Fn(&CarouselController<GlooScheduler>, E) + 'static,
    ) -> Callback<E> {
        let slot = self.slot.clone();
        Callback::from(move |e: E| {
            let controller = slot.borrow().clone();
            if let Some(controller) = controller {
                f(&controller, e);
            }
        })
    }

    /// Plain closure variant for global listeners.
    pub fn handler<E: 'static>(
        &self,
        f: impl Fn(&CarouselController<GlooScheduler>, E) + 'static,
    ) -> impl FnMut(E) + 'static {
        let slot = self.slot.clone();
        move |e: E| {
            let controller = slot.borrow().clone();
            if let Some(controller) = controller {
                f(&controller, e);
            }
        }
    }
}

/// Build a carousel for `slide_count` slides and start auto-play. Re-renders the
/// component whenever the controller publishes a frame.
#[hook]
pub fn use_carousel(slide_count: usize, config: CarouselConfig) -> CarouselHandle {
    let frame = use_state_eq(CarouselFrame::default);
    let slot: CarouselSlot = use_mut_ref(|| None);
    {
        let frame = frame.clone();
        let slot = slot.clone();
        use_effect_with(slide_count, move |&count| {
            let view = move |f: &CarouselFrame| frame.set(*f);
            let controller =
                CarouselController::new(count, config, Rc::new(GlooScheduler::new()), view);
            if let Some(controller) = &controller {
                controller.start_auto_play();
            }
            *slot.borrow_mut() = controller;

            move || {
                let controller = slot.borrow_mut().take();
                if let Some(controller) = controller {
                    controller.stop_auto_play();
                }
            }
        });
    }

    CarouselHandle {
        frame: *frame,
        slot,
    }
}
