//! Yew components for the interactive parts of the landing page.

use crate::content::{Hero, Testimonial};
use crate::dom;
use crate::hooks::{use_carousel, use_global_event, use_reveal, GlobalTarget};
use gloo_timers::callback::Timeout;
use std::cell::Cell;
use std::rc::Rc;
use tarteel_landing::carousel::CarouselConfig;
use tarteel_landing::config::{
    CLASS_ACTIVE, CLASS_SCROLLED, CLASS_SHOW, TILT_RESET_TRANSFORM, TOAST_HIDE_DELAY_MS,
    TOAST_SHOW_DELAY_MS,
};
use tarteel_landing::effects::{
    navbar_scrolled, parallax_offset, parallax_transform, tilt_transform,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent, Node};
use yew::prelude::*;

const NAV_LINKS: [(&str, &str); 4] = [
    ("#features", "Features"),
    ("#benefits", "Why Tarteel"),
    ("#testimonials", "Reviews"),
    ("#download", "Download"),
];

/// Callback for `<a href="#...">` links.
pub fn anchor_click() -> Callback<MouseEvent> {
    Callback::from(|e: MouseEvent| dom::handle_anchor_click(&e))
}

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let scrolled = use_state_eq(|| navbar_scrolled(dom::scroll_y()));
    let menu_open = use_state_eq(|| false);
    let nav_ref = use_node_ref();

    {
        let scrolled = scrolled.clone();
        use_global_event(GlobalTarget::Window, "scroll", move |_| {
            scrolled.set(navbar_scrolled(dom::scroll_y()));
        });
    }

    // Clicking anywhere outside the navbar closes the menu.
    {
        let menu_open = menu_open.clone();
        let nav_ref = nav_ref.clone();
        use_global_event(GlobalTarget::Document, "click", move |e: Event| {
            let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = match (nav_ref.cast::<Node>(), target) {
                (Some(nav), Some(target)) => nav.contains(Some(&target)),
                _ => true,
            };
            if !inside {
                menu_open.set(false);
            }
        });
    }

    use_effect_with(*menu_open, |&open| {
        dom::report("navbar menu", dom::set_body_scroll_locked(open));
    });

    let on_toggle = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let on_link = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            menu_open.set(false);
            dom::handle_anchor_click(&e);
        })
    };

    let open = (*menu_open).then_some(CLASS_ACTIVE);

    html! {
        <nav ref={nav_ref} class={classes!("navbar", (*scrolled).then_some(CLASS_SCROLLED))}>
            <div class="navbar-container">
                <a href="#" class="navbar-brand" onclick={anchor_click()}>{ "Tarteel" }</a>
                <button id="navbarToggle"
                    class={classes!("navbar-toggle", open)}
                    aria-label="Toggle menu"
                    onclick={on_toggle}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <ul id="navbarMenu" class={classes!("navbar-menu", open)}>
                    { for NAV_LINKS.iter().map(|(href, label)| html! {
                        <li>
                            <a class="navbar-link" href={*href} onclick={on_link.clone()}>{ *label }</a>
                        </li>
                    }) }
                </ul>
            </div>
        </nav>
    }
}

fn apply_parallax(hero: &NodeRef, image: &NodeRef) {
    let (Some(hero), Some(image)) = (hero.cast::<HtmlElement>(), image.cast::<Element>()) else {
        return;
    };
    if let Some(offset) = parallax_offset(dom::scroll_y(), f64::from(hero.offset_height())) {
        dom::report(
            "parallax",
            dom::set_style(&image, "transform", &parallax_transform(offset)),
        );
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroSectionProps {
    pub hero: Hero,
}

/// Hero banner with the rotating screenshots and scroll parallax.
#[function_component(HeroSection)]
pub fn hero_section(props: &HeroSectionProps) -> Html {
    let hero_ref = use_node_ref();
    let image_ref = use_node_ref();
    let rotator = use_carousel(props.hero.slides.len(), CarouselConfig::hero());

    use_global_event(
        GlobalTarget::Document,
        "visibilitychange",
        rotator.handler(|c, _: Event| c.visibility_changed(dom::page_hidden())),
    );

    // One parallax update per animation frame at most.
    {
        let hero_ref = hero_ref.clone();
        let image_ref = image_ref.clone();
        let ticking = Rc::new(Cell::new(false));
        use_global_event(GlobalTarget::Window, "scroll", move |_| {
            if ticking.get() {
                return;
            }
            ticking.set(true);
            let hero_ref = hero_ref.clone();
            let image_ref = image_ref.clone();
            let done = ticking.clone();
            let scheduled = dom::next_frame(move || {
                apply_parallax(&hero_ref, &image_ref);
                done.set(false);
            });
            if dom::report("parallax", scheduled).is_none() {
                ticking.set(false);
            }
        });
    }

    let enabled = rotator.enabled();
    let frame = rotator.frame;

    html! {
        <header ref={hero_ref} class="hero">
            <div class="hero-content">
                <h1 class="hero-title">{ props.hero.title.clone() }</h1>
                <p class="hero-subtitle">{ props.hero.subtitle.clone() }</p>
                <a href="#download" class="btn btn-primary" onclick={anchor_click()}>
                    { props.hero.cta.clone() }
                </a>
            </div>
            <div ref={image_ref}
                class="hero-image"
                onmouseenter={rotator.callback(|c, _: MouseEvent| c.pointer_enter())}
                onmouseleave={rotator.callback(|c, _: MouseEvent| c.pointer_leave())}
            >
                { for props.hero.slides.iter().enumerate().map(|(i, slide)| {
                    let active = frame.is_slide_active(i) || (!enabled && i == 0);
                    html! {
                        <img class={classes!("hero-slide", active.then_some(CLASS_ACTIVE))}
                            src={slide.src.clone()}
                            alt={slide.alt.clone()}
                        />
                    }
                }) }
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
pub struct RevealCardProps {
    pub class: Classes,
    /// Follow the pointer with a 3D tilt.
    #[prop_or_default]
    pub tilt: bool,
    #[prop_or_default]
    pub children: Children,
}

/// Card that fades in when scrolled into view.
#[function_component(RevealCard)]
pub fn reveal_card(props: &RevealCardProps) -> Html {
    let node = use_node_ref();
    let revealed = use_reveal(node.clone());

    let onmousemove = props.tilt.then(|| {
        let node = node.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(card) = node.cast::<Element>() else {
                return;
            };
            let rect = card.get_bounding_client_rect();
            let transform = tilt_transform(
                f64::from(e.client_x()) - rect.left(),
                f64::from(e.client_y()) - rect.top(),
                rect.width(),
                rect.height(),
            );
            dom::report("card tilt", dom::set_style(&card, "transform", &transform));
        })
    });

    let onmouseleave = props.tilt.then(|| {
        let node = node.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(card) = node.cast::<Element>() {
                dom::report(
                    "card tilt",
                    dom::set_style(&card, "transform", TILT_RESET_TRANSFORM),
                );
            }
        })
    });

    html! {
        <div ref={node}
            class={classes!(props.class.clone(), "reveal", revealed.then_some(CLASS_ACTIVE))}
            {onmousemove}
            {onmouseleave}
        >
            { for props.children.iter() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TestimonialSliderProps {
    pub testimonials: Vec<Testimonial>,
}

#[function_component(TestimonialSlider)]
pub fn testimonial_slider(props: &TestimonialSliderProps) -> Html {
    let slider_ref = use_node_ref();
    let revealed = use_reveal(slider_ref.clone());
    let carousel = use_carousel(props.testimonials.len(), CarouselConfig::testimonials());

    {
        let slider_ref = slider_ref.clone();
        use_global_event(
            GlobalTarget::Document,
            "keydown",
            carousel.handler(move |c, e: Event| {
                let Some(key) = e.dyn_ref::<KeyboardEvent>().map(|k| k.key()) else {
                    return;
                };
                let in_view = slider_ref
                    .cast::<Element>()
                    .map(|el| dom::element_in_viewport(&el))
                    .unwrap_or(false);
                c.handle_key(&key, in_view);
            }),
        );
    }
    use_global_event(
        GlobalTarget::Document,
        "visibilitychange",
        carousel.handler(|c, _: Event| c.visibility_changed(dom::page_hidden())),
    );

    if props.testimonials.is_empty() {
        return html! {};
    }

    let frame = carousel.frame;
    let ontouchstart = carousel.callback(|c, e: TouchEvent| {
        if let Some(touch) = e.touches().get(0) {
            c.touch_start(f64::from(touch.client_x()), dom::now_ms());
        }
    });
    let ontouchend = carousel.callback(|c, e: TouchEvent| {
        if let Some(touch) = e.changed_touches().get(0) {
            c.touch_end(f64::from(touch.client_x()), dom::now_ms());
        }
    });

    html! {
        <div ref={slider_ref}
            class={classes!("testimonials-slider", "reveal", revealed.then_some(CLASS_ACTIVE))}
            onmouseenter={carousel.callback(|c, _: MouseEvent| c.pointer_enter())}
            onmouseleave={carousel.callback(|c, _: MouseEvent| c.pointer_leave())}
            {ontouchstart}
            {ontouchend}
        >
            <div class="slider-track" style={format!("transform: {}", frame.track_transform())}>
                { for props.testimonials.iter().enumerate().map(|(i, t)| html! {
                    <article class={classes!("testimonial-card", frame.is_slide_active(i).then_some(CLASS_ACTIVE))}>
                        <div class="testimonial-stars">{ t.stars() }</div>
                        <p class="testimonial-quote">{ t.quote.clone() }</p>
                        <div class="testimonial-author">
                            <strong>{ t.name.clone() }</strong>
                            <span>{ t.role.clone() }</span>
                        </div>
                    </article>
                }) }
            </div>
            <div class="slider-controls">
                <button class="slider-prev"
                    aria-label="Previous testimonial"
                    onclick={carousel.callback(|c, _: MouseEvent| c.show_previous())}
                >
                    { "‹" }
                </button>
                <div class="slider-dots">
                    { for (0..props.testimonials.len()).map(|i| html! {
                        <button class={classes!("slider-dot", frame.is_dot_active(i).then_some(CLASS_ACTIVE))}
                            aria-label={format!("Show testimonial {}", i + 1)}
                            onclick={carousel.callback(move |c, _: MouseEvent| c.show_slide(i))}
                        />
                    }) }
                </div>
                <button class="slider-next"
                    aria-label="Next testimonial"
                    onclick={carousel.callback(|c, _: MouseEvent| c.show_next())}
                >
                    { "›" }
                </button>
            </div>
        </div>
    }
}

/// "Open in browser" hint shown inside the TikTok in-app browser.
#[function_component(InAppToast)]
pub fn in_app_toast() -> Html {
    let shown = use_state_eq(|| false);
    let mounted = use_state_eq(|| true);
    let hide_timer = use_mut_ref(|| None::<Timeout>);

    {
        let shown = shown.clone();
        use_effect_with((), move |_| {
            let timer = Timeout::new(TOAST_SHOW_DELAY_MS, move || shown.set(true));
            move || drop(timer)
        });
    }

    let on_close = {
        let shown = shown.clone();
        let mounted = mounted.clone();
        Callback::from(move |_: MouseEvent| {
            shown.set(false);
            let mounted = mounted.clone();
            *hide_timer.borrow_mut() =
                Some(Timeout::new(TOAST_HIDE_DELAY_MS, move || mounted.set(false)));
        })
    };

    if !*mounted {
        return html! {};
    }

    html! {
        <div id="tiktok-toast" class={classes!("tiktok-toast", (*shown).then_some(CLASS_SHOW))}>
            <div class="tiktok-toast-bubble">
                <div class="tiktok-toast-tail"></div>
                <button class="tiktok-toast-close" aria-label="Close" onclick={on_close}>{ "×" }</button>
                <p>
                    { "On " }<strong class="tiktok-name">{ "TikTok" }</strong>
                    { " you need to tap on the " }<span class="dots-icon">{ "•••" }</span>
                    { " and then tap on " }<span class="highlight">{ "\"Open in browser\"" }</span>
                    { " to download the app for free." }
                </p>
            </div>
        </div>
    }
}
