//! Geometry behind the scroll and pointer effects.
//!
//! All browser reads (scroll offsets, bounding rects) happen in the UI layer;
//! these helpers only turn numbers into decisions and CSS strings.

use crate::config::{NAVBAR_SCROLLED_AFTER_PX, PARALLAX_FACTOR, TILT_DIVISOR};

/// Navbar switches to its compact style once the page has scrolled a little.
pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLLED_AFTER_PX
}

/// Vertical rect `[top, bottom)` overlaps the viewport.
pub fn in_viewport(top: f64, bottom: f64, viewport_height: f64) -> bool {
    top < viewport_height && bottom > 0.0
}

/// `document.readyState` value once the window `load` event has fired.
pub fn document_loaded(ready_state: &str) -> bool {
    ready_state == "complete"
}

/// Hero image offset for the current scroll position, or `None` once the hero
/// has scrolled out and the last offset should be kept.
pub fn parallax_offset(scroll_y: f64, hero_height: f64) -> Option<f64> {
    (scroll_y < hero_height).then(|| scroll_y * PARALLAX_FACTOR)
}

pub fn parallax_transform(offset: f64) -> String {
    format!("translateY({}px)", offset)
}

/// 3D tilt for a card, given the pointer position relative to its top-left
/// corner.
pub fn tilt_transform(x: f64, y: f64, width: f64, height: f64) -> String {
    let rotate_x = (y - height / 2.0) / TILT_DIVISOR;
    let rotate_y = (width / 2.0 - x) / TILT_DIVISOR;
    format!(
        "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY(-10px)",
        rotate_x, rotate_y
    )
}

/// Where an in-page link should scroll to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorTarget {
    Top,
    Section(String),
}

/// Parse an `href`. Only same-page anchors are handled.
pub fn anchor_target(href: &str) -> Option<AnchorTarget> {
    match href.strip_prefix('#')? {
        "" => Some(AnchorTarget::Top),
        id => Some(AnchorTarget::Section(id.to_string())),
    }
}

/// Document offset that puts a section just below the fixed navbar.
pub fn section_scroll_top(rect_top: f64, page_y_offset: f64, navbar_height: f64) -> f64 {
    rect_top + page_y_offset - navbar_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navbar_threshold_is_exclusive() {
        assert!(!navbar_scrolled(0.0));
        assert!(!navbar_scrolled(50.0));
        assert!(navbar_scrolled(50.5));
    }

    #[test]
    fn viewport_overlap() {
        assert!(in_viewport(10.0, 200.0, 800.0));
        assert!(in_viewport(-100.0, 1.0, 800.0));
        assert!(!in_viewport(800.0, 900.0, 800.0));
        assert!(!in_viewport(-300.0, 0.0, 800.0));
    }

    #[test]
    fn load_has_fired_only_when_complete() {
        assert!(document_loaded("complete"));
        assert!(!document_loaded("interactive"));
        assert!(!document_loaded("loading"));
    }

    #[test]
    fn parallax_only_inside_hero() {
        assert_eq!(parallax_offset(100.0, 600.0), Some(100.0 * PARALLAX_FACTOR));
        assert_eq!(parallax_offset(600.0, 600.0), None);
        assert_eq!(parallax_transform(0.0), "translateY(0px)");
    }

    #[test]
    fn tilt_is_flat_at_the_centre() {
        assert_eq!(
            tilt_transform(100.0, 50.0, 200.0, 100.0),
            "perspective(1000px) rotateX(0deg) rotateY(0deg) translateY(-10px)"
        );
    }

    #[test]
    fn tilt_leans_towards_the_pointer() {
        assert_eq!(
            tilt_transform(0.0, 100.0, 200.0, 100.0),
            "perspective(1000px) rotateX(2.5deg) rotateY(5deg) translateY(-10px)"
        );
    }

    #[test]
    fn anchors() {
        assert_eq!(anchor_target("#"), Some(AnchorTarget::Top));
        assert_eq!(
            anchor_target("#features"),
            Some(AnchorTarget::Section("features".into()))
        );
        assert_eq!(anchor_target("https://example.com/#x"), None);
        assert_eq!(section_scroll_top(400.0, 1_000.0, 70.0), 1_330.0);
    }
}
