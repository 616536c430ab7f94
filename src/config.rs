//! Application-level configuration constants.

use log::LevelFilter;

// Logging
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

// In-app browser workaround
pub const APP_STORE_URL: &str =
    "https://apps.apple.com/us/app/ai-quran-reader-athkar-dua/id6749589788";
pub const IN_APP_QUERY_KEY: &str = "from";
pub const IN_APP_QUERY_VALUE: &str = "tiktok";
pub const TOAST_SHOW_DELAY_MS: u32 = 500;
pub const TOAST_HIDE_DELAY_MS: u32 = 300;

// Testimonial slider
pub const TESTIMONIAL_AUTOPLAY_MS: u32 = 6_000;
pub const TRANSITION_LOCK_MS: u32 = 600;
pub const ACTIVATION_STAGGER_MS: u32 = 100;

// Hero rotator
pub const HERO_ROTATE_MS: u32 = 5_000;
pub const HERO_MIN_SLIDES: usize = 2;

// Touch gestures
pub const SWIPE_DISTANCE: f64 = 50.0;
pub const FLICK_DISTANCE: f64 = 20.0;
pub const FLICK_MAX_MS: f64 = 300.0;

// Navbar
pub const NAVBAR_SCROLLED_AFTER_PX: f64 = 50.0;
pub const NAVBAR_FALLBACK_HEIGHT_PX: f64 = 70.0;

// Scroll reveal
pub const REVEAL_THRESHOLD: f64 = 0.1;

// Parallax / tilt
pub const PARALLAX_FACTOR: f64 = 0.3;
pub const TILT_DIVISOR: f64 = 20.0;
pub const TILT_RESET_TRANSFORM: &str = "perspective(1000px) rotateX(0) rotateY(0) translateY(0)";

// CSS state classes
pub const CLASS_ACTIVE: &str = "active";
pub const CLASS_SHOW: &str = "show";
pub const CLASS_SCROLLED: &str = "scrolled";
pub const CLASS_PAGE_LOADED: &str = "page-loaded";
