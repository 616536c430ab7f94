//! Interactivity for the Tarteel landing page.
//!
//! This library holds everything that does not need a browser: the carousel
//! controller behind the testimonial slider and hero rotator, the timer
//! abstraction it runs on, touch gesture and scroll/pointer geometry, in-app
//! browser detection, and the console logger. The Yew front end in `main.rs`
//! feeds browser events into these pieces.

pub mod carousel;
pub mod config;
pub mod effects;
pub mod gesture;
pub mod in_app;
pub mod logging;
pub mod scheduler;

pub use carousel::{CarouselConfig, CarouselController, CarouselFrame, CarouselView};
pub use scheduler::{GlooScheduler, Scheduler, TaskHandle};
