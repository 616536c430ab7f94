//! Page copy, embedded at build time from `content.json`.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeroSlide {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub cta: String,
    pub slides: Vec<HeroSlide>,
}

/// Feature or benefit card.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Card {
    pub icon: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShowcaseItem {
    pub src: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rating {
    pub score: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub name: String,
    pub role: String,
    pub rating: u8,
}

impl Testimonial {
    pub fn stars(&self) -> String {
        "★".repeat(usize::from(self.rating.min(5)))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageContent {
    pub hero: Hero,
    pub features: Vec<Card>,
    pub benefits: Vec<Card>,
    pub showcase: Vec<ShowcaseItem>,
    pub ratings: Vec<Rating>,
    pub testimonials: Vec<Testimonial>,
}

impl PageContent {
    pub fn load() -> Result<Self, serde_json::Error> {
        serde_json::from_str(include_str!("content.json"))
    }
}
