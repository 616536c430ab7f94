//! Tarteel landing page rendered with Yew.
//! Wires the page sections, the interactive components and browser setup.

use log::{info, warn};
use tarteel_landing::config::{APP_STORE_URL, CLASS_PAGE_LOADED, LOG_LEVEL};
use tarteel_landing::logging;
use yew::prelude::*;

mod components;
mod content;
mod dom;
mod hooks;

use components::{anchor_click, HeroSection, InAppToast, Navbar, RevealCard, TestimonialSlider};
use content::{Card, PageContent};

fn render_cards(cards: &[Card], class: &'static str) -> Html {
    cards
        .iter()
        .map(|card| {
            html! {
                <RevealCard class={class} tilt={true}>
                    <div class="card-icon">{ card.icon.clone() }</div>
                    <h3>{ card.title.clone() }</h3>
                    <p>{ card.body.clone() }</p>
                </RevealCard>
            }
        })
        .collect::<Html>()
}

fn render_page(content: &PageContent) -> Html {
    html! {
        <>
            <HeroSection hero={content.hero.clone()} />

            <section id="features" class="features">
                <div class="container">
                    <h2 class="section-title">{ "Everything you need to stay close to the Quran" }</h2>
                    <div class="features-grid">
                        { render_cards(&content.features, "feature-card") }
                    </div>
                </div>
            </section>

            <section class="showcase">
                <div class="container showcase-grid">
                    { for content.showcase.iter().map(|item| html! {
                        <RevealCard class="showcase-item">
                            <img src={item.src.clone()} alt={item.caption.clone()} />
                            <span class="showcase-caption">{ item.caption.clone() }</span>
                        </RevealCard>
                    }) }
                </div>
            </section>

            <section id="benefits" class="benefits">
                <div class="container">
                    <h2 class="section-title">{ "Why readers choose Tarteel" }</h2>
                    <div class="benefits-grid">
                        { render_cards(&content.benefits, "benefit-card") }
                    </div>
                </div>
            </section>

            <section id="testimonials" class="testimonials">
                <div class="container">
                    <h2 class="section-title">{ "Loved by readers" }</h2>
                    <div class="ratings">
                        { for content.ratings.iter().map(|rating| html! {
                            <RevealCard class="rating-card">
                                <span class="rating-score">{ rating.score.clone() }</span>
                                <span class="rating-label">{ rating.label.clone() }</span>
                            </RevealCard>
                        }) }
                    </div>
                    <TestimonialSlider testimonials={content.testimonials.clone()} />
                </div>
            </section>

            <section id="download" class="download">
                <div class="container">
                    <h2 class="section-title">{ "Start reciting today" }</h2>
                    <a class="btn btn-primary" href={APP_STORE_URL}>{ content.hero.cta.clone() }</a>
                </div>
            </section>

            <footer class="footer">
                <a href="#" onclick={anchor_click()}>{ "Back to top" }</a>
            </footer>
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    /// Show the "open in browser" hint.
    pub in_app_browser: bool,
}

/// Root component: page content plus page-level setup.
#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let content = use_memo((), |_| PageContent::load());

    use_effect_with((), |_| {
        let listener = dom::report(
            "page loaded",
            dom::on_window_load(|| {
                info!("Window loaded - adding {} class", CLASS_PAGE_LOADED);
                dom::report("page loaded", dom::add_body_class(CLASS_PAGE_LOADED));
            }),
        )
        .flatten();
        move || drop(listener)
    });

    let page = match &*content {
        Ok(content) => render_page(content),
        Err(err) => {
            warn!("Page content failed to parse: {}", err);
            html! {}
        }
    };

    html! {
        <>
            if props.in_app_browser {
                <InAppToast />
            }
            <Navbar />
            <main>{ page }</main>
        </>
    }
}

/// Entry point: browser workaround first, then render the page.
fn main() {
    console_error_panic_hook::set_once();
    logging::init(LOG_LEVEL);
    info!("Tarteel landing page loaded");

    let in_app_browser =
        dom::report("in-app browser workaround", dom::apply_browser_workaround()).unwrap_or(false);

    yew::Renderer::<App>::with_props(AppProps { in_app_browser }).render();
}
