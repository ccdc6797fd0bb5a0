//! Course storefront page

use leptos::prelude::*;
use skillorbit::{
    catalog::CatalogStore,
    protection::{Protection, ProtectionConfig, SECURITY_OVERLAY_HTML, Watermark},
    render::render_course_grid,
    ui::{MobileMenu, ScrollState, ToastQueue},
};

use layout::{AnchorLink, FaqSection, Navbar, ScrollTopButton};
use toasts::ToastHost;

mod guard;
mod layout;
mod toasts;

/// Trailer shown in the hero section.
const PREVIEW_VIDEO: &str = "/media/preview.mp4";

/// Course grid markup for the bundled catalog.
fn catalog_markup() -> Result<String, String> {
    let catalog =
        CatalogStore::sample().map_err(|error| format!("Failed to load courses: {error}"))?;

    Ok(render_course_grid(&catalog))
}

#[component]
fn CourseGrid() -> impl IntoView {
    match catalog_markup() {
        Ok(markup) => view! {
            <section class="courses" id="courses">
                <h2 class="section-title">"Popular Courses"</h2>
                <div class="courses-grid" id="coursesGrid" inner_html=markup></div>
            </section>
        }
        .into_any(),
        Err(error_message) => view! {
            <section class="courses" id="courses">
                <p class="error">{error_message}</p>
            </section>
        }
        .into_any(),
    }
}

fn watermark_view(mark: Watermark) -> impl IntoView {
    let style = mark.style();

    view! { <div class="watermark" style=style>{mark.text}</div> }
}

#[component]
fn Watermarks(marks: Vec<Watermark>) -> impl IntoView {
    marks.into_iter().map(watermark_view).collect::<Vec<_>>()
}

/// Main storefront shell.
#[component]
fn App() -> impl IntoView {
    let scroll = RwSignal::new(ScrollState::default());
    let menu = RwSignal::new(MobileMenu::default());
    let toasts = RwSignal::new(ToastQueue::default());
    let overlay = RwSignal::new(false);

    let protection = Protection::new(ProtectionConfig::default(), guard::page_is_protected());

    layout::install_scroll_tracking(scroll);
    guard::install(protection, toasts, overlay);

    view! {
        <div style=protection.selection_style().unwrap_or_default()>
            <Navbar scroll=scroll menu=menu />
            <main>
                <section class="hero" id="home">
                    <h1>"Learn Without Limits"</h1>
                    <p>"Industry-ready courses from expert instructors, at prices that make sense."</p>
                    <AnchorLink class="btn btn-primary" href="#courses" menu=menu>
                        "Explore Courses"
                    </AnchorLink>
                    <guard::ProtectedVideo src=PREVIEW_VIDEO />
                </section>
                <CourseGrid />
                <FaqSection />
            </main>
            <ScrollTopButton scroll=scroll />
            <ToastHost toasts=toasts />
            <Watermarks marks=protection.watermarks(None) />
            <Show when=move || overlay.get()>
                <div class="security-overlay" inner_html=SECURITY_OVERLAY_HTML></div>
            </Show>
        </div>
    }
}

/// Mount the storefront page.
fn main() {
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(App);
}
