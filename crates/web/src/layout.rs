//! Page chrome: navbar, mobile menu, FAQ and scroll-to-top.

use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use skillorbit::ui::anchor_target;
use skillorbit::ui::{FaqAccordion, MobileMenu, ScrollState};

const NAV_LINKS: [(&str, &str); 4] = [
    ("#home", "Home"),
    ("#courses", "Courses"),
    ("#features", "Features"),
    ("#faq", "FAQ"),
];

const FAQ_ENTRIES: [(&str, &str); 4] = [
    (
        "How do I enroll in a course?",
        "Sign in, open the course and press Enroll. It shows up under My Courses right away.",
    ),
    (
        "Do I get lifetime access?",
        "Yes. Once enrolled you can revisit every lesson as often as you like.",
    ),
    (
        "Can I download the videos?",
        "Lessons stream inside SkillOrbit only; downloads are disabled to protect instructors.",
    ),
    (
        "I forgot my password. What now?",
        "Use Forgot password on the sign-in page and we will email you a reset link.",
    ),
];

#[component]
pub(crate) fn Navbar(scroll: RwSignal<ScrollState>, menu: RwSignal<MobileMenu>) -> impl IntoView {
    view! {
        <nav class=move || scroll.get().navbar_class() id="navbar">
            <AnchorLink class="logo" href="#home" menu=menu>
                "SkillOrbit"
            </AnchorLink>
            <ul class=move || menu.get().links_class() id="navLinks">
                {NAV_LINKS
                    .iter()
                    .map(|&(href, label)| {
                        view! {
                            <li>
                                <AnchorLink href=href menu=menu>
                                    {label}
                                </AnchorLink>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ul>
            <button
                class="mobile-menu-btn"
                id="mobileMenuBtn"
                aria-label="Toggle navigation"
                on:click=move |_| menu.update(MobileMenu::toggle)
            >
                <i class=move || menu.get().icon_class()></i>
            </button>
        </nav>
    }
}

/// In-page link that scrolls smoothly to its target and closes the mobile
/// menu.
#[component]
pub(crate) fn AnchorLink(
    href: &'static str,
    menu: RwSignal<MobileMenu>,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <a
            class=class
            href=href
            on:click=move |event| {
                event.prevent_default();

                if scroll_to_anchor(href) {
                    menu.update(MobileMenu::close);
                }
            }
        >
            {children()}
        </a>
    }
}

#[component]
pub(crate) fn ScrollTopButton(scroll: RwSignal<ScrollState>) -> impl IntoView {
    view! {
        <button
            class=move || scroll.get().scroll_top_class()
            id="scrollTop"
            aria-label="Back to top"
            on:click=move |_| scroll_to_top()
        >
            <i class="fas fa-arrow-up"></i>
        </button>
    }
}

#[component]
pub(crate) fn FaqSection() -> impl IntoView {
    let faq = RwSignal::new(FaqAccordion::default());

    view! {
        <section class="faq" id="faq">
            <h2 class="section-title">"Frequently Asked Questions"</h2>
            <div class="faq-list">
                {FAQ_ENTRIES
                    .iter()
                    .enumerate()
                    .map(|(index, &(question, answer))| {
                        view! {
                            <div class=move || faq.get().item_class(index)>
                                <button
                                    class="faq-question"
                                    on:click=move |_| faq.update(|faq| faq.click(index))
                                >
                                    <span>{question}</span>
                                    <i class="fas fa-chevron-down"></i>
                                </button>
                                <div class="faq-answer">
                                    <p>{answer}</p>
                                </div>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </section>
    }
}

/// Track the page scroll offset in `scroll`.
#[cfg(target_arch = "wasm32")]
pub(crate) fn install_scroll_tracking(scroll: RwSignal<ScrollState>) {
    let handle = window_event_listener(leptos::ev::scroll, move |_| {
        let offset = window().scroll_y().unwrap_or_default();

        scroll.set(ScrollState::from_offset(offset));
    });

    on_cleanup(move || handle.remove());
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn install_scroll_tracking(_scroll: RwSignal<ScrollState>) {}

#[cfg(target_arch = "wasm32")]
fn scroll_to_top() {
    let options = web_sys::ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);

    window().scroll_to_with_scroll_to_options(&options);
}

#[cfg(not(target_arch = "wasm32"))]
fn scroll_to_top() {}

/// Smoothly scroll the link's target into view. Returns whether it exists.
#[cfg(target_arch = "wasm32")]
fn scroll_to_anchor(href: &str) -> bool {
    let Some(target) = anchor_target(href).and_then(|id| document().get_element_by_id(id)) else {
        return false;
    };

    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Start);

    target.scroll_into_view_with_scroll_into_view_options(&options);

    true
}

#[cfg(not(target_arch = "wasm32"))]
fn scroll_to_anchor(_href: &str) -> bool {
    false
}
