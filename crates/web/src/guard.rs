//! Browser wiring for the content protection heuristics.

use jiff::Timestamp;
use leptos::prelude::*;
use skillorbit::{
    protection::{
        DEFAULT_SESSION_MINUTES, DevtoolsMonitor, Interval, KeyPress, Protection, SessionAction,
        SessionTimeout, VIDEO_CONTROLS_LIST, WindowMetrics,
    },
    ui::{ToastKind, ToastQueue},
};

use crate::toasts::show_toast;

/// Something the page has to do in response to a guard firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GuardEffect {
    ShowOverlay,
    Redirect(&'static str),
    ClearConsole,
    Warn(&'static str),
}

/// Timed guards for one page, polled from a single browser interval.
#[derive(Debug)]
pub(crate) struct Guards {
    protection: Protection,
    devtools: Option<DevtoolsMonitor>,
    console: Option<Interval>,
    session: Option<SessionTimeout>,
}

impl Guards {
    pub(crate) fn new(protection: Protection, now: Timestamp) -> Self {
        Self {
            protection,
            devtools: protection.devtools_monitor(now),
            console: protection.console_guard(now),
            session: protection
                .is_protected()
                .then(|| SessionTimeout::with_minutes(DEFAULT_SESSION_MINUTES, now)),
        }
    }

    pub(crate) fn record_activity(&mut self, now: Timestamp) {
        if let Some(session) = &mut self.session {
            session.record_activity(now);
        }
    }

    pub(crate) fn tick(
        &mut self,
        now: Timestamp,
        metrics: impl FnOnce() -> WindowMetrics,
    ) -> Vec<GuardEffect> {
        let mut effects = Vec::new();

        if let Some(devtools) = &mut self.devtools
            && devtools.poll(now, metrics)
        {
            let response = self.protection.on_devtools_detected();

            if response.show_overlay {
                effects.push(GuardEffect::ShowOverlay);
            }

            if let Some(target) = response.redirect_to {
                effects.push(GuardEffect::Redirect(target));
            }
        }

        if let Some(console) = &mut self.console
            && console.poll(now)
        {
            effects.push(GuardEffect::ClearConsole);
        }

        match self.session.as_mut().and_then(|session| session.poll(now)) {
            Some(SessionAction::Warn(message)) => effects.push(GuardEffect::Warn(message)),
            Some(SessionAction::Redirect(target)) => effects.push(GuardEffect::Redirect(target)),
            None => {}
        }

        effects
    }
}

/// Handle a key press. Returns whether the default action must be prevented.
pub(crate) fn on_key(protection: Protection, press: &KeyPress, toasts: RwSignal<ToastQueue>) -> bool {
    let decision = protection.on_key(press);

    if let Some(warning) = decision.warning() {
        show_toast(toasts, warning, ToastKind::Warning);
    }

    decision.is_blocked()
}

/// Handle a context menu request. Returns whether it must be suppressed.
pub(crate) fn on_context_menu(protection: Protection, toasts: RwSignal<ToastQueue>) -> bool {
    match protection.on_context_menu() {
        Some(warning) => {
            show_toast(toasts, warning, ToastKind::Warning);
            true
        }
        None => false,
    }
}

/// Video element without a download affordance.
#[component]
pub(crate) fn ProtectedVideo(src: &'static str) -> impl IntoView {
    view! {
        <video
            class="protected-video"
            src=src
            controls=true
            controlslist=VIDEO_CONTROLS_LIST
            on:contextmenu=|event| event.prevent_default()
            on:dragstart=|event| event.prevent_default()
        ></video>
    }
}

/// How often the guards are polled.
#[cfg(target_arch = "wasm32")]
const GUARD_TICK: std::time::Duration = std::time::Duration::from_millis(250);

/// Whether the page body carries the protected-content marker.
#[cfg(target_arch = "wasm32")]
pub(crate) fn page_is_protected() -> bool {
    document().body().is_some_and(|body| {
        body.class_list()
            .contains(skillorbit::protection::PROTECTED_CONTENT_CLASS)
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn page_is_protected() -> bool {
    false
}

/// Attach listeners and start the guard interval.
#[cfg(target_arch = "wasm32")]
pub(crate) fn install(
    protection: Protection,
    toasts: RwSignal<ToastQueue>,
    overlay: RwSignal<bool>,
) {
    use std::{cell::RefCell, rc::Rc};

    use leptos::ev;
    use skillorbit::protection::{ActivityEvent, CONSOLE_BANNER, STARTUP_BANNER};

    for (text, css) in STARTUP_BANNER {
        web_sys::console::log_2(&text.into(), &css.into());
    }

    if protection.config().disable_right_click {
        window_event_listener(ev::contextmenu, move |event| {
            if on_context_menu(protection, toasts) {
                event.prevent_default();
            }
        });
    }

    if protection.config().disable_key_shortcuts {
        window_event_listener(ev::keydown, move |event| {
            let press = KeyPress {
                key: event.key(),
                ctrl: event.ctrl_key(),
                shift: event.shift_key(),
            };

            if on_key(protection, &press, toasts) {
                event.prevent_default();
            }
        });
    }

    let guards = Rc::new(RefCell::new(Guards::new(protection, Timestamp::now())));

    for activity in ActivityEvent::ALL {
        let guards = Rc::clone(&guards);

        window_event_listener_untyped(activity.dom_event(), move |_| {
            guards.borrow_mut().record_activity(Timestamp::now());
        });
    }

    let tick = move || {
        let effects = guards
            .borrow_mut()
            .tick(Timestamp::now(), window_metrics);

        for effect in effects {
            match effect {
                GuardEffect::ShowOverlay => overlay.set(true),
                GuardEffect::Redirect(target) => {
                    follow_redirect(target);
                }
                GuardEffect::ClearConsole => {
                    web_sys::console::clear();
                    web_sys::console::log_2(&CONSOLE_BANNER.0.into(), &CONSOLE_BANNER.1.into());
                }
                GuardEffect::Warn(message) => show_toast(toasts, message, ToastKind::Warning),
            }
        }
    };

    if let Err(error) = set_interval_with_handle(tick, GUARD_TICK) {
        leptos::logging::error!("failed to start protection interval: {error:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn install(
    _protection: Protection,
    _toasts: RwSignal<ToastQueue>,
    _overlay: RwSignal<bool>,
) {
}

/// Leave for `target`. Failures are logged; returns whether navigation
/// started.
#[cfg(any(target_arch = "wasm32", test))]
fn follow_redirect(target: &str) -> bool {
    match navigate(target) {
        Ok(()) => true,
        Err(error) => {
            leptos::logging::error!("failed to redirect to {target}: {error}");
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn navigate(target: &str) -> Result<(), String> {
    window()
        .location()
        .set_href(target)
        .map_err(|error| format!("{error:?}"))
}

#[cfg(all(not(target_arch = "wasm32"), test))]
fn navigate(_target: &str) -> Result<(), String> {
    Err("no browser window".to_string())
}

#[cfg(target_arch = "wasm32")]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "window sizes are clamped to non-negative pixel counts"
)]
fn window_metrics() -> WindowMetrics {
    let window = window();
    let pixels = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value
            .ok()
            .and_then(|value| value.as_f64())
            .map_or(0, |value| value.max(0.0) as u32)
    };

    WindowMetrics {
        outer_width: pixels(window.outer_width()),
        inner_width: pixels(window.inner_width()),
        outer_height: pixels(window.outer_height()),
        inner_height: pixels(window.inner_height()),
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use skillorbit::protection::{
        DEVTOOLS_DISABLED, LOGIN_PAGE, ProtectionConfig, SECURITY_WARNING_PAGE, SESSION_EXPIRED,
    };

    use super::*;

    fn devtools_open() -> WindowMetrics {
        WindowMetrics {
            outer_width: 1600,
            inner_width: 1200,
            outer_height: 900,
            inner_height: 900,
        }
    }

    #[test]
    fn protected_page_shows_overlay_and_clears_console() {
        let start = Timestamp::UNIX_EPOCH;
        let mut guards = Guards::new(Protection::new(ProtectionConfig::default(), true), start);

        let effects = guards.tick(start + SignedDuration::from_secs(1), devtools_open);
        assert_eq!(effects, [GuardEffect::ShowOverlay]);

        let effects = guards.tick(start + SignedDuration::from_secs(2), devtools_open);
        assert_eq!(effects, [GuardEffect::ClearConsole]);
    }

    #[test]
    fn redirect_configured_page_redirects_on_detection() {
        let start = Timestamp::UNIX_EPOCH;
        let config = ProtectionConfig {
            redirect_on_detect: true,
            ..ProtectionConfig::default()
        };
        let mut guards = Guards::new(Protection::new(config, false), start);

        let effects = guards.tick(start + SignedDuration::from_secs(1), devtools_open);

        assert_eq!(effects, [GuardEffect::Redirect(SECURITY_WARNING_PAGE)]);
    }

    #[test]
    fn idle_protected_page_expires_then_redirects() {
        let start = Timestamp::UNIX_EPOCH;
        let mut guards = Guards::new(Protection::new(ProtectionConfig::default(), true), start);
        let idle = start + SignedDuration::from_mins(DEFAULT_SESSION_MINUTES);

        guards.record_activity(start + SignedDuration::from_secs(10));
        assert!(!guards.tick(idle, WindowMetrics::default).contains(&GuardEffect::Warn(SESSION_EXPIRED)));

        let expired = idle + SignedDuration::from_secs(10);
        assert!(guards.tick(expired, WindowMetrics::default).contains(&GuardEffect::Warn(SESSION_EXPIRED)));

        let later = expired + SignedDuration::from_secs(3);
        assert!(guards.tick(later, WindowMetrics::default).contains(&GuardEffect::Redirect(LOGIN_PAGE)));
    }

    #[test]
    fn failed_redirect_is_reported() {
        assert!(!follow_redirect(LOGIN_PAGE), "no window to navigate outside the browser");
    }

    #[test]
    fn blocked_shortcut_raises_warning_toast() {
        let toasts = RwSignal::new(ToastQueue::default());
        let protection = Protection::new(ProtectionConfig::default(), false);

        assert!(on_key(protection, &KeyPress::new("F12"), toasts));
        assert!(!on_key(protection, &KeyPress::new("a"), toasts));
        assert!(!on_context_menu(protection, toasts));

        let warnings: Vec<String> = toasts.with(|queue| {
            queue.toasts().iter().map(|toast| toast.message.clone()).collect()
        });
        assert_eq!(warnings, [DEVTOOLS_DISABLED]);
    }
}
