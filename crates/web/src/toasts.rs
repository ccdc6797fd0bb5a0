//! Toast notifications

use jiff::Timestamp;
use leptos::prelude::*;
use skillorbit::ui::{ToastKind, ToastPhase, ToastQueue};

/// Queue a toast and schedule its exit animation and removal.
pub(crate) fn show_toast(toasts: RwSignal<ToastQueue>, message: impl Into<String>, kind: ToastKind) {
    let message = message.into();
    let now = Timestamp::now();

    toasts.update(|queue| {
        queue.show(message, kind, now);
    });

    schedule_toast_updates(toasts);
}

/// Delays after a toast appears: until it starts leaving, and until it is
/// removed.
#[cfg(any(target_arch = "wasm32", test))]
fn toast_delays() -> (std::time::Duration, std::time::Duration) {
    use skillorbit::ui::{TOAST_DISPLAY, TOAST_EXIT};

    (
        TOAST_DISPLAY.unsigned_abs(),
        (TOAST_DISPLAY + TOAST_EXIT).unsigned_abs(),
    )
}

#[cfg(target_arch = "wasm32")]
fn schedule_toast_updates(toasts: RwSignal<ToastQueue>) {
    let (leave_after, remove_after) = toast_delays();

    // Re-render once the toast starts leaving, then drop it after the exit.
    set_timeout(move || toasts.update(|_queue| {}), leave_after);

    set_timeout(
        move || {
            toasts.update(|queue| {
                queue.expire(Timestamp::now());
            });
        },
        remove_after,
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn schedule_toast_updates(_toasts: RwSignal<ToastQueue>) {}

#[component]
pub(crate) fn ToastHost(toasts: RwSignal<ToastQueue>) -> impl IntoView {
    view! {
        <div class="toast-container" id="toastContainer">
            {move || {
                let now = Timestamp::now();

                toasts
                    .with(|queue| {
                        queue
                            .toasts()
                            .iter()
                            .map(|toast| {
                                let animation = match toast.phase(now) {
                                    ToastPhase::Visible => "",
                                    ToastPhase::Leaving => " leaving",
                                };

                                view! {
                                    <div class=format!("{}{animation}", toast.class())>
                                        <i class=format!("fas {}", toast.kind.icon())></i>
                                        <span>{toast.message.clone()}</span>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                    })
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn toasts_leave_after_three_seconds_and_go_after_the_exit() {
        assert_eq!(
            toast_delays(),
            (Duration::from_secs(3), Duration::from_millis(3_300))
        );
    }

    #[test]
    fn show_toast_appends_to_queue() {
        let toasts = RwSignal::new(ToastQueue::default());

        show_toast(toasts, "Enrolled!", ToastKind::Success);
        show_toast(toasts, "Developer tools are disabled.", ToastKind::Warning);

        let messages = toasts.with(|queue| {
            queue
                .toasts()
                .iter()
                .map(|toast| toast.message.clone())
                .collect::<Vec<_>>()
        });

        assert_eq!(messages, ["Enrolled!", "Developer tools are disabled."]);
    }
}
