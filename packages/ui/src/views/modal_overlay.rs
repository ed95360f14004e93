use dioxus::prelude::*;

use crate::components::{Alert, Button, ButtonVariant};

/// A full-screen overlay that centers a titled card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(
    #[props(into)] title: String,
    #[props(default)] wide: bool,
    on_close: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: if wide { "modal-card modal-wide" } else { "modal-card" },
                role: "dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                div {
                    class: "modal-header",
                    h2 { class: "modal-title", "{title}" }
                    button {
                        class: "modal-close",
                        title: "Close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                div { class: "modal-body", {children} }
            }
        }
    }
}

/// Yes/no confirmation for destructive actions.
#[component]
pub fn ConfirmDialog(
    #[props(into)] title: String,
    #[props(into)] message: String,
    #[props(default = "Delete".to_string(), into)] confirm_label: String,
    busy: bool,
    error: Option<String>,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            title,
            on_close: move |_| on_cancel.call(()),
            p { class: "modal-text", "{message}" }
            if let Some(err) = error {
                Alert { "{err}" }
            }
            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    disabled: busy,
                    onclick: move |_| on_confirm.call(()),
                    if busy { "Working..." } else { "{confirm_label}" }
                }
            }
        }
    }
}
