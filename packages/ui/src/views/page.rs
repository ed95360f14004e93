use dioxus::prelude::*;

use crate::components::{Alert, Button, ButtonVariant, Spinner};
use crate::icons::FaArrowLeft;
use crate::Icon;

/// Title row of a screen with an optional Back button and trailing actions.
#[component]
pub fn PageHeader(
    #[props(into)] title: String,
    #[props(default, into)] back_label: Option<String>,
    on_back: Option<EventHandler<()>>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "page-header",
            if let (Some(label), Some(handler)) = (back_label, on_back) {
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| handler.call(()),
                    Icon { icon: FaArrowLeft, width: 12, height: 12 }
                    span { " {label}" }
                }
            }
            h1 { class: "view-title", "{title}" }
            div { class: "page-actions", {children} }
        }
    }
}

/// Spinner while loading, danger banner on error.
#[component]
pub fn LoadStatus(loading: bool, error: Option<String>) -> Element {
    rsx! {
        if let Some(err) = error {
            Alert { "{err}" }
        }
        if loading {
            Spinner {}
        }
    }
}

pub fn or_dash(value: &Option<impl ToString>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "-".to_string())
}
