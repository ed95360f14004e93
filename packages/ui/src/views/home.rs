use dioxus::prelude::*;

use crate::navigator::{MenuItem, NavAction};

/// Landing screen.
#[component]
pub fn HomeView(on_navigate: EventHandler<NavAction>) -> Element {
    rsx! {
        div {
            class: "view-page home",
            h1 { class: "view-title", "Welcome to the Retirement Community Console" }
            p { class: "view-muted", "Select a menu item to get started." }
            div {
                class: "home-links",
                button {
                    class: "home-card",
                    onclick: move |_| on_navigate.call(NavAction::Menu(MenuItem::Clients)),
                    strong { "Clients" }
                    span { "Operators that own communities" }
                }
                button {
                    class: "home-card",
                    onclick: move |_| on_navigate.call(NavAction::Menu(MenuItem::Communities)),
                    strong { "Communities" }
                    span { "Units, residents and staff" }
                }
            }
        }
    }
}
