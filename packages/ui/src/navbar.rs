use dioxus::prelude::*;

use crate::icons::{FaBriefcase, FaBuilding, FaHouse};
use crate::navigator::MenuItem;
use crate::{ActivityLogToggle, Icon};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top menu bar. Menu entries are always enabled.
#[component]
pub fn Navbar(active: MenuItem, demo: bool, on_select: EventHandler<MenuItem>) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "navbar",
            span { class: "navbar-brand", "Community Console" }
            div {
                class: "navbar-menu",
                for item in MenuItem::ALL {
                    button {
                        key: "{item.label()}",
                        class: if item == active { "navbar-item active" } else { "navbar-item" },
                        onclick: move |_| on_select.call(item),
                        match item {
                            MenuItem::Home => rsx! { Icon { icon: FaHouse, width: 14, height: 14 } },
                            MenuItem::Clients => rsx! { Icon { icon: FaBriefcase, width: 14, height: 14 } },
                            MenuItem::Communities => rsx! { Icon { icon: FaBuilding, width: 14, height: 14 } },
                        }
                        span { "{item.label()}" }
                    }
                }
            }
            div {
                class: "navbar-end",
                if demo {
                    span { class: "navbar-badge", title: "No record store configured", "Demo data" }
                }
                ActivityLogToggle {}
            }
        }
    }
}
