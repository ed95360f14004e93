use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, LogLevel};

const ACTIVITY_LOG_CSS: Asset = asset!("/assets/styling/activity_log.css");

/// Docked list of recent activity, hidden until toggled.
#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();

    if !log().visible {
        return rsx! {};
    }

    let entries = log().shown();
    let errors_only = log().errors_only;

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        div {
            class: "activity-log-panel",
            div {
                class: "activity-log-header",
                span { "Activity" }
                div {
                    class: "activity-log-header-actions",
                    label {
                        input {
                            r#type: "checkbox",
                            checked: errors_only,
                            onchange: move |evt: FormEvent| log.write().errors_only = evt.checked(),
                        }
                        " Errors only"
                    }
                    button {
                        onclick: move |_| log.write().entries.clear(),
                        "Clear"
                    }
                    button {
                        onclick: move |_| log.write().visible = false,
                        "Close"
                    }
                }
            }
            div {
                class: "activity-log-entries",
                if entries.is_empty() {
                    div { class: "activity-log-empty", "Nothing yet." }
                }
                for entry in entries {
                    div {
                        class: match entry.level {
                            LogLevel::Error => "activity-log-entry error",
                            LogLevel::Warning => "activity-log-entry warning",
                            LogLevel::Success => "activity-log-entry success",
                            LogLevel::Info => "activity-log-entry info",
                        },
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        span { " {entry.message}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let count = log().entries.len();
    let errors = log().error_count();

    rsx! {
        button {
            class: if errors > 0 { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            onclick: move |_| {
                let visible = log().visible;
                log.write().visible = !visible;
            },
            title: if errors > 0 { "{errors} failed operation(s)" } else { "Activity log" },
            if count > 0 {
                "Log ({count})"
            } else {
                "Log"
            }
        }
    }
}
