//! Shared UI for the community console: screens, navigation and the
//! plumbing that connects them to the record store.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod navigator;
pub use navigator::{MenuItem, NavAction, View};

pub mod request_gate;
pub mod forms;
pub mod hooks;

mod repo;
pub use repo::{demo_store, load_config, records, use_console, Console, ConsoleStore, Records};

pub mod activity_log;
pub use activity_log::{log_activity, use_activity_log, ActivityLog, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};

mod navbar;
pub use navbar::Navbar;

pub mod views;
pub use views::ConsoleView;

pub const MAIN_CSS: Asset = asset!("/assets/main.css");
