use dioxus::prelude::*;

use crate::navigator::{NavAction, View};
use crate::repo::use_console;
use crate::{ActivityLogPanel, Navbar};

use super::{
    ClientDetail, ClientManager, CommunityDetail, CommunityManager, HomeView, ResidentDetail,
    ResidentManager, StaffManager, UnitDetail, UnitManager,
};

/// The whole console: menu bar, current screen, and the activity log.
///
/// Expects a [`crate::Console`] and a `Signal<ActivityLog>` in context.
#[component]
pub fn ConsoleView() -> Element {
    let console = use_console();
    let mut view = use_signal(View::default);

    let mut navigate = move |action: NavAction| {
        let next = view.peek().apply(action);
        tracing::debug!(?next, "navigate");
        view.set(next);
    };

    let screen = match view() {
        View::Home => rsx! { HomeView { on_navigate: navigate } },
        View::ClientList => rsx! { ClientManager { on_navigate: navigate } },
        View::ClientDetail { id } => rsx! { ClientDetail { id, on_navigate: navigate } },
        View::CommunityList => rsx! { CommunityManager { on_navigate: navigate } },
        View::CommunityDetail { id } => rsx! { CommunityDetail { id, on_navigate: navigate } },
        View::UnitList { community_id } => rsx! {
            UnitManager { community_id, on_navigate: navigate }
        },
        View::UnitDetail { id, .. } => rsx! { UnitDetail { id, on_navigate: navigate } },
        View::ResidentList { community_id, community_name } => rsx! {
            ResidentManager { community_id, community_name, on_navigate: navigate }
        },
        View::ResidentDetail { id, community_id, community_name } => rsx! {
            ResidentDetail { id, community_id, community_name, on_navigate: navigate }
        },
        View::StaffList { community_id, community_name } => rsx! {
            StaffManager { community_id, community_name, on_navigate: navigate }
        },
    };

    rsx! {
        Navbar {
            active: view().menu(),
            demo: console.demo,
            on_select: move |item| navigate(NavAction::Menu(item)),
        }
        main {
            class: "console-main",
            {screen}
        }
        ActivityLogPanel {}
    }
}
