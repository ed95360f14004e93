//! Which screen the console shows, and how actions move between screens.
//!
//! [`View`] carries every identifier its screen needs, so no screen has to
//! remember where it was opened from. [`View::apply`] is the only way to move:
//! it maps an action to the next view and falls back to [`View::Home`] whenever
//! the result would be missing an identifier.

/// Entries of the top menu, accepted from any view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Home,
    Clients,
    Communities,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Home, MenuItem::Clients, MenuItem::Communities];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Home => "Home",
            MenuItem::Clients => "Clients",
            MenuItem::Communities => "Communities",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Home,
    ClientList,
    ClientDetail {
        id: String,
    },
    CommunityList,
    CommunityDetail {
        id: String,
    },
    UnitList {
        community_id: String,
    },
    UnitDetail {
        id: String,
        community_id: String,
    },
    ResidentList {
        community_id: String,
        community_name: String,
    },
    ResidentDetail {
        id: String,
        community_id: String,
        community_name: String,
    },
    StaffList {
        community_id: String,
        community_name: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    Menu(MenuItem),
    OpenClient(String),
    OpenCommunity(String),
    OpenUnit {
        id: String,
        community_id: String,
    },
    OpenResident {
        id: String,
        community_id: String,
        community_name: String,
    },
    ViewUnits {
        community_id: String,
    },
    ViewResidents {
        community_id: String,
        community_name: String,
    },
    ViewStaff {
        community_id: String,
        community_name: String,
    },
    Back,
}

fn present(s: &str) -> bool {
    !s.trim().is_empty()
}

impl View {
    /// True when every identifier the view needs is present.
    pub fn is_complete(&self) -> bool {
        match self {
            View::Home | View::ClientList | View::CommunityList => true,
            View::ClientDetail { id } | View::CommunityDetail { id } => present(id),
            View::UnitList { community_id } => present(community_id),
            View::UnitDetail { id, community_id } => present(id) && present(community_id),
            View::ResidentList {
                community_id,
                community_name,
            }
            | View::StaffList {
                community_id,
                community_name,
            } => present(community_id) && present(community_name),
            View::ResidentDetail {
                id,
                community_id,
                community_name,
            } => present(id) && present(community_id) && present(community_name),
        }
    }

    /// `self`, or `Home` when incomplete.
    pub fn guarded(self) -> View {
        if self.is_complete() {
            self
        } else {
            tracing::warn!(view = ?self, "missing identifier, returning home");
            View::Home
        }
    }

    /// Where Back leads from this view.
    pub fn parent(&self) -> View {
        match self {
            View::Home | View::ClientList | View::CommunityList => View::Home,
            View::ClientDetail { .. } => View::ClientList,
            View::CommunityDetail { .. } => View::CommunityList,
            View::UnitList { community_id }
            | View::ResidentList { community_id, .. }
            | View::StaffList { community_id, .. } => View::CommunityDetail {
                id: community_id.clone(),
            },
            View::UnitDetail { community_id, .. } => View::UnitList {
                community_id: community_id.clone(),
            },
            View::ResidentDetail {
                community_id,
                community_name,
                ..
            } => View::ResidentList {
                community_id: community_id.clone(),
                community_name: community_name.clone(),
            },
        }
    }

    pub fn apply(&self, action: NavAction) -> View {
        let next = match action {
            NavAction::Menu(MenuItem::Home) => View::Home,
            NavAction::Menu(MenuItem::Clients) => View::ClientList,
            NavAction::Menu(MenuItem::Communities) => View::CommunityList,
            NavAction::OpenClient(id) => View::ClientDetail { id },
            NavAction::OpenCommunity(id) => View::CommunityDetail { id },
            NavAction::OpenUnit { id, community_id } => View::UnitDetail { id, community_id },
            NavAction::OpenResident {
                id,
                community_id,
                community_name,
            } => View::ResidentDetail {
                id,
                community_id,
                community_name,
            },
            NavAction::ViewUnits { community_id } => View::UnitList { community_id },
            NavAction::ViewResidents {
                community_id,
                community_name,
            } => View::ResidentList {
                community_id,
                community_name,
            },
            NavAction::ViewStaff {
                community_id,
                community_name,
            } => View::StaffList {
                community_id,
                community_name,
            },
            NavAction::Back => self.parent(),
        };
        next.guarded()
    }

    /// Menu entry highlighted while this view is shown.
    pub fn menu(&self) -> MenuItem {
        match self {
            View::Home => MenuItem::Home,
            View::ClientList | View::ClientDetail { .. } => MenuItem::Clients,
            _ => MenuItem::Communities,
        }
    }

    /// Label of the Back button on this view.
    pub fn back_label(&self) -> &'static str {
        match self.parent() {
            View::ClientList => "Back to Clients",
            View::CommunityList => "Back to Communities",
            View::CommunityDetail { .. } => "Back to Community",
            View::UnitList { .. } => "Back to Units",
            View::ResidentList { .. } => "Back to Residents",
            _ => "Back",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn community(id: &str) -> View {
        View::CommunityDetail { id: id.into() }
    }

    #[test]
    fn test_menu_from_anywhere() {
        let deep = View::ResidentDetail {
            id: "r1".into(),
            community_id: "c1".into(),
            community_name: "Maple".into(),
        };
        assert_eq!(deep.apply(NavAction::Menu(MenuItem::Clients)), View::ClientList);
        assert_eq!(deep.apply(NavAction::Menu(MenuItem::Home)), View::Home);
        assert_eq!(
            View::Home.apply(NavAction::Menu(MenuItem::Communities)),
            View::CommunityList
        );
    }

    #[test]
    fn test_residents_back_to_their_community() {
        let detail = View::CommunityList.apply(NavAction::OpenCommunity("c1".into()));
        assert_eq!(detail, community("c1"));

        let residents = detail.apply(NavAction::ViewResidents {
            community_id: "c1".into(),
            community_name: "Maple Court".into(),
        });
        assert_eq!(
            residents,
            View::ResidentList {
                community_id: "c1".into(),
                community_name: "Maple Court".into(),
            }
        );
        assert_eq!(residents.apply(NavAction::Back), community("c1"));
    }

    #[test]
    fn test_back_chain() {
        let unit = View::UnitDetail {
            id: "u1".into(),
            community_id: "c1".into(),
        };
        let units = unit.apply(NavAction::Back);
        assert_eq!(
            units,
            View::UnitList {
                community_id: "c1".into()
            }
        );
        let detail = units.apply(NavAction::Back);
        assert_eq!(detail, community("c1"));
        assert_eq!(detail.apply(NavAction::Back), View::CommunityList);
        assert_eq!(View::CommunityList.apply(NavAction::Back), View::Home);
        assert_eq!(View::Home.apply(NavAction::Back), View::Home);

        let resident = View::ResidentDetail {
            id: "r1".into(),
            community_id: "c1".into(),
            community_name: "Maple".into(),
        };
        assert_eq!(
            resident.apply(NavAction::Back),
            View::ResidentList {
                community_id: "c1".into(),
                community_name: "Maple".into(),
            }
        );
        let staff = View::StaffList {
            community_id: "c1".into(),
            community_name: "Maple".into(),
        };
        assert_eq!(staff.apply(NavAction::Back), community("c1"));
    }

    #[test]
    fn test_missing_identifiers_go_home() {
        assert_eq!(
            View::ClientList.apply(NavAction::OpenClient(String::new())),
            View::Home
        );
        assert_eq!(
            community("c1").apply(NavAction::ViewResidents {
                community_id: "c1".into(),
                community_name: "  ".into(),
            }),
            View::Home
        );
        assert_eq!(
            community("c1").apply(NavAction::ViewStaff {
                community_id: String::new(),
                community_name: "Maple".into(),
            }),
            View::Home
        );
        assert_eq!(
            View::UnitList {
                community_id: "c1".into()
            }
            .apply(NavAction::OpenUnit {
                id: String::new(),
                community_id: "c1".into(),
            }),
            View::Home
        );
        assert_eq!(View::ClientDetail { id: String::new() }.guarded(), View::Home);
    }

    #[test]
    fn test_community_from_client_returns_to_list() {
        let client = View::ClientList.apply(NavAction::OpenClient("k1".into()));
        let owned = client.apply(NavAction::OpenCommunity("c9".into()));
        assert_eq!(owned, community("c9"));
        assert_eq!(owned.apply(NavAction::Back), View::CommunityList);
    }

    #[test]
    fn test_menu_highlight_and_back_label() {
        assert_eq!(View::ClientDetail { id: "k".into() }.menu(), MenuItem::Clients);
        assert_eq!(
            View::UnitList {
                community_id: "c".into()
            }
            .menu(),
            MenuItem::Communities
        );
        assert_eq!(
            View::UnitList {
                community_id: "c".into()
            }
            .back_label(),
            "Back to Community"
        );
        assert_eq!(community("c").back_label(), "Back to Communities");
    }
}
