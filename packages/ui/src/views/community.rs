use dioxus::prelude::*;

use store::models::{Community, CommunityStatus, OnboardingStatus};
use store::NamedRef;

use crate::components::{Alert, AlertVariant, Button, ButtonVariant, ChoiceField, DetailRow, Field};
use crate::forms::{choices, CommunityForm, RecordForm};
use crate::hooks::{found, use_action, use_loader};
use crate::navigator::NavAction;
use crate::repo::records;

use super::page::{or_dash, LoadStatus, PageHeader};
use super::{ConfirmDialog, ModalOverlay};

#[component]
pub fn CommunityManager(on_navigate: EventHandler<NavAction>) -> Element {
    let communities = use_loader::<Vec<Community>>();
    let clients = use_loader::<Vec<NamedRef>>();
    let mut editor_open = use_signal(|| false);
    let mut draft = use_signal(CommunityForm::default);
    let mut deleting = use_signal(|| Option::<(String, String)>::None);
    let save = use_action();
    let remove = use_action();

    let reload = move || {
        let r = records();
        communities.load("communities", async move { r.communities().await });
    };
    use_effect(move || reload());

    let mut open_editor = move |form: CommunityForm| {
        save.clear();
        draft.set(form);
        editor_open.set(true);
        let r = records();
        clients.load("clients", async move { r.client_refs().await });
    };

    let submit = move |_| {
        let form = draft();
        match form.to_record() {
            Err(e) => save.reject(e),
            Ok(community) => {
                let r = records();
                let id = form.editing().map(str::to_string);
                let verb = if id.is_some() { "Update" } else { "Add" };
                save.run(
                    format!("{verb} community {}", community.name),
                    async move { r.save(id.as_deref(), &community).await },
                    move || {
                        editor_open.set(false);
                        reload();
                    },
                );
            }
        }
    };

    let confirm_delete = move |_| {
        let Some((id, name)) = deleting() else {
            return;
        };
        let r = records();
        remove.run(
            format!("Delete community {name}"),
            async move { r.delete::<Community>(&id).await },
            move || {
                deleting.set(None);
                reload();
            },
        );
    };

    rsx! {
        div {
            class: "view-page",
            PageHeader {
                title: "Communities",
                Button {
                    onclick: move |_| open_editor(CommunityForm::default()),
                    "Add Community"
                }
            }
            LoadStatus { loading: communities.loading(), error: communities.error() }

            table {
                class: "data-table",
                thead {
                    tr {
                        th { "Name" }
                        th { "Locality" }
                        th { "Country" }
                        th { "Status" }
                        th { "Onboarding" }
                        th { "Actions" }
                    }
                }
                tbody {
                    for community in (communities.data)() {
                        tr {
                            key: "{community.id.clone().unwrap_or_default()}",
                            td { "{community.name}" }
                            td { "{community.locality}" }
                            td { "{community.country}" }
                            td { span { class: "badge", "{community.status}" } }
                            td { "{community.onboarding_status}" }
                            td {
                                class: "row-actions",
                                Button {
                                    variant: ButtonVariant::Secondary,
                                    small: true,
                                    onclick: {
                                        let id = community.id.clone().unwrap_or_default();
                                        move |_| on_navigate.call(NavAction::OpenCommunity(id.clone()))
                                    },
                                    "Details"
                                }
                                Button {
                                    variant: ButtonVariant::Outline,
                                    small: true,
                                    onclick: {
                                        let form = CommunityForm::from_record(&community);
                                        move |_| open_editor(form.clone())
                                    },
                                    "Update"
                                }
                                Button {
                                    variant: ButtonVariant::Destructive,
                                    small: true,
                                    onclick: {
                                        let target = (community.id.clone().unwrap_or_default(), community.name.clone());
                                        move |_| {
                                            remove.clear();
                                            deleting.set(Some(target.clone()));
                                        }
                                    },
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
            if (communities.data)().is_empty() && !communities.loading() {
                p { class: "view-muted", "No communities yet." }
            }
        }

        if editor_open() {
            ModalOverlay {
                title: if draft().editing().is_some() { "Update Community" } else { "Add Community" },
                wide: true,
                on_close: move |_| editor_open.set(false),
                if let Some(err) = clients.error() {
                    Alert { variant: AlertVariant::Warning, "Could not load clients: {err}" }
                }
                CommunityFields { draft, clients: (clients.data)() }
                if let Some(err) = (save.error)() {
                    Alert { "{err}" }
                }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| editor_open.set(false),
                        "Cancel"
                    }
                    Button {
                        disabled: (save.busy)(),
                        onclick: submit,
                        if (save.busy)() { "Saving..." } else { "Save" }
                    }
                }
            }
        }

        if let Some((_, name)) = deleting() {
            ConfirmDialog {
                title: "Delete Community",
                message: format!("Delete {name}? Its units, residents and staff may become unreachable."),
                busy: (remove.busy)(),
                error: (remove.error)(),
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn CommunityFields(draft: Signal<CommunityForm>, clients: Vec<NamedRef>) -> Element {
    let mut draft = draft;
    let form = draft();
    let client_options: Vec<(String, String)> =
        clients.into_iter().map(|c| (c.id, c.name)).collect();

    rsx! {
        ChoiceField {
            id: "community-client",
            label: "Client",
            value: form.client_id,
            options: client_options,
            placeholder: "Select a client",
            onchange: move |v: String| draft.write().client_id = v,
        }
        Field {
            id: "community-name",
            label: "Name",
            required: true,
            value: form.name,
            oninput: move |v: String| draft.write().name = v,
        }
        Field {
            id: "community-address1",
            label: "Address line 1",
            required: true,
            value: form.address_line1,
            oninput: move |v: String| draft.write().address_line1 = v,
        }
        div {
            class: "form-grid",
            Field {
                id: "community-address2",
                label: "Address line 2",
                value: form.address_line2,
                oninput: move |v: String| draft.write().address_line2 = v,
            }
            Field {
                id: "community-address3",
                label: "Address line 3",
                value: form.address_line3,
                oninput: move |v: String| draft.write().address_line3 = v,
            }
            Field {
                id: "community-locality",
                label: "Locality",
                required: true,
                value: form.locality,
                oninput: move |v: String| draft.write().locality = v,
            }
            Field {
                id: "community-subdivision",
                label: "State / province",
                required: true,
                value: form.country_subdivision,
                oninput: move |v: String| draft.write().country_subdivision = v,
            }
            Field {
                id: "community-postal",
                label: "Postal code",
                required: true,
                value: form.postal_code,
                oninput: move |v: String| draft.write().postal_code = v,
            }
            Field {
                id: "community-country",
                label: "Country",
                required: true,
                value: form.country,
                oninput: move |v: String| draft.write().country = v,
            }
            ChoiceField {
                id: "community-status",
                label: "Status",
                value: form.status.to_string(),
                options: choices(CommunityStatus::ALL),
                onchange: move |v: String| {
                    if let Some(status) = CommunityStatus::from_label(&v) {
                        draft.write().status = status;
                    }
                },
            }
            ChoiceField {
                id: "community-onboarding",
                label: "Onboarding status",
                value: form.onboarding_status.to_string(),
                options: choices(OnboardingStatus::ALL),
                onchange: move |v: String| {
                    if let Some(status) = OnboardingStatus::from_label(&v) {
                        draft.write().onboarding_status = status;
                    }
                },
            }
            Field {
                id: "community-timezone",
                label: "Timezone",
                value: form.timezone,
                oninput: move |v: String| draft.write().timezone = v,
            }
            Field {
                id: "community-onboarding-date",
                label: "Onboarding date",
                r#type: "date",
                value: form.onboarding_date,
                oninput: move |v: String| draft.write().onboarding_date = v,
            }
            Field {
                id: "community-email",
                label: "Contact email",
                r#type: "email",
                value: form.contact_email,
                oninput: move |v: String| draft.write().contact_email = v,
            }
            Field {
                id: "community-phone",
                label: "Contact phone",
                r#type: "tel",
                value: form.contact_phone,
                oninput: move |v: String| draft.write().contact_phone = v,
            }
        }
        Field {
            id: "community-logo",
            label: "Logo URL",
            r#type: "url",
            value: form.logo_url,
            oninput: move |v: String| draft.write().logo_url = v,
        }
    }
}

/// Address and status of one community, with links to its units,
/// residents and staff.
#[component]
pub fn CommunityDetail(id: String, on_navigate: EventHandler<NavAction>) -> Element {
    let mut current = use_signal(|| id.clone());
    if *current.peek() != id {
        current.set(id.clone());
    }

    let community = use_loader::<Option<Community>>();
    use_effect(move || {
        let id = current();
        let r = records();
        community.load("community", async move { found(r.get::<Community>(&id).await) });
    });

    rsx! {
        div {
            class: "view-page",
            PageHeader {
                title: (community.data)().map(|c| c.name).unwrap_or_else(|| "Community".to_string()),
                back_label: "Back to Communities",
                on_back: move |_| on_navigate.call(NavAction::Back),
            }
            LoadStatus { loading: community.loading(), error: community.error() }

            if let Some(c) = (community.data)() {
                div {
                    class: "detail-card",
                    div {
                        class: "detail-address",
                        strong { "Address" }
                        p { "{c.address_line1}" }
                        if let Some(line) = c.address_line2.clone().filter(|l| !l.is_empty()) {
                            p { "{line}" }
                        }
                        if let Some(line) = c.address_line3.clone().filter(|l| !l.is_empty()) {
                            p { "{line}" }
                        }
                        p { "{c.locality_line()}" }
                        p { "{c.country}" }
                    }
                    DetailRow { label: "Status", value: c.status.to_string() }
                    DetailRow { label: "Onboarding status", value: c.onboarding_status.to_string() }
                    DetailRow { label: "Onboarding date", value: or_dash(&c.onboarding_date) }
                    DetailRow { label: "Timezone", value: or_dash(&c.timezone) }
                    DetailRow { label: "Contact email", value: or_dash(&c.contact_email) }
                    DetailRow { label: "Contact phone", value: or_dash(&c.contact_phone) }
                    DetailRow { label: "Logo URL", value: or_dash(&c.logo_url) }
                }

                div {
                    class: "detail-actions",
                    Button {
                        onclick: {
                            let community_id = current();
                            move |_| on_navigate.call(NavAction::ViewUnits { community_id: community_id.clone() })
                        },
                        "View Units"
                    }
                    Button {
                        onclick: {
                            let (community_id, community_name) = (current(), c.name.clone());
                            move |_| on_navigate.call(NavAction::ViewResidents {
                                community_id: community_id.clone(),
                                community_name: community_name.clone(),
                            })
                        },
                        "View Residents"
                    }
                    Button {
                        onclick: {
                            let (community_id, community_name) = (current(), c.name.clone());
                            move |_| on_navigate.call(NavAction::ViewStaff {
                                community_id: community_id.clone(),
                                community_name: community_name.clone(),
                            })
                        },
                        "View Staff"
                    }
                }
            } else if !community.loading() && community.error().is_none() {
                Alert { variant: AlertVariant::Warning, "Community not found." }
            }
        }
    }
}
