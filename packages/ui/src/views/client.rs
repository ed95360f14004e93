use dioxus::prelude::*;

use store::models::{Client, ClientStatus};
use store::NamedRef;

use crate::components::{Alert, AlertVariant, Button, ButtonVariant, ChoiceField, DetailRow, Field};
use crate::forms::{choices, ClientForm, RecordForm};
use crate::hooks::{found, use_action, use_loader};
use crate::navigator::NavAction;
use crate::repo::records;

use super::page::{or_dash, LoadStatus, PageHeader};
use super::{ConfirmDialog, ModalOverlay};

/// Client list with Add / Update / Delete.
#[component]
pub fn ClientManager(on_navigate: EventHandler<NavAction>) -> Element {
    let clients = use_loader::<Vec<Client>>();
    let mut editor_open = use_signal(|| false);
    let mut draft = use_signal(ClientForm::default);
    let mut deleting = use_signal(|| Option::<(String, String)>::None);
    let save = use_action();
    let remove = use_action();

    let reload = move || {
        let r = records();
        clients.load("clients", async move { r.clients().await });
    };
    use_effect(move || reload());

    let mut open_editor = move |form: ClientForm| {
        save.clear();
        draft.set(form);
        editor_open.set(true);
    };

    let submit = move |_| {
        let form = draft();
        match form.to_record() {
            Err(e) => save.reject(e),
            Ok(client) => {
                let r = records();
                let id = form.editing().map(str::to_string);
                let verb = if id.is_some() { "Update" } else { "Add" };
                save.run(
                    format!("{verb} client {}", client.name),
                    async move { r.save(id.as_deref(), &client).await },
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
            format!("Delete client {name}"),
            async move { r.delete::<Client>(&id).await },
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
                title: "Clients",
                Button {
                    onclick: move |_| open_editor(ClientForm::default()),
                    "Add Client"
                }
            }
            LoadStatus { loading: clients.loading(), error: clients.error() }

            table {
                class: "data-table",
                thead {
                    tr {
                        th { "Name" }
                        th { "Status" }
                        th { "Contact" }
                        th { "Email" }
                        th { "Phone" }
                        th { "Actions" }
                    }
                }
                tbody {
                    for client in (clients.data)() {
                        tr {
                            key: "{client.id.clone().unwrap_or_default()}",
                            td { "{client.name}" }
                            td { span { class: "badge", "{client.status}" } }
                            td { "{or_dash(&client.contact_name)}" }
                            td { "{or_dash(&client.contact_email)}" }
                            td { "{or_dash(&client.contact_phone)}" }
                            td {
                                class: "row-actions",
                                Button {
                                    variant: ButtonVariant::Secondary,
                                    small: true,
                                    onclick: {
                                        let id = client.id.clone().unwrap_or_default();
                                        move |_| on_navigate.call(NavAction::OpenClient(id.clone()))
                                    },
                                    "Details"
                                }
                                Button {
                                    variant: ButtonVariant::Outline,
                                    small: true,
                                    onclick: {
                                        let form = ClientForm::from_record(&client);
                                        move |_| open_editor(form.clone())
                                    },
                                    "Update"
                                }
                                Button {
                                    variant: ButtonVariant::Destructive,
                                    small: true,
                                    onclick: {
                                        let target = (client.id.clone().unwrap_or_default(), client.name.clone());
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
            if (clients.data)().is_empty() && !clients.loading() {
                p { class: "view-muted", "No clients yet." }
            }
        }

        if editor_open() {
            ModalOverlay {
                title: if draft().editing().is_some() { "Update Client" } else { "Add Client" },
                on_close: move |_| editor_open.set(false),
                ClientFields { draft }
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
                title: "Delete Client",
                message: format!("Delete {name}? This cannot be undone."),
                busy: (remove.busy)(),
                error: (remove.error)(),
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn ClientFields(draft: Signal<ClientForm>) -> Element {
    let mut draft = draft;
    let form = draft();
    rsx! {
        Field {
            id: "client-name",
            label: "Name",
            required: true,
            value: form.name,
            oninput: move |v: String| draft.write().name = v,
        }
        ChoiceField {
            id: "client-status",
            label: "Status",
            value: form.status.to_string(),
            options: choices(ClientStatus::ALL),
            onchange: move |v: String| {
                if let Some(status) = ClientStatus::from_label(&v) {
                    draft.write().status = status;
                }
            },
        }
        Field {
            id: "client-plan",
            label: "Subscription plan",
            value: form.subscription_plan_id,
            oninput: move |v: String| draft.write().subscription_plan_id = v,
        }
        div {
            class: "form-grid",
            Field {
                id: "client-contact-name",
                label: "Contact name",
                value: form.contact_name,
                oninput: move |v: String| draft.write().contact_name = v,
            }
            Field {
                id: "client-contact-designation",
                label: "Designation",
                value: form.contact_designation,
                oninput: move |v: String| draft.write().contact_designation = v,
            }
            Field {
                id: "client-contact-email",
                label: "Email",
                r#type: "email",
                value: form.contact_email,
                oninput: move |v: String| draft.write().contact_email = v,
            }
            Field {
                id: "client-contact-phone",
                label: "Phone",
                r#type: "tel",
                value: form.contact_phone,
                oninput: move |v: String| draft.write().contact_phone = v,
            }
        }
        Field {
            id: "client-website",
            label: "Website",
            r#type: "url",
            value: form.website,
            oninput: move |v: String| draft.write().website = v,
        }
    }
}

/// One client with the communities it owns.
#[component]
pub fn ClientDetail(id: String, on_navigate: EventHandler<NavAction>) -> Element {
    let mut current = use_signal(|| id.clone());
    if *current.peek() != id {
        current.set(id.clone());
    }

    let client = use_loader::<Option<Client>>();
    let owned = use_loader::<Vec<NamedRef>>();

    use_effect(move || {
        let id = current();
        let r = records();
        client.load("client", {
            let (r, id) = (r.clone(), id.clone());
            async move { found(r.get::<Client>(&id).await) }
        });
        owned.load("owned communities", async move {
            r.communities_of_client(&id).await
        });
    });

    rsx! {
        div {
            class: "view-page",
            PageHeader {
                title: (client.data)().map(|c| c.name).unwrap_or_else(|| "Client".to_string()),
                back_label: "Back to Clients",
                on_back: move |_| on_navigate.call(NavAction::Back),
            }
            LoadStatus { loading: client.loading(), error: client.error() }

            if let Some(c) = (client.data)() {
                div {
                    class: "detail-card",
                    DetailRow { label: "Status", value: c.status.to_string() }
                    DetailRow { label: "Subscription plan", value: or_dash(&c.subscription_plan_id) }
                    DetailRow { label: "Contact", value: or_dash(&c.contact_name) }
                    DetailRow { label: "Designation", value: or_dash(&c.contact_designation) }
                    DetailRow { label: "Email", value: or_dash(&c.contact_email) }
                    DetailRow { label: "Phone", value: or_dash(&c.contact_phone) }
                    DetailRow { label: "Website", value: or_dash(&c.website) }
                }

                h2 { class: "view-section-title", "Communities Owned" }
                LoadStatus { loading: owned.loading(), error: owned.error() }
                if (owned.data)().is_empty() && !owned.loading() {
                    p { class: "view-muted", "This client does not own any communities yet." }
                }
                ul {
                    class: "link-list",
                    for community in (owned.data)() {
                        li {
                            key: "{community.id}",
                            button {
                                class: "link-button",
                                onclick: {
                                    let id = community.id.clone();
                                    move |_| on_navigate.call(NavAction::OpenCommunity(id.clone()))
                                },
                                "{community.name}"
                            }
                        }
                    }
                }
            } else if !client.loading() && client.error().is_none() {
                Alert { variant: AlertVariant::Warning, "Client not found." }
            }
        }
    }
}
