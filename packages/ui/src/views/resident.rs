use dioxus::prelude::*;

use store::models::{parse_date, Resident, ResidentStatus, Unit, UnitResident};
use store::StoreError;

use crate::activity_log::{log_failure, use_activity_log};
use crate::components::{
    Alert, AlertVariant, Button, ButtonVariant, ChoiceField, DetailRow, Field, Label, Spinner,
};
use crate::forms::{assignable_units, choices, PhotoState, RecordForm, ResidentForm};
use crate::hooks::{found, use_action, use_loader};
use crate::navigator::NavAction;
use crate::repo::{photos, records};

use super::page::{or_dash, LoadStatus, PageHeader};
use super::{ConfirmDialog, ModalOverlay};

/// Residents of one community. The community name is carried along so the
/// heading and the detail view can show it without another fetch.
#[component]
pub fn ResidentManager(
    community_id: String,
    community_name: String,
    on_navigate: EventHandler<NavAction>,
) -> Element {
    let mut current = use_signal(|| community_id.clone());
    if *current.peek() != community_id {
        current.set(community_id.clone());
    }

    let residents = use_loader::<Vec<Resident>>();
    let mut editor_open = use_signal(|| false);
    let mut draft = use_signal(ResidentForm::default);
    let mut photo = use_signal(PhotoState::default);
    let mut deleting = use_signal(|| Option::<(String, String)>::None);
    let save = use_action();
    let remove = use_action();

    let reload = move || {
        let community_id = current();
        let r = records();
        residents.load("residents", async move { r.residents_in(&community_id).await });
    };
    use_effect(move || reload());

    let mut open_editor = move |form: ResidentForm| {
        save.clear();
        photo.set(PhotoState::from_blob(form.photo_blob.as_deref()));
        draft.set(form);
        editor_open.set(true);
    };

    let submit = move |_| {
        if photo.peek().busy {
            return;
        }
        let form = draft();
        match form.to_record() {
            Err(e) => save.reject(e),
            Ok(resident) => {
                let r = records();
                let id = form.editing().map(str::to_string);
                let verb = if id.is_some() { "Update" } else { "Add" };
                save.run(
                    format!("{verb} resident {}", resident.full_name()),
                    async move { r.save(id.as_deref(), &resident).await },
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
            format!("Delete resident {name}"),
            async move { r.delete::<Resident>(&id).await },
            move || {
                deleting.set(None);
                reload();
            },
        );
    };

    let photo_busy = photo().busy;

    rsx! {
        div {
            class: "view-page",
            PageHeader {
                title: format!("Residents of {community_name}"),
                back_label: "Back to Community",
                on_back: move |_| on_navigate.call(NavAction::Back),
                Button {
                    onclick: move |_| open_editor(ResidentForm::for_community(&current.peek())),
                    "Add Resident"
                }
            }
            LoadStatus { loading: residents.loading(), error: residents.error() }

            table {
                class: "data-table",
                thead {
                    tr {
                        th { "Photo" }
                        th { "Name" }
                        th { "Status" }
                        th { "Phone" }
                        th { "Email" }
                        th { "Actions" }
                    }
                }
                tbody {
                    for resident in (residents.data)() {
                        tr {
                            key: "{resident.id.clone().unwrap_or_default()}",
                            td {
                                if let Some(src) = resident.photo_data_url() {
                                    img { class: "avatar", src, alt: "{resident.full_name()}" }
                                } else {
                                    div { class: "avatar avatar-empty" }
                                }
                            }
                            td { "{resident.full_name()}" }
                            td { span { class: "badge", "{resident.status}" } }
                            td { "{or_dash(&resident.primary_phone)}" }
                            td { "{or_dash(&resident.primary_email)}" }
                            td {
                                class: "row-actions",
                                Button {
                                    variant: ButtonVariant::Secondary,
                                    small: true,
                                    onclick: {
                                        let id = resident.id.clone().unwrap_or_default();
                                        let community_name = community_name.clone();
                                        move |_| on_navigate.call(NavAction::OpenResident {
                                            id: id.clone(),
                                            community_id: current.peek().clone(),
                                            community_name: community_name.clone(),
                                        })
                                    },
                                    "Details"
                                }
                                Button {
                                    variant: ButtonVariant::Outline,
                                    small: true,
                                    onclick: {
                                        let form = ResidentForm::from_record(&resident);
                                        move |_| open_editor(form.clone())
                                    },
                                    "Update"
                                }
                                Button {
                                    variant: ButtonVariant::Destructive,
                                    small: true,
                                    onclick: {
                                        let target = (resident.id.clone().unwrap_or_default(), resident.full_name());
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
            if (residents.data)().is_empty() && !residents.loading() {
                p { class: "view-muted", "No residents in this community yet." }
            }
        }

        if editor_open() {
            ModalOverlay {
                title: if draft().editing().is_some() { "Update Resident" } else { "Add Resident" },
                wide: true,
                on_close: move |_| editor_open.set(false),
                ResidentFields { draft, photo }
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
                        disabled: (save.busy)() || photo_busy,
                        onclick: submit,
                        if (save.busy)() { "Saving..." } else { "Save" }
                    }
                }
            }
        }

        if let Some((_, name)) = deleting() {
            ConfirmDialog {
                title: "Delete Resident",
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
fn ResidentFields(draft: Signal<ResidentForm>, photo: Signal<PhotoState>) -> Element {
    let mut draft = draft;
    let mut photo = photo;
    let mut log = use_activity_log();
    let form = draft();
    let state = photo();

    let on_photo = move |evt: FormEvent| {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        let pipeline = photos();
        let ticket = photo.write().begin();
        spawn(async move {
            match file.read_bytes().await {
                Ok(bytes) => {
                    let result = pipeline.process_async(bytes.to_vec()).await;
                    if let Err(e) = &result {
                        log_failure(&mut log, "Processing photo", e);
                    }
                    if let Some(blob) = photo.write().finish(ticket, result) {
                        draft.write().photo_blob = Some(blob);
                    }
                }
                Err(e) => {
                    log_failure(&mut log, "Reading photo", &e);
                    photo.write().fail(ticket, format!("Could not read the file: {e}"));
                }
            }
        });
    };

    rsx! {
        div {
            class: "photo-field",
            if let Some(src) = state.preview.clone() {
                img { class: "photo-preview", src, alt: "Resident photo" }
            } else {
                div { class: "photo-preview photo-empty", "No Photo" }
            }
            div {
                Label { html_for: "resident-photo", "Photo" }
                input {
                    id: "resident-photo",
                    r#type: "file",
                    accept: "image/*",
                    disabled: state.busy,
                    onchange: on_photo,
                }
                if state.busy {
                    Spinner {}
                }
                if let Some(err) = state.error.clone() {
                    Alert { "{err}" }
                }
            }
        }
        div {
            class: "form-grid",
            Field {
                id: "resident-first-name",
                label: "First name",
                required: true,
                value: form.first_name,
                oninput: move |v: String| draft.write().first_name = v,
            }
            Field {
                id: "resident-last-name",
                label: "Last name",
                required: true,
                value: form.last_name,
                oninput: move |v: String| draft.write().last_name = v,
            }
            Field {
                id: "resident-preferred-name",
                label: "Preferred name",
                value: form.preferred_name,
                oninput: move |v: String| draft.write().preferred_name = v,
            }
            Field {
                id: "resident-dob",
                label: "Date of birth",
                r#type: "date",
                value: form.date_of_birth,
                oninput: move |v: String| draft.write().date_of_birth = v,
            }
            Field {
                id: "resident-gender",
                label: "Gender",
                value: form.gender,
                oninput: move |v: String| draft.write().gender = v,
            }
            ChoiceField {
                id: "resident-status",
                label: "Status",
                value: form.status.to_string(),
                options: choices(ResidentStatus::ALL),
                onchange: move |v: String| {
                    if let Some(status) = ResidentStatus::from_label(&v) {
                        draft.write().status = status;
                    }
                },
            }
            Field {
                id: "resident-phone",
                label: "Phone",
                r#type: "tel",
                value: form.primary_phone,
                oninput: move |v: String| draft.write().primary_phone = v,
            }
            Field {
                id: "resident-email",
                label: "Email",
                r#type: "email",
                value: form.primary_email,
                oninput: move |v: String| draft.write().primary_email = v,
            }
        }
    }
}

/// One resident with their unit assignments.
#[component]
pub fn ResidentDetail(
    id: String,
    community_id: String,
    community_name: String,
    on_navigate: EventHandler<NavAction>,
) -> Element {
    let mut current = use_signal(|| (id.clone(), community_id.clone()));
    if *current.peek() != (id.clone(), community_id.clone()) {
        current.set((id.clone(), community_id.clone()));
    }

    let resident = use_loader::<Option<Resident>>();
    let assignments = use_loader::<Vec<UnitResident>>();
    let units = use_loader::<Vec<Unit>>();
    let mut unit_choice = use_signal(String::new);
    let mut move_in = use_signal(String::new);
    let mut removing = use_signal(|| Option::<(String, String)>::None);
    let assign = use_action();
    let unassign = use_action();

    let reload_assignments = move || {
        let (id, _) = current();
        let r = records();
        assignments.load("unit assignments", async move { r.assignments_of(&id).await });
    };

    use_effect(move || {
        let (id, community_id) = current();
        let r = records();
        resident.load("resident", {
            let (r, id) = (r.clone(), id.clone());
            async move { found(r.get::<Resident>(&id).await) }
        });
        units.load("units", async move { r.units_in(&community_id).await });
        reload_assignments();
    });

    let unit_title = move |unit_id: &str| -> String {
        units
            .data
            .read()
            .iter()
            .find(|u| u.id.as_deref() == Some(unit_id))
            .map(Unit::title)
            .unwrap_or_else(|| unit_id.to_string())
    };

    let submit_assignment = move |_| {
        let unit_id = unit_choice();
        let move_in_date = match parse_date(&move_in()) {
            Ok(date) => date,
            Err(_) => {
                assign.reject(StoreError::validation("Move-in date must be a date."));
                return;
            }
        };
        let (resident_id, _) = current();
        let r = records();
        assign.run(
            format!("Assign unit {}", unit_title(&unit_id)),
            async move { r.assign_unit(&resident_id, &unit_id, move_in_date).await },
            move || {
                unit_choice.set(String::new());
                move_in.set(String::new());
                reload_assignments();
            },
        );
    };

    let confirm_unassign = move |_| {
        let Some((assignment_id, title)) = removing() else {
            return;
        };
        let r = records();
        unassign.run(
            format!("Remove unit {title}"),
            async move { r.unassign(&assignment_id).await },
            move || {
                removing.set(None);
                reload_assignments();
            },
        );
    };

    let unit_options = assignable_units(&units.data.read(), &assignments.data.read());

    rsx! {
        div {
            class: "view-page",
            PageHeader {
                title: (resident.data)().map(|r| r.full_name()).unwrap_or_else(|| "Resident".to_string()),
                back_label: format!("Back to Residents of {community_name}"),
                on_back: move |_| on_navigate.call(NavAction::Back),
            }
            LoadStatus { loading: resident.loading(), error: resident.error() }

            if let Some(r) = (resident.data)() {
                div {
                    class: "detail-card detail-with-photo",
                    if let Some(src) = r.photo_data_url() {
                        img { class: "photo-large", src, alt: "{r.full_name()}" }
                    } else {
                        div { class: "photo-large photo-empty", "No Photo" }
                    }
                    div {
                        DetailRow { label: "Preferred name", value: or_dash(&r.preferred_name) }
                        DetailRow { label: "Date of birth", value: or_dash(&r.date_of_birth) }
                        DetailRow { label: "Gender", value: or_dash(&r.gender) }
                        DetailRow { label: "Phone", value: or_dash(&r.primary_phone) }
                        DetailRow { label: "Email", value: or_dash(&r.primary_email) }
                        DetailRow { label: "Status", value: r.status.to_string() }
                    }
                }

                h2 { class: "view-section-title", "Units" }
                LoadStatus { loading: assignments.loading(), error: assignments.error() }
                if (assignments.data)().is_empty() && !assignments.loading() {
                    p { class: "view-muted", "Not assigned to any unit." }
                }
                ul {
                    class: "link-list",
                    for assignment in (assignments.data)() {
                        li {
                            key: "{assignment.id.clone().unwrap_or_default()}",
                            button {
                                class: "link-button",
                                onclick: {
                                    let unit_id = assignment.unit_id.clone();
                                    move |_| on_navigate.call(NavAction::OpenUnit {
                                        id: unit_id.clone(),
                                        community_id: current.peek().1.clone(),
                                    })
                                },
                                "{unit_title(&assignment.unit_id)}"
                            }
                            span { class: "view-muted", " moved in {or_dash(&assignment.move_in_date)} " }
                            Button {
                                variant: ButtonVariant::Ghost,
                                small: true,
                                onclick: {
                                    let target = (
                                        assignment.id.clone().unwrap_or_default(),
                                        unit_title(&assignment.unit_id),
                                    );
                                    move |_| {
                                        unassign.clear();
                                        removing.set(Some(target.clone()));
                                    }
                                },
                                "Remove"
                            }
                        }
                    }
                }

                div {
                    class: "assign-row",
                    ChoiceField {
                        id: "assign-unit",
                        label: "Unit",
                        value: unit_choice(),
                        options: unit_options,
                        placeholder: "Select a unit",
                        onchange: move |v: String| unit_choice.set(v),
                    }
                    Field {
                        id: "assign-move-in",
                        label: "Move-in date",
                        r#type: "date",
                        value: move_in(),
                        oninput: move |v: String| move_in.set(v),
                    }
                    Button {
                        disabled: (assign.busy)(),
                        onclick: submit_assignment,
                        if (assign.busy)() { "Assigning..." } else { "Assign Unit" }
                    }
                }
                if let Some(err) = (assign.error)() {
                    Alert { "{err}" }
                }
            } else if !resident.loading() && resident.error().is_none() {
                Alert { variant: AlertVariant::Warning, "Resident not found." }
            }
        }

        if let Some((_, title)) = removing() {
            ConfirmDialog {
                title: "Remove Unit",
                message: format!("Remove the assignment to {title}?"),
                confirm_label: "Remove",
                busy: (unassign.busy)(),
                error: (unassign.error)(),
                on_confirm: confirm_unassign,
                on_cancel: move |_| removing.set(None),
            }
        }
    }
}
