use dioxus::prelude::*;

use store::models::{Unit, UnitStatus, UnitType};

use crate::components::{Alert, AlertVariant, Button, ButtonVariant, ChoiceField, DetailRow, Field};
use crate::forms::{choices, RecordForm, UnitForm};
use crate::hooks::{found, use_action, use_loader};
use crate::navigator::NavAction;
use crate::repo::records;

use super::page::{or_dash, LoadStatus, PageHeader};
use super::{ConfirmDialog, ModalOverlay};

/// Units of one community.
#[component]
pub fn UnitManager(community_id: String, on_navigate: EventHandler<NavAction>) -> Element {
    let mut current = use_signal(|| community_id.clone());
    if *current.peek() != community_id {
        current.set(community_id.clone());
    }

    let units = use_loader::<Vec<Unit>>();
    let mut editor_open = use_signal(|| false);
    let mut draft = use_signal(UnitForm::default);
    let mut deleting = use_signal(|| Option::<(String, String)>::None);
    let save = use_action();
    let remove = use_action();

    let reload = move || {
        let community_id = current();
        let r = records();
        units.load("units", async move { r.units_in(&community_id).await });
    };
    use_effect(move || reload());

    let mut open_editor = move |form: UnitForm| {
        save.clear();
        draft.set(form);
        editor_open.set(true);
    };

    let submit = move |_| {
        let form = draft();
        match form.to_record() {
            Err(e) => save.reject(e),
            Ok(unit) => {
                let r = records();
                let id = form.editing().map(str::to_string);
                let verb = if id.is_some() { "Update" } else { "Add" };
                save.run(
                    format!("{verb} unit {}", unit.unit_number),
                    async move { r.save(id.as_deref(), &unit).await },
                    move || {
                        editor_open.set(false);
                        reload();
                    },
                );
            }
        }
    };

    let confirm_delete = move |_| {
        let Some((id, number)) = deleting() else {
            return;
        };
        let r = records();
        remove.run(
            format!("Delete unit {number}"),
            async move { r.delete::<Unit>(&id).await },
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
                title: "Units",
                back_label: "Back to Community",
                on_back: move |_| on_navigate.call(NavAction::Back),
                Button {
                    onclick: move |_| open_editor(UnitForm::for_community(&current.peek())),
                    "Add Unit"
                }
            }
            LoadStatus { loading: units.loading(), error: units.error() }

            table {
                class: "data-table",
                thead {
                    tr {
                        th { "Unit Number" }
                        th { "Name" }
                        th { "Type" }
                        th { "Status" }
                        th { "Actions" }
                    }
                }
                tbody {
                    for unit in (units.data)() {
                        tr {
                            key: "{unit.id.clone().unwrap_or_default()}",
                            td { "{unit.unit_number}" }
                            td { "{or_dash(&unit.unit_name)}" }
                            td { "{unit.unit_type}" }
                            td { span { class: "badge", "{unit.status}" } }
                            td {
                                class: "row-actions",
                                Button {
                                    variant: ButtonVariant::Secondary,
                                    small: true,
                                    onclick: {
                                        let id = unit.id.clone().unwrap_or_default();
                                        move |_| on_navigate.call(NavAction::OpenUnit {
                                            id: id.clone(),
                                            community_id: current.peek().clone(),
                                        })
                                    },
                                    "Details"
                                }
                                Button {
                                    variant: ButtonVariant::Outline,
                                    small: true,
                                    onclick: {
                                        let form = UnitForm::from_record(&unit);
                                        move |_| open_editor(form.clone())
                                    },
                                    "Update"
                                }
                                Button {
                                    variant: ButtonVariant::Destructive,
                                    small: true,
                                    onclick: {
                                        let target = (unit.id.clone().unwrap_or_default(), unit.unit_number.clone());
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
            if (units.data)().is_empty() && !units.loading() {
                p { class: "view-muted", "No units in this community yet." }
            }
        }

        if editor_open() {
            ModalOverlay {
                title: if draft().editing().is_some() { "Update Unit" } else { "Add Unit" },
                wide: true,
                on_close: move |_| editor_open.set(false),
                UnitFields { draft }
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

        if let Some((_, number)) = deleting() {
            ConfirmDialog {
                title: "Delete Unit",
                message: format!("Delete unit {number}? This cannot be undone."),
                busy: (remove.busy)(),
                error: (remove.error)(),
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn UnitFields(draft: Signal<UnitForm>) -> Element {
    let mut draft = draft;
    let form = draft();
    rsx! {
        div {
            class: "form-grid",
            Field {
                id: "unit-number",
                label: "Unit number",
                required: true,
                value: form.unit_number,
                oninput: move |v: String| draft.write().unit_number = v,
            }
            Field {
                id: "unit-name",
                label: "Name",
                value: form.unit_name,
                oninput: move |v: String| draft.write().unit_name = v,
            }
            ChoiceField {
                id: "unit-type",
                label: "Type",
                value: form.unit_type.to_string(),
                options: choices(UnitType::ALL),
                onchange: move |v: String| {
                    if let Some(kind) = UnitType::from_label(&v) {
                        draft.write().unit_type = kind;
                    }
                },
            }
            ChoiceField {
                id: "unit-status",
                label: "Status",
                value: form.status.to_string(),
                options: choices(UnitStatus::ALL),
                onchange: move |v: String| {
                    if let Some(status) = UnitStatus::from_label(&v) {
                        draft.write().status = status;
                    }
                },
            }
            Field {
                id: "unit-block",
                label: "Block",
                value: form.block,
                oninput: move |v: String| draft.write().block = v,
            }
            Field {
                id: "unit-floor",
                label: "Floor",
                value: form.floor,
                oninput: move |v: String| draft.write().floor = v,
            }
            Field {
                id: "unit-area",
                label: "Area",
                r#type: "number",
                step: "0.01",
                value: form.area,
                oninput: move |v: String| draft.write().area = v,
            }
            Field {
                id: "unit-rent",
                label: "Monthly rent",
                r#type: "number",
                step: "0.01",
                value: form.monthly_rent,
                oninput: move |v: String| draft.write().monthly_rent = v,
            }
            Field {
                id: "unit-bedrooms",
                label: "Bedrooms",
                r#type: "number",
                value: form.bedroom,
                oninput: move |v: String| draft.write().bedroom = v,
            }
            Field {
                id: "unit-bathrooms",
                label: "Bathrooms",
                r#type: "number",
                value: form.bathroom,
                oninput: move |v: String| draft.write().bathroom = v,
            }
            Field {
                id: "unit-capacity",
                label: "Resident capacity",
                r#type: "number",
                value: form.resident_capacity,
                oninput: move |v: String| draft.write().resident_capacity = v,
            }
        }
        label {
            class: "modal-checkbox",
            input {
                r#type: "checkbox",
                checked: form.is_accessible,
                onchange: move |evt: FormEvent| draft.write().is_accessible = evt.checked(),
            }
            " Accessible"
        }
    }
}

#[component]
pub fn UnitDetail(id: String, on_navigate: EventHandler<NavAction>) -> Element {
    let mut current = use_signal(|| id.clone());
    if *current.peek() != id {
        current.set(id.clone());
    }

    let unit = use_loader::<Option<Unit>>();
    use_effect(move || {
        let id = current();
        let r = records();
        unit.load("unit", async move { found(r.get::<Unit>(&id).await) });
    });

    rsx! {
        div {
            class: "view-page",
            PageHeader {
                title: (unit.data)().map(|u| format!("Unit {}", u.title())).unwrap_or_else(|| "Unit".to_string()),
                back_label: "Back to Units",
                on_back: move |_| on_navigate.call(NavAction::Back),
            }
            LoadStatus { loading: unit.loading(), error: unit.error() }

            if let Some(u) = (unit.data)() {
                div {
                    class: "detail-card",
                    DetailRow { label: "Unit number", value: u.unit_number.clone() }
                    DetailRow { label: "Name", value: or_dash(&u.unit_name) }
                    DetailRow { label: "Type", value: u.unit_type.to_string() }
                    DetailRow { label: "Status", value: u.status.to_string() }
                    DetailRow { label: "Block", value: or_dash(&u.block) }
                    DetailRow { label: "Floor", value: or_dash(&u.floor) }
                    DetailRow { label: "Area", value: or_dash(&u.area) }
                    DetailRow { label: "Bedrooms", value: or_dash(&u.bedroom) }
                    DetailRow { label: "Bathrooms", value: or_dash(&u.bathroom) }
                    DetailRow { label: "Monthly rent", value: or_dash(&u.monthly_rent) }
                    DetailRow { label: "Resident capacity", value: or_dash(&u.resident_capacity) }
                    DetailRow { label: "Accessible", value: if u.is_accessible { "Yes" } else { "No" } }
                }
            } else if !unit.loading() && unit.error().is_none() {
                Alert { variant: AlertVariant::Warning, "Unit not found." }
            }
        }
    }
}
