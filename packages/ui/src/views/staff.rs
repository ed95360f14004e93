use chrono::NaiveDate;
use dioxus::prelude::*;

use store::models::{parse_date, EmploymentType, Staff, StaffStatus};
use store::StoreError;

use crate::components::{Alert, Button, ButtonVariant, ChoiceField, Field};
use crate::forms::{choices, RecordForm, StaffForm};
use crate::hooks::{use_action, use_loader};
use crate::navigator::NavAction;
use crate::repo::records;

use super::page::{or_dash, LoadStatus, PageHeader};
use super::{ConfirmDialog, ModalOverlay};

/// Staff member picked for termination.
#[derive(Clone, Debug, PartialEq)]
struct Leaving {
    id: String,
    name: String,
    hire_date: Option<NaiveDate>,
}

#[component]
pub fn StaffManager(
    community_id: String,
    community_name: String,
    on_navigate: EventHandler<NavAction>,
) -> Element {
    let mut current = use_signal(|| community_id.clone());
    if *current.peek() != community_id {
        current.set(community_id.clone());
    }

    let staff = use_loader::<Vec<Staff>>();
    let mut editor_open = use_signal(|| false);
    let mut draft = use_signal(StaffForm::default);
    let mut deleting = use_signal(|| Option::<(String, String)>::None);
    let mut leaving = use_signal(|| Option::<Leaving>::None);
    let mut end_date = use_signal(String::new);
    let save = use_action();
    let remove = use_action();
    let terminate = use_action();

    let reload = move || {
        let community_id = current();
        let r = records();
        staff.load("staff", async move { r.staff_in(&community_id).await });
    };
    use_effect(move || reload());

    let mut open_editor = move |form: StaffForm| {
        save.clear();
        draft.set(form);
        editor_open.set(true);
    };

    let submit = move |_| {
        let form = draft();
        match form.to_record() {
            Err(e) => save.reject(e),
            Ok(member) => {
                let r = records();
                let id = form.editing().map(str::to_string);
                let verb = if id.is_some() { "Update" } else { "Add" };
                save.run(
                    format!("{verb} staff member {}", member.full_name()),
                    async move { r.save(id.as_deref(), &member).await },
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
            format!("Delete staff member {name}"),
            async move { r.delete::<Staff>(&id).await },
            move || {
                deleting.set(None);
                reload();
            },
        );
    };

    let confirm_terminate = move |_| {
        let Some(member) = leaving() else {
            return;
        };
        let end = match parse_date(&end_date()) {
            Ok(end) => end,
            Err(_) => {
                terminate.reject(StoreError::validation("End date must be a date."));
                return;
            }
        };
        let r = records();
        terminate.run(
            format!("Terminate {}", member.name),
            async move { r.terminate_staff(&member.id, member.hire_date, end).await },
            move || {
                leaving.set(None);
                reload();
            },
        );
    };

    rsx! {
        div {
            class: "view-page",
            PageHeader {
                title: format!("Staff of {community_name}"),
                back_label: "Back to Community",
                on_back: move |_| on_navigate.call(NavAction::Back),
                Button {
                    onclick: move |_| open_editor(StaffForm::for_community(&current.peek())),
                    "Add Staff"
                }
            }
            LoadStatus { loading: staff.loading(), error: staff.error() }

            table {
                class: "data-table",
                thead {
                    tr {
                        th { "Name" }
                        th { "Job Title" }
                        th { "Department" }
                        th { "Status" }
                        th { "Hire Date" }
                        th { "End Date" }
                        th { "Actions" }
                    }
                }
                tbody {
                    for member in (staff.data)() {
                        tr {
                            key: "{member.id.clone().unwrap_or_default()}",
                            td { "{member.full_name()}" }
                            td { "{member.job_title}" }
                            td { "{or_dash(&member.department)}" }
                            td { span { class: "badge", "{member.status}" } }
                            td { "{or_dash(&member.hire_date)}" }
                            td { "{or_dash(&member.end_date)}" }
                            td {
                                class: "row-actions",
                                Button {
                                    variant: ButtonVariant::Outline,
                                    small: true,
                                    onclick: {
                                        let form = StaffForm::from_record(&member);
                                        move |_| open_editor(form.clone())
                                    },
                                    "Update"
                                }
                                Button {
                                    variant: ButtonVariant::Secondary,
                                    small: true,
                                    disabled: member.status == StaffStatus::Inactive,
                                    onclick: {
                                        let target = Leaving {
                                            id: member.id.clone().unwrap_or_default(),
                                            name: member.full_name(),
                                            hire_date: member.hire_date,
                                        };
                                        move |_| {
                                            terminate.clear();
                                            end_date.set(String::new());
                                            leaving.set(Some(target.clone()));
                                        }
                                    },
                                    "Terminate"
                                }
                                Button {
                                    variant: ButtonVariant::Destructive,
                                    small: true,
                                    onclick: {
                                        let target = (member.id.clone().unwrap_or_default(), member.full_name());
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
            if (staff.data)().is_empty() && !staff.loading() {
                p { class: "view-muted", "No staff recorded for this community." }
            }
        }

        if editor_open() {
            ModalOverlay {
                title: if draft().editing().is_some() { "Update Staff" } else { "Add Staff" },
                wide: true,
                on_close: move |_| editor_open.set(false),
                StaffFields { draft }
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

        if let Some(member) = leaving() {
            ModalOverlay {
                title: format!("Terminate {}", member.name),
                on_close: move |_| leaving.set(None),
                Field {
                    id: "staff-end-date",
                    label: "End date",
                    r#type: "date",
                    required: true,
                    value: end_date(),
                    oninput: move |v: String| end_date.set(v),
                }
                p { class: "form-help", "End date must be after hire date." }
                if let Some(err) = (terminate.error)() {
                    Alert { "{err}" }
                }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| leaving.set(None),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: (terminate.busy)(),
                        onclick: confirm_terminate,
                        if (terminate.busy)() { "Working..." } else { "Terminate" }
                    }
                }
            }
        }

        if let Some((_, name)) = deleting() {
            ConfirmDialog {
                title: "Delete Staff",
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
fn StaffFields(draft: Signal<StaffForm>) -> Element {
    let mut draft = draft;
    let form = draft();
    let editing = form.editing().is_some();
    rsx! {
        div {
            class: "form-grid",
            Field {
                id: "staff-first-name",
                label: "First name",
                required: true,
                value: form.first_name,
                oninput: move |v: String| draft.write().first_name = v,
            }
            Field {
                id: "staff-last-name",
                label: "Last name",
                required: true,
                value: form.last_name,
                oninput: move |v: String| draft.write().last_name = v,
            }
            Field {
                id: "staff-preferred-name",
                label: "Preferred name",
                value: form.preferred_name,
                oninput: move |v: String| draft.write().preferred_name = v,
            }
            Field {
                id: "staff-dob",
                label: "Date of birth",
                r#type: "date",
                value: form.date_of_birth,
                oninput: move |v: String| draft.write().date_of_birth = v,
            }
            Field {
                id: "staff-gender",
                label: "Gender",
                value: form.gender,
                oninput: move |v: String| draft.write().gender = v,
            }
            Field {
                id: "staff-nationality",
                label: "Nationality",
                value: form.nationality,
                oninput: move |v: String| draft.write().nationality = v,
            }
            Field {
                id: "staff-job-title",
                label: "Job title",
                required: true,
                value: form.job_title,
                oninput: move |v: String| draft.write().job_title = v,
            }
            Field {
                id: "staff-department",
                label: "Department",
                value: form.department,
                oninput: move |v: String| draft.write().department = v,
            }
            ChoiceField {
                id: "staff-employment",
                label: "Employment type",
                value: form.employment_type.to_string(),
                options: choices(EmploymentType::ALL),
                onchange: move |v: String| {
                    if let Some(kind) = EmploymentType::from_label(&v) {
                        draft.write().employment_type = kind;
                    }
                },
            }
            ChoiceField {
                id: "staff-status",
                label: "Status",
                value: form.status.to_string(),
                options: choices(StaffStatus::ALL),
                onchange: move |v: String| {
                    if let Some(status) = StaffStatus::from_label(&v) {
                        draft.write().status = status;
                    }
                },
            }
            // Fixed once the record exists; the store never receives it on update.
            Field {
                id: "staff-hire-date",
                label: "Hire date",
                r#type: "date",
                disabled: editing,
                value: form.hire_date,
                oninput: move |v: String| draft.write().hire_date = v,
            }
            Field {
                id: "staff-phone",
                label: "Phone",
                r#type: "tel",
                value: form.primary_phone,
                oninput: move |v: String| draft.write().primary_phone = v,
            }
            Field {
                id: "staff-email",
                label: "Email",
                r#type: "email",
                value: form.primary_email,
                oninput: move |v: String| draft.write().primary_email = v,
            }
        }
        div {
            class: "modal-field",
            label { class: "form-label", r#for: "staff-notes", "Notes" }
            textarea {
                id: "staff-notes",
                class: "form-control",
                rows: 3,
                value: form.notes,
                oninput: move |evt: FormEvent| draft.write().notes = evt.value(),
            }
        }
    }
}
