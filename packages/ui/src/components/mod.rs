//! Small form and feedback primitives shared by every screen.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Destructive,
    Ghost,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn-primary",
            ButtonVariant::Secondary => "btn btn-secondary",
            ButtonVariant::Outline => "btn btn-outline",
            ButtonVariant::Destructive => "btn btn-destructive",
            ButtonVariant::Ghost => "btn btn-ghost",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] small: bool,
    #[props(default)] disabled: bool,
    #[props(default = "button".to_string(), into)] r#type: String,
    #[props(default, into)] title: String,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let class = if small {
        format!("{} btn-sm", variant.class())
    } else {
        variant.class().to_string()
    };
    rsx! {
        button {
            class,
            r#type,
            title,
            disabled,
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn Label(#[props(into)] html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "form-label", r#for: html_for, {children} }
    }
}

/// Text-like `<input>` bound to a string value.
#[component]
pub fn Input(
    #[props(into)] id: String,
    #[props(default = "text".to_string(), into)] r#type: String,
    #[props(into)] value: String,
    #[props(default, into)] placeholder: String,
    #[props(default, into)] step: String,
    #[props(default)] disabled: bool,
    #[props(default)] required: bool,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            class: "form-control",
            id,
            r#type,
            value,
            placeholder,
            step: if step.is_empty() { None } else { Some(step) },
            disabled,
            required,
            oninput: move |evt| oninput.call(evt),
        }
    }
}

/// `<select>` over `(value, label)` pairs.
#[component]
pub fn Select(
    #[props(into)] id: String,
    #[props(into)] value: String,
    options: Vec<(String, String)>,
    /// Leading empty option, shown when nothing is chosen.
    #[props(default, into)]
    placeholder: Option<String>,
    #[props(default)] disabled: bool,
    onchange: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        select {
            class: "form-control",
            id,
            disabled,
            onchange: move |evt| onchange.call(evt),
            if let Some(text) = placeholder {
                option { value: "", selected: value.is_empty(), "{text}" }
            }
            for (key, label) in options {
                option { value: "{key}", selected: key == value, "{label}" }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AlertVariant {
    #[default]
    Danger,
    Warning,
    Info,
}

#[component]
pub fn Alert(#[props(default)] variant: AlertVariant, children: Element) -> Element {
    let class = match variant {
        AlertVariant::Danger => "alert alert-danger",
        AlertVariant::Warning => "alert alert-warning",
        AlertVariant::Info => "alert alert-info",
    };
    rsx! {
        div { class, role: "alert", {children} }
    }
}

#[component]
pub fn Spinner() -> Element {
    rsx! {
        div { class: "spinner", role: "status", aria_label: "Loading" }
    }
}

/// Labelled row of a read-only detail card.
#[component]
pub fn DetailRow(#[props(into)] label: String, #[props(into)] value: String) -> Element {
    rsx! {
        div {
            class: "detail-row",
            span { class: "detail-label", "{label}" }
            span { class: "detail-value", "{value}" }
        }
    }
}

/// Label plus input, laid out as one form row.
#[component]
pub fn Field(
    #[props(into)] id: String,
    #[props(into)] label: String,
    #[props(into)] value: String,
    #[props(default = "text".to_string(), into)] r#type: String,
    #[props(default, into)] step: String,
    #[props(default)] required: bool,
    #[props(default)] disabled: bool,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: "modal-field",
            Label {
                html_for: id.clone(),
                "{label}"
                if required {
                    span { class: "required-mark", " *" }
                }
            }
            Input {
                id,
                r#type,
                value,
                step,
                required,
                disabled,
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
        }
    }
}

/// Label plus select, laid out as one form row.
#[component]
pub fn ChoiceField(
    #[props(into)] id: String,
    #[props(into)] label: String,
    #[props(into)] value: String,
    options: Vec<(String, String)>,
    #[props(default, into)] placeholder: Option<String>,
    onchange: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: "modal-field",
            Label { html_for: id.clone(), "{label}" }
            Select {
                id,
                value,
                options,
                placeholder,
                onchange: move |evt: FormEvent| onchange.call(evt.value()),
            }
        }
    }
}
