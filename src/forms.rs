use serde_json::{Map, Value};

use crate::dom::{self, Dom, NodeId};
use crate::{Page, pricing};

/// Default form-relay endpoint. The relay is a third-party service that
/// forwards submissions by email; the site runs no backend of its own.
pub const RELAY_ENDPOINT: &str = "https://formspree.io/f/xjggwkja";

pub const SENDING_LABEL: &str = "Sending...";

/// How long a success message stays visible before auto-hiding.
pub const SUCCESS_AUTO_HIDE_MS: i64 = 8_000;

pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your request has been submitted successfully. We'll get back to you soon!";

pub const ERROR_REJECTED_MESSAGE: &str =
    "Oops! There was a problem submitting your form. Please try again or contact us directly.";

pub const ERROR_TRANSPORT_MESSAGE: &str =
    "Oops! There was a problem submitting your form. Please check your internet connection and try again.";

/// Outcome of the single POST a submission performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayReply {
    /// The relay answered with this HTTP status.
    Status(u16),
    /// The request failed before an HTTP status arrived.
    Failed(String),
    /// The request never resolves. The submit control stays disabled; there
    /// is no timeout on the wire call.
    Pending,
}

/// Seam to the relay service. Production code backs this with a real HTTP
/// client that POSTs `payload` as JSON with `Accept: application/json` and
/// `Content-Type: application/json`; tests inject a scripted double.
pub trait FormRelay {
    fn post(&mut self, url: &str, payload: &Value) -> RelayReply;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Sending,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormKind {
    Booking,
    Contact,
}

#[derive(Debug)]
pub(crate) struct FormBinding {
    pub(crate) form: NodeId,
    pub(crate) kind: FormKind,
    pub(crate) submit_button: Option<NodeId>,
    pub(crate) message: Option<NodeId>,
    pub(crate) endpoint: String,
    pub(crate) state: SubmissionState,
}

/// Runs one full submission: disable, sync, serialize, POST, reflect the
/// outcome, re-enable. The handler suspends only at the relay call; the
/// disabled submit control is the mutual-exclusion guard against a second
/// concurrent submission.
pub(crate) fn handle_submit(page: &mut Page, index: usize) {
    if page.forms[index].state == SubmissionState::Sending {
        return;
    }
    page.forms[index].state = SubmissionState::Sending;

    let original_label = page.forms[index].submit_button.map(|button| {
        let label = page.dom.text_content(button);
        if let Some(element) = page.dom.element_mut(button) {
            element.disabled = true;
        }
        page.dom.set_text_content(button, SENDING_LABEL);
        (button, label)
    });

    if let Some(message) = page.forms[index].message {
        for class in ["show", "success", "error"] {
            page.dom.remove_class(message, class);
        }
    }

    if page.forms[index].kind == FormKind::Booking {
        sync_booking_fields(page);
    }

    let form = page.forms[index].form;
    let payload = Value::Object(serialize_fields(&page.dom, form));
    let endpoint = page.forms[index].endpoint.clone();
    let reply = page.relay.post(&endpoint, &payload);

    match reply {
        RelayReply::Status(code) if (200..300).contains(&code) => {
            show_message(page, index, "success", SUCCESS_MESSAGE);
            page.dom.reset_form(form);
            if let Some(message) = page.forms[index].message {
                page.schedule_hide_message(SUCCESS_AUTO_HIDE_MS, message);
            }
            page.forms[index].state = SubmissionState::Success;
        }
        RelayReply::Status(code) => {
            log::error!("form relay rejected submission with status {code}");
            show_message(page, index, "error", ERROR_REJECTED_MESSAGE);
            page.forms[index].state = SubmissionState::Error;
        }
        RelayReply::Failed(detail) => {
            log::error!("form relay transport failure: {detail}");
            show_message(page, index, "error", ERROR_TRANSPORT_MESSAGE);
            page.forms[index].state = SubmissionState::Error;
        }
        RelayReply::Pending => {
            // Known gap: no request timeout, so the control stays disabled
            // until the page is reopened.
            return;
        }
    }

    if let Some((button, label)) = original_label {
        if let Some(element) = page.dom.element_mut(button) {
            element.disabled = false;
        }
        page.dom.set_text_content(button, &label);
    }
}

/// Copies the visible quantity inputs into their hidden `*-qty` mirrors and
/// the displayed total into `#estimated-total`, so the serialized payload
/// agrees with what the visitor saw.
fn sync_booking_fields(page: &mut Page) {
    for item in pricing::RENTAL_ITEMS {
        let visible = page
            .dom
            .by_id(item.id)
            .and_then(|node| page.dom.element(node))
            .map(|element| element.value.clone())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "0".to_string());
        let mirror_id = format!("{}-qty", item.id);
        if let Some(mirror) = page.dom.by_id(&mirror_id) {
            if let Some(element) = page.dom.element_mut(mirror) {
                element.value = visible;
            }
        }
    }

    let displayed_total = page
        .dom
        .by_id("finalTotal")
        .map(|node| page.dom.text_content(node))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "$0.00".to_string());
    if let Some(hidden_total) = page.dom.by_id("estimated-total") {
        if let Some(element) = page.dom.element_mut(hidden_total) {
            element.value = displayed_total;
        }
    }
}

/// Flattens every named control in the form into `name -> string value`.
/// Radio and checkbox inputs contribute only while checked.
pub(crate) fn serialize_fields(dom: &Dom, form: NodeId) -> Map<String, Value> {
    let mut out = Map::new();
    for control in dom.descendant_elements(form) {
        if !dom::is_form_control(dom, control) {
            continue;
        }
        if dom.tag_name(control) == Some("button") {
            continue;
        }
        let Some(element) = dom.element(control) else {
            continue;
        };
        let Some(name) = element.attrs.get("name") else {
            continue;
        };
        if (dom::is_radio_input(dom, control) || dom::is_checkbox_input(dom, control))
            && !element.checked
        {
            continue;
        }
        out.insert(name.clone(), Value::String(element.value.clone()));
    }
    out
}

fn show_message(page: &mut Page, index: usize, kind: &str, text: &str) {
    let Some(message) = page.forms[index].message else {
        return;
    };
    page.dom.set_text_content(message, text);
    page.dom
        .set_class_list(message, &format!("form-message {kind} show"));
    if let Some(id) = page
        .dom
        .element(message)
        .and_then(|element| element.attrs.get("id"))
        .cloned()
    {
        page.record_scroll(&id);
    }
}
