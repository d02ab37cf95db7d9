//! Deterministic client-side page controller for an event-rental booking
//! site, modeled as a tiny in-memory browser so every behavior is testable
//! without a real DOM or network.
//!
//! A [`Page`] is opened from an HTML fixture plus a location path and a
//! [`FormRelay`] implementation. Opening wires the same handlers the site's
//! script installs on `DOMContentLoaded`: the mobile menu toggle, active-link
//! highlighting, the booking price calculator, the delivery sub-form and
//! city distance estimate, the two form submission handlers, and smooth
//! scrolling for same-page anchors. Events are driven through explicit calls
//! (`click`, `type_text`, `dispatch`, ...) and time through a virtual clock
//! (`advance_time`), so runs are fully reproducible.
//!
//! Every DOM lookup returns an `Option`; a missing element silently disables
//! the feature that needed it and nothing else.

use std::error::Error as StdError;
use std::fmt;

mod delivery;
mod dom;
mod forms;
mod html;
mod nav;
mod pricing;
mod scroll;
mod selector;

#[cfg(test)]
mod tests;

pub use delivery::{CITY_DISTANCES, DistanceEstimate, estimate, lookup_distance, normalize_city};
pub use forms::{
    ERROR_REJECTED_MESSAGE, ERROR_TRANSPORT_MESSAGE, FormRelay, RELAY_ENDPOINT, RelayReply,
    SENDING_LABEL, SUCCESS_AUTO_HIDE_MS, SUCCESS_MESSAGE, SubmissionState,
};
pub use pricing::{
    DELIVERY_RATE_PER_MILE, FREE_DELIVERY_MILES, RENTAL_ITEMS, RentalItem, delivery_surcharge,
    format_currency, parse_miles, parse_quantity, subtotal, total,
};

use dom::{Dom, NodeId};
use forms::{FormBinding, FormKind};
use nav::NavState;
use selector::Selector;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    UnknownEvent(String),
    Clock(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::UnknownEvent(event) => write!(f, "unknown event: {event}"),
            Self::Clock(msg) => write!(f, "clock error: {msg}"),
        }
    }
}

impl StdError for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Click,
    Input,
    Change,
    Submit,
}

impl EventKind {
    fn from_name(name: &str) -> Result<Self> {
        match name {
            "click" => Ok(Self::Click),
            "input" => Ok(Self::Input),
            "change" => Ok(Self::Change),
            "submit" => Ok(Self::Submit),
            other => Err(Error::UnknownEvent(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    ToggleMenu,
    CloseMenu,
    RefreshTotals,
    ClampQuantity(NodeId),
    DeliveryChoice,
    CityLookup,
    SubmitForm(usize),
    AnchorScroll(NodeId),
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    target: NodeId,
    event: EventKind,
    action: Action,
}

#[derive(Debug, Clone, Copy)]
enum TimerAction {
    HideMessage(NodeId),
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    id: i64,
    due_ms: i64,
    action: TimerAction,
}

/// One open page: the parsed document, the handlers wired for it, the
/// virtual clock, and the injected relay seam.
pub struct Page {
    pub(crate) dom: Dom,
    path: String,
    pub(crate) relay: Box<dyn FormRelay>,
    listeners: Vec<Listener>,
    pub(crate) forms: Vec<FormBinding>,
    pub(crate) nav: NavState,
    now_ms: i64,
    next_timer_id: i64,
    timers: Vec<PendingTimer>,
    scrolled_to: Option<String>,
}

impl Page {
    /// Parses the fixture and wires every controller whose elements exist,
    /// using the default relay endpoint.
    pub fn open(html: &str, path: &str, relay: Box<dyn FormRelay>) -> Result<Self> {
        Self::open_with_endpoint(html, path, relay, forms::RELAY_ENDPOINT)
    }

    pub fn open_with_endpoint(
        html: &str,
        path: &str,
        relay: Box<dyn FormRelay>,
        endpoint: &str,
    ) -> Result<Self> {
        let dom = html::parse_document(html)?;
        let mut page = Self {
            dom,
            path: path.to_string(),
            relay,
            listeners: Vec::new(),
            forms: Vec::new(),
            nav: NavState::default(),
            now_ms: 0,
            next_timer_id: 1,
            timers: Vec::new(),
            scrolled_to: None,
        };
        page.wire(endpoint)?;
        Ok(page)
    }

    fn wire(&mut self, endpoint: &str) -> Result<()> {
        let menu_toggle = self.query_first(".menu-toggle")?;
        let nav_menu = self.query_first(".nav-menu")?;
        self.nav.menu = nav_menu;
        match (menu_toggle, nav_menu) {
            (Some(toggle), Some(_)) => self.listen(toggle, EventKind::Click, Action::ToggleMenu),
            _ => log::debug!("menu toggle not wired; element missing"),
        }

        let nav_links = self.query_all(".nav-menu a")?;
        for link in &nav_links {
            self.listen(*link, EventKind::Click, Action::CloseMenu);
        }
        nav::highlight_current_page(self, &nav_links);

        let current = nav::current_page_name(&self.path);
        if current == "rentals.html" {
            self.wire_pricing()?;
            self.bind_form("bookingForm", FormKind::Booking, endpoint);
        }
        if current == "contact.html" {
            self.bind_form("contactForm", FormKind::Contact, endpoint);
        }

        for node in self.dom.all_elements() {
            if scroll::is_anchor_link(self, node) {
                self.listen(node, EventKind::Click, Action::AnchorScroll(node));
            }
        }
        Ok(())
    }

    fn wire_pricing(&mut self) -> Result<()> {
        for item in pricing::RENTAL_ITEMS {
            let Some(input) = self.dom.by_id(item.id) else {
                log::debug!("quantity input #{} missing; skipped", item.id);
                continue;
            };
            self.listen(input, EventKind::Input, Action::RefreshTotals);
            self.listen(input, EventKind::Change, Action::ClampQuantity(input));
        }

        if let Some(miles) = self.dom.by_id("deliveryMiles") {
            self.listen(miles, EventKind::Input, Action::RefreshTotals);
        }
        for radio in self.query_all("input[name=delivery]")? {
            self.listen(radio, EventKind::Change, Action::DeliveryChoice);
        }
        if let Some(city) = self.dom.by_id("cityName") {
            self.listen(city, EventKind::Input, Action::CityLookup);
        }

        pricing::refresh_display(self);
        Ok(())
    }

    fn bind_form(&mut self, id: &str, kind: FormKind, endpoint: &str) {
        let Some(form) = self.dom.by_id(id) else {
            log::debug!("form #{id} not present; handler disabled");
            return;
        };
        let submit_button = self
            .dom
            .descendant_elements(form)
            .into_iter()
            .find(|node| dom::is_submit_control(&self.dom, *node));
        let message = self.dom.by_id("formMessage");
        let index = self.forms.len();
        self.forms.push(FormBinding {
            form,
            kind,
            submit_button,
            message,
            endpoint: endpoint.to_string(),
            state: SubmissionState::Idle,
        });
        self.listen(form, EventKind::Submit, Action::SubmitForm(index));
    }

    fn listen(&mut self, target: NodeId, event: EventKind, action: Action) {
        self.listeners.push(Listener {
            target,
            event,
            action,
        });
    }

    /// Clicks an element. A disabled element swallows the click; a click on
    /// an enabled submit control also submits its enclosing form.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let node = self.require(selector)?;
        if self
            .dom
            .element(node)
            .is_some_and(|element| element.disabled)
        {
            return Ok(());
        }
        self.run_listeners(node, EventKind::Click);
        if dom::is_submit_control(&self.dom, node) {
            if let Some(form) = self.dom.enclosing_form(node) {
                self.run_listeners(form, EventKind::Submit);
            }
        }
        Ok(())
    }

    /// Replaces the element's value and fires its input handlers.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let node = self.require(selector)?;
        if let Some(element) = self.dom.element_mut(node) {
            element.value = text.to_string();
        }
        self.run_listeners(node, EventKind::Input);
        Ok(())
    }

    /// Checks or unchecks a checkbox/radio and fires its change handlers.
    /// Checking a radio unchecks the rest of its group first.
    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let node = self.require(selector)?;
        if let Some(element) = self.dom.element_mut(node) {
            element.checked = checked;
        }
        if checked && dom::is_radio_input(&self.dom, node) {
            self.dom.sync_radio_group(node);
        }
        self.run_listeners(node, EventKind::Change);
        Ok(())
    }

    /// Fires the named event (`click`, `input`, `change`, `submit`) on the
    /// element without any of the click-specific side effects.
    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let kind = EventKind::from_name(event)?;
        let node = self.require(selector)?;
        self.run_listeners(node, kind);
        Ok(())
    }

    /// Submits a form directly, as if its native submit fired.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let node = self.require(selector)?;
        self.run_listeners(node, EventKind::Submit);
        Ok(())
    }

    fn run_listeners(&mut self, target: NodeId, event: EventKind) {
        let actions: Vec<Action> = self
            .listeners
            .iter()
            .filter(|listener| listener.target == target && listener.event == event)
            .map(|listener| listener.action)
            .collect();
        for action in actions {
            self.run_action(action);
        }
    }

    fn run_action(&mut self, action: Action) {
        match action {
            Action::ToggleMenu => nav::toggle_menu(self),
            Action::CloseMenu => nav::close_menu(self),
            Action::RefreshTotals => pricing::refresh_display(self),
            Action::ClampQuantity(input) => pricing::clamp_quantity(self, input),
            Action::DeliveryChoice => delivery::on_delivery_choice_change(self),
            Action::CityLookup => delivery::on_city_input(self),
            Action::SubmitForm(index) => forms::handle_submit(self, index),
            Action::AnchorScroll(anchor) => scroll::handle_anchor_click(self, anchor),
        }
    }

    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// Moves the virtual clock forward, running every timer that comes due
    /// in due order.
    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Clock(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let target = self.now_ms + delta_ms;
        loop {
            let next = self
                .timers
                .iter()
                .filter(|timer| timer.due_ms <= target)
                .min_by_key(|timer| (timer.due_ms, timer.id))
                .map(|timer| timer.id);
            let Some(id) = next else {
                break;
            };
            let Some(position) = self.timers.iter().position(|timer| timer.id == id) else {
                break;
            };
            let timer = self.timers.remove(position);
            self.now_ms = self.now_ms.max(timer.due_ms);
            match timer.action {
                TimerAction::HideMessage(node) => self.dom.remove_class(node, "show"),
            }
        }
        self.now_ms = target;
        Ok(())
    }

    pub fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }

    pub(crate) fn schedule_hide_message(&mut self, delay_ms: i64, node: NodeId) {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        self.timers.push(PendingTimer {
            id,
            due_ms: self.now_ms + delay_ms,
            action: TimerAction::HideMessage(node),
        });
    }

    pub fn text_of(&self, selector: &str) -> Result<String> {
        let node = self.require(selector)?;
        Ok(self.dom.text_content(node))
    }

    pub fn value_of(&self, selector: &str) -> Result<String> {
        let node = self.require(selector)?;
        Ok(self
            .dom
            .element(node)
            .map(|element| element.value.clone())
            .unwrap_or_default())
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let node = self.require(selector)?;
        Ok(self.dom.has_class(node, class_name))
    }

    pub fn is_disabled(&self, selector: &str) -> Result<bool> {
        let node = self.require(selector)?;
        Ok(self
            .dom
            .element(node)
            .is_some_and(|element| element.disabled))
    }

    pub fn is_hidden(&self, selector: &str) -> Result<bool> {
        let node = self.require(selector)?;
        Ok(self.dom.element(node).is_some_and(|element| element.hidden))
    }

    /// Id of the element the viewport last scrolled to, if any.
    pub fn last_scroll_target(&self) -> Option<&str> {
        self.scrolled_to.as_deref()
    }

    pub(crate) fn record_scroll(&mut self, id: &str) {
        self.scrolled_to = Some(id.to_string());
    }

    /// Submission state of the form with the given element id, if a handler
    /// was wired for it.
    pub fn submission_state(&self, form_id: &str) -> Option<SubmissionState> {
        let form = self.dom.by_id(form_id)?;
        self.forms
            .iter()
            .find(|binding| binding.form == form)
            .map(|binding| binding.state)
    }

    pub fn menu_open(&self) -> bool {
        self.nav.menu_open
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    fn require(&self, selector: &str) -> Result<NodeId> {
        let parsed = Selector::parse(selector)?;
        selector::query_first(&self.dom, &parsed)
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn query_first(&self, selector: &str) -> Result<Option<NodeId>> {
        let parsed = Selector::parse(selector)?;
        Ok(selector::query_first(&self.dom, &parsed))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let parsed = Selector::parse(selector)?;
        Ok(selector::query_all(&self.dom, &parsed))
    }
}
