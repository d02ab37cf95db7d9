use std::cell::RefCell;
use std::rc::Rc;

pub(crate) use super::*;

mod delivery_distance;
mod page_substrate;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedPost {
    pub(crate) url: String,
    pub(crate) payload: serde_json::Value,
}

/// Relay double that answers with a scripted reply and keeps every request
/// it saw behind a shared handle.
pub(crate) struct ScriptedRelay {
    reply: RelayReply,
    posts: Rc<RefCell<Vec<RecordedPost>>>,
}

impl FormRelay for ScriptedRelay {
    fn post(&mut self, url: &str, payload: &serde_json::Value) -> RelayReply {
        self.posts.borrow_mut().push(RecordedPost {
            url: url.to_string(),
            payload: payload.clone(),
        });
        self.reply.clone()
    }
}

pub(crate) fn scripted_relay(
    reply: RelayReply,
) -> (Box<dyn FormRelay>, Rc<RefCell<Vec<RecordedPost>>>) {
    let posts = Rc::new(RefCell::new(Vec::new()));
    let relay = ScriptedRelay {
        reply,
        posts: Rc::clone(&posts),
    };
    (Box::new(relay), posts)
}

pub(crate) fn accepting_relay() -> (Box<dyn FormRelay>, Rc<RefCell<Vec<RecordedPost>>>) {
    scripted_relay(RelayReply::Status(200))
}

pub(crate) const NAV_HTML: &str = "
    <nav>
      <button class='menu-toggle'>Menu</button>
      <ul class='nav-menu'>
        <li><a href='index.html'>Home</a></li>
        <li><a href='rentals.html'>Rentals</a></li>
        <li><a href='contact.html'>Contact</a></li>
      </ul>
    </nav>
";

pub(crate) fn rentals_html() -> String {
    format!(
        "{NAV_HTML}
        <form id='bookingForm'>
          <input id='white-chairs' type='number' value='0'>
          <input id='adult-tables' type='number' value='0'>
          <input id='kids-chairs' type='number' value='0'>
          <input id='kids-tables' type='number' value='0'>
          <input id='white-chairs-qty' name='white-chairs-qty' type='hidden'>
          <input id='adult-tables-qty' name='adult-tables-qty' type='hidden'>
          <input id='kids-chairs-qty' name='kids-chairs-qty' type='hidden'>
          <input id='kids-tables-qty' name='kids-tables-qty' type='hidden'>
          <input id='estimated-total' name='estimated-total' type='hidden'>
          <input id='customerName' name='name'>
          <input id='deliveryYes' type='radio' name='delivery' value='yes'>
          <input id='deliveryNo' type='radio' name='delivery' value='no' checked>
          <div id='deliverySection' hidden>
            <input id='deliveryMiles' name='delivery-miles'>
            <input id='cityName' name='city'>
            <p id='distanceEstimate'></p>
          </div>
          <p>Subtotal: <span id='totalPrice'></span></p>
          <p>Total: <span id='finalTotal'></span></p>
          <div id='formMessage'></div>
          <button type='submit'>Request Booking</button>
        </form>
        <a href='#pricing'>See pricing</a>
        <section id='pricing'>Price list</section>
    "
    )
}

pub(crate) fn contact_html() -> String {
    format!(
        "{NAV_HTML}
        <form id='contactForm'>
          <input id='contactName' name='name'>
          <textarea id='contactMessage' name='message'></textarea>
          <div id='formMessage'></div>
          <button type='submit'>Send Message</button>
        </form>
    "
    )
}

pub(crate) fn open_rentals(relay: Box<dyn FormRelay>) -> Result<Page> {
    Page::open(&rentals_html(), "/rentals.html", relay)
}

pub(crate) fn open_contact(relay: Box<dyn FormRelay>) -> Result<Page> {
    Page::open(&contact_html(), "/contact.html", relay)
}
