use crate::Page;
use crate::dom::NodeId;

/// One rentable item with its fixed per-unit price in dollars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RentalItem {
    pub id: &'static str,
    pub unit_price: f64,
}

/// The fixed catalog. Element ids on the booking page match `id`, and the
/// hidden mirror fields submitted with the form are `<id>-qty`.
pub const RENTAL_ITEMS: [RentalItem; 4] = [
    RentalItem {
        id: "white-chairs",
        unit_price: 1.50,
    },
    RentalItem {
        id: "adult-tables",
        unit_price: 10.00,
    },
    RentalItem {
        id: "kids-chairs",
        unit_price: 3.00,
    },
    RentalItem {
        id: "kids-tables",
        unit_price: 10.00,
    },
];

/// Miles included in every delivery before the surcharge starts.
pub const FREE_DELIVERY_MILES: f64 = 8.0;

/// Per-mile delivery rate in dollars, billed both ways.
pub const DELIVERY_RATE_PER_MILE: f64 = 3.0;

/// Reads a quantity the way the booking form does: non-numeric input counts
/// as zero and negative values contribute nothing.
pub fn parse_quantity(raw: &str) -> u32 {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|q| u32::try_from(q).ok())
        .unwrap_or(0)
}

/// Reads the delivery mileage field; non-numeric or negative input means no
/// chargeable distance.
pub fn parse_miles(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite() && *m >= 0.0)
        .unwrap_or(0.0)
}

/// Sums quantity times unit price over the catalog. `quantities` pairs an
/// item id with its parsed quantity; ids outside the catalog are ignored.
pub fn subtotal(quantities: &[(&str, u32)]) -> f64 {
    RENTAL_ITEMS
        .iter()
        .map(|item| {
            let qty = quantities
                .iter()
                .find(|(id, _)| *id == item.id)
                .map(|(_, qty)| *qty)
                .unwrap_or(0);
            f64::from(qty) * item.unit_price
        })
        .sum()
}

/// Delivery fee: the first [`FREE_DELIVERY_MILES`] are free, the remainder
/// is billed round trip at [`DELIVERY_RATE_PER_MILE`].
pub fn delivery_surcharge(miles: f64) -> f64 {
    let chargeable = (miles - FREE_DELIVERY_MILES).max(0.0);
    chargeable * 2.0 * DELIVERY_RATE_PER_MILE
}

pub fn total(quantities: &[(&str, u32)], miles: f64) -> f64 {
    subtotal(quantities) + delivery_surcharge(miles)
}

/// Currency formatting used by every display region: `$` plus exactly two
/// decimal digits.
pub fn format_currency(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Quantities as currently entered on the page; a missing input contributes
/// zero.
pub(crate) fn current_quantities(page: &Page) -> Vec<(&'static str, u32)> {
    RENTAL_ITEMS
        .iter()
        .map(|item| {
            let qty = page
                .dom
                .by_id(item.id)
                .and_then(|node| page.dom.element(node))
                .map(|element| parse_quantity(&element.value))
                .unwrap_or(0);
            (item.id, qty)
        })
        .collect()
}

/// Mileage that actually feeds the surcharge. When the page has a delivery
/// section the mileage counts only while that section is visible (delivery
/// accepted); with no section at all, a bare mileage input always counts.
pub(crate) fn applicable_miles(page: &Page) -> f64 {
    if let Some(section) = page.dom.by_id("deliverySection") {
        let hidden = page
            .dom
            .element(section)
            .map(|element| element.hidden)
            .unwrap_or(true);
        if hidden {
            return 0.0;
        }
    }
    page.dom
        .by_id("deliveryMiles")
        .and_then(|node| page.dom.element(node))
        .map(|element| parse_miles(&element.value))
        .unwrap_or(0.0)
}

/// Recomputes and rewrites the subtotal and total display regions. Runs at
/// wiring time and on every quantity or mileage input event.
pub(crate) fn refresh_display(page: &mut Page) {
    let quantities = current_quantities(page);
    let subtotal = subtotal(&quantities);
    let total = subtotal + delivery_surcharge(applicable_miles(page));

    if let Some(display) = page.dom.by_id("totalPrice") {
        page.dom.set_text_content(display, &format_currency(subtotal));
    }
    if let Some(display) = page.dom.by_id("finalTotal") {
        page.dom.set_text_content(display, &format_currency(total));
    }
}

/// A change event on a quantity input clamps a negative stored value to 0.
pub(crate) fn clamp_quantity(page: &mut Page, input: NodeId) {
    let Some(element) = page.dom.element_mut(input) else {
        return;
    };
    if element.value.trim().parse::<i64>().is_ok_and(|q| q < 0) {
        element.value = "0".to_string();
    }
}
