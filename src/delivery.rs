/// Distance in miles from the warehouse to each city we quote up front,
/// keyed by lowercase city name.
pub const CITY_DISTANCES: [(&str, u32); 10] = [
    ("bonita", 4),
    ("chula vista", 6),
    ("spring valley", 8),
    ("national city", 9),
    ("lemon grove", 10),
    ("imperial beach", 11),
    ("la mesa", 12),
    ("san diego", 14),
    ("coronado", 15),
    ("el cajon", 16),
];

/// Outcome of a city lookup. Advisory only; it never blocks submission and
/// never validates the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceEstimate {
    /// Nothing typed yet; the display shows its neutral placeholder.
    Empty,
    Known(u32),
    /// City not in the table; the exact distance gets confirmed by hand.
    Unknown,
}

impl DistanceEstimate {
    pub fn message(&self) -> String {
        match self {
            Self::Empty => "Enter your city for a distance estimate.".to_string(),
            Self::Known(miles) => format!("Estimated distance: ~{miles} miles"),
            Self::Unknown => {
                "We'll confirm the exact distance with you manually.".to_string()
            }
        }
    }
}

pub fn normalize_city(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn lookup_distance(city: &str) -> Option<u32> {
    let normalized = normalize_city(city);
    CITY_DISTANCES
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, miles)| *miles)
}

pub fn estimate(input: &str) -> DistanceEstimate {
    let normalized = normalize_city(input);
    if normalized.is_empty() {
        return DistanceEstimate::Empty;
    }
    match lookup_distance(&normalized) {
        Some(miles) => DistanceEstimate::Known(miles),
        None => DistanceEstimate::Unknown,
    }
}

/// Change handler for the delivery radio group: the dependent section is
/// visible iff the checked choice is `yes`. Re-selecting the same value
/// runs the same logic again; the operation is idempotent.
pub(crate) fn on_delivery_choice_change(page: &mut crate::Page) {
    let Some(section) = page.dom.by_id("deliverySection") else {
        return;
    };
    let wants_delivery = page
        .dom
        .all_elements()
        .into_iter()
        .filter(|node| crate::dom::is_radio_input(&page.dom, *node))
        .filter(|node| {
            page.dom
                .element(*node)
                .and_then(|element| element.attrs.get("name"))
                .is_some_and(|name| name == "delivery")
        })
        .any(|node| {
            page.dom
                .element(node)
                .is_some_and(|element| element.checked && element.value == "yes")
        });
    page.dom.set_hidden(section, !wants_delivery);
    crate::pricing::refresh_display(page);
}

/// Input handler for the city field: rewrites the estimate display from the
/// static table. Advisory only.
pub(crate) fn on_city_input(page: &mut crate::Page) {
    let Some(display) = page.dom.by_id("distanceEstimate") else {
        return;
    };
    let typed = page
        .dom
        .by_id("cityName")
        .and_then(|node| page.dom.element(node))
        .map(|element| element.value.clone())
        .unwrap_or_default();
    let message = estimate(&typed).message();
    page.dom.set_text_content(display, &message);
}
