use super::*;

#[test]
fn delivery_section_follows_the_radio_choice() -> Result<()> {
    let (relay, _) = accepting_relay();
    let mut page = open_rentals(relay)?;

    assert!(page.is_hidden("#deliverySection")?);
    page.set_checked("#deliveryYes", true)?;
    assert!(!page.is_hidden("#deliverySection")?);
    page.set_checked("#deliveryNo", true)?;
    assert!(page.is_hidden("#deliverySection")?);
    Ok(())
}

#[test]
fn reselecting_the_same_choice_is_idempotent() -> Result<()> {
    let (relay, _) = accepting_relay();
    let mut page = open_rentals(relay)?;

    page.set_checked("#deliveryYes", true)?;
    page.set_checked("#deliveryYes", true)?;
    assert!(!page.is_hidden("#deliverySection")?);
    Ok(())
}

#[test]
fn known_city_shows_an_estimate() -> Result<()> {
    let (relay, _) = accepting_relay();
    let mut page = open_rentals(relay)?;

    page.type_text("#cityName", "la mesa")?;
    assert_eq!(
        page.text_of("#distanceEstimate")?,
        "Estimated distance: ~12 miles"
    );
    Ok(())
}

#[test]
fn lookup_ignores_case_and_surrounding_whitespace() -> Result<()> {
    let (relay, _) = accepting_relay();
    let mut page = open_rentals(relay)?;

    page.type_text("#cityName", "  San Diego  ")?;
    let padded = page.text_of("#distanceEstimate")?;
    page.type_text("#cityName", "san diego")?;
    let plain = page.text_of("#distanceEstimate")?;

    assert_eq!(padded, plain);
    assert_eq!(plain, "Estimated distance: ~14 miles");
    Ok(())
}

#[test]
fn unknown_city_falls_back_to_manual_confirmation() -> Result<()> {
    let (relay, _) = accepting_relay();
    let mut page = open_rentals(relay)?;

    page.type_text("#cityName", "tijuana")?;
    assert_eq!(
        page.text_of("#distanceEstimate")?,
        "We'll confirm the exact distance with you manually."
    );
    Ok(())
}

#[test]
fn clearing_the_city_restores_the_placeholder() -> Result<()> {
    let (relay, _) = accepting_relay();
    let mut page = open_rentals(relay)?;

    page.type_text("#cityName", "coronado")?;
    page.type_text("#cityName", "")?;
    assert_eq!(
        page.text_of("#distanceEstimate")?,
        "Enter your city for a distance estimate."
    );
    Ok(())
}

#[test]
fn estimate_is_advisory_and_never_blocks_submission() -> Result<()> {
    let (relay, posts) = accepting_relay();
    let mut page = open_rentals(relay)?;

    page.type_text("#cityName", "tijuana")?;
    page.submit("#bookingForm")?;
    assert_eq!(posts.borrow().len(), 1);
    Ok(())
}

#[test]
fn table_lookup_is_pure_and_case_insensitive() {
    assert_eq!(lookup_distance(" San Diego "), Some(14));
    assert_eq!(lookup_distance("CHULA VISTA"), Some(6));
    assert_eq!(lookup_distance("tijuana"), None);
    assert_eq!(CITY_DISTANCES.len(), 10);
}

#[test]
fn estimate_states_map_to_their_messages() {
    assert_eq!(estimate("   "), DistanceEstimate::Empty);
    assert_eq!(estimate("bonita"), DistanceEstimate::Known(4));
    assert_eq!(estimate("yuma"), DistanceEstimate::Unknown);
    assert_eq!(
        DistanceEstimate::Known(9).message(),
        "Estimated distance: ~9 miles"
    );
}
