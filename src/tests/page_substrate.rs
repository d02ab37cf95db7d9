use super::*;

#[test]
fn malformed_html_is_reported_as_a_parse_error() {
    let (relay, _) = accepting_relay();
    let result = Page::open("<div>oops</span></div>", "/index.html", relay);
    assert!(matches!(result, Err(Error::HtmlParse(_))));

    let (relay, _) = accepting_relay();
    let result = Page::open("<div>never closed", "/index.html", relay);
    assert!(matches!(result, Err(Error::HtmlParse(_))));
}

#[test]
fn comments_and_entities_are_handled() -> Result<()> {
    let html = "<!-- header --><p id='msg'>Tables &amp; chairs &#33;</p>";
    let (relay, _) = accepting_relay();
    let page = Page::open(html, "/index.html", relay)?;

    assert_eq!(page.text_of("#msg")?, "Tables & chairs !");
    Ok(())
}

#[test]
fn unknown_selector_syntax_is_rejected() -> Result<()> {
    let (relay, _) = accepting_relay();
    let page = Page::open("<p id='x'>x</p>", "/index.html", relay)?;

    assert!(matches!(
        page.text_of("p > span"),
        Err(Error::UnsupportedSelector(_))
    ));
    Ok(())
}

#[test]
fn missing_elements_surface_as_selector_not_found() -> Result<()> {
    let (relay, _) = accepting_relay();
    let page = Page::open("<p id='x'>x</p>", "/index.html", relay)?;

    assert_eq!(
        page.text_of("#ghost"),
        Err(Error::SelectorNotFound("#ghost".to_string()))
    );
    Ok(())
}

#[test]
fn dispatch_rejects_unknown_event_names() -> Result<()> {
    let (relay, _) = accepting_relay();
    let mut page = Page::open("<p id='x'>x</p>", "/index.html", relay)?;

    assert_eq!(
        page.dispatch("#x", "hover"),
        Err(Error::UnknownEvent("hover".to_string()))
    );
    Ok(())
}

#[test]
fn clock_starts_at_zero_and_rejects_negative_advances() -> Result<()> {
    let (relay, _) = accepting_relay();
    let mut page = Page::open("<p id='x'>x</p>", "/index.html", relay)?;

    assert_eq!(page.now_ms(), 0);
    assert!(matches!(page.advance_time(-1), Err(Error::Clock(_))));
    page.advance_time(250)?;
    assert_eq!(page.now_ms(), 250);
    Ok(())
}

#[test]
fn descendant_selectors_scope_their_matches() -> Result<()> {
    let html = "
        <div class='outer'><span id='inner'>in</span></div>
        <span id='other'>out</span>
    ";
    let (relay, _) = accepting_relay();
    let page = Page::open(html, "/index.html", relay)?;

    assert_eq!(page.text_of(".outer span")?, "in");
    Ok(())
}
