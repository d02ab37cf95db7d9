use crate::Page;
use crate::dom::NodeId;

/// Click handling for same-page anchor links: resolve the fragment target
/// and record the scroll destination instead of jumping. A missing target
/// skips the scroll entirely.
pub(crate) fn handle_anchor_click(page: &mut Page, anchor: NodeId) {
    let Some(fragment) = page
        .dom
        .element(anchor)
        .and_then(|element| element.attrs.get("href"))
        .and_then(|href| href.strip_prefix('#'))
        .map(ToOwned::to_owned)
    else {
        return;
    };
    if page.dom.by_id(&fragment).is_some() {
        page.record_scroll(&fragment);
    }
}

pub(crate) fn is_anchor_link(page: &Page, node: NodeId) -> bool {
    page.dom
        .element(node)
        .filter(|element| element.tag_name.eq_ignore_ascii_case("a"))
        .and_then(|element| element.attrs.get("href"))
        .is_some_and(|href| href.starts_with('#'))
}
