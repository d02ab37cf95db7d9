use crate::Page;
use crate::dom::NodeId;

/// Mobile menu state, owned exclusively by the navigation controller. The
/// `active` class on the menu element is a mirror of `menu_open` for the
/// presentation layer; nothing else reads or writes either.
#[derive(Debug, Default)]
pub(crate) struct NavState {
    pub(crate) menu_open: bool,
    pub(crate) menu: Option<NodeId>,
}

pub(crate) fn toggle_menu(page: &mut Page) {
    set_menu_open(page, !page.nav.menu_open);
}

pub(crate) fn close_menu(page: &mut Page) {
    set_menu_open(page, false);
}

fn set_menu_open(page: &mut Page, open: bool) {
    page.nav.menu_open = open;
    let Some(menu) = page.nav.menu else {
        return;
    };
    if open {
        page.dom.add_class(menu, "active");
    } else {
        page.dom.remove_class(menu, "active");
    }
}

/// Marks the first navigation link whose `href` matches the current page
/// with the `active` class. No match is a valid, silent outcome.
pub(crate) fn highlight_current_page(page: &mut Page, links: &[NodeId]) {
    let current = current_page_name(page.path());
    for link in links {
        let matches = page
            .dom
            .element(*link)
            .and_then(|element| element.attrs.get("href"))
            .is_some_and(|href| *href == current);
        if matches {
            page.dom.add_class(*link, "active");
            return;
        }
    }
}

/// Last segment of the location path, defaulting to the home document.
pub(crate) fn current_page_name(path: &str) -> String {
    let last = path.rsplit('/').next().unwrap_or("");
    if last.is_empty() {
        "index.html".to_string()
    } else {
        last.to_string()
    }
}
