use crate::dom::{Dom, NodeId};
use crate::{Error, Result};

/// A parsed selector: one or more simple selectors joined by the descendant
/// combinator. Supported syntax is the subset the page wiring needs: tag
/// names, `#id`, `.class`, and a single `[attr=value]` per simple selector.
#[derive(Debug, Clone)]
pub(crate) struct Selector {
    parts: Vec<SimpleSelector>,
}

#[derive(Debug, Clone, Default)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attr: Option<(String, String)>,
}

impl Selector {
    pub(crate) fn parse(src: &str) -> Result<Self> {
        let src = src.trim();
        if src.is_empty() {
            return Err(Error::UnsupportedSelector(src.to_string()));
        }
        let mut parts = Vec::new();
        for raw in src.split_whitespace() {
            parts.push(parse_simple(raw, src)?);
        }
        Ok(Self { parts })
    }

    pub(crate) fn matches(&self, dom: &Dom, node_id: NodeId) -> bool {
        let Some(last) = self.parts.last() else {
            return false;
        };
        if !matches_simple(dom, node_id, last) {
            return false;
        }
        let mut remaining = &self.parts[..self.parts.len() - 1];
        let mut cursor = dom.parent(node_id);
        while let Some(current) = cursor {
            let Some(want) = remaining.last() else {
                break;
            };
            if matches_simple(dom, current, want) {
                remaining = &remaining[..remaining.len() - 1];
            }
            cursor = dom.parent(current);
        }
        remaining.is_empty()
    }
}

fn parse_simple(raw: &str, whole: &str) -> Result<SimpleSelector> {
    let chars: Vec<char> = raw.chars().collect();
    let mut simple = SimpleSelector::default();
    let mut i = 0usize;

    if i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '-') {
        let mut tag = String::new();
        while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '-') {
            tag.push(chars[i].to_ascii_lowercase());
            i += 1;
        }
        simple.tag = Some(tag);
    }

    while i < chars.len() {
        match chars[i] {
            '#' => {
                i += 1;
                let mut id = String::new();
                while i < chars.len() && !matches!(chars[i], '#' | '.' | '[') {
                    id.push(chars[i]);
                    i += 1;
                }
                if id.is_empty() {
                    return Err(Error::UnsupportedSelector(whole.to_string()));
                }
                simple.id = Some(id);
            }
            '.' => {
                i += 1;
                let mut class = String::new();
                while i < chars.len() && !matches!(chars[i], '#' | '.' | '[') {
                    class.push(chars[i]);
                    i += 1;
                }
                if class.is_empty() {
                    return Err(Error::UnsupportedSelector(whole.to_string()));
                }
                simple.classes.push(class);
            }
            '[' => {
                let Some(end_offset) = chars[i..].iter().position(|c| *c == ']') else {
                    return Err(Error::UnsupportedSelector(whole.to_string()));
                };
                let body: String = chars[i + 1..i + end_offset].iter().collect();
                let Some((name, value)) = body.split_once('=') else {
                    return Err(Error::UnsupportedSelector(whole.to_string()));
                };
                let value = value
                    .trim()
                    .trim_matches('"')
                    .trim_matches('\'')
                    .to_string();
                simple.attr = Some((name.trim().to_ascii_lowercase(), value));
                i += end_offset + 1;
            }
            _ => return Err(Error::UnsupportedSelector(whole.to_string())),
        }
    }

    Ok(simple)
}

fn matches_simple(dom: &Dom, node_id: NodeId, simple: &SimpleSelector) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };
    if let Some(tag) = &simple.tag {
        if !element.tag_name.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(id) = &simple.id {
        if element.attrs.get("id") != Some(id) {
            return false;
        }
    }
    for class in &simple.classes {
        if !crate::dom::has_class(element, class) {
            return false;
        }
    }
    if let Some((name, value)) = &simple.attr {
        if element.attrs.get(name) != Some(value) {
            return false;
        }
    }
    true
}

pub(crate) fn query_first(dom: &Dom, selector: &Selector) -> Option<NodeId> {
    dom.all_elements()
        .into_iter()
        .find(|node| selector.matches(dom, *node))
}

pub(crate) fn query_all(dom: &Dom, selector: &Selector) -> Vec<NodeId> {
    dom.all_elements()
        .into_iter()
        .filter(|node| selector.matches(dom, *node))
        .collect()
}
