use std::collections::HashMap;

use crate::dom::{Dom, NodeId};
use crate::{Error, Result};

/// Parses a well-formed HTML fragment into a [`Dom`]. This is a deliberately
/// small subset: elements, attributes (double-quoted, single-quoted, or
/// bare), void elements, comments, and a handful of character references.
pub(crate) fn parse_document(html: &str) -> Result<Dom> {
    let mut dom = Dom::new();
    let mut stack: Vec<(NodeId, String)> = Vec::new();
    let chars: Vec<char> = html.chars().collect();
    let mut i = 0usize;

    while i < chars.len() {
        if chars[i] == '<' {
            if lookahead(&chars, i, "<!--") {
                i = skip_comment(&chars, i)?;
                continue;
            }
            if lookahead(&chars, i, "</") {
                let (tag, next) = parse_close_tag(&chars, i)?;
                close_element(&mut stack, &tag)?;
                i = next;
                continue;
            }
            let (tag, attrs, self_closing, next) = parse_open_tag(&chars, i)?;
            let parent = stack.last().map(|(id, _)| *id).unwrap_or(dom.root);
            let node = dom.create_element(parent, tag.clone(), attrs);
            if !self_closing && !is_void_element(&tag) {
                stack.push((node, tag));
            }
            i = next;
            continue;
        }

        let start = i;
        while i < chars.len() && chars[i] != '<' {
            i += 1;
        }
        let raw: String = chars[start..i].iter().collect();
        let text = decode_entities(&raw);
        if !text.trim().is_empty() {
            let parent = stack.last().map(|(id, _)| *id).unwrap_or(dom.root);
            dom.create_text(parent, text);
        }
    }

    if let Some((_, tag)) = stack.last() {
        return Err(Error::HtmlParse(format!("unclosed element: <{tag}>")));
    }
    Ok(dom)
}

fn lookahead(chars: &[char], at: usize, expected: &str) -> bool {
    chars[at..]
        .iter()
        .zip(expected.chars())
        .filter(|(a, b)| **a == *b)
        .count()
        == expected.chars().count()
}

fn skip_comment(chars: &[char], at: usize) -> Result<usize> {
    let mut i = at + 4;
    while i + 2 < chars.len() {
        if chars[i] == '-' && chars[i + 1] == '-' && chars[i + 2] == '>' {
            return Ok(i + 3);
        }
        i += 1;
    }
    Err(Error::HtmlParse("unterminated comment".into()))
}

fn parse_close_tag(chars: &[char], at: usize) -> Result<(String, usize)> {
    let mut i = at + 2;
    let mut tag = String::new();
    while i < chars.len() && chars[i] != '>' {
        if !chars[i].is_whitespace() {
            tag.push(chars[i].to_ascii_lowercase());
        }
        i += 1;
    }
    if i >= chars.len() {
        return Err(Error::HtmlParse("unterminated close tag".into()));
    }
    if tag.is_empty() {
        return Err(Error::HtmlParse("empty close tag".into()));
    }
    Ok((tag, i + 1))
}

fn close_element(stack: &mut Vec<(NodeId, String)>, tag: &str) -> Result<()> {
    let Some(open_at) = stack.iter().rposition(|(_, open)| open == tag) else {
        return Err(Error::HtmlParse(format!("unexpected close tag: </{tag}>")));
    };
    stack.truncate(open_at);
    Ok(())
}

type OpenTag = (String, HashMap<String, String>, bool, usize);

fn parse_open_tag(chars: &[char], at: usize) -> Result<OpenTag> {
    let mut i = at + 1;
    let mut tag = String::new();
    while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '-') {
        tag.push(chars[i].to_ascii_lowercase());
        i += 1;
    }
    if tag.is_empty() {
        return Err(Error::HtmlParse(format!(
            "malformed tag near offset {at}"
        )));
    }

    let mut attrs = HashMap::new();
    loop {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if i >= chars.len() {
            return Err(Error::HtmlParse(format!("unterminated tag: <{tag}>")));
        }
        if chars[i] == '>' {
            return Ok((tag, attrs, false, i + 1));
        }
        if chars[i] == '/' {
            while i < chars.len() && chars[i] != '>' {
                i += 1;
            }
            if i >= chars.len() {
                return Err(Error::HtmlParse(format!("unterminated tag: <{tag}>")));
            }
            return Ok((tag, attrs, true, i + 1));
        }

        let mut name = String::new();
        while i < chars.len()
            && !chars[i].is_whitespace()
            && !matches!(chars[i], '=' | '>' | '/')
        {
            name.push(chars[i].to_ascii_lowercase());
            i += 1;
        }
        if name.is_empty() {
            return Err(Error::HtmlParse(format!(
                "malformed attribute in <{tag}>"
            )));
        }

        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if i < chars.len() && chars[i] == '=' {
            i += 1;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            let (value, next) = parse_attr_value(chars, i, &tag)?;
            attrs.insert(name, decode_entities(&value));
            i = next;
        } else {
            attrs.insert(name, String::new());
        }
    }
}

fn parse_attr_value(chars: &[char], at: usize, tag: &str) -> Result<(String, usize)> {
    if at >= chars.len() {
        return Err(Error::HtmlParse(format!("unterminated tag: <{tag}>")));
    }
    if chars[at] == '"' || chars[at] == '\'' {
        let quote = chars[at];
        let mut i = at + 1;
        let mut value = String::new();
        while i < chars.len() && chars[i] != quote {
            value.push(chars[i]);
            i += 1;
        }
        if i >= chars.len() {
            return Err(Error::HtmlParse(format!(
                "unterminated attribute value in <{tag}>"
            )));
        }
        return Ok((value, i + 1));
    }

    let mut i = at;
    let mut value = String::new();
    while i < chars.len() && !chars[i].is_whitespace() && !matches!(chars[i], '>' | '/') {
        value.push(chars[i]);
        i += 1;
    }
    Ok((value, i))
}

fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}

fn decode_entities(src: &str) -> String {
    if !src.contains('&') {
        return src.to_string();
    }

    fn decode_named(value: &str) -> Option<char> {
        match value {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{00A0}'),
            _ => None,
        }
    }

    fn decode_numeric(value: &str) -> Option<char> {
        let codepoint = if let Some(hex) = value.strip_prefix('x').or_else(|| value.strip_prefix('X'))
        {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            value.parse::<u32>().ok()?
        };
        char::from_u32(codepoint)
    }

    let mut out = String::with_capacity(src.len());
    let chars: Vec<char> = src.chars().collect();
    let mut i = 0usize;
    while i < chars.len() {
        if chars[i] != '&' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let Some(end_offset) = chars[i + 1..].iter().position(|c| *c == ';') else {
            out.push('&');
            i += 1;
            continue;
        };
        let entity: String = chars[i + 1..i + 1 + end_offset].iter().collect();
        let decoded = if let Some(numeric) = entity.strip_prefix('#') {
            decode_numeric(numeric)
        } else {
            decode_named(&entity)
        };
        match decoded {
            Some(ch) => {
                out.push(ch);
                i += end_offset + 2;
            }
            None => {
                out.push('&');
                i += 1;
            }
        }
    }
    out
}
