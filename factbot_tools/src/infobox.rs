//! Pulls the text of the first infobox out of rendered article HTML.

use std::sync::OnceLock;

use regex::{Captures, Regex};

static HIDDEN_BLOCK: OnceLock<Regex> = OnceLock::new();
static CLASS_TAG: OnceLock<Regex> = OnceLock::new();
static ANY_TAG: OnceLock<Regex> = OnceLock::new();
static CELL_BREAK: OnceLock<Regex> = OnceLock::new();
static ROW_BREAK: OnceLock<Regex> = OnceLock::new();
static ENTITY: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex patterns are known to be valid"
)]
fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("Static regex pattern is guaranteed to be valid"))
}

fn hidden_block() -> &'static Regex {
    regex(
        &HIDDEN_BLOCK,
        r"(?is)<!--.*?-->|<style\b[^>]*>.*?</style\s*>|<script\b[^>]*>.*?</script\s*>",
    )
}

fn class_tag() -> &'static Regex {
    regex(
        &CLASS_TAG,
        r#"(?is)<([a-z][a-z0-9]*)\b[^>]*?\sclass\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*>"#,
    )
}

fn any_tag() -> &'static Regex {
    regex(&ANY_TAG, r"(?is)<(/?)([a-z][a-z0-9]*)\b[^>]*?(/?)>")
}

fn cell_break() -> &'static Regex {
    regex(&CELL_BREAK, r"(?i)<br\s*/?>|</t[hd]\s*>|</li\s*>")
}

fn row_break() -> &'static Regex {
    regex(&ROW_BREAK, r"(?i)</tr\s*>")
}

fn entity() -> &'static Regex {
    regex(&ENTITY, r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);")
}

/// Text of the first element whose class list contains `infobox`.
///
/// Comments, style and script content are dropped, table cells are separated by a space
/// and rows end with a newline. Returns `None` when the page has no infobox.
#[must_use]
pub fn first_infobox_text(html: &str) -> Option<String> {
    let html = hidden_block().replace_all(html, "");
    let inner = first_infobox_html(&html)?;
    Some(html_to_text(inner))
}

fn first_infobox_html(html: &str) -> Option<&str> {
    let open = class_tag().captures_iter(html).find(|caps| {
        caps.get(2)
            .or_else(|| caps.get(3))
            .is_some_and(|classes| classes.as_str().split_whitespace().any(|c| c == "infobox"))
    })?;
    let whole = open.get(0)?;
    let tag = open.get(1)?.as_str();
    let body_start = whole.end();

    let mut depth = 1_usize;
    for caps in any_tag().captures_iter(&html[body_start..]) {
        let Some(name) = caps.get(2) else {
            continue;
        };
        if !name.as_str().eq_ignore_ascii_case(tag) {
            continue;
        }
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());
        if closing {
            depth -= 1;
            if depth == 0 {
                let end = body_start + caps.get(0)?.start();
                return Some(&html[body_start..end]);
            }
        } else if !self_closing {
            depth += 1;
        }
    }

    // Unterminated element: take the rest of the document.
    Some(&html[body_start..])
}

fn html_to_text(html: &str) -> String {
    let text = cell_break().replace_all(html, " ");
    let text = row_break().replace_all(&text, "\n");
    let text = any_tag().replace_all(&text, "");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    entity()
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            decode_entity(name).map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(decimal) = name.strip_prefix('#') {
        return decimal.parse().ok().and_then(char::from_u32);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "minus" => Some('\u{2212}'),
        _ => None,
    }
}
