//! Structural validation for SSML payloads.
//!
//! This is a safeguard against obvious XML errors before the document is
//! sent downstream, not a schema validation of the SSML vocabulary. The
//! checks are pure: no mutation of the caller's payload, no side effects,
//! safe to call repeatedly.

use std::sync::LazyLock;

use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;

/// Canonical root tag name after case normalization.
const ROOT_TAG: &str = "speak";

static OPEN_ROOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<speak\b[^>]*>").expect("valid open-tag pattern"));
static ROOT_CASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)speak\b").expect("valid tag-name pattern"));

/// Validate the basic XML structure of an SSML document.
///
/// Accepts any casing of the root tag (`<SPEAK>`, `<Speak>`, ...);
/// rejects empty input, a missing or duplicated root (which also covers
/// a nested `<speak>` inside another), and anything that fails a strict
/// well-formedness parse. Comments before the root and self-closing
/// inner tags are fine.
pub fn is_valid_ssml(content: &str) -> bool {
    let content = content.trim();
    if content.is_empty() {
        return false;
    }

    // Exactly one opening and one closing root tag, in any casing.
    // More than one opening tag means a nested or repeated root.
    let open_count = OPEN_ROOT_RE.find_iter(content).count();
    let close_count = content.to_lowercase().matches("</speak>").count();
    if open_count != 1 || close_count != 1 {
        return false;
    }

    // Normalize the root tag's casing so the parse below sees one name.
    let normalized = ROOT_CASE_RE.replace_all(content, "<${1}speak");

    parses_with_root(&normalized, ROOT_TAG)
}

/// Strict well-formedness parse: balanced, properly nested tags with a
/// single root element of the given name.
fn parses_with_root(document: &str, root_tag: &str) -> bool {
    let mut reader = Reader::from_str(document);
    reader.config_mut().check_end_names = true;

    let mut depth = 0usize;
    let mut root_name: Option<String> = None;
    let mut root_closed = false;

    loop {
        match reader.read_event() {
            Err(_) => return false,
            Ok(Event::Eof) => break,
            Ok(Event::Start(start)) => {
                if depth == 0 {
                    if root_closed {
                        // Content after the root element closes.
                        return false;
                    }
                    root_name = Some(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                }
                depth += 1;
            }
            Ok(Event::End(_)) => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
                if depth == 0 {
                    root_closed = true;
                }
            }
            Ok(Event::Empty(empty)) => {
                if depth == 0 {
                    if root_closed {
                        return false;
                    }
                    root_name = Some(String::from_utf8_lossy(empty.name().as_ref()).into_owned());
                    root_closed = true;
                }
            }
            Ok(Event::Text(text)) => {
                // Non-whitespace character data outside the root element
                // is not well-formed XML.
                if depth == 0
                    && !text
                        .as_ref()
                        .iter()
                        .all(|b| b.is_ascii_whitespace())
                {
                    return false;
                }
            }
            Ok(Event::CData(_)) => {
                if depth == 0 {
                    return false;
                }
            }
            // Comments, declarations and processing instructions are
            // allowed anywhere, including before the root.
            Ok(Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_)) => {}
        }
    }

    depth == 0 && root_closed && root_name.as_deref() == Some(root_tag)
}
