//! String resource key extraction
//!
//! Reads Android `strings.xml` documents and collects the `name` attribute of
//! every `<string>` element:
//!
//! ```xml
//! <resources>
//!   <string name="app_name">Example</string>
//! </resources>
//! ```
//!
//! Only the names are consumed. Element text and other attributes are
//! ignored, and duplicate names collapse into one key.
//!
//! Files are decoded from their byte-order mark or declared encoding, and
//! general entities declared in an internal DTD subset are expanded in names.

use droidtools_core::config::UnnamedEntryPolicy;
use droidtools_core::error::{Error, Result};
use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

static ENTITY_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<!ENTITY\s+([^\s%"'>]+)\s+(?:"([^"]*)"|'([^']*)')\s*>"#).unwrap()
});

const ROOT_ELEMENT: &[u8] = b"resources";
const STRING_ELEMENT: &[u8] = b"string";
const NAME_ATTRIBUTE: &str = "name";

/// Set of resource keys from one document, iterated in lexicographic order
pub type KeySet = BTreeSet<String>;

/// Extract the key set of the resource file at `path`
pub fn extract_keys(path: &Path, policy: UnnamedEntryPolicy) -> Result<KeySet> {
    let bytes = std::fs::read(path).map_err(|e| Error::read_failed(path, e))?;
    let content = decode_document(&bytes, path)?;
    let keys = extract_keys_from_str(&content, path, policy)?;

    tracing::debug!(path = %path.display(), keys = keys.len(), "extracted resource keys");
    Ok(keys)
}

/// Extract the key set of an in-memory document
///
/// `origin` is only used in error messages.
pub fn extract_keys_from_str(
    content: &str,
    origin: &Path,
    policy: UnnamedEntryPolicy,
) -> Result<KeySet> {
    let mut reader = Reader::from_str(content);
    let mut keys = KeySet::new();
    let mut entities = HashMap::new();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|e| Error::parse(origin, format!("{} (byte {})", e, reader.buffer_position())))?;

        match event {
            Event::Start(ref element) | Event::Empty(ref element) => {
                if depth == 0 {
                    enter_root(element, seen_root, origin)?;
                    seen_root = true;
                }
                if element.local_name().as_ref() == STRING_ELEMENT {
                    if let Some(key) = entry_name(element, &entities, origin, position as u64, policy)? {
                        keys.insert(key);
                    }
                }
                if matches!(event, Event::Start(_)) {
                    depth += 1;
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::DocType(doctype) => {
                entities = internal_entities(&String::from_utf8_lossy(&doctype));
            }
            Event::Text(text) if depth == 0 => {
                let raw = text.into_inner();
                if !raw.iter().all(u8::is_ascii_whitespace) {
                    return Err(Error::parse(origin, "text outside of the root element"));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(Error::parse(origin, "unexpected end of document"));
    }
    if !seen_root {
        return Err(Error::parse(origin, "missing <resources> root element"));
    }

    Ok(keys)
}

/// Decode raw file content into text
///
/// A byte-order mark wins over the XML declaration; without either the
/// content must be UTF-8.
pub fn decode_document(bytes: &[u8], origin: &Path) -> Result<String> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(bytes, origin)?.unwrap_or(UTF_8), bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(Cow::into_owned)
        .ok_or_else(|| Error::parse(origin, format!("content is not valid {}", encoding.name())))
}

fn declared_encoding(bytes: &[u8], origin: &Path) -> Result<Option<&'static Encoding>> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();

    let decl = match reader.read_event_into(&mut buf) {
        Ok(Event::Decl(decl)) => decl,
        _ => return Ok(None),
    };
    let Some(label) = decl.encoding() else {
        return Ok(None);
    };
    let label = label.map_err(|e| Error::parse(origin, e.to_string()))?;

    Encoding::for_label(&label).map(Some).ok_or_else(|| {
        Error::parse(
            origin,
            format!("unsupported encoding \"{}\"", String::from_utf8_lossy(&label)),
        )
    })
}

fn internal_entities(doctype: &str) -> HashMap<String, String> {
    ENTITY_DECL
        .captures_iter(doctype)
        .filter_map(|caps| {
            let value = caps.get(2).or_else(|| caps.get(3))?;
            Some((caps[1].to_string(), value.as_str().to_string()))
        })
        .collect()
}

fn enter_root(element: &BytesStart<'_>, seen_root: bool, origin: &Path) -> Result<()> {
    if seen_root {
        return Err(Error::parse(origin, "content after the root element"));
    }
    if element.local_name().as_ref() != ROOT_ELEMENT {
        return Err(Error::parse(
            origin,
            format!(
                "expected <resources> root element, found <{}>",
                String::from_utf8_lossy(element.name().as_ref())
            ),
        ));
    }
    Ok(())
}

fn entry_name(
    element: &BytesStart<'_>,
    entities: &HashMap<String, String>,
    origin: &Path,
    position: u64,
    policy: UnnamedEntryPolicy,
) -> Result<Option<String>> {
    let attribute = element
        .try_get_attribute(NAME_ATTRIBUTE)
        .map_err(|e| Error::parse(origin, e.to_string()))?;

    match attribute {
        Some(attr) => {
            let value = attr
                .unescape_value_with(|entity| {
                    resolve_predefined_entity(entity)
                        .or_else(|| entities.get(entity).map(String::as_str))
                })
                .map_err(|e| Error::parse(origin, e.to_string()))?;
            Ok(Some(value.into_owned()))
        }
        None => match policy {
            UnnamedEntryPolicy::Permissive => {
                tracing::debug!(origin = %origin.display(), position, "unnamed <string> read as empty key");
                Ok(Some(String::new()))
            }
            UnnamedEntryPolicy::Reject => Err(Error::malformed_entry(origin, position)),
        },
    }
}
