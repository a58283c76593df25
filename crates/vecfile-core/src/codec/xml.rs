//! XML vector container codec.
//!
//! One schema only: a wrapper element, a single size-bearing `<vector>`
//! container, and exactly `size` self-closing `<entry index=".." value=".."/>`
//! children with contiguous, unique, 0-based indices:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <vecfile>
//!   <vector size="2">
//!     <entry index="0" value="1e0"/>
//!     <entry index="1" value="2.5e-1"/>
//!   </vector>
//! </vecfile>
//! ```
//!
//! Values are written with Rust's shortest round-trip float formatting, so
//! `decode(encode(v))` reproduces every value bit-for-bit. Unknown
//! attributes are ignored; unknown elements are not.

use super::VectorCodec;
use crate::error::{FormatError, Result};
use crate::types::{DenseVector, VectorData};

/// Wrapper element enclosing the whole document.
pub const ROOT_TAG: &str = "vecfile";
/// The size-bearing container element.
pub const VECTOR_TAG: &str = "vector";
/// One value entry.
pub const ENTRY_TAG: &str = "entry";

const SIZE_ATTR: &str = "size";
const INDEX_ATTR: &str = "index";
const VALUE_ATTR: &str = "value";

/// Codec for the XML vector container format.
///
/// By default both encoding and decoding reject NaN and infinite values;
/// [`with_allow_non_finite`](Self::with_allow_non_finite) relaxes both
/// sides symmetrically so permissive documents still round-trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec {
    allow_non_finite: bool,
}

impl XmlCodec {
    /// Creates a codec with the default (strict) settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow_non_finite: false,
        }
    }

    /// Permits NaN and infinite values on both encode and decode.
    #[must_use]
    pub fn with_allow_non_finite(mut self, allow: bool) -> Self {
        self.allow_non_finite = allow;
        self
    }

    fn parse_entry(&self, entry: &Tag<'_>) -> std::result::Result<(usize, f64), FormatError> {
        let index_text = entry.attr(INDEX_ATTR).ok_or(FormatError::MissingAttribute {
            element: ENTRY_TAG,
            attribute: INDEX_ATTR,
        })?;
        let index: usize = index_text.parse().map_err(|_| FormatError::BadAttribute {
            attribute: INDEX_ATTR,
            text: index_text.to_string(),
        })?;

        let value_text = entry.attr(VALUE_ATTR).ok_or(FormatError::MissingAttribute {
            element: ENTRY_TAG,
            attribute: VALUE_ATTR,
        })?;
        let value: f64 = value_text.parse().map_err(|_| FormatError::BadAttribute {
            attribute: VALUE_ATTR,
            text: value_text.to_string(),
        })?;
        if !value.is_finite() && !self.allow_non_finite {
            return Err(FormatError::NonFiniteValue {
                index,
                text: value_text.to_string(),
            });
        }

        Ok((index, value))
    }
}

impl VectorCodec for XmlCodec {
    fn encode_to_string(&self, vector: &dyn VectorData) -> Result<String> {
        let size = vector.size();
        let mut out = String::with_capacity(80 + size * 48);
        out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        out.push_str(&format!("<{ROOT_TAG}>\n"));
        out.push_str(&format!("  <{VECTOR_TAG} {SIZE_ATTR}=\"{size}\">\n"));
        for index in 0..size {
            let value = vector.value(index);
            if !value.is_finite() && !self.allow_non_finite {
                return Err(FormatError::NonFiniteValue {
                    index,
                    text: value.to_string(),
                }
                .into());
            }
            out.push_str(&format!(
                "    <{ENTRY_TAG} {INDEX_ATTR}=\"{index}\" {VALUE_ATTR}=\"{value:e}\"/>\n"
            ));
        }
        out.push_str(&format!("  </{VECTOR_TAG}>\n"));
        out.push_str(&format!("</{ROOT_TAG}>\n"));
        Ok(out)
    }

    fn decode_str(&self, text: &str) -> Result<DenseVector> {
        let mut scanner = Scanner::new(text);
        scanner.skip_declaration()?;

        // Wrapper element
        let root = match scanner.next_event()? {
            Event::Open(tag) => tag,
            Event::Close(name) => {
                return Err(FormatError::UnexpectedElement {
                    expected: ROOT_TAG,
                    found: format!("/{name}"),
                }
                .into());
            }
        };
        if root.name != ROOT_TAG {
            return Err(FormatError::UnexpectedElement {
                expected: ROOT_TAG,
                found: root.name.to_string(),
            }
            .into());
        }
        if root.self_closing {
            return Err(FormatError::MissingElement {
                element: VECTOR_TAG,
            }
            .into());
        }

        // Size-bearing container
        let container = match scanner.next_event()? {
            Event::Open(tag) => tag,
            Event::Close(_) => {
                return Err(FormatError::MissingElement {
                    element: VECTOR_TAG,
                }
                .into());
            }
        };
        if container.name != VECTOR_TAG {
            return Err(FormatError::UnexpectedElement {
                expected: VECTOR_TAG,
                found: container.name.to_string(),
            }
            .into());
        }
        let size_text =
            container
                .attr(SIZE_ATTR)
                .ok_or(FormatError::MissingAttribute {
                    element: VECTOR_TAG,
                    attribute: SIZE_ATTR,
                })?;
        let size: usize = size_text.parse().map_err(|_| FormatError::BadAttribute {
            attribute: SIZE_ATTR,
            text: size_text.to_string(),
        })?;

        // Entries are collected before any size-driven allocation happens,
        // so a hostile `size` attribute cannot drive memory use - it can
        // only fail the count check below.
        let mut entries: Vec<(usize, f64)> = Vec::new();

        if !container.self_closing {
            loop {
                match scanner.next_event()? {
                    Event::Close(name) if name == VECTOR_TAG => break,
                    Event::Close(name) => {
                        return Err(scanner
                            .syntax(format!("mismatched closing tag </{name}>"))
                            .into());
                    }
                    Event::Open(entry) => {
                        if entry.name != ENTRY_TAG {
                            return Err(FormatError::UnexpectedElement {
                                expected: ENTRY_TAG,
                                found: entry.name.to_string(),
                            }
                            .into());
                        }
                        let expanded = !entry.self_closing;
                        entries.push(self.parse_entry(&entry)?);
                        if expanded {
                            // Tolerate <entry ...></entry> but nothing in between
                            match scanner.next_event()? {
                                Event::Close(name) if name == ENTRY_TAG => {}
                                _ => {
                                    return Err(scanner
                                        .syntax(format!("expected </{ENTRY_TAG}>"))
                                        .into());
                                }
                            }
                        }
                    }
                }
            }
        }

        if entries.len() != size {
            return Err(FormatError::SizeMismatch {
                declared: size,
                found: entries.len(),
            }
            .into());
        }

        // size == entries.len() here, so this allocation is bounded by the
        // parsed input
        let mut values = vec![0.0_f64; size];
        let mut seen = vec![false; size];
        for (index, value) in entries {
            if index >= size {
                return Err(FormatError::IndexOutOfRange { index, size }.into());
            }
            if seen[index] {
                return Err(FormatError::DuplicateIndex { index }.into());
            }
            values[index] = value;
            seen[index] = true;
        }

        // Closing wrapper, then nothing but whitespace or comments
        match scanner.next_event()? {
            Event::Close(name) if name == ROOT_TAG => {}
            Event::Close(name) => {
                return Err(FormatError::UnexpectedElement {
                    expected: ROOT_TAG,
                    found: format!("/{name}"),
                }
                .into());
            }
            Event::Open(tag) => {
                return Err(FormatError::UnexpectedElement {
                    expected: ROOT_TAG,
                    found: tag.name.to_string(),
                }
                .into());
            }
        }
        if !scanner.at_end()? {
            return Err(scanner.syntax("trailing content after document").into());
        }

        Ok(DenseVector::from_values(values))
    }
}

/// An opened tag with its attributes.
struct Tag<'a> {
    name: &'a str,
    attrs: Vec<(&'a str, &'a str)>,
    self_closing: bool,
}

impl<'a> Tag<'a> {
    fn attr(&self, name: &str) -> Option<&'a str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

enum Event<'a> {
    Open(Tag<'a>),
    Close(&'a str),
}

/// Minimal pull scanner for the one schema this codec accepts.
///
/// Handles start/end/empty tags, single- or double-quoted attributes,
/// comments, and the XML declaration. Text content, entities, CDATA, and
/// processing instructions beyond the declaration are out of scope and
/// reported as syntax errors where encountered.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn bump(&mut self, n: usize) {
        self.pos += n;
    }

    fn syntax(&self, message: impl Into<String>) -> FormatError {
        FormatError::Syntax {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    /// Skips whitespace and comments.
    fn skip_misc(&mut self) -> std::result::Result<(), FormatError> {
        loop {
            self.skip_whitespace();
            if self.rest().starts_with("<!--") {
                match self.rest().find("-->") {
                    Some(end) => self.bump(end + 3),
                    None => return Err(self.syntax("unterminated comment")),
                }
            } else {
                return Ok(());
            }
        }
    }

    /// Skips an optional leading `<?xml ...?>` declaration.
    fn skip_declaration(&mut self) -> std::result::Result<(), FormatError> {
        self.skip_misc()?;
        if self.rest().starts_with("<?") {
            match self.rest().find("?>") {
                Some(end) => self.bump(end + 2),
                None => return Err(self.syntax("unterminated XML declaration")),
            }
        }
        Ok(())
    }

    fn at_end(&mut self) -> std::result::Result<bool, FormatError> {
        self.skip_misc()?;
        Ok(self.pos == self.input.len())
    }

    fn next_event(&mut self) -> std::result::Result<Event<'a>, FormatError> {
        self.skip_misc()?;
        if self.rest().is_empty() {
            return Err(self.syntax("unexpected end of document"));
        }
        if !self.rest().starts_with('<') {
            return Err(self.syntax("expected '<'"));
        }
        self.bump(1);

        if self.rest().starts_with('/') {
            self.bump(1);
            let name = self.read_name()?;
            self.skip_whitespace();
            if !self.rest().starts_with('>') {
                return Err(self.syntax("expected '>' after closing tag name"));
            }
            self.bump(1);
            return Ok(Event::Close(name));
        }

        let name = self.read_name()?;
        let mut attrs = Vec::new();
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.starts_with("/>") {
                self.bump(2);
                return Ok(Event::Open(Tag {
                    name,
                    attrs,
                    self_closing: true,
                }));
            }
            if rest.starts_with('>') {
                self.bump(1);
                return Ok(Event::Open(Tag {
                    name,
                    attrs,
                    self_closing: false,
                }));
            }
            if rest.is_empty() {
                return Err(self.syntax("unterminated tag"));
            }

            let key = self.read_name()?;
            self.skip_whitespace();
            if !self.rest().starts_with('=') {
                return Err(self.syntax("expected '=' after attribute name"));
            }
            self.bump(1);
            self.skip_whitespace();
            let value = self.read_quoted()?;
            attrs.push((key, value));
        }
    }

    fn read_name(&mut self) -> std::result::Result<&'a str, FormatError> {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .find(|&(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')))
            .map_or(rest.len(), |(i, _)| i);
        if end == 0 {
            return Err(self.syntax("expected a name"));
        }
        self.bump(end);
        Ok(&rest[..end])
    }

    fn read_quoted(&mut self) -> std::result::Result<&'a str, FormatError> {
        let rest = self.rest();
        let quote = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.syntax("expected a quoted attribute value")),
        };
        let body = &rest[1..];
        match body.find(quote) {
            Some(end) => {
                self.bump(end + 2);
                Ok(&body[..end])
            }
            None => Err(self.syntax("unterminated attribute value")),
        }
    }
}
