//! Path expression parser
//!
//! A path is a separator-joined list of segments. Each segment is one of:
//!
//! - `name` - first child element called `name`
//! - `name[2]` - third child element called `name`
//! - `name[@id=x]` - first child element called `name` whose `id` attribute is `x`
//! - `name[@id]` - the `id` attribute of element `name` (last segment only)
//! - `[@id]` - the `id` attribute of the current element (last segment only)

use crate::error::{Error, Result};

/// Which element a segment selects among its siblings
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Selector {
    Index(usize),
    Attribute { name: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Element { name: String, selector: Selector },
    Attribute(String),
}

/// A parsed path: element steps, optionally ending at an attribute
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ParsedPath {
    pub elements: Vec<(String, Selector)>,
    pub attribute: Option<String>,
}

pub(crate) fn parse(path: &str, separator: char) -> Result<ParsedPath> {
    let mut parsed = ParsedPath::default();

    // Brackets may contain the separator (e.g. `[@host=a.b]`), so split by hand.
    let mut raw_segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in path.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                raw_segments.push(&path[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    raw_segments.push(&path[start..]);

    let raw_segments: Vec<&str> = raw_segments.into_iter().filter(|s| !s.is_empty()).collect();
    if raw_segments.is_empty() {
        return Err(Error::invalid_path(path, "path is empty"));
    }
    let last = raw_segments.len().saturating_sub(1);

    for (i, raw) in raw_segments.iter().enumerate() {
        for segment in parse_segment(path, raw)? {
            match segment {
                Segment::Element { name, selector } => {
                    if parsed.attribute.is_some() {
                        return Err(Error::invalid_path(path, "attribute must be the last step"));
                    }
                    parsed.elements.push((name, selector));
                }
                Segment::Attribute(name) => {
                    if i != last || parsed.attribute.is_some() {
                        return Err(Error::invalid_path(path, "attribute must be the last step"));
                    }
                    parsed.attribute = Some(name);
                }
            }
        }
    }

    Ok(parsed)
}

/// One raw segment yields an element step, an attribute step, or both (`name[@attr]`).
fn parse_segment(path: &str, raw: &str) -> Result<Vec<Segment>> {
    let (name, bracket) = match raw.find('[') {
        Some(open) => {
            if !raw.ends_with(']') {
                return Err(Error::invalid_path(path, format!("unclosed bracket in '{raw}'")));
            }
            (&raw[..open], Some(&raw[open + 1..raw.len() - 1]))
        }
        None => (raw, None),
    };

    if name.contains(']') {
        return Err(Error::invalid_path(path, format!("unexpected ']' in '{raw}'")));
    }
    if bracket.is_some_and(|inner| inner.contains(['[', ']'])) {
        return Err(Error::invalid_path(path, format!("more than one selector in '{raw}'")));
    }

    let Some(inner) = bracket else {
        return Ok(vec![Segment::Element {
            name: name.to_string(),
            selector: Selector::Index(0),
        }]);
    };

    if let Some(attr) = inner.strip_prefix('@') {
        if let Some((attr_name, attr_value)) = attr.split_once('=') {
            if name.is_empty() || attr_name.is_empty() {
                return Err(Error::invalid_path(path, format!("incomplete selector in '{raw}'")));
            }
            return Ok(vec![Segment::Element {
                name: name.to_string(),
                selector: Selector::Attribute {
                    name: attr_name.to_string(),
                    value: attr_value.to_string(),
                },
            }]);
        }

        if attr.is_empty() {
            return Err(Error::invalid_path(path, "empty attribute name"));
        }
        let mut segments = Vec::with_capacity(2);
        if !name.is_empty() {
            segments.push(Segment::Element {
                name: name.to_string(),
                selector: Selector::Index(0),
            });
        }
        segments.push(Segment::Attribute(attr.to_string()));
        return Ok(segments);
    }

    if name.is_empty() {
        return Err(Error::invalid_path(path, format!("index without element name in '{raw}'")));
    }
    let index = inner
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::invalid_path(path, format!("bad index '{inner}'")))?;

    Ok(vec![Segment::Element {
        name: name.to_string(),
        selector: Selector::Index(index),
    }])
}
