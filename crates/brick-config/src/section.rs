//! Line-level helpers for the persisted INI-like text format: one
//! `[<kind>:<name>]` section per entity, `name=value` lines, blank
//! separator. The file-level loader feeds the resulting pairs into
//! [`crate::Base::load_from`].

use std::io::BufRead;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    pub kind: String,
    pub name: String,
}

/// Parse a `[kind:name]` header line.
pub fn parse_header(line: &str) -> Option<SectionHeader> {
    let inner = line.trim().strip_prefix('[')?.strip_suffix(']')?;
    let (kind, name) = inner.split_once(':')?;
    if kind.is_empty() || name.is_empty() {
        return None;
    }
    Some(SectionHeader {
        kind: kind.to_owned(),
        name: name.to_owned(),
    })
}

/// Parse a `key=value` assignment line. The key must be a word
/// (alphanumerics and underscores); the value is everything after the
/// first `=`, verbatim.
pub fn parse_assignment(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    if key.is_empty() || !key.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    Some((key, value))
}

/// Read every recognized section in order. Lines that are neither a header
/// nor an assignment (including the blank separators) are skipped, as are
/// assignments appearing before the first header.
pub fn read_sections<R: BufRead>(
    reader: R,
) -> Result<Vec<(SectionHeader, Vec<(String, String)>)>> {
    let mut sections: Vec<(SectionHeader, Vec<(String, String)>)> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(header) = parse_header(&line) {
            sections.push((header, Vec::new()));
        } else if let Some((key, value)) = parse_assignment(&line)
            && let Some((_, entries)) = sections.last_mut()
        {
            entries.push((key.to_owned(), value.to_owned()));
        }
    }
    Ok(sections)
}
