//! Document loading: one Infos XML file to a list of records

use crate::decoder::decode_record;
use crate::error::Result;
use crate::parser::{parse_xml, parse_xml_str, Element};
use crate::value::Record;
use std::path::Path;
use tracing::debug;

/// Element name of each entry under the document root
pub const ENTRY: &str = "Entry";

/// Field holding an entry's unique type key (e.g. "TECH_IRONWORKING")
pub const TYPE_KEY: &str = "zType";

/// Load and decode all data entries from an Infos XML file
///
/// Base game files start with a schema template entry, identified by an
/// empty `zType`; expansion files have none. Templates are always skipped.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let root = parse_xml(path)?;
    let records = decode_document(&root);

    debug!(path = %path.display(), entries = records.len(), "loaded document");
    Ok(records)
}

/// Decode a document from a string (useful for testing)
pub fn load_document_str(content: &str, source_name: &str) -> Result<Vec<Record>> {
    let root = parse_xml_str(content, source_name)?;
    Ok(decode_document(&root))
}

/// Decode every non-template entry under a document root
pub fn decode_document(root: &Element) -> Vec<Record> {
    root.find_all(ENTRY)
        .filter(|entry| !is_schema_template(entry))
        .map(decode_record)
        .collect()
}

/// Check if an entry is a schema template (missing or blank `zType`)
pub fn is_schema_template(entry: &Element) -> bool {
    entry.child_text(TYPE_KEY).is_none()
}
