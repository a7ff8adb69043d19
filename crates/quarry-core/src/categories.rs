//! Data category definitions
//!
//! Each category names its source XML file, any expansion files merged after
//! it, an entry filter, and the fields whose values are text keys.

use crate::error::{Error, Result};
use crate::value::Record;
use tracing::warn;

/// A field whose raw value is a text key to resolve into a display string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextField {
    /// Tag name in the XML entry
    pub xml_field: &'static str,
    /// Key in the output entry
    pub output_field: &'static str,
}

impl TextField {
    pub const fn new(xml_field: &'static str, output_field: &'static str) -> Self {
        Self {
            xml_field,
            output_field,
        }
    }
}

/// Predicate deciding which decoded entries a category keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFilter {
    /// Keep every entry
    All,
    /// Drop entries gated behind DLC content
    NoContentRequired,
}

/// Field marking an entry as requiring DLC content
pub const CONTENT_REQUIRED: &str = "GameContentRequired";

impl EntryFilter {
    /// Check whether an entry passes the filter
    pub fn accepts(&self, record: &Record) -> bool {
        match self {
            EntryFilter::All => true,
            EntryFilter::NoContentRequired => !record.contains(CONTENT_REQUIRED),
        }
    }
}

/// Definition of one extracted data category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDef {
    /// Category identifier, also the output file stem
    pub name: &'static str,
    /// Human-readable name
    pub display_name: &'static str,
    /// Base XML file in the Infos directory
    pub xml_file: &'static str,
    /// Expansion files merged after the base file, if present
    pub expansion_files: &'static [&'static str],
    /// Entry filter
    pub filter: EntryFilter,
    /// Fields resolved through the text dictionary
    pub text_fields: &'static [TextField],
    /// Fields dropped from the output
    pub exclude_fields: &'static [&'static str],
}

impl CategoryDef {
    /// Look up the text field definition for a tag
    pub fn text_field(&self, xml_field: &str) -> Option<&TextField> {
        self.text_fields.iter().find(|tf| tf.xml_field == xml_field)
    }

    /// Check if a tag is excluded from output
    pub fn is_excluded(&self, xml_field: &str) -> bool {
        self.exclude_fields.contains(&xml_field)
    }
}

/// All known categories
pub const CATEGORIES: &[CategoryDef] = &[CategoryDef {
    name: "technologies",
    display_name: "Technologies",
    xml_file: "tech.xml",
    expansion_files: &[],
    filter: EntryFilter::NoContentRequired,
    text_fields: &[
        TextField::new("Name", "name"),
        TextField::new("Advice", "advice"),
        TextField::new("History", "history"),
    ],
    exclude_fields: &[],
}];

/// All known categories, in table order
pub fn all() -> &'static [CategoryDef] {
    CATEGORIES
}

/// Find a category by name
pub fn lookup(name: &str) -> Option<&'static CategoryDef> {
    CATEGORIES.iter().find(|c| c.name == name)
}

/// Find a category by name, failing if it is unknown
pub fn require(name: &str) -> Result<&'static CategoryDef> {
    lookup(name).ok_or_else(|| Error::UnknownCategory(name.to_string()))
}

/// Resolve requested category names, or every category when none are given
///
/// Unknown names are logged and skipped.
pub fn select(names: &[String]) -> Vec<&'static CategoryDef> {
    if names.is_empty() {
        return CATEGORIES.iter().collect();
    }

    names
        .iter()
        .filter_map(|name| match require(name) {
            Ok(category) => Some(category),
            Err(e) => {
                warn!("{}, skipping", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_lookup_category() {
        let tech = lookup("technologies").unwrap();
        assert_eq!(tech.xml_file, "tech.xml");
        assert_eq!(tech.text_field("Name").unwrap().output_field, "name");
        assert!(tech.text_field("iCost").is_none());

        assert!(lookup("wonders").is_none());
        assert!(matches!(require("wonders"), Err(Error::UnknownCategory(_))));
    }

    #[test]
    fn test_select_defaults_to_all() {
        assert_eq!(select(&[]).len(), CATEGORIES.len());
    }

    #[test]
    fn test_select_skips_unknown_names() {
        let names = vec!["wonders".to_string(), "technologies".to_string()];
        let selected = select(&names);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "technologies");
    }

    #[test]
    fn test_content_filter() {
        let mut base = Record::new();
        base.insert("zType", Value::String("TECH_A".to_string()));

        let mut dlc = base.clone();
        dlc.insert(CONTENT_REQUIRED, Value::String("GAMECONTENT_DLC".to_string()));

        assert!(EntryFilter::NoContentRequired.accepts(&base));
        assert!(!EntryFilter::NoContentRequired.accepts(&dlc));
        assert!(EntryFilter::All.accepts(&dlc));
    }
}
