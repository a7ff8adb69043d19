//! Category extraction: load, filter, resolve text, normalize field names

use crate::categories::CategoryDef;
use crate::classify::hungarian_prefix;
use crate::document::{load_document, TYPE_KEY};
use crate::error::{Error, Result};
use crate::resolver::TextResolver;
use crate::value::{Record, Value};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Location of the Infos directory inside a game installation
pub const INFOS_SUBDIR: [&str; 3] = ["Reference", "XML", "Infos"];

/// Resolve the Infos directory of a game installation
pub fn infos_dir<P: AsRef<Path>>(game_path: P) -> Result<PathBuf> {
    let dir = INFOS_SUBDIR
        .iter()
        .fold(game_path.as_ref().to_path_buf(), |acc, part| acc.join(part));

    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(Error::InfosDirNotFound(dir))
    }
}

/// Strip the Hungarian prefix and lower-case the first remaining character
///
/// Examples:
/// - "iCost" -> "cost"
/// - "zIconName" -> "iconName"
/// - "aeNationValid" -> "nationValid"
/// - "EffectPlayer" -> "effectPlayer"
pub fn normalize_field_name(xml_name: &str) -> String {
    let remainder = match hungarian_prefix(xml_name) {
        Some(prefix) => &xml_name[prefix.len()..],
        None => xml_name,
    };

    let mut chars = remainder.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Extracted entries of one category, keyed by `zType` in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryEntries {
    entries: Vec<(String, Record)>,
}

impl CategoryEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; a repeated key keeps its position and takes the new body
    pub fn insert(&mut self, key: String, entry: Record) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((key, entry)),
        }
    }

    /// Find an entry by `zType`
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    /// Entry keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CategoryEntries {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

/// Extract one category from the Infos directory
///
/// The base file must exist; expansion files are merged only when present.
pub fn extract_category<P: AsRef<Path>>(
    category: &CategoryDef,
    infos_dir: P,
    resolver: &TextResolver,
) -> Result<CategoryEntries> {
    let infos_dir = infos_dir.as_ref();
    let mut records = load_document(infos_dir.join(category.xml_file))?;

    for expansion in category.expansion_files {
        let path = infos_dir.join(expansion);
        if path.exists() {
            records.extend(load_document(&path)?);
        } else {
            debug!(path = %path.display(), "expansion file not present, skipping");
        }
    }

    Ok(transform_records(category, &records, resolver))
}

/// Filter records and convert them into output entries
pub fn transform_records(
    category: &CategoryDef,
    records: &[Record],
    resolver: &TextResolver,
) -> CategoryEntries {
    let mut entries = CategoryEntries::new();

    for record in records.iter().filter(|r| category.filter.accepts(r)) {
        let Some(type_key) = record.get(TYPE_KEY).map(Value::to_string_value) else {
            continue;
        };
        entries.insert(type_key, transform_record(category, record, resolver));
    }

    entries
}

fn transform_record(category: &CategoryDef, record: &Record, resolver: &TextResolver) -> Record {
    let mut output = Record::new();

    for (tag, value) in record.iter() {
        if tag == TYPE_KEY || category.is_excluded(tag) {
            continue;
        }

        if let Some(text_field) = category.text_field(tag) {
            if let Some(resolved) = resolver.resolve(&value.to_string_value()) {
                output.insert(text_field.output_field, Value::String(resolved));
            }
            continue;
        }

        output.insert(normalize_field_name(tag), value.clone());
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{lookup, EntryFilter, TextField};
    use crate::document::load_document_str;
    use crate::gender::GenderMap;

    const TECH_XML: &str = "<Root>\
        <Entry><zType/><Name/><iCost/></Entry>\
        <Entry>\
          <zType>TECH_IRONWORKING</zType>\
          <Name>TEXT_TECH_IRONWORKING</Name>\
          <Advice>TEXT_TECH_MISSING_ADVICE</Advice>\
          <iCost>400</iCost>\
          <bHide>0</bHide>\
          <aeNationValid><zValue>NATION_ROME</zValue></aeNationValid>\
        </Entry>\
        <Entry>\
          <zType>TECH_DLC</zType>\
          <Name>TEXT_TECH_DLC</Name>\
          <GameContentRequired>GAMECONTENT_DLC</GameContentRequired>\
        </Entry>\
        </Root>";

    fn resolver() -> TextResolver {
        let mut forms = crate::dictionary::Forms::new();
        forms.insert(
            "TEXT_TECH_IRONWORKING".to_string(),
            vec!["Ironworking".to_string()],
        );
        TextResolver::from_parts(forms, GenderMap::new())
    }

    #[test]
    fn test_normalize_field_name() {
        assert_eq!(normalize_field_name("iCost"), "cost");
        assert_eq!(normalize_field_name("bHide"), "hide");
        assert_eq!(normalize_field_name("zIconName"), "iconName");
        assert_eq!(normalize_field_name("aeNationValid"), "nationValid");
        assert_eq!(normalize_field_name("aaiYieldRates"), "yieldRates");
        assert_eq!(normalize_field_name("Name"), "name");
        assert_eq!(normalize_field_name("EffectPlayer"), "effectPlayer");
        assert_eq!(normalize_field_name("xyzWeird"), "weird");
    }

    #[test]
    fn test_transform_records() {
        let category = lookup("technologies").unwrap();
        let records = load_document_str(TECH_XML, "tech.xml").unwrap();

        let entries = transform_records(category, &records, &resolver());

        assert_eq!(entries.len(), 1);
        let tech = entries.get("TECH_IRONWORKING").unwrap();
        let tags: Vec<_> = tech.tags().collect();
        assert_eq!(tags, vec!["name", "cost", "hide", "nationValid"]);
        assert_eq!(tech.get("name"), Some(&Value::String("Ironworking".to_string())));
        assert_eq!(tech.get("advice"), None);
        assert_eq!(tech.get("hide"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_transform_excludes_fields() {
        const TITLE: &[TextField] = &[TextField::new("Name", "title")];
        let category = CategoryDef {
            name: "test",
            display_name: "Test",
            xml_file: "tech.xml",
            expansion_files: &[],
            filter: EntryFilter::All,
            text_fields: TITLE,
            exclude_fields: &["iCost"],
        };
        let records = load_document_str(TECH_XML, "tech.xml").unwrap();

        let entries = transform_records(&category, &records, &resolver());

        assert_eq!(entries.len(), 2);
        let tech = entries.get("TECH_IRONWORKING").unwrap();
        assert!(tech.get("cost").is_none());
        assert_eq!(tech.get("title"), Some(&Value::String("Ironworking".to_string())));
        let dlc = entries.get("TECH_DLC").unwrap();
        assert_eq!(
            dlc.get("gameContentRequired"),
            Some(&Value::String("GAMECONTENT_DLC".to_string()))
        );
    }

    #[test]
    fn test_duplicate_type_key_replaces_body() {
        let mut entries = CategoryEntries::new();
        let mut first = Record::new();
        first.insert("cost", Value::Int(1));
        let mut second = Record::new();
        second.insert("cost", Value::Int(2));

        entries.insert("A".to_string(), first);
        entries.insert("B".to_string(), Record::new());
        entries.insert("A".to_string(), second);

        let keys: Vec<_> = entries.keys().collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(entries.get("A").unwrap().get("cost"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_entries_serialize_in_order() {
        let mut entries = CategoryEntries::new();
        let mut body = Record::new();
        body.insert("cost", Value::Int(5));
        entries.insert("TECH_Z".to_string(), body);
        entries.insert("TECH_A".to_string(), Record::new());

        let json = serde_json::to_string(&entries).unwrap();
        assert_eq!(json, r#"{"TECH_Z":{"cost":5},"TECH_A":{}}"#);
    }

    #[test]
    fn test_infos_dir_missing() {
        let err = infos_dir("/nonexistent/quarry/game").unwrap_err();
        assert!(matches!(err, Error::InfosDirNotFound(_)));
    }
}
