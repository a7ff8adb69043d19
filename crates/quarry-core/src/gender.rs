//! Gendered text indirection from `genderedText*.xml` files
//!
//! A `GENDERED_TEXT_*` key names a set of per-gender variants. Display text
//! always uses the masculine variant, so only that key is kept.

use crate::document::{ENTRY, TYPE_KEY};
use crate::error::Result;
use crate::parser::{parse_xml, Element};
use crate::scanner::{find_source_files, GENDERED_TEXT_FILES};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Key prefix marking a gender-indirected text key
pub const GENDERED_PREFIX: &str = "GENDERED_TEXT_";

/// Index value of the masculine variant
pub const MASCULINE: &str = "GRAMMATICAL_GENDER_MASCULINE";

const TEXTS: &str = "Texts";
const PAIR: &str = "Pair";
const INDEX: &str = "zIndex";
const VALUE: &str = "zValue";

/// Gendered key to its canonical (masculine) text key
pub type GenderMap = BTreeMap<String, String>;

/// Build the gender indirection map from every gendered-text file
///
/// Entries without a masculine variant contribute nothing. Having no
/// gendered-text files at all is not an error.
pub fn build_gender_map<P: AsRef<Path>>(infos_dir: P) -> Result<GenderMap> {
    let mut map = GenderMap::new();

    for path in find_source_files(infos_dir, GENDERED_TEXT_FILES)? {
        let root = parse_xml(&path)?;
        for entry in root.find_all(ENTRY) {
            if let Some((key, canonical)) = masculine_mapping(entry) {
                map.insert(key.to_string(), canonical.to_string());
            }
        }
        debug!(path = %path.display(), total = map.len(), "loaded gendered text file");
    }

    Ok(map)
}

/// The (gendered key, masculine key) pair of one entry, if it has both
fn masculine_mapping(entry: &Element) -> Option<(&str, &str)> {
    let key = entry.child_text(TYPE_KEY)?;
    let canonical = entry
        .find(TEXTS)?
        .find_all(PAIR)
        .filter(|pair| pair.child_text(INDEX) == Some(MASCULINE))
        .find_map(|pair| pair.child_text(VALUE))?;
    Some((key, canonical))
}
