//! Localized text dictionary built from `text-*.xml` files

use crate::document::{ENTRY, TYPE_KEY};
use crate::error::{Error, Result};
use crate::parser::parse_xml;
use crate::scanner::{find_source_files, TEXT_FILES};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Language index file listing every supported language column
pub const LANGUAGE_INDEX: &str = "language.xml";

/// Field in the language index naming a language's column
const FIELD_NAME: &str = "zFieldName";

/// Separator between grammatical forms of one localized string
pub const FORM_SEPARATOR: char = '~';

/// Text key to its tilde-separated forms; form 0 is the display form
pub type Forms = BTreeMap<String, Vec<String>>;

/// A language code confirmed against the language index
///
/// The code doubles as the element name holding that language's text in
/// `text-*.xml` entries (e.g. `<en-US>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageColumn {
    code: String,
}

impl LanguageColumn {
    /// Validate a language code against `language.xml` in the Infos directory
    pub fn validate<P: AsRef<Path>>(infos_dir: P, language: &str) -> Result<Self> {
        let index_path = infos_dir.as_ref().join(LANGUAGE_INDEX);
        if !index_path.is_file() {
            return Err(Error::MissingSource { path: index_path });
        }

        let root = parse_xml(&index_path)?;
        let valid: Vec<String> = root
            .find_all(ENTRY)
            .filter_map(|entry| entry.child_text(FIELD_NAME))
            .map(str::to_string)
            .collect();

        if valid.iter().any(|code| code == language) {
            Ok(Self {
                code: language.to_string(),
            })
        } else {
            Err(Error::UnknownLanguage {
                language: language.to_string(),
                valid,
            })
        }
    }

    /// The language code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Element name of this language inside text entries
    pub fn field_name(&self) -> &str {
        &self.code
    }
}

/// Split a localized string into its forms
pub fn split_forms(text: &str) -> Vec<String> {
    text.split(FORM_SEPARATOR).map(str::to_string).collect()
}

/// Build the text dictionary for one language column
///
/// Files are read in sorted name order; a key defined in several files keeps
/// the value from the last one.
pub fn build_dictionary<P: AsRef<Path>>(infos_dir: P, language: &LanguageColumn) -> Result<Forms> {
    let infos_dir = infos_dir.as_ref();
    let files = find_source_files(infos_dir, TEXT_FILES)?;
    if files.is_empty() {
        return Err(Error::MissingSource {
            path: infos_dir.join(TEXT_FILES.to_string()),
        });
    }

    let mut forms = Forms::new();
    for path in &files {
        let root = parse_xml(path)?;
        let before = forms.len();

        for entry in root.find_all(ENTRY) {
            let (Some(key), Some(text)) = (
                entry.child_text(TYPE_KEY),
                entry.child_text(language.field_name()),
            ) else {
                continue;
            };
            forms.insert(key.to_string(), split_forms(text));
        }

        debug!(
            path = %path.display(),
            new_keys = forms.len() - before,
            "loaded text file"
        );
    }

    Ok(forms)
}
