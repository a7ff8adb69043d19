//! Text key resolution
//!
//! A [`TextResolver`] is built once per run from the Infos directory and is
//! read-only afterwards, so it can be shared freely between consumers.

use crate::dictionary::{build_dictionary, Forms, LanguageColumn};
use crate::error::Result;
use crate::gender::{build_gender_map, GenderMap, GENDERED_PREFIX};
use std::path::Path;
use tracing::info;

/// Default bound on nested `{TEXT_*}` substitution
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Required start of a key inside a reference token
const TOKEN_KEY_PREFIX: &str = "TEXT_";

/// Resolves text keys to display strings for one language
#[derive(Debug, Clone)]
pub struct TextResolver {
    forms: Forms,
    gender_map: GenderMap,
    max_depth: usize,
}

impl TextResolver {
    /// Build a resolver from the Infos directory for a language code
    ///
    /// Fails with [`crate::Error::UnknownLanguage`] if the code is not listed
    /// in `language.xml`.
    pub fn build<P: AsRef<Path>>(infos_dir: P, language: &str) -> Result<Self> {
        let infos_dir = infos_dir.as_ref();
        let column = LanguageColumn::validate(infos_dir, language)?;
        let forms = build_dictionary(infos_dir, &column)?;
        let gender_map = build_gender_map(infos_dir)?;

        info!(
            language,
            entries = forms.len(),
            gendered = gender_map.len(),
            "text dictionary loaded"
        );
        Ok(Self::from_parts(forms, gender_map))
    }

    /// Create a resolver from an already-built dictionary and gender map
    pub fn from_parts(forms: Forms, gender_map: GenderMap) -> Self {
        Self {
            forms,
            gender_map,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the substitution depth bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolve a text key to its display string
    ///
    /// `GENDERED_TEXT_*` keys go through the gender map first. Embedded
    /// `{TEXT_*}` tokens are substituted recursively up to the depth bound;
    /// tokens that cannot be resolved stay in the output verbatim.
    pub fn resolve(&self, key: &str) -> Option<String> {
        self.resolve_at(key, 0)
    }

    fn resolve_at(&self, key: &str, depth: usize) -> Option<String> {
        let display = self.lookup(key)?.first()?;
        if depth >= self.max_depth {
            return Some(display.clone());
        }
        Some(self.substitute(display, depth))
    }

    /// All forms for a key, after gender indirection
    pub fn lookup(&self, key: &str) -> Option<&[String]> {
        self.forms
            .get(self.canonical_key(key))
            .map(Vec::as_slice)
    }

    /// Map a gendered key to its masculine key
    ///
    /// A gendered key with no mapping is returned unchanged, which then
    /// usually fails dictionary lookup.
    pub fn canonical_key<'a>(&'a self, key: &'a str) -> &'a str {
        if key.starts_with(GENDERED_PREFIX) {
            if let Some(canonical) = self.gender_map.get(key) {
                return canonical;
            }
        }
        key
    }

    /// Replace every `{TEXT_*}` token in `text`
    fn substitute(&self, text: &str, depth: usize) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let candidate = &rest[open..];

            match reference_token(candidate) {
                Some((key, len)) => {
                    match self.resolve_at(key, depth + 1) {
                        Some(resolved) => out.push_str(&resolved),
                        None => out.push_str(&candidate[..len]),
                    }
                    rest = &candidate[len..];
                }
                None => {
                    out.push('{');
                    rest = &candidate[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }

    /// All keys mapped to their tilde-separated forms
    pub fn forms(&self) -> &Forms {
        &self.forms
    }

    /// The gender indirection map
    pub fn gender_map(&self) -> &GenderMap {
        &self.gender_map
    }

    /// Number of text entries loaded
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Check if no text entries were loaded
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// Build a resolver from the Infos directory for a language code
pub fn build_text_resolver<P: AsRef<Path>>(infos_dir: P, language: &str) -> Result<TextResolver> {
    TextResolver::build(infos_dir, language)
}

/// Match a `{TEXT_<word chars>}` token at the start of `s`
///
/// Returns the key inside the braces and the token's byte length.
fn reference_token(s: &str) -> Option<(&str, usize)> {
    let inner = s.strip_prefix('{')?;
    let after_prefix = inner.strip_prefix(TOKEN_KEY_PREFIX)?;

    let word_len: usize = after_prefix
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .map(char::len_utf8)
        .sum();
    if word_len == 0 {
        return None;
    }

    let key_len = TOKEN_KEY_PREFIX.len() + word_len;
    if !inner[key_len..].starts_with('}') {
        return None;
    }

    Some((&inner[..key_len], key_len + 2))
}
