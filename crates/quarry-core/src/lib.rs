//! quarry-core: Core library for extracting Old World game data
//!
//! This library provides functionality to:
//! - Detect field types from Hungarian-notation XML tag names
//! - Decode Infos XML entries into typed records
//! - Build the localized text dictionary for a language
//! - Resolve text keys, including gendered keys and nested `{TEXT_*}` references
//! - Extract named data categories ready for serialization

pub mod categories;
pub mod classify;
pub mod decoder;
pub mod dictionary;
pub mod document;
pub mod error;
pub mod gender;
pub mod parser;
pub mod pipeline;
pub mod resolver;
pub mod scanner;
pub mod value;

pub use categories::{CategoryDef, EntryFilter, TextField, CATEGORIES};
pub use classify::{classify, DecodeStrategy};
pub use decoder::{decode_field, decode_record};
pub use dictionary::{build_dictionary, Forms, LanguageColumn};
pub use document::{load_document, load_document_str};
pub use error::{Error, Result};
pub use gender::{build_gender_map, GenderMap};
pub use parser::{parse_xml, parse_xml_str, Element};
pub use pipeline::{extract_category, infos_dir, normalize_field_name, CategoryEntries};
pub use resolver::{build_text_resolver, TextResolver};
pub use value::{Record, Value};
