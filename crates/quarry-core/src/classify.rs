//! Field type detection from Hungarian-notation tag names
//!
//! Infos XML carries no schema. A field's type is encoded in the lowercase
//! prefix of its tag: `iCost` is an integer, `aeNationValid` a list of enum
//! names, `aaiYieldRates` a two-level integer map, and so on.

/// How a field's XML sub-structure is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStrategy {
    Int,
    Float,
    Bool,
    String,
    StringList,
    SparseIntMap,
    SparseBoolMap,
    SparseStringMap,
    SparseEnumListMap,
    Sparse2DMap,
}

/// Known prefixes, longest first so overlapping prefixes resolve deterministically
const PREFIX_TABLE: &[(&str, DecodeStrategy)] = &[
    ("aai", DecodeStrategy::Sparse2DMap),
    ("aae", DecodeStrategy::SparseEnumListMap),
    ("ae", DecodeStrategy::StringList),
    ("ai", DecodeStrategy::SparseIntMap),
    ("ab", DecodeStrategy::SparseBoolMap),
    ("az", DecodeStrategy::SparseStringMap),
    ("i", DecodeStrategy::Int),
    ("f", DecodeStrategy::Float),
    ("b", DecodeStrategy::Bool),
    ("z", DecodeStrategy::String),
    ("e", DecodeStrategy::String),
];

/// Extract the Hungarian prefix of a tag
///
/// The prefix is the maximal leading run of ASCII lowercase letters, and only
/// counts when an ASCII uppercase letter follows it directly.
///
/// Examples:
/// - "iCost" -> Some("i")
/// - "aaiYieldRates" -> Some("aai")
/// - "Name" -> None
/// - "lowercase" -> None
pub fn hungarian_prefix(tag: &str) -> Option<&str> {
    let end = tag
        .bytes()
        .position(|b| !b.is_ascii_lowercase())
        .unwrap_or(tag.len());

    if end == 0 {
        return None;
    }

    match tag.as_bytes().get(end) {
        Some(b) if b.is_ascii_uppercase() => Some(&tag[..end]),
        _ => None,
    }
}

/// Determine the decode strategy for a field from its tag name
///
/// Unknown or missing prefixes fall back to [`DecodeStrategy::String`].
pub fn classify(tag: &str) -> DecodeStrategy {
    let Some(prefix) = hungarian_prefix(tag) else {
        return DecodeStrategy::String;
    };

    PREFIX_TABLE
        .iter()
        .find(|(known, _)| *known == prefix)
        .map(|(_, strategy)| *strategy)
        .unwrap_or(DecodeStrategy::String)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prefix_table() {
        let cases = [
            ("aaiFoo", DecodeStrategy::Sparse2DMap),
            ("aaeFoo", DecodeStrategy::SparseEnumListMap),
            ("aeFoo", DecodeStrategy::StringList),
            ("aiFoo", DecodeStrategy::SparseIntMap),
            ("abFoo", DecodeStrategy::SparseBoolMap),
            ("azFoo", DecodeStrategy::SparseStringMap),
            ("iFoo", DecodeStrategy::Int),
            ("fFoo", DecodeStrategy::Float),
            ("bFoo", DecodeStrategy::Bool),
            ("zFoo", DecodeStrategy::String),
            ("eFoo", DecodeStrategy::String),
            ("Foo", DecodeStrategy::String),
        ];

        for (tag, expected) in cases {
            assert_eq!(classify(tag), expected, "tag {}", tag);
        }
    }

    #[test]
    fn test_classify_unknown_prefix_is_string() {
        assert_eq!(classify("xyzFoo"), DecodeStrategy::String);
        assert_eq!(classify("aFoo"), DecodeStrategy::String);
    }

    #[test]
    fn test_classify_no_uppercase_after_prefix() {
        assert_eq!(classify("icost"), DecodeStrategy::String);
        assert_eq!(classify("i2Cost"), DecodeStrategy::String);
        assert_eq!(classify(""), DecodeStrategy::String);
    }

    #[test]
    fn test_hungarian_prefix_is_maximal_run() {
        assert_eq!(hungarian_prefix("aaiYieldRates"), Some("aai"));
        assert_eq!(hungarian_prefix("aiYieldCost"), Some("ai"));
        assert_eq!(hungarian_prefix("iCost"), Some("i"));
        assert_eq!(hungarian_prefix("Name"), None);
        assert_eq!(hungarian_prefix("GameContentRequired"), None);
    }
}
