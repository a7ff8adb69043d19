//! Field and entry decoding
//!
//! Every decoder returns `None` for "not set". Callers drop absent fields
//! instead of storing a placeholder, so a record only ever holds real data.

use crate::classify::{classify, DecodeStrategy};
use crate::parser::Element;
use crate::value::{Record, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Literal used by the data files for "no value"
pub const NONE_LITERAL: &str = "NONE";

/// Integer sentinel for "not set"
pub const UNSET_INT: i64 = -1;

const PAIR: &str = "Pair";
const SUB_PAIR: &str = "SubPair";
const INDEX: &str = "zIndex";
const SUB_INDEX: &str = "zSubIndex";
const INT_VALUE: &str = "iValue";
const BOOL_VALUE: &str = "bValue";
const STRING_VALUE: &str = "zValue";

/// Decode a field element according to its strategy
pub fn decode_field(element: &Element, strategy: DecodeStrategy) -> Option<Value> {
    match strategy {
        DecodeStrategy::Int => decode_int(element),
        DecodeStrategy::Float => decode_float(element),
        DecodeStrategy::Bool => element.text().map(|t| Value::Bool(t == "1")),
        DecodeStrategy::String => decode_string(element),
        DecodeStrategy::StringList => decode_string_list(element),
        DecodeStrategy::SparseIntMap => decode_sparse_int_map(element),
        DecodeStrategy::SparseBoolMap => decode_sparse_bool_map(element),
        DecodeStrategy::SparseStringMap => decode_sparse_string_map(element),
        DecodeStrategy::SparseEnumListMap => decode_sparse_enum_list_map(element),
        DecodeStrategy::Sparse2DMap => decode_sparse_2d_map(element),
    }
}

/// Decode an `Entry` element into a record
///
/// Fields are classified by tag name and kept in document order. Absent
/// fields are omitted; explicit `false` booleans are kept.
pub fn decode_record(entry: &Element) -> Record {
    let mut record = Record::new();
    for field in &entry.children {
        if let Some(value) = decode_field(field, classify(&field.name)) {
            record.insert(field.name.as_str(), value);
        }
    }
    record
}

fn decode_int(element: &Element) -> Option<Value> {
    let text = element.text()?;
    match text.parse::<i64>() {
        Ok(UNSET_INT) => None,
        Ok(value) => Some(Value::Int(value)),
        // Some i-prefixed fields hold enum names (e.g. iTriggerSubject)
        Err(_) => preserve_raw(element, text),
    }
}

fn decode_float(element: &Element) -> Option<Value> {
    let text = element.text()?;
    match text.parse::<f64>() {
        Ok(value) => Some(Value::Float(value)),
        Err(_) => preserve_raw(element, text),
    }
}

/// Keep non-numeric text from a numeric field as a string
fn preserve_raw(element: &Element, text: &str) -> Option<Value> {
    if text == NONE_LITERAL {
        return None;
    }
    debug!(field = %element.name, value = text, "non-numeric value kept as string");
    Some(Value::String(text.to_string()))
}

fn decode_string(element: &Element) -> Option<Value> {
    element
        .text()
        .filter(|t| *t != NONE_LITERAL)
        .map(|t| Value::String(t.to_string()))
}

fn decode_string_list(element: &Element) -> Option<Value> {
    // Some ae-prefixed fields use index/value pairs instead of plain children
    if element.find(PAIR).is_some() {
        return decode_sparse_string_map(element);
    }

    let values: Vec<String> = element
        .children
        .iter()
        .filter_map(Element::text)
        .map(str::to_string)
        .collect();

    non_empty(values).map(Value::StringList)
}

fn decode_sparse_int_map(element: &Element) -> Option<Value> {
    let mut result = BTreeMap::new();
    for pair in element.find_all(PAIR) {
        let (Some(key), Some(value)) = (pair.child_text(INDEX), pair.child_text(INT_VALUE))
        else {
            continue;
        };
        if let Some(v) = parse_int(&element.name, key, value) {
            result.insert(key.to_string(), v);
        }
    }
    non_empty_map(result).map(Value::IntMap)
}

fn decode_sparse_bool_map(element: &Element) -> Option<Value> {
    let keys: Vec<String> = element
        .find_all(PAIR)
        .filter(|pair| pair.child_text(BOOL_VALUE) == Some("1"))
        .filter_map(|pair| pair.child_text(INDEX))
        .map(str::to_string)
        .collect();

    non_empty(keys).map(Value::StringList)
}

fn decode_sparse_string_map(element: &Element) -> Option<Value> {
    let mut result = BTreeMap::new();
    for pair in element.find_all(PAIR) {
        if let (Some(key), Some(value)) = (pair.child_text(INDEX), pair.child_text(STRING_VALUE))
        {
            result.insert(key.to_string(), value.to_string());
        }
    }
    non_empty_map(result).map(Value::StringMap)
}

fn decode_sparse_enum_list_map(element: &Element) -> Option<Value> {
    let mut result = BTreeMap::new();
    for pair in element.find_all(PAIR) {
        let Some(key) = pair.child_text(INDEX) else {
            continue;
        };
        let values: Vec<String> = pair
            .find_all(STRING_VALUE)
            .filter_map(Element::text)
            .map(str::to_string)
            .collect();
        if !values.is_empty() {
            result.insert(key.to_string(), values);
        }
    }
    non_empty_map(result).map(Value::EnumListMap)
}

fn decode_sparse_2d_map(element: &Element) -> Option<Value> {
    let mut result = BTreeMap::new();
    for pair in element.find_all(PAIR) {
        let Some(key) = pair.child_text(INDEX) else {
            continue;
        };
        let mut inner = BTreeMap::new();
        for sub_pair in pair.find_all(SUB_PAIR) {
            let (Some(sub_key), Some(value)) =
                (sub_pair.child_text(SUB_INDEX), sub_pair.child_text(INT_VALUE))
            else {
                continue;
            };
            if let Some(v) = parse_int(&element.name, sub_key, value) {
                inner.insert(sub_key.to_string(), v);
            }
        }
        if !inner.is_empty() {
            result.insert(key.to_string(), inner);
        }
    }
    non_empty_map(result).map(Value::NestedIntMap)
}

/// Parse a map value, skipping the pair when it is not an integer
fn parse_int(field: &str, key: &str, value: &str) -> Option<i64> {
    match value.parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(field, index = key, value, "skipping non-integer map value");
            None
        }
    }
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn non_empty_map<V>(map: BTreeMap<String, V>) -> Option<BTreeMap<String, V>> {
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}
