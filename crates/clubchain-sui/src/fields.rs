//! Accessors over Move struct fields as rendered by the fullnode JSON.
//!
//! Nested structs show up as `{ "type": .., "fields": { .. } }`, `u64` as strings, `UID` and
//! `ID` either as `{ "id": "0x.." }` or as bare strings, `Option<T>` as `null` or the value,
//! and `VecMap` as `{ "fields": { "contents": [ { "fields": { "key", "value" } } ] } }`.
//! Every accessor returns `None` (or an empty list) on an unexpected shape instead of an
//! error.

use serde_json::Value;

/// Step into a nested struct: `{ "fields": { .. } }` yields the inner map, anything else is
/// returned unchanged.
#[must_use]
pub fn unwrap_struct(value: &Value) -> &Value {
    match value.get("fields") {
        Some(inner) if inner.is_object() => inner,
        _ => value,
    }
}

/// Follow a path of field names, unwrapping nested structs on the way.
#[must_use]
pub fn path<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(value, |current, key| unwrap_struct(current).get(*key))
}

/// String field.
#[must_use]
pub fn string(fields: &Value, key: &str) -> Option<String> {
    unwrap_struct(fields)
        .get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

/// `u64` field, accepting string and number renderings.
#[must_use]
pub fn u64_field(fields: &Value, key: &str) -> Option<u64> {
    unwrap_struct(fields).get(key).and_then(as_u64)
}

/// A JSON value holding a Move `u64`.
#[must_use]
pub fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        // `Option<u64>` rendered as `{ "vec": [n] }` by older nodes.
        Value::Object(_) => {
            unwrap_struct(value)
                .get("vec")
                .and_then(Value::as_array)
                .and_then(|v| v.first())
                .and_then(as_u64)
        },
        _ => None,
    }
}

/// An object id held by a `UID` / `ID` / `address` field.
#[must_use]
pub fn id(fields: &Value, key: &str) -> Option<String> {
    unwrap_struct(fields).get(key).and_then(as_id)
}

/// A JSON value holding a `UID`, `ID` or address.
#[must_use]
pub fn as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(_) => unwrap_struct(value).get("id").and_then(as_id),
        _ => None,
    }
}

/// A `vector<ID>` / `vector<address>` field. Elements that are not ids are skipped.
#[must_use]
pub fn id_list(fields: &Value, key: &str) -> Vec<String> {
    unwrap_struct(fields)
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(as_id).collect())
        .unwrap_or_default()
}

/// Entries of a `VecMap` as `(key, value)` pairs. Missing levels yield no entries.
#[must_use]
pub fn vec_map_entries(map: &Value) -> Vec<(&Value, &Value)> {
    unwrap_struct(map)
        .get("contents")
        .and_then(Value::as_array)
        .map(|contents| {
            contents
                .iter()
                .filter_map(|entry| {
                    let entry = unwrap_struct(entry);
                    Some((entry.get("key")?, entry.get("value")?))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Canonical form of an address or object id: `0x` followed by 64 lowercase hex digits.
/// Short forms such as `0x6` are left padded with zeros.
#[must_use]
pub fn normalize_address(address: &str) -> String {
    let address = address.trim();
    let hex = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    format!("0x{:0>64}", hex.to_ascii_lowercase())
}

/// Whether two addresses or ids name the same account or object.
#[must_use]
pub fn same_address(a: &str, b: &str) -> bool {
    normalize_address(a) == normalize_address(b)
}

/// Drop repeated ids, keeping first-seen order.
pub fn dedup_ids(ids: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}
