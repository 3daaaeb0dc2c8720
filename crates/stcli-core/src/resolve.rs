//! Resolution of user-supplied ids and 1-based list indexes.

use std::future::Future;

use serde::Serialize;
use serde_json::Value;

use crate::CoreError;
use crate::sort::sort_by_key;

/// True when the argument looks like a 1-based list index: all digits with
/// no leading zero.
pub fn is_index_argument(arg: &str) -> bool {
    let mut chars = arg.chars();
    match chars.next() {
        Some(first) if ('1'..='9').contains(&first) => chars.all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Extract the string value of `key` from an item, failing on missing or
/// non-string keys.
pub fn string_key_value(item: &Value, key: &str) -> Result<String, CoreError> {
    match item.get(key) {
        None | Some(Value::Null) => Err(CoreError::MissingKey {
            key: key.to_string(),
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(CoreError::InvalidKeyType {
            key: key.to_string(),
            item: other.to_string(),
        }),
    }
}

/// Convert items to their JSON projections and sort by `sort_key`.
pub fn sorted_values<T: Serialize>(items: &[T], sort_key: &str) -> Result<Vec<Value>, CoreError> {
    let mut values = items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    sort_by_key(&mut values, sort_key);
    Ok(values)
}

/// Map an id-or-index string to an id against an already-sorted list.
///
/// An exact primary-key match wins over index interpretation; otherwise an
/// index argument selects the 1-based position. Returns `Ok(None)` when the
/// input is neither.
pub fn convert_to_id(
    id_or_index: &str,
    primary_key: &str,
    sorted: &[Value],
) -> Result<Option<String>, CoreError> {
    for item in sorted {
        if string_key_value(item, primary_key)? == id_or_index {
            return Ok(Some(id_or_index.to_string()));
        }
    }
    if is_index_argument(id_or_index) {
        let index: usize = id_or_index
            .parse()
            .map_err(|_| CoreError::InvalidInput(format!("invalid index {id_or_index}")))?;
        if index < 1 || index > sorted.len() {
            return Err(CoreError::InvalidIndex {
                index,
                max: sorted.len(),
            });
        }
        return Ok(Some(string_key_value(&sorted[index - 1], primary_key)?));
    }
    Ok(None)
}

/// Translate a possibly-index command argument to an id.
///
/// `None` passes through; arguments that don't look like an index are
/// assumed to already be ids and returned unchanged without fetching the
/// list. Only index-shaped arguments trigger a lookup.
pub async fn string_translate_to_id<T, F, Fut>(
    id_or_index: Option<&str>,
    primary_key: &str,
    sort_key: &str,
    list_items: F,
) -> Result<Option<String>, CoreError>
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, CoreError>>,
{
    let Some(arg) = id_or_index else {
        return Ok(None);
    };
    if !is_index_argument(arg) {
        return Ok(Some(arg.to_string()));
    }

    let items = list_items().await?;
    let sorted = sorted_values(&items, sort_key)?;
    let index: usize = arg
        .parse()
        .map_err(|_| CoreError::InvalidInput(format!("invalid index {arg}")))?;
    if index < 1 || index > sorted.len() {
        return Err(CoreError::InvalidIndex {
            index,
            max: sorted.len(),
        });
    }
    Ok(Some(string_key_value(&sorted[index - 1], primary_key)?))
}
