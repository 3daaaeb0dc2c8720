//! List sorting by a named key.

use serde_json::Value;

use crate::table::field_display_value;

/// Stable sort by the lowercased string rendering of `key`. Items missing
/// the key sort as empty strings, keeping their relative order.
pub fn sort_by_key(items: &mut [Value], key: &str) {
    items.sort_by_key(|item| field_display_value(item, key).to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorts_case_insensitively() {
        let mut items = vec![
            json!({"name": "Zebra"}),
            json!({"name": "apple"}),
            json!({"name": "Mango"}),
        ];
        sort_by_key(&mut items, "name");
        let names: Vec<&str> = items.iter().map(|i| i["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["apple", "Mango", "Zebra"]);
    }

    #[test]
    fn missing_keys_sort_first_and_stay_stable() {
        let mut items = vec![
            json!({"name": "beta", "id": 1}),
            json!({"id": 2}),
            json!({"id": 3}),
        ];
        sort_by_key(&mut items, "name");
        assert_eq!(items[0]["id"], 2);
        assert_eq!(items[1]["id"], 3);
        assert_eq!(items[2]["name"], "beta");
    }
}
