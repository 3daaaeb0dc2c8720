//! Table rendering for items and lists.

use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

/// A column in a list table, or a row in a single-item table.
#[derive(Debug, Clone)]
pub struct TableFieldDefinition {
    /// Dotted path into the item, e.g. `"deviceId"` or `"app.appId"`.
    pub path: String,
    /// Column header; derived from the path when `None`.
    pub label: Option<String>,
}

impl TableFieldDefinition {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: None,
        }
    }

    pub fn labeled(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: Some(label.into()),
        }
    }

    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => default_label(&self.path),
        }
    }
}

/// Derive a header from the final segment of a dotted camelCase path:
/// `"deviceTypeName"` becomes `"Device Type Name"`.
pub fn default_label(path: &str) -> String {
    let segment = path.rsplit('.').next().unwrap_or(path);
    let mut label = String::with_capacity(segment.len() + 4);
    for (i, ch) in segment.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            label.push(' ');
            label.push(ch);
        } else {
            label.push(ch);
        }
    }
    label
}

/// Look up a dotted path in a JSON value, rendering scalars as plain text.
pub fn field_display_value(item: &Value, path: &str) -> String {
    let mut current = item;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(value) => current = value,
            None => return String::new(),
        }
    }
    match current {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Two-column name/value table for a single item.
pub fn item_table(item: &Value, fields: &[TableFieldDefinition]) -> String {
    let mut builder = Builder::default();
    for field in fields {
        builder.push_record([field.label(), field_display_value(item, &field.path)]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// One-row-per-item table, optionally with a 1-based `#` index column.
pub fn list_table(items: &[Value], fields: &[TableFieldDefinition], include_index: bool) -> String {
    let mut builder = Builder::default();

    let mut header: Vec<String> = Vec::with_capacity(fields.len() + 1);
    if include_index {
        header.push("#".to_string());
    }
    header.extend(fields.iter().map(TableFieldDefinition::label));
    builder.push_record(header);

    for (index, item) in items.iter().enumerate() {
        let mut row: Vec<String> = Vec::with_capacity(fields.len() + 1);
        if include_index {
            row.push((index + 1).to_string());
        }
        row.extend(fields.iter().map(|f| field_display_value(item, &f.path)));
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}
