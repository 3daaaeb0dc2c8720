//! Bounded and interactive consumption of device history pages.

use chrono::{DateTime, Local};
use serde_json::Value;
use stcli_api::types::{DeviceActivity, DeviceHistoryRequest};
use stcli_api::{ApiClient, HistoryPager};
use tracing::debug;

use crate::CoreError;
use crate::format::write_output;
use crate::prompt::Prompter;
use crate::table::{TableFieldDefinition, list_table};

/// Server-side cap on items per history request.
pub const MAX_ITEMS_PER_REQUEST: usize = 300;

/// Number of requests beyond which a bulk query asks for confirmation.
pub const MAX_REQUESTS_BEFORE_WARNING: usize = 6;

/// Clamp the user's requested item count to the per-request server cap.
pub fn calculate_request_limit(limit: usize) -> usize {
    limit.min(MAX_ITEMS_PER_REQUEST)
}

/// Newest events first.
pub fn sort_events(events: &mut [DeviceActivity]) {
    events.sort_by(|a, b| b.epoch.cmp(&a.epoch));
}

/// Accumulate up to `limit` history events by walking pages.
///
/// When satisfying `limit` would take more than
/// [`MAX_REQUESTS_BEFORE_WARNING`] requests the user is asked whether to
/// proceed, cancel, or reduce the limit to the warning threshold. Paging
/// stops early once events older than `request.after` show up, since the
/// server stops producing useful pages at that point.
pub async fn get_history<P: Prompter + ?Sized>(
    client: &ApiClient,
    prompter: &mut P,
    limit: usize,
    per_request_limit: usize,
    request: &DeviceHistoryRequest,
) -> Result<Vec<DeviceActivity>, CoreError> {
    let mut limit = limit;
    let estimated_requests = limit.div_ceil(per_request_limit.max(1));
    if estimated_requests > MAX_REQUESTS_BEFORE_WARNING {
        let reduced = MAX_REQUESTS_BEFORE_WARNING * per_request_limit;
        let message = format!(
            "Retrieving {limit} events will require approximately {estimated_requests} requests. Proceed?"
        );
        let choices = [
            "Yes",
            "No (cancel)",
            "Reduce the number of events",
        ];
        match prompter.choose(&message, &choices, 0)? {
            Some(0) => {}
            Some(2) => {
                debug!(limit = reduced, "reducing history limit");
                limit = reduced;
            }
            _ => return Err(CoreError::Cancelled),
        }
    }

    let paged_request = DeviceHistoryRequest {
        limit: per_request_limit,
        ..request.clone()
    };
    let mut pager = client.device_history(&paged_request).await?;
    let mut events = std::mem::take(&mut pager.items);

    // Once a page reaches back past the requested window the rest of the
    // pages will too, so it and everything after it are dropped.
    let mut past_window = page_starts_at_or_before(request.after, &events);
    while !past_window && events.len() < limit && pager.has_next() {
        pager.next_page().await?;
        past_window = page_starts_at_or_before(request.after, &pager.items);
        if !past_window {
            events.append(&mut pager.items);
        }
    }

    events.truncate(limit);
    Ok(events)
}

fn page_starts_at_or_before(after: Option<i64>, page: &[DeviceActivity]) -> bool {
    matches!(
        (after, page.first()),
        (Some(after), Some(first)) if first.epoch <= after
    )
}

/// Rendering options for history tables.
#[derive(Debug, Clone, Default)]
pub struct DeviceActivityOptions {
    /// Include the device name column (multi-device queries).
    pub include_name: bool,
    /// Render times in UTC with this strftime format instead of local time.
    pub utc_time_format: Option<String>,
}

fn event_time(event: &DeviceActivity, options: &DeviceActivityOptions) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(&event.time) else {
        return event.time.clone();
    };
    match &options.utc_time_format {
        Some(format) => parsed.to_utc().format(format).to_string(),
        None => parsed
            .with_timezone(&Local)
            .format("%Y-%m-%d %r")
            .to_string(),
    }
}

fn event_fields(options: &DeviceActivityOptions) -> Vec<TableFieldDefinition> {
    let mut fields = vec![TableFieldDefinition::labeled("time", "Time")];
    if options.include_name {
        fields.push(TableFieldDefinition::labeled("deviceName", "Device Name"));
    }
    fields.extend([
        TableFieldDefinition::labeled("component", "Component"),
        TableFieldDefinition::labeled("capability", "Capability"),
        TableFieldDefinition::labeled("attribute", "Attribute"),
        TableFieldDefinition::labeled("value", "Value"),
    ]);
    fields
}

fn event_row(event: &DeviceActivity, options: &DeviceActivityOptions) -> Value {
    let value = match (&event.value, &event.unit) {
        (Value::String(s), Some(unit)) => Value::String(format!("{s} {unit}")),
        (other, Some(unit)) => Value::String(format!("{other} {unit}")),
        (Value::String(s), None) => Value::String(s.clone()),
        (other, None) => Value::String(other.to_string()),
    };
    serde_json::json!({
        "time": event_time(event, options),
        "deviceName": event.device_name,
        "component": event.component,
        "capability": event.capability,
        "attribute": event.attribute,
        "value": value,
    })
}

/// Rows for one page, newest event first regardless of server order.
fn page_rows(events: &[DeviceActivity], options: &DeviceActivityOptions) -> Vec<Value> {
    let mut sorted = events.to_vec();
    sort_events(&mut sorted);
    sorted.iter().map(|e| event_row(e, options)).collect()
}

fn write_events_page(
    events: &[DeviceActivity],
    options: &DeviceActivityOptions,
) -> Result<(), CoreError> {
    let rows = page_rows(events, options);
    write_output(&list_table(&rows, &event_fields(options), false), None)
}

/// Show history one page at a time, asking before each additional fetch.
pub async fn write_device_events_table<P: Prompter + ?Sized>(
    prompter: &mut P,
    pager: &mut HistoryPager<'_>,
    options: &DeviceActivityOptions,
) -> Result<(), CoreError> {
    write_events_page(&pager.items, options)?;

    while pager.has_next() {
        match prompter.confirm("Fetch more history records?", true)? {
            Some(true) => {}
            _ => break,
        }
        pager.next_page().await?;
        write_events_page(&pager.items, options)?;
    }
    Ok(())
}
