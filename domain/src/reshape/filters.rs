//! Client-side record filters.

use chrono::NaiveDate;
use serde_json::Value;

use super::records_mut;
use super::statistics::purchase_date;

/// Keep records whose `field` contains `needle`, ignoring case.
///
/// Matching lowercases both sides, so diacritics must still match
/// (`Čokoláda` matches `čoko`, but not `coko`). An empty needle keeps
/// everything. Non-list values are returned unchanged.
pub fn filter_by_name(mut value: Value, field: &str, needle: &str) -> Value {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return value;
    }

    if let Some(items) = records_mut(&mut value) {
        items.retain(|item| {
            item.get(field)
                .and_then(Value::as_str)
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        });
    }
    value
}

/// Keep orders purchased on or before `until`.
///
/// Orders without a parseable `pur_date` are dropped.
pub fn filter_purchased_until(mut value: Value, until: NaiveDate) -> Value {
    if let Some(orders) = records_mut(&mut value) {
        orders.retain(|order| match purchase_date(order) {
            Some(date) => date <= until,
            None => {
                let order_num = order.get("order_num").and_then(Value::as_str).unwrap_or("unknown");
                tracing::warn!(order = order_num, "Dropping order without a parseable purchase date");
                false
            }
        });
    }
    value
}
