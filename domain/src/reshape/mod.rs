//! Response reshaping
//!
//! Everything applied to an upstream result after extraction: field renames
//! and the few client-side filters and aggregates some tools perform.
//! List results come in two forms, a plain array or a paged
//! `{ data: [...], pageInfo: {...} }` object; [`records`] and
//! [`records_mut`] hide the difference.

pub mod filters;
pub mod orders;
pub mod renames;
pub mod statistics;

use serde_json::Value;

pub use filters::{filter_by_name, filter_purchased_until};
pub use orders::{customer_name, search_orders};
pub use renames::apply_renames;
pub use statistics::{DateRange, OrderStatistics, StatusExclusion};

/// Records of a list result, if it has any.
pub fn records(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.get("data").and_then(Value::as_array),
        _ => None,
    }
}

pub fn records_mut(value: &mut Value) -> Option<&mut Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.get_mut("data").and_then(Value::as_array_mut),
        _ => None,
    }
}

/// `pageInfo.hasNextPage` and `pageInfo.nextCursor` of a paged result.
pub fn next_cursor(value: &Value) -> Option<&Value> {
    let page_info = value.get("pageInfo")?;
    if !page_info.get("hasNextPage")?.as_bool()? {
        return None;
    }
    page_info.get("nextCursor").filter(|c| !c.is_null())
}
