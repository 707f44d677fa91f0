//! Order statistics over a date range.
//!
//! The only aggregate the adapter computes. Orders in excluded statuses
//! (cancelled, unpaid, failed online payments) are counted but contribute
//! nothing to revenue, items, the status breakdown or daily figures.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::{BTreeMap, BTreeSet};

use crate::util::{date_prefix, format_date, parse_date};

/// Upstream status labels excluded by default.
///
/// In order: cancelled, online payment expired, online payment rejected,
/// awaiting payment, gateway payment method confirmed (pending).
pub const DEFAULT_EXCLUDED_STATUS_LABELS: [&str; 5] = [
    "Storno",
    "Platba online - platnosť vypršala",
    "Platba online - platba zamietnutá",
    "Čaká na úhradu",
    "GoPay - platebni metoda potvrzena",
];

/// Which order statuses do not count towards statistics.
///
/// Once any status id is configured, an order carrying a status id is judged
/// by its id alone. Labels decide only when no ids are configured or the
/// order has no status id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusExclusion {
    ids: BTreeSet<String>,
    labels: BTreeSet<String>,
}

impl Default for StatusExclusion {
    fn default() -> Self {
        Self::new(
            Vec::<String>::new(),
            DEFAULT_EXCLUDED_STATUS_LABELS.iter().map(|s| s.to_string()),
        )
    }
}

impl StatusExclusion {
    pub fn new(
        ids: impl IntoIterator<Item = impl Into<String>>,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_excluded(&self, order: &Value) -> bool {
        let (id, name) = status_of(order);
        match id {
            Some(id) if !self.ids.is_empty() => self.ids.contains(&id),
            _ => name.is_some_and(|name| self.labels.contains(name)),
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// Status id (as string) and name of an order.
///
/// Accepts both the upstream shape `{status: {id, name}}` and the flattened
/// `{status_id, status}` produced by renames.
fn status_of(order: &Value) -> (Option<String>, Option<&str>) {
    let id_string = |v: &Value| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };

    match order.get("status") {
        Some(Value::Object(status)) => (
            status.get("id").and_then(id_string),
            status.get("name").and_then(Value::as_str),
        ),
        Some(Value::String(name)) => (order.get("status_id").and_then(id_string), Some(name.as_str())),
        _ => (order.get("status_id").and_then(id_string), None),
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// Purchase date of an order.
pub fn purchase_date(order: &Value) -> Option<NaiveDate> {
    order.get("pur_date").and_then(Value::as_str).and_then(parse_date)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyStats {
    pub orders: usize,
    pub revenue: f64,
    pub items: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderStatistics {
    pub total_orders: usize,
    pub valid_orders: usize,
    pub total_revenue: f64,
    pub total_items: usize,
    pub status_breakdown: BTreeMap<String, usize>,
    pub daily: BTreeMap<String, DailyStats>,
}

impl OrderStatistics {
    /// Aggregate the orders of `range`. Orders outside the range or without
    /// a parseable purchase date are ignored entirely.
    pub fn compute(orders: &[Value], range: DateRange, exclusion: &StatusExclusion) -> Self {
        let mut stats = Self::default();

        for order in orders {
            let Some(date) = purchase_date(order) else {
                let order_num = order.get("order_num").and_then(Value::as_str).unwrap_or("unknown");
                tracing::warn!(
                    order = order_num,
                    "Skipping order without a parseable purchase date"
                );
                continue;
            };
            if !range.contains(date) {
                continue;
            }

            stats.total_orders += 1;
            if exclusion.is_excluded(order) {
                continue;
            }

            let value = order_value(order);
            let items = order.get("items").and_then(Value::as_array).map_or(0, Vec::len);
            let status = status_of(order).1.unwrap_or("Unknown").to_string();

            stats.valid_orders += 1;
            stats.total_revenue += value;
            stats.total_items += items;
            *stats.status_breakdown.entry(status).or_insert(0) += 1;

            let day_key = order
                .get("pur_date")
                .and_then(Value::as_str)
                .map(|d| date_prefix(d).to_string())
                .unwrap_or_else(|| format_date(date));
            let day = stats.daily.entry(day_key).or_default();
            day.orders += 1;
            day.revenue += value;
            day.items += items;
        }

        stats
    }

    pub fn excluded_orders(&self) -> usize {
        self.total_orders - self.valid_orders
    }

    pub fn average_order_value(&self) -> f64 {
        if self.valid_orders == 0 {
            0.0
        } else {
            round2(self.total_revenue / self.valid_orders as f64)
        }
    }

    pub fn to_json(&self, range: DateRange, exclusion: &StatusExclusion) -> Value {
        let daily: BTreeMap<&String, Value> = self
            .daily
            .iter()
            .map(|(day, s)| {
                (
                    day,
                    json!({"orders": s.orders, "revenue": round2(s.revenue), "items": s.items}),
                )
            })
            .collect();

        json!({
            "period": {
                "from": format_date(range.from),
                "to": format_date(range.to),
            },
            "summary": {
                "total_orders": self.total_orders,
                "valid_orders": self.valid_orders,
                "excluded_orders": self.excluded_orders(),
                "total_revenue": round2(self.total_revenue),
                "total_items": self.total_items,
                "average_order_value": self.average_order_value(),
            },
            "status_breakdown": self.status_breakdown,
            "daily_stats": daily,
            "excluded_statuses": exclusion.labels().collect::<Vec<_>>(),
            "excluded_status_ids": exclusion.ids().collect::<Vec<_>>(),
        })
    }
}

/// Order total; string values are parsed, anything unparseable counts as 0.
fn order_value(order: &Value) -> f64 {
    match order.get("sum").and_then(|s| s.get("value")) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value = %s, "Invalid order value, counting as 0");
            0.0
        }),
        _ => 0.0,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(num: u32, date: &str, status: &str, value: Value, items: usize) -> Value {
        json!({
            "order_num": format!("2024{:03}", num),
            "pur_date": date,
            "status": {"id": format!("{}", num % 7), "name": status},
            "sum": {"value": value, "currency": {"code": "EUR"}},
            "items": vec![json!({"item_label": "x"}); items],
        })
    }

    fn march() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
    }

    fn ten_orders() -> Vec<Value> {
        vec![
            order(1, "2024-03-01T09:00:00", "Vybavená", json!(10.0), 1),
            order(2, "2024-03-01 10:00:00", "Storno", json!(99.0), 3),
            order(3, "2024-03-02T11:00:00", "Nová", json!("20.50"), 2),
            order(4, "2024-03-03T12:00:00", "Čaká na úhradu", json!(50), 1),
            order(5, "2024-03-04T13:00:00", "Vybavená", json!(5), 1),
            order(6, "2024-03-05T14:00:00", "Odoslaná", json!(4.5), 1),
            order(7, "2024-03-06T15:00:00", "GoPay - platebni metoda potvrzena", json!(8), 1),
            order(8, "2024-03-07T16:00:00", "Nová", json!("n/a"), 0),
            order(9, "2024-03-08T17:00:00", "Vybavená", json!(10), 2),
            order(10, "2024-03-09T18:00:00", "Vybavená", json!(10), 1),
        ]
    }

    #[test]
    fn test_excludes_fixed_status_set() {
        let exclusion = StatusExclusion::default();
        let stats = OrderStatistics::compute(&ten_orders(), march(), &exclusion);

        assert_eq!(stats.total_orders, 10);
        assert_eq!(stats.valid_orders, 7);
        assert_eq!(stats.excluded_orders(), 3);
        assert_eq!(stats.status_breakdown.get("Storno"), None);
        assert_eq!(stats.status_breakdown.get("Vybavená"), Some(&4));
    }

    #[test]
    fn test_sums_revenue_items_and_days() {
        let stats = OrderStatistics::compute(&ten_orders(), march(), &StatusExclusion::default());

        // 10 + 20.5 + 5 + 4.5 + 0 + 10 + 10
        assert_eq!(round2(stats.total_revenue), 60.0);
        assert_eq!(stats.total_items, 8);
        assert_eq!(stats.average_order_value(), 8.57);
        assert_eq!(stats.daily.get("2024-03-01").unwrap().orders, 1);
        assert_eq!(stats.daily.get("2024-03-02").unwrap().revenue, 20.5);
    }

    #[test]
    fn test_excludes_by_stable_id() {
        let exclusion = StatusExclusion::new(["1"], Vec::<String>::new());
        // order 1 and 8 have status id "1"
        let stats = OrderStatistics::compute(&ten_orders(), march(), &exclusion);
        assert_eq!(stats.valid_orders, 8);
    }

    #[test]
    fn test_configured_ids_replace_labels() {
        let exclusion = StatusExclusion::new(
            ["2"],
            DEFAULT_EXCLUDED_STATUS_LABELS.iter().map(|s| s.to_string()),
        );
        // ids "2": orders 2 (Storno) and 9 (Vybavená); labels no longer
        // exclude orders 4 and 7
        let stats = OrderStatistics::compute(&ten_orders(), march(), &exclusion);
        assert_eq!(stats.valid_orders, 8);
        assert_eq!(stats.status_breakdown.get("Čaká na úhradu"), Some(&1));
        assert_eq!(stats.status_breakdown.get("Vybavená"), Some(&3));

        // an order without a status id still falls back to its label
        assert!(exclusion.is_excluded(&json!({"status": "Storno"})));
        assert!(!exclusion.is_excluded(&json!({"status": "Storno", "status_id": 5})));
    }

    #[test]
    fn test_accepts_flattened_status() {
        let exclusion = StatusExclusion::default();
        assert!(exclusion.is_excluded(&json!({"status": "Storno", "status_id": "9"})));
        assert!(!exclusion.is_excluded(&json!({"status": "Nová"})));
        assert!(!exclusion.is_excluded(&json!({})));
    }

    #[test]
    fn test_ignores_orders_outside_range_or_undated() {
        let mut orders = ten_orders();
        orders.push(order(11, "2024-04-01T00:00:00", "Nová", json!(100), 1));
        orders.push(json!({"order_num": "broken", "pur_date": "yesterday"}));

        let stats = OrderStatistics::compute(&orders, march(), &StatusExclusion::default());
        assert_eq!(stats.total_orders, 10);
    }

    #[test]
    fn test_json_report_shape() {
        let exclusion = StatusExclusion::default();
        let stats = OrderStatistics::compute(&ten_orders(), march(), &exclusion);
        let report = stats.to_json(march(), &exclusion);

        assert_eq!(report["period"]["from"], "2024-03-01");
        assert_eq!(report["summary"]["valid_orders"], 7);
        assert_eq!(report["summary"]["excluded_orders"], 3);
        assert_eq!(report["summary"]["total_revenue"], 60.0);
        assert_eq!(report["excluded_statuses"].as_array().unwrap().len(), 5);
        assert_eq!(report["daily_stats"]["2024-03-02"]["items"], 2);
    }

    #[test]
    fn test_empty_input() {
        let stats = OrderStatistics::compute(&[], march(), &StatusExclusion::default());
        assert_eq!(stats.valid_orders, 0);
        assert_eq!(stats.average_order_value(), 0.0);
    }
}
