//! Order record helpers and client-side order search.

use serde_json::{Value, json};

use super::records;

/// Display name of an order's customer.
///
/// Companies carry `company_name`; persons carry `name` and `surname`;
/// unauthenticated customers only an email.
pub fn customer_name(order: &Value) -> String {
    let Some(customer) = order.get("customer") else {
        return String::new();
    };

    if let Some(company) = customer
        .get("company_name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    {
        return company.to_string();
    }

    let name = customer.get("name").and_then(Value::as_str).unwrap_or("");
    let surname = customer.get("surname").and_then(Value::as_str).unwrap_or("");
    format!("{} {}", name, surname).trim().to_string()
}

fn customer_email(order: &Value) -> &str {
    order
        .get("customer")
        .and_then(|c| c.get("email"))
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// Whether `order` matches a lowercased query on number, customer or email.
pub fn matches_query(order: &Value, query: &str) -> bool {
    let order_num = order.get("order_num").and_then(Value::as_str).unwrap_or("");
    order_num.to_lowercase().contains(query)
        || customer_name(order).to_lowercase().contains(query)
        || customer_email(order).to_lowercase().contains(query)
}

/// Filter a list of orders by `query` and keep at most `max_results`.
///
/// Returns `{ query, count, results }`; matched orders are passed through
/// untouched.
pub fn search_orders(result: &Value, query: &str, max_results: usize) -> Value {
    let needle = query.trim().to_lowercase();
    let results: Vec<Value> = records(result)
        .map(|orders| {
            orders
                .iter()
                .filter(|order| matches_query(order, &needle))
                .take(max_results)
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    json!({
        "query": query,
        "count": results.len(),
        "results": results,
    })
}
