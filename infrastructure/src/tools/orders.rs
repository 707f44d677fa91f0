//! Order tools: list_orders, get_order, search_orders, order_statistics

use biznisweb_domain::tool::entities::{
    DateCutoff, Pagination, ParamType, PostProcess, ToolDefinition, ToolParameter,
};

use super::limit_parameter;

/// Tool name constants
pub const LIST_ORDERS: &str = "list_orders";
pub const GET_ORDER: &str = "get_order";
pub const SEARCH_ORDERS: &str = "search_orders";
pub const ORDER_STATISTICS: &str = "order_statistics";

/// Page size accepted by `getOrderList`
const ORDER_PAGE_SIZE: i64 = 30;
/// Orders scanned by `search_orders`
const SEARCH_SCAN_SIZE: i64 = 100;
const SEARCH_MAX_RESULTS: usize = 20;
/// Safety cap on orders fetched for statistics
const STATISTICS_MAX_ORDERS: usize = 10_000;
const STATISTICS_LOOKBACK_DAYS: i64 = 30;

pub const ORDER_LIST_QUERY: &str = r#"query GetOrders($status: Int, $newer_from: DateTime, $changed_from: DateTime, $params: OrderParams) {
  getOrderList(status: $status, newer_from: $newer_from, changed_from: $changed_from, params: $params) {
    data {
      id
      order_num
      pur_date
      status {
        id
        name
      }
      customer {
        ... on Company {
          company_name
          email
        }
        ... on Person {
          name
          surname
          email
        }
        ... on UnauthenticatedEmail {
          email
        }
      }
      sum {
        value
        currency {
          code
        }
      }
      items {
        item_label
        quantity
        price {
          value
        }
      }
    }
    pageInfo {
      hasNextPage
      nextCursor
      totalPages
    }
  }
}"#;

pub const ORDER_DETAIL_QUERY: &str = r#"query GetOrder($order_num: String!) {
  getOrder(order_num: $order_num) {
    id
    order_num
    external_ref
    pur_date
    var_symb
    last_change
    status {
      id
      name
    }
    customer {
      ... on Company {
        company_name
        company_id
        vat_id
        email
        phone
      }
      ... on Person {
        name
        surname
        email
        phone
      }
      ... on UnauthenticatedEmail {
        email
      }
    }
    invoice_address {
      street
      city
      zip
      country
    }
    delivery_address {
      street
      city
      zip
      country
    }
    items {
      item_label
      ean
      quantity
      tax_rate
      price {
        value
        formatted
      }
    }
    sum {
      value
      formatted
      currency {
        code
        symbol
      }
    }
  }
}"#;

/// Newest purchase first.
fn sorted_by_purchase_date(definition: ToolDefinition) -> ToolDefinition {
    definition
        .with_fixed("params.order_by", "pur_date")
        .with_fixed("params.sort", "DESC")
}

fn with_status_renames(definition: ToolDefinition) -> ToolDefinition {
    definition
        .with_rename("status.id", "status_id")
        .with_rename("status.name", "status")
}

/// Get the tool definition for list_orders
pub fn list_orders_definition() -> ToolDefinition {
    let definition = ToolDefinition::new(
        LIST_ORDERS,
        "List orders, newest first, optionally filtered by purchase date, change date or status",
        "getOrderList",
        ORDER_LIST_QUERY,
    )
    .with_parameter(
        ToolParameter::new("from_date", "Only orders purchased on or after this date (YYYY-MM-DD)", false)
            .with_type(ParamType::Date)
            .maps_to("newer_from"),
    )
    .with_parameter(
        ToolParameter::new("to_date", "Only orders purchased on or before this date (YYYY-MM-DD)", false)
            .with_type(ParamType::Date),
    )
    .with_parameter(
        ToolParameter::new("changed_from", "Only orders changed on or after this date (YYYY-MM-DD)", false)
            .with_type(ParamType::Date)
            .maps_to("changed_from"),
    )
    .with_parameter(
        ToolParameter::new("status", "Order status id (see list_order_statuses)", false)
            .with_type(ParamType::Integer)
            .maps_to("status"),
    )
    .with_parameter(limit_parameter("Maximum number of orders to return", ORDER_PAGE_SIZE))
    .with_post_process(PostProcess::PurchasedUntil {
        parameter: "to_date".to_string(),
    });

    with_status_renames(sorted_by_purchase_date(definition))
}

/// Get the tool definition for get_order
pub fn get_order_definition() -> ToolDefinition {
    let definition = ToolDefinition::new(
        GET_ORDER,
        "Get full details of one order: customer, addresses, items and totals",
        "getOrder",
        ORDER_DETAIL_QUERY,
    )
    .with_parameter(ToolParameter::new("order_num", "Order number", true).maps_to("order_num"))
    .single();

    with_status_renames(definition)
}

/// Get the tool definition for search_orders
///
/// The API has no text search; the newest orders are fetched and matched
/// locally on order number, customer name and email.
pub fn search_orders_definition() -> ToolDefinition {
    sorted_by_purchase_date(ToolDefinition::new(
        SEARCH_ORDERS,
        "Search recent orders by order number, customer name or email",
        "getOrderList",
        ORDER_LIST_QUERY,
    ))
    .with_parameter(ToolParameter::new(
        "query",
        "Search text (order number, customer name or email)",
        true,
    ))
    .with_fixed("params.limit", SEARCH_SCAN_SIZE)
    .with_post_process(PostProcess::SearchOrders {
        query_parameter: "query".to_string(),
        max_results: SEARCH_MAX_RESULTS,
    })
}

/// Get the tool definition for order_statistics
pub fn order_statistics_definition() -> ToolDefinition {
    sorted_by_purchase_date(ToolDefinition::new(
        ORDER_STATISTICS,
        "Order statistics for a date range: revenue, item counts, status breakdown and daily figures. Cancelled and unpaid orders are excluded.",
        "getOrderList",
        ORDER_LIST_QUERY,
    ))
    .with_parameter(
        ToolParameter::new("from_date", "Start date (YYYY-MM-DD), defaults to 30 days ago", false)
            .with_type(ParamType::Date)
            .with_lookback_days(STATISTICS_LOOKBACK_DAYS)
            .maps_to("newer_from"),
    )
    .with_parameter(
        ToolParameter::new("to_date", "End date (YYYY-MM-DD), defaults to today", false)
            .with_type(ParamType::Date)
            .with_today_default(),
    )
    .with_fixed("params.limit", ORDER_PAGE_SIZE)
    .with_pagination(Pagination {
        cursor_variable: "params.cursor".to_string(),
        max_records: STATISTICS_MAX_ORDERS,
        stop_before: Some(DateCutoff {
            field: "pur_date".to_string(),
            parameter: "from_date".to_string(),
        }),
    })
    .with_post_process(PostProcess::OrderStatistics {
        from_parameter: "from_date".to_string(),
        to_parameter: "to_date".to_string(),
    })
}
