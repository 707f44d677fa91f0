//! Reference data tools: order statuses, payment methods, delivery methods,
//! currencies and warehouse statuses.

use biznisweb_domain::tool::entities::ToolDefinition;

use super::lang_code_parameter;

/// Tool name constants
pub const LIST_ORDER_STATUSES: &str = "list_order_statuses";
pub const LIST_PAYMENT_METHODS: &str = "list_payment_methods";
pub const LIST_DELIVERY_METHODS: &str = "list_delivery_methods";
pub const LIST_CURRENCIES: &str = "list_currencies";
pub const LIST_WAREHOUSE_STATUSES: &str = "list_warehouse_statuses";

pub const ORDER_STATUSES_QUERY: &str = r#"query ListOrderStatuses($lang_code: String) {
  listOrderStatuses(lang_code: $lang_code) {
    id
    name
    color
  }
}"#;

pub const PAYMENT_METHODS_QUERY: &str = r#"query ListPaymentMethods($lang_code: String) {
  listPaymentMethods(lang_code: $lang_code) {
    id
    name
  }
}"#;

pub const DELIVERY_METHODS_QUERY: &str = r#"query ListDeliveryMethods($lang_code: String) {
  listDeliveryMethods(lang_code: $lang_code) {
    id
    name
  }
}"#;

pub const CURRENCIES_QUERY: &str = r#"query ListCurrencies {
  listCurrencies {
    id
    code
    symbol
  }
}"#;

pub const WAREHOUSE_STATUSES_QUERY: &str = r#"query ListWarehouseStatuses($lang_code: String) {
  listWarehouseStatuses(lang_code: $lang_code) {
    id
    name
  }
}"#;

pub fn list_order_statuses_definition(lang_code: &str) -> ToolDefinition {
    ToolDefinition::new(
        LIST_ORDER_STATUSES,
        "List order statuses with their ids",
        "listOrderStatuses",
        ORDER_STATUSES_QUERY,
    )
    .with_parameter(lang_code_parameter(lang_code))
}

pub fn list_payment_methods_definition(lang_code: &str) -> ToolDefinition {
    ToolDefinition::new(
        LIST_PAYMENT_METHODS,
        "List available payment methods",
        "listPaymentMethods",
        PAYMENT_METHODS_QUERY,
    )
    .with_parameter(lang_code_parameter(lang_code))
}

pub fn list_delivery_methods_definition(lang_code: &str) -> ToolDefinition {
    ToolDefinition::new(
        LIST_DELIVERY_METHODS,
        "List available delivery methods",
        "listDeliveryMethods",
        DELIVERY_METHODS_QUERY,
    )
    .with_parameter(lang_code_parameter(lang_code))
}

pub fn list_currencies_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_CURRENCIES,
        "List currencies configured in the shop",
        "listCurrencies",
        CURRENCIES_QUERY,
    )
}

pub fn list_warehouse_statuses_definition(lang_code: &str) -> ToolDefinition {
    ToolDefinition::new(
        LIST_WAREHOUSE_STATUSES,
        "List warehouse (stock availability) statuses",
        "listWarehouseStatuses",
        WAREHOUSE_STATUSES_QUERY,
    )
    .with_parameter(lang_code_parameter(lang_code))
}
