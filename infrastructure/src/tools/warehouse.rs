//! Warehouse tools: list_warehouse_items, get_warehouse_item

use biznisweb_domain::tool::entities::{ParamType, ToolDefinition, ToolParameter};

use super::limit_parameter;

/// Tool name constants
pub const LIST_WAREHOUSE_ITEMS: &str = "list_warehouse_items";
pub const GET_WAREHOUSE_ITEM: &str = "get_warehouse_item";

const DEFAULT_ITEM_LIMIT: i64 = 30;
/// `changed_from` is mandatory upstream; omitted means the last 30 days.
const CHANGE_LOOKBACK_DAYS: i64 = 30;

pub const WAREHOUSE_ITEMS_QUERY: &str = r#"query GetWarehouseItems($changed_from: DateTime!, $params: WarehouseItemParams) {
  getWarehouseItemsWithRecentStockUpdates(changed_from: $changed_from, params: $params) {
    data {
      id
      warehouse_number
      ean
      quantity
      status {
        id
        name
      }
      product {
        id
        title
      }
      last_change
    }
    pageInfo {
      hasNextPage
      nextCursor
      totalPages
    }
  }
}"#;

pub const WAREHOUSE_ITEM_QUERY: &str = r#"query GetWarehouseItem($warehouse_number: String!) {
  getWarehouseItem(warehouse_number: $warehouse_number) {
    id
    warehouse_number
    ean
    quantity
    weight
    status {
      id
      name
    }
    product {
      id
      title
    }
    last_change
  }
}"#;

fn with_item_renames(definition: ToolDefinition) -> ToolDefinition {
    definition.with_rename("status.id", "status_id")
}

/// Get the tool definition for list_warehouse_items
pub fn list_warehouse_items_definition() -> ToolDefinition {
    with_item_renames(
        ToolDefinition::new(
            LIST_WAREHOUSE_ITEMS,
            "List warehouse items whose stock changed since a date",
            "getWarehouseItemsWithRecentStockUpdates",
            WAREHOUSE_ITEMS_QUERY,
        )
        .with_parameter(
            ToolParameter::new(
                "changed_from",
                "Stock changed on or after this date (YYYY-MM-DD), defaults to 30 days ago",
                true,
            )
            .with_type(ParamType::Date)
            .with_lookback_days(CHANGE_LOOKBACK_DAYS)
            .maps_to("changed_from"),
        )
        .with_parameter(limit_parameter("Maximum number of items to return", DEFAULT_ITEM_LIMIT)),
    )
}

/// Get the tool definition for get_warehouse_item
pub fn get_warehouse_item_definition() -> ToolDefinition {
    with_item_renames(
        ToolDefinition::new(
            GET_WAREHOUSE_ITEM,
            "Get one warehouse item by its warehouse number",
            "getWarehouseItem",
            WAREHOUSE_ITEM_QUERY,
        )
        .with_parameter(
            ToolParameter::new("warehouse_number", "Warehouse number", true).maps_to("warehouse_number"),
        )
        .single(),
    )
}
