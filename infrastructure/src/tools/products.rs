//! Product tools: list_products, get_product

use biznisweb_domain::tool::entities::{ToolDefinition, ToolParameter};

use super::{lang_code_parameter, limit_parameter};

/// Tool name constants
pub const LIST_PRODUCTS: &str = "list_products";
pub const GET_PRODUCT: &str = "get_product";

const DEFAULT_PRODUCT_LIMIT: i64 = 30;

pub const PRODUCT_LIST_QUERY: &str = r#"query GetProducts($lang_code: String, $params: ProductParams) {
  getProductList(lang_code: $lang_code, params: $params) {
    data {
      id
      title
      import_code
      ean
      active
      price {
        value
        formatted
      }
      warehouse_status {
        id
        name
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

pub const PRODUCT_DETAIL_QUERY: &str = r#"query GetProduct($product_id: ID!, $lang_code: String) {
  getProduct(id: $product_id, lang_code: $lang_code) {
    id
    title
    import_code
    ean
    active
    short_description
    description
    url
    price {
      value
      formatted
      currency {
        code
      }
    }
    warehouse_status {
      id
      name
    }
    warehouse_items {
      warehouse_number
      quantity
    }
    categories {
      id
      name
    }
    last_change
  }
}"#;

fn with_product_renames(definition: ToolDefinition) -> ToolDefinition {
    definition.with_rename("warehouse_status.id", "warehouse_status_id")
}

/// Get the tool definition for list_products
pub fn list_products_definition(lang_code: &str) -> ToolDefinition {
    with_product_renames(
        ToolDefinition::new(
            LIST_PRODUCTS,
            "List products with price and stock status",
            "getProductList",
            PRODUCT_LIST_QUERY,
        )
        .with_parameter(limit_parameter("Maximum number of products to return", DEFAULT_PRODUCT_LIMIT))
        .with_parameter(lang_code_parameter(lang_code)),
    )
}

/// Get the tool definition for get_product
pub fn get_product_definition(lang_code: &str) -> ToolDefinition {
    with_product_renames(
        ToolDefinition::new(
            GET_PRODUCT,
            "Get full details of one product: descriptions, price, stock and categories",
            "getProduct",
            PRODUCT_DETAIL_QUERY,
        )
        .with_parameter(ToolParameter::new("product_id", "Product id", true).maps_to("product_id"))
        .with_parameter(lang_code_parameter(lang_code))
        .single(),
    )
}
