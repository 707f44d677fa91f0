//! Invoice tools: list_invoices, get_invoice

use biznisweb_domain::tool::entities::{ParamType, ToolDefinition, ToolParameter};

use super::limit_parameter;

/// Tool name constants
pub const LIST_INVOICES: &str = "list_invoices";
pub const GET_INVOICE: &str = "get_invoice";

const DEFAULT_INVOICE_LIMIT: i64 = 30;

pub const INVOICE_LIST_QUERY: &str = r#"query GetInvoices($newer_from: DateTime, $params: InvoiceParams) {
  getInvoiceList(newer_from: $newer_from, params: $params) {
    data {
      id
      invoice_num
      order_num
      issue_date
      due_date
      var_symb
      sum {
        value
        formatted
        currency {
          code
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

pub const INVOICE_DETAIL_QUERY: &str = r#"query GetInvoice($invoice_num: String!) {
  getInvoice(invoice_num: $invoice_num) {
    id
    invoice_num
    order_num
    issue_date
    due_date
    tax_date
    var_symb
    customer {
      ... on Company {
        company_name
        company_id
        vat_id
        email
      }
      ... on Person {
        name
        surname
        email
      }
    }
    invoice_address {
      street
      city
      zip
      country
    }
    items {
      item_label
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

/// Get the tool definition for list_invoices
pub fn list_invoices_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_INVOICES,
        "List invoices, optionally only those issued on or after a date",
        "getInvoiceList",
        INVOICE_LIST_QUERY,
    )
    .with_parameter(
        ToolParameter::new("from_date", "Only invoices from this date on (YYYY-MM-DD)", false)
            .with_type(ParamType::Date)
            .maps_to("newer_from"),
    )
    .with_parameter(limit_parameter("Maximum number of invoices to return", DEFAULT_INVOICE_LIMIT))
}

/// Get the tool definition for get_invoice
pub fn get_invoice_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_INVOICE,
        "Get full details of one invoice by its number",
        "getInvoice",
        INVOICE_DETAIL_QUERY,
    )
    .with_parameter(ToolParameter::new("invoice_num", "Invoice number", true).maps_to("invoice_num"))
    .single()
}
