//! Company tools: list_companies

use biznisweb_domain::tool::entities::{PostProcess, ToolDefinition, ToolParameter};

use super::limit_parameter;

pub const LIST_COMPANIES: &str = "list_companies";

const DEFAULT_COMPANY_LIMIT: i64 = 100;

pub const COMPANY_LIST_QUERY: &str = r#"query GetCompanies($params: CompanyParams) {
  getCompanyList(params: $params) {
    data {
      id
      company_name
      company_id
      vat_id
      email
      phone
    }
    pageInfo {
      hasNextPage
      nextCursor
      totalPages
    }
  }
}"#;

/// Get the tool definition for list_companies
///
/// `name` never reaches the API: it filters the fetched page locally,
/// case-insensitively on `company_name`.
pub fn list_companies_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_COMPANIES,
        "List customer companies, optionally filtered by name",
        "getCompanyList",
        COMPANY_LIST_QUERY,
    )
    .with_parameter(ToolParameter::new(
        "name",
        "Case-insensitive substring of the company name",
        false,
    ))
    .with_parameter(limit_parameter("Maximum number of companies to fetch", DEFAULT_COMPANY_LIMIT))
    .with_post_process(PostProcess::FilterByName {
        parameter: "name".to_string(),
        field: "company_name".to_string(),
    })
}
