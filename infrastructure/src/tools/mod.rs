//! The BizniWeb tool catalog
//!
//! Each tool is a [`ToolDefinition`]: a GraphQL document plus the table that
//! maps caller parameters onto its variables. Nothing here executes
//! anything; [`InvokeToolUseCase`](biznisweb_application::InvokeToolUseCase)
//! interprets the definitions.
//!
//! | Tool | Operation |
//! |------|-----------|
//! | `list_orders`, `search_orders`, `order_statistics` | `getOrderList` |
//! | `get_order` | `getOrder` |
//! | `list_products` / `get_product` | `getProductList` / `getProduct` |
//! | `list_warehouse_items` | `getWarehouseItemsWithRecentStockUpdates` |
//! | `get_warehouse_item` | `getWarehouseItem` |
//! | `list_invoices` / `get_invoice` | `getInvoiceList` / `getInvoice` |
//! | `list_companies` | `getCompanyList` |
//! | `list_order_statuses`, `list_payment_methods`, `list_delivery_methods`, `list_currencies`, `list_warehouse_statuses` | `list*` |
//!
//! Variable names and types must match the upstream schema exactly. A
//! mismatch is a defect in this table, caught by the tests below rather
//! than handled at runtime.

pub mod companies;
pub mod invoices;
pub mod orders;
pub mod products;
pub mod reference;
pub mod warehouse;

mod schema;

pub use schema::JsonSchemaToolConverter;

use biznisweb_domain::tool::entities::{ParamType, ToolParameter, ToolSpec};

/// `limit` parameter mapped to `params.limit`.
pub(crate) fn limit_parameter(description: &str, default: i64) -> ToolParameter {
    ToolParameter::new("limit", description, false)
        .with_type(ParamType::Integer)
        .with_default(default)
        .maps_to("params.limit")
}

/// `lang_code` parameter defaulting to the configured language.
pub(crate) fn lang_code_parameter(lang_code: &str) -> ToolParameter {
    ToolParameter::new("lang_code", "Language code for localized names", false)
        .with_default(lang_code)
        .maps_to("lang_code")
}

/// Create the tool specification with every BizniWeb tool
pub fn biznisweb_tool_spec(lang_code: &str) -> ToolSpec {
    ToolSpec::new()
        .register(orders::list_orders_definition())
        .register(orders::get_order_definition())
        .register(orders::search_orders_definition())
        .register(orders::order_statistics_definition())
        .register(products::list_products_definition(lang_code))
        .register(products::get_product_definition(lang_code))
        .register(warehouse::list_warehouse_items_definition())
        .register(warehouse::get_warehouse_item_definition())
        .register(invoices::list_invoices_definition())
        .register(invoices::get_invoice_definition())
        .register(companies::list_companies_definition())
        .register(reference::list_order_statuses_definition(lang_code))
        .register(reference::list_payment_methods_definition(lang_code))
        .register(reference::list_delivery_methods_definition(lang_code))
        .register(reference::list_currencies_definition())
        .register(reference::list_warehouse_statuses_definition(lang_code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::{API_KEY_HEADER, HttpGraphQlGateway};
    use biznisweb_application::{
        AdapterConfig, FixedClock, InvokeToolUseCase, ToolExecutorPort,
    };
    use biznisweb_domain::{ResultShape, StatusExclusion, ToolCall, ToolError};
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    /// Minimal arguments for each tool: its required parameters without a default.
    fn required_args(tool: &str) -> ToolCall {
        let call = ToolCall::new(tool);
        match tool {
            "get_order" => call.with_arg("order_num", "2024001"),
            "search_orders" => call.with_arg("query", "novak"),
            "get_product" => call.with_arg("product_id", "42"),
            "get_warehouse_item" => call.with_arg("warehouse_number", "WH-1"),
            "get_invoice" => call.with_arg("invoice_num", "FV2024001"),
            _ => call,
        }
    }

    fn use_case(gateway: HttpGraphQlGateway) -> InvokeToolUseCase {
        InvokeToolUseCase::new(
            Arc::new(biznisweb_tool_spec("sk")),
            Arc::new(gateway),
            Arc::new(FixedClock(today())),
            AdapterConfig::default().with_status_exclusion(StatusExclusion::default()),
        )
    }

    #[test]
    fn test_catalog_is_complete() {
        let spec = biznisweb_tool_spec("sk");
        let names: Vec<&str> = spec.sorted().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "get_invoice",
                "get_order",
                "get_product",
                "get_warehouse_item",
                "list_companies",
                "list_currencies",
                "list_delivery_methods",
                "list_invoices",
                "list_order_statuses",
                "list_orders",
                "list_payment_methods",
                "list_products",
                "list_warehouse_items",
                "list_warehouse_statuses",
                "order_statistics",
                "search_orders",
            ]
        );
    }

    #[test]
    fn test_every_variable_is_declared_in_its_document() {
        let spec = biznisweb_tool_spec("sk");
        for tool in spec.all() {
            let top_level = tool
                .parameters
                .iter()
                .filter_map(|p| p.variable.as_deref())
                .chain(tool.fixed_variables.iter().map(|(path, _)| path.as_str()))
                .map(|path| path.split('.').next().unwrap_or(path));

            for variable in top_level {
                assert!(
                    tool.document.contains(&format!("${}:", variable)),
                    "{}: ${} not declared",
                    tool.name,
                    variable
                );
            }
            assert!(
                tool.document.contains(&format!("{}(", tool.operation))
                    || tool.document.contains(&format!("{} {{", tool.operation)),
                "{}: document does not select {}",
                tool.name,
                tool.operation
            );
        }
    }

    #[test]
    fn test_single_entity_tools() {
        let spec = biznisweb_tool_spec("sk");
        let mut single: Vec<&str> = spec
            .all()
            .filter(|t| t.shape == ResultShape::Single)
            .map(|t| t.name.as_str())
            .collect();
        single.sort();
        assert_eq!(single, vec!["get_invoice", "get_order", "get_product", "get_warehouse_item"]);
    }

    #[test]
    fn test_request_variables_per_tool() {
        let uc = use_case(
            HttpGraphQlGateway::new("http://unused", "t", Duration::from_secs(1)).unwrap(),
        );
        let variables = |tool: &str| {
            Value::Object(uc.prepare(&required_args(tool)).unwrap().request.variables)
        };

        assert_eq!(
            variables("list_orders"),
            json!({"params": {"limit": 30, "order_by": "pur_date", "sort": "DESC"}})
        );
        assert_eq!(variables("get_order"), json!({"order_num": "2024001"}));
        assert_eq!(
            variables("search_orders"),
            json!({"params": {"limit": 100, "order_by": "pur_date", "sort": "DESC"}})
        );
        assert_eq!(
            variables("order_statistics"),
            json!({
                "newer_from": "2024-03-01T00:00:00",
                "params": {"limit": 30, "order_by": "pur_date", "sort": "DESC"}
            })
        );
        assert_eq!(
            variables("list_products"),
            json!({"lang_code": "sk", "params": {"limit": 30}})
        );
        assert_eq!(
            variables("get_product"),
            json!({"product_id": "42", "lang_code": "sk"})
        );
        assert_eq!(
            variables("list_warehouse_items"),
            json!({"changed_from": "2024-03-01T00:00:00", "params": {"limit": 30}})
        );
        assert_eq!(variables("get_warehouse_item"), json!({"warehouse_number": "WH-1"}));
        assert_eq!(variables("list_invoices"), json!({"params": {"limit": 30}}));
        assert_eq!(variables("get_invoice"), json!({"invoice_num": "FV2024001"}));
        assert_eq!(variables("list_companies"), json!({"params": {"limit": 100}}));
        assert_eq!(variables("list_order_statuses"), json!({"lang_code": "sk"}));
        assert_eq!(variables("list_payment_methods"), json!({"lang_code": "sk"}));
        assert_eq!(variables("list_delivery_methods"), json!({"lang_code": "sk"}));
        assert_eq!(variables("list_currencies"), json!({}));
        assert_eq!(variables("list_warehouse_statuses"), json!({"lang_code": "sk"}));
    }

    #[test]
    fn test_supplied_arguments_override_defaults() {
        let uc = use_case(
            HttpGraphQlGateway::new("http://unused", "t", Duration::from_secs(1)).unwrap(),
        );
        let call = ToolCall::new("list_orders")
            .with_arg("from_date", "2024-01-01")
            .with_arg("status", 3)
            .with_arg("limit", 5);

        let request = uc.prepare(&call).unwrap().request;
        assert_eq!(request.variable("newer_from"), Some(&json!("2024-01-01T00:00:00")));
        assert_eq!(request.variable("status"), Some(&json!(3)));
        assert_eq!(request.variable("params.limit"), Some(&json!(5)));
        assert_eq!(request.operation_name.as_deref(), Some("GetOrders"));
    }

    /// One envelope that answers every operation in the catalog.
    fn universal_envelope() -> Value {
        let page = json!({"data": [], "pageInfo": {"hasNextPage": false, "nextCursor": null}});
        json!({"data": {
            "getOrderList": page,
            "getOrder": {"order_num": "2024001", "status": {"id": 4, "name": "Vybavená"}},
            "getProductList": page,
            "getProduct": {"id": "42", "warehouse_status": {"id": 1, "name": "Skladom"}},
            "getWarehouseItemsWithRecentStockUpdates": page,
            "getWarehouseItem": {"warehouse_number": "WH-1", "status": {"id": 2}},
            "getInvoiceList": page,
            "getInvoice": {"invoice_num": "FV2024001"},
            "getCompanyList": {"data": [
                {"company_name": "Vevo s.r.o."},
                {"company_name": "ACME Trading"}
            ]},
            "listOrderStatuses": [{"id": 1, "name": "Nová"}],
            "listPaymentMethods": [],
            "listDeliveryMethods": [],
            "listCurrencies": [{"code": "EUR"}],
            "listWarehouseStatuses": []
        }})
    }

    #[tokio::test]
    async fn test_every_tool_against_stub_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header(API_KEY_HEADER, "Token t"))
            .respond_with(ResponseTemplate::new(200).set_body_json(universal_envelope()))
            .mount(&server)
            .await;

        let uc = use_case(HttpGraphQlGateway::new(server.uri(), "t", Duration::from_secs(5)).unwrap());
        let spec = biznisweb_tool_spec("sk");

        for tool in spec.sorted() {
            let result = uc.execute(&required_args(&tool.name)).await;
            assert!(result.is_success(), "{} failed: {}", tool.name, result.to_text());
            assert_eq!(result.metadata.upstream_requests, Some(1), "{}", tool.name);
        }

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), spec.len());
    }

    #[tokio::test]
    async fn test_renamed_fields_through_stub_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(universal_envelope()))
            .mount(&server)
            .await;
        let uc = use_case(HttpGraphQlGateway::new(server.uri(), "t", Duration::from_secs(5)).unwrap());

        let (order, _) = uc.invoke(&required_args("get_order")).await.unwrap();
        assert_eq!(order, json!({"order_num": "2024001", "status_id": 4, "status": "Vybavená"}));

        let (product, _) = uc.invoke(&required_args("get_product")).await.unwrap();
        assert_eq!(product["warehouse_status_id"], 1);
        assert_eq!(product["warehouse_status"], json!({"name": "Skladom"}));

        let (item, _) = uc.invoke(&required_args("get_warehouse_item")).await.unwrap();
        assert_eq!(item, json!({"warehouse_number": "WH-1", "status_id": 2}));
    }

    #[tokio::test]
    async fn test_repeated_calls_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(universal_envelope()))
            .expect(2)
            .mount(&server)
            .await;
        let uc = use_case(HttpGraphQlGateway::new(server.uri(), "t", Duration::from_secs(5)).unwrap());

        let call = ToolCall::new("list_companies").with_arg("name", "VEVO");
        let first = uc.execute(&call).await;
        let second = uc.execute(&call).await;

        assert_eq!(first.output(), second.output());
        assert_eq!(
            first.output().unwrap()["data"],
            json!([{"company_name": "Vevo s.r.o."}])
        );
    }

    #[tokio::test]
    async fn test_missing_parameter_never_reaches_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(universal_envelope()))
            .expect(0)
            .mount(&server)
            .await;
        let uc = use_case(HttpGraphQlGateway::new(server.uri(), "t", Duration::from_secs(5)).unwrap());

        for tool in ["get_order", "search_orders", "get_product", "get_warehouse_item", "get_invoice"] {
            let result = uc.execute(&ToolCall::new(tool)).await;
            assert_eq!(result.error().unwrap().code, ToolError::INVALID_ARGUMENT, "{}", tool);
        }
    }

    #[tokio::test]
    async fn test_list_orders_to_date_filters_client_side() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {
                "getOrderList": {
                    "data": [
                        {"order_num": "3", "pur_date": "2024-03-20T09:00:00", "status": {"id": 1, "name": "Nová"}},
                        {"order_num": "2", "pur_date": "2024-03-10T18:30:00", "status": {"id": 1, "name": "Nová"}},
                        {"order_num": "1", "pur_date": "2024-03-02 07:15:00", "status": {"id": 4, "name": "Vybavená"}}
                    ],
                    "pageInfo": {"hasNextPage": false, "nextCursor": null}
                }
            }})))
            .expect(1)
            .mount(&server)
            .await;
        let uc = use_case(HttpGraphQlGateway::new(server.uri(), "t", Duration::from_secs(5)).unwrap());

        let call = ToolCall::new("list_orders")
            .with_arg("from_date", "2024-03-01")
            .with_arg("to_date", "2024-03-10");
        let (output, requests) = uc.invoke(&call).await.unwrap();

        assert_eq!(requests, 1);
        let nums: Vec<&str> = output["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["order_num"].as_str().unwrap())
            .collect();
        assert_eq!(nums, vec!["2", "1"]);
        assert_eq!(output["data"][0]["status"], "Nová");

        let received = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&received[0].body).unwrap();
        assert!(body["variables"].get("to_date").is_none());
    }

    #[tokio::test]
    async fn test_inverted_statistics_range_never_reaches_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(universal_envelope()))
            .expect(0)
            .mount(&server)
            .await;
        let uc = use_case(HttpGraphQlGateway::new(server.uri(), "t", Duration::from_secs(5)).unwrap());

        let result = uc
            .execute(
                &ToolCall::new("order_statistics")
                    .with_arg("from_date", "2024-03-20")
                    .with_arg("to_date", "2024-03-01"),
            )
            .await;

        assert_eq!(result.error().unwrap().code, ToolError::INVALID_ARGUMENT);
        assert_eq!(result.metadata.upstream_requests, Some(0));
    }
}
