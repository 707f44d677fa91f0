//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the tool
//! descriptors advertised by MCP `tools/list`.

use biznisweb_application::ports::tool_schema::ToolSchemaPort;
use biznisweb_domain::tool::entities::{ParamDefault, ParamType, ToolDefinition, ToolSpec};
use serde_json::{Map, Value, json};

/// Default implementation producing MCP tool descriptors.
///
/// Handles param_type → JSON Schema mapping:
/// - `string` → `"string"`
/// - `date` → `"string"` with `"format": "date"`
/// - `integer`, `number`, `boolean` → themselves
///
/// Literal defaults are advertised; date defaults relative to today are
/// only described.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(param.param_type.json_schema_type()));
            if param.param_type == ParamType::Date {
                prop.insert("format".to_string(), json!("date"));
            }
            prop.insert("description".to_string(), json!(param.description));
            if let Some(ParamDefault::Value(default)) = &param.default {
                prop.insert("default".to_string(), default.clone());
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            // a defaulted parameter never has to be supplied
            if param.required && param.default.is_none() {
                required.push(json!(param.name));
            }
        }

        json!({
            "name": tool.name,
            "description": tool.description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<Value> {
        spec.sorted()
            .into_iter()
            .map(|t| self.tool_to_schema(t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::biznisweb_tool_spec;
    use biznisweb_domain::tool::entities::ToolParameter;

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("list_orders", "List orders", "getOrderList", "")
            .with_parameter(
                ToolParameter::new("from_date", "Start date", false).with_type(ParamType::Date),
            )
            .with_parameter(
                ToolParameter::new("limit", "Max orders", false)
                    .with_type(ParamType::Integer)
                    .with_default(30),
            )
            .with_parameter(ToolParameter::new("order_num", "Order number", true));

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["name"], "list_orders");
        assert_eq!(schema["description"], "List orders");
        assert_eq!(schema["inputSchema"]["type"], "object");

        let from = &schema["inputSchema"]["properties"]["from_date"];
        assert_eq!(from["type"], "string");
        assert_eq!(from["format"], "date");

        let limit = &schema["inputSchema"]["properties"]["limit"];
        assert_eq!(limit["type"], "integer");
        assert_eq!(limit["default"], 30);

        let required = schema["inputSchema"]["required"].as_array().unwrap();
        assert_eq!(required, &vec![json!("order_num")]);
    }

    #[test]
    fn test_lookback_required_parameter_is_optional_for_caller() {
        let spec = biznisweb_tool_spec("sk");
        let schema = JsonSchemaToolConverter.tool_to_schema(spec.get("list_warehouse_items").unwrap());

        assert!(schema["inputSchema"]["required"].as_array().unwrap().is_empty());
        assert!(schema["inputSchema"]["properties"]["changed_from"]["default"].is_null());
    }

    #[test]
    fn test_all_tools_schema() {
        let spec = biznisweb_tool_spec("cz");
        let tools = JsonSchemaToolConverter.all_tools_schema(&spec);
        assert_eq!(tools.len(), spec.len());

        // Results are sorted by name
        assert_eq!(tools[0]["name"], "get_invoice");
        assert_eq!(tools[tools.len() - 1]["name"], "search_orders");

        let products = tools.iter().find(|t| t["name"] == "list_products").unwrap();
        assert_eq!(products["inputSchema"]["properties"]["lang_code"]["default"], "cz");

        for tool in &tools {
            assert!(tool["name"].is_string());
            assert!(tool["description"].is_string());
            assert_eq!(tool["inputSchema"]["type"], "object");
        }
    }
}
