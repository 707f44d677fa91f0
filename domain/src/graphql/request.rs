//! Upstream request construction

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::tool::{ParamType, ResolvedArguments, ToolDefinition};
use crate::util::midnight;

/// GraphQL document plus variables, as POSTed to the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamRequest {
    pub query: String,
    pub variables: Map<String, Value>,
    /// Name of the operation defined in `query`
    #[serde(
        rename = "operationName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_name: Option<String>,
}

impl UpstreamRequest {
    /// Assemble variables from fixed values first, then mapped arguments.
    ///
    /// Client-side parameters (no variable target) never reach the
    /// variables mapping. Date arguments become midnight `DateTime` literals.
    pub fn build(definition: &ToolDefinition, arguments: &ResolvedArguments) -> Self {
        let mut variables = Map::new();

        for (path, value) in &definition.fixed_variables {
            set_path(&mut variables, path, value.clone());
        }

        for param in &definition.parameters {
            let (Some(path), Some(value)) = (&param.variable, arguments.get(&param.name)) else {
                continue;
            };
            let value = match (param.param_type, value.as_str()) {
                (ParamType::Date, Some(date)) => Value::String(midnight(date)),
                _ => value.clone(),
            };
            set_path(&mut variables, path, value);
        }

        Self {
            query: definition.document.clone(),
            variables,
            operation_name: document_operation_name(&definition.document),
        }
    }

    /// Copy of this request with one more variable set (e.g. a page cursor).
    pub fn with_variable(&self, path: &str, value: Value) -> Self {
        let mut next = self.clone();
        set_path(&mut next.variables, path, value);
        next
    }

    /// Look up a variable by dotted path.
    pub fn variable(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        segments.try_fold(self.variables.get(first)?, |current, segment| current.get(segment))
    }
}

/// Name of the first named `query` in a GraphQL document.
///
/// `query GetOrders($x: Int) { ... }` yields `GetOrders`; anonymous
/// documents yield `None`.
pub fn document_operation_name(document: &str) -> Option<String> {
    let rest = document.trim_start().strip_prefix("query")?;
    let name: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    (!name.is_empty()).then_some(name)
}

/// Set `value` at a dotted path, creating intermediate objects.
fn set_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            root.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = root
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(map) = child {
                set_path(map, rest, value);
            }
        }
    }
}
