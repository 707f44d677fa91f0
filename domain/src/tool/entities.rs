//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type of a tool parameter as declared to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    /// Calendar date in `YYYY-MM-DD` form. Rendered as an upstream
    /// `DateTime` (`YYYY-MM-DDT00:00:00`) when mapped to a variable.
    Date,
}

impl ParamType {
    pub fn as_str(&self) -> &str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Date => "date",
        }
    }

    /// JSON Schema type used when advertising the parameter.
    pub fn json_schema_type(&self) -> &str {
        match self {
            ParamType::String | ParamType::Date => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value applied when the caller omits a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamDefault {
    /// A literal JSON value
    Value(serde_json::Value),
    /// `today - days`, for date parameters
    LookbackDays(i64),
    /// Today's date, for date parameters
    Today,
}

/// Parameter specification for a tool
#[derive(Debug, Clone)]
pub struct ToolParameter {
    /// Parameter name as seen by the caller
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Declared type
    pub param_type: ParamType,
    /// Default applied when the argument is omitted
    pub default: Option<ParamDefault>,
    /// Dotted path of the GraphQL variable this parameter fills
    /// (e.g. `params.limit`). `None` means the parameter is consumed
    /// client-side only.
    pub variable: Option<String>,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: ParamType::String,
            default: None,
            variable: None,
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }

    pub fn with_default(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(ParamDefault::Value(value.into()));
        self
    }

    pub fn with_lookback_days(mut self, days: i64) -> Self {
        self.default = Some(ParamDefault::LookbackDays(days));
        self
    }

    pub fn with_today_default(mut self) -> Self {
        self.default = Some(ParamDefault::Today);
        self
    }

    /// Map this parameter onto a GraphQL variable path.
    pub fn maps_to(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    pub fn is_client_side(&self) -> bool {
        self.variable.is_none()
    }
}

/// Whether the upstream operation returns one entity or a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// A single entity; `null` means not found.
    Single,
    /// A plain list or a paged `{ data, pageInfo }` object.
    List,
}

/// Move a (possibly nested) field to a flat key on each record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRename {
    /// Dotted source path, e.g. `status.id`
    pub from: String,
    /// Top-level target key, e.g. `status_id`
    pub to: String,
}

impl FieldRename {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Stop paging once a record's date field is older than a date argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCutoff {
    /// Record field holding a date or datetime (e.g. `pur_date`)
    pub field: String,
    /// Resolved argument holding the lower bound (e.g. `from_date`)
    pub parameter: String,
}

/// Cursor pagination over a paged `{ data, pageInfo }` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Variable path that receives `pageInfo.nextCursor`
    pub cursor_variable: String,
    /// Upper bound on fetched records
    pub max_records: usize,
    pub stop_before: Option<DateCutoff>,
}

/// Client-side processing applied after extraction and renames.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PostProcess {
    /// Return the extracted value as-is
    #[default]
    None,
    /// Match the query argument against order number, customer and email
    SearchOrders {
        query_parameter: String,
        max_results: usize,
    },
    /// Keep records whose `field` contains the argument (case-insensitive)
    FilterByName { parameter: String, field: String },
    /// Keep orders purchased on or before the date argument, if given
    PurchasedUntil { parameter: String },
    /// Aggregate orders between two date arguments with status exclusion
    OrderStatistics {
        from_parameter: String,
        to_parameter: String,
    },
}

/// A tool exposed to the caller, bound to one upstream GraphQL operation.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g. "get_order")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Upstream operation name; also the `data` key of the response
    pub operation: String,
    /// GraphQL document sent upstream
    pub document: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
    /// Variables sent on every call, as (dotted path, value)
    pub fixed_variables: Vec<(String, serde_json::Value)>,
    pub shape: ResultShape,
    pub renames: Vec<FieldRename>,
    pub pagination: Option<Pagination>,
    pub post_process: PostProcess,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        operation: impl Into<String>,
        document: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            operation: operation.into(),
            document: document.into(),
            parameters: Vec::new(),
            fixed_variables: Vec::new(),
            shape: ResultShape::List,
            renames: Vec::new(),
            pagination: None,
            post_process: PostProcess::None,
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_fixed(mut self, path: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fixed_variables.push((path.into(), value.into()));
        self
    }

    pub fn single(mut self) -> Self {
        self.shape = ResultShape::Single;
        self
    }

    pub fn with_rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.renames.push(FieldRename::new(from, to));
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_post_process(mut self, post_process: PostProcess) -> Self {
        self.post_process = post_process;
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}

/// The catalog of tools, keyed by name
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: HashMap<String, ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    /// Tool definitions sorted by name
    pub fn sorted(&self) -> Vec<&ToolDefinition> {
        let mut tools: Vec<&ToolDefinition> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Build a call from a JSON arguments object; `null` means no arguments.
    pub fn from_json(tool_name: impl Into<String>, arguments: serde_json::Value) -> Option<Self> {
        let arguments = match arguments {
            serde_json::Value::Null => HashMap::new(),
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => return None,
        };
        Some(Self {
            tool_name: tool_name.into(),
            arguments,
        })
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.arguments.get(key).and_then(|v| v.as_i64())
    }
}
