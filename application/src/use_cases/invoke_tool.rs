//! Invoke Tool use case: the tool adapter.
//!
//! One generic routine interprets any [`ToolDefinition`]:
//!
//! ```text
//! ToolCall
//!   ├─ lookup          → UnknownTool
//!   ├─ validate        → MissingParameter / InvalidArgument   (no network)
//!   ├─ build request   (fixed variables + mapped arguments)
//!   ├─ gateway.execute → UpstreamTimeout / TransportError
//!   │    └─ pagination (only tools that declare it)
//!   ├─ envelope        → UpstreamError (any `errors` entry)
//!   ├─ extract + renames → NotFound (single entity is null)
//!   └─ post-process    (search, name and date filters, statistics)
//! ```

use crate::config::AdapterConfig;
use crate::ports::clock::Clock;
use crate::ports::graphql_gateway::{GatewayError, GraphQlGateway};
use crate::ports::invocation_logger::{InvocationEvent, InvocationLogger, NoInvocationLogger};
use crate::ports::tool_executor::ToolExecutorPort;
use async_trait::async_trait;
use biznisweb_domain::reshape::{
    self, DateRange, OrderStatistics, apply_renames, filter_by_name, filter_purchased_until,
    search_orders,
};
use biznisweb_domain::util::{parse_date, truncate_str};
use biznisweb_domain::{
    DefaultToolValidator, EnvelopeError, Pagination, PostProcess, ResolvedArguments, ResultShape,
    ToolCall, ToolDefinition, ToolError, ToolResult, ToolSpec, ToolValidator, UpstreamRequest,
    ValidationError,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during a tool invocation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvokeToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing required parameter '{parameter}' for tool '{tool}'")]
    MissingParameter { tool: String, parameter: String },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    TransportError(String),
}

impl InvokeToolError {
    pub fn code(&self) -> &'static str {
        match self {
            InvokeToolError::UnknownTool(_) | InvokeToolError::NotFound(_) => ToolError::NOT_FOUND,
            InvokeToolError::MissingParameter { .. } | InvokeToolError::InvalidArgument(_) => {
                ToolError::INVALID_ARGUMENT
            }
            InvokeToolError::UpstreamError(_) => ToolError::UPSTREAM_ERROR,
            InvokeToolError::UpstreamTimeout(_) => ToolError::TIMEOUT,
            InvokeToolError::TransportError(_) => ToolError::TRANSPORT_ERROR,
        }
    }

    pub fn to_tool_error(&self) -> ToolError {
        ToolError::new(self.code(), self.to_string())
    }
}

impl From<ValidationError> for InvokeToolError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingParameter { tool, parameter } => {
                InvokeToolError::MissingParameter { tool, parameter }
            }
            other => InvokeToolError::InvalidArgument(other.to_string()),
        }
    }
}

impl From<GatewayError> for InvokeToolError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Timeout(_) => InvokeToolError::UpstreamTimeout(err.to_string()),
            other => InvokeToolError::TransportError(other.to_string()),
        }
    }
}

impl From<EnvelopeError> for InvokeToolError {
    fn from(err: EnvelopeError) -> Self {
        InvokeToolError::UpstreamError(err.to_string())
    }
}

/// A validated invocation, ready to send.
#[derive(Debug, Clone)]
pub struct PreparedInvocation<'a> {
    pub definition: &'a ToolDefinition,
    pub arguments: ResolvedArguments,
    pub request: UpstreamRequest,
}

/// Use case that maps tool calls onto upstream GraphQL requests.
///
/// Stateless between invocations: nothing is cached, every call goes
/// upstream.
pub struct InvokeToolUseCase {
    spec: Arc<ToolSpec>,
    gateway: Arc<dyn GraphQlGateway>,
    clock: Arc<dyn Clock>,
    config: AdapterConfig,
    validator: DefaultToolValidator,
    invocation_logger: Arc<dyn InvocationLogger>,
}

impl InvokeToolUseCase {
    pub fn new(
        spec: Arc<ToolSpec>,
        gateway: Arc<dyn GraphQlGateway>,
        clock: Arc<dyn Clock>,
        config: AdapterConfig,
    ) -> Self {
        Self {
            spec,
            gateway,
            clock,
            config,
            validator: DefaultToolValidator,
            invocation_logger: Arc::new(NoInvocationLogger),
        }
    }

    /// Create with an invocation logger.
    pub fn with_invocation_logger(mut self, logger: Arc<dyn InvocationLogger>) -> Self {
        self.invocation_logger = logger;
        self
    }

    /// Validate a call and build its first upstream request.
    ///
    /// Performs no I/O; a call that fails here never reaches the network.
    pub fn prepare(&self, call: &ToolCall) -> Result<PreparedInvocation<'_>, InvokeToolError> {
        let definition = self
            .spec
            .get(&call.tool_name)
            .ok_or_else(|| InvokeToolError::UnknownTool(call.tool_name.clone()))?;

        let arguments = self
            .validator
            .validate(call, definition, self.clock.today())?;
        if let PostProcess::OrderStatistics {
            from_parameter,
            to_parameter,
        } = &definition.post_process
        {
            date_range(&arguments, from_parameter, to_parameter)?;
        }
        let request = UpstreamRequest::build(definition, &arguments);

        Ok(PreparedInvocation {
            definition,
            arguments,
            request,
        })
    }

    /// Run one invocation to completion.
    ///
    /// Returns the reshaped output and the number of upstream requests made.
    pub async fn invoke(&self, call: &ToolCall) -> Result<(Value, usize), InvokeToolError> {
        let mut requests = 0;
        let output = self.invoke_counted(call, &mut requests).await?;
        Ok((output, requests))
    }

    /// Like [`invoke`](Self::invoke), counting every request sent in
    /// `requests`, failed ones included.
    async fn invoke_counted(
        &self,
        call: &ToolCall,
        requests: &mut usize,
    ) -> Result<Value, InvokeToolError> {
        let PreparedInvocation {
            definition,
            arguments,
            request,
        } = self.prepare(call)?;

        let mut value = match &definition.pagination {
            Some(pagination) => {
                self.fetch_all_pages(definition, pagination, &arguments, request, requests)
                    .await?
            }
            None => self.send(definition, &request, requests).await?,
        };

        if definition.shape == ResultShape::Single && value.is_null() {
            return Err(InvokeToolError::NotFound(not_found_message(
                definition, &arguments,
            )));
        }

        apply_renames(&mut value, &definition.renames, definition.shape);
        self.post_process(definition, &arguments, value)
    }

    async fn send(
        &self,
        definition: &ToolDefinition,
        request: &UpstreamRequest,
        requests: &mut usize,
    ) -> Result<Value, InvokeToolError> {
        let variables = Value::Object(request.variables.clone()).to_string();
        debug!(
            tool = %definition.name,
            operation = %definition.operation,
            variables = %truncate_str(&variables, 500),
            "Sending upstream request"
        );

        *requests += 1;
        let response = self.gateway.execute(request).await?;
        Ok(response.into_operation_result(&definition.operation)?)
    }

    /// Follow `pageInfo.nextCursor` until the last page, the date cutoff,
    /// or `max_records`. Collected records are returned as `{ data }`.
    async fn fetch_all_pages(
        &self,
        definition: &ToolDefinition,
        pagination: &Pagination,
        arguments: &ResolvedArguments,
        first_request: UpstreamRequest,
        requests: &mut usize,
    ) -> Result<Value, InvokeToolError> {
        let cutoff = pagination.stop_before.as_ref().and_then(|c| {
            arguments
                .get_date(&c.parameter)
                .map(|date| (c.field.as_str(), date))
        });

        let mut collected: Vec<Value> = Vec::new();
        let mut request = first_request;
        let mut pages = 0;

        loop {
            let page = self.send(definition, &request, requests).await?;
            pages += 1;

            let records = reshape::records(&page).cloned().unwrap_or_default();
            let reached_cutoff = cutoff.is_some_and(|(field, from)| {
                records.iter().any(|r| {
                    r.get(field)
                        .and_then(Value::as_str)
                        .and_then(parse_date)
                        .is_some_and(|d| d < from)
                })
            });
            collected.extend(records);

            if reached_cutoff {
                break;
            }
            if collected.len() >= pagination.max_records {
                warn!(
                    tool = %definition.name,
                    max = pagination.max_records,
                    "Reached record limit while paging"
                );
                break;
            }
            match reshape::next_cursor(&page) {
                Some(cursor) => {
                    request = request.with_variable(&pagination.cursor_variable, cursor.clone())
                }
                None => break,
            }
        }

        debug!(
            tool = %definition.name,
            records = collected.len(),
            pages,
            "Fetched all pages"
        );
        Ok(json!({ "data": collected }))
    }

    fn post_process(
        &self,
        definition: &ToolDefinition,
        arguments: &ResolvedArguments,
        value: Value,
    ) -> Result<Value, InvokeToolError> {
        match &definition.post_process {
            PostProcess::None => Ok(value),
            PostProcess::SearchOrders {
                query_parameter,
                max_results,
            } => {
                let query = arguments.get_str(query_parameter).unwrap_or("");
                Ok(search_orders(&value, query, *max_results))
            }
            PostProcess::FilterByName { parameter, field } => match arguments.get_str(parameter) {
                Some(name) => Ok(filter_by_name(value, field, name)),
                None => Ok(value),
            },
            PostProcess::PurchasedUntil { parameter } => match arguments.get_date(parameter) {
                Some(until) => Ok(filter_purchased_until(value, until)),
                None => Ok(value),
            },
            PostProcess::OrderStatistics {
                from_parameter,
                to_parameter,
            } => {
                let range = date_range(arguments, from_parameter, to_parameter)?;
                let orders = reshape::records(&value).map(Vec::as_slice).unwrap_or(&[]);
                let exclusion = &self.config.status_exclusion;

                let stats = OrderStatistics::compute(orders, range, exclusion);
                info!(
                    valid = stats.valid_orders,
                    excluded = stats.excluded_orders(),
                    "Computed order statistics"
                );
                Ok(stats.to_json(range, exclusion))
            }
        }
    }
}

fn date_range(
    arguments: &ResolvedArguments,
    from_parameter: &str,
    to_parameter: &str,
) -> Result<DateRange, InvokeToolError> {
    let date = |name: &str| {
        arguments.get_date(name).ok_or_else(|| {
            InvokeToolError::InvalidArgument(format!("Parameter '{}' must be a date", name))
        })
    };
    let (from, to) = (date(from_parameter)?, date(to_parameter)?);
    if from > to {
        return Err(InvokeToolError::InvalidArgument(format!(
            "'{}' ({}) is after '{}' ({})",
            from_parameter, from, to_parameter, to
        )));
    }
    Ok(DateRange::new(from, to))
}

fn not_found_message(definition: &ToolDefinition, arguments: &ResolvedArguments) -> String {
    let keys: Vec<String> = definition
        .required_parameters()
        .filter_map(|p| {
            arguments.get(&p.name).map(|v| match v {
                Value::String(s) => format!("{}={}", p.name, s),
                other => format!("{}={}", p.name, other),
            })
        })
        .collect();
    format!("{}: nothing found for {}", definition.name, keys.join(", "))
}

#[async_trait]
impl ToolExecutorPort for InvokeToolUseCase {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let start = Instant::now();
        info!(tool = %call.tool_name, "Invoking tool");

        let mut requests = 0;
        let outcome = self.invoke_counted(call, &mut requests).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let result = match outcome {
            Ok(output) => ToolResult::success(&call.tool_name, output),
            Err(err) => {
                warn!(tool = %call.tool_name, code = err.code(), error = %err, "Tool invocation failed");
                ToolResult::failure(&call.tool_name, err.to_tool_error())
            }
        };

        self.invocation_logger.log(InvocationEvent {
            tool: call.tool_name.clone(),
            success: result.is_success(),
            error_code: result.error().map(|e| e.code.clone()),
            duration_ms,
            upstream_requests: requests,
        });

        result
            .with_duration(duration_ms)
            .with_upstream_requests(requests)
    }
}
