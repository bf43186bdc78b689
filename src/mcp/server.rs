/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the server that:
/// 1. Reads line-delimited JSON-RPC requests
/// 2. Runs tool calls against the completion store
/// 3. Writes JSON-RPC responses, one per line
///
/// Requests are handled one at a time, so every store command completes
/// before the next request is read.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::mcp::protocol::*;
use crate::storage::SnapshotStorage;
use crate::store::CompletionStore;
use crate::tools::{self, ToolError};
use crate::ServerError;

/// JSON-RPC front end over a completion store
pub struct McpServer<S: SnapshotStorage> {
    store: CompletionStore<S>,
    initialized: bool,
}

impl<S: SnapshotStorage> McpServer<S> {
    pub fn new(store: CompletionStore<S>) -> Self {
        Self {
            store,
            initialized: false,
        }
    }

    pub fn store(&self) -> &CompletionStore<S> {
        &self.store
    }

    /// Whether the client has sent its `initialized` notification
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Serve requests from stdin until it closes
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve requests from any line-oriented reader, answering on `writer`
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (input closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.handle_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        writer.write_all(response_str.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                        writer.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read request: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request)
    }

    fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = match request.id {
            Some(id) => id,
            None => {
                self.handle_notification(&request.method);
                return None;
            }
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(id, Value::Null)
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        };

        Some(response)
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                info!("MCP client initialized");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: "Habit Tracker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string(), None),
        }
    }

    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let call: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(call)) => call,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                    None,
                )
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    "Missing parameters".to_string(),
                    None,
                )
            }
        };

        debug!("Calling tool '{}'", call.name);
        let result = self.call_tool(&call.name, call.arguments);

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string(), None),
        }
    }

    fn call_tool(&mut self, name: &str, arguments: Value) -> ToolCallResult {
        let store = &mut self.store;

        match name {
            "habit_create" => run_tool(arguments, |p| tools::create_habit(store, p), |r| &r.message),
            "habit_toggle" => run_tool(arguments, |p| tools::toggle_habit(store, p), |r| &r.message),
            "habit_delete" => run_tool(arguments, |p| tools::delete_habit(store, p), |r| &r.message),
            "habit_update" => run_tool(arguments, |p| tools::update_habit(store, p), |r| &r.message),
            "habit_list" => run_tool(arguments, |p| tools::list_habits(store, p), |r| &r.message),
            "habit_stats" => run_tool(arguments, |p| tools::get_stats(store, p), |r| &r.message),
            "habit_details" => run_tool(arguments, |p| tools::get_habit_details(store, p), |r| &r.message),
            "session_switch" => run_tool(arguments, |p| tools::switch_session(store, p), |r| &r.message),
            _ => ToolCallResult::error(
                error_codes::METHOD_NOT_FOUND,
                format!("Unknown tool: {}", name),
            ),
        }
    }
}

/// Deserialize arguments, run a tool and wrap its response
fn run_tool<P, R, F, M>(arguments: Value, tool: F, message: M) -> ToolCallResult
where
    P: DeserializeOwned,
    R: Serialize,
    F: FnOnce(P) -> Result<R, ToolError>,
    M: FnOnce(&R) -> &String,
{
    let arguments = if arguments.is_null() { json!({}) } else { arguments };

    let params: P = match serde_json::from_value(arguments) {
        Ok(params) => params,
        Err(e) => {
            return ToolCallResult::error(
                error_codes::INVALID_PARAMS,
                format!("Invalid arguments: {}", e),
            )
        }
    };

    match tool(params) {
        Ok(response) => {
            let text = message(&response).clone();
            ToolCallResult::success(text, serde_json::to_value(&response).ok())
        }
        Err(e) => ToolCallResult::error(tool_error_code(&e), e.to_string()),
    }
}

fn definition<P: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::to_value(schema_for!(P))
            .unwrap_or_else(|_| json!({ "type": "object" })),
    }
}

/// Every tool this server exposes
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        definition::<tools::CreateHabitParams>("habit_create", "Create a new habit to track"),
        definition::<tools::ToggleParams>(
            "habit_toggle",
            "Toggle a habit's completion for today or a given YYYY-MM-DD date",
        ),
        definition::<tools::DeleteHabitParams>("habit_delete", "Delete a habit and its history"),
        definition::<tools::UpdateHabitParams>(
            "habit_update",
            "Change a habit's name, description, color or frequency",
        ),
        definition::<tools::ListHabitsParams>(
            "habit_list",
            "List habits with today's state, current streak and last-7-days count",
        ),
        definition::<tools::StatsParams>(
            "habit_stats",
            "Totals across all habits: completed today, best current streak, longest streak",
        ),
        definition::<tools::DetailsParams>(
            "habit_details",
            "Detailed statistics for one habit: rates, monthly breakdown, 30-day calendar",
        ),
        definition::<tools::SwitchSessionParams>(
            "session_switch",
            "Switch the active identity and load its habits",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_date, FixedClock};
    use crate::storage::MemoryStorage;

    fn server() -> McpServer<MemoryStorage> {
        let today = parse_date("2024-01-03").unwrap();
        McpServer::new(CompletionStore::with_clock(MemoryStorage::new(), None, FixedClock(today)))
    }

    fn call(server: &mut McpServer<MemoryStorage>, name: &str, arguments: Value) -> Value {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        });
        let response = server.handle_line(&request.to_string()).unwrap();
        serde_json::to_value(response).unwrap()["result"].clone()
    }

    #[test]
    fn test_tools_list() {
        let mut server = server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":7,"method":"tools/list"}"#)
            .unwrap();
        let value = serde_json::to_value(response).unwrap();

        let tools = value["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 8);
        assert_eq!(tools[0]["name"], "habit_create");
        assert!(tools[0]["inputSchema"]["properties"]["name"].is_object());
    }

    #[test]
    fn test_create_toggle_stats_flow() {
        let mut server = server();

        let created = call(&mut server, "habit_create", json!({ "name": "Read" }));
        assert_eq!(created["isError"], false);
        let id = created["structuredContent"]["habit"]["id"].as_str().unwrap().to_string();

        let toggled = call(&mut server, "habit_toggle", json!({ "habit_id": id }));
        assert_eq!(toggled["structuredContent"]["outcome"]["streak"], 1);

        let stats = call(&mut server, "habit_stats", Value::Null);
        assert_eq!(stats["structuredContent"]["stats"]["completed_today"], 1);
    }

    #[test]
    fn test_tool_errors_are_results() {
        let mut server = server();

        let blank = call(&mut server, "habit_create", json!({ "name": "" }));
        assert_eq!(blank["isError"], true);

        let missing = call(&mut server, "habit_toggle", json!({}));
        assert_eq!(missing["isError"], true);

        let unknown = call(&mut server, "habit_fly", json!({}));
        assert_eq!(unknown["isError"], true);
        assert!(server.store().habits().is_empty());
    }

    #[test]
    fn test_protocol_errors() {
        let mut server = server();

        let parse = serde_json::to_value(server.handle_line("{oops").unwrap()).unwrap();
        assert_eq!(parse["error"]["code"], error_codes::PARSE_ERROR);

        let method = serde_json::to_value(
            server.handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"nope"}"#).unwrap(),
        )
        .unwrap();
        assert_eq!(method["error"]["code"], error_codes::METHOD_NOT_FOUND);

        assert!(server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .is_none());
        assert!(server.is_initialized());
        assert!(server.handle_line("   ").is_none());
    }
}
