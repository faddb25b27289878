use std::sync::Arc;

use axum::http::request::Parts;
use linkedapi_api::{LinkedApiClient, LinkedApiError, build_http_client};
use reqwest::Client;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ErrorData as McpError, GetPromptRequestParams, GetPromptResult, Implementation,
    ListPromptsResult, ListToolsResult, PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ServerHandler;
use tracing::{debug, error};

use crate::config::ServerConfig;
use crate::server::dispatch::{InvocationContext, ToolDispatcher};
use crate::server::progress::{NoopProgressReporter, PeerProgressReporter};
use crate::server::prompts::{get_prompt, list_prompts, server_instructions};
use crate::server::request::RequestIdentity;
use crate::server::tools::ToolSetError;

/// State shared by every session: configuration, the pooled HTTP client and
/// the read-only tool table. Holds no credentials of its own.
#[derive(Debug)]
pub struct McpServices {
    config: ServerConfig,
    http: Client,
    dispatcher: ToolDispatcher,
}

#[derive(Debug, thiserror::Error)]
pub enum ServicesError {
    #[error(transparent)]
    Tools(#[from] ToolSetError),
    #[error(transparent)]
    Http(#[from] LinkedApiError),
}

impl McpServices {
    pub fn new(config: ServerConfig) -> Result<Self, ServicesError> {
        Ok(Self {
            config,
            http: build_http_client()?,
            dispatcher: ToolDispatcher::standard()?,
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }

    fn client_for(&self, identity: &RequestIdentity) -> Result<LinkedApiClient, LinkedApiError> {
        Ok(
            LinkedApiClient::new(&self.config.api_base_url, identity.credentials.clone(), self.http.clone())?
                .with_poll_interval(self.config.poll_interval),
        )
    }
}

#[derive(Debug, Clone)]
pub struct LinkedApiMcpCore {
    services: Arc<McpServices>,
}

impl LinkedApiMcpCore {
    pub fn new(services: Arc<McpServices>) -> Self {
        Self { services }
    }

    async fn handle_call(&self, request: CallToolRequestParams, context: RequestContext<RoleServer>) -> CallToolResult {
        let name = request.name.to_string();
        let identity = RequestIdentity::resolve(context.extensions.get::<Parts>(), &self.services.config);
        let workflow_timeout = identity.workflow_timeout();
        debug!(tool = %name, client = %identity.mcp_client, ?workflow_timeout, "resolved caller");

        let runtime = match self.services.client_for(&identity) {
            Ok(runtime) => runtime,
            Err(error) => {
                error!(tool = %name, %error, "could not build Linked API client");
                return CallToolResult::success(vec![Content::text(format!("Error executing {name}: {error}"))]);
            }
        };

        match context.meta.get_progress_token() {
            Some(progress_token) => {
                let reporter = PeerProgressReporter::spawn(context.peer.clone(), progress_token);
                let invocation = InvocationContext {
                    runtime: &runtime,
                    workflow_timeout,
                    reporter: &reporter,
                };
                let result = self.services.dispatcher.dispatch(&name, request.arguments, invocation).await;
                reporter.finish().await;
                result
            }
            None => {
                let invocation = InvocationContext {
                    runtime: &runtime,
                    workflow_timeout,
                    reporter: &NoopProgressReporter,
                };
                self.services.dispatcher.dispatch(&name, request.arguments, invocation).await
            }
        }
    }
}

impl ServerHandler for LinkedApiMcpCore {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(self.services.dispatcher.tools().descriptors())))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move { Ok(self.handle_call(request, context).await) }
    }

    fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListPromptsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(list_prompts()))
    }

    fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<GetPromptResult, McpError>> + Send + '_ {
        std::future::ready(get_prompt(&request.name))
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().enable_prompts().build(),
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: "linkedapi-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Linked API MCP".to_string()),
                ..Default::default()
            },
            instructions: Some(server_instructions()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;
    use rmcp::model::{ClientRequest, ProgressNotificationParam, Request, ServerResult};
    use rmcp::service::{NotificationContext, PeerRequestOptions, RoleClient};
    use rmcp::{ClientHandler, ServiceExt};
    use serde_json::json;
    use tokio::sync::mpsc;

    use super::*;
    use crate::server::PROGRESS_TOTAL;

    /// MCP client that forwards every progress notification it receives.
    struct ProgressRecorder {
        updates: mpsc::UnboundedSender<ProgressNotificationParam>,
    }

    impl ClientHandler for ProgressRecorder {
        async fn on_progress(&self, params: ProgressNotificationParam, _context: NotificationContext<RoleClient>) {
            let _ = self.updates.send(params);
        }
    }

    fn core() -> LinkedApiMcpCore {
        LinkedApiMcpCore::new(Arc::new(McpServices::new(ServerConfig::default()).unwrap()))
    }

    #[test]
    fn server_info_advertises_tools_prompts_and_instructions() {
        let info = core().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert!(info.capabilities.resources.is_none());
        assert_eq!(info.server_info.name, "linkedapi-mcp");
        assert!(info.instructions.unwrap().contains("get_workflow_result"));
    }

    #[test]
    fn services_expose_the_standard_tool_table() {
        let core = core();
        assert_eq!(core.services.dispatcher().tools().len(), 29);
        assert_eq!(core.services.config().poll_interval, linkedapi_api::DEFAULT_POLL_INTERVAL);
    }

    #[tokio::test]
    async fn progress_notifications_reach_the_caller_before_the_result() {
        let api = MockServer::start_async().await;
        api.mock_async(|when, then| {
            when.method(POST).path("/workflows");
            then.status(200).json_body(json!({
                "success": true,
                "result": {"workflowId": "wf-7", "workflowStatus": "running"}
            }));
        })
        .await;
        api.mock_async(|when, then| {
            when.method(GET).path("/workflows/wf-7");
            then.status(200).delay(Duration::from_millis(50)).json_body(json!({
                "success": true,
                "result": {
                    "workflowId": "wf-7",
                    "workflowStatus": "completed",
                    "completion": {"actionType": "st.openPersonPage", "success": true, "data": {"name": "Jane"}}
                }
            }));
        })
        .await;

        let config = ServerConfig::new(api.base_url())
            .unwrap()
            .with_poll_interval(Duration::from_millis(20));
        let server = LinkedApiMcpCore::new(Arc::new(McpServices::new(config).unwrap()));
        let (server_io, client_io) = tokio::io::duplex(4096);
        tokio::spawn(async move {
            let running = server.serve(server_io).await?;
            running.waiting().await?;
            anyhow::Ok(())
        });

        let (updates, mut received) = mpsc::unbounded_channel();
        let client = ProgressRecorder { updates }.serve(client_io).await.unwrap();
        let request = ClientRequest::CallToolRequest(Request::new(CallToolRequestParams {
            meta: None,
            name: "fetch_person".into(),
            arguments: json!({"personUrl": "https://www.linkedin.com/in/jane"}).as_object().cloned(),
            task: None,
        }));
        let handle = client
            .send_cancellable_request(request, PeerRequestOptions::no_options())
            .await
            .unwrap();
        let progress_token = handle.progress_token.clone();
        let response = handle.await_response().await.unwrap();

        // Drained without waiting: everything must already be here when the result is.
        let total = f64::from(PROGRESS_TOTAL);
        let mut progress = Vec::new();
        while let Ok(update) = received.try_recv() {
            assert_eq!(update.progress_token, progress_token);
            assert_eq!(update.total, Some(total));
            progress.push(update.progress);
        }
        assert!(progress.len() >= 2, "expected a start and a terminal update, got {progress:?}");
        assert!(progress.windows(2).all(|pair| pair[0] <= pair[1]), "progress went backwards: {progress:?}");
        assert_eq!(progress.last().copied(), Some(total));
        assert_eq!(progress.iter().filter(|value| **value == total).count(), 1);

        let ServerResult::CallToolResult(result) = response else {
            panic!("unexpected response: {response:?}");
        };
        let text = result.content[0].as_text().unwrap().text.clone();
        assert!(text.contains("Jane"), "unexpected result text: {text}");

        client.cancel().await.unwrap();
    }
}
