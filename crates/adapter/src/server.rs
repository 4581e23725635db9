//! MCP tool surface for the notification service.
//!
//! Each tool deserializes its typed parameters, forwards them to [`NotifyClient`] and returns the
//! rendered JSON text. Remote failures are part of that text, never MCP errors.

use notify_client::{NotifyClient, Operation};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SERVER_NAME: &str = "MockNotifyService MCP";

const INSTRUCTIONS: &str = "Tools for the MockNotifyService notification API. Typical flow: \
signup_user to obtain an API key, create_service, create_template for that service, then \
send_email_notification or send_sms_notification and poll get_message_status with the returned \
message id. Every tool accepts an optional base_url to target another deployment.";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SignupUserParams {
    /// User's email address
    pub email: String,
    /// User's password
    pub password: String,
    /// Base URL of the notification service (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateServiceParams {
    /// Service name
    pub name: String,
    /// User's API key from signup
    pub api_key: String,
    /// Service description (optional)
    #[serde(default)]
    pub description: String,
    /// Base URL of the notification service (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Parameters shared by the list/lookup tools that only need credentials.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ApiKeyParams {
    /// User's API key
    pub api_key: String,
    /// Base URL of the notification service (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateTemplateParams {
    /// Template name
    pub name: String,
    /// Email subject line
    pub subject: String,
    /// Message body content
    pub body: String,
    /// ID of the service to link the template to
    pub service_id: String,
    /// User's API key
    pub api_key: String,
    /// Base URL of the notification service (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SendEmailParams {
    /// ID of the template to use
    pub template_id: String,
    /// Email address of the recipient
    pub recipient_email: String,
    /// User's API key
    pub api_key: String,
    /// Base URL of the notification service (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SendSmsParams {
    /// ID of the template to use
    pub template_id: String,
    /// Phone number of the recipient (e.g., +1234567890)
    pub recipient_phone: String,
    /// User's API key
    pub api_key: String,
    /// Base URL of the notification service (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MessageStatusParams {
    /// ID of the message to check
    pub message_id: String,
    /// User's API key
    pub api_key: String,
    /// Base URL of the notification service (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HealthCheckParams {
    /// Base URL of the notification service (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Clone)]
pub struct NotifyServer {
    client: NotifyClient,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl NotifyServer {
    #[must_use]
    pub fn new(client: NotifyClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Register a new user with the MockNotifyService and receive an API key. Returns JSON with the user creation response including the API key."
    )]
    async fn signup_user(
        &self,
        Parameters(params): Parameters<SignupUserParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::SignupUser, &params).await
    }

    #[tool(
        description = "Create a new service linked to the user's API key. Returns JSON with the service creation response."
    )]
    async fn create_service(
        &self,
        Parameters(params): Parameters<CreateServiceParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::CreateService, &params).await
    }

    #[tool(
        description = "Get all services for the authenticated user. Returns JSON with the list of the user's services."
    )]
    async fn get_services(
        &self,
        Parameters(params): Parameters<ApiKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::GetServices, &params).await
    }

    #[tool(
        description = "Create a message template linked to a service. Returns JSON with the template creation response."
    )]
    async fn create_template(
        &self,
        Parameters(params): Parameters<CreateTemplateParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::CreateTemplate, &params).await
    }

    #[tool(
        description = "Get all templates for the authenticated user's services. Returns JSON with the list of the user's templates."
    )]
    async fn get_templates(
        &self,
        Parameters(params): Parameters<ApiKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::GetTemplates, &params).await
    }

    #[tool(
        description = "Send an email notification using a template. Returns JSON with the email sending response including the message ID."
    )]
    async fn send_email_notification(
        &self,
        Parameters(params): Parameters<SendEmailParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::SendEmailNotification, &params)
            .await
    }

    #[tool(
        description = "Send an SMS notification using a template. Returns JSON with the SMS sending response including the message ID."
    )]
    async fn send_sms_notification(
        &self,
        Parameters(params): Parameters<SendSmsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::SendSmsNotification, &params).await
    }

    #[tool(
        description = "Get the delivery status of a previously sent message. Returns JSON with message status information."
    )]
    async fn get_message_status(
        &self,
        Parameters(params): Parameters<MessageStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::GetMessageStatus, &params).await
    }

    #[tool(
        description = "Get all messages for the authenticated user. Returns JSON with the list of the user's messages."
    )]
    async fn get_messages(
        &self,
        Parameters(params): Parameters<ApiKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::GetMessages, &params).await
    }

    #[tool(
        description = "Check the health status of the MockNotifyService. Returns JSON with service health information."
    )]
    async fn health_check(
        &self,
        Parameters(params): Parameters<HealthCheckParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::HealthCheck, &params).await
    }
}

impl NotifyServer {
    async fn dispatch<P: Serialize>(
        &self,
        operation: Operation,
        params: &P,
    ) -> Result<CallToolResult, McpError> {
        let args = serde_json::to_value(params).map_err(|e| {
            McpError::internal_error(format!("failed to encode {operation} arguments: {e}"), None)
        })?;
        debug!(tool = %operation, "dispatching tool call");
        let text = self.client.invoke(operation, &args).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for NotifyServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}
