//! Catalog of the notification service operations exposed as tools.
//!
//! Every operation maps to exactly one endpoint. The descriptor says which HTTP method and path
//! template to use, whether the caller's API key is forwarded, which arguments form the JSON body,
//! and how failures are rendered.

use crate::envelope::ErrorFallback;
use crate::error::{NotifyError, Result};
use reqwest::Method;
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SignupUser,
    CreateService,
    GetServices,
    CreateTemplate,
    GetTemplates,
    SendEmailNotification,
    SendSmsNotification,
    GetMessageStatus,
    GetMessages,
    HealthCheck,
}

impl Operation {
    pub const ALL: [Self; 10] = [
        Self::SignupUser,
        Self::CreateService,
        Self::GetServices,
        Self::CreateTemplate,
        Self::GetTemplates,
        Self::SendEmailNotification,
        Self::SendSmsNotification,
        Self::GetMessageStatus,
        Self::GetMessages,
        Self::HealthCheck,
    ];

    /// Tool name as published to the host.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SignupUser => "signup_user",
            Self::CreateService => "create_service",
            Self::GetServices => "get_services",
            Self::CreateTemplate => "create_template",
            Self::GetTemplates => "get_templates",
            Self::SendEmailNotification => "send_email_notification",
            Self::SendSmsNotification => "send_sms_notification",
            Self::GetMessageStatus => "get_message_status",
            Self::GetMessages => "get_messages",
            Self::HealthCheck => "health_check",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::SignupUser
            | Self::CreateService
            | Self::CreateTemplate
            | Self::SendEmailNotification
            | Self::SendSmsNotification => Method::POST,
            Self::GetServices
            | Self::GetTemplates
            | Self::GetMessageStatus
            | Self::GetMessages
            | Self::HealthCheck => Method::GET,
        }
    }

    /// Path template; `{name}` segments are filled from the arguments of the same name.
    #[must_use]
    pub fn path_template(self) -> &'static str {
        match self {
            Self::SignupUser => "/api/signup",
            Self::CreateService | Self::GetServices => "/api/services",
            Self::CreateTemplate | Self::GetTemplates => "/api/templates",
            Self::SendEmailNotification => "/api/notifications/email",
            Self::SendSmsNotification => "/api/notifications/sms",
            Self::GetMessageStatus => "/api/messages/{message_id}/status",
            Self::GetMessages => "/api/messages",
            Self::HealthCheck => "/api/health",
        }
    }

    /// Whether the `api_key` argument is forwarded as `X-API-Key`.
    #[must_use]
    pub fn requires_api_key(self) -> bool {
        !matches!(self, Self::SignupUser | Self::HealthCheck)
    }

    /// Argument names copied into the JSON request body, in wire order.
    #[must_use]
    pub fn body_fields(self) -> &'static [&'static str] {
        match self {
            Self::SignupUser => &["email", "password"],
            Self::CreateService => &["name", "description"],
            Self::CreateTemplate => &["name", "subject", "body", "service_id"],
            Self::SendEmailNotification => &["template_id", "recipient_email"],
            Self::SendSmsNotification => &["template_id", "recipient_phone"],
            Self::GetServices
            | Self::GetTemplates
            | Self::GetMessageStatus
            | Self::GetMessages
            | Self::HealthCheck => &[],
        }
    }

    /// Signup reports failures without falling back to the response body; all others do.
    #[must_use]
    pub fn error_fallback(self) -> ErrorFallback {
        match self {
            Self::SignupUser => ErrorFallback::MessageOnly,
            _ => ErrorFallback::MessageOrBody,
        }
    }

    /// Substitute `{name}` path segments from `args`. Values are inserted verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder has no matching string (or scalar) argument.
    pub fn resolve_path(self, args: &Map<String, Value>) -> Result<String> {
        let mut path = self.path_template().to_string();
        let mut from = 0;
        while let Some(offset) = path[from..].find('{') {
            let start = from + offset;
            let Some(len) = path[start..].find('}') else {
                break;
            };
            let name = &path[start + 1..start + len];
            let value = args
                .get(name)
                .and_then(scalar_to_string)
                .ok_or_else(|| {
                    NotifyError::InvalidArguments(format!(
                        "{}: missing path parameter '{name}'",
                        self.name()
                    ))
                })?;
            path.replace_range(start..=start + len, &value);
            from = start + value.len();
        }
        Ok(path)
    }

    /// Collect the body fields present in `args`. `None` for operations without a body.
    #[must_use]
    pub fn build_body(self, args: &Map<String, Value>) -> Option<Value> {
        let fields = self.body_fields();
        if fields.is_empty() {
            return None;
        }
        let body: Map<String, Value> = fields
            .iter()
            .filter_map(|field| args.get(*field).map(|v| ((*field).to_string(), v.clone())))
            .collect();
        Some(Value::Object(body))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
