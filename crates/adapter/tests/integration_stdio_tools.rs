mod common;

use anyhow::Context as _;
use serde_json::{Value, json};

use common::{
    McpStdioSession, MockNotifyService, MockResponse, tool_call_text_json, unreachable_base_url,
};

#[tokio::test]
async fn tools_list_exposes_every_operation() -> anyhow::Result<()> {
    let mut session = McpStdioSession::spawn(&unreachable_base_url()?).await?;

    let msg = session.request(1, "tools/list", json!({})).await?;
    let tools = msg
        .get("result")
        .and_then(|r| r.get("tools"))
        .and_then(Value::as_array)
        .context("tools/list missing result.tools")?;

    let mut names: Vec<&str> = tools
        .iter()
        .filter_map(|t| t.get("name").and_then(Value::as_str))
        .collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "create_service",
            "create_template",
            "get_message_status",
            "get_messages",
            "get_services",
            "get_templates",
            "health_check",
            "send_email_notification",
            "send_sms_notification",
            "signup_user",
        ]
    );

    for tool in tools {
        assert!(
            tool.get("description")
                .and_then(Value::as_str)
                .is_some_and(|d| !d.is_empty()),
            "tool without description: {tool}"
        );
        assert_eq!(tool["inputSchema"]["type"], "object");
    }
    Ok(())
}

#[tokio::test]
async fn signup_over_stdio_returns_api_key() -> anyhow::Result<()> {
    let mock = MockNotifyService::start(MockResponse::json(201, json!({"api_key": "k1"}))).await?;
    let mut session = McpStdioSession::spawn(mock.base_url()).await?;

    let msg = session
        .call_tool(
            1,
            "signup_user",
            json!({"email": "a@b.com", "password": "pw"}),
        )
        .await?;
    assert_eq!(tool_call_text_json(&msg)?, json!({"api_key": "k1"}));

    let req = mock.last_request().context("mock saw no request")?;
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/api/signup");
    Ok(())
}

#[tokio::test]
async fn http_error_status_is_returned_as_tool_text() -> anyhow::Result<()> {
    let mock =
        MockNotifyService::start(MockResponse::json(404, json!({"detail": "not found"}))).await?;
    let mut session = McpStdioSession::spawn(mock.base_url()).await?;

    let msg = session
        .call_tool(
            1,
            "get_message_status",
            json!({"message_id": "m1", "api_key": "k1"}),
        )
        .await?;
    assert_eq!(
        tool_call_text_json(&msg)?,
        json!({"error": {"detail": "not found"}, "status_code": 404})
    );
    assert_eq!(msg["result"]["isError"], json!(false));

    let req = mock.last_request().context("mock saw no request")?;
    assert_eq!(req.path, "/api/messages/m1/status");
    assert_eq!(req.header("x-api-key"), Some("k1"));
    Ok(())
}

#[tokio::test]
async fn transport_failure_does_not_break_the_session() -> anyhow::Result<()> {
    let mock = MockNotifyService::start(MockResponse::json(200, json!({"status": "ok"}))).await?;
    let mut session = McpStdioSession::spawn(mock.base_url()).await?;

    let msg = session
        .call_tool(
            1,
            "get_messages",
            json!({"api_key": "k1", "base_url": unreachable_base_url()?}),
        )
        .await?;
    let failed = tool_call_text_json(&msg)?;
    assert!(
        failed["error"].as_str().is_some_and(|e| !e.is_empty()),
        "unexpected failure text: {failed}"
    );
    assert_eq!(failed["status_code"], Value::Null);

    let msg = session.call_tool(2, "health_check", json!({})).await?;
    assert_eq!(tool_call_text_json(&msg)?, json!({"status": "ok"}));
    assert_eq!(mock.hits(), 1);
    Ok(())
}

#[tokio::test]
async fn missing_required_argument_is_a_protocol_error() -> anyhow::Result<()> {
    let mock = MockNotifyService::start(MockResponse::json(200, json!([]))).await?;
    let mut session = McpStdioSession::spawn(mock.base_url()).await?;

    let msg = session.call_tool(1, "get_services", json!({})).await?;
    assert!(msg.get("error").is_some(), "expected JSON-RPC error: {msg}");
    assert_eq!(mock.hits(), 0);

    let msg = session
        .call_tool(2, "get_services", json!({"api_key": "k1"}))
        .await?;
    assert_eq!(tool_call_text_json(&msg)?, json!([]));
    Ok(())
}
