use anyhow::Context as _;
use serde_json::{Value, json};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt as _, AsyncWriteExt as _, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

pub use notify_test_support::{MockNotifyService, MockResponse, unreachable_base_url};

const RESPONSE_TIMEOUT: Duration = Duration::from_secs(20);

/// Minimal MCP client that drives the adapter binary over stdio (one JSON message per line).
///
/// This intentionally avoids re-implementing any MCP logic in production code; it exists only
/// for integration tests.
pub struct McpStdioSession {
    _child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

impl McpStdioSession {
    /// Spawn the adapter with `base_url` as its default and complete the MCP handshake.
    pub async fn spawn(base_url: &str) -> anyhow::Result<Self> {
        let bin = env!("CARGO_BIN_EXE_notify-mcp-adapter");
        let mut child = Command::new(bin)
            .arg("--base-url")
            .arg(base_url)
            .arg("--log-level")
            .arg("warn")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .context("spawn adapter")?;

        let stdin = child.stdin.take().context("adapter stdin")?;
        let stdout = BufReader::new(child.stdout.take().context("adapter stdout")?).lines();
        let mut session = Self {
            _child: child,
            stdin,
            stdout,
        };

        let init = session
            .request(
                0,
                "initialize",
                json!({
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": { "name": "notify-mcp-adapter-integration-tests", "version": "0" }
                }),
            )
            .await?;
        anyhow::ensure!(init.get("result").is_some(), "initialize failed: {init}");

        session
            .send(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await?;

        Ok(session)
    }

    pub async fn request(&mut self, id: u64, method: &str, params: Value) -> anyhow::Result<Value> {
        self.send(&json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        }))
        .await?;

        tokio::time::timeout(RESPONSE_TIMEOUT, self.read_response(id))
            .await
            .with_context(|| format!("timeout waiting for response to {method}"))?
    }

    pub async fn call_tool(&mut self, id: u64, name: &str, arguments: Value) -> anyhow::Result<Value> {
        self.request(
            id,
            "tools/call",
            json!({ "name": name, "arguments": arguments }),
        )
        .await
    }

    async fn send(&mut self, msg: &Value) -> anyhow::Result<()> {
        let mut line = serde_json::to_string(msg)?;
        line.push('\n');
        self.stdin
            .write_all(line.as_bytes())
            .await
            .context("write to adapter stdin")?;
        self.stdin.flush().await.context("flush adapter stdin")?;
        Ok(())
    }

    async fn read_response(&mut self, id: u64) -> anyhow::Result<Value> {
        while let Some(line) = self.stdout.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let msg: Value = serde_json::from_str(line).context("parse stdout line as JSON")?;
            if msg.get("id") == Some(&json!(id)) {
                return Ok(msg);
            }
        }
        anyhow::bail!("adapter closed stdout before answering request {id}")
    }
}

/// Parse `result.content[0].text` of a `tools/call` response as JSON.
///
/// # Errors
///
/// Returns an error if the message is not a tool result or the text is not JSON.
pub fn tool_call_text_json(msg: &Value) -> anyhow::Result<Value> {
    let result = msg.get("result").context("tools/call missing result")?;
    let text = result
        .get("content")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .and_then(|c| c.get("text"))
        .and_then(Value::as_str)
        .context("tools/call missing result.content[0].text")?;
    serde_json::from_str(text).context("tools/call text is not JSON")
}
