//! Playwright bridge — the browser/page capability
//!
//! Spawns one Node subprocess running Playwright and speaks
//! newline-delimited JSON with it over stdin/stdout. The subprocess owns
//! a single browser page for its whole lifetime, so state set by `fill`
//! is still there for the following `click`. One bridge per test;
//! nothing here is shared.

use std::process::{Command, Stdio};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command as TokioCommand};
use tracing::{debug, warn};

use crate::error::{HarnessError, HarnessResult};

/// Extra time allowed for the subprocess to report a failure before the
/// Rust side gives up on the read.
const REPLY_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, Default)]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserKind {
    fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Webkit => "webkit",
        }
    }
}

/// One command sent to the bridge subprocess.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum BridgeCommand {
    Goto { url: String, timeout_ms: u64 },
    Click { selector: String },
    Fill { selector: String, value: String },
    TextContent { selector: String },
    IsVisible { selector: String },
    Screenshot { path: String, full_page: bool },
    Close,
}

/// Reply to a single command. `value` carries query results
/// (text content, visibility); `error` is the Playwright message verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeReply {
    pub ok: bool,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Configuration for the bridge subprocess.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub base_url: String,
    pub browser: BrowserKind,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Default timeout Playwright applies to clicks, fills and queries.
    pub action_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://the-internet.herokuapp.com".to_string(),
            browser: BrowserKind::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            action_timeout: Duration::from_millis(30_000),
        }
    }
}

/// Handle to a running bridge subprocess.
pub struct PlaywrightBridge {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    action_timeout: Duration,
    // Holds the generated script until the subprocess exits.
    _script_dir: tempfile::TempDir,
}

impl PlaywrightBridge {
    /// Spawn the bridge and wait for its ready handshake.
    pub async fn launch(config: BridgeConfig) -> HarnessResult<Self> {
        Self::check_playwright_installed()?;

        let script_dir = tempfile::tempdir()?;
        let script_path = script_dir.path().join("bridge.js");
        std::fs::write(&script_path, bridge_script(&config))?;

        debug!("Spawning Playwright bridge: {}", script_path.display());

        let mut child = TokioCommand::new("node")
            .arg(&script_path)
            .current_dir(script_dir.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| HarnessError::Bridge(format!("failed to spawn node: {}", e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| HarnessError::Bridge("bridge stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HarnessError::Bridge("bridge stdout unavailable".to_string()))?;

        let mut bridge = Self {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            action_timeout: config.action_timeout,
            _script_dir: script_dir,
        };

        // Browser launch can take a while on a cold cache.
        let ready = bridge.read_reply(Duration::from_secs(60)).await?;
        if !ready.ok {
            return Err(HarnessError::Bridge(
                ready.error.unwrap_or_else(|| "bridge failed to start".to_string()),
            ));
        }

        Ok(bridge)
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> HarnessResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(HarnessError::PlaywrightNotFound),
        }
    }

    pub async fn goto(&mut self, url: &str, timeout: Duration) -> HarnessResult<()> {
        self.request(
            &BridgeCommand::Goto {
                url: url.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            },
            timeout + REPLY_GRACE,
        )
        .await?;
        Ok(())
    }

    pub async fn click(&mut self, selector: &str) -> HarnessResult<()> {
        self.request(
            &BridgeCommand::Click { selector: selector.to_string() },
            self.action_timeout + REPLY_GRACE,
        )
        .await?;
        Ok(())
    }

    pub async fn fill(&mut self, selector: &str, value: &str) -> HarnessResult<()> {
        self.request(
            &BridgeCommand::Fill {
                selector: selector.to_string(),
                value: value.to_string(),
            },
            self.action_timeout + REPLY_GRACE,
        )
        .await?;
        Ok(())
    }

    /// Raw text content of the first matching element. `None` when the
    /// element has no text node.
    pub async fn text_content(&mut self, selector: &str) -> HarnessResult<Option<String>> {
        let value = self
            .request(
                &BridgeCommand::TextContent { selector: selector.to_string() },
                self.action_timeout + REPLY_GRACE,
            )
            .await?;
        Ok(match value {
            Some(Value::String(text)) => Some(text),
            _ => None,
        })
    }

    pub async fn is_visible(&mut self, selector: &str) -> HarnessResult<bool> {
        let value = self
            .request(
                &BridgeCommand::IsVisible { selector: selector.to_string() },
                self.action_timeout + REPLY_GRACE,
            )
            .await?;
        Ok(value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    pub async fn screenshot(&mut self, path: &str, full_page: bool) -> HarnessResult<()> {
        self.request(
            &BridgeCommand::Screenshot {
                path: path.to_string(),
                full_page,
            },
            self.action_timeout + REPLY_GRACE,
        )
        .await?;
        Ok(())
    }

    /// Ask the subprocess to close the browser and exit, then reap it.
    pub async fn close(mut self) -> HarnessResult<()> {
        let line = serde_json::to_string(&BridgeCommand::Close)?;
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;

        match tokio::time::timeout(Duration::from_secs(10), self.child.wait()).await {
            Ok(result) => {
                let status = result?;
                debug!("Bridge exited: {}", status);
            }
            Err(_) => {
                warn!("Bridge did not exit after close, killing");
                self.child.kill().await?;
            }
        }
        Ok(())
    }

    async fn request(
        &mut self,
        command: &BridgeCommand,
        grace: Duration,
    ) -> HarnessResult<Option<Value>> {
        let line = serde_json::to_string(command)?;
        debug!("bridge <- {}", line);
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;

        let reply = self.read_reply(grace).await?;
        if reply.ok {
            Ok(reply.value)
        } else {
            Err(HarnessError::Bridge(
                reply.error.unwrap_or_else(|| "unknown bridge error".to_string()),
            ))
        }
    }

    async fn read_reply(&mut self, grace: Duration) -> HarnessResult<BridgeReply> {
        let line = tokio::time::timeout(grace, self.stdout.next_line())
            .await
            .map_err(|_| HarnessError::BridgeClosed("no reply before timeout".to_string()))??
            .ok_or_else(|| HarnessError::BridgeClosed("stdout closed".to_string()))?;
        debug!("bridge -> {}", line);
        Ok(serde_json::from_str(&line)?)
    }
}

/// Render the Node-side half of the protocol.
fn bridge_script(config: &BridgeConfig) -> String {
    format!(
        r#"
const readline = require('readline');
const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const launchers = {{ chromium, firefox, webkit }};
  const browser = await launchers['{browser}'].launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  page.setDefaultTimeout({action_timeout});
  const baseUrl = '{base_url}';
  const resolve = (url) => url.startsWith('http') ? url : baseUrl + url;
  const reply = (obj) => process.stdout.write(JSON.stringify(obj) + '\n');

  reply({{ ok: true, value: 'ready' }});

  const rl = readline.createInterface({{ input: process.stdin }});
  for await (const line of rl) {{
    let cmd;
    try {{
      cmd = JSON.parse(line);
    }} catch (error) {{
      reply({{ ok: false, error: 'bad command: ' + error.message }});
      continue;
    }}
    try {{
      switch (cmd.cmd) {{
        case 'goto':
          await page.goto(resolve(cmd.url), {{ timeout: cmd.timeout_ms }});
          reply({{ ok: true }});
          break;
        case 'click':
          await page.click(cmd.selector);
          reply({{ ok: true }});
          break;
        case 'fill':
          await page.fill(cmd.selector, cmd.value);
          reply({{ ok: true }});
          break;
        case 'text_content':
          reply({{ ok: true, value: await page.textContent(cmd.selector) }});
          break;
        case 'is_visible':
          reply({{ ok: true, value: await page.isVisible(cmd.selector) }});
          break;
        case 'screenshot':
          await page.screenshot({{ path: cmd.path, fullPage: cmd.full_page }});
          reply({{ ok: true }});
          break;
        case 'close':
          await browser.close();
          reply({{ ok: true }});
          process.exit(0);
        default:
          reply({{ ok: false, error: 'unknown command: ' + cmd.cmd }});
      }}
    }} catch (error) {{
      reply({{ ok: false, error: error.message }});
    }}
  }}
  await browser.close();
}})();
"#,
        browser = config.browser.as_str(),
        headless = config.headless,
        width = config.viewport_width,
        height = config.viewport_height,
        action_timeout = config.action_timeout.as_millis(),
        base_url = config.base_url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_with_snake_case_tags() {
        let cmd = BridgeCommand::Goto {
            url: "/login".to_string(),
            timeout_ms: 60_000,
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["cmd"], "goto");
        assert_eq!(json["url"], "/login");
        assert_eq!(json["timeout_ms"], 60_000);

        let cmd = BridgeCommand::TextContent {
            selector: "#flash".to_string(),
        };
        assert_eq!(serde_json::to_value(&cmd).unwrap()["cmd"], "text_content");
    }

    #[test]
    fn replies_tolerate_missing_optional_fields() {
        let reply: BridgeReply = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert!(reply.ok);
        assert!(reply.value.is_none());
        assert!(reply.error.is_none());

        let reply: BridgeReply =
            serde_json::from_str(r#"{"ok":false,"error":"timeout"}"#).unwrap();
        assert_eq!(reply.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn script_embeds_config_values() {
        let config = BridgeConfig {
            base_url: "http://127.0.0.1:7777".to_string(),
            browser: BrowserKind::Firefox,
            viewport_width: 1920,
            viewport_height: 1080,
            ..Default::default()
        };
        let script = bridge_script(&config);
        assert!(script.contains("launchers['firefox']"));
        assert!(script.contains("const baseUrl = 'http://127.0.0.1:7777';"));
        assert!(script.contains("width: 1920, height: 1080"));
        assert!(script.contains("page.setDefaultTimeout(30000);"));
    }
}
