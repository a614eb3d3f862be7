//! Terminal session client for the relay.
//!
//! The Rust rendition of the original browser client: one stable session
//! identifier per device, an optimistic local transcript, and a fixed
//! apology turn whenever the wire request fails. The transcript is
//! presentation-only -- the server-held history is authoritative and
//! survives transcript resets and client restarts.

use std::path::Path;
use std::time::Duration;

use console::style;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use askcampus_types::turn::Turn;

/// Synthetic assistant turn appended when the request fails. Never
/// persisted server-side; the user must resend.
pub const FALLBACK_REPLY: &str = "Sorry, there was an error processing your message.";

/// File under the client data directory holding the session identifier.
const SESSION_ID_FILE: &str = "session_id";

/// Return the persisted session identifier, generating and persisting a
/// new one on first use.
///
/// The identifier is a UUID v4: non-cryptographic, no uniqueness guarantee
/// beyond practical collision avoidance. Idempotent across calls within
/// the same data directory.
pub async fn ensure_session_id(data_dir: &Path) -> anyhow::Result<String> {
    let path = data_dir.join(SESSION_ID_FILE);

    if let Ok(existing) = tokio::fs::read_to_string(&path).await {
        let existing = existing.trim();
        if !existing.is_empty() {
            return Ok(existing.to_string());
        }
    }

    let session_id = uuid::Uuid::new_v4().to_string();
    tokio::fs::create_dir_all(data_dir).await?;
    tokio::fs::write(&path, &session_id).await?;
    Ok(session_id)
}

/// Wire body sent to POST /api/chat.
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequestBody<'a> {
    session_id: &'a str,
    message: &'a str,
}

/// Wire body received on success.
#[derive(serde::Deserialize)]
struct ChatReplyBody {
    reply: String,
}

/// HTTP chat client holding the session identifier and local transcript.
pub struct SessionClient {
    http: reqwest::Client,
    server_url: String,
    session_id: String,
    transcript: Vec<Turn>,
}

impl SessionClient {
    /// Create a client, loading (or minting) the session identifier from
    /// the given data directory.
    pub async fn connect(server_url: impl Into<String>, data_dir: &Path) -> anyhow::Result<Self> {
        let session_id = ensure_session_id(data_dir).await?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()?;

        Ok(Self {
            http,
            server_url: server_url.into(),
            session_id,
            transcript: Vec::new(),
        })
    }

    /// The stable per-device session identifier.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The local transcript, oldest first. Presentation-only.
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Send one message and return the assistant turn appended to the
    /// transcript.
    ///
    /// The user turn is appended optimistically before the request goes
    /// out. Any transport failure, non-success status, or malformed body
    /// becomes the fixed fallback turn -- never an error to the caller.
    /// No retries.
    pub async fn send_message(&mut self, text: &str) -> &Turn {
        let message = text.trim().to_string();
        debug_assert!(!message.is_empty(), "caller must reject empty input");

        self.transcript.push(Turn::user(message.clone()));

        let reply = match self.request_reply(&message).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed, using fallback reply");
                FALLBACK_REPLY.to_string()
            }
        };

        self.transcript.push(Turn::assistant(reply));
        self.transcript
            .last()
            .expect("assistant turn was just pushed")
    }

    async fn request_reply(&self, message: &str) -> anyhow::Result<String> {
        let url = format!("{}/api/chat", self.server_url.trim_end_matches('/'));
        let body = ChatRequestBody {
            session_id: &self.session_id,
            message,
        };

        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("HTTP error: status {}", response.status());
        }

        let parsed: ChatReplyBody = response.json().await?;
        Ok(parsed.reply)
    }
}

/// Run the interactive chat loop against a running relay.
pub async fn run_chat_loop(server_url: &str, data_dir: &Path) -> anyhow::Result<()> {
    let mut client = SessionClient::connect(server_url, data_dir).await?;

    println!();
    println!("  {}", style("Ask My Campus").bold());
    println!(
        "  {}",
        style(format!(
            "Session: {}...",
            &client.session_id()[..client.session_id().len().min(8)]
        ))
        .dim()
    );
    println!(
        "  {}",
        style("Type a message and press Enter. /quit to exit.").dim()
    );
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/quit" || input == "/exit" {
            break;
        }

        let turn = client.send_message(input).await;
        println!("{} {}", style("Assistant:").cyan().bold(), turn.content);
        println!();
    }

    println!("\n  {}", style("Bye!").dim());
    Ok(())
}
