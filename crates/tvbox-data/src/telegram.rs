//! Telegram relay for order and lead messages.
//!
//! Every configured manager chat gets its own `sendMessage` call. A chat
//! that fails does not stop delivery to the others; the outcome of each
//! call is collected in a [`RelayReport`].

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tvbox_commerce::checkout::MessageKind;

use crate::error::RelayError;
use crate::timeout::TimeoutConfig;

/// Public Bot API endpoint.
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

/// Bot credentials and recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub api_base: String,
    pub bot_token: Option<String>,
    pub chat_ids: Vec<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_TELEGRAM_API.to_string(),
            bot_token: None,
            chat_ids: Vec::new(),
        }
    }
}

impl TelegramConfig {
    /// Token present and at least one chat to deliver to.
    pub fn is_configured(&self) -> bool {
        self.bot_token.as_deref().is_some_and(|t| !t.trim().is_empty())
            && self.chat_ids.iter().any(|c| !c.trim().is_empty())
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// A chat the message could not be delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatFailure {
    pub chat_id: String,
    pub reason: String,
}

/// Per-chat outcome of one relayed message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelayReport {
    pub delivered: Vec<String>,
    pub failed: Vec<ChatFailure>,
}

impl RelayReport {
    /// True when at least one chat received the message.
    pub fn is_delivered(&self) -> bool {
        !self.delivered.is_empty()
    }
}

/// Sends messages to the manager chats through the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramRelay {
    client: Client,
    config: TelegramConfig,
}

impl TelegramRelay {
    pub fn new(config: TelegramConfig, timeout: TimeoutConfig) -> Result<Self, RelayError> {
        let client = timeout
            .apply(Client::builder())
            .build()
            .map_err(|e| RelayError::Request(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    /// Send `text` to every configured chat.
    pub async fn send(&self, text: &str, kind: MessageKind) -> Result<RelayReport, RelayError> {
        if text.trim().is_empty() {
            return Err(RelayError::EmptyText);
        }
        let token = match self.config.bot_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Err(RelayError::NotConfigured),
        };
        let chats: Vec<&str> = self
            .config
            .chat_ids
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        if chats.is_empty() {
            return Err(RelayError::NotConfigured);
        }

        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            token
        );
        let text = escape_html(text);

        let mut report = RelayReport::default();
        for chat_id in chats {
            let body = SendMessage {
                chat_id,
                text: &text,
                parse_mode: "HTML",
            };
            match self.client.post(&url).json(&body).send().await {
                Ok(response) if response.status().is_success() => {
                    report.delivered.push(chat_id.to_string());
                }
                Ok(response) => {
                    let status = response.status();
                    warn!(chat_id, %status, kind = kind.as_str(), "telegram rejected message");
                    report.failed.push(ChatFailure {
                        chat_id: chat_id.to_string(),
                        reason: format!("HTTP {status}"),
                    });
                }
                Err(e) => {
                    // reqwest errors carry the URL, which embeds the token
                    let reason = e.without_url().to_string();
                    warn!(chat_id, error = %reason, kind = kind.as_str(), "telegram request failed");
                    report.failed.push(ChatFailure {
                        chat_id: chat_id.to_string(),
                        reason,
                    });
                }
            }
        }

        info!(
            kind = kind.as_str(),
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "relayed message"
        );
        Ok(report)
    }
}

/// Escape the characters HTML parse mode treats as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relay(config: TelegramConfig) -> TelegramRelay {
        TelegramRelay::new(config, TimeoutConfig::default()).unwrap()
    }

    #[test]
    fn test_is_configured() {
        let mut config = TelegramConfig::default();
        assert!(!config.is_configured());
        config.bot_token = Some("123:abc".to_string());
        assert!(!config.is_configured());
        config.chat_ids = vec!["  ".to_string()];
        assert!(!config.is_configured());
        config.chat_ids.push("973416651".to_string());
        assert!(config.is_configured());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape_html("🛒 НОВЫЙ ЗАКАЗ"), "🛒 НОВЫЙ ЗАКАЗ");
    }

    #[test]
    fn test_send_message_body() {
        let body = SendMessage {
            chat_id: "42",
            text: "hi",
            parse_mode: "HTML",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"chat_id": "42", "text": "hi", "parse_mode": "HTML"})
        );
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let relay = relay(TelegramConfig {
            bot_token: Some("t".to_string()),
            chat_ids: vec!["1".to_string()],
            ..TelegramConfig::default()
        });
        let err = relay.send("   ", MessageKind::Order).await.unwrap_err();
        assert!(matches!(err, RelayError::EmptyText));
    }

    #[tokio::test]
    async fn test_missing_configuration_rejected() {
        let err = relay(TelegramConfig::default())
            .send("hello", MessageKind::Question)
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::NotConfigured));

        let err = relay(TelegramConfig {
            bot_token: Some("t".to_string()),
            ..TelegramConfig::default()
        })
        .send("hello", MessageKind::Question)
        .await
        .unwrap_err();
        assert!(matches!(err, RelayError::NotConfigured));
    }
}
