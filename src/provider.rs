use crate::config::Config;
use crate::events::{Message, Originator};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

/// Canned response used until a real backend is wired in.
pub const PLACEHOLDER_REPLY: &str =
    "I'm here to help! This is a placeholder response. We'll integrate with a real AI service soon.";

/// How long the stub pretends to think before answering.
const STUB_DELAY: Duration = Duration::from_secs(1);

/// Failures a production reply backend can surface.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("assistant backend unavailable: {0}")]
    Unavailable(String),
    #[error("assistant backend did not answer within {0} seconds")]
    Timeout(u64),
}

/// Capability that produces assistant response text for a conversation.
///
/// Every call must resolve exactly once; callers rely on that to leave the
/// composing state. Latency is unbounded by this contract, so implementations
/// are expected to enforce their own timeout.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    async fn generate_reply(&self, conversation: &[Message]) -> Result<String, ProviderError>;
}

/// Fixed-delay stand-in for a real assistant backend. Always succeeds.
#[derive(Debug, Clone)]
pub struct StubReplyProvider {
    delay: Duration,
    reply: String,
}

impl Default for StubReplyProvider {
    fn default() -> Self {
        Self {
            delay: STUB_DELAY,
            reply: PLACEHOLDER_REPLY.to_string(),
        }
    }
}

impl StubReplyProvider {
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = reply.into();
        self
    }
}

#[async_trait]
impl ReplyProvider for StubReplyProvider {
    async fn generate_reply(&self, _conversation: &[Message]) -> Result<String, ProviderError> {
        sleep(self.delay).await;
        Ok(self.reply.clone())
    }
}

/// Chat-completions backend for the configured provider endpoint.
pub struct HttpReplyProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout_secs: u64,
}

impl HttpReplyProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let api_key = config
            .get_api_key()
            .ok_or_else(|| anyhow::anyhow!("No API key configured. Please add an API key first."))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.reply_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.provider.base_url.clone(),
            model: config.provider.model.clone(),
            api_key,
            timeout_secs: config.reply_timeout_secs,
        })
    }

    fn build_messages(conversation: &[Message]) -> Vec<serde_json::Value> {
        let mut messages = vec![serde_json::json!({
            "role": "system",
            "content": SYSTEM_PROMPT,
        })];

        for message in conversation {
            let role = match message.originator {
                Originator::User => "user",
                Originator::Assistant => "assistant",
            };
            messages.push(serde_json::json!({
                "role": role,
                "content": message.content,
            }));
        }

        messages
    }
}

const SYSTEM_PROMPT: &str = "You are the RoleArc assistant. Help job seekers find roles, \
improve their profiles, and prepare for applications. Be concise and practical.";

#[async_trait]
impl ReplyProvider for HttpReplyProvider {
    async fn generate_reply(&self, conversation: &[Message]) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let payload = serde_json::json!({
            "model": self.model,
            "messages": Self::build_messages(conversation),
            "temperature": 0.7,
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_secs)
                } else {
                    ProviderError::Unavailable(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Unavailable(format!(
                "{}: {}",
                status, error_text
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(|text| text.to_string())
            .ok_or_else(|| ProviderError::Unavailable("malformed completion response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_resolves_with_placeholder() {
        let provider = StubReplyProvider::default().with_delay(Duration::ZERO);
        let reply = provider.generate_reply(&[]).await.unwrap();
        assert_eq!(reply, PLACEHOLDER_REPLY);
    }

    #[tokio::test]
    async fn stub_reply_is_overridable() {
        let provider = StubReplyProvider::default()
            .with_delay(Duration::ZERO)
            .with_reply("placeholder");
        let reply = provider.generate_reply(&[]).await.unwrap();
        assert_eq!(reply, "placeholder");
    }

    #[test]
    fn conversation_maps_to_chat_roles() {
        let conversation = vec![Message::user("find me a role"), Message::assistant("sure")];
        let messages = HttpReplyProvider::build_messages(&conversation);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "find me a role");
        assert_eq!(messages[2]["role"], "assistant");
    }

    #[test]
    fn timeout_error_names_the_bound() {
        let err = ProviderError::Timeout(30);
        assert!(err.to_string().contains("30 seconds"));
    }
}
