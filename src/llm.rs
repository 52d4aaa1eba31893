use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "openai/gpt-oss-20b";

pub const SYSTEM_PROMPT: &str = "Answer using the given context only.";

pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl LlmConfig {
    /// Loads the configuration from the environment, reading a local `.env`
    /// file first. A missing API key is a fatal startup error.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("OPENAI_API_KEY is not set"))?;
        let base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(LlmConfig {
            api_key,
            base_url,
            model,
            temperature: 0.0,
        })
    }
}

/// Chat completion against a system + user prompt. The loop depends on this
/// trait so tests can substitute a stub for the hosted endpoint.
pub trait ChatModel {
    fn chat(&self, system: &str, user: &str) -> Result<String>;
}

/// Blocking client for an OpenAI-compatible chat-completion endpoint.
pub struct LlmClient {
    http: reqwest::blocking::Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Self {
        LlmClient {
            http: reqwest::blocking::Client::new(),
            config,
        }
    }
}

impl ChatModel for LlmClient {
    fn chat(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()?
            .error_for_status()?;

        let body: ChatResponse = response.json()?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("completion response contained no choices"))
    }
}

/// Embeds the retrieved context and the question into the single user
/// message the model sees.
pub fn build_user_message(context: &str, question: &str) -> String {
    format!("Context: {context}\nQuestion: {question}")
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_user_message() {
        let message = build_user_message("The sky is blue.\nWater is wet.", "What color is the sky?");
        assert_eq!(
            message,
            "Context: The sky is blue.\nWater is wet.\nQuestion: What color is the sky?"
        );
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "openai/gpt-oss-20b",
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: "Context: x\nQuestion: y",
                },
            ],
            temperature: 0.0,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "openai/gpt-oss-20b");
        assert_eq!(value["temperature"], 0.0);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "Blue."},
                    "finish_reason": "stop"
                }
            ]
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "Blue.");
    }
}
