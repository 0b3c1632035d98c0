use serde::{Deserialize, Serialize};

pub const BOT_SENDER: &str = "bot";

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct QueryResponse {
    pub answer: String,
    pub timestamp: String,
    pub sender: String,
    pub message: String,
}

impl QueryResponse {
    /// `message` mirrors `answer`; `sender` is always the bot.
    pub fn from_answer(answer: String, timestamp: String) -> Self {
        Self {
            message: answer.clone(),
            answer,
            timestamp,
            sender: BOT_SENDER.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
