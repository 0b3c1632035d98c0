use serde::Serialize;

pub const SYSTEM_PROMPT: &str = "Bạn là một trợ lý AI của trường Đại học Kinh tế - Đại học Đà Nẵng. \
Hãy trả lời câu hỏi dựa trên thông tin context dưới đây. \
Nếu không tìm thấy thông tin, hãy nói bạn không có dữ liệu phù hợp. Trả lời bằng tiếng Việt tự nhiên.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// System instruction followed by the context and the trimmed question.
pub fn build_messages(context: &str, query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: Role::System,
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: Role::User,
            content: format!("Context:\n{context}\n\nQuestion: {}", query.trim()),
        },
    ]
}
