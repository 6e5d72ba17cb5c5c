use serde::Deserialize;

use studio_ai::ChatMessage;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyChatRequest {
    pub messages: Option<Vec<ChatMessage>>,
    pub entity_definitions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct EditSqlRequest {
    pub prompt: Option<String>,
    pub sql: Option<String>,
}
