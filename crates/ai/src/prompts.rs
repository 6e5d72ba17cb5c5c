//! Prompt assembly for the SQL assistants.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::ChatMessage;

pub const POLICY_MODEL: &str = "gpt-3.5-turbo-0301";
pub const EDIT_SQL_MODEL: &str = "gpt-3.5-turbo-0613";
pub const POLICY_MAX_TOKENS: u32 = 1024;
pub const EDIT_SQL_MAX_TOKENS: u32 = 2048;
pub const EDIT_SQL_FUNCTION: &str = "editSql";

const POLICY_SYSTEM_PROMPT: &str = "\
You're an Postgres expert in writing row level security policies. Your purpose is to \
generate a policy with the constraints given by the user. You will be provided a schema \
on which the policy should be applied.

The output should use the following instructions:
- The generated SQL must be valid SQL.
- Always use double apostrophe in SQL strings (eg. 'Night''s watch')
- You can use only CREATE POLICY queries, no other queries are allowed.
- You can add short explanations to your messages.
- The result should be a valid markdown. The SQL code should be wrapped in ```.
- Always use \"auth.uid()\" instead of \"current_user\".
- Only use \"WITH CHECK\" on INSERT or UPDATE policies.
- The policy name should be short text explaining the policy, enclosed in double quotes.

The output should look like this:
\"CREATE POLICY user_policy ON users FOR INSERT USING (user_name = current_user) WITH (true);\"";

const EDIT_SQL_DESCRIPTION: &str = "\
The modified SQL (must be valid SQL).
- Assume the query hasn't been executed yet
- For primary keys, always use \"id bigint primary key generated always as identity\" (not serial)
- When creating tables, always add foreign key references inline
- Prefer 'text' over 'varchar'
- Prefer 'timestamp with time zone' over 'date'
- Use vector(384) data type for any embedding/vector related query
- Always use double apostrophe in SQL strings (eg. 'Night''s watch')";

/// Conversation for the row-level-security policy assistant:
/// system prompt, optional schema context, then the user's turns.
pub fn policy_messages(history: &[ChatMessage], entity_definitions: Option<&[String]>) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(POLICY_SYSTEM_PROMPT)];

    if let Some(defs) = entity_definitions.filter(|d| !d.is_empty()) {
        messages.push(ChatMessage::user(format!(
            "Here is my database schema for reference:\n{}",
            defs.join("\n\n")
        )));
    }

    messages.extend(history.iter().cloned());
    messages
}

pub fn edit_sql_messages(sql: &str, prompt: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::user(format!("Here is my current SQL:\n{sql}")),
        ChatMessage::user(prompt),
    ]
}

/// JSON-schema function definition the model is forced to call.
pub fn edit_sql_function() -> Value {
    json!({
        "name": EDIT_SQL_FUNCTION,
        "description": "Edits a Postgres SQL query based on the user's instructions",
        "parameters": {
            "type": "object",
            "properties": {
                "sql": { "type": "string", "description": EDIT_SQL_DESCRIPTION }
            },
            "required": ["sql"]
        }
    })
}

/// Arguments the model passes to `editSql`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSqlResult {
    #[serde(default)]
    pub sql: String,
}
