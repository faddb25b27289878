//! Static guidance prompts for LLM clients.

use rmcp::model::{ErrorData, GetPromptResult, ListPromptsResult, Prompt, PromptMessage, PromptMessageRole};

use crate::server::errors::not_found_error;

pub const AUTHENTICATION_PROMPT: &str = "AUTHENTICATION REQUIRED
Linked API needs two tokens on every request:
- linked-api-token: your Linked API access token
- identification-token: the identification token of the LinkedIn account to act as

HOW TO PROVIDE THEM:
1. Get both tokens at https://linkedapi.io
2. HTTP transport: send them as `linked-api-token` and `identification-token` headers (or query parameters of the same name)
3. stdio transport: set LINKED_API_TOKEN and IDENTIFICATION_TOKEN in the server environment
4. Never paste tokens into chat, logs or error reports

Setup guide: https://linkedapi.io/mcp/installation/";

const PARAMETER_USAGE: &str = "WHEN TO USE OPTIONAL PARAMETERS

FAST:
- basic person or company info (no retrieve* flags)
- simple searches
- sending messages and connection requests

SLOW:
- retrievePosts, retrieveComments, retrieveReactions
- retrieveEmployees, retrieveDMs
- searches with many filters

VERY SLOW:
- several retrieve* flags at once
- large employee lists or long post histories

Only enable what the user explicitly asked for.";

const BACKGROUND_WORKFLOWS: &str = "BACKGROUND WORKFLOWS

Linked API actions drive a real LinkedIn session and often take several minutes. When a call takes longer than the client can wait, the server answers with:
{
  \"message\": \"...\",
  \"workflowId\": \"account-12345-abcde\",
  \"operationName\": \"searchCompanies\"
}

This is not an error. The workflow keeps running remotely.

WHAT TO DO:
1. Call get_workflow_result with the exact workflowId and operationName from that message
2. If it answers with the same kind of message, call get_workflow_result again
3. Repeat until the final result arrives

NEVER re-run the original tool: that starts a second, duplicate workflow (a second message, a second connection request).
operationName is required; without it the result cannot be decoded.

Example call:
{
  \"name\": \"get_workflow_result\",
  \"arguments\": {\"workflowId\": \"account-12345-abcde\", \"operationName\": \"searchCompanies\"}
}

Tell the user the operation is still running and that you are waiting for it.";

/// Server instructions sent during initialization.
pub fn server_instructions() -> String {
    format!("{}\n\n{BACKGROUND_WORKFLOWS}\n\n{AUTHENTICATION_PROMPT}", performance_guidelines())
}

fn performance_guidelines() -> &'static str {
    "You are connected to the Linked API MCP server, which reads LinkedIn data and performs LinkedIn actions.

PERFORMANCE:
- Start with basic requests, e.g. fetch_person(personUrl) returns name, headline and current company quickly
- Set retrieveExperience, retrievePosts, retrieveEmployees and similar flags only when the user asks for that data
- Each extra flag adds a follow-up action and noticeably increases execution time

Long operations continue in the background; use get_workflow_result to wait for them (see the background_workflows prompt)."
}

struct PromptSpec {
    name: &'static str,
    description: &'static str,
}

const PROMPTS: &[PromptSpec] = &[
    PromptSpec {
        name: "performance_guidelines",
        description: "Performance guidelines for Linked API MCP tools",
    },
    PromptSpec {
        name: "parameter_usage",
        description: "When to use optional parameters in Linked API requests",
    },
    PromptSpec {
        name: "background_workflows",
        description: "How to follow long-running workflows with get_workflow_result",
    },
    PromptSpec {
        name: "authentication_requirements",
        description: "How to authenticate with the Linked API MCP server",
    },
];

pub fn list_prompts() -> ListPromptsResult {
    ListPromptsResult::with_all_items(PROMPTS.iter().map(prompt_definition).collect())
}

pub fn get_prompt(name: &str) -> Result<GetPromptResult, ErrorData> {
    let content = match name {
        "performance_guidelines" => performance_guidelines(),
        "parameter_usage" => PARAMETER_USAGE,
        "background_workflows" => BACKGROUND_WORKFLOWS,
        "authentication_requirements" => AUTHENTICATION_PROMPT,
        _ => {
            return Err(not_found_error(
                "PROMPT_NOT_FOUND",
                format!("prompt '{name}' was not found"),
                serde_json::json!({ "name": name }),
                "Call prompts/list to inspect available prompts.",
            ));
        }
    };

    Ok(GetPromptResult {
        description: Some(format!("Linked API MCP: {}", name.replace('_', " "))),
        messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
    })
}

fn prompt_definition(spec: &PromptSpec) -> Prompt {
    Prompt {
        name: spec.name.to_string(),
        title: None,
        description: Some(spec.description.to_string()),
        arguments: None,
        icons: None,
        meta: None,
    }
}
