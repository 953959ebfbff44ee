//! OpenAI-compatible completion engine with bounded tool calling.
//!
//! Works against the OpenAI API or any compatible endpoint (including local
//! inference servers). Capability invocations requested by the model are
//! executed and fed back as tool results; a failing capability feeds its
//! error text back instead, so one dead tool does not sink the whole task.

use crate::llm::CompletionEngine;
use crate::tools::Capability;
use crate::types::{AppError, Result};
use crate::workers::WorkerProfile;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionMessageToolCalls, ChatCompletionRequestAssistantMessageArgs,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessage,
        ChatCompletionTool, ChatCompletionToolChoiceOption, ChatCompletionTools,
        CreateChatCompletionRequestArgs, FunctionObject, ToolChoiceOptions,
    },
};
use async_trait::async_trait;

const DEFAULT_MAX_TOOL_ITERATIONS: usize = 8;

/// Engine backed by an OpenAI-compatible chat completions endpoint.
pub struct OpenAiEngine {
    client: Client<OpenAIConfig>,
    model: String,
    max_tool_iterations: usize,
}

impl OpenAiEngine {
    /// Create an engine for the given endpoint and model.
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            model,
            max_tool_iterations: DEFAULT_MAX_TOOL_ITERATIONS,
        }
    }

    /// Bound the number of tool-calling rounds before the model must answer.
    pub fn with_max_tool_iterations(mut self, max_tool_iterations: usize) -> Self {
        self.max_tool_iterations = max_tool_iterations;
        self
    }

    /// The configured model name.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    fn system_prompt(profile: &WorkerProfile) -> String {
        format!(
            "You are {role}.\n\nGoal: {goal}\n\n{backstory}",
            role = profile.role,
            goal = profile.goal,
            backstory = profile.backstory
        )
    }

    /// Every capability takes one free-text query; the schema reflects that.
    fn chat_tools(capabilities: &[Capability]) -> Vec<ChatCompletionTool> {
        capabilities
            .iter()
            .map(|capability| {
                let descriptor = capability.descriptor();
                ChatCompletionTool {
                    function: FunctionObject {
                        name: descriptor.name,
                        description: Some(descriptor.description),
                        parameters: Some(serde_json::json!({
                            "type": "object",
                            "properties": {
                                "query": {
                                    "type": "string",
                                    "description": "The query to run"
                                }
                            },
                            "required": ["query"]
                        })),
                        strict: None,
                    },
                }
            })
            .collect()
    }

    fn extract_query(arguments: &str) -> String {
        serde_json::from_str::<serde_json::Value>(arguments)
            .ok()
            .and_then(|value| {
                value
                    .get("query")
                    .and_then(|q| q.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| arguments.to_string())
    }
}

#[async_trait]
impl CompletionEngine for OpenAiEngine {
    async fn run(
        &self,
        profile: &WorkerProfile,
        task_description: &str,
        capabilities: &[Capability],
    ) -> Result<String> {
        let tools = Self::chat_tools(capabilities);
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(
                Self::system_prompt(profile),
            )),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
                task_description.to_string(),
            )),
        ];

        for iteration in 0..=self.max_tool_iterations {
            let mut request_args = CreateChatCompletionRequestArgs::default();
            request_args.model(&self.model).messages(messages.clone());
            // The last round withholds the tools so the model has to answer.
            if iteration < self.max_tool_iterations && !tools.is_empty() {
                let chat_tools: Vec<ChatCompletionTools> = tools
                    .iter()
                    .cloned()
                    .map(ChatCompletionTools::Function)
                    .collect();
                request_args
                    .tools(chat_tools)
                    .tool_choice(ChatCompletionToolChoiceOption::Mode(ToolChoiceOptions::Auto));
            }
            let request = request_args
                .build()
                .map_err(|e| AppError::Completion(format!("Failed to build request: {}", e)))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| AppError::Completion(format!("Chat completion failed: {}", e)))?;

            let choice = response
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| AppError::Completion("No choices in response".to_string()))?;

            let tool_calls = choice.message.tool_calls.unwrap_or_default();
            if tool_calls.is_empty() {
                return choice
                    .message
                    .content
                    .ok_or_else(|| AppError::Completion("Response had no content".to_string()));
            }

            tracing::debug!(
                iteration,
                calls = tool_calls.len(),
                "model requested capability invocations"
            );

            messages.push(ChatCompletionRequestMessage::Assistant(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .tool_calls(tool_calls.clone())
                    .build()
                    .map_err(|e| {
                        AppError::Completion(format!("Failed to build tool-call message: {}", e))
                    })?,
            ));

            for call in &tool_calls {
                let ChatCompletionMessageToolCalls::Function(call) = call else {
                    return Err(AppError::Completion(
                        "Model requested an unsupported custom tool call".to_string(),
                    ));
                };

                let capability = capabilities
                    .iter()
                    .find(|c| c.name() == call.function.name)
                    .ok_or_else(|| {
                        AppError::Completion(format!(
                            "Model requested unknown capability '{}'",
                            call.function.name
                        ))
                    })?;

                let query = Self::extract_query(&call.function.arguments);
                let content = match capability.invoke(&query).await {
                    Ok(output) => output,
                    Err(e) => {
                        tracing::warn!(
                            capability = capability.name(),
                            error = %e,
                            "capability invocation failed"
                        );
                        format!("Tool call failed: {}", e)
                    }
                };

                messages.push(ChatCompletionRequestMessage::Tool(
                    ChatCompletionRequestToolMessageArgs::default()
                        .tool_call_id(call.id.clone())
                        .content(content)
                        .build()
                        .map_err(|e| {
                            AppError::Completion(format!(
                                "Failed to build tool-result message: {}",
                                e
                            ))
                        })?,
                ));
            }
        }

        Err(AppError::Completion(format!(
            "No final answer after {} tool iterations",
            self.max_tool_iterations
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{CapabilitySet, WebSearchTool};
    use crate::types::CapabilityKind;

    fn test_profile() -> WorkerProfile {
        WorkerProfile {
            role: "NBA Stats Researcher".to_string(),
            goal: "Research NBA statistics".to_string(),
            backstory: "Skilled with search tools".to_string(),
            capabilities: vec![CapabilityKind::WebSearch],
            task_template: "Research the following".to_string(),
            allow_delegation: false,
        }
    }

    #[test]
    fn test_system_prompt_composition() {
        let prompt = OpenAiEngine::system_prompt(&test_profile());
        assert!(prompt.contains("You are NBA Stats Researcher"));
        assert!(prompt.contains("Goal: Research NBA statistics"));
        assert!(prompt.contains("Skilled with search tools"));
    }

    #[test]
    fn test_chat_tools_mirror_capabilities() {
        let capabilities = vec![Capability::WebSearch(WebSearchTool::new())];
        let tools = OpenAiEngine::chat_tools(&capabilities);

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].function.name, "web_search");
        assert!(tools[0].function.description.is_some());
    }

    #[test]
    fn test_chat_tools_preserve_order() {
        let set = CapabilitySet::new().unwrap();
        let capabilities =
            set.for_kinds(&[CapabilityKind::SiteQuery, CapabilityKind::WebSearch]);
        let tools = OpenAiEngine::chat_tools(&capabilities);

        let names: Vec<&str> = tools.iter().map(|t| t.function.name.as_str()).collect();
        assert_eq!(names, vec!["site_query", "web_search"]);
    }

    #[test]
    fn test_extract_query_from_json_arguments() {
        assert_eq!(
            OpenAiEngine::extract_query(r#"{"query": "lakers roster"}"#),
            "lakers roster"
        );
    }

    #[test]
    fn test_extract_query_falls_back_to_raw_arguments() {
        assert_eq!(OpenAiEngine::extract_query("lakers roster"), "lakers roster");
    }
}
