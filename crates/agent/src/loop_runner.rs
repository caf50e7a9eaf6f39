//! The agent reasoning loop implementation.

use crate::retry::{complete_with_retry, RetryPolicy};
use std::sync::Arc;
use toolhand_core::error::AgentError;
use toolhand_core::message::Message;
use toolhand_core::provider::{Provider, ProviderRequest};
use toolhand_core::session::Session;
use toolhand_core::tool::{ToolCall, ToolRegistry};
use tracing::{debug, info, warn};

/// Consecutive no-content, no-tool-call responses tolerated before the
/// turn is terminated instead of burning the remaining step budget.
const EMPTY_RESPONSE_LIMIT: u32 = 3;

/// The core loop that orchestrates model calls and tool execution.
pub struct AgentLoop {
    /// The completion provider
    provider: Arc<dyn Provider>,

    /// The model to request
    model: String,

    /// Temperature setting
    temperature: f32,

    /// The static tool catalog
    tools: Arc<ToolRegistry>,

    /// Backoff policy for provider calls
    retry: RetryPolicy,
}

impl AgentLoop {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            tools,
            retry,
        }
    }

    /// Process one user turn to completion.
    ///
    /// Appends the user message, then cycles model call → tool execution
    /// until the model answers in plain text or a terminal condition hits.
    /// On error the conversation keeps everything appended so far; the
    /// next turn continues from it.
    pub async fn run_turn(
        &self,
        session: &mut Session,
        user_text: &str,
    ) -> Result<String, AgentError> {
        info!(
            conversation_id = %session.conversation.id,
            messages = session.conversation.len(),
            "Processing user turn"
        );

        session.conversation.push(Message::user(user_text));
        session.conversation.truncate_to(session.max_history);

        let tool_definitions = self.tools.definitions();
        let retry = RetryPolicy {
            max_attempts: session.max_retries,
            ..self.retry.clone()
        };
        let mut empty_steps = 0u32;

        for step in 1..=session.max_steps {
            debug!(step, max_steps = session.max_steps, "Agent step");

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: session.conversation.messages.clone(),
                temperature: self.temperature,
                tools: tool_definitions.clone(),
            };

            let response = complete_with_retry(&retry, "chat_completion", || {
                self.provider.complete(request.clone())
            })
            .await?;

            let message = response.message;

            if message.tool_calls.is_empty() {
                if message.content.trim().is_empty() {
                    // No answer and no work requested. Re-poll, but give
                    // up after a few in a row — this is the known
                    // infinite-loop hazard, terminated distinctly.
                    empty_steps += 1;
                    warn!(step, empty_steps, "Model returned an empty response");
                    if empty_steps >= EMPTY_RESPONSE_LIMIT {
                        return Err(AgentError::EmptyResponses(empty_steps));
                    }
                    continue;
                }

                // Final text answer for this turn.
                let text = message.content.clone();
                session.conversation.push(message);
                return Ok(text);
            }

            empty_steps = 0;

            debug!(
                tool_count = message.tool_calls.len(),
                "Executing tool calls"
            );

            let calls = message.tool_calls.clone();
            session.conversation.push(message);

            // Sequential, in the order the model listed them. Every call
            // gets a tool message; failures become its content so the
            // model can see and react to them.
            for tc in &calls {
                let output = match serde_json::from_str(&tc.arguments) {
                    Ok(arguments) => {
                        let call = ToolCall {
                            id: tc.id.clone(),
                            name: tc.name.clone(),
                            arguments,
                        };
                        info!(tool = %tc.name, call_id = %tc.id, "Executing tool");
                        match self.tools.execute(&call).await {
                            Ok(result) => result.output,
                            Err(e) => {
                                warn!(tool = %tc.name, error = %e, "Tool execution failed");
                                format!("Error: {e}")
                            }
                        }
                    }
                    Err(e) => {
                        warn!(tool = %tc.name, error = %e, "Malformed tool arguments");
                        format!("Error: invalid tool arguments: {e}")
                    }
                };
                session
                    .conversation
                    .push(Message::tool_result(&tc.id, output));
            }

            session.conversation.truncate_to(session.max_history);
        }

        warn!(
            max_steps = session.max_steps,
            "Step budget exhausted without a final response"
        );
        Err(AgentError::StepLimit(session.max_steps))
    }
}
