//! Completion endpoint adapters for toolhand.
//!
//! One implementation: [`OpenAiCompatProvider`], which covers OpenAI,
//! OpenRouter, Ollama, vLLM, and any other endpoint that speaks the
//! `/v1/chat/completions` protocol.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
