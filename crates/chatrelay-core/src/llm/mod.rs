//! LLM provider abstraction for chatrelay.
//!
//! `LlmProvider` is the port concrete upstream clients implement
//! (see `chatrelay-infra::llm`).

pub mod provider;
