//! Infrastructure layer for chatrelay.
//!
//! Contains implementations of the ports defined in `chatrelay-core`:
//! the OpenAI-compatible upstream client, plus configuration file loading
//! and API key resolution.

pub mod config;
pub mod llm;
