//! Session history, context windowing and chat orchestration for chatrelay.
//!
//! This crate defines the "ports" the infrastructure layer implements
//! (`LlmProvider`) along with the in-process history store and the
//! `ChatService` that ties them together. It depends only on
//! `chatrelay-types` -- never on `chatrelay-infra` or any HTTP crate.

pub mod chat;
pub mod history;
pub mod llm;
