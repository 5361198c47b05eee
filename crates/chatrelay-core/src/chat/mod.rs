//! Chat orchestration for chatrelay.
//!
//! - `window`: pure selection of the recent turns sent upstream
//! - `service`: `ChatService`, which reads history, calls the provider, and
//!   commits the exchange

pub mod service;
pub mod window;
