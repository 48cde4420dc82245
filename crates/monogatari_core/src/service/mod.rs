//! Use-case services over the document model.
//!
//! # Responsibility
//! - Orchestrate assembler, dirty-state and store calls into shell-level
//!   flows.
//! - Keep the CLI and any future UI decoupled from codec details.

pub mod dirty_state;
pub mod session;
pub mod template_service;
