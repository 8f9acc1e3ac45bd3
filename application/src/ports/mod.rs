//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod connectivity;
pub mod content_extractor;
pub mod file_store;
pub mod llm_gateway;
pub mod progress;
pub mod question_repository;
