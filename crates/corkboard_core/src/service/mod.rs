//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate layout, drag and editing into use-case level APIs.
//! - Keep UI/FFI layers decoupled from placement details.

pub mod board_service;
