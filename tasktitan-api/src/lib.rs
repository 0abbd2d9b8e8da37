//! # TaskTitan API Server Library
//!
//! This library provides the core functionality for the TaskTitan API server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `realtime`: Feedback websocket
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod realtime;
pub mod routes;
