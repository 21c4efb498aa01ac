//! Workout plan backend.
//!
//! A minimal HTTP backend that forwards a fitness query to the Gemini API
//! and returns the generated workout plan as text. The model client is built
//! once at startup from an environment-provided credential; when the
//! credential is missing or invalid the server still runs and reports the
//! failure through its endpoints.
//!
//! # Request flow
//!
//! ```text
//! POST /api/execute {"query": "home, 30 min, dumbbells"}
//!   → validate JSON shape and query field
//!   → compose fixed system prompt + query, search grounding enabled
//!   → remote generateContent call
//!   → 200 {"success": true, "result": "<plan text>"}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`model`]: Gemini client, the `TextModel` seam, and the test mock
//! - [`prompt`]: The fixed system instruction
//! - [`generator`]: Workout plan generation
//! - [`api`]: HTTP surface (health check and execute)
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod metrics;
pub mod model;
pub mod prompt;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
