//! Chronic disease risk screening gateway.
//!
//! The crate turns raw intake fields into the fixed numeric feature vectors
//! an external prediction service expects, submits them, and classifies the
//! returned probability into a risk tier for display.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
