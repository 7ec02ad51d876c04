//! Server crate for the CineMatch recommendation engine.
//!
//! This crate contains the orchestrator that coordinates all components
//! of the recommendation pipeline.

pub mod orchestrator;

pub use orchestrator::{Recommendation, RecommendationOrchestrator};
