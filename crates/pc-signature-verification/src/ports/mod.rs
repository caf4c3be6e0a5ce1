//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API the HTTP layer calls
//! - **Outbound (Driven)**: Dependencies this engine needs

pub mod inbound;
pub mod outbound;
