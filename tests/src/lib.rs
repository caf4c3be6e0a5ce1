//! # Purchases-Core Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks for the verification hot path
//! └── integration/      # Whole-engine flows through the public API
//!     ├── e2e.rs          # Captured responses, tampering, 304 handling
//!     ├── concurrency.rs  # Shared engine across worker threads
//!     └── modes.rs        # Mode gating, overrides, configuration
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p pc-tests
//!
//! # By category
//! cargo test -p pc-tests integration::concurrency::
//!
//! # Benchmarks
//! cargo bench -p pc-tests
//! ```

pub mod benchmarks;
pub mod integration;
