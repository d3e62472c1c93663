// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Sentra Integration Tests
//!
//! Integration tests for the Sentra address-space server, organized by
//! concern:
//!
//! - `integration_space.rs`: node identity, reference symmetry, delegate
//!   chains, access policies, browse-path resolution, the node factory
//! - `integration_methods.rs`: method dispatch and argument validation
//! - `integration_monitor.rs`: monitored items, notification delivery,
//!   periodic producers
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p sentra-tests
//!
//! # Run a specific suite
//! cargo test -p sentra-tests --test integration_space
//!
//! # Run with verbose output
//! cargo test -p sentra-tests -- --nocapture
//! ```
//!
//! Shared fixtures live in [`common`].

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;
