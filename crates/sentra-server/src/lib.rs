// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Sentra Server
//!
//! The call-shaped boundary over the address space:
//!
//! - **Server**: read / write / call / browse / translate-browse-path and
//!   the monitored-item services, plus `post_value` / `post_event` for
//!   background producers
//! - **namespace**: base-graph population with fail-fast startup
//! - **methods**: shipped method handlers (Sqrt, GenerateEvent)
//! - **ServerConfig**: TOML-loadable configuration
//!
//! Sessions, encodings, and transport live above this crate; everything here
//! is plain function calls.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod methods;
pub mod namespace;
pub mod server;

pub use config::{ConfigError, ProducerConfig, ServerConfig};
pub use methods::{GenerateEventMethod, SqrtMethod};
pub use namespace::bootstrap;
pub use server::Server;
