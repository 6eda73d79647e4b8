// SPDX-License-Identifier: MPL-2.0
//! Application layer - host-facing ports.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The gallery consumes ports, never concrete adapters

pub mod port;
