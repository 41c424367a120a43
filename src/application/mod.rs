// SPDX-License-Identifier: MPL-2.0
//! Application layer.
//!
//! - [`port`]: Decoder traits the preview and channel logic depend on
//!
//! # Dependency Rule
//!
//! Preview and channel logic call ports; `infrastructure` implements them.
//! Tests substitute their own implementations.

pub mod port;
