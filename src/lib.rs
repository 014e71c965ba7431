// SPDX-License-Identifier: MIT

//! Vendoora MCP tool servers.
//!
//! Three tool families (AI coding assistant, analytics, visual analysis) are
//! exposed over a stdio MCP transport. The [`core`] module holds the tool
//! router and result envelope shared by all of them.

pub mod browser;
pub mod config;
pub mod core;
pub mod llm;
pub mod server;
pub mod tools;
