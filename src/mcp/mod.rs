//! MCP (Model Context Protocol) module
//!
//! Implements the MCP server protocol for tool invocation.

pub mod args;
pub mod policy;
pub mod server;
pub mod tools;
pub mod types;
