//! Zscaler MCP Server Library
//!
//! A Model Context Protocol (MCP) server for Zscaler Internet Access (ZIA).
//! Provides tools for firewall network services, URL categories, devices and
//! Cloud App Control via the ZIA API.

pub mod config;
pub mod error;
pub mod launcher;
pub mod mcp;
pub mod zia;

pub use config::Config;
pub use error::{Result, ZiaMcpError};
