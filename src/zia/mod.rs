//! ZIA API module
//!
//! Contains types, authentication, and client for interacting with the
//! Zscaler Internet Access API.

pub mod auth;
pub mod client;
pub mod cloud_app_control;
pub mod devices;
pub mod firewall;
pub mod types;
pub mod url_categories;
pub mod utils;
