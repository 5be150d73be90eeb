//! HTTP transport for the Autodiscover service
//!
//! Serves the health probe and hands every other request to the autodiscover handler.

pub mod handlers;
