//! mcp-bridge: both halves of an HTTP JSON-RPC tool protocol.
//!
//! The server half dispatches `initialize` / `tools/list` / `tools/call`
//! over an immutable tool registry; the client half speaks the same wire
//! format through a handshake-gated session and turns discovered tools
//! into callables for an agent loop.

pub mod api;
pub mod cli;
pub mod client;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
