//! Command Handlers module
//!
//! Handlers for the multi-step identity operations. Registration is the one
//! operation that spans several writes (insert user, seed default
//! categories), so it runs inside a single database transaction.

mod auth_handler;
mod commands;


pub use auth_handler::{LoginHandler, RegisterHandler};
pub use commands::*;
