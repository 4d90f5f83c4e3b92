//! Welfare organisation API server library.
//!
//! Exposes config, state, error handling, auth and routes so the server
//! binary, the `create-admin` tool and integration tests share one
//! definition of the application.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
