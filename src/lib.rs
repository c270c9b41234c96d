#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "Multi-tenant todo backend: credential and token lifecycle, an identity"]
#![doc = "gate middleware, owner-scoped task and user repositories, and the HTTP"]
#![doc = "routes that tie them together. The binary in `main.rs` wires these into"]
#![doc = "a running actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
