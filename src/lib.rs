#![doc = "The `tracker` library crate."]
#![doc = ""]
#![doc = "Users, projects, and tasks behind a JWT-authenticated JSON API. This crate holds"]
#![doc = "the domain models, credential handling, routing configuration, error handling,"]
#![doc = "and database bootstrap. The binary (`main.rs`) wires them into an `HttpServer`."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
