pub mod config;
pub mod dto;
pub mod errors;
pub mod grpc;
pub mod handlers;
pub mod models;
pub mod password;
pub mod revocation;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod token;

#[cfg(test)]
pub mod testutil;
