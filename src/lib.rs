pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod youtube;

#[cfg(test)]
mod testing;
