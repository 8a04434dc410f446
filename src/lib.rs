pub mod agents;
pub mod app;
pub mod config;
pub mod consts;
pub mod crew;
pub mod dataset;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod llm_client;
pub mod models;
pub mod service;
pub mod summary;

#[cfg(test)]
mod test_utils;
