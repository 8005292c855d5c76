pub mod agents;
pub mod commands;
pub mod config;
pub mod context;
pub mod logging;
pub mod parser;
pub mod plan;
pub mod validation;
