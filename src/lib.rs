pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod naming;
pub mod output;
pub mod properties;
pub mod templates;
