pub mod api;
pub mod config;
pub mod error;
pub mod invoker;
pub mod orchestrator;
pub mod outcome;
pub mod response;
pub mod strategy;
pub mod tally;
