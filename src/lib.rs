pub mod aggregator;
pub mod cli;
pub mod config;
pub mod policy;
pub mod render;
pub mod report;
pub mod util;
