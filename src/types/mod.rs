pub mod config;
pub mod metadata;
pub mod report;
pub mod scoring;
