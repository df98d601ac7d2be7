pub mod browse;
pub mod dataset;
pub mod prompt;
pub mod stats;
