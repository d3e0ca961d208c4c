pub mod advisory;
pub mod config;
pub mod labels;
pub mod record;
pub mod stats;
