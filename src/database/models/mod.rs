pub mod global_streaming;
pub mod job;
pub mod mapping;
pub mod sport;
pub mod sport_config;
pub mod tenant;
