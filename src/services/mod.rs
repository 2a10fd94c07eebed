pub mod advisor;
pub mod analytics;
