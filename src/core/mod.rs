pub mod error;
pub mod metrics;
pub mod registry;
pub mod router;
pub mod tool;
