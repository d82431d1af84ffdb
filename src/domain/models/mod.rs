//! 领域实体

pub mod compose;
pub mod consolidated;
pub mod env_var;
pub mod service;

pub use compose::ComposeDocument;
pub use consolidated::{ConsolidatedEnvSet, ServiceSection};
pub use env_var::EnvVar;
pub use service::{ServiceCategory, ServiceEntry};
