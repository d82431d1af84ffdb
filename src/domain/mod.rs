//! Domain Layer - 核心业务逻辑
//!
//! 包含：
//! - models: 领域实体
//! - ports: 交互接口（输出端口）
//! - error: 领域错误类型

pub mod error;
pub mod models;
pub mod ports;

pub use error::{DomainError, Result};
pub use models::{ComposeDocument, ConsolidatedEnvSet, EnvVar, ServiceCategory, ServiceEntry};
pub use ports::Confirm;
