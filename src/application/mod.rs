//! Application Layer - 应用服务
//!
//! 包含：
//! - services: 合并 .env 与改写 docker-compose 的用例实现

pub mod services;

pub use services::{ComposeRewriter, EnvConsolidator};
