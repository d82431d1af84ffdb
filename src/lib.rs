//! deployenv - 服务 .env 合并与 docker-compose 生成工具
//!
//! 分层结构：
//! - domain: 领域实体、错误类型与交互接口
//! - application: 合并 .env / 改写 docker-compose 的用例
//! - infrastructure: 文件、注册表、终端与日志
//! - commands: 命令处理器

// 领域层
pub mod domain;

// 应用层
pub mod application;

// 基础设施层
pub mod infrastructure;

// 命令层
pub mod commands;

// CLI 定义
pub mod cli;

// 应用程序容器
pub mod app;

#[cfg(test)]
pub mod test_utils;

// 重新导出常用类型
pub use application::services::{ComposeRewriter, DiscoveryMode, EnvConsolidator};
pub use domain::{ComposeDocument, ConsolidatedEnvSet, DomainError, EnvVar, Result, ServiceEntry};
pub use infrastructure::{ProjectRoot, ServiceRegistry};
