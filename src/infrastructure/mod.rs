//! Infrastructure Layer - 技术实现
//!
//! 包含：
//! - paths: 项目根目录与路径工具
//! - dotenv: .env 文件解析
//! - registry: 服务注册表加载
//! - prompt: 终端确认
//! - logging: 日志初始化

pub mod dotenv;
pub mod logging;
pub mod paths;
pub mod prompt;
pub mod registry;

pub use dotenv::DotenvParser;
pub use paths::ProjectRoot;
pub use prompt::StdinConfirm;
pub use registry::ServiceRegistry;
