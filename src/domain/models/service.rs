//! 服务注册表条目

use serde::{Deserialize, Serialize};
use std::fmt;

/// 服务类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCategory {
    /// 公共基础设施服务 (数据库、消息队列等)
    Common,
    /// 应用服务
    Application,
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceCategory::Common => write!(f, "common"),
            ServiceCategory::Application => write!(f, "application"),
        }
    }
}

/// 已知服务定义
///
/// `name` 在同一注册表内唯一，加载后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub env_file: String,
    #[serde(default)]
    pub prefix: String,
}

impl ServiceEntry {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        env_file: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            env_file: env_file.into(),
            prefix: prefix.into(),
        }
    }

    /// 由目录名推导默认前缀：`my-service` → `MY_SERVICE_`
    #[must_use]
    pub fn default_prefix(name: &str) -> String {
        format!("{}_", name.replace('-', "_").to_uppercase())
    }
}
