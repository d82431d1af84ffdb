//! 服务注册表（services-config.yaml）
//!
//! ```yaml
//! common_services:
//!   - name: db
//!     env_file: db/.env
//!     prefix: DB_
//! services:
//!   - name: web
//!     env_file: web/.env
//!     prefix: WEB_
//! ```

use crate::domain::error::Result;
use crate::domain::models::{ServiceCategory, ServiceEntry};
use crate::infrastructure::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 注册表文件结构
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceRegistry {
    #[serde(default)]
    common_services: Vec<ServiceEntry>,
    #[serde(default, rename = "services")]
    app_services: Vec<ServiceEntry>,
}

impl ServiceRegistry {
    pub fn new(common_services: Vec<ServiceEntry>, app_services: Vec<ServiceEntry>) -> Self {
        Self {
            common_services,
            app_services,
        }
    }

    /// 加载注册表，失败时返回空注册表
    ///
    /// 文件不存在、无法读取或格式错误都只记录警告
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(registry) => registry,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "无法加载服务配置文件，使用空配置");
                Self::default()
            }
        }
    }

    /// 严格加载注册表
    pub fn try_load(path: &Path) -> Result<Self> {
        let content = paths::read_file(path)?;
        Self::parse(&content)
    }

    /// 从 YAML 文本解析
    pub fn parse(content: &str) -> Result<Self> {
        // 空文件等价于空注册表
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// 按名称查找服务：先查公共服务，再查应用服务
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<(&ServiceEntry, ServiceCategory)> {
        self.common_services
            .iter()
            .find(|s| s.name == name)
            .map(|s| (s, ServiceCategory::Common))
            .or_else(|| {
                self.app_services
                    .iter()
                    .find(|s| s.name == name)
                    .map(|s| (s, ServiceCategory::Application))
            })
    }

    /// 服务前缀，未注册时为空字符串
    #[must_use]
    pub fn prefix_of(&self, name: &str) -> &str {
        self.lookup(name).map_or("", |(s, _)| s.prefix.as_str())
    }

    #[must_use]
    pub fn common_services(&self) -> &[ServiceEntry] {
        &self.common_services
    }

    #[must_use]
    pub fn app_services(&self) -> &[ServiceEntry] {
        &self.app_services
    }

    /// 所有公共服务名称
    pub fn common_names(&self) -> impl Iterator<Item = &str> {
        self.common_services.iter().map(|s| s.name.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.common_services.is_empty() && self.app_services.is_empty()
    }
}
