//! docker-compose 文档
//!
//! 以通用 YAML 结构保存整个文档，只改写服务的 `environment` 和 `ports`，
//! 其余字段（包括顶层的 `version`、`networks`、`volumes` 和扩展字段）原样保留。

use crate::domain::error::{DomainError, Result};
use serde_yaml::{Mapping, Value};

const SERVICES: &str = "services";

#[derive(Debug, Clone, PartialEq)]
pub struct ComposeDocument {
    root: Mapping,
}

impl ComposeDocument {
    /// 解析 YAML 文本，顶层必须是映射
    pub fn parse(content: &str) -> Result<Self> {
        match serde_yaml::from_str::<Value>(content)? {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self {
                root: Mapping::new(),
            }),
            _ => Err(DomainError::Config(
                "docker-compose 模板顶层必须是映射".to_string(),
            )),
        }
    }

    /// 是否包含 `services` 映射
    #[must_use]
    pub fn has_services(&self) -> bool {
        matches!(self.root.get(SERVICES), Some(Value::Mapping(_)))
    }

    /// 按文档顺序列出服务名称
    #[must_use]
    pub fn service_names(&self) -> Vec<String> {
        match self.root.get(SERVICES) {
            Some(Value::Mapping(services)) => services
                .keys()
                .filter_map(|k| k.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// 读取服务的某个字段
    #[must_use]
    pub fn service_field(&self, service: &str, field: &str) -> Option<&Value> {
        self.root
            .get(SERVICES)?
            .as_mapping()?
            .get(service)?
            .as_mapping()?
            .get(field)
    }

    /// 用字符串序列替换服务的 `environment`
    pub fn set_environment(&mut self, service: &str, entries: Vec<String>) -> bool {
        self.set_string_list(service, "environment", entries)
    }

    /// 用字符串序列替换服务的 `ports`
    pub fn set_ports(&mut self, service: &str, entries: Vec<String>) -> bool {
        self.set_string_list(service, "ports", entries)
    }

    fn set_string_list(&mut self, service: &str, field: &str, entries: Vec<String>) -> bool {
        let Some(Value::Mapping(services)) = self.root.get_mut(SERVICES) else {
            return false;
        };
        let Some(record) = services.get_mut(service) else {
            return false;
        };

        // `web:` 这种空服务定义按空映射处理
        if record.is_null() {
            *record = Value::Mapping(Mapping::new());
        }

        let Some(record) = record.as_mapping_mut() else {
            return false;
        };

        let list = entries.into_iter().map(Value::String).collect();
        record.insert(Value::String(field.to_string()), Value::Sequence(list));
        true
    }

    /// 序列化为 YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }
}
