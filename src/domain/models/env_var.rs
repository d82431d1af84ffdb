//! 环境变量实体模型

/// 环境变量条目
///
/// 键区分大小写，值不做任何类型转换
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

impl EnvVar {
    /// 创建新的环境变量条目
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// 加上服务前缀后的键名
    ///
    /// 已经以前缀开头的键保持不变，不会重复加前缀
    #[must_use]
    pub fn prefixed_key(&self, prefix: &str) -> String {
        if self.key.starts_with(prefix) {
            self.key.clone()
        } else {
            format!("{}{}", prefix, self.key)
        }
    }
}
