//! .env 格式解析器 (简单原则：透明的文本解析)

use crate::domain::error::Result;
use crate::domain::models::EnvVar;
use crate::infrastructure::paths;
use std::collections::HashMap;
use std::path::Path;

/// .env 格式解析器
///
/// 这种简化的解析器处理常见场景
///
/// # 示例
/// ```text
/// # Database configuration
/// DB_HOST=localhost
/// DB_PORT=5432
/// EMPTY_VALUE=
/// VALUE_WITH_SPACES = hello world
/// URL=postgres://u:p@host/db?sslmode=disable
/// ```
pub struct DotenvParser;

impl DotenvParser {
    /// 解析单行
    ///
    /// 规则：
    /// - 去掉首尾空白后，空行和以 # 开头的注释行被忽略
    /// - 以第一个 `=` 分割键和值，键和值各自去掉首尾空白
    /// - 没有 `=` 的行被忽略
    /// - 不支持引号、转义和多行值
    #[must_use]
    pub fn parse_line(line: &str) -> Option<EnvVar> {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (key, value) = line.split_once('=')?;
        let key = key.trim();

        if key.is_empty() {
            tracing::debug!(line, "跳过空键名的行");
            return None;
        }

        Some(EnvVar::new(key, value.trim()))
    }

    /// 解析 .env 文件内容，保留文件中的顺序（包括重复键）
    #[must_use]
    pub fn parse(content: &str) -> Vec<EnvVar> {
        content.lines().filter_map(Self::parse_line).collect()
    }

    /// 解析为去重后的列表：保留键第一次出现的位置，值取最后一次定义
    #[must_use]
    pub fn parse_unique(content: &str) -> Vec<EnvVar> {
        let mut vars: Vec<EnvVar> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for var in Self::parse(content) {
            match index.get(&var.key) {
                Some(&i) => vars[i].value = var.value,
                None => {
                    index.insert(var.key.clone(), vars.len());
                    vars.push(var);
                }
            }
        }

        vars
    }

    /// 读取并解析 .env 文件
    pub fn parse_file(path: &Path) -> Result<Vec<EnvVar>> {
        let content = paths::read_file(path)?;
        Ok(Self::parse(&content))
    }
}
