//! 合并后的环境变量集合
//!
//! 同一个带前缀的键只保留第一次出现的定义，后续重复定义被丢弃。
//! 公共服务必须先于应用服务写入，冲突时以公共服务为准。

use super::{EnvVar, ServiceCategory, ServiceEntry};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt::Write;

/// 一个服务在输出文件中的段落
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSection {
    pub name: String,
    pub category: ServiceCategory,
    /// `None` 表示该服务的 .env 文件读取失败
    pub vars: Option<Vec<EnvVar>>,
    /// 因重复而被丢弃的键
    pub dropped: Vec<String>,
}

impl ServiceSection {
    /// 写入的变量个数
    #[must_use]
    pub fn added(&self) -> usize {
        self.vars.as_ref().map_or(0, Vec::len)
    }
}

/// 合并后的环境变量集合（按插入顺序）
#[derive(Debug, Default)]
pub struct ConsolidatedEnvSet {
    sections: Vec<ServiceSection>,
    seen: HashSet<String>,
}

impl ConsolidatedEnvSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入单个带前缀的变量，已存在的键记入 `dropped`
    fn insert(&mut self, section: &mut ServiceSection, key: String, value: String) {
        if self.seen.contains(&key) {
            section.dropped.push(key);
            return;
        }

        self.seen.insert(key.clone());
        section
            .vars
            .get_or_insert_with(Vec::new)
            .push(EnvVar::new(key, value));
    }

    /// 追加一个服务的全部变量，返回该服务的段落
    pub fn add_service(
        &mut self,
        service: &ServiceEntry,
        category: ServiceCategory,
        vars: Vec<EnvVar>,
    ) -> &ServiceSection {
        let mut section = ServiceSection {
            name: service.name.clone(),
            category,
            vars: Some(Vec::new()),
            dropped: Vec::new(),
        };

        for var in vars {
            let key = var.prefixed_key(&service.prefix);
            self.insert(&mut section, key, var.value);
        }

        self.sections.push(section);
        &self.sections[self.sections.len() - 1]
    }

    /// 记录一个读取失败的服务（只保留注释标题）
    pub fn add_failed_service(&mut self, name: &str, category: ServiceCategory) {
        self.sections.push(ServiceSection {
            name: name.to_string(),
            category,
            vars: None,
            dropped: Vec::new(),
        });
    }

    /// 按键查找
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|v| v.key == key).map(|v| v.value.as_str())
    }

    /// 唯一变量总数
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// 按插入顺序遍历所有变量
    pub fn iter(&self) -> impl Iterator<Item = &EnvVar> {
        self.sections
            .iter()
            .filter_map(|s| s.vars.as_ref())
            .flatten()
    }

    #[must_use]
    pub fn sections(&self) -> &[ServiceSection] {
        &self.sections
    }

    /// 渲染为 .env 文件内容
    ///
    /// 公共服务段落总是位于应用服务段落之前
    #[must_use]
    pub fn render(&self, generated_at: DateTime<Utc>) -> String {
        let mut out = String::new();

        out.push_str("# Consolidated .env file\n");
        let _ = writeln!(out, "# Generated on: {}", generated_at.to_rfc2822());
        out.push_str(
            "# This file was automatically generated by consolidating service-specific .env files\n",
        );
        out.push_str(
            "# DO NOT EDIT THIS FILE DIRECTLY - Edit individual service .env files instead\n\n",
        );

        out.push_str("\n# === COMMON INFRASTRUCTURE VARIABLES ===\n\n");
        self.render_category(&mut out, ServiceCategory::Common);

        out.push_str("\n# === APPLICATION-SPECIFIC VARIABLES ===\n\n");
        self.render_category(&mut out, ServiceCategory::Application);

        out
    }

    fn render_category(&self, out: &mut String, category: ServiceCategory) {
        for section in self.sections.iter().filter(|s| s.category == category) {
            let _ = writeln!(out, "# {} environment variables", section.name);

            if let Some(vars) = &section.vars {
                for var in vars {
                    let _ = writeln!(out, "{}= {}", var.key, var.value);
                }
                out.push('\n');
            }
        }
    }
}
