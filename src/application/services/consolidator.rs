//! 环境变量合并服务
//!
//! 读取每个服务目录下的 `.env`，为变量加上服务前缀后合并成一个文件。
//! 公共服务总是先于应用服务处理，同名变量以第一次出现的定义为准。

use crate::domain::error::{DomainError, Result};
use crate::domain::models::{ConsolidatedEnvSet, ServiceCategory, ServiceEntry};
use crate::infrastructure::dotenv::DotenvParser;
use crate::infrastructure::paths;
use crate::infrastructure::registry::ServiceRegistry;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// 服务 .env 文件名
pub const ENV_FILE_NAME: &str = ".env";

/// 服务发现方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMode {
    /// 使用注册表中声明的服务
    Declared,
    /// 扫描目录下所有包含 .env 的子目录
    AutoDiscover,
}

/// 待合并的服务列表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsolidationPlan {
    pub common: Vec<ServiceEntry>,
    pub app: Vec<ServiceEntry>,
}

impl ConsolidationPlan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.common.len() + self.app.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 单个类别的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    /// 至少贡献了一个变量的服务数
    pub files: usize,
    pub variables: usize,
}

/// 合并结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsolidationSummary {
    pub common: CategoryStats,
    pub app: CategoryStats,
}

impl ConsolidationSummary {
    /// 唯一变量总数
    #[must_use]
    pub fn total_variables(&self) -> usize {
        self.common.variables + self.app.variables
    }
}

/// 环境变量合并器
pub struct EnvConsolidator<'a> {
    registry: &'a ServiceRegistry,
    discover_dir: PathBuf,
}

impl<'a> EnvConsolidator<'a> {
    pub fn new(registry: &'a ServiceRegistry, discover_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            discover_dir: discover_dir.into(),
        }
    }

    /// 约定的服务 .env 路径：`{discover_dir}/{name}/.env`
    #[must_use]
    pub fn conventional_env_file(&self, name: &str) -> PathBuf {
        self.discover_dir.join(name).join(ENV_FILE_NAME)
    }

    /// 按发现方式生成服务列表
    pub fn plan(&self, mode: DiscoveryMode) -> Result<ConsolidationPlan> {
        match mode {
            DiscoveryMode::Declared => Ok(self.declared_plan()),
            DiscoveryMode::AutoDiscover => self.discover_plan(),
        }
    }

    /// 注册表中声明的服务，.env 路径强制为约定路径，缺失的服务被跳过
    #[must_use]
    pub fn declared_plan(&self) -> ConsolidationPlan {
        ConsolidationPlan {
            common: self.declared(self.registry.common_services(), ServiceCategory::Common),
            app: self.declared(self.registry.app_services(), ServiceCategory::Application),
        }
    }

    fn declared(&self, services: &[ServiceEntry], category: ServiceCategory) -> Vec<ServiceEntry> {
        services
            .iter()
            .filter_map(|service| {
                let env_file = self.conventional_env_file(&service.name);

                if !paths::file_exists(&env_file) {
                    tracing::warn!(
                        service = %service.name,
                        path = %env_file.display(),
                        "未找到服务的 env 文件，跳过"
                    );
                    return None;
                }

                tracing::debug!(service = %service.name, %category, path = %env_file.display(), "已配置服务 env 文件");
                Some(ServiceEntry {
                    env_file: env_file.to_string_lossy().into_owned(),
                    ..service.clone()
                })
            })
            .collect()
    }

    /// 扫描 `discover_dir` 的直接子目录
    ///
    /// 前缀优先取注册表中的定义，否则由目录名推导；
    /// 在注册表公共服务中出现的目录归为公共服务
    pub fn discover_plan(&self) -> Result<ConsolidationPlan> {
        let entries = std::fs::read_dir(&self.discover_dir)
            .map_err(|e| DomainError::io_at(&self.discover_dir, e))?;

        let mut dirs: Vec<(String, PathBuf)> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
            .collect();
        dirs.sort();

        let mut plan = ConsolidationPlan::default();

        for (name, dir) in dirs {
            let env_file = dir.join(ENV_FILE_NAME);
            tracing::debug!(path = %dir.display(), "检查 .env 文件");

            if !paths::file_exists(&env_file) {
                continue;
            }

            let (prefix, category) = self.resolve_discovered(&name);
            let service = ServiceEntry::new(name, env_file.to_string_lossy(), prefix);

            match category {
                ServiceCategory::Common => plan.common.push(service),
                ServiceCategory::Application => plan.app.push(service),
            }
        }

        println!(
            "发现 {} 个服务 ({} 个公共服务, {} 个应用服务)",
            plan.len(),
            plan.common.len(),
            plan.app.len()
        );

        Ok(plan)
    }

    fn resolve_discovered(&self, name: &str) -> (String, ServiceCategory) {
        let (mut prefix, category) = match self.registry.lookup(name) {
            Some((entry, category)) => (entry.prefix.clone(), category),
            None => (String::new(), ServiceCategory::Application),
        };

        if category == ServiceCategory::Common {
            tracing::debug!(service = name, "根据配置识别为公共服务");
        }

        // 公共服务没有配置前缀时，借用同名应用服务的前缀
        if prefix.is_empty() {
            if let Some(entry) = self.registry.app_services().iter().find(|s| s.name == name) {
                prefix = entry.prefix.clone();
            }
        }

        if prefix.is_empty() {
            let prefix = ServiceEntry::default_prefix(name);
            tracing::debug!(service = name, %prefix, "使用自动生成的前缀");
            return (prefix, category);
        }

        (prefix, category)
    }

    /// 读取并合并所有服务的变量
    pub fn consolidate(&self, plan: &ConsolidationPlan) -> (ConsolidatedEnvSet, ConsolidationSummary) {
        let mut set = ConsolidatedEnvSet::new();

        // 顺序决定冲突时的胜者：公共服务在前
        let common = Self::merge_category(&mut set, &plan.common, ServiceCategory::Common);
        let app = Self::merge_category(&mut set, &plan.app, ServiceCategory::Application);

        (set, ConsolidationSummary { common, app })
    }

    fn merge_category(
        set: &mut ConsolidatedEnvSet,
        services: &[ServiceEntry],
        category: ServiceCategory,
    ) -> CategoryStats {
        let mut stats = CategoryStats::default();

        for service in services {
            let env_file = Path::new(&service.env_file);
            tracing::debug!(path = %env_file.display(), "处理 .env 文件");

            let vars = match DotenvParser::parse_file(env_file) {
                Ok(vars) => vars,
                Err(e) => {
                    tracing::warn!(service = %service.name, error = %e, "处理服务 env 文件失败");
                    set.add_failed_service(&service.name, category);
                    continue;
                }
            };

            let section = set.add_service(service, category, vars);

            for key in &section.dropped {
                match category {
                    ServiceCategory::Application => {
                        tracing::warn!(service = %service.name, key = %key, "变量已在之前的服务中定义，忽略重复定义")
                    }
                    ServiceCategory::Common => {
                        tracing::debug!(service = %service.name, key = %key, "忽略重复的公共变量")
                    }
                }
            }

            let added = section.added();
            match category {
                ServiceCategory::Common => {
                    println!("已处理公共服务 {} - 添加 {} 个变量", service.env_file, added)
                }
                ServiceCategory::Application => {
                    println!("已处理 {} - 添加 {} 个变量", service.env_file, added)
                }
            }

            if added > 0 {
                stats.files += 1;
                stats.variables += added;
            }
        }

        stats
    }

    /// 将合并结果写入文件
    ///
    /// 只有输出文件无法创建时才返回错误
    pub fn write(set: &ConsolidatedEnvSet, output: &Path) -> Result<()> {
        let content = set.render(Utc::now());
        paths::write_file(output, &content)
    }
}
