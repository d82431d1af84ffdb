//! env 命令处理器：合并各服务的 .env 文件

use super::{CommandContext, CommandHandler, CommandOutcome};
use crate::application::services::{DiscoveryMode, EnvConsolidator};
use crate::domain::error::Result;
use crate::infrastructure::paths;
use crate::infrastructure::registry::ServiceRegistry;
use std::path::PathBuf;

/// env 命令
pub struct EnvCommand {
    output: PathBuf,
    force: bool,
    config: PathBuf,
    mode: DiscoveryMode,
    dir: Option<PathBuf>,
}

impl EnvCommand {
    pub fn new(
        output: PathBuf,
        force: bool,
        config: PathBuf,
        mode: DiscoveryMode,
        dir: Option<PathBuf>,
    ) -> Self {
        Self {
            output,
            force,
            config,
            mode,
            dir,
        }
    }

    fn load_registry(&self, config: &std::path::Path) -> ServiceRegistry {
        match self.mode {
            DiscoveryMode::Declared => {
                println!("从 {} 加载服务配置", config.display());
                ServiceRegistry::load(config)
            }
            // 自动发现时配置文件只用于提供前缀和分类，可以不存在
            DiscoveryMode::AutoDiscover if !paths::file_exists(config) => {
                tracing::debug!(path = %config.display(), "配置文件不存在，全部使用自动生成的前缀");
                ServiceRegistry::default()
            }
            DiscoveryMode::AutoDiscover => {
                println!("自动发现服务...");
                ServiceRegistry::load(config)
            }
        }
    }
}

impl CommandHandler for EnvCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandOutcome> {
        let discover_dir = match &self.dir {
            Some(dir) => {
                let dir = ctx.root.resolve(dir);
                println!("使用指定的服务目录: {}", dir.display());
                dir
            }
            None => ctx.root.path().to_path_buf(),
        };
        let output = ctx.root.resolve(&self.output);
        let config = ctx.root.resolve(&self.config);

        tracing::debug!(root = %ctx.root.path().display(), "项目根目录");
        tracing::debug!(output = %output.display(), config = %config.display(), "路径解析完成");

        if !ctx.confirm_overwrite(&output, self.force) {
            return Ok(CommandOutcome::Cancelled);
        }

        let registry = self.load_registry(&config);
        let consolidator = EnvConsolidator::new(&registry, discover_dir);

        let plan = consolidator.plan(self.mode)?;
        if plan.is_empty() {
            tracing::warn!("没有找到任何服务的 .env 文件");
        }

        let (set, summary) = consolidator.consolidate(&plan);
        EnvConsolidator::write(&set, &output)?;

        println!("环境变量合并完成");
        println!(
            "已处理 {} 个公共基础设施 .env 文件，共 {} 个变量",
            summary.common.files, summary.common.variables
        );
        println!(
            "已处理 {} 个应用服务 .env 文件，共 {} 个变量",
            summary.app.files, summary.app.variables
        );
        println!("合并了 {} 个唯一环境变量", summary.total_variables());
        println!("合并后的 .env 文件已生成: {}", output.display());

        if ctx.verbose {
            for section in set.sections() {
                println!(
                    "  {} ({}): {} 个变量, {} 个重复",
                    section.name,
                    section.category,
                    section.added(),
                    section.dropped.len()
                );
            }
        }

        Ok(CommandOutcome::Completed)
    }
}
