//! update 命令处理器：根据合并后的 .env 生成 docker-compose.yml

use super::{CommandContext, CommandHandler, CommandOutcome};
use crate::application::services::{ComposeRewriter, ConsolidatedEnv, ServiceRewrite};
use crate::domain::error::{DomainError, Result};
use crate::domain::models::ComposeDocument;
use crate::infrastructure::paths;
use crate::infrastructure::registry::ServiceRegistry;
use std::path::PathBuf;

/// 默认模板文件名（位于项目根目录）
pub const DEFAULT_TEMPLATE: &str = "docker-compose.template.yml";
/// 默认输出文件名（位于项目根目录）
pub const DEFAULT_OUTPUT: &str = "docker-compose.yml";

/// update 命令
pub struct UpdateCommand {
    env: PathBuf,
    output: Option<PathBuf>,
    force: bool,
    template: Option<PathBuf>,
    dir: Option<PathBuf>,
    config: PathBuf,
}

impl UpdateCommand {
    pub fn new(
        env: PathBuf,
        output: Option<PathBuf>,
        force: bool,
        template: Option<PathBuf>,
        dir: Option<PathBuf>,
        config: PathBuf,
    ) -> Self {
        Self {
            env,
            output,
            force,
            template,
            dir,
            config,
        }
    }
}

impl CommandHandler for UpdateCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandOutcome> {
        let root = &ctx.root;

        let discover_dir = self.dir.as_ref().map(|dir| {
            let dir = root.resolve(dir);
            println!("使用指定的服务目录: {}", dir.display());
            dir
        });

        let template = match &self.template {
            Some(template) => root.resolve(template),
            None => root.path().join(DEFAULT_TEMPLATE),
        };
        let consolidated_path = root.resolve(&self.env);
        let output = match &self.output {
            Some(output) => root.resolve(output),
            None => root.path().join(DEFAULT_OUTPUT),
        };
        let config = root.resolve(&self.config);

        tracing::debug!(root = %root.path().display(), "项目根目录");
        tracing::debug!(
            template = %template.display(),
            env = %consolidated_path.display(),
            output = %output.display(),
            "路径解析完成"
        );

        // 前置检查：任何一项失败都不写入文件
        if !paths::file_exists(&template) {
            return Err(DomainError::FileNotFound(template));
        }
        if !paths::file_exists(&consolidated_path) {
            return Err(DomainError::FileNotFound(consolidated_path));
        }
        if !ctx.confirm_overwrite(&output, self.force) {
            return Ok(CommandOutcome::Cancelled);
        }

        println!("使用模板文件: {}", template.display());
        let template_content = paths::read_file(&template)?;
        let consolidated_content = paths::read_file(&consolidated_path)?;

        let mut doc = ComposeDocument::parse(&template_content)?;
        let consolidated = ConsolidatedEnv::parse(&consolidated_content);
        tracing::debug!(count = consolidated.len(), "已读取合并后的变量");

        let registry = ServiceRegistry::load(&config);
        let rewriter = ComposeRewriter::new(&registry, root, discover_dir);
        let outcomes = rewriter.rewrite(&mut doc, &consolidated);

        paths::write_file(&output, &doc.to_yaml()?)?;

        println!("docker-compose 文件已生成: {}", output.display());
        println!(
            "服务将使用 {} 中的环境变量",
            root.relative(&consolidated_path).display()
        );

        if ctx.verbose {
            for (name, outcome) in &outcomes {
                match outcome {
                    ServiceRewrite::Skipped => println!("  {}: 未改写", name),
                    ServiceRewrite::Rewritten { environment, ports } => {
                        println!("  {}: {} 个环境变量, {} 个端口", name, environment, ports)
                    }
                }
            }
        }

        Ok(CommandOutcome::Completed)
    }
}
