//! 应用程序容器
//!
//! 负责构造项目根目录和交互能力，并把 CLI 命令分派给对应的处理器

use crate::application::services::DiscoveryMode;
use crate::cli::Commands;
use crate::commands::{CommandContext, CommandHandler, CommandOutcome, EnvCommand, UpdateCommand};
use crate::domain::error::Result;
use crate::domain::ports::Confirm;
use crate::infrastructure::paths::ProjectRoot;

/// 应用程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub verbose: bool,
    pub root: ProjectRoot,
}

impl AppConfig {
    /// 以当前工作目录作为项目根目录
    pub fn from_current_dir(verbose: bool) -> Result<Self> {
        Ok(Self {
            verbose,
            root: ProjectRoot::from_current_dir()?,
        })
    }
}

/// 应用程序容器
pub struct Application<'a> {
    config: AppConfig,
    confirm: &'a dyn Confirm,
}

impl<'a> Application<'a> {
    /// 创建应用程序实例
    pub fn new(config: AppConfig, confirm: &'a dyn Confirm) -> Self {
        Self { config, confirm }
    }

    /// 把 CLI 命令转换为处理器
    #[must_use]
    pub fn handler(command: Commands) -> Box<dyn CommandHandler> {
        match command {
            Commands::Env {
                output,
                force,
                config,
                discover,
                dir,
            } => {
                let mode = if discover {
                    DiscoveryMode::AutoDiscover
                } else {
                    DiscoveryMode::Declared
                };
                Box::new(EnvCommand::new(output, force, config, mode, dir))
            }
            Commands::Update {
                env,
                output,
                force,
                template,
                dir,
                config,
            } => Box::new(UpdateCommand::new(env, output, force, template, dir, config)),
        }
    }

    /// 执行命令
    pub fn run(&self, command: Commands) -> Result<CommandOutcome> {
        let ctx = CommandContext {
            verbose: self.config.verbose,
            root: self.config.root.clone(),
            confirm: self.confirm,
        };

        Self::handler(command).execute(&ctx)
    }
}
