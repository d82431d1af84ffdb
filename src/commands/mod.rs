//! 命令处理器
//!
//! 每个命令一个模块，实现 CommandHandler trait

use crate::domain::error::Result;
use crate::domain::ports::Confirm;
use crate::infrastructure::paths::ProjectRoot;
use std::path::Path;

pub mod env;
pub mod update;

pub use env::EnvCommand;
pub use update::UpdateCommand;

/// 命令上下文
pub struct CommandContext<'a> {
    pub verbose: bool,
    pub root: ProjectRoot,
    /// 输出文件已存在时的覆盖确认
    pub confirm: &'a dyn Confirm,
}

impl CommandContext<'_> {
    /// 输出文件已存在且未强制覆盖时询问用户
    ///
    /// 返回 `false` 表示用户取消
    pub fn confirm_overwrite(&self, output: &Path, force: bool) -> bool {
        if force || !output.exists() {
            return true;
        }

        let prompt = format!("输出文件 {} 已存在，是否覆盖？", output.display());
        if self.confirm.confirm(&prompt) {
            return true;
        }

        println!("操作已取消");
        false
    }
}

/// 命令执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Completed,
    /// 用户拒绝覆盖，未写入任何文件
    Cancelled,
}

/// 命令处理器 trait
pub trait CommandHandler {
    /// 执行命令
    fn execute(&self, ctx: &CommandContext) -> Result<CommandOutcome>;
}
