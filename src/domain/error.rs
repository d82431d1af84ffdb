//! 领域层错误类型

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomainError>;

/// 领域层错误类型
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("文件不存在: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("YAML 解析错误: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("配置错误: {0}")]
    Config(String),
}

impl DomainError {
    /// 带路径上下文的 IO 错误
    pub fn io_at(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            return DomainError::FileNotFound(path.to_path_buf());
        }
        DomainError::Io(std::io::Error::new(
            err.kind(),
            format!("{}: {}", path.display(), err),
        ))
    }

    /// 报告错误，支持详细/安静模式
    ///
    /// verbose = true 时打印完整错误链
    pub fn report(&self, verbose: bool) {
        eprintln!("错误: {}", self);

        if verbose {
            let mut current = std::error::Error::source(self);
            while let Some(next) = current {
                eprintln!("  └─ 原因: {}", next);
                current = next.source();
            }
        }
    }
}
