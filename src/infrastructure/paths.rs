//! 路径管理工具
//!
//! 所有相对路径都相对于入口处确定的 [`ProjectRoot`] 解析，
//! 辅助函数内部不读取进程当前目录。

use crate::domain::error::{DomainError, Result};
use std::path::{Path, PathBuf};

/// 项目根目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// 以当前工作目录作为项目根目录
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| DomainError::Config(format!("无法获取当前目录: {}", e)))?;
        Ok(Self(cwd))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// 解析路径
    ///
    /// - 绝对路径原样返回
    /// - `./x` 去掉 `./` 后拼接到根目录
    /// - 其他相对路径（包括 `../x`）直接拼接
    #[must_use]
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            return path.to_path_buf();
        }

        let trimmed = path.strip_prefix(".").unwrap_or(path);
        self.0.join(trimmed)
    }

    /// 相对于根目录的显示路径，无法计算时返回原路径
    #[must_use]
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.0).unwrap_or(path)
    }
}

/// 检查文件是否存在
pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// 读取文件内容，返回错误时提供详细信息
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| DomainError::io_at(path, e))
}

/// 写入文件（直接覆盖）
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| DomainError::io_at(path, e))
}
