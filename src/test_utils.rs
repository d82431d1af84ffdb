//! 测试工具模块
//!
//! 提供统一的临时服务目录，避免测试之间共享工作目录

use crate::domain::ports::Confirm;
use crate::infrastructure::paths::ProjectRoot;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 临时服务目录
///
/// 布局与真实项目一致：`{root}/{service}/.env`
pub struct ServiceTree {
    temp_dir: TempDir,
}

impl Default for ServiceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceTree {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// 获取临时目录路径
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// 以临时目录作为项目根目录
    pub fn root(&self) -> ProjectRoot {
        ProjectRoot::new(self.path())
    }

    /// 创建 `{name}/.env`
    pub fn with_service(self, name: &str, env: &str) -> Self {
        self.write(&format!("{}/.env", name), env);
        self
    }

    /// 写入相对路径文件（自动创建父目录）
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// 读取相对路径文件
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path().join(rel)).unwrap()
    }
}

/// 预设回答的确认器，记录收到的提示
pub struct ScriptedConfirm {
    answer: bool,
    pub prompts: RefCell<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// 是否被询问过
    pub fn was_asked(&self) -> bool {
        !self.prompts.borrow().is_empty()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_tree_layout() {
        let tree = ServiceTree::new().with_service("db", "PORT=5432\n");
        assert!(tree.path().join("db").join(".env").is_file());
        assert_eq!(tree.read("db/.env"), "PORT=5432\n");
    }

    #[test]
    fn test_scripted_confirm_records_prompt() {
        let confirm = ScriptedConfirm::new(false);
        assert!(!confirm.confirm("覆盖?"));
        assert!(confirm.was_asked());
    }
}
