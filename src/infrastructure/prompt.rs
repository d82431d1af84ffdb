//! 终端交互确认

use crate::domain::ports::Confirm;
use std::io::{self, BufRead, Write};

/// 从标准输入读取一行回答，只有 `y`/`Y` 表示同意
pub struct StdinConfirm;

impl StdinConfirm {
    /// 判断回答是否为同意
    #[must_use]
    pub fn is_yes(answer: &str) -> bool {
        answer.trim().eq_ignore_ascii_case("y")
    }
}

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} (y/n): ", prompt);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => Self::is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "读取确认输入失败");
                false
            }
        }
    }
}
