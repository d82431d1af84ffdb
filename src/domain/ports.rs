//! 交互接口定义（输出端口）

/// 覆盖确认能力
///
/// 命令在输出文件已存在且未指定 `-f` 时调用，
/// 返回 `false` 表示用户取消，不写入任何文件
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
