//! deployment 主程序入口
//!
//! 设计原则：
//! - 模块化：入口代码简洁，逻辑委托给各模块
//! - 任何失败都只打印信息并正常退出
//! - 错误处理：详细/安静错误模式，通过 --verbose 切换

use clap::Parser;
use deployenv::app::{AppConfig, Application};
use deployenv::cli::{self, Cli};
use deployenv::infrastructure::StdinConfirm;
use deployenv::infrastructure::logging;

fn main() {
    // 解析 CLI 参数
    let cli = match Cli::try_parse_from(cli::normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            cli::print_parse_error(&e);
            return;
        }
    };

    logging::init(cli.verbose);

    let Some(command) = cli.command else {
        cli::print_usage();
        return;
    };

    // 项目根目录只在入口处确定一次
    let config = match AppConfig::from_current_dir(cli.verbose) {
        Ok(cfg) => cfg,
        Err(e) => {
            e.report(cli.verbose);
            return;
        }
    };

    let confirm = StdinConfirm;
    let app = Application::new(config, &confirm);

    if let Err(e) = app.run(command) {
        e.report(cli.verbose);
    }
}
