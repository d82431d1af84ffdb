//! CLI 参数定义

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// deployment - 合并服务 .env 并生成 docker-compose 文件
#[derive(Parser, Debug)]
#[command(
    name = "deployment",
    version,
    about = "合并各服务的 .env 文件并生成 docker-compose.yml",
    long_about = "按服务前缀合并 .env 文件，并根据合并结果改写 docker-compose 模板中的 environment 与 ports",
    after_help = "示例:\n  deployment env -d -o .env -f\n  deployment env -d -o .env --dir ./services\n  deployment update -t docker-compose.template.yml --env .env -o docker-compose.yml --dir ./services"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 详细输出模式
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// 合并各服务的 .env 文件
    Env {
        /// 合并后的 .env 输出路径
        #[arg(short, long, default_value = ".env")]
        output: PathBuf,
        /// 输出文件已存在时直接覆盖
        #[arg(short, long)]
        force: bool,
        /// 服务配置文件路径
        #[arg(short, long, default_value = "services-config.yaml")]
        config: PathBuf,
        /// 自动发现服务目录
        #[arg(short = 'd', long = "discover")]
        discover: bool,
        /// 发现服务的目录（默认：当前目录）
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// 根据合并后的 .env 改写 docker-compose 模板
    Update {
        /// 合并后的 .env 文件路径
        #[arg(long, default_value = ".env")]
        env: PathBuf,
        /// 输出路径（默认：项目根目录下的 docker-compose.yml）
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// 输出文件已存在时直接覆盖
        #[arg(short, long)]
        force: bool,
        /// 模板文件路径（默认：项目根目录下的 docker-compose.template.yml）
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// 服务目录（默认：当前目录）
        #[arg(long)]
        dir: Option<PathBuf>,
        /// 服务配置文件路径
        #[arg(short, long, default_value = "services-config.yaml")]
        config: PathBuf,
    },
}

/// 需要兼容单横线写法的长参数
const SINGLE_DASH_LONG: [&str; 2] = ["dir", "env"];

/// 兼容单横线长参数：`-dir` → `--dir`，`-env=.env` → `--env=.env`
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(text) if is_single_dash_long(text) => OsString::from(format!("-{}", text)),
            _ => arg,
        })
        .collect()
}

fn is_single_dash_long(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    SINGLE_DASH_LONG.contains(&name)
}

/// 打印用法到标准输出
pub fn print_usage() {
    println!("{}", Cli::command().render_help());
}

/// 处理参数解析失败：帮助和版本正常输出，其余错误连同用法一起打印到标准输出
pub fn print_parse_error(err: &clap::Error) {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
        }
        ErrorKind::InvalidSubcommand => {
            println!("{}", err.render());
            print_usage();
        }
        _ => println!("{}", err.render()),
    }
}
