//! 法医血样分析命令行工具

mod shell;

use clap::Parser;
use forense_admin::config::DEFAULT_CONFIG_FILE;
use forense_admin::{init_logging, ConfigManager, ForenseConfig};
use forense_database::{DatabasePool, DatabaseQueries};
use forense_render::{MapWriter, TerminalRenderer};
use forense_report::{Gazetteer, ReportAssembler};
use std::path::PathBuf;
use tracing::{error, info};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "forense")]
#[command(about = "法医血样数据库查询与报告工具")]
struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<String>,

    /// 数据库连接字符串（覆盖配置文件）
    #[arg(long)]
    database_url: Option<String>,

    /// 日志级别
    #[arg(short, long)]
    log_level: Option<String>,

    /// 生成地图后不打开浏览器
    #[arg(long)]
    no_browser: bool,

    /// 将图表同时导出为 SVG 的目录
    #[arg(long)]
    svg_dir: Option<PathBuf>,

    /// 打印生效配置后退出
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn apply(&self, config: &mut ForenseConfig) {
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.no_browser {
            config.output.open_browser = false;
        }
        if let Some(dir) = &self.svg_dir {
            config.output.svg_dir = Some(dir.clone());
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 显式指定的配置文件必须存在
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_FILE);
    let mut manager = ConfigManager::load(config_path, args.config.is_some())?;
    manager.update(|config| args.apply(config))?;

    if args.print_config {
        print!("{}", manager.to_toml()?);
        return Ok(());
    }

    init_logging(&manager.config().logging)?;
    info!("启动法医血样分析工具...");
    manager.log_summary();

    let config = manager.into_config();
    info!("  数据库驱动: {}", forense_database::connection::driver_name(&config.database.url));

    let pool = match DatabasePool::new(&config.database.url, config.database.connect_timeout()).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("数据库连接失败: {}", e);
            return Err(e.into());
        }
    };

    let map_writer = MapWriter::new(config.output.map_path(), config.output.open_browser);
    let renderer = TerminalRenderer::new(std::io::stdout(), config.output.bar_width, map_writer)
        .with_svg_dir(config.output.svg_dir.clone());
    let mut assembler = ReportAssembler::new(
        DatabaseQueries::new(&pool),
        renderer,
        config.labels.to_label_map(),
        Gazetteer::with_extra(&config.extra_locations()),
    );

    let mut prompter = shell::DialoguerPrompter::new();
    let result = shell::run(&mut assembler, &mut prompter, &mut std::io::stdout()).await;

    pool.close().await;
    info!("数据库连接已关闭");

    result.map_err(Into::into)
}
