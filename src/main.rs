//! Redis Vitals 主程序入口
//!
//! Redis延迟监控工具

use anyhow::{Context, Result};
use clap::Parser;
use redis_vitals::cli::Args;
use redis_vitals::endpoint::EndpointRegistry;
use redis_vitals::logging::{LogConfig, LoggingSystem};
use redis_vitals::probe::{ProbeExecutor, TickScheduler};
use redis_vitals::recorder::CsvRecorder;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let args = Args::parse();

    // 初始化日志系统
    let log_config = LogConfig {
        level: args.log_level.clone().into(),
        console: true,
        json_format: false,
        ..Default::default()
    };
    let _logging_system = LoggingSystem::setup_logging(log_config).context("初始化日志系统失败")?;

    info!("Redis Vitals v{} 启动", redis_vitals::VERSION);

    // 空端点列表是使用错误，在建立任何连接之前直接退出
    if args.endpoints.is_empty() {
        error!("{}", Args::usage_hint());
        return Ok(());
    }

    if let Err(e) = run_monitor(&args).await {
        error!("监控运行失败: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

/// 监控主逻辑
async fn run_monitor(args: &Args) -> Result<()> {
    let config = args.monitor_config();

    // 1. 注册端点：全部解析并建立连接，任一失败则整体终止
    let mut endpoints = EndpointRegistry::build(&args.endpoints, config.probe_timeout())
        .await
        .context("端点注册失败")?;

    // 2. 创建结果记录器，表头由端点数量固定
    let mut recorder = CsvRecorder::create(&config.output_dir, chrono::Local::now(), endpoints.len())
        .await
        .context("创建结果记录器失败")?;
    info!("结果文件: {}", recorder.path().display());

    // 3. 设置Ctrl+C信号处理
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("收到中断信号，正在停止监控...");
                let _ = shutdown_tx.send(());
            }
            Err(err) => {
                error!("监听中断信号失败: {}", err);
            }
        }
    });

    // 4. 运行探测循环
    let executor = ProbeExecutor::new(config.probe_timeout());
    let mut scheduler = TickScheduler::new(executor, config.interval());
    scheduler
        .run(&mut endpoints, &mut recorder, shutdown_rx)
        .await?;

    info!("监控已停止，共完成{}轮探测", scheduler.ticks_completed());
    Ok(())
}
