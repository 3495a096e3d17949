//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use crate::config::types::{
    DEFAULT_INTERVAL_SECONDS, DEFAULT_OUTPUT_DIR, DEFAULT_PROBE_TIMEOUT_SECONDS,
};
use crate::config::MonitorConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Redis Vitals - Redis延迟监控工具
#[derive(Parser, Debug, Clone)]
#[command(
    name = "redis-vitals",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 端点连接串列表，按监控顺序
    #[arg(
        value_name = "CONNECTION_STRING",
        help = "Redis端点连接串（redis://主机:端口 或 主机[:端口]，可多个）"
    )]
    pub endpoints: Vec<String>,

    /// 探测间隔（秒）
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_INTERVAL_SECONDS,
        help = "探测间隔（秒）",
        env = "REDIS_VITALS_INTERVAL"
    )]
    pub interval: u64,

    /// 单次探测超时（秒）
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_PROBE_TIMEOUT_SECONDS,
        help = "单次探测超时（秒）",
        env = "REDIS_VITALS_TIMEOUT"
    )]
    pub timeout: u64,

    /// 结果输出目录
    #[arg(
        short,
        long,
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "结果输出目录",
        env = "REDIS_VITALS_OUTPUT_DIR"
    )]
    pub output_dir: PathBuf,

    /// 日志级别
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        help = "日志级别",
        env = "REDIS_VITALS_LOG_LEVEL"
    )]
    pub log_level: LogLevel,
}

impl Args {
    /// 由命令行参数构造监控运行参数
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            interval_seconds: self.interval,
            probe_timeout_seconds: self.timeout,
            output_dir: self.output_dir.clone(),
        }
    }

    /// 用法提示，端点列表为空时输出
    pub fn usage_hint() -> &'static str {
        "用法: redis-vitals <连接串1> [连接串2 ...]"
    }
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}
