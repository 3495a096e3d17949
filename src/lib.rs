//! Redis Vitals - Redis延迟监控工具
//!
//! 这是一个用Rust编写的Redis延迟监控工具，支持：
//! - 按固定间隔对多个Redis端点执行PING探测
//! - 端点级故障隔离（单个端点异常不影响其余端点）
//! - 追加式CSV结果记录，逐行落盘
//! - 结构化日志记录

pub mod cli;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod probe;
pub mod recorder;

// 重新导出主要类型
pub use config::{EndpointConfig, MonitorConfig};
pub use endpoint::{Endpoint, EndpointRegistry};
pub use error::RedisVitalsError;
pub use probe::{ProbeExecutor, ProbeOutcome, Row, TickScheduler};
pub use recorder::CsvRecorder;

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
