//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// Redis Vitals 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum RedisVitalsError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 结果记录相关错误
    #[error("结果记录错误: {0}")]
    Recorder(#[from] RecorderError),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
///
/// 启动期故障属于致命错误：任何一个端点的配置解析或初始连接失败，
/// 整个启动失败，不会以部分端点集开始监控。
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 连接串解析错误
    #[error("连接串解析失败: {config}: {reason}")]
    ParseError { config: String, reason: String },

    /// 初始连接建立错误
    #[error("端点初始连接失败: {config}: {reason}")]
    ConnectionError { config: String, reason: String },

    /// 端点列表为空
    #[error("未提供任何端点连接串")]
    NoEndpoints,
}

/// 结果记录错误类型
///
/// 落盘失败不可静默丢行，一律终止本次运行。
#[derive(Error, Debug)]
pub enum RecorderError {
    /// 输出目录创建失败
    #[error("创建输出目录失败: {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    /// 结果文件创建失败
    #[error("创建结果文件失败: {path}: {source}")]
    CreateFile {
        path: String,
        source: std::io::Error,
    },

    /// 行写入或落盘失败
    #[error("结果行写入失败: {0}")]
    WriteRow(#[source] std::io::Error),

    /// 行字段数与表头不一致
    #[error("结果行字段数不匹配: 期望 {expected} 个端点, 实际 {actual} 个")]
    ColumnMismatch { expected: usize, actual: usize },
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, RedisVitalsError>;
