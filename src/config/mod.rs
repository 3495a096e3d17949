//! 配置管理模块
//!
//! 提供端点连接串解析和运行参数配置

pub mod types;

// 重新导出主要类型
pub use types::{parse_endpoint_configs, EndpointConfig, MonitorConfig};
