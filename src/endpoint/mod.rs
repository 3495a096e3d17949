//! 端点管理模块
//!
//! 提供端点连接能力抽象、Redis连接实现和端点注册表

pub mod connection;
pub mod registry;

// 重新导出主要类型
pub use connection::{ProbeConnection, RedisProbeConnection};
pub use registry::{Endpoint, EndpointRegistry};
