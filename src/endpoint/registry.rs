//! 端点注册表
//!
//! 将连接串解析为命名端点，并在启动时逐个建立持久连接

use crate::config::{parse_endpoint_configs, EndpointConfig};
use crate::endpoint::connection::{ProbeConnection, RedisProbeConnection};
use crate::error::ConfigError;
use std::time::Duration;
use tracing::info;

/// 单个受监控端点
///
/// 注册完成后由调用方独占持有，探测阶段以可变引用方式传递，
/// 连接句柄在进程生命周期内不重建。
pub struct Endpoint {
    /// 端点配置
    config: EndpointConfig,
    /// 持久连接句柄
    connection: Box<dyn ProbeConnection>,
}

impl Endpoint {
    /// 创建端点
    ///
    /// # 参数
    /// * `config` - 端点配置
    /// * `connection` - 已建立的连接句柄
    pub fn new(config: EndpointConfig, connection: Box<dyn ProbeConnection>) -> Self {
        Self { config, connection }
    }

    /// 展示名称
    pub fn display_name(&self) -> &str {
        &self.config.display_name
    }

    /// 原始连接串
    pub fn raw_config(&self) -> &str {
        &self.config.raw
    }

    /// 连接句柄的可变引用
    pub fn connection_mut(&mut self) -> &mut dyn ProbeConnection {
        self.connection.as_mut()
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// 端点注册表
///
/// 负责启动期的全有或全无建立：任意一条连接串解析失败或初始
/// 连接失败，整体返回错误，不会以部分端点集进入探测循环。
pub struct EndpointRegistry;

impl EndpointRegistry {
    /// 按传入顺序解析连接串并建立连接
    ///
    /// # 参数
    /// * `raws` - 原始连接串列表，必须非空
    /// * `connect_timeout` - 单个端点的连接建立超时
    ///
    /// # 返回
    /// * `Result<Vec<Endpoint>, ConfigError>` - 注册顺序的端点列表
    pub async fn build(
        raws: &[String],
        connect_timeout: Duration,
    ) -> Result<Vec<Endpoint>, ConfigError> {
        let configs = parse_endpoint_configs(raws)?;

        let mut endpoints = Vec::with_capacity(configs.len());
        for config in configs {
            let connection = RedisProbeConnection::connect(&config, connect_timeout).await?;
            info!("Monitoring: {}", config.display_name);
            endpoints.push(Endpoint::new(config, Box::new(connection)));
        }

        Ok(endpoints)
    }
}
