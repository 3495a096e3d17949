//! 端点连接能力抽象
//!
//! 定义最小往返探测接口，并提供基于redis客户端的实现

use crate::config::EndpointConfig;
use crate::error::ConfigError;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::Client;
use std::time::Duration;
use tracing::debug;

/// 连接能力trait，定义单次往返探测接口
///
/// 实现方只负责发出一次最小往返请求并报告成败，计时与超时控制
/// 由探测执行器完成。失败后连接句柄按原样保留，下一轮继续复用，
/// 本层不做隐式重连。
#[async_trait]
pub trait ProbeConnection: Send {
    /// 执行一次最小往返请求
    ///
    /// # 返回
    /// * `Result<(), String>` - 成功为空，失败为人类可读的故障描述
    async fn round_trip(&mut self) -> Result<(), String>;
}

/// 基于redis多路复用连接的实现
///
/// 连接在注册阶段一次性建立，进程生命周期内持有。
pub struct RedisProbeConnection {
    /// 多路复用异步连接
    connection: MultiplexedConnection,
}

impl RedisProbeConnection {
    /// 建立到端点的连接
    ///
    /// 解析失败或初始连接失败都归入启动期配置错误，由调用方
    /// 整体终止启动。
    ///
    /// # 参数
    /// * `config` - 端点配置
    /// * `connect_timeout` - 连接建立超时
    ///
    /// # 返回
    /// * `Result<Self, ConfigError>` - 连接实例
    pub async fn connect(
        config: &EndpointConfig,
        connect_timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let client = Client::open(config.url.as_str()).map_err(|e| ConfigError::ParseError {
            config: config.raw.clone(),
            reason: e.to_string(),
        })?;

        debug!("建立端点连接: {}", config.display_name);

        let connection =
            match tokio::time::timeout(connect_timeout, client.get_multiplexed_async_connection())
                .await
            {
                Ok(Ok(connection)) => connection,
                Ok(Err(e)) => {
                    return Err(ConfigError::ConnectionError {
                        config: config.raw.clone(),
                        reason: format_redis_error(&e),
                    })
                }
                Err(_) => {
                    return Err(ConfigError::ConnectionError {
                        config: config.raw.clone(),
                        reason: format!("connect timeout after {}s", connect_timeout.as_secs()),
                    })
                }
            };

        Ok(Self { connection })
    }
}

#[async_trait]
impl ProbeConnection for RedisProbeConnection {
    async fn round_trip(&mut self) -> Result<(), String> {
        let reply: String = redis::cmd("PING")
            .query_async(&mut self.connection)
            .await
            .map_err(|e| format_redis_error(&e))?;

        if reply == "PONG" {
            Ok(())
        } else {
            Err(format!("unexpected PING reply: {reply}"))
        }
    }
}

/// 格式化redis错误信息，使其更加清晰易读
fn format_redis_error(error: &redis::RedisError) -> String {
    if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connection_refusal() {
        "Connection refused".to_string()
    } else if error.is_connection_dropped() {
        "Connection reset".to_string()
    } else if error.is_io_error() {
        format!("IO error: {error}")
    } else {
        format!("Redis error: {error}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointConfig;

    #[tokio::test]
    async fn test_connect_refused_is_configuration_error() {
        // 端口1上没有监听者，初始连接应立即失败
        let config = EndpointConfig::parse("127.0.0.1:1").unwrap();
        let result = RedisProbeConnection::connect(&config, Duration::from_secs(2)).await;

        match result {
            Err(ConfigError::ConnectionError { config, .. }) => {
                assert_eq!(config, "127.0.0.1:1");
            }
            Err(other) => panic!("期望 ConnectionError, 实际 {other:?}"),
            Ok(_) => panic!("期望 ConnectionError, 实际连接成功"),
        }
    }

    #[tokio::test]
    async fn test_connect_invalid_url_is_parse_error() {
        let config = EndpointConfig {
            raw: "redis://".to_string(),
            display_name: "bad".to_string(),
            url: "redis://".to_string(),
        };
        let result = RedisProbeConnection::connect(&config, Duration::from_secs(1)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connect_timeout_is_configuration_error() {
        // 不可路由地址触发连接超时
        let config = EndpointConfig::parse("10.255.255.1:6379").unwrap();
        let result = RedisProbeConnection::connect(&config, Duration::from_millis(100)).await;

        match result {
            Err(ConfigError::ConnectionError { reason, .. }) => {
                assert!(!reason.is_empty());
            }
            Err(other) => panic!("期望 ConnectionError, 实际 {other:?}"),
            Ok(_) => panic!("期望 ConnectionError, 实际连接成功"),
        }
    }
}
