//! 探测模块的测试辅助设施

use crate::config::EndpointConfig;
use crate::endpoint::{Endpoint, ProbeConnection};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;

/// 按脚本返回结果的测试连接
pub(crate) struct ScriptedConnection {
    /// 每次往返耗费的时间
    pub delay: Duration,
    /// 依次返回的结果，耗尽后重复最后一个
    pub script: VecDeque<Result<(), String>>,
}

impl ScriptedConnection {
    pub fn always_ok(delay: Duration) -> Self {
        Self {
            delay,
            script: VecDeque::from([Ok(())]),
        }
    }

    pub fn always_err(detail: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            script: VecDeque::from([Err(detail.to_string())]),
        }
    }
}

#[async_trait]
impl ProbeConnection for ScriptedConnection {
    async fn round_trip(&mut self) -> Result<(), String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.script.len() > 1 {
            self.script.pop_front().unwrap()
        } else {
            self.script.front().cloned().unwrap_or(Ok(()))
        }
    }
}

/// 构造注入脚本连接的测试端点
pub(crate) fn test_endpoint(name: &str, connection: ScriptedConnection) -> Endpoint {
    let config = EndpointConfig::parse(&format!("{name}.example.com:6379")).unwrap();
    Endpoint::new(config, Box::new(connection))
}
