//! 探测执行器
//!
//! 对单个端点执行一次带超时的往返探测并测量耗时

use crate::endpoint::Endpoint;
use crate::probe::outcome::ProbeOutcome;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{error, info};

/// 探测执行器
///
/// 任何执行路径都产生一个合法的ProbeOutcome，探测内部的故障
/// 不会越过端点边界向外传播。失败后的连接句柄原样保留，
/// 下一轮照常复用。
pub struct ProbeExecutor {
    /// 单次探测超时
    probe_timeout: Duration,
}

impl ProbeExecutor {
    /// 创建探测执行器
    ///
    /// # 参数
    /// * `probe_timeout` - 单次探测超时，超时按失败结果记录
    pub fn new(probe_timeout: Duration) -> Self {
        Self { probe_timeout }
    }

    /// 对一个端点执行一次往返探测
    ///
    /// 测量从请求发出到响应到达的墙钟耗时。
    ///
    /// # 参数
    /// * `endpoint` - 目标端点
    ///
    /// # 返回
    /// * `ProbeOutcome` - 探测结果，永不失败
    pub async fn probe(&self, endpoint: &mut Endpoint) -> ProbeOutcome {
        let name = endpoint.display_name().to_string();
        let start = Instant::now();

        match timeout(self.probe_timeout, endpoint.connection_mut().round_trip()).await {
            Ok(Ok(())) => {
                let latency = start.elapsed();
                info!("Ping OK: {}, {:.3}ms", name, latency.as_secs_f64() * 1000.0);
                ProbeOutcome::success(latency)
            }
            Ok(Err(detail)) => {
                error!("Ping Error: {}, {}", name, detail);
                ProbeOutcome::failure(detail)
            }
            Err(_) => {
                let detail = format!("Request timeout after {}s", self.probe_timeout.as_secs());
                error!("Ping Error: {}, {}", name, detail);
                ProbeOutcome::failure(detail)
            }
        }
    }
}
