//! 轮次调度器
//!
//! 以固定间隔驱动单任务探测循环，每轮产出一行结果

use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::probe::executor::ProbeExecutor;
use crate::probe::outcome::Row;
use crate::recorder::CsvRecorder;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// 调度器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// 两轮探测之间的等待期
    Idle,
    /// 正在执行当前轮次的端点遍历
    Probing,
}

/// 固定间隔轮次调度器
///
/// 单任务顺序驱动：每轮按注册顺序依次探测所有端点，组装结果行
/// 交给记录器，然后从写盘结束时刻起固定等待一个间隔再开始下一轮。
/// 不对齐墙钟网格，也不补偿探测本身的耗时，探测慢时节奏允许后移。
///
/// 单个端点的探测失败只影响它自己在本轮的结果，不会跳过后续端点，
/// 也不会中断本轮或后续轮次。记录器写盘失败则是致命错误，循环终止。
pub struct TickScheduler {
    /// 探测执行器
    executor: ProbeExecutor,
    /// 轮次间隔
    interval: Duration,
    /// 当前状态
    state: SchedulerState,
    /// 已完成的轮次数
    ticks_completed: u64,
}

impl TickScheduler {
    /// 创建调度器
    ///
    /// # 参数
    /// * `executor` - 探测执行器
    /// * `interval` - 轮次间隔，从一轮写盘结束到下一轮开始
    pub fn new(executor: ProbeExecutor, interval: Duration) -> Self {
        Self {
            executor,
            interval,
            state: SchedulerState::Idle,
            ticks_completed: 0,
        }
    }

    /// 当前状态
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// 已完成的轮次数
    pub fn ticks_completed(&self) -> u64 {
        self.ticks_completed
    }

    /// 运行探测循环，直至收到关闭信号
    ///
    /// # 参数
    /// * `endpoints` - 注册顺序的端点列表
    /// * `recorder` - 结果记录器
    /// * `shutdown` - 关闭信号接收器
    ///
    /// # 返回
    /// * `Result<()>` - 正常关闭为Ok，写盘失败返回错误
    pub async fn run(
        &mut self,
        endpoints: &mut [Endpoint],
        recorder: &mut CsvRecorder,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<()> {
        info!("启动探测循环，端点数量: {}", endpoints.len());

        loop {
            self.state = SchedulerState::Probing;
            let row = self.execute_tick(endpoints).await;
            recorder.write_row(&row).await?;
            self.state = SchedulerState::Idle;
            self.ticks_completed += 1;

            debug!("第{}轮探测完成", self.ticks_completed);

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.recv() => {
                    info!("收到关闭信号，探测循环退出");
                    return Ok(());
                }
            }
        }
    }

    /// 执行一轮探测
    ///
    /// 按注册顺序依次同步探测每个端点，结果顺序与端点顺序一致。
    async fn execute_tick(&mut self, endpoints: &mut [Endpoint]) -> Row {
        let timestamp = Utc::now();
        let mut outcomes = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints.iter_mut() {
            outcomes.push(self.executor.probe(endpoint).await);
        }
        Row::new(timestamp, outcomes)
    }
}
