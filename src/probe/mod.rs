//! 探测模块
//!
//! 提供单次往返探测执行、结果数据结构和固定间隔调度功能

pub mod executor;
pub mod outcome;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

// 重新导出主要类型
pub use executor::ProbeExecutor;
pub use outcome::{ProbeOutcome, Row};
pub use scheduler::{SchedulerState, TickScheduler};
