//! 探测结果数据结构
//!
//! 定义单次探测的结果类型和每轮探测的结果行

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 单次探测结果
///
/// 两个变体从类型上保证不变量：成功必有延迟、无错误描述，
/// 失败必有错误描述、无延迟。每个(轮次, 端点)组合产生一个，
/// 产生后不可变，随即交给记录器消费。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProbeOutcome {
    /// 探测成功
    Success {
        /// 往返耗时
        #[serde(with = "duration_millis")]
        latency: Duration,
    },
    /// 探测失败
    Failure {
        /// 故障描述
        error: String,
    },
}

impl ProbeOutcome {
    /// 创建成功结果
    pub fn success(latency: Duration) -> Self {
        Self::Success { latency }
    }

    /// 创建失败结果
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    /// 本次探测是否存在问题
    pub fn is_problem(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// 问题标志位，成功为0，失败为1
    pub fn problem_flag(&self) -> u8 {
        u8::from(self.is_problem())
    }

    /// 往返延迟（毫秒），失败时为None
    pub fn latency_ms(&self) -> Option<f64> {
        match self {
            Self::Success { latency } => Some(latency.as_secs_f64() * 1000.0),
            Self::Failure { .. } => None,
        }
    }

    /// 故障描述，成功时为None
    pub fn error_detail(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }
}

/// 一轮探测的结果行
///
/// 每个调度轮次产生一行，结果顺序与端点注册顺序一致，
/// 交给记录器后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// 本轮开始时刻（UTC）
    pub timestamp: DateTime<Utc>,
    /// 按端点注册顺序排列的探测结果
    pub outcomes: Vec<ProbeOutcome>,
}

impl Row {
    /// 创建结果行
    pub fn new(timestamp: DateTime<Utc>, outcomes: Vec<ProbeOutcome>) -> Self {
        Self {
            timestamp,
            outcomes,
        }
    }

    /// 本行覆盖的端点数
    pub fn endpoint_count(&self) -> usize {
        self.outcomes.len()
    }
}

/// Duration毫秒序列化模块
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_secs_f64() * 1000.0).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(millis / 1000.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_outcome_invariant() {
        let outcome = ProbeOutcome::success(Duration::from_millis(2));
        assert!(!outcome.is_problem());
        assert_eq!(outcome.problem_flag(), 0);
        assert_eq!(outcome.latency_ms(), Some(2.0));
        assert!(outcome.error_detail().is_none());
    }

    #[test]
    fn test_failure_outcome_invariant() {
        let outcome = ProbeOutcome::failure("connection refused");
        assert!(outcome.is_problem());
        assert_eq!(outcome.problem_flag(), 1);
        assert!(outcome.latency_ms().is_none());
        assert_eq!(outcome.error_detail(), Some("connection refused"));
    }

    #[test]
    fn test_latency_is_finite_and_non_negative() {
        let outcome = ProbeOutcome::success(Duration::ZERO);
        let latency = outcome.latency_ms().unwrap();
        assert!(latency.is_finite());
        assert!(latency >= 0.0);
    }

    #[test]
    fn test_outcome_serialization_roundtrip() {
        let success = ProbeOutcome::success(Duration::from_millis(1500));
        let json = serde_json::to_string(&success).unwrap();
        assert!(json.contains("\"status\":\"success\""));
        let parsed: ProbeOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, success);

        let failure = ProbeOutcome::failure("Request timeout");
        let json = serde_json::to_string(&failure).unwrap();
        assert!(json.contains("\"status\":\"failure\""));
        let parsed: ProbeOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, failure);
    }

    #[test]
    fn test_row_preserves_outcome_order() {
        let row = Row::new(
            Utc::now(),
            vec![
                ProbeOutcome::success(Duration::from_millis(1)),
                ProbeOutcome::failure("reset"),
                ProbeOutcome::success(Duration::from_millis(3)),
            ],
        );
        assert_eq!(row.endpoint_count(), 3);
        assert_eq!(row.outcomes[0].problem_flag(), 0);
        assert_eq!(row.outcomes[1].problem_flag(), 1);
        assert_eq!(row.outcomes[2].latency_ms(), Some(3.0));
    }
}
