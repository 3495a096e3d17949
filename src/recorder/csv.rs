//! CSV结果记录器
//!
//! 每次运行创建一个结果文件，表头在启动时由端点数量一次性确定，
//! 此后每轮追加一行并立即落盘

use crate::error::RecorderError;
use crate::probe::outcome::Row;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// 时间戳列的文本格式（UTC，秒级精度）
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 结果文件名中的运行开始时间格式
const FILENAME_FORMAT: &str = "%Y-%m-%d_%H%M%S";

/// CSV结果记录器
///
/// 列布局固定为 `TimeUtc` 后接每端点三列（Problem、Ping、Error），
/// 顺序与端点注册顺序一致。每行写入后立即刷新并同步到稳定存储，
/// 行与行之间崩溃不会留下半行数据，也不会丢失已落盘的行。
/// 写入失败视为致命错误，不做重试。
pub struct CsvRecorder {
    /// 结果文件句柄，进程生命周期内持有
    file: File,
    /// 结果文件路径
    path: PathBuf,
    /// 启动时固定的端点数量
    endpoint_count: usize,
}

impl CsvRecorder {
    /// 创建本次运行的结果文件并写入表头
    ///
    /// 输出目录不存在时自动创建，文件名由运行开始时间推导。
    ///
    /// # 参数
    /// * `output_dir` - 输出目录
    /// * `started_at` - 运行开始时间（本地时区，仅用于文件名）
    /// * `endpoint_count` - 端点数量，决定列布局
    ///
    /// # 返回
    /// * `Result<Self, RecorderError>` - 记录器实例
    pub async fn create(
        output_dir: &Path,
        started_at: DateTime<Local>,
        endpoint_count: usize,
    ) -> Result<Self, RecorderError> {
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| RecorderError::CreateDir {
                path: output_dir.display().to_string(),
                source,
            })?;

        let filename = format!("{}.csv", started_at.format(FILENAME_FORMAT));
        let path = output_dir.join(filename);
        let file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&path)
            .await
            .map_err(|source| RecorderError::CreateFile {
                path: path.display().to_string(),
                source,
            })?;

        let mut recorder = Self {
            file,
            path,
            endpoint_count,
        };
        recorder.write_header().await?;
        Ok(recorder)
    }

    /// 结果文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 启动时固定的端点数量
    pub fn endpoint_count(&self) -> usize {
        self.endpoint_count
    }

    /// 写入表头行
    async fn write_header(&mut self) -> Result<(), RecorderError> {
        let mut fields = Vec::with_capacity(1 + 3 * self.endpoint_count);
        fields.push("TimeUtc".to_string());
        for i in 0..self.endpoint_count {
            fields.push(format!("Server{i}.Problem"));
            fields.push(format!("Server{i}.Ping"));
            fields.push(format!("Server{i}.Error"));
        }
        self.write_record(&fields).await
    }

    /// 追加一行探测结果并落盘
    ///
    /// # 参数
    /// * `row` - 一轮探测的结果行，结果数必须与端点数一致
    pub async fn write_row(&mut self, row: &Row) -> Result<(), RecorderError> {
        if row.endpoint_count() != self.endpoint_count {
            return Err(RecorderError::ColumnMismatch {
                expected: self.endpoint_count,
                actual: row.endpoint_count(),
            });
        }

        let mut fields = Vec::with_capacity(1 + 3 * self.endpoint_count);
        fields.push(row.timestamp.format(TIMESTAMP_FORMAT).to_string());
        for outcome in &row.outcomes {
            fields.push(outcome.problem_flag().to_string());
            fields.push(outcome.latency_ms().map(format_latency_ms).unwrap_or_default());
            fields.push(outcome.error_detail().unwrap_or("").to_string());
        }
        self.write_record(&fields).await
    }

    /// 写入一条记录并同步到稳定存储
    async fn write_record(&mut self, fields: &[String]) -> Result<(), RecorderError> {
        let mut line = fields
            .iter()
            .map(|field| escape_field(field))
            .collect::<Vec<_>>()
            .join(",");
        line.push('\n');

        self.file
            .write_all(line.as_bytes())
            .await
            .map_err(RecorderError::WriteRow)?;
        self.file.flush().await.map_err(RecorderError::WriteRow)?;
        self.file
            .sync_data()
            .await
            .map_err(RecorderError::WriteRow)?;
        Ok(())
    }
}

/// 格式化延迟毫秒数
///
/// 保留至多三位小数并去掉尾随零，整数毫秒输出为整数。
pub fn format_latency_ms(ms: f64) -> String {
    let formatted = format!("{ms:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// 按RFC 4180转义一个CSV字段
///
/// 包含分隔符、引号或换行的字段加引号，内部引号成对转义。
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
