//! 结果记录模块
//!
//! 提供追加式CSV结果文件的创建、表头与逐行落盘写入

pub mod csv;

// 重新导出主要类型
pub use csv::CsvRecorder;
