// ==========================================
// 卷材横切排产系统 - 报表输出
// ==========================================
// 输出目录下生成:
// - Sequencia_Otimizada.csv   明细报表
// - Metricas_Performance.csv  指标表
// - Distribuicao_Urgencia.csv 紧急分布
// - run_summary.json          运行摘要（可选）
// ==========================================

use crate::report::detail::DETAIL_HEADERS;
use crate::report::metrics::{DISTRIBUTION_HEADERS, METRICS_HEADERS};
use crate::report::ScheduleReport;
use csv::Writer;
use serde::Serialize;
use std::fs::{self, File};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

pub const DETAIL_FILE: &str = "Sequencia_Otimizada.csv";
pub const METRICS_FILE: &str = "Metricas_Performance.csv";
pub const DISTRIBUTION_FILE: &str = "Distribuicao_Urgencia.csv";
pub const SUMMARY_FILE: &str = "run_summary.json";

/// 报表输出错误
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("报表文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

// ==========================================
// ReportWriter
// ==========================================
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 写出三张 CSV 报表，返回生成的文件路径
    pub fn write_tables(&self, report: &ScheduleReport) -> Result<Vec<PathBuf>, ReportError> {
        fs::create_dir_all(&self.output_dir)?;

        let detail_path = self.output_dir.join(DETAIL_FILE);
        let mut writer = Writer::from_writer(File::create(&detail_path)?);
        writer.write_record(DETAIL_HEADERS)?;
        for row in &report.detail {
            writer.write_record(row.to_record())?;
        }
        writer.flush()?;

        let metrics_path = self.output_dir.join(METRICS_FILE);
        let mut writer = Writer::from_writer(File::create(&metrics_path)?);
        writer.write_record(METRICS_HEADERS)?;
        for row in report.metric_rows() {
            writer.write_record([row.name, row.value])?;
        }
        writer.flush()?;

        let distribution_path = self.output_dir.join(DISTRIBUTION_FILE);
        let mut writer = Writer::from_writer(File::create(&distribution_path)?);
        writer.write_record(DISTRIBUTION_HEADERS)?;
        for row in &report.distribution {
            writer.write_record([row.urgency_label.clone(), row.lot_count.to_string()])?;
        }
        writer.flush()?;

        info!(
            dir = %self.output_dir.display(),
            detail_rows = report.detail.len(),
            "报表已写出"
        );
        Ok(vec![detail_path, metrics_path, distribution_path])
    }

    /// 写出 JSON 运行摘要
    pub fn write_summary<T: Serialize>(&self, summary: &T) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(SUMMARY_FILE);
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(file, summary)?;
        Ok(path)
    }
}
