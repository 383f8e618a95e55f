// ==========================================
// 卷材横切排产系统 - 排产编排器
// ==========================================
// 职责: 单次运行全流程
// 流程: 读取明细 → 批号汇总 → 排序分批 → 报表
// 红线: 基准时刻由调用方一次性给定,全程不再重取
// ==========================================

use crate::config::SequencingConfig;
use crate::domain::lot::{Batch, LineItem};
use crate::engine::aggregator::LotAggregator;
use crate::engine::error::{ScheduleError, ScheduleResult};
use crate::engine::priority::PriorityOrder;
use crate::engine::sequencer::{SequenceOutcome, Sequencer};
use crate::importer;
use crate::report::{ScheduleReport, SequenceMetrics};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, info_span};
use uuid::Uuid;

// ==========================================
// ScheduleRun - 单次运行结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ScheduleRun {
    pub run_id: Uuid,
    pub now: NaiveDateTime,
    pub priority_order: PriorityOrder,
    pub outcome: SequenceOutcome,
    pub report: ScheduleReport,
}

/// JSON 运行摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub now: NaiveDateTime,
    pub priority_order: PriorityOrder,
    pub config: SequencingConfig,
    pub metrics: SequenceMetrics,
    pub batches: Vec<Batch>,
}

impl ScheduleRun {
    pub fn summary(&self, config: &SequencingConfig) -> RunSummary {
        RunSummary {
            run_id: self.run_id,
            now: self.now,
            priority_order: self.priority_order,
            config: config.clone(),
            metrics: self.report.metrics.clone(),
            batches: self.outcome.batches.clone(),
        }
    }
}

// ==========================================
// ScheduleOrchestrator - 排产编排器
// ==========================================
pub struct ScheduleOrchestrator {
    config: SequencingConfig,
}

impl ScheduleOrchestrator {
    pub fn new(config: SequencingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SequencingConfig {
        &self.config
    }

    /// 从文件运行
    ///
    /// 表头校验在汇总之前完成,缺必需列直接失败
    pub fn run_file<P: AsRef<Path>>(
        &self,
        file_path: P,
        order: PriorityOrder,
        now: NaiveDateTime,
    ) -> ScheduleResult<ScheduleRun> {
        let items = importer::read_line_items(file_path, &self.config.sheet_name)?;
        self.run_items(&items, order, now)
    }

    /// 从已读取的明细行运行
    ///
    /// # 错误
    /// - `ScheduleError::EmptyResult`: 无有效批号（非致命，调用方提示"无可处理数据"）
    pub fn run_items(
        &self,
        items: &[LineItem],
        order: PriorityOrder,
        now: NaiveDateTime,
    ) -> ScheduleResult<ScheduleRun> {
        let run_id = Uuid::new_v4();
        let span = info_span!("schedule_run", %run_id, %now, %order);
        let _guard = span.enter();

        // 1. 批号汇总
        let lots = LotAggregator::new(&self.config).aggregate(items, now);
        if lots.is_empty() {
            info!("无有效批号，结束运行");
            return Err(ScheduleError::EmptyResult);
        }

        // 2. 排序分批
        let outcome = Sequencer::new(self.config.weight_goal_t).sequence(lots, order);

        // 3. 报表
        let report = ScheduleReport::build(&outcome, items, self.config.weight_goal_t);

        info!(
            lots = report.metrics.total_lots,
            batches = report.metrics.batch_count,
            setup_changes = report.metrics.setup_changes,
            total_weight_t = report.metrics.total_weight_t,
            "排产完成"
        );

        Ok(ScheduleRun {
            run_id,
            now,
            priority_order: order,
            outcome,
            report,
        })
    }
}
