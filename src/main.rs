// ==========================================
// 卷材横切排产系统 - 命令行入口
// ==========================================
// 用法:
//   cut-batch-aps <INPUT> [--priority urgency,setup,thickness] [--output-dir DIR]
// ==========================================

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use cut_batch_aps::config::ConfigManager;
use cut_batch_aps::engine::{PriorityOrder, ScheduleError, ScheduleOrchestrator};
use cut_batch_aps::logging;
use cut_batch_aps::report::ReportWriter;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cut-batch-aps", version, about = "卷材横切批次分组与排序")]
struct Cli {
    /// 输入表格（.xlsx/.xls/.csv）
    input: PathBuf,

    /// Excel 工作表名称（默认取配置，初始为 Fagor）
    #[arg(long)]
    sheet: Option<String>,

    /// 排序优先级（三键各一次: urgency / setup / thickness）
    #[arg(long, default_value = "urgency,setup,thickness")]
    priority: String,

    /// 报表输出目录
    #[arg(long, default_value = "programacao_otimizada")]
    output_dir: PathBuf,

    /// 配置文件（JSON）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 基准时刻（YYYY-MM-DDTHH:MM:SS 或 YYYY-MM-DD），缺省取当前本地时间
    #[arg(long, value_parser = parse_now)]
    now: Option<NaiveDateTime>,

    /// 额外输出 JSON 运行摘要
    #[arg(long)]
    json: bool,

    /// 日志输出为 JSON 格式
    #[arg(long)]
    log_json: bool,
}

fn parse_now(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("无法解析基准时刻: {}", raw))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    // 基准时刻: 本次运行只取一次
    let now = cli
        .now
        .unwrap_or_else(|| chrono::Local::now().naive_local());

    tracing::info!("{} v{}", cut_batch_aps::APP_NAME, cut_batch_aps::VERSION);

    let mut config_manager =
        ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    if let Some(sheet) = &cli.sheet {
        config_manager
            .override_sheet_name(sheet)
            .context("工作表参数无效")?;
    }
    let config = config_manager.into_config();

    let order = PriorityOrder::parse_list(&cli.priority).context("排序优先级参数无效")?;

    let orchestrator = ScheduleOrchestrator::new(config);
    let run = match orchestrator.run_file(&cli.input, order, now) {
        Ok(run) => run,
        Err(ScheduleError::EmptyResult) => {
            println!("未找到可处理的有效批号，未生成报表。");
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("处理文件失败: {}", cli.input.display()));
        }
    };

    let writer = ReportWriter::new(&cli.output_dir);
    let paths = writer.write_tables(&run.report).context("写出报表失败")?;
    if cli.json {
        let path = writer
            .write_summary(&run.summary(orchestrator.config()))
            .context("写出运行摘要失败")?;
        println!("{}", path.display());
    }
    for path in &paths {
        println!("{}", path.display());
    }

    for row in run.report.metric_rows() {
        println!("{:<36} {}", row.name, row.value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_now_forms() {
        assert_eq!(parse_now("2024-06-15T10:30:00"), Ok(at(2024, 6, 15, 10, 30, 0)));
        assert_eq!(parse_now("2024-06-15 10:30:00"), Ok(at(2024, 6, 15, 10, 30, 0)));
        // 仅日期取当日零点
        assert_eq!(parse_now("2024-06-15"), Ok(at(2024, 6, 15, 0, 0, 0)));
    }

    #[test]
    fn test_parse_now_rejects_day_first() {
        let err = parse_now("15/06/2024").unwrap_err();
        assert!(err.contains("15/06/2024"));
    }
}
