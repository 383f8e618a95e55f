// ==========================================
// 卷材横切排产系统 - 配置层
// ==========================================
// 职责: 排产参数加载与校验
// 存储: JSON 文件（可选）
// ==========================================

pub mod config_manager;
pub mod sequencing_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigError, ConfigManager};
pub use sequencing_config::SequencingConfig;
