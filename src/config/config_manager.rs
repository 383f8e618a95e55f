// ==========================================
// 卷材横切排产系统 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、覆写
// 来源优先级: 显式文件 > 用户配置目录 > 默认值
// ==========================================

use crate::config::sequencing_config::SequencingConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置值无效 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    config: SequencingConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用默认配置
    pub fn with_defaults() -> Self {
        Self {
            config: SequencingConfig::default(),
            source: None,
        }
    }

    /// 解析生效配置
    ///
    /// # 参数
    /// - explicit_path: 命令行显式指定的配置文件（存在即必须可读）
    ///
    /// # 规则
    /// 1) 显式文件 → 读取
    /// 2) 用户配置目录下 cut-batch-aps/config.json 存在 → 读取
    /// 3) 默认值
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("未找到配置文件，使用默认配置");
                Ok(Self::with_defaults())
            }
        }
    }

    /// 从 JSON 文件加载配置
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: SequencingConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        let manager = Self {
            config,
            source: Some(path.to_path_buf()),
        };
        manager.validate()?;

        info!(path = %path.display(), "已加载配置文件");
        Ok(manager)
    }

    /// 用户配置目录下的默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cut-batch-aps").join("config.json"))
    }

    /// 覆写工作表名称（命令行 --sheet）
    pub fn override_sheet_name(&mut self, sheet_name: &str) -> Result<(), ConfigError> {
        self.config.sheet_name = sheet_name.trim().to_string();
        self.validate()
    }

    pub fn config(&self) -> &SequencingConfig {
        &self.config
    }

    pub fn into_config(self) -> SequencingConfig {
        self.config
    }

    /// 配置来源（None 表示默认值）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 校验配置值
    fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.config;

        if !(c.weight_goal_t.is_finite() && c.weight_goal_t > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: config_keys::WEIGHT_GOAL_T.to_string(),
                value: c.weight_goal_t.to_string(),
                message: "目标重量必须为正数".to_string(),
            });
        }

        if !(c.fine_planer_max_thickness_mm.is_finite() && c.fine_planer_max_thickness_mm > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: config_keys::FINE_PLANER_MAX_THICKNESS_MM.to_string(),
                value: c.fine_planer_max_thickness_mm.to_string(),
                message: "细刨厚度上限必须为正数".to_string(),
            });
        }

        // 缺厚度批号按哨兵值参与厚度排序
        if !(c.missing_thickness_sentinel.is_finite() && c.missing_thickness_sentinel > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: config_keys::MISSING_THICKNESS_SENTINEL.to_string(),
                value: c.missing_thickness_sentinel.to_string(),
                message: "厚度哨兵值必须为正数".to_string(),
            });
        }

        if c.sheet_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: config_keys::SHEET_NAME.to_string(),
                value: c.sheet_name.clone(),
                message: "工作表名称不能为空".to_string(),
            });
        }

        if c.reduced_marker.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: config_keys::REDUCED_MARKER.to_string(),
                value: c.reduced_marker.clone(),
                message: "降级品标记不能为空".to_string(),
            });
        }

        Ok(())
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 批次
    pub const WEIGHT_GOAL_T: &str = "weight_goal_t";

    // 换型
    pub const FINE_PLANER_MAX_THICKNESS_MM: &str = "fine_planer_max_thickness_mm";
    pub const REDUCED_MARKER: &str = "reduced_marker";
    pub const MISSING_THICKNESS_SENTINEL: &str = "missing_thickness_sentinel";

    // 导入
    pub const SHEET_NAME: &str = "sheet_name";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let manager = ConfigManager::with_defaults();
        let config = manager.config();
        assert_eq!(config.weight_goal_t, 120.0);
        assert_eq!(config.fine_planer_max_thickness_mm, 4.75);
        assert_eq!(config.reduced_marker, "REBAIXAD");
        assert_eq!(config.missing_thickness_sentinel, 999.0);
        assert_eq!(config.sheet_name, "Fagor");
        assert!(manager.source().is_none());
    }

    #[test]
    fn test_from_file_partial_override() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"weight_goal_t": 150.0}}"#).unwrap();

        let manager = ConfigManager::from_file(temp_file.path()).unwrap();
        assert_eq!(manager.config().weight_goal_t, 150.0);
        // 未指定字段取默认值
        assert_eq!(manager.config().fine_planer_max_thickness_mm, 4.75);
        assert_eq!(manager.source(), Some(temp_file.path()));
    }

    #[test]
    fn test_from_file_rejects_non_positive_goal() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"weight_goal_t": 0}}"#).unwrap();

        let result = ConfigManager::from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::InvalidValue { ref key, .. }) if key == "weight_goal_t"));
    }

    #[test]
    fn test_from_file_rejects_negative_sentinel() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"missing_thickness_sentinel": -1.0}}"#).unwrap();

        let result = ConfigManager::from_file(temp_file.path());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref key, .. }) if key == config_keys::MISSING_THICKNESS_SENTINEL
        ));
    }

    #[test]
    fn test_from_file_malformed_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not json").unwrap();

        assert!(matches!(
            ConfigManager::from_file(temp_file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = ConfigManager::load(Some(Path::new("no_such_config.json")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_override_sheet_name() {
        let mut manager = ConfigManager::with_defaults();
        manager.override_sheet_name(" Plan1 ").unwrap();
        assert_eq!(manager.config().sheet_name, "Plan1");
        assert!(manager.override_sheet_name("   ").is_err());
    }
}
