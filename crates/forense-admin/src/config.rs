//! 配置管理
//!
//! 分层加载：内置默认值 → TOML 配置文件（可选）→ `FORENSE__*` 环境变量。

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info};

/// 默认配置文件
pub const DEFAULT_CONFIG_FILE: &str = "forense.toml";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "FORENSE";

/// 系统完整配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForenseConfig {
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 输出配置
    pub output: OutputConfig,
    /// 物质标签映射
    pub labels: LabelsConfig,
    /// 附加地点坐标
    pub locations: Vec<LocationEntry>,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// 数据库配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 连接字符串
    pub url: String,
    /// 连接超时（秒）
    pub connect_timeout_secs: u64,
}

/// 输出配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 输出目录
    pub dir: PathBuf,
    /// 地图文件名（相对于输出目录）
    pub map_file: String,
    /// 生成地图后是否打开浏览器
    pub open_browser: bool,
    /// SVG 导出目录，未设置时不导出
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg_dir: Option<PathBuf>,
    /// 终端条形图最大宽度（字符）
    pub bar_width: usize,
}

/// 标签映射配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub remap: Vec<RemapEntry>,
}

/// 原始物质代码 → 显示名称
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemapEntry {
    pub raw: String,
    pub display: String,
}

/// 地点坐标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别或 EnvFilter 指令
    pub level: String,
    /// 日志格式
    pub format: LogFormat,
}

/// 日志格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Full,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://forense@localhost/bdforense".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            map_file: "casos_por_ubicacion.html".to_string(),
            open_browser: true,
            svg_dir: None,
            bar_width: 50,
        }
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        let remap = forense_core::LabelMap::default_remap()
            .into_iter()
            .map(|(raw, display)| RemapEntry { raw, display })
            .collect();
        Self { remap }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl OutputConfig {
    /// 地图文件的完整路径
    pub fn map_path(&self) -> PathBuf {
        self.dir.join(&self.map_file)
    }
}

impl LabelsConfig {
    pub fn to_label_map(&self) -> forense_core::LabelMap {
        let remap = self
            .remap
            .iter()
            .map(|e| (e.raw.clone(), e.display.clone()))
            .collect();
        forense_core::LabelMap::new(remap)
    }
}

impl ForenseConfig {
    /// 附加地点坐标表，同名时后出现的条目生效
    pub fn extra_locations(&self) -> BTreeMap<String, [f64; 2]> {
        self.locations
            .iter()
            .map(|l| (l.name.clone(), [l.lat, l.lon]))
            .collect()
    }
}

/// 配置管理器
#[derive(Debug)]
pub struct ConfigManager {
    /// 生效配置
    config: ForenseConfig,
    /// 配置文件路径
    config_path: String,
    /// 配置验证器
    validator: ConfigValidator,
}

impl ConfigManager {
    /// 加载并验证配置；`required` 为 false 时允许配置文件不存在
    pub fn load(config_path: &str, required: bool) -> Result<Self> {
        let config = Self::load_config(config_path, required)?;
        let validator = ConfigValidator::new();
        validator.validate(&config)?;

        Ok(Self {
            config,
            config_path: config_path.to_string(),
            validator,
        })
    }

    /// 从文件与环境变量加载配置
    fn load_config(config_path: &str, required: bool) -> Result<ForenseConfig> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(required))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("Failed to read configuration: {}", config_path))?;

        let config: ForenseConfig = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(config)
    }

    /// 获取配置
    pub fn config(&self) -> &ForenseConfig {
        &self.config
    }

    /// 记录配置来源与生效配置；加载时日志尚未初始化，需在 `init_logging` 之后调用
    pub fn log_summary(&self) {
        info!(path = %self.config_path, "Configuration loaded");
        debug!(config = ?self.config, "Effective configuration");
    }

    /// 应用命令行覆盖后重新验证
    pub fn update<F>(&mut self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut ForenseConfig),
    {
        let mut updated = self.config.clone();
        apply(&mut updated);
        self.validator.validate(&updated)?;
        self.config = updated;
        Ok(())
    }

    /// 序列化生效配置
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.config).context("Failed to serialize configuration")
    }

    pub fn into_config(self) -> ForenseConfig {
        self.config
    }
}

/// 配置验证器
#[derive(Debug)]
pub struct ConfigValidator {
    /// 验证规则
    validation_rules: Vec<ValidationRule>,
}

/// 验证规则
#[derive(Debug)]
struct ValidationRule {
    /// 字段路径
    field_path: &'static str,
    /// 验证函数
    validator: fn(&ForenseConfig) -> Result<()>,
}

impl ConfigValidator {
    pub fn new() -> Self {
        let validation_rules = vec![
            ValidationRule {
                field_path: "database.url",
                validator: |config| {
                    if config.database.url.trim().is_empty() {
                        Err(anyhow::anyhow!("Database URL cannot be empty"))
                    } else {
                        Ok(())
                    }
                },
            },
            ValidationRule {
                field_path: "database.connect_timeout_secs",
                validator: |config| {
                    if config.database.connect_timeout_secs == 0 {
                        Err(anyhow::anyhow!("Connect timeout cannot be 0"))
                    } else {
                        Ok(())
                    }
                },
            },
            ValidationRule {
                field_path: "output.bar_width",
                validator: |config| {
                    if config.output.bar_width == 0 {
                        Err(anyhow::anyhow!("Bar width cannot be 0"))
                    } else {
                        Ok(())
                    }
                },
            },
            ValidationRule {
                field_path: "output.map_file",
                validator: |config| {
                    if config.output.map_file.trim().is_empty() {
                        Err(anyhow::anyhow!("Map file name cannot be empty"))
                    } else {
                        Ok(())
                    }
                },
            },
            ValidationRule {
                field_path: "locations",
                validator: |config| {
                    for location in &config.locations {
                        if !(-90.0..=90.0).contains(&location.lat) || !(-180.0..=180.0).contains(&location.lon) {
                            return Err(anyhow::anyhow!(
                                "Coordinates out of range for {}: ({}, {})",
                                location.name,
                                location.lat,
                                location.lon
                            ));
                        }
                    }
                    Ok(())
                },
            },
            ValidationRule {
                field_path: "labels.remap",
                validator: |config| {
                    for entry in &config.labels.remap {
                        if entry.raw.trim().is_empty() || entry.display.trim().is_empty() {
                            return Err(anyhow::anyhow!(
                                "Label remap entries need both raw and display names: {:?} -> {:?}",
                                entry.raw,
                                entry.display
                            ));
                        }
                    }
                    Ok(())
                },
            },
            ValidationRule {
                field_path: "labels.remap",
                validator: |config| {
                    // 映射只解析一层，显示名称不能再作为其他条目的原始名称
                    let remap = &config.labels.remap;
                    for entry in remap {
                        let chained = remap
                            .iter()
                            .find(|next| next.raw == entry.display && next.display != next.raw);
                        if let Some(next) = chained {
                            return Err(anyhow::anyhow!(
                                "Label remap chains {:?} -> {:?} -> {:?}; map {:?} to {:?} directly",
                                entry.raw,
                                entry.display,
                                next.display,
                                entry.raw,
                                next.display
                            ));
                        }
                    }
                    Ok(())
                },
            },
        ];

        Self { validation_rules }
    }

    /// 验证配置
    pub fn validate(&self, config: &ForenseConfig) -> Result<()> {
        for rule in &self.validation_rules {
            if let Err(e) = (rule.validator)(config) {
                error!("Configuration validation failed for {}: {}", rule.field_path, e);
                return Err(anyhow::anyhow!("Invalid {}: {}", rule.field_path, e));
            }
        }
        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
