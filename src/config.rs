use crate::error::{AppResult, ConfigError};
use crate::models::load_segmenter_options;
use crate::segmenter::{SegmenterOptions, SplitStrategy};
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的文档数量
    pub max_concurrent_documents: usize,
    /// 待分题文本（.txt / .json）所在目录
    pub input_folder: String,
    /// 分题结果输出目录
    pub output_folder: String,
    /// 没有分出任何题目的文档记录在此
    pub warn_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 分题参数 TOML 文件（可选）
    pub segmenter_config: Option<String>,
    // --- 分题器 ---
    pub segmenter: SegmenterOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_documents: 8,
            input_folder: "input_text".to_string(),
            output_folder: "output_problems".to_string(),
            warn_file: "warn.txt".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            segmenter_config: None,
            segmenter: SegmenterOptions::default(),
        }
    }
}

impl Config {
    /// 从环境变量读取，缺失或无法解析的值使用默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        let strategy = std::env::var("SPLIT_STRATEGY")
            .ok()
            .and_then(|v| v.parse::<SplitStrategy>().ok())
            .unwrap_or(default.segmenter.strategy);

        Self {
            max_concurrent_documents: std::env::var("MAX_CONCURRENT_DOCUMENTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_documents),
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(default.input_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            warn_file: std::env::var("WARN_FILE").unwrap_or(default.warn_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            segmenter_config: std::env::var("SEGMENTER_CONFIG").ok().filter(|v| !v.trim().is_empty()),
            segmenter: SegmenterOptions::with_strategy(strategy),
        }
    }

    /// 读取环境变量并应用分题参数文件
    ///
    /// 与 [`Config::from_env`] 不同，`SPLIT_STRATEGY` 写错或参数文件不可用时返回错误
    pub async fn load() -> AppResult<Self> {
        if let Ok(value) = std::env::var("SPLIT_STRATEGY") {
            value.parse::<SplitStrategy>()?;
        }

        let config = Self::from_env();
        config.with_segmenter_file().await
    }

    /// 如果配置了 `segmenter_config`，用文件内容替换分题参数
    ///
    /// 文件里没有写 `strategy` 时保留环境变量指定的策略
    pub async fn with_segmenter_file(mut self) -> AppResult<Self> {
        if let Some(path) = self.segmenter_config.clone() {
            let env_strategy = self.segmenter.strategy;
            let mut options = load_segmenter_options(Path::new(&path)).await?;
            if options.strategy == SplitStrategy::default() {
                options.strategy = env_strategy;
            }
            self.segmenter = options;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_documents == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrent_documents".to_string(),
                reason: "并发数必须大于 0".to_string(),
            });
        }
        self.segmenter.validate()
    }
}
