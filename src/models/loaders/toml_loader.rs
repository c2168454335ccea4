use crate::error::{AppError, AppResult, FileError};
use crate::segmenter::SegmenterOptions;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载分题参数
///
/// 文件中未出现的字段取默认值，例如只写 `strategy = "numbered"` 即可切换策略
pub async fn load_segmenter_options(toml_file_path: &Path) -> AppResult<SegmenterOptions> {
    let path_display = toml_file_path.display().to_string();

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_display, e))?;

    let options: SegmenterOptions =
        toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: path_display.clone(),
            source,
        })?;

    options.validate()?;

    tracing::info!(
        "已加载分题参数: {} (策略: {})",
        path_display,
        options.strategy
    );

    Ok(options)
}
