//! 结果写入服务 - 业务能力层
//!
//! 只负责把一份文档的分题结果写成 JSON 文件

use crate::error::{AppError, AppResult, FileError};
use crate::models::SegmentationReport;
use crate::segmenter::SplitStrategy;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// 输出文件内容
#[derive(Debug, Serialize)]
struct DocumentResult<'a> {
    source: &'a str,
    generated_at: String,
    strategy: SplitStrategy,
    #[serde(flatten)]
    report: &'a SegmentationReport,
}

/// 结果写入服务
pub struct ResultWriter {
    output_folder: PathBuf,
}

impl ResultWriter {
    pub fn new(output_folder: impl Into<PathBuf>) -> Self {
        Self {
            output_folder: output_folder.into(),
        }
    }

    /// 输出目录不存在时创建
    pub async fn prepare(&self) -> AppResult<()> {
        fs::create_dir_all(&self.output_folder)
            .await
            .map_err(|e| AppError::file_write_failed(self.output_folder.display().to_string(), e))
    }

    /// 输出文件路径：`<output_folder>/<name>.problems.json`
    pub fn output_path(&self, document_name: &str) -> PathBuf {
        self.output_folder
            .join(format!("{}.problems.json", document_name))
    }

    /// 写入一份文档的分题结果，返回输出文件路径
    pub async fn write(
        &self,
        document_name: &str,
        source: &Path,
        strategy: SplitStrategy,
        report: &SegmentationReport,
    ) -> AppResult<PathBuf> {
        let path = self.output_path(document_name);
        let path_display = path.display().to_string();

        let source = source.to_string_lossy();
        let result = DocumentResult {
            source: &source,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            strategy,
            report,
        };

        let json = serde_json::to_string_pretty(&result).map_err(|err| {
            FileError::SerializeFailed {
                path: path_display.clone(),
                source: err,
            }
        })?;

        fs::write(&path, json)
            .await
            .map_err(|e| AppError::file_write_failed(&path_display, e))?;

        debug!("结果已写入: {}", path_display);

        Ok(path)
    }
}
