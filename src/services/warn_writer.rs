//! 警告写入服务 - 业务能力层
//!
//! 只负责“写 warn.txt”能力，不关心流程

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 警告写入服务
///
/// 职责：
/// - 将没有分出任何题目的文档写入 warn.txt
/// - 只处理单个文档的警告
/// - 不关心流程顺序
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 使用指定的文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    /// 写入警告信息
    ///
    /// # 参数
    /// - `document`: 文档名
    /// - `reason`: 原因
    /// - `preview`: 文本开头预览
    pub fn write(&self, document: &str, reason: &str, preview: &str) -> Result<()> {
        debug!("写入警告: 文档 {} | 原因: {}", document, reason);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)?;

        let warn_msg = format!(
            "文档 {} | {} | 开头: {}\n",
            document,
            reason,
            preview.replace('\n', " ")
        );

        file.write_all(warn_msg.as_bytes())?;

        Ok(())
    }
}
