//! 单个文档处理器 - 编排层
//!
//! 读取一份文档 → 分题 → 写结果 → 没有题目时写警告

use crate::models::{DocumentBody, SourceDocument};
use crate::segmenter::{DiagnosticsSink, Segmenter, TracingSink};
use crate::services::{ResultWriter, SplitService, WarnWriter};
use crate::utils::truncate_text;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// 单个文档的处理结果
#[derive(Debug, Clone, Default)]
pub struct DocumentOutcome {
    pub problems: usize,
    pub diagnostics: usize,
    pub output_path: PathBuf,
}

/// 处理单个文档
///
/// # 参数
/// - `segmenter`: 分题器
/// - `document`: 文档
/// - `document_index`: 文档索引（用于日志）
/// - `writer`: 结果写入服务
/// - `warn_writer`: 警告写入服务
pub async fn process_document(
    segmenter: &Segmenter,
    document: SourceDocument,
    document_index: usize,
    writer: &ResultWriter,
    warn_writer: &WarnWriter,
) -> Result<DocumentOutcome> {
    info!(
        "[文档 {}] 开始处理: {} ({} 字符)",
        document_index,
        document.name,
        document.char_len()
    );

    let text = match document.body {
        DocumentBody::PlainText(text) => text,
        DocumentBody::Request(body) => SplitService::extract_text(&body)
            .with_context(|| format!("无效的分题请求: {}", document.file_path.display()))?,
    };

    let report = segmenter.report(&text);

    let mut sink = TracingSink;
    for diagnostic in &report.diagnostics {
        sink.record(diagnostic.clone());
    }

    let output_path = writer
        .write(
            &document.name,
            &document.file_path,
            segmenter.options().strategy,
            &report,
        )
        .await
        .with_context(|| format!("无法写入分题结果: {}", document.name))?;

    if report.is_empty() {
        warn!("[文档 {}] ⚠️ 未分出任何题目", document_index);
        warn_writer
            .write(&document.name, "未分出任何题目", &truncate_text(text.trim(), 60))
            .with_context(|| format!("无法写入警告: {}", document.name))?;
    } else {
        info!(
            "[文档 {}] ✓ 分出 {} 道题目，诊断 {} 条",
            document_index,
            report.problems.len(),
            report.diagnostics.len()
        );
    }

    Ok(DocumentOutcome {
        problems: report.problems.len(),
        diagnostics: report.diagnostics.len(),
        output_path,
    })
}
