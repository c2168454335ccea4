//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文档的分题和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：日志文件、分题器、输出目录
//! 2. **批量加载**：扫描并加载所有待分题的文档（`Vec<SourceDocument>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将文档分批次处理，每批完成后再开始下一批
//! 5. **全局统计**：汇总所有文档的处理结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个文档的细节
//! - **共享只读**：分题器放在 `Arc` 中被所有任务共享
//! - **向下委托**：委托 document_processor 处理单个文档

use crate::config::Config;
use crate::models::SourceDocument;
use crate::orchestrator::document_processor::{self, DocumentOutcome};
use crate::segmenter::Segmenter;
use crate::services::{ResultWriter, WarnWriter};
use crate::utils::logging::{
    append_log_line, init_log_file, log_batch_complete, log_batch_start, log_documents_loaded,
    log_startup, print_final_stats,
};
use anyhow::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    segmenter: Arc<Segmenter>,
    writer: Arc<ResultWriter>,
    warn_writer: Arc<WarnWriter>,
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub problems: usize,
    pub total: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
    problems: usize,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法创建日志文件: {}", config.output_log_file))?;

        log_startup(
            config.max_concurrent_documents,
            config.segmenter.strategy.as_str(),
        );

        let segmenter = Segmenter::new(config.segmenter.clone()).context("无法创建分题器")?;

        let writer = ResultWriter::new(&config.output_folder);
        writer.prepare().await?;

        let warn_writer = WarnWriter::with_path(&config.warn_file);

        Ok(Self {
            config,
            segmenter: Arc::new(segmenter),
            writer: Arc::new(writer),
            warn_writer: Arc::new(warn_writer),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        // 加载所有待处理的文档
        let documents = self.load_documents().await?;

        if documents.is_empty() {
            warn!("⚠️ 没有找到待分题的文档，程序结束");
            return Ok(ProcessingStats::default());
        }

        log_documents_loaded(documents.len(), self.config.max_concurrent_documents);

        // 处理所有文档
        let stats = self.process_all_documents(documents).await?;

        // 输出最终统计
        print_final_stats(
            stats.success,
            stats.failed,
            stats.problems,
            stats.total,
            &self.config.output_log_file,
        );
        append_log_line(
            &self.config.output_log_file,
            &format!(
                "\n完成: 成功 {}/{}, 失败 {}, 题目 {}",
                stats.success, stats.total, stats.failed, stats.problems
            ),
        )?;

        Ok(stats)
    }

    /// 加载文档
    async fn load_documents(&self) -> Result<Vec<SourceDocument>> {
        info!("\n📁 正在扫描待分题的文档...");
        let documents = crate::models::load_all_documents(&self.config.input_folder).await?;
        Ok(documents)
    }

    /// 处理所有文档
    async fn process_all_documents(
        &self,
        documents: Vec<SourceDocument>,
    ) -> Result<ProcessingStats> {
        let max_concurrent = self.config.max_concurrent_documents;
        let semaphore = Arc::new(Semaphore::new(max_concurrent));
        let total = documents.len();
        let total_batches = total.div_ceil(max_concurrent);
        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        // 分批处理
        for (batch_idx, batch) in documents.chunks(max_concurrent).enumerate() {
            let batch_start = batch_idx * max_concurrent;
            let batch_num = batch_idx + 1;

            log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_start + batch.len(),
                total,
            );

            let batch_result = self
                .process_batch(batch, batch_start, semaphore.clone())
                .await?;

            stats.success += batch_result.success;
            stats.failed += batch_result.failed;
            stats.problems += batch_result.problems;

            log_batch_complete(
                batch_num,
                batch_result.success,
                batch_result.success + batch_result.failed,
            );
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch: &[SourceDocument],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let mut handles = Vec::with_capacity(batch.len());
        let mut names = Vec::with_capacity(batch.len());

        // 为本批创建并发任务
        for (idx, document) in batch.iter().enumerate() {
            let document_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let segmenter = self.segmenter.clone();
            let writer = self.writer.clone();
            let warn_writer = self.warn_writer.clone();
            let document = document.clone();
            names.push((document_index, document.name.clone()));

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                document_processor::process_document(
                    &segmenter,
                    document,
                    document_index,
                    &writer,
                    &warn_writer,
                )
                .await
            }));
        }

        // 等待本批所有任务完成
        let mut result = BatchResult::default();

        for ((document_index, name), joined) in names.into_iter().zip(join_all(handles).await) {
            let line = match joined {
                Ok(Ok(DocumentOutcome {
                    problems,
                    diagnostics,
                    output_path,
                })) => {
                    result.success += 1;
                    result.problems += problems;
                    format!(
                        "[文档 {}] {}: {} 道题目, 诊断 {} 条 → {}",
                        document_index,
                        name,
                        problems,
                        diagnostics,
                        output_path.display()
                    )
                }
                Ok(Err(e)) => {
                    error!("[文档 {}] ❌ 处理过程中发生错误: {:#}", document_index, e);
                    result.failed += 1;
                    format!("[文档 {}] {}: 失败 ({:#})", document_index, name, e)
                }
                Err(e) => {
                    error!("[文档 {}] 任务执行失败: {}", document_index, e);
                    result.failed += 1;
                    format!("[文档 {}] {}: 任务执行失败", document_index, name)
                }
            };

            if let Err(e) = append_log_line(&self.config.output_log_file, &line) {
                warn!("写入日志文件失败: {}", e);
            }
        }

        Ok(result)
    }
}
