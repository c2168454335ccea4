//! 分题器（Problem Segmenter）
//!
//! 把 PDF 提取出的整段试卷文本切分为一道道独立的题目。
//!
//! ## 处理步骤
//!
//! 1. **分割**（`partition`）：单次线性扫描，在题目代码 / “Exercises” 处切开
//! 2. **分类与去重**（`classify`）：按题目代码登记，重复代码保留较长的文本
//! 3. **过滤**（`clean::passes_validity`）：长度与题干关键词
//! 4. **清洗**（`clean::clean_block`）：去页码、页眉页脚，截断答案/词汇附录
//! 5. **输出**：按题目代码首次出现的顺序
//!
//! 分题器只持有编译好的正则与参数，调用之间没有共享的可变状态，
//! 可以放进 `Arc` 在多个任务中并发使用。

pub mod classify;
pub mod clean;
pub mod diagnostics;
pub mod partition;
pub mod rules;

pub use diagnostics::{Diagnostic, DiagnosticsSink, RejectReason, TracingSink};
pub use rules::{SegmenterOptions, SplitStrategy};

use crate::error::AppResult;
use crate::models::{ProblemBlock, SegmentationReport};
use classify::{Patterns, Registered, Registry, SegmentKind};
use partition::{partition, RawSegment};
use rules::char_prefix;
use tracing::debug;

/// 分题器
#[derive(Debug, Clone)]
pub struct Segmenter {
    options: SegmenterOptions,
    patterns: Patterns,
}

impl Segmenter {
    /// 创建分题器
    pub fn new(options: SegmenterOptions) -> AppResult<Self> {
        options.validate()?;
        let patterns = Patterns::for_strategy(options.strategy)?;
        Ok(Self { options, patterns })
    }

    pub fn options(&self) -> &SegmenterOptions {
        &self.options
    }

    /// 分题，诊断信息输出到 tracing
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.segment_with(text, &mut TracingSink)
    }

    /// 分题，诊断信息输出到指定接收器
    pub fn segment_with(&self, text: &str, sink: &mut dyn DiagnosticsSink) -> Vec<String> {
        self.segment_blocks(text, sink)
            .into_iter()
            .map(|block| block.text)
            .collect()
    }

    /// 分题并收集诊断信息
    pub fn report(&self, text: &str) -> SegmentationReport {
        let mut diagnostics = Vec::new();
        let problems = self.segment_blocks(text, &mut diagnostics);
        SegmentationReport {
            problems,
            diagnostics,
        }
    }

    /// 完整流程，返回带题目代码的文本块
    pub fn segment_blocks(&self, text: &str, sink: &mut dyn DiagnosticsSink) -> Vec<ProblemBlock> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let segments = partition(text, &self.patterns.boundary);
        let registry = self.register(segments, sink);
        debug!(
            "分割完成: 登记 {} 个片段 (策略: {})",
            registry.len(),
            self.options.strategy
        );

        registry
            .into_ordered()
            .into_iter()
            .filter_map(|entry| self.finalize(entry, sink))
            .collect()
    }

    fn register<'a>(
        &self,
        segments: Vec<RawSegment<'a>>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Registry<'a> {
        let mut registry = Registry::new();

        for segment in segments {
            if segment.text.trim().is_empty() {
                continue;
            }

            match self.patterns.classify_segment(&segment) {
                SegmentKind::Canonical(code) => registry.register_canonical(code, segment, sink),
                SegmentKind::Exercise => {
                    registry.register_exercise(segment);
                }
                SegmentKind::Numbered => {
                    registry.register_numbered(segment);
                }
                SegmentKind::Unmarked => {
                    let chars = segment.text.trim().chars().count();
                    if chars > self.options.unmarked_alert_chars {
                        sink.record(Diagnostic::UnmarkedSegment {
                            offset: segment.offset,
                            chars,
                            preview: char_prefix(segment.text.trim(), 40).to_string(),
                        });
                    }
                }
            }
        }

        registry
    }

    fn finalize(&self, entry: Registered<'_>, sink: &mut dyn DiagnosticsSink) -> Option<ProblemBlock> {
        let Registered { code, segment } = entry;

        let text = match self.options.strategy {
            SplitStrategy::ItemCode => {
                if !clean::passes_validity(&code, segment.text, &self.options, sink) {
                    return None;
                }
                clean::clean_block(&code, segment.text, &self.options, &self.patterns, sink)?
            }
            SplitStrategy::Numbered => {
                clean::numbered_block(&code, segment.text, &self.options, sink)?
            }
        };

        Some(ProblemBlock {
            code,
            offset: segment.offset,
            raw: segment.text.to_string(),
            text,
        })
    }
}
