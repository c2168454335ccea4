//! 分题诊断
//!
//! 启发式规则的“可疑情况”通过 [`DiagnosticsSink`] 旁路输出，从不作为错误返回

use crate::models::ItemCode;
use crate::utils::logging::truncate_text;
use serde::Serialize;
use tracing::{debug, warn};

/// 片段被丢弃的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// 原始片段过短
    TooShort { chars: usize, min: usize },
    /// 开头没有题干关键词
    MissingKeyword { window: usize },
    /// 清洗后过短
    CleanedTooShort { chars: usize, min: usize },
    /// 编号策略下词数不足
    TooFewWords { words: usize, min: usize },
}

/// 一条诊断信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// 没有任何标记的长片段（通常是分割错位）
    UnmarkedSegment {
        offset: usize,
        chars: usize,
        preview: String,
    },
    /// 重复的题目代码
    DuplicateCode {
        code: ItemCode,
        kept_chars: usize,
        discarded_chars: usize,
    },
    /// 片段未通过过滤
    Rejected {
        code: ItemCode,
        #[serde(flatten)]
        reason: RejectReason,
    },
    /// 宽限期内出现了样板标记（未截断）
    MarkerInGracePeriod {
        code: ItemCode,
        marker: String,
        line: usize,
    },
    /// 样板标记截断了题目
    BoilerplateCut {
        code: ItemCode,
        marker: String,
        retained_lines: usize,
    },
}

/// 诊断接收器
pub trait DiagnosticsSink {
    fn record(&mut self, diagnostic: Diagnostic);
}

/// 收集到内存，便于测试与写入结果文件
impl DiagnosticsSink for Vec<Diagnostic> {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// 输出到 tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnmarkedSegment {
                offset,
                chars,
                preview,
            } => {
                warn!(
                    "⚠️ 偏移 {} 处有 {} 个字符的无标记片段: {}",
                    offset,
                    chars,
                    truncate_text(preview, 40)
                );
            }
            Diagnostic::DuplicateCode {
                code,
                kept_chars,
                discarded_chars,
            } => {
                debug!(
                    "重复题目代码 {}: 保留 {} 字符, 丢弃 {} 字符",
                    code, kept_chars, discarded_chars
                );
            }
            Diagnostic::Rejected { code, reason } => {
                debug!("丢弃 {}: {:?}", code, reason);
            }
            Diagnostic::MarkerInGracePeriod { code, marker, line } => {
                warn!(
                    "⚠️ {} 第 {} 行在宽限期内出现样板标记 '{}'，未截断",
                    code, line, marker
                );
            }
            Diagnostic::BoilerplateCut {
                code,
                marker,
                retained_lines,
            } => {
                debug!(
                    "{} 在保留 {} 行后遇到样板标记 '{}'，截断",
                    code, retained_lines, marker
                );
            }
        }
    }
}
