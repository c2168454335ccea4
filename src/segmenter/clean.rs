//! 过滤与清洗阶段

use super::classify::Patterns;
use super::diagnostics::{Diagnostic, DiagnosticsSink, RejectReason};
use super::rules::{boilerplate_marker_in, has_stem_keyword, is_noise_line, SegmenterOptions};
use crate::models::ItemCode;

/// 原始片段是否像一道真正的题目：足够长，且开头有题干关键词
pub fn passes_validity(
    code: &ItemCode,
    text: &str,
    options: &SegmenterOptions,
    sink: &mut dyn DiagnosticsSink,
) -> bool {
    let chars = text.trim().chars().count();
    if chars <= options.min_problem_chars {
        sink.record(Diagnostic::Rejected {
            code: code.clone(),
            reason: RejectReason::TooShort {
                chars,
                min: options.min_problem_chars,
            },
        });
        return false;
    }

    if !has_stem_keyword(text, options.keyword_window_chars) {
        sink.record(Diagnostic::Rejected {
            code: code.clone(),
            reason: RejectReason::MissingKeyword {
                window: options.keyword_window_chars,
            },
        });
        return false;
    }

    true
}

/// 逐行清洗：去掉页码和页眉页脚，宽限期后遇到样板标记即截断
///
/// 清洗后长度不足时返回 `None`
pub fn clean_block(
    code: &ItemCode,
    text: &str,
    options: &SegmenterOptions,
    patterns: &Patterns,
    sink: &mut dyn DiagnosticsSink,
) -> Option<String> {
    let mut lines = text.lines().enumerate().peekable();
    let mut kept: Vec<&str> = Vec::new();

    if let Some((_, first)) = lines.next_if(|(_, line)| patterns.is_marker_line(line)) {
        kept.push(first.trim_end());
    }

    for (idx, line) in lines {
        if is_noise_line(line) {
            continue;
        }

        if let Some(marker) = boilerplate_marker_in(line) {
            if kept.len() >= options.boilerplate_grace_lines {
                sink.record(Diagnostic::BoilerplateCut {
                    code: code.clone(),
                    marker: marker.to_string(),
                    retained_lines: kept.len(),
                });
                break;
            }
            sink.record(Diagnostic::MarkerInGracePeriod {
                code: code.clone(),
                marker: marker.to_string(),
                line: idx + 1,
            });
        }

        kept.push(line.trim_end());
    }

    let cleaned = kept.join("\n");
    let chars = cleaned.chars().count();
    if chars <= options.min_cleaned_chars {
        sink.record(Diagnostic::Rejected {
            code: code.clone(),
            reason: RejectReason::CleanedTooShort {
                chars,
                min: options.min_cleaned_chars,
            },
        });
        return None;
    }

    Some(cleaned)
}

/// 编号策略：只去掉首尾空白，按词数过滤
pub fn numbered_block(
    code: &ItemCode,
    text: &str,
    options: &SegmenterOptions,
    sink: &mut dyn DiagnosticsSink,
) -> Option<String> {
    let trimmed = text.trim();
    let words = trimmed.split_whitespace().count();
    if words <= options.min_numbered_words {
        sink.record(Diagnostic::Rejected {
            code: code.clone(),
            reason: RejectReason::TooFewWords {
                words,
                min: options.min_numbered_words,
            },
        });
        return None;
    }

    Some(trimmed.to_string())
}
