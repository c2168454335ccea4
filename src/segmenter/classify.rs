//! 分类与去重阶段
//!
//! 识别每个原始片段的标记，按题目代码登记。登记顺序即最终输出顺序。

use super::diagnostics::{Diagnostic, DiagnosticsSink};
use super::partition::RawSegment;
use super::rules::SplitStrategy;
use crate::error::SegmenterError;
use crate::models::ItemCode;
use regex::Regex;
use std::collections::HashMap;

const ITEM_CODE_BOUNDARY: &str = r"(?m)[0-9]{5}-[0-9]{4}|^Exercises\b";
const NUMBERED_BOUNDARY: &str = r"(?m)[0-9]{4}학년도|[0-9]{5}-[0-9]{4}|^[0-9]+\.\s";
const CODE_PREFIX: &str = r"^[0-9]{5}-[0-9]{4}";
const EXERCISE_PREFIX: &str = r"^Exercises\b";

/// 片段类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// 以题目代码开头
    Canonical(String),
    /// 以 “Exercises” 开头
    Exercise,
    /// 编号策略下的其他片段
    Numbered,
    /// 没有可识别的标记
    Unmarked,
}

/// 编译好的匹配规则，只读，可跨线程共享
#[derive(Debug, Clone)]
pub struct Patterns {
    strategy: SplitStrategy,
    pub boundary: Regex,
    code_prefix: Regex,
    exercise_prefix: Regex,
}

impl Patterns {
    pub fn for_strategy(strategy: SplitStrategy) -> Result<Self, SegmenterError> {
        let boundary = match strategy {
            SplitStrategy::ItemCode => ITEM_CODE_BOUNDARY,
            SplitStrategy::Numbered => NUMBERED_BOUNDARY,
        };

        Ok(Self {
            strategy,
            boundary: compile(boundary)?,
            code_prefix: compile(CODE_PREFIX)?,
            exercise_prefix: compile(EXERCISE_PREFIX)?,
        })
    }

    /// 判断原始片段的类型
    ///
    /// 前言没有边界标记：编号策略把它当作普通片段保留，题目代码策略不登记
    pub fn classify_segment(&self, segment: &RawSegment<'_>) -> SegmentKind {
        if !segment.preamble {
            return self.classify(segment.text);
        }

        match self.strategy {
            SplitStrategy::ItemCode => SegmentKind::Unmarked,
            SplitStrategy::Numbered => SegmentKind::Numbered,
        }
    }

    /// 按开头的标记判断文本类型
    pub fn classify(&self, text: &str) -> SegmentKind {
        if let Some(code) = self.code_prefix.find(text) {
            return SegmentKind::Canonical(code.as_str().to_string());
        }

        match self.strategy {
            SplitStrategy::ItemCode if self.exercise_prefix.is_match(text) => SegmentKind::Exercise,
            SplitStrategy::ItemCode => SegmentKind::Unmarked,
            SplitStrategy::Numbered => SegmentKind::Numbered,
        }
    }

    /// 该行是否以题目代码或 “Exercises” 开头
    pub fn is_marker_line(&self, line: &str) -> bool {
        self.code_prefix.is_match(line) || self.exercise_prefix.is_match(line)
    }
}

fn compile(pattern: &str) -> Result<Regex, SegmenterError> {
    Regex::new(pattern).map_err(|source| SegmenterError::PatternCompileFailed {
        pattern: pattern.to_string(),
        source,
    })
}

/// 已登记的片段
#[derive(Debug, Clone)]
pub struct Registered<'a> {
    pub code: ItemCode,
    pub segment: RawSegment<'a>,
}

/// 按首次出现顺序登记的题目表
///
/// `order` 决定输出顺序；`index` 只用于按代码查找，重复代码原地替换文本、不移动位置。
#[derive(Debug, Default)]
pub struct Registry<'a> {
    index: HashMap<ItemCode, usize>,
    order: Vec<Registered<'a>>,
    next_exercise: u32,
    next_numbered: u32,
}

impl<'a> Registry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记带题目代码的片段，重复时保留较长的一份
    pub fn register_canonical(
        &mut self,
        code: String,
        segment: RawSegment<'a>,
        sink: &mut dyn DiagnosticsSink,
    ) {
        let code = ItemCode::Canonical(code);

        let Some(position) = self.index.get(&code).copied() else {
            self.push(code, segment);
            return;
        };

        let existing = &mut self.order[position];
        let existing_chars = existing.segment.text.chars().count();
        let candidate_chars = segment.text.chars().count();

        // 等长时保留先出现的
        let (kept_chars, discarded_chars) = if candidate_chars > existing_chars {
            existing.segment = segment;
            (candidate_chars, existing_chars)
        } else {
            (existing_chars, candidate_chars)
        };

        sink.record(Diagnostic::DuplicateCode {
            code,
            kept_chars,
            discarded_chars,
        });
    }

    /// 登记 “Exercises” 片段，从不去重
    pub fn register_exercise(&mut self, segment: RawSegment<'a>) -> ItemCode {
        self.next_exercise += 1;
        let code = ItemCode::Exercise(self.next_exercise);
        self.push(code.clone(), segment);
        code
    }

    /// 登记编号策略下的片段
    pub fn register_numbered(&mut self, segment: RawSegment<'a>) -> ItemCode {
        self.next_numbered += 1;
        let code = ItemCode::Numbered(self.next_numbered);
        self.push(code.clone(), segment);
        code
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// 按登记顺序取出
    pub fn into_ordered(self) -> Vec<Registered<'a>> {
        self.order
    }

    fn push(&mut self, code: ItemCode, segment: RawSegment<'a>) {
        self.index.insert(code.clone(), self.order.len());
        self.order.push(Registered { code, segment });
    }
}
