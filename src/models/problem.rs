use crate::models::item_code::ItemCode;
use crate::segmenter::Diagnostic;
use serde::Serialize;

/// 一道题目的文本块
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemBlock {
    /// 所属题目代码
    pub code: ItemCode,
    /// 原始片段在输入文本中的字节偏移
    #[serde(skip)]
    pub offset: usize,
    /// 原始片段
    #[serde(skip)]
    pub raw: String,
    /// 清洗后的文本
    pub text: String,
}

/// 一次分题调用的完整结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct SegmentationReport {
    pub problems: Vec<ProblemBlock>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SegmentationReport {
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}
