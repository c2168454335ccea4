//! 分题规则表
//!
//! 固定的关键词、样板标记、页眉页脚噪声行，以及可通过 TOML 覆盖的阈值

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 题干关键词（“다음/아래/Dear/밑줄/빈칸/글/주어진” 及英文对应）
///
/// 只在片段开头的 `keyword_window_chars` 个字符内查找
pub const STEM_KEYWORDS: &[&str] = &[
    "다음",
    "아래",
    "Dear",
    "밑줄",
    "빈칸",
    "글",
    "주어진",
    "next",
    "below",
    "underlined",
    "blank",
    "passage",
    "given",
];

/// 样板标记：宽限期之后出现即截断当前题目
pub const BOILERPLATE_MARKERS: &[&str] = &[
    "정답과 해설",
    "Words & Phrases",
    "Word Check",
    "어휘 Check",
    "Vocabulary Review",
    "Answer Key",
];

/// 页眉页脚噪声行（整行精确匹配，去除首尾空白后比较）
pub static NOISE_LINES: phf::Set<&'static str> = phf::phf_set! {
    "수능특강",
    "수능완성",
    "영어영역 영어",
    "영어영역",
    "EBS",
    "EBSi",
    "www.ebsi.co.kr",
    "이 책의 구성과 특징 Structure",
    "Gateway",
    "Structure",
};

/// 分题策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// 按题目代码（23005-0001）与 “Exercises” 分割，带过滤与清洗
    #[default]
    ItemCode,
    /// 旧版简单编号分割（18. / 2023학년도 / 题目代码），只按词数过滤
    Numbered,
}

impl SplitStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitStrategy::ItemCode => "item_code",
            SplitStrategy::Numbered => "numbered",
        }
    }
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "item_code" | "itemcode" | "code" => Ok(SplitStrategy::ItemCode),
            "numbered" | "number" | "legacy" => Ok(SplitStrategy::Numbered),
            _ => Err(ConfigError::EnvVarParseFailed {
                var_name: "SPLIT_STRATEGY".to_string(),
                value: s.to_string(),
                expected_type: "item_code | numbered".to_string(),
            }),
        }
    }
}

/// 分题器参数
///
/// 所有长度均按字符（而非字节）计算
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterOptions {
    /// 分题策略
    pub strategy: SplitStrategy,
    /// 原始片段最小长度（必须严格大于）
    pub min_problem_chars: usize,
    /// 关键词查找窗口
    pub keyword_window_chars: usize,
    /// 清洗后文本最小长度（必须严格大于）
    pub min_cleaned_chars: usize,
    /// 保留多少行之后才开始检查样板标记
    pub boilerplate_grace_lines: usize,
    /// 无标记片段超过此长度时发出诊断
    pub unmarked_alert_chars: usize,
    /// 编号策略下片段的最少词数（必须严格大于）
    pub min_numbered_words: usize,
}

impl Default for SegmenterOptions {
    fn default() -> Self {
        Self {
            strategy: SplitStrategy::ItemCode,
            min_problem_chars: 300,
            keyword_window_chars: 300,
            min_cleaned_chars: 200,
            boilerplate_grace_lines: 5,
            unmarked_alert_chars: 100,
            min_numbered_words: 2,
        }
    }
}

impl SegmenterOptions {
    /// 使用指定策略、其余参数取默认值
    pub fn with_strategy(strategy: SplitStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// 检查参数组合是否合理
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keyword_window_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "keyword_window_chars".to_string(),
                reason: "关键词窗口不能为 0".to_string(),
            });
        }
        Ok(())
    }
}

/// 片段开头是否包含题干关键词
pub fn has_stem_keyword(text: &str, window_chars: usize) -> bool {
    let head = char_prefix(text, window_chars);
    STEM_KEYWORDS.iter().any(|keyword| head.contains(keyword))
}

/// 该行命中的第一个样板标记
pub fn boilerplate_marker_in(line: &str) -> Option<&'static str> {
    BOILERPLATE_MARKERS
        .iter()
        .copied()
        .find(|marker| line.contains(marker))
}

/// 是否为应丢弃的噪声行：空行、纯数字页码、页眉页脚
pub fn is_noise_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.chars().all(|c| c.is_ascii_digit())
        || NOISE_LINES.contains(trimmed)
}

/// 按字符截取前缀，不会切断多字节字符
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
