//! 分割阶段：按边界标记把整段文本切成原始片段

use regex::Regex;

/// 原始片段，借用输入文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSegment<'a> {
    /// 在输入中的字节偏移
    pub offset: usize,
    pub text: &'a str,
    /// 第一个边界之前的内容
    pub preamble: bool,
}

/// 单次线性扫描，在每个边界的起始位置切开
///
/// 边界文本不会被消耗或重复：每个片段都以自己的边界标记开头。
/// 第一个边界之前的内容（前言）作为第一个片段返回，由调用方决定是否丢弃。
pub fn partition<'a>(text: &'a str, boundary: &Regex) -> Vec<RawSegment<'a>> {
    let mut starts: Vec<usize> = boundary.find_iter(text).map(|m| m.start()).collect();
    starts.dedup();

    let has_preamble = starts.first() != Some(&0);
    if has_preamble {
        starts.insert(0, 0);
    }

    let mut segments = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        if start < end {
            segments.push(RawSegment {
                offset: start,
                text: &text[start..end],
                preamble: has_preamble && i == 0,
            });
        }
    }

    segments
}
