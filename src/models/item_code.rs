//! 题目代码

use serde::{Serialize, Serializer};
use std::fmt;

/// 题目代码
///
/// 同一次分题调用内唯一，用于去重与排序
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemCode {
    /// 试卷上印刷的题目代码，如 `23005-0001`
    Canonical(String),
    /// “Exercises” 开头的块，按出现顺序编号
    Exercise(u32),
    /// 编号策略下没有题目代码的块
    Numbered(u32),
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemCode::Canonical(code) => f.write_str(code),
            ItemCode::Exercise(seq) => write!(f, "EXERCISE_{:03}", seq),
            ItemCode::Numbered(seq) => write!(f, "ITEM_{:03}", seq),
        }
    }
}

impl Serialize for ItemCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
