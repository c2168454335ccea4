use std::path::PathBuf;

/// 待分题的文档内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentBody {
    /// PDF 提取出的纯文本（.txt）
    PlainText(String),
    /// 分题请求体（.json，`{"text": "..."}`）
    Request(String),
}

/// 输入目录中的一份文档
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// 文件名（不含扩展名），用于输出文件命名
    pub name: String,
    pub file_path: PathBuf,
    pub body: DocumentBody,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, file_path: impl Into<PathBuf>, body: DocumentBody) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
            body,
        }
    }

    /// 内容长度（字符数），仅用于日志
    pub fn char_len(&self) -> usize {
        match &self.body {
            DocumentBody::PlainText(text) | DocumentBody::Request(text) => text.chars().count(),
        }
    }
}
