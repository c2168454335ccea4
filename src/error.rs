use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 分题请求错误
    #[error("请求错误: {0}")]
    Request(#[from] RequestError),
    /// 分题器初始化错误
    #[error("分题器错误: {0}")]
    Segmenter(#[from] SegmenterError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 序列化结果失败
    #[error("序列化结果失败 ({path}): {source}")]
    SerializeFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 分题请求错误
///
/// 对应请求层的 4xx / 5xx 响应，分题器本身从不返回这些错误
#[derive(Debug, Error)]
pub enum RequestError {
    /// 请求体不是合法的 JSON
    #[error("请求体不是合法的 JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),
    /// 缺少 text 字段
    #[error("请输入需要分割的文本")]
    MissingText,
    /// 分题过程中出现意外错误
    #[error("分题过程中发生错误: {0}")]
    Internal(String),
}

impl RequestError {
    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            RequestError::MalformedBody(_) | RequestError::MissingText => 400,
            RequestError::Internal(_) => 500,
        }
    }

    /// 错误响应体 `{"detail": "..."}`
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({ "detail": self.to_string() })
    }
}

/// 分题器初始化错误
#[derive(Debug, Error)]
pub enum SegmenterError {
    /// 正则表达式编译失败
    #[error("正则表达式编译失败 ({pattern}): {source}")]
    PatternCompileFailed {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: err,
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
