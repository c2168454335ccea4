//! 分题请求服务 - 业务能力层
//!
//! 对应原服务端的“多题分割”接口：校验请求体、调用分题器、返回 `{"problems": [...]}`。
//! 不监听任何端口，状态码与响应体以值的形式返回，交给外层传输层使用。

use crate::error::RequestError;
use crate::segmenter::Segmenter;
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, info};

/// 分题请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// 分题响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResponse {
    pub problems: Vec<String>,
}

/// 分题请求服务
///
/// 职责：
/// - 校验请求（缺少 text → 400）
/// - 空白文本直接返回空列表（200）
/// - 分题过程中的意外 panic 在此截获并转为 500
#[derive(Clone)]
pub struct SplitService {
    segmenter: Arc<Segmenter>,
}

impl SplitService {
    pub fn new(segmenter: Arc<Segmenter>) -> Self {
        Self { segmenter }
    }

    /// 处理原始 JSON 请求体
    pub fn handle_json(&self, body: &str) -> Result<SplitResponse, RequestError> {
        let text = Self::extract_text(body)?;
        self.split(&text)
    }

    /// 处理已解析的请求
    pub fn handle(&self, request: SplitRequest) -> Result<SplitResponse, RequestError> {
        let text = request.text.ok_or(RequestError::MissingText)?;
        self.split(&text)
    }

    /// 解析请求体并取出 text 字段
    pub fn extract_text(body: &str) -> Result<String, RequestError> {
        let request: SplitRequest =
            serde_json::from_str(body).map_err(RequestError::MalformedBody)?;
        request.text.ok_or(RequestError::MissingText)
    }

    fn split(&self, text: &str) -> Result<SplitResponse, RequestError> {
        if text.trim().is_empty() {
            return Ok(SplitResponse {
                problems: Vec::new(),
            });
        }

        let segmenter = &self.segmenter;
        let problems = panic::catch_unwind(AssertUnwindSafe(|| segmenter.segment(text)))
            .map_err(|payload| {
                let message = panic_message(payload.as_ref());
                error!("分题过程中发生错误: {}", message);
                RequestError::Internal(message)
            })?;

        info!("✓ 分题完成: 共 {} 道题目", problems.len());

        Ok(SplitResponse { problems })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "未知错误".to_string()
    }
}
