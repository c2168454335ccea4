//! # Problem Forge
//!
//! 把 PDF 提取出的英语阅读试卷文本切分成独立题目的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 分题器（Segmenter）
//! - `segmenter/` - 纯函数式的分题核心，无 I/O、无共享可变状态
//! - `Segmenter` - 分割 → 分类去重 → 过滤 → 清洗
//! - `DiagnosticsSink` - 启发式规则的旁路诊断
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个文档
//! - `SplitService` - 分题请求校验与响应（400 / 500）
//! - `ResultWriter` - 写分题结果 JSON
//! - `WarnWriter` - 写 warn.txt
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量文档处理器，管理并发
//! - `orchestrator/document_processor` - 单个文档处理器
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod segmenter;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{ItemCode, ProblemBlock, SegmentationReport};
pub use orchestrator::{App, ProcessingStats};
pub use segmenter::{Segmenter, SegmenterOptions, SplitStrategy};
pub use services::{SplitRequest, SplitResponse, SplitService};
