//! # Question Reader
//!
//! 调用大模型 API 的两条小流程：
//!
//! 1. **数学聊天**：带系统前言调用 Cohere 聊天接口，再从形状不固定的响应里
//!    取出助手的文本（`math_chat`）。
//! 2. **图片拆题**：把题目图片交给视觉模型转成文字，再用结构化输出拆成
//!    一道道题目（`image_questions`）。
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 只负责发请求，`ChatTransport` / `CompletionTransport` 可替换
//!
//! ### ② 业务能力层（Services）
//! - `ChatInvoker` - 单轮聊天，所有失败都转成带标签的错误
//! - `normalize` - 响应归一化
//! - `ImageQuestionExtractor` - 读图
//! - `QuestionSplitter` - 拆题
//!
//! ### ③ 流程层（Workflow）
//! - `QuestionFlow` - 读图 → 拆题
//!
//! 所有对外操作都返回 [`AppResult`]。

pub mod clients;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ErrorKind};
pub use models::{ChatRequest, ChatResponse, Question};
pub use services::{normalize, ChatInvoker, ImageQuestionExtractor, QuestionSplitter};
pub use workflow::{FlowOutput, QuestionFlow};
