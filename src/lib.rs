//! # Test Question Gen
//!
//! 一个基于生成式模型的选择题出题服务
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 领域数据结构
//! - `QuestionRecord` / `TestBundle` - 服务端产出
//! - `NormalizedQuestion` / `NormalizedTest` - 客户端消费
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个题目
//! - `prompt_builder` - 提示词构建能力（纯函数）
//! - `response_extractor` - 模型输出解析能力（逐级回退）
//! - `LlmService` - 单题生成能力（一次调用，不重试）
//! - `normalizer` - 客户端载荷归一化能力
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_generator` - 批量出题，顺序驱动 + 部分成功策略
//! - `orchestrator/app` - 应用生命周期，显式初始化 LLM 客户端
//!
//! ### ④ 边界层（Api）
//! - `api/` - 入站请求校验与对外载荷组装
//!
//! ## 模块结构

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use api::{handle_generate, GenerateRequest};
pub use config::Config;
pub use error::{GenError, GenResult};
pub use models::{
    Difficulty, GenerationOutcome, GenerationRequest, NormalizedTest, QuestionRecord, TestBundle,
};
pub use orchestrator::{generate_batch, App};
pub use services::{LlmService, QuestionSource};
