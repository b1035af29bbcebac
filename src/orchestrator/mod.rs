//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量调度和应用生命周期，不做具体业务判断。
//!
//! ### `batch_generator` - 批量出题编排
//! - 钳制请求数量（[1, 10]）
//! - 检测多学科主题，追加多样性提示
//! - 严格顺序驱动单题生成（多样性提示依赖已完成的调用次数）
//! - 执行部分成功策略（有题即截断返回，无题则整批失败）
//!
//! ### `app` - 应用生命周期
//! - 持有 Config 与 LlmService
//! - 启动时显式初始化 LLM 客户端（含凭证探测）
//!
//! ## 层次关系
//!
//! ```text
//! api (入站边界: 校验 + 结果序列化)
//!     ↓
//! orchestrator::batch_generator (驱动 N 次单题生成)
//!     ↓
//! services (能力层: prompt / llm / extractor / normalizer)
//! ```

pub mod app;
pub mod batch_generator;

// 重新导出主要类型
pub use app::App;
pub use batch_generator::{clamp_question_count, generate_batch, has_multiple_subjects};
