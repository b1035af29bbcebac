//! 出题请求边界
//!
//! 入站请求的反序列化与校验，以及对外结果载荷的组装。
//! topic 与 difficulty 缺失或为空时在任何生成调用之前直接拒绝。

use serde::Deserialize;
use serde_json::Value;

use crate::error::{GenError, GenResult};
use crate::models::Difficulty;
use crate::orchestrator::batch_generator;
use crate::services::QuestionSource;

/// 入站出题请求
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub difficulty: String,
    /// 缺省为 1（单题请求）
    #[serde(default, rename = "questionCount")]
    pub question_count: Option<i64>,
}

impl GenerateRequest {
    /// 创建新的出题请求
    pub fn new(
        topic: impl Into<String>,
        difficulty: impl Into<String>,
        question_count: Option<i64>,
    ) -> Self {
        Self {
            topic: topic.into(),
            difficulty: difficulty.into(),
            question_count,
        }
    }

    /// 校验必填字段
    pub fn validate(&self) -> GenResult<()> {
        if self.topic.trim().is_empty() || self.difficulty.trim().is_empty() {
            return Err(GenError::validation("topic 和 difficulty 为必填字段"));
        }
        Ok(())
    }
}

/// 处理一次出题请求
///
/// 校验 → 批量生成 → 序列化为对外载荷。
/// 载荷形态与生成数量有关：单题请求产出裸题目对象，多题请求产出测验对象。
pub async fn handle_generate<S: QuestionSource>(
    source: &S,
    request: &GenerateRequest,
) -> GenResult<Value> {
    request.validate()?;

    let difficulty = Difficulty::parse(&request.difficulty);
    let requested_count = request.question_count.unwrap_or(1);

    let outcome =
        batch_generator::generate_batch(source, &request.topic, &difficulty, requested_count)
            .await?;

    Ok(serde_json::to_value(&outcome)?)
}
