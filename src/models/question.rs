//! 题目相关数据结构
//!
//! 服务端产出 `QuestionRecord` / `TestBundle`，
//! 客户端消费 `NormalizedQuestion` / `NormalizedTest`。
//! 字段名遵循上游约定的 JSON 结构（camelCase）。

use serde::{Deserialize, Serialize};

use crate::models::Difficulty;

/// 单次生成请求
///
/// 构建后不再修改，一次生成调用消费一个。
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// 主题（可能包含多个学科，如 "Math and Science"）
    pub topic: String,
    /// 难度
    pub difficulty: Difficulty,
    /// 题目在批次中的序号（从 0 开始），用于多样性提示
    pub question_index: Option<usize>,
}

impl GenerationRequest {
    /// 创建新的生成请求
    pub fn new(
        topic: impl Into<String>,
        difficulty: Difficulty,
        question_index: Option<usize>,
    ) -> Self {
        Self {
            topic: topic.into(),
            difficulty,
            question_index,
        }
    }
}

/// 一道选择题
///
/// 由响应解析器从模型输出中提取，约束：
/// - `options` 恰好 4 个选项
/// - `correct_answer` 必须是 `options` 之一
///
/// 不满足约束的记录视为解析失败，不会被静默接受。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 题干
    pub question: String,
    /// 选项（恰好 4 个）
    pub options: Vec<String>,
    /// 正确选项（上游偶尔用 answer 字段名，解析时兼容）
    #[serde(rename = "correctAnswer", alias = "answer")]
    pub correct_answer: String,
    /// 答案解析
    #[serde(default)]
    pub explanation: String,
}

impl QuestionRecord {
    /// 校验结构约束
    ///
    /// 返回 `Err(原因)` 时由调用方包装成 `MalformedResponse`。
    pub fn validate(&self) -> Result<(), String> {
        if self.question.trim().is_empty() {
            return Err("question 字段为空".to_string());
        }
        if self.options.len() != 4 {
            return Err(format!(
                "options 应包含 4 个选项，实际为 {}",
                self.options.len()
            ));
        }
        if !self.options.contains(&self.correct_answer) {
            return Err("correctAnswer 不在 options 列表中".to_string());
        }
        Ok(())
    }
}

/// 一份测验（多题请求的结果）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestBundle {
    pub title: String,
    pub subject: String,
    /// 至少包含 1 道题；空测验是错误，不会成功返回
    pub questions: Vec<QuestionRecord>,
}

/// 批量生成的最终结果
///
/// 单题请求返回裸 `QuestionRecord`，多题请求返回 `TestBundle`。
/// 这一双形态是对外接口契约的一部分，序列化时不带标签。
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GenerationOutcome {
    Single(QuestionRecord),
    Bundle(TestBundle),
}

/// 客户端视角的题目
///
/// 上游载荷中字段可能缺失、字段名可能是 answer 或 correctAnswer，
/// 归一化之后 `answer` 一定有值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(
        rename = "correctAnswer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub correct_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// 客户端视角的测验
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedTest {
    pub title: String,
    pub subject: String,
    pub questions: Vec<NormalizedQuestion>,
}
