//! 客户端归一化 - 业务能力层
//!
//! 接收边界返回的载荷（可能是一份测验，也可能是单题请求产出的裸题目），
//! 统一成 `NormalizedTest`，并消除 answer / correctAnswer 字段名分歧，
//! 让下游展示层只需依赖 `answer` 一个字段。

use serde_json::Value;
use tracing::info;

use crate::error::{GenError, GenResult};
use crate::models::{NormalizedQuestion, NormalizedTest};

/// 归一化边界载荷
///
/// - 带 `questions` 数组的载荷按测验处理，缺失的 title/subject 用
///   `subject` 参数补齐
/// - 不带 `questions` 的载荷视为裸题目，包装成单题测验
/// - 归一化后每道题的 `answer` 字段一定有值（从 correctAnswer 复制，
///   correctAnswer 本身保持不变）
/// - 题目数为 0 时返回 `EmptyResult`
pub fn normalize(payload: &Value, subject: &str) -> GenResult<NormalizedTest> {
    let (title, bundle_subject, raw_questions) = match payload.get("questions").and_then(Value::as_array) {
        Some(questions) => (
            payload
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} Test", subject)),
            payload
                .get("subject")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| subject.to_string()),
            questions.clone(),
        ),
        // 裸题目：包装成单题测验
        None => (
            format!("{} Test", subject),
            subject.to_string(),
            vec![payload.clone()],
        ),
    };

    let mut questions = Vec::with_capacity(raw_questions.len());
    for value in &raw_questions {
        let mut question: NormalizedQuestion = serde_json::from_value(value.clone())
            .map_err(|e| GenError::malformed(value.to_string(), e.to_string()))?;

        if question.answer.is_none() {
            if let Some(correct) = &question.correct_answer {
                question.answer = Some(correct.clone());
            }
        }

        questions.push(question);
    }

    if questions.is_empty() {
        return Err(GenError::EmptyResult);
    }

    info!("✓ 成功归一化 {} 道题目", questions.len());

    Ok(NormalizedTest {
        title,
        subject: bundle_subject,
        questions,
    })
}
