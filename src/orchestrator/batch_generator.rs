//! 批量出题编排 - 编排层
//!
//! ## 职责
//!
//! 1. **数量钳制**：请求数量钳制到 [1, 10]，越界值静默修正，不报错
//! 2. **多学科检测**：主题包含分隔符时，循环中追加换学科指令
//! 3. **顺序驱动**：严格顺序调用单题生成，绝不并发——
//!    多样性提示依赖"前面已出了几道题"，且顺序调用天然限制了上游压力
//! 4. **部分成功策略**：某次调用失败时，已有题目则提前截断并返回部分结果；
//!    一道题都没有则整个批次失败
//! 5. **结果组装**：多题组装成 `TestBundle`，单题请求返回裸题目
//!
//! 失败的调用不在本层重试：要么截断批次，要么（首题失败时）终结批次。

use tracing::{info, warn};

use crate::error::GenResult;
use crate::models::{Difficulty, GenerationOutcome, TestBundle};
use crate::services::QuestionSource;

/// 单个请求最多生成的题目数
pub const MAX_QUESTIONS_PER_REQUEST: i64 = 10;

/// 主题中可能分隔多个学科的符号
const SUBJECT_SEPARATORS: [&str; 4] = [" and ", ",", "/", "&"];

/// 追加在后续题目主题上的换学科指令
const DIVERSITY_SUFFIX: &str =
    " (Please choose a different subject than previous questions for variety)";

/// 钳制请求的题目数量到合法范围
pub fn clamp_question_count(requested: i64) -> usize {
    requested.clamp(1, MAX_QUESTIONS_PER_REQUEST) as usize
}

/// 判断主题是否可能包含多个学科
pub fn has_multiple_subjects(topic: &str) -> bool {
    SUBJECT_SEPARATORS.iter().any(|sep| topic.contains(sep))
}

/// 批量生成题目
///
/// 单题请求（requested_count == 1）返回裸 `QuestionRecord`，
/// 其余情况钳制数量后顺序生成并组装 `TestBundle`。
/// 注意 `== 1` 的判断发生在钳制之前：`questionCount: 0` 会被钳制为 1
/// 并走多题路径，产出只有一道题的测验，这与对外契约一致。
pub async fn generate_batch<S: QuestionSource>(
    source: &S,
    topic: &str,
    difficulty: &Difficulty,
    requested_count: i64,
) -> GenResult<GenerationOutcome> {
    // 单题请求：更扁平的结果形态
    if requested_count == 1 {
        let question = source.generate_question(topic, difficulty, 0).await?;
        return Ok(GenerationOutcome::Single(question));
    }

    let count = clamp_question_count(requested_count);
    let multi_subject = has_multiple_subjects(topic);

    info!(
        "开始生成测验: 主题 \"{}\", 难度 {}, 共 {} 题 (多学科: {})",
        topic, difficulty, count, multi_subject
    );

    let mut questions = Vec::with_capacity(count);

    for i in 0..count {
        // 多学科主题从第二题起追加换学科指令
        let current_topic = if multi_subject && i > 0 {
            format!("{}{}", topic, DIVERSITY_SUFFIX)
        } else {
            topic.to_string()
        };

        match source.generate_question(&current_topic, difficulty, i).await {
            Ok(question) => {
                info!("[题目 {}] ✓ 生成成功", i + 1);
                questions.push(question);
            }
            Err(e) => {
                // 已有题目：截断批次，部分结果好于没有结果
                if !questions.is_empty() {
                    warn!(
                        "[题目 {}] ⚠️ 生成失败，返回已生成的 {} 道题: {}",
                        i + 1,
                        questions.len(),
                        e
                    );
                    break;
                }
                // 首题就失败：整个批次失败
                warn!("[题目 {}] ❌ 生成失败且无已生成题目: {}", i + 1, e);
                return Err(e);
            }
        }
    }

    info!("✓ 测验生成完成: {}/{} 题", questions.len(), count);

    Ok(GenerationOutcome::Bundle(TestBundle {
        title: format!("{} Test ({} difficulty)", topic, difficulty),
        subject: topic.to_string(),
        questions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;
    use crate::models::QuestionRecord;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// 按预设脚本逐次返回结果的出题实现，并记录每次调用的主题
    struct ScriptedSource {
        outcomes: Mutex<VecDeque<GenResult<QuestionRecord>>>,
        topics_seen: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<GenResult<QuestionRecord>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                topics_seen: Mutex::new(Vec::new()),
            }
        }

        fn topics(&self) -> Vec<String> {
            self.topics_seen.lock().unwrap().clone()
        }
    }

    impl QuestionSource for ScriptedSource {
        async fn generate_question(
            &self,
            topic: &str,
            _difficulty: &Difficulty,
            _question_index: usize,
        ) -> GenResult<QuestionRecord> {
            self.topics_seen.lock().unwrap().push(topic.to_string());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("脚本中没有剩余结果")
        }
    }

    fn sample_question(text: &str) -> QuestionRecord {
        QuestionRecord {
            question: text.to_string(),
            options: vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "d".to_string(),
            ],
            correct_answer: "a".to_string(),
            explanation: String::new(),
        }
    }

    fn malformed() -> GenError {
        GenError::malformed("garbage", "无法解析")
    }

    #[test]
    fn test_clamp_question_count() {
        assert_eq!(clamp_question_count(0), 1);
        assert_eq!(clamp_question_count(-3), 1);
        assert_eq!(clamp_question_count(1), 1);
        assert_eq!(clamp_question_count(5), 5);
        assert_eq!(clamp_question_count(10), 10);
        assert_eq!(clamp_question_count(15), 10);
    }

    #[test]
    fn test_has_multiple_subjects() {
        assert!(has_multiple_subjects("Math and Science"));
        assert!(has_multiple_subjects("History, Geography"));
        assert!(has_multiple_subjects("Physics/Chemistry"));
        assert!(has_multiple_subjects("Art & Music"));
        assert!(!has_multiple_subjects("Algebra"));
        // "and" 必须是独立单词
        assert!(!has_multiple_subjects("Scandinavia"));
    }

    #[test]
    fn test_single_question_returns_bare_record() {
        let source = ScriptedSource::new(vec![Ok(sample_question("q1"))]);

        let outcome = tokio_test::block_on(generate_batch(
            &source,
            "Algebra",
            &Difficulty::Easy,
            1,
        ))
        .unwrap();

        assert!(matches!(outcome, GenerationOutcome::Single(_)));
        assert_eq!(source.topics(), vec!["Algebra"]);
    }

    #[test]
    fn test_full_batch_success() {
        let source = ScriptedSource::new(vec![
            Ok(sample_question("q1")),
            Ok(sample_question("q2")),
            Ok(sample_question("q3")),
        ]);

        let outcome =
            tokio_test::block_on(generate_batch(&source, "Algebra", &Difficulty::Medium, 3))
                .unwrap();

        match outcome {
            GenerationOutcome::Bundle(bundle) => {
                assert_eq!(bundle.questions.len(), 3);
                assert_eq!(bundle.title, "Algebra Test (medium difficulty)");
                assert_eq!(bundle.subject, "Algebra");
            }
            other => panic!("应为 Bundle，实际为 {:?}", other),
        }
        // 单学科主题不追加换学科指令
        assert_eq!(source.topics(), vec!["Algebra", "Algebra", "Algebra"]);
    }

    #[test]
    fn test_diversity_suffix_for_multi_subject_topic() {
        let source = ScriptedSource::new(vec![
            Ok(sample_question("q1")),
            Ok(sample_question("q2")),
        ]);

        tokio_test::block_on(generate_batch(
            &source,
            "Math and Science",
            &Difficulty::Medium,
            2,
        ))
        .unwrap();

        let topics = source.topics();
        assert_eq!(topics[0], "Math and Science");
        assert_eq!(
            topics[1],
            "Math and Science (Please choose a different subject than previous questions for variety)"
        );
    }

    #[test]
    fn test_partial_failure_truncates_batch() {
        // 第 2 题失败：返回 1 道题的部分结果，第 3 题不再尝试
        let source = ScriptedSource::new(vec![
            Ok(sample_question("q1")),
            Err(malformed()),
            Ok(sample_question("q3")),
        ]);

        let outcome = tokio_test::block_on(generate_batch(
            &source,
            "Math and Science",
            &Difficulty::Medium,
            3,
        ))
        .unwrap();

        match outcome {
            GenerationOutcome::Bundle(bundle) => assert_eq!(bundle.questions.len(), 1),
            other => panic!("应为 Bundle，实际为 {:?}", other),
        }
        assert_eq!(source.topics().len(), 2);
    }

    #[test]
    fn test_first_question_failure_fails_batch() {
        let source = ScriptedSource::new(vec![Err(malformed())]);

        let result =
            tokio_test::block_on(generate_batch(&source, "History", &Difficulty::Hard, 3));

        assert!(matches!(result, Err(GenError::MalformedResponse { .. })));
        assert_eq!(source.topics().len(), 1);
    }

    #[test]
    fn test_count_zero_is_clamped_to_one_question_bundle() {
        let source = ScriptedSource::new(vec![Ok(sample_question("q1"))]);

        let outcome =
            tokio_test::block_on(generate_batch(&source, "Biology", &Difficulty::Easy, 0))
                .unwrap();

        // 0 被钳制为 1，但不走单题路径，仍返回测验
        match outcome {
            GenerationOutcome::Bundle(bundle) => assert_eq!(bundle.questions.len(), 1),
            other => panic!("应为 Bundle，实际为 {:?}", other),
        }
    }

    #[test]
    fn test_count_above_cap_is_clamped() {
        let outcomes = (0..10).map(|i| Ok(sample_question(&format!("q{}", i)))).collect();
        let source = ScriptedSource::new(outcomes);

        let outcome =
            tokio_test::block_on(generate_batch(&source, "Geography", &Difficulty::Easy, 15))
                .unwrap();

        match outcome {
            GenerationOutcome::Bundle(bundle) => assert_eq!(bundle.questions.len(), 10),
            other => panic!("应为 Bundle，实际为 {:?}", other),
        }
        assert_eq!(source.topics().len(), 10);
    }
}
