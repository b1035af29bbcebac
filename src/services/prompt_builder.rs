//! 提示词构建 - 业务能力层
//!
//! 纯函数：根据主题、难度和题目序号拼出一次生成调用的完整提示词。
//! 提示词中约定了 JSON 输出结构并禁止 markdown 代码块包裹，
//! 但这只是对模型的"建议"——解析端不依赖模型遵守该约定。

use crate::models::GenerationRequest;

/// 构建单题生成提示词
///
/// `question_index` 为 `Some` 时加入多题上下文说明；
/// 序号大于 0 时额外要求模型换一个学科出题，保证批次内的多样性。
pub fn build(request: &GenerationRequest) -> String {
    let mut diversity_instruction = String::new();
    if let Some(index) = request.question_index {
        diversity_instruction = format!(
            "This is question #{} in a multi-question test. ",
            index + 1
        );
        if index > 0 {
            diversity_instruction.push_str(
                "Please choose a DIFFERENT subject than previous questions to ensure diversity. ",
            );
        }
    }

    let difficulty = request.difficulty.as_str();

    format!(
        r#"Generate a {difficulty} level question about {topic}.

IMPORTANT INSTRUCTIONS:
{diversity_instruction}
1. If the topic contains multiple subjects (e.g., "Math and Science", "History, Geography, and Literature", etc.),
   identify all the subjects and choose one randomly for this question to ensure a diverse mix of questions.
2. Make sure the question is detailed, clear, and appropriate for the {difficulty} difficulty level.

Format the response as a VALID JSON object with the following structure:
{{
  "question": "the question text",
  "options": ["option1", "option2", "option3", "option4"],
  "correctAnswer": "correct option",
  "explanation": "explanation of the answer"
}}

IMPORTANT: Return ONLY the JSON object, without any markdown code blocks or extra text.
Do not include ```json or ``` markers in your response."#,
        difficulty = difficulty,
        topic = request.topic,
        diversity_instruction = diversity_instruction,
    )
}
