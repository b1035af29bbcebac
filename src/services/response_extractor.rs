//! 响应解析 - 业务能力层
//!
//! 从模型的自由文本输出中恢复出一道结构化的题目。
//!
//! 模型并不总是遵守"只返回 JSON"的提示：有时包在 ``` 代码块里，
//! 有时在 JSON 前后附带说明文字。因此解析按固定顺序逐级回退，
//! 上一步没有产出可用内容时才进入下一步：
//!
//! 1. 有代码块标记时，用正则提取第一对围栏之间的内容（可带 json 语言标签）
//! 2. 正则未命中时，直接删除围栏标记子串
//! 3. 文本不以 `{` 开头时，丢弃第一个 `{` 之前的内容
//! 4. 文本不以 `}` 结尾时，丢弃最后一个 `}` 之后的内容
//! 5. 按 JSON 解析并校验结构约束
//!
//! 任何一步无法继续都返回 `MalformedResponse`，并携带原始文本便于排查。

use regex::Regex;

use crate::error::{GenError, GenResult};
use crate::models::QuestionRecord;

/// 围栏代码块匹配：第一对 ``` 之间的内容，语言标签可选
const FENCE_PATTERN: &str = r"(?s)```(?:json)?(.+?)```";

/// 从原始模型输出中提取一道题目
pub fn extract(raw: &str) -> GenResult<QuestionRecord> {
    let mut text = raw.trim().to_string();

    // 步骤 1/2：剥离 markdown 代码块
    if text.contains("```") {
        let mut captured = None;
        if let Ok(re) = Regex::new(FENCE_PATTERN) {
            if let Some(caps) = re.captures(&text) {
                captured = Some(caps[1].trim().to_string());
            }
        }
        text = match captured {
            Some(inner) => inner,
            None => strip_fence_markers(&text),
        };
    }

    // 步骤 3：去掉 JSON 之前的说明文字
    if !text.starts_with('{') {
        match text.find('{') {
            Some(pos) => text = text[pos..].to_string(),
            None => return Err(GenError::malformed(raw, "响应中不包含 JSON 对象")),
        }
    }

    // 步骤 4：去掉 JSON 之后的多余文字
    if !text.ends_with('}') {
        match text.rfind('}') {
            Some(pos) => text.truncate(pos + 1),
            None => return Err(GenError::malformed(raw, "JSON 对象没有闭合")),
        }
    }

    // 步骤 5：解析并校验
    let record: QuestionRecord =
        serde_json::from_str(&text).map_err(|e| GenError::malformed(raw, e.to_string()))?;

    if let Err(reason) = record.validate() {
        return Err(GenError::malformed(raw, reason));
    }

    Ok(record)
}

/// 正则未命中时的兜底：按子串直接删除围栏标记
fn strip_fence_markers(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}
