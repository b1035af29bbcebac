//! 错误类型定义
//!
//! 整个生成流水线共用一个类型化错误枚举，
//! 每个变体对应一种明确的失败场景，编排层依据变体决定是否截断批次。

use thiserror::Error;

/// 生成流水线错误类型
#[derive(Debug, Error)]
pub enum GenError {
    /// 请求参数缺失或无效（在任何生成调用之前被拒绝）
    #[error("请求参数无效: {message}")]
    Validation { message: String },

    /// 上游生成服务不可用，或未返回可用内容
    #[error("生成服务未返回可用结果 (模型: {model})")]
    UpstreamUnavailable {
        model: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// API 凭证被上游拒绝（整个批次直接失败，不重试）
    #[error("API 凭证校验失败 (模型: {model})，请检查 API Key 是否有效且具有相应权限")]
    AuthenticationFailed { model: String },

    /// 模型响应无法解析为合法的题目结构
    #[error("模型响应格式无效: {reason}")]
    MalformedResponse {
        /// 原始响应文本，用于排查问题
        raw: String,
        reason: String,
    },

    /// 没有生成出任何可用的题目
    #[error("未能生成任何题目")]
    EmptyResult,
}

// ========== 便捷构造函数 ==========

impl GenError {
    /// 创建参数校验错误
    pub fn validation(message: impl Into<String>) -> Self {
        GenError::Validation {
            message: message.into(),
        }
    }

    /// 创建上游不可用错误（无底层错误时传 None）
    pub fn upstream_unavailable(
        model: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        GenError::UpstreamUnavailable {
            model: model.into(),
            source,
        }
    }

    /// 创建凭证校验失败错误
    pub fn authentication_failed(model: impl Into<String>) -> Self {
        GenError::AuthenticationFailed {
            model: model.into(),
        }
    }

    /// 创建响应解析失败错误，保留原始响应文本
    pub fn malformed(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        GenError::MalformedResponse {
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        GenError::MalformedResponse {
            raw: String::new(),
            reason: err.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 生成流水线结果类型
pub type GenResult<T> = Result<T, GenError>;
