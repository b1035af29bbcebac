//! LLM 生成服务 - 业务能力层
//!
//! 只负责"生成一道题"这一能力，不关心批次和顺序：
//! - 每次生成恰好发起一次 chat completion 调用，不缓存、不重试
//!   （批次层面的截断策略由编排层负责）
//! - 传输层/凭证错误映射为类型化错误
//! - 原始响应交给 response_extractor 解析，解析错误原样向上传播
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（默认指向 Gemini 的 OpenAI 兼容端点）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{GenError, GenResult};
use crate::models::{Difficulty, GenerationRequest, QuestionRecord};
use crate::services::{prompt_builder, response_extractor};
use crate::utils::logging::truncate_text;

/// 上游拒绝凭证时错误信息中携带的固定片段
const AUTH_ERROR_FRAGMENT: &str = "unregistered callers";

/// 启动探测使用的固定提示词
const PROBE_PROMPT: &str = "Say hello";

/// 出题能力接口
///
/// 编排层只依赖这一接口，测试中用脚本化实现替代真实调用。
pub trait QuestionSource {
    /// 生成一道题目
    ///
    /// `question_index` 是题目在批次中的序号（从 0 开始）。
    fn generate_question(
        &self,
        topic: &str,
        difficulty: &Difficulty,
        question_index: usize,
    ) -> impl std::future::Future<Output = GenResult<QuestionRecord>> + Send;
}

/// LLM 生成服务
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// 初始化 LLM 服务
    ///
    /// 进程启动时调用一次：构建客户端后立即发起一次探测调用，
    /// 让无效凭证在处理第一个请求之前就暴露出来。
    pub async fn initialize(config: &Config) -> GenResult<Self> {
        if config.llm_api_key.trim().is_empty() {
            return Err(GenError::validation("LLM_API_KEY 未配置"));
        }

        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let service = Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        };

        // 凭证探测
        service.send_to_llm(PROBE_PROMPT).await?;
        info!("✓ LLM 客户端初始化完成 (模型: {})", service.model_name);

        Ok(service)
    }

    /// 发送一次 chat completion 请求，返回模型的文本输出
    pub async fn send_to_llm(&self, user_message: &str) -> GenResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("提示词长度: {} 字符", user_message.len());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| self.classify_api_error(e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(0.7)
            .max_tokens(1024u32)
            .build()
            .map_err(|e| self.classify_api_error(e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            self.classify_api_error(e)
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| GenError::upstream_unavailable(&self.model_name, None))?;

        debug!("LLM API 调用成功");

        Ok(content.trim().to_string())
    }

    /// 区分凭证错误与其余上游错误
    fn classify_api_error(&self, err: async_openai::error::OpenAIError) -> GenError {
        if is_auth_error_message(&err.to_string()) {
            GenError::authentication_failed(&self.model_name)
        } else {
            GenError::upstream_unavailable(&self.model_name, Some(Box::new(err)))
        }
    }
}

impl QuestionSource for LlmService {
    async fn generate_question(
        &self,
        topic: &str,
        difficulty: &Difficulty,
        question_index: usize,
    ) -> GenResult<QuestionRecord> {
        let request = GenerationRequest::new(topic, difficulty.clone(), Some(question_index));
        let prompt = prompt_builder::build(&request);

        let raw = self.send_to_llm(&prompt).await?;
        debug!("模型原始响应: {}", truncate_text(&raw, 100));

        response_extractor::extract(&raw)
    }
}

/// 判断上游错误信息是否为凭证被拒
fn is_auth_error_message(message: &str) -> bool {
    message.contains(AUTH_ERROR_FRAGMENT)
}
