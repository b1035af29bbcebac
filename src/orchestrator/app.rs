//! 应用生命周期 - 编排层
//!
//! `App` 管理进程级资源：配置与 LLM 客户端。
//! 客户端在处理第一个请求之前显式初始化（包含一次凭证探测），
//! 进程退出时随 `App` 一起释放，不存在隐式的全局可变状态。

use anyhow::Result;
use serde_json::Value;
use tracing::info;

use crate::api::GenerateRequest;
use crate::config::Config;
use crate::error::GenResult;
use crate::services::LlmService;
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    llm: LlmService,
}

impl App {
    /// 初始化应用
    ///
    /// 写日志文件头、输出启动信息、初始化 LLM 客户端（含凭证探测）。
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config);

        let llm = LlmService::initialize(&config).await?;

        Ok(Self { config, llm })
    }

    /// 处理一次出题请求，返回对外载荷（裸题目或测验）
    pub async fn generate(&self, request: &GenerateRequest) -> GenResult<Value> {
        if self.config.verbose_logging {
            info!(
                "收到请求: 主题 \"{}\", 难度 \"{}\", 数量 {:?}",
                request.topic, request.difficulty, request.question_count
            );
        }
        crate::api::handle_generate(&self.llm, request).await
    }
}
