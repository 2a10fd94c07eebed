use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AiConfig;
use crate::error::{AppError, AppResult};

const REQUEST_TIMEOUT_SECS: u64 = 30;

// Sampling parameters are fixed; advisory answers should be stable, not
// creative.
const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u32 = 2000;
const TOP_P: f64 = 0.95;

const SYSTEM_PROMPT: &str = "你是一个专业的财务顾问助手，可以帮助用户解答财务相关的问题。请用中文回答，\
回答要专业，亦可幽默风趣，亦可严肃认真，不可回答呆板。如果涉及到具体数字，请给出计算过程。

你的主要职责包括：
1. 回答用户关于财务管理的具体问题
2. 分析用户的消费模式和预算执行情况
3. 提供个性化的财务建议和优化方案
4. 帮助用户制定合理的预算计划
5. 识别潜在的财务风险并提供预警

请确保你的回答专业且易于理解，包含具体的建议和可执行的改进方案。";

/// An inbound advisory request: a free-form question, an analysis request,
/// or both, with optional transaction/budget snapshots embedded verbatim
/// into the prompt.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(rename = "type", default)]
    pub request_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<FinancialSnapshot>,
}

impl ChatRequest {
    /// A request with neither a message nor data has nothing to ask about.
    pub fn is_empty(&self) -> bool {
        let has_message = self.message.as_deref().is_some_and(|m| !m.is_empty());
        !has_message && self.data.is_none()
    }

    pub fn is_analysis(&self) -> bool {
        self.request_type.as_deref() == Some("analysis")
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FinancialSnapshot {
    #[serde(default)]
    pub transactions: Option<Value>,
    #[serde(default)]
    pub budgets: Option<Value>,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for the external chat-completion API. One outbound call per
/// inbound request; no retry, no backoff.
#[derive(Debug, Clone)]
pub struct AdvisorClient {
    client: Client,
    config: AiConfig,
}

impl AdvisorClient {
    pub fn new(config: AiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Upstream(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Send one advisory request and return the model's reply text.
    pub async fn chat(&self, request: &ChatRequest) -> AppResult<String> {
        let prompt = build_prompt(request);

        let body = CompletionRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        };

        debug!(model = %self.config.model, analysis = request.is_analysis(), "Sending advisory request");

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                warn!("Upstream response carried no choices");
                AppError::Upstream("unexpected response format from AI API".into())
            })
    }
}

fn build_prompt(request: &ChatRequest) -> String {
    let transactions = pretty(request.data.as_ref().and_then(|d| d.transactions.as_ref()));
    let budgets = pretty(request.data.as_ref().and_then(|d| d.budgets.as_ref()));

    if request.is_analysis() {
        format!(
            "请分析以下财务数据并提供建议：

交易记录：
{}

预算信息：
{}

请提供：
1. 消费趋势分析
2. 预算执行情况
3. 潜在的节省机会
4. 投资和储蓄建议
5. 风险预警
",
            transactions, budgets
        )
    } else {
        format!(
            "用户问题：{}

用户财务数据：
交易记录：
{}

预算信息：
{}

请根据以上信息回答用户的问题。",
            request.message.as_deref().unwrap_or_default(),
            transactions,
            budgets
        )
    }
}

fn pretty(value: Option<&Value>) -> String {
    let value = value.cloned().unwrap_or_else(|| Value::Array(Vec::new()));
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "[]".into())
}
