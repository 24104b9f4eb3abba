use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::classify::{Classification, Classifier};
use crate::core::error::{CoreError, CoreResult};

/// Classification collaborator backed by the Gemini generateContent API.
///
/// The model is asked for a single JSON object; everything around that
/// object in the reply text is ignored. Transport failures, timeouts and
/// undecodable replies are collaborator errors; a decoded payload that
/// violates the classification contract is a validation error.
pub struct GeminiClassifier {
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClassifier {
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Duration) -> Self {
        GeminiClassifier {
            base_url: base_url.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            timeout,
        }
    }

    fn prompt(query: &str) -> String {
        format!(
            "You are an expert in Indian export compliance and HS code classification.\n\n\
             User Query: \"{query}\"\n\n\
             Analyze the product and destination country mentioned in the query.\n\
             IMPORTANT: Respond ONLY with valid JSON in exactly this format:\n\
             {{\n\
               \"product_name\": \"extracted or inferred product name\",\n\
               \"hs_code\": \"6-8 digit HS code for the product\",\n\
               \"duty_rate\": \"duty rate percentage with % symbol (e.g., 10%)\",\n\
               \"base_price\": numeric_value_in_USD,\n\
               \"destination_country\": \"country name from query\",\n\
               \"incentive_info\": \"brief description of applicable Indian export \
             incentives for this product-country combination\"\n\
             }}\n\n\
             If the query lacks detail, make reasonable assumptions based on common \
             export scenarios for Indian SMBs."
        )
    }
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    parts: Vec<Part>,
}

#[derive(Deserialize, Debug)]
struct Part {
    text: String,
}

/// Raw payload as the model emits it, before contract validation.
#[derive(Deserialize, Debug)]
struct RawClassification {
    #[serde(default)]
    product_name: String,
    #[serde(default)]
    hs_code: String,
    #[serde(default = "default_duty_rate")]
    duty_rate: String,
    #[serde(default)]
    base_price: f64,
    #[serde(default)]
    destination_country: String,
    #[serde(default)]
    incentive_info: String,
}

fn default_duty_rate() -> String {
    "0%".to_string()
}

/// The model reply wraps the JSON object in prose or code fences at times;
/// take the outermost braces.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

#[async_trait]
impl Classifier for GeminiClassifier {
    #[instrument(name = "GeminiClassify", skip(self, query))]
    async fn classify(&self, query: &str) -> CoreResult<Classification> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        debug!(model = %self.model, "Requesting classification");

        let client = reqwest::Client::builder()
            .user_agent("crosswise/1.0")
            .timeout(self.timeout)
            .build()
            .map_err(|e| CoreError::collaborator(format!("client setup failed: {e}")))?;

        let body = json!({
            "contents": [{ "parts": [{ "text": Self::prompt(query) }] }]
        });

        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CoreError::collaborator(format!("classification request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::collaborator(format!(
                "classification service returned {status}"
            )));
        }

        let data = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| CoreError::collaborator(format!("undecodable reply: {e}")))?;

        let text = data
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| CoreError::collaborator("reply contained no candidates"))?;
        debug!(reply_len = text.len(), "Received model reply");

        let object = extract_json_object(text)
            .ok_or_else(|| CoreError::collaborator("no JSON object found in reply"))?;
        let raw: RawClassification = serde_json::from_str(object)
            .map_err(|e| CoreError::collaborator(format!("malformed payload: {e}")))?;

        Classification::new(
            raw.product_name,
            raw.hs_code,
            &raw.duty_rate,
            raw.base_price,
            raw.destination_country,
            raw.incentive_info,
        )
    }
}
