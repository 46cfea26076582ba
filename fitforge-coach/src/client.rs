use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("language model unreachable")]
    CommunicationError,
    #[error("language model internal error")]
    InternalServerError,
    #[error("invalid request to language model")]
    RequestError,
    #[error("incorrect language model response")]
    ResponseError,
    #[error("language model returned no candidates")]
    EmptyResponse,
}

type Result<T> = std::result::Result<T, Error>;

/// Text-in, text-out wrapper around the generative-language API. Prompt
/// construction lives in [`crate::prompt`]; this trait is the only part that
/// touches the network, so routes mock it in tests.
#[mockall::automock]
#[async_trait]
pub trait CoachClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

pub struct GeminiClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiClient {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_owned(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", API_BASE_URL, self.model)
    }
}

pub fn create(api_key: String) -> impl CoachClient {
    GeminiClient::new(api_key)
}

#[async_trait]
impl CoachClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_owned(),
                }],
            }],
        };

        let response: GenerateResponse = self
            .client
            .post(self.endpoint())
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(|resp| {
                if resp.status().is_client_error() {
                    Err(Error::RequestError)
                } else if resp.status().is_server_error() {
                    Err(Error::InternalServerError)
                } else {
                    Ok(resp)
                }
            })?
            .json()
            .await
            .map_err(|_| Error::ResponseError)?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(Error::EmptyResponse)
    }
}
