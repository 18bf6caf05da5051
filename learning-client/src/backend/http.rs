//! HTTP backend for the learning API.

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use roadmap::{Language, Level, SubmissionItem, Topic, TopicId};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::traits::LearningBackend;
use crate::config::ClientConfig;
use crate::error::LearningApiError;
use crate::types::{
    GeneratePathRequest, LearningPath, SubmissionOutcome, TopicContent, TopicQuizSubmission,
};

/// Learning backend over the service's REST API.
pub struct HttpLearningBackend {
    client: Client,
    config: ClientConfig,
}

impl HttpLearningBackend {
    /// Create a backend from config.
    pub fn new(config: ClientConfig) -> Result<Self, LearningApiError> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| LearningApiError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Build authorization header if a token is set.
    fn auth_header(&self) -> Option<String> {
        self.config.api_token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Send a request, retrying transport errors and 5xx responses.
    ///
    /// `build` is called once per attempt. Non-5xx responses are returned
    /// as-is for the caller to interpret.
    async fn execute<F>(&self, op: &'static str, build: F) -> Result<Response, LearningApiError>
    where
        F: Fn(&Client) -> RequestBuilder + Send + Sync,
    {
        let mut attempt: u32 = 0;
        loop {
            let mut request = build(&self.client);
            if let Some(auth) = self.auth_header() {
                request = request.header(header::AUTHORIZATION, auth);
            }

            debug!(op, attempt, "Sending learning API request");
            let error = match request.send().await {
                Ok(response) if response.status().is_server_error() => {
                    let status = response.status().as_u16();
                    let message = response.text().await.unwrap_or_default();
                    LearningApiError::Http { status, message }
                }
                Ok(response) => return Ok(response),
                Err(e) => LearningApiError::Network(e.to_string()),
            };

            if attempt >= self.config.retry_count || !error.is_retryable() {
                return Err(error);
            }
            attempt += 1;
            warn!(op, attempt, error = %error, "Retrying learning API request");
            tokio::time::sleep(self.config.retry_delay()).await;
        }
    }
}

/// Turn a non-success response into an error.
async fn check_status(response: Response) -> Result<Response, LearningApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(LearningApiError::Http {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, LearningApiError> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| LearningApiError::Parse(e.to_string()))
}

#[async_trait]
impl LearningBackend for HttpLearningBackend {
    async fn is_available(&self) -> bool {
        let url = self.url("/health");
        self.client
            .get(&url)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    async fn get_learning_path(
        &self,
        language: Language,
        level: Level,
    ) -> Result<Option<LearningPath>, LearningApiError> {
        let url = self.url(&format!("/learning/path/{}", language));
        let response = self
            .execute("get_learning_path", |client| {
                client.get(&url).query(&[("level", level.as_str())])
            })
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(%language, %level, "No learning path generated yet");
            return Ok(None);
        }
        read_json::<Option<LearningPath>>(response).await
    }

    async fn generate_learning_path(
        &self,
        language: Language,
        level: Level,
        quiz_results: Vec<SubmissionItem>,
        available_topics: Vec<Topic>,
    ) -> Result<LearningPath, LearningApiError> {
        let url = self.url("/learning/generate_path");
        let body = GeneratePathRequest {
            language,
            level,
            quiz_results,
            available_topics,
        };
        let response = self
            .execute("generate_learning_path", |client| client.post(&url).json(&body))
            .await?;
        read_json(response).await
    }

    async fn reset_learning_path(
        &self,
        language: Language,
        level: Level,
    ) -> Result<(), LearningApiError> {
        let url = self.url(&format!("/learning/path/{}", language));
        let response = self
            .execute("reset_learning_path", |client| {
                client.delete(&url).query(&[("level", level.as_str())])
            })
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(%language, %level, "No learning path to reset");
            return Ok(());
        }
        check_status(response).await.map(|_| ())
    }

    async fn get_topic_content(
        &self,
        language: Language,
        topic_id: &TopicId,
    ) -> Result<TopicContent, LearningApiError> {
        let url = self.url(&format!("/learning/topic/{}/{}", language, topic_id));
        let response = self
            .execute("get_topic_content", |client| client.get(&url))
            .await?;
        read_json(response).await
    }

    async fn submit_topic_quiz(
        &self,
        language: Language,
        topic_id: &TopicId,
        submission: Vec<SubmissionItem>,
        total_questions: usize,
    ) -> Result<SubmissionOutcome, LearningApiError> {
        let url = self.url(&format!("/learning/topic/{}/{}/submit", language, topic_id));
        let body = TopicQuizSubmission {
            submission,
            total_questions,
        };
        let response = self
            .execute("submit_topic_quiz", |client| client.post(&url).json(&body))
            .await?;
        read_json(response).await
    }
}
