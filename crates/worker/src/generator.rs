//! HTTP client for the flashcard generator service.

use std::time::Duration;

use fiszki_core::validation::validate_flashcard;
use fiszki_db::models::generation::CandidateCard;
use serde::{Deserialize, Serialize};

/// Error from a generator call. The display form becomes the request's
/// `error_message`, so it has to read sensibly on its own.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("generator request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generator returned HTTP {0}")]
    Status(u16),

    #[error("generator returned no usable cards")]
    Empty,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    source_text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    cards: Vec<CandidateCard>,
}

/// Client for the generator endpoint: source text in, candidate cards out.
#[derive(Debug, Clone)]
pub struct GeneratorClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GeneratorClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client construction cannot fail with these options");
        GeneratorClient {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Generate candidate cards for a source text.
    ///
    /// Cards that fail flashcard validation (empty sides, over-length) are
    /// dropped with a warning; a response with no valid cards is an error so
    /// the request is marked failed rather than completed-and-empty.
    pub async fn generate(&self, source_text: &str) -> Result<Vec<CandidateCard>, GeneratorError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&GenerateRequest { source_text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeneratorError::Status(status.as_u16()));
        }

        let parsed: GenerateResponse = response.json().await?;
        let total = parsed.cards.len();
        let cards: Vec<CandidateCard> = parsed
            .cards
            .into_iter()
            .filter(|card| match validate_flashcard(&card.front, &card.back) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping invalid generated card");
                    false
                }
            })
            .collect();

        if cards.is_empty() {
            return Err(GeneratorError::Empty);
        }
        if cards.len() < total {
            tracing::warn!(
                kept = cards.len(),
                dropped = total - cards.len(),
                "Generator response partially invalid"
            );
        }
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeneratorClient {
        GeneratorClient::new(format!("{}/generate", server.uri()), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn generate_parses_cards() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_partial_json(serde_json::json!({
                "source_text": "some text"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cards": [
                    { "front": "Q1", "back": "A1" },
                    { "front": "Q2", "back": "A2" },
                ]
            })))
            .mount(&server)
            .await;

        let cards = client_for(&server)
            .generate("some text")
            .await
            .expect("generation should succeed");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "Q1");
        assert_eq!(cards[1].back, "A2");
    }

    #[tokio::test]
    async fn invalid_cards_are_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cards": [
                    { "front": "", "back": "A1" },
                    { "front": "Q2", "back": "A2" },
                ]
            })))
            .mount(&server)
            .await;

        let cards = client_for(&server)
            .generate("text")
            .await
            .expect("one valid card remains");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "Q2");
    }

    #[tokio::test]
    async fn all_invalid_cards_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cards": [ { "front": "", "back": "" } ]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("text").await.unwrap_err();
        assert!(matches!(err, GeneratorError::Empty));
    }

    #[tokio::test]
    async fn non_2xx_is_a_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("text").await.unwrap_err();
        assert!(matches!(err, GeneratorError::Status(503)));
    }
}
