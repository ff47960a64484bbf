//! HTTP client with one typed method per API endpoint.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ClientError;
use crate::types::{
    AuthTokens, DbId, Deck, DeckListQuery, DeckPayload, Domain, Flashcard, FlashcardPayload,
    GenerationRequest, GenerationRequestDetail, HealthStatus, ReviewEvent, SessionSummary,
    StudySession, UserInfo,
};

/// Typed client for the fiszki REST API.
///
/// Holds a base URL and an optional bearer token. Cheap to clone; clones
/// share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token: None,
        }
    }

    /// Attach a bearer token used by all subsequent requests.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Replace the bearer token in place (e.g. after a refresh).
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request and decode a JSON body, mapping non-2xx to an error.
    async fn execute<T: DeserializeOwned>(
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let body = response.bytes().await.unwrap_or_default();
            Err(ClientError::from_status(status, &body))
        }
    }

    /// Send a request expecting no body on success (204 etc.).
    async fn execute_empty(builder: reqwest::RequestBuilder) -> Result<(), ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.bytes().await.unwrap_or_default();
            Err(ClientError::from_status(status, &body))
        }
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    pub async fn register(&self, email: &str, password: &str) -> Result<UserInfo, ClientError> {
        let body = json!({ "email": email, "password": password });
        Self::execute(self.request(Method::POST, "/api/v1/auth/register").json(&body)).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, ClientError> {
        let body = json!({ "email": email, "password": password });
        Self::execute(self.request(Method::POST, "/api/v1/auth/login").json(&body)).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, ClientError> {
        let body = json!({ "refresh_token": refresh_token });
        Self::execute(self.request(Method::POST, "/api/v1/auth/refresh").json(&body)).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        Self::execute_empty(self.request(Method::POST, "/api/v1/auth/logout")).await
    }

    /// Request a password reset. Always resolves to the fixed server message
    /// for a well-formed email.
    pub async fn request_password_reset(&self, email: &str) -> Result<String, ClientError> {
        #[derive(serde::Deserialize)]
        struct Message {
            message: String,
        }
        let body = json!({ "email": email });
        let message: Message =
            Self::execute(self.request(Method::POST, "/api/v1/auth/reset-password").json(&body))
                .await?;
        Ok(message.message)
    }

    pub async fn confirm_password_reset(
        &self,
        token: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let body = json!({ "token": token, "password": password });
        Self::execute_empty(
            self.request(Method::POST, "/api/v1/auth/reset-password/confirm")
                .json(&body),
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Domains
    // -----------------------------------------------------------------------

    /// Create a domain. Idempotent on the server: an existing name returns
    /// the original row.
    pub async fn create_domain(&self, name: &str) -> Result<Domain, ClientError> {
        let body = json!({ "name": name });
        Self::execute(self.request(Method::POST, "/api/v1/domains").json(&body)).await
    }

    pub async fn list_domains(&self) -> Result<Vec<Domain>, ClientError> {
        Self::execute(self.request(Method::GET, "/api/v1/domains")).await
    }

    // -----------------------------------------------------------------------
    // Decks
    // -----------------------------------------------------------------------

    pub async fn create_deck(&self, payload: &DeckPayload) -> Result<Deck, ClientError> {
        Self::execute(self.request(Method::POST, "/api/v1/decks").json(payload)).await
    }

    pub async fn list_decks(&self, query: &DeckListQuery) -> Result<Vec<Deck>, ClientError> {
        Self::execute(self.request(Method::GET, "/api/v1/decks").query(query)).await
    }

    pub async fn get_deck(&self, id: DbId) -> Result<Deck, ClientError> {
        Self::execute(self.request(Method::GET, &format!("/api/v1/decks/{id}"))).await
    }

    pub async fn update_deck(&self, id: DbId, payload: &DeckPayload) -> Result<Deck, ClientError> {
        Self::execute(
            self.request(Method::PATCH, &format!("/api/v1/decks/{id}"))
                .json(payload),
        )
        .await
    }

    pub async fn delete_deck(&self, id: DbId) -> Result<(), ClientError> {
        Self::execute_empty(self.request(Method::DELETE, &format!("/api/v1/decks/{id}"))).await
    }

    // -----------------------------------------------------------------------
    // Flashcards
    // -----------------------------------------------------------------------

    pub async fn create_flashcard(
        &self,
        deck_id: DbId,
        front: &str,
        back: &str,
    ) -> Result<Flashcard, ClientError> {
        let body = json!({ "front": front, "back": back });
        Self::execute(
            self.request(Method::POST, &format!("/api/v1/decks/{deck_id}/flashcards"))
                .json(&body),
        )
        .await
    }

    pub async fn list_flashcards(&self, deck_id: DbId) -> Result<Vec<Flashcard>, ClientError> {
        Self::execute(self.request(Method::GET, &format!("/api/v1/decks/{deck_id}/flashcards")))
            .await
    }

    pub async fn get_flashcard(&self, id: DbId) -> Result<Flashcard, ClientError> {
        Self::execute(self.request(Method::GET, &format!("/api/v1/flashcards/{id}"))).await
    }

    pub async fn update_flashcard(
        &self,
        id: DbId,
        payload: &FlashcardPayload,
    ) -> Result<Flashcard, ClientError> {
        Self::execute(
            self.request(Method::PATCH, &format!("/api/v1/flashcards/{id}"))
                .json(payload),
        )
        .await
    }

    pub async fn delete_flashcard(&self, id: DbId) -> Result<(), ClientError> {
        Self::execute_empty(self.request(Method::DELETE, &format!("/api/v1/flashcards/{id}")))
            .await
    }

    // -----------------------------------------------------------------------
    // Generation
    // -----------------------------------------------------------------------

    /// Create a generation request. HTTP 429 maps to
    /// [`ClientError::RateLimited`], whose display form is the literal
    /// `RATE_LIMIT`.
    pub async fn create_generation_request(
        &self,
        source_text: &str,
        deck_id: Option<DbId>,
    ) -> Result<GenerationRequest, ClientError> {
        let body = json!({ "source_text": source_text, "deck_id": deck_id });
        let response = self
            .request(Method::POST, "/api/v1/generation-requests")
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited);
        }
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let bytes = response.bytes().await.unwrap_or_default();
            Err(ClientError::from_status(status, &bytes))
        }
    }

    pub async fn list_generation_requests(&self) -> Result<Vec<GenerationRequest>, ClientError> {
        Self::execute(self.request(Method::GET, "/api/v1/generation-requests")).await
    }

    /// Fetch a request with its candidates; the poller calls this on a timer.
    pub async fn get_generation_request(
        &self,
        id: DbId,
    ) -> Result<GenerationRequestDetail, ClientError> {
        Self::execute(self.request(Method::GET, &format!("/api/v1/generation-requests/{id}")))
            .await
    }

    pub async fn accept_candidates(
        &self,
        request_id: DbId,
        deck_id: DbId,
        candidate_ids: &[DbId],
    ) -> Result<Vec<Flashcard>, ClientError> {
        let body = json!({ "deck_id": deck_id, "candidate_ids": candidate_ids });
        Self::execute(
            self.request(
                Method::POST,
                &format!("/api/v1/generation-requests/{request_id}/accept"),
            )
            .json(&body),
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Study
    // -----------------------------------------------------------------------

    pub async fn start_study_session(&self, deck_id: DbId) -> Result<StudySession, ClientError> {
        let body = json!({ "deck_id": deck_id });
        Self::execute(self.request(Method::POST, "/api/v1/study-sessions").json(&body)).await
    }

    pub async fn list_study_sessions(&self) -> Result<Vec<StudySession>, ClientError> {
        Self::execute(self.request(Method::GET, "/api/v1/study-sessions")).await
    }

    pub async fn complete_study_session(&self, id: DbId) -> Result<StudySession, ClientError> {
        Self::execute(self.request(
            Method::PATCH,
            &format!("/api/v1/study-sessions/{id}/complete"),
        ))
        .await
    }

    pub async fn record_review(
        &self,
        session_id: DbId,
        flashcard_id: DbId,
        rating: i16,
    ) -> Result<ReviewEvent, ClientError> {
        let body = json!({ "flashcard_id": flashcard_id, "rating": rating });
        Self::execute(
            self.request(
                Method::POST,
                &format!("/api/v1/study-sessions/{session_id}/reviews"),
            )
            .json(&body),
        )
        .await
    }

    pub async fn session_summary(&self, id: DbId) -> Result<SessionSummary, ClientError> {
        Self::execute(self.request(
            Method::GET,
            &format!("/api/v1/study-sessions/{id}/summary"),
        ))
        .await
    }

    // -----------------------------------------------------------------------
    // Health
    // -----------------------------------------------------------------------

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        Self::execute(self.request(Method::GET, "/health")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn server_error_resolves_to_an_error_value() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/domains"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": "An internal error occurred",
                "code": "INTERNAL_ERROR",
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).with_token("t");
        let result = client.list_domains().await;

        let err = result.expect_err("500 must resolve to Err, not panic");
        assert_eq!(err.to_string(), "An internal error occurred");
        match err {
            ClientError::Status { status, code, .. } => {
                assert_eq!(status, 500);
                assert_eq!(code, "INTERNAL_ERROR");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn rate_limited_generation_create_displays_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/generation-requests"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": "Too many generation requests, try again later",
                "code": "RATE_LIMIT",
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).with_token("t");
        let err = client
            .create_generation_request(&"x".repeat(200), None)
            .await
            .expect_err("429 must map to RateLimited");

        assert!(matches!(err, ClientError::RateLimited));
        assert_eq!(err.to_string(), "RATE_LIMIT");
    }

    #[tokio::test]
    async fn bearer_token_is_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/domains"))
            .and(wiremock::matchers::header(
                "authorization",
                "Bearer secret-token",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).with_token("secret-token");
        let domains = client.list_domains().await.expect("request should succeed");
        assert!(domains.is_empty());
    }

    #[tokio::test]
    async fn not_found_carries_status_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/decks/7"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": "Deck with id 7 not found",
                "code": "NOT_FOUND",
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).with_token("t");
        let err = client.get_deck(7).await.expect_err("404 must be an error");
        assert_eq!(err.to_string(), "Deck with id 7 not found");
    }
}
