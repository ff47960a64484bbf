//! Repository for generation requests and their candidate cards.

use fiszki_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use fiszki_core::status::GenerationStatus;
use fiszki_core::types::DbId;
use sqlx::PgPool;

use crate::models::flashcard::{Flashcard, SOURCE_AI};
use crate::models::generation::{CandidateCard, GenerationCandidate, GenerationRequest};

const REQUEST_COLUMNS: &str =
    "id, user_id, deck_id, source_text, status, error_message, created_at, updated_at";

const CANDIDATE_COLUMNS: &str = "id, request_id, front, back, accepted, created_at";

/// Provides operations for generation requests and candidates.
pub struct GenerationRepo;

impl GenerationRepo {
    /// Insert a new request in `pending` state.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        source_text: &str,
        deck_id: Option<DbId>,
    ) -> Result<GenerationRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO generation_requests (user_id, deck_id, source_text)
             VALUES ($1, $2, $3)
             RETURNING {REQUEST_COLUMNS}"
        );
        sqlx::query_as::<_, GenerationRequest>(&query)
            .bind(user_id)
            .bind(deck_id)
            .bind(source_text)
            .fetch_one(pool)
            .await
    }

    /// Find a request by id, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<GenerationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {REQUEST_COLUMNS} FROM generation_requests WHERE id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, GenerationRequest>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's requests, most recent first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<GenerationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {REQUEST_COLUMNS} FROM generation_requests
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, GenerationRequest>(&query)
            .bind(user_id)
            .bind(clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// All candidates of a request, oldest first.
    pub async fn candidates_for_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<GenerationCandidate>, sqlx::Error> {
        let query = format!(
            "SELECT {CANDIDATE_COLUMNS} FROM generation_candidates
             WHERE request_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, GenerationCandidate>(&query)
            .bind(request_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Worker-side transitions
    // -----------------------------------------------------------------------

    /// Claim the oldest pending request, atomically moving it to `processing`.
    ///
    /// `FOR UPDATE SKIP LOCKED` lets multiple workers poll the same table
    /// without double-claiming a request.
    pub async fn claim_next_pending(
        pool: &PgPool,
    ) -> Result<Option<GenerationRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE generation_requests SET status = 'processing', updated_at = NOW()
             WHERE id = (
                 SELECT id FROM generation_requests
                 WHERE status = 'pending'
                 ORDER BY created_at ASC
                 LIMIT 1
                 FOR UPDATE SKIP LOCKED
             )
             RETURNING {REQUEST_COLUMNS}"
        );
        sqlx::query_as::<_, GenerationRequest>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Store generated candidates and mark the request `completed`,
    /// atomically.
    pub async fn complete_with_candidates(
        pool: &PgPool,
        request_id: DbId,
        cards: &[CandidateCard],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for card in cards {
            sqlx::query(
                "INSERT INTO generation_candidates (request_id, front, back) VALUES ($1, $2, $3)",
            )
            .bind(request_id)
            .bind(&card.front)
            .bind(&card.back)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "UPDATE generation_requests SET status = $2, error_message = NULL, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(request_id)
        .bind(GenerationStatus::Completed.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await
    }

    /// Mark a request `failed` with an operator-readable message.
    pub async fn mark_failed(
        pool: &PgPool,
        request_id: DbId,
        error_message: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE generation_requests SET status = $2, error_message = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(request_id)
        .bind(GenerationStatus::Failed.as_str())
        .bind(error_message)
        .execute(pool)
        .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Acceptance
    // -----------------------------------------------------------------------

    /// Fetch the given candidates of a request that are not yet accepted.
    pub async fn find_unaccepted_candidates(
        pool: &PgPool,
        request_id: DbId,
        candidate_ids: &[DbId],
    ) -> Result<Vec<GenerationCandidate>, sqlx::Error> {
        let query = format!(
            "SELECT {CANDIDATE_COLUMNS} FROM generation_candidates
             WHERE request_id = $1 AND accepted = false AND id = ANY($2)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, GenerationCandidate>(&query)
            .bind(request_id)
            .bind(candidate_ids)
            .fetch_all(pool)
            .await
    }

    /// Accept candidates into a deck: insert flashcards (source = `ai`) and
    /// flag the candidates, in one transaction. Returns the created cards.
    pub async fn accept_into_deck(
        pool: &PgPool,
        deck_id: DbId,
        candidates: &[GenerationCandidate],
    ) -> Result<Vec<Flashcard>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let card = sqlx::query_as::<_, Flashcard>(
                "INSERT INTO flashcards (deck_id, front, back, source)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, deck_id, front, back, source, created_at, updated_at",
            )
            .bind(deck_id)
            .bind(&candidate.front)
            .bind(&candidate.back)
            .bind(SOURCE_AI)
            .fetch_one(&mut *tx)
            .await?;
            created.push(card);

            sqlx::query("UPDATE generation_candidates SET accepted = true WHERE id = $1")
                .bind(candidate.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(created)
    }
}
