//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Every query on user-owned data is
//! scoped by `user_id`; a row owned by someone else is indistinguishable from
//! a missing row.

pub mod deck_repo;
pub mod domain_repo;
pub mod flashcard_repo;
pub mod generation_repo;
pub mod password_reset_repo;
pub mod session_repo;
pub mod study_repo;
pub mod user_repo;

pub use deck_repo::DeckRepo;
pub use domain_repo::DomainRepo;
pub use flashcard_repo::FlashcardRepo;
pub use generation_repo::GenerationRepo;
pub use password_reset_repo::PasswordResetRepo;
pub use session_repo::SessionRepo;
pub use study_repo::StudyRepo;
pub use user_repo::UserRepo;
