//! Backend endpoint paths and request/response types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Exchange credentials for a token pair.
pub const LOGIN: &str = "/auth/login/";

/// Create an account (does not establish a session).
pub const REGISTER: &str = "/auth/register/";

/// List documents (GET) or upload one (multipart POST).
pub const UPLOAD: &str = "/core/upload/";

/// Fetch or save per-document notes.
pub const NOTES: &str = "/core/notes/";

/// Chat history (GET) or send a message (POST).
pub const CHAT: &str = "/core/chat/";

/// Generate a quiz from a document.
pub const GENERATE_QUIZ: &str = "/core/generate/quiz/";

/// Generate flashcards from a document.
pub const GENERATE_FLASHCARDS: &str = "/core/generate/flashcards/";

/// Record a quiz score.
pub const SUBMIT_QUIZ: &str = "/core/submit/quiz/";

/// The caller's gamification profile.
pub const PROFILE: &str = "/gamification/profile/";

/// Top profiles by XP.
pub const LEADERBOARD: &str = "/gamification/leaderboard/";

/// Path for deleting a single document.
pub fn document_path(id: u64) -> String {
    format!("/core/documents/{id}/")
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
}

/// Request body for registration.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// A document as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    /// Server-side file path or URL.
    pub file: String,
    pub uploaded_at: String,
    #[serde(default)]
    pub extracted_text: Option<String>,
}

/// Response from a document upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutput {
    pub pdf_id: u64,
    pub filename: String,
    pub pages: u32,
    pub text_length: u64,
}

/// Query parameters for per-document endpoints.
#[derive(Debug, Serialize)]
pub struct PdfQuery {
    pub pdf_id: u64,
}

/// Marker for endpoints that take no query parameters.
#[derive(Debug, Serialize)]
pub struct NoQuery {}

/// A saved note for a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Request body for saving a note.
#[derive(Debug, Serialize)]
pub struct SaveNoteRequest<'a> {
    pub pdf_id: u64,
    pub content: &'a str,
}

/// Response from saving a note.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedNote {
    pub status: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A single chat message in a document's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `"user"` or `"assistant"`.
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Request body for sending a chat message.
#[derive(Debug, Serialize)]
pub struct SendChatRequest<'a> {
    pub pdf_id: u64,
    pub message: &'a str,
}

/// Response from sending a chat message.
#[derive(Debug, Deserialize)]
pub struct SendChatResponse {
    /// The tutor's reply.
    pub response: String,
}

/// Request body for quiz generation.
#[derive(Debug, Serialize)]
pub struct GenerateQuizRequest<'a> {
    pub pdf_id: u64,
    pub num_questions: u32,
    /// Empty string means no topic focus.
    pub topic: &'a str,
}

/// Response from quiz generation; the quiz itself is JSON in a string.
#[derive(Debug, Deserialize)]
pub struct GenerateQuizResponse {
    pub quiz: String,
}

/// Request body for flashcard generation.
#[derive(Debug, Serialize)]
pub struct GenerateFlashcardsRequest {
    pub pdf_id: u64,
    pub num_cards: u32,
}

/// Response from flashcard generation; the cards are JSON in a string.
#[derive(Debug, Deserialize)]
pub struct GenerateFlashcardsResponse {
    pub flashcards: String,
}

/// Request body for recording a quiz score.
#[derive(Debug, Serialize)]
pub struct SubmitQuizRequest {
    pub score: u32,
    pub total_questions: u32,
}

/// Response from recording a quiz score.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizReward {
    pub xp_earned: u32,
    pub new_xp: u64,
    pub new_rank: String,
}

/// An earned achievement on a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub earned_at: Option<String>,
}

/// A past quiz result on a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: u32,
    pub total_questions: u32,
    pub xp_earned: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A gamification profile; the leaderboard is a list of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub xp: u64,
    pub weekly_xp: u64,
    pub level: u32,
    pub rank: String,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub quiz_history: Vec<QuizResult>,
}

/// Backend error body.
///
/// App views report `{"error": ...}`; the auth layer reports
/// `{"detail": ..., "code": ...}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub detail: Option<String>,
    pub code: Option<String>,
}
