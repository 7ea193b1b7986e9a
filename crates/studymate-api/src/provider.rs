//! Session lifecycle and backend operations.

use std::sync::{Arc, RwLock};

use tracing::{debug, info, instrument, warn};

use studymate_core::claims::Identity;
use studymate_core::error::{AuthError, Error, InvalidInputError};
use studymate_core::flashcards::{self, Flashcard};
use studymate_core::quiz::{AnswerSheet, Quiz};
use studymate_core::{AccessToken, BaseUrl, Credentials, Result, TokenPair, TokenStore};

use crate::authorizer::RequestAuthorizer;
use crate::client::HttpClient;
use crate::endpoints::{
    CHAT, ChatMessage, Document, GENERATE_FLASHCARDS, GENERATE_QUIZ, GenerateFlashcardsRequest,
    GenerateFlashcardsResponse, GenerateQuizRequest, GenerateQuizResponse, LOGIN, LEADERBOARD,
    LoginRequest, LoginResponse, NOTES, NoQuery, Note, PROFILE, PdfQuery, Profile, QuizReward,
    REGISTER, RegisterRequest, SUBMIT_QUIZ, SaveNoteRequest, SavedNote, SendChatRequest,
    SendChatResponse, SubmitQuizRequest, UPLOAD, UploadOutput, document_path,
};

/// The session lifecycle state.
///
/// `Authenticated` holds the identity decoded from the access token at the
/// last check; the invariant is that it is present iff a non-expired
/// access token existed in the store at that check. The check is lazy
/// (initialization and each authorized request), so a token can expire
/// mid-session without active invalidation until the next request.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Startup state, before [`SessionProvider::initialize`] has run.
    Initializing,
    /// A non-expired token was present at last check.
    Authenticated(Identity),
    /// No usable token.
    Anonymous,
}

impl SessionState {
    /// Whether the state is `Authenticated`.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Single source of truth for "is a user logged in, and as whom".
///
/// One instance is created at startup and shared by reference; it is the
/// only writer of the session state, while any number of readers take
/// snapshots. All backend operations go through it so the pre-request
/// expiry check has a single choke point.
///
/// # Thread Safety
///
/// Cheap to clone (internal `Arc`) and safe to share across tasks. State
/// mutations are atomic single replacements under a lock.
#[derive(Clone)]
pub struct SessionProvider {
    inner: Arc<ProviderInner>,
}

struct ProviderInner {
    client: HttpClient,
    store: Arc<dyn TokenStore>,
    authorizer: RequestAuthorizer,
    state: RwLock<SessionState>,
}

impl SessionProvider {
    /// Create a provider over a backend and a token store.
    ///
    /// The provider starts in `Initializing`; call
    /// [`initialize`](Self::initialize) before rendering anything that
    /// depends on the session.
    pub fn new(base: BaseUrl, store: Arc<dyn TokenStore>) -> Self {
        Self {
            inner: Arc::new(ProviderInner {
                client: HttpClient::new(base),
                authorizer: RequestAuthorizer::new(Arc::clone(&store)),
                store,
                state: RwLock::new(SessionState::Initializing),
            }),
        }
    }

    /// Resolve the startup state from persisted storage.
    ///
    /// A present, unexpired token yields `Authenticated` with its decoded
    /// identity; a present but expired (or undecodable) token clears the
    /// store and yields `Anonymous`; an absent token yields `Anonymous`
    /// directly. Runs synchronously so callers can complete it before any
    /// dependent output.
    #[instrument(skip(self))]
    pub fn initialize(&self) -> Result<()> {
        let next = match self.inner.store.read()? {
            None => SessionState::Anonymous,
            Some(pair) => match Identity::from_access_token(pair.access.as_str()) {
                Ok(identity) if !identity.is_expired(studymate_core::claims::now_epoch_seconds()) => {
                    debug!(subject = %identity.subject, "restored session from storage");
                    SessionState::Authenticated(identity)
                }
                Ok(_) | Err(_) => {
                    debug!("persisted token expired or malformed, clearing");
                    self.inner.store.clear()?;
                    SessionState::Anonymous
                }
            },
        };

        self.set_state(next);
        Ok(())
    }

    /// Exchange credentials for a token pair and enter `Authenticated`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the backend rejects
    /// the credentials; no state change in that case.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: Credentials) -> Result<Identity> {
        info!("logging in");

        let request = LoginRequest {
            username: credentials.username(),
            password: credentials.password(),
        };

        let response: LoginResponse = self
            .inner
            .client
            .post(LOGIN, &request, None)
            .await
            .map_err(|e| match e {
                Error::Api(api) if api.is_auth_error() || api.status == 400 => {
                    AuthError::InvalidCredentials.into()
                }
                other => other,
            })?;

        let pair = TokenPair::new(response.access, response.refresh);
        let identity = Identity::from_access_token(pair.access.as_str())?;
        self.inner.store.save(&pair)?;
        self.set_state(SessionState::Authenticated(identity.clone()));

        debug!(subject = %identity.subject, "login succeeded");
        Ok(identity)
    }

    /// Create an account, then log in with the same credentials.
    ///
    /// Registration by itself establishes no session; the follow-up login
    /// does.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::RegistrationRejected`] when the backend
    /// refuses the account (e.g. duplicate username); no state change.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<Identity> {
        info!("registering account");

        let request = RegisterRequest {
            username,
            email,
            password,
        };

        // The response body is the created account; nothing in it is
        // needed client-side.
        let _: serde_json::Value = self
            .inner
            .client
            .post(REGISTER, &request, None)
            .await
            .map_err(|e| match e {
                Error::Api(api) => AuthError::RegistrationRejected {
                    message: api.to_string(),
                }
                .into(),
                other => other,
            })?;

        self.login(Credentials::new(username, password)).await
    }

    /// Clear the session and enter `Anonymous`. Never fails; calling it
    /// while already logged out is a no-op.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        if let Err(error) = self.inner.store.clear() {
            warn!(%error, "failed to clear token store during logout");
        }
        self.set_state(SessionState::Anonymous);
        info!("logged out");
    }

    /// Snapshot of the current session state.
    pub fn state(&self) -> SessionState {
        self.inner.state.read().unwrap().clone()
    }

    /// The current identity, when authenticated.
    pub fn identity(&self) -> Option<Identity> {
        match self.state() {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    /// Whether a user is currently logged in.
    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// The backend base URL.
    pub fn base(&self) -> &BaseUrl {
        self.inner.client.base()
    }

    /// The refresh token, if one is persisted.
    ///
    /// Stored but unused: no client-side renewal flow exists, so expiry
    /// always forces a full logout.
    pub fn refresh_token(&self) -> Result<Option<studymate_core::RefreshToken>> {
        Ok(self.inner.store.read()?.map(|pair| pair.refresh))
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// List the caller's documents.
    #[instrument(skip(self))]
    pub async fn list_documents(&self) -> Result<Vec<Document>> {
        debug!("listing documents");
        let bearer = self.authorize()?;
        self.inner.client.get(UPLOAD, &NoQuery {}, bearer.as_ref()).await
    }

    /// Upload a document (multipart).
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_document(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadOutput> {
        debug!("uploading document");
        let bearer = self.authorize()?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")
            .map_err(crate::client::into_transport)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        self.inner
            .client
            .post_multipart(UPLOAD, form, bearer.as_ref())
            .await
    }

    /// Delete a document by id.
    #[instrument(skip(self))]
    pub async fn delete_document(&self, id: u64) -> Result<()> {
        debug!("deleting document");
        let bearer = self.authorize()?;
        self.inner
            .client
            .delete(&document_path(id), bearer.as_ref())
            .await
    }

    // ========================================================================
    // Notes
    // ========================================================================

    /// Fetch the note for a document.
    #[instrument(skip(self))]
    pub async fn note(&self, pdf_id: u64) -> Result<Note> {
        debug!("fetching note");
        let bearer = self.authorize()?;
        self.inner
            .client
            .get(NOTES, &PdfQuery { pdf_id }, bearer.as_ref())
            .await
    }

    /// Save the note for a document, replacing its content.
    #[instrument(skip(self, content))]
    pub async fn save_note(&self, pdf_id: u64, content: &str) -> Result<SavedNote> {
        debug!("saving note");
        let bearer = self.authorize()?;
        let request = SaveNoteRequest { pdf_id, content };
        self.inner.client.post(NOTES, &request, bearer.as_ref()).await
    }

    // ========================================================================
    // Chat
    // ========================================================================

    /// Fetch the chat history for a document.
    #[instrument(skip(self))]
    pub async fn chat_history(&self, pdf_id: u64) -> Result<Vec<ChatMessage>> {
        debug!("fetching chat history");
        let bearer = self.authorize()?;
        self.inner
            .client
            .get(CHAT, &PdfQuery { pdf_id }, bearer.as_ref())
            .await
    }

    /// Send a message to the tutor and return its reply.
    #[instrument(skip(self, message))]
    pub async fn send_message(&self, pdf_id: u64, message: &str) -> Result<String> {
        debug!("sending chat message");
        let bearer = self.authorize()?;
        let request = SendChatRequest { pdf_id, message };
        let response: SendChatResponse =
            self.inner.client.post(CHAT, &request, bearer.as_ref()).await?;
        Ok(response.response)
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Generate a quiz from a document.
    ///
    /// An empty `topic` means no topic focus.
    #[instrument(skip(self))]
    pub async fn generate_quiz(
        &self,
        pdf_id: u64,
        num_questions: u32,
        topic: &str,
    ) -> Result<Quiz> {
        debug!("generating quiz");
        let bearer = self.authorize()?;
        let request = GenerateQuizRequest {
            pdf_id,
            num_questions,
            topic,
        };
        let response: GenerateQuizResponse = self
            .inner
            .client
            .post(GENERATE_QUIZ, &request, bearer.as_ref())
            .await?;
        Quiz::from_generated(&response.quiz)
    }

    /// Generate flashcards from a document.
    #[instrument(skip(self))]
    pub async fn generate_flashcards(&self, pdf_id: u64, num_cards: u32) -> Result<Vec<Flashcard>> {
        debug!("generating flashcards");
        let bearer = self.authorize()?;
        let request = GenerateFlashcardsRequest { pdf_id, num_cards };
        let response: GenerateFlashcardsResponse = self
            .inner
            .client
            .post(GENERATE_FLASHCARDS, &request, bearer.as_ref())
            .await?;
        flashcards::cards_from_generated(&response.flashcards)
    }

    // ========================================================================
    // Quiz submission & gamification
    // ========================================================================

    /// Record a quiz score.
    #[instrument(skip(self))]
    pub async fn submit_quiz(&self, score: u32, total_questions: u32) -> Result<QuizReward> {
        debug!("submitting quiz score");
        let bearer = self.authorize()?;
        let request = SubmitQuizRequest {
            score,
            total_questions,
        };
        self.inner
            .client
            .post(SUBMIT_QUIZ, &request, bearer.as_ref())
            .await
    }

    /// Score a completed answer sheet and record the result.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::IncompleteQuiz`] without contacting
    /// the backend if any question is unanswered.
    pub async fn score_and_submit(
        &self,
        quiz: &Quiz,
        answers: &AnswerSheet,
    ) -> Result<(u32, QuizReward)> {
        if !quiz.is_complete(answers) {
            return Err(InvalidInputError::IncompleteQuiz {
                answered: answers.len(),
                total: quiz.len(),
            }
            .into());
        }

        let score = quiz.score(answers);
        let reward = self.submit_quiz(score, quiz.len() as u32).await?;
        Ok((score, reward))
    }

    /// Fetch the caller's gamification profile.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<Profile> {
        debug!("fetching profile");
        let bearer = self.authorize()?;
        self.inner
            .client
            .get(PROFILE, &NoQuery {}, bearer.as_ref())
            .await
    }

    /// Fetch the leaderboard (top profiles by XP).
    #[instrument(skip(self))]
    pub async fn leaderboard(&self) -> Result<Vec<Profile>> {
        debug!("fetching leaderboard");
        let bearer = self.authorize()?;
        self.inner
            .client
            .get(LEADERBOARD, &NoQuery {}, bearer.as_ref())
            .await
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Run the pre-request check and return the credential to attach.
    ///
    /// A detected dead session forces the `Anonymous` state before the
    /// error propagates, so the logout is observable to every reader even
    /// though an unrelated request triggered it.
    fn authorize(&self) -> Result<Option<AccessToken>> {
        match self.inner.authorizer.bearer() {
            Ok(bearer) => Ok(bearer),
            Err(Error::Auth(AuthError::SessionExpired)) => {
                self.set_state(SessionState::Anonymous);
                Err(AuthError::SessionExpired.into())
            }
            Err(other) => Err(other),
        }
    }

    fn set_state(&self, next: SessionState) {
        *self.inner.state.write().unwrap() = next;
    }
}

// Custom Debug impl that hides the token store contents
impl std::fmt::Debug for SessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionProvider")
            .field("base", self.inner.client.base())
            .field("state", &*self.inner.state.read().unwrap())
            .finish_non_exhaustive()
    }
}
