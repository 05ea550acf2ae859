//! Shared-view resolver use case
//!
//! Lets an unauthenticated party view one contract and its comments
//! through a capability token and submit feedback, without ever touching
//! the session store. All resolution failures collapse into a single
//! "invalid or expired" message so the client never leaks whether a token
//! ever existed.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        AnalysisSummary, Comment, ContractProjection, DomainError, FeedbackDraft, ShareToken,
    },
    ports::ISharingApi,
};

/// The single message shown for every resolution failure, regardless of
/// cause (invalid token, expired token, network error)
pub const LINK_EXPIRED_MESSAGE: &str = "This share link is invalid or has expired.";

/// Generic retryable message for a failed feedback submission
pub const FEEDBACK_FAILED_MESSAGE: &str = "Failed to submit feedback. Please try again.";

/// State of a mounted shared-contract page instance.
///
/// `Loading -> Ready | Expired`, terminal for that instance; `Ready` can
/// internally refresh its comment list without leaving `Ready`. The only
/// way back to `Loading` is a full re-resolution (a new mount).
#[derive(Debug, Clone)]
pub enum SharedViewState {
    /// Resolution in flight
    Loading,
    /// The projection resolved; comments may be refreshed in place
    Ready {
        /// Restricted contract projection
        contract: ContractProjection,
        /// Analysis metadata, absent while analysis is pending
        analysis: Option<AnalysisSummary>,
        /// Feedback comments in backend order
        comments: Vec<Comment>,
    },
    /// The link could not be resolved; `message` is always non-empty
    Expired {
        /// Uniform user-facing message
        message: String,
    },
}

impl SharedViewState {
    /// True while resolution is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, SharedViewState::Loading)
    }

    /// True once the projection resolved
    pub fn is_ready(&self) -> bool {
        matches!(self, SharedViewState::Ready { .. })
    }
}

/// Errors surfaced by the feedback submission flow
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    /// Client-side validation failed; nothing was sent
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// The submission itself failed; the draft is preserved
    #[error("{0}")]
    Submission(String),
}

/// Use case resolving one share token into a viewable projection.
///
/// One resolver instance backs one page; re-mounting (a new resolution)
/// bumps an internal epoch so a stale in-flight completion from a
/// previously abandoned resolution can never overwrite newer state.
pub struct SharedViewResolver {
    sharing_api: Arc<dyn ISharingApi>,
    state: Mutex<SharedViewState>,
    epoch: AtomicU64,
    draft: Mutex<FeedbackDraft>,
}

impl SharedViewResolver {
    /// Creates a resolver in the `Loading` state with an empty draft
    pub fn new(sharing_api: Arc<dyn ISharingApi>) -> Self {
        Self {
            sharing_api,
            state: Mutex::new(SharedViewState::Loading),
            epoch: AtomicU64::new(0),
            draft: Mutex::new(FeedbackDraft::empty()),
        }
    }

    /// A snapshot of the current view state
    pub fn state(&self) -> SharedViewState {
        self.state.lock().expect("view state lock poisoned").clone()
    }

    /// A snapshot of the current feedback draft
    pub fn draft(&self) -> FeedbackDraft {
        self.draft.lock().expect("draft lock poisoned").clone()
    }

    /// Edits the feedback draft in place
    pub fn update_draft(&self, edit: impl FnOnce(&mut FeedbackDraft)) {
        edit(&mut self.draft.lock().expect("draft lock poisoned"));
    }

    /// Resolves the shared projection for `token`.
    ///
    /// No authentication header is ever attached (the sharing port has no
    /// access to the token store). Every failure collapses into the
    /// uniform expired message. Concurrently, a resolution started before
    /// this one that completes later is discarded.
    pub async fn resolve(&self, token: &ShareToken) {
        let epoch = self.begin();
        debug!(%token, "Resolving shared contract");

        let next = match self.sharing_api.shared_contract(token).await {
            Ok(view) => {
                info!(title = %view.contract.title, "Shared contract resolved");
                SharedViewState::Ready {
                    contract: view.contract,
                    analysis: view.analysis,
                    comments: view.comments,
                }
            }
            Err(e) => {
                // Deliberately undifferentiated: not-found, expired and
                // transport failures all read the same to the viewer.
                debug!("Shared contract resolution failed: {e}");
                SharedViewState::Expired {
                    message: LINK_EXPIRED_MESSAGE.to_string(),
                }
            }
        };

        self.commit(epoch, next);
    }

    /// Validates and submits the current draft, then re-fetches the
    /// comment list so the display reflects backend-confirmed state
    /// including ordering (no local append).
    ///
    /// The draft is cleared only after confirmed success; on any failure
    /// it is preserved so typed input survives a transient error.
    pub async fn submit_feedback(&self, token: &ShareToken) -> Result<(), FeedbackError> {
        let draft = self.draft();
        draft.validate()?;

        let epoch = self.current_epoch();
        if let Err(e) = self.sharing_api.submit_feedback(token, &draft).await {
            debug!("Feedback submission failed: {e}");
            return Err(FeedbackError::Submission(FEEDBACK_FAILED_MESSAGE.to_string()));
        }

        *self.draft.lock().expect("draft lock poisoned") = FeedbackDraft::empty();
        info!("Feedback submitted");

        self.refresh_comments_at(token, epoch).await;
        Ok(())
    }

    /// Pure refresh of the comment list; used after a successful
    /// submission and nowhere else.
    pub async fn refresh_comments(&self, token: &ShareToken) {
        let epoch = self.current_epoch();
        self.refresh_comments_at(token, epoch).await;
    }

    async fn refresh_comments_at(&self, token: &ShareToken, epoch: u64) {
        match self.sharing_api.shared_comments(token).await {
            Ok(refreshed) => {
                let mut state = self.state.lock().expect("view state lock poisoned");
                if self.current_epoch() != epoch {
                    debug!("Discarding stale comment refresh");
                    return;
                }
                // Ready stays Ready; a refresh never regresses the state.
                if let SharedViewState::Ready { comments, .. } = &mut *state {
                    *comments = refreshed;
                }
            }
            Err(e) => {
                warn!("Comment refresh failed, keeping previous list: {e}");
            }
        }
    }

    /// Starts a new resolution epoch and resets to `Loading`
    fn begin(&self) -> u64 {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.lock().expect("view state lock poisoned") = SharedViewState::Loading;
        epoch
    }

    fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Commits a resolution result unless a newer resolution has started
    fn commit(&self, epoch: u64, next: SharedViewState) {
        let mut state = self.state.lock().expect("view state lock poisoned");
        if self.current_epoch() != epoch {
            debug!("Discarding stale resolution result");
            return;
        }
        *state = next;
    }
}
