//! Editing session state machine for a single cat.
//!
//! ```text
//! Idle --open--> Loading --fetch ok--> Ready(draft) --submit--> Submitting
//!                   |                    ^    |                   |     |
//!                   |                    edit-+                   ok   err
//!                   v                                             v     v
//!                Failed(no draft)                          Success   Failed(draft)
//!                                                                     |  |
//!                                              submit (retry) <-------+  +--edit--> Ready
//! any state --dismiss--> Idle
//! ```
//!
//! Requests run without holding any lock. Each `open` and `dismiss` starts a
//! new generation, and a response is applied only if the session is still on
//! the generation that issued it and still waiting for it. Anything else is
//! a stale response and is dropped.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use catmander_core::types::CatId;
use catmander_db::models::cat::{Cat, UpdateCat};
use tokio::sync::watch;

use crate::client::CatClient;
use crate::config::EditorConfig;
use crate::draft::{DraftField, EditorDraft};
use crate::error::{EditorError, TransitionError};
use crate::source::CatSource;

/// Observable state of an editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    /// No session open.
    Idle,
    /// Fetching the current record.
    Loading,
    /// Draft is editable.
    Ready { draft: EditorDraft },
    /// Update request in flight; edits and further submits are rejected.
    Submitting { draft: EditorDraft },
    /// The service accepted the update.
    Success { cat: Cat },
    /// Fetch or submit failed. `draft` is `None` only when the initial
    /// fetch failed; otherwise it is the draft that was submitted.
    Failed {
        error: EditorError,
        draft: Option<EditorDraft>,
    },
}

impl EditorState {
    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "idle",
            EditorState::Loading => "loading",
            EditorState::Ready { .. } => "ready",
            EditorState::Submitting { .. } => "submitting",
            EditorState::Success { .. } => "success",
            EditorState::Failed { .. } => "failed",
        }
    }

    pub fn draft(&self) -> Option<&EditorDraft> {
        match self {
            EditorState::Ready { draft } | EditorState::Submitting { draft } => Some(draft),
            EditorState::Failed { draft, .. } => draft.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` while a request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, EditorState::Loading | EditorState::Submitting { .. })
    }
}

type SuccessCallback = Arc<dyn Fn(&Cat) + Send + Sync>;

struct Session {
    generation: u64,
    /// Last record returned by the service in this session.
    record: Option<Cat>,
    state: EditorState,
}

struct Shared {
    cat_id: CatId,
    source: Arc<dyn CatSource>,
    config: EditorConfig,
    session: Mutex<Session>,
    state_tx: watch::Sender<EditorState>,
    on_success: Mutex<Option<SuccessCallback>>,
}

/// Handle to the editing session for one cat. Clones share the session.
#[derive(Clone)]
pub struct CatEditor {
    shared: Arc<Shared>,
}

impl CatEditor {
    pub fn new(
        cat_id: impl Into<CatId>,
        source: Arc<dyn CatSource>,
        config: EditorConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(EditorState::Idle);
        Self {
            shared: Arc::new(Shared {
                cat_id: cat_id.into(),
                source,
                config,
                session: Mutex::new(Session {
                    generation: 0,
                    record: None,
                    state: EditorState::Idle,
                }),
                state_tx,
                on_success: Mutex::new(None),
            }),
        }
    }

    /// Editor backed by a [`CatClient`] built from `config`.
    pub fn connect(cat_id: impl Into<CatId>, config: EditorConfig) -> Self {
        let client = CatClient::from_config(&config);
        Self::new(cat_id, Arc::new(client), config)
    }

    pub fn cat_id(&self) -> &str {
        &self.shared.cat_id
    }

    /// Current state.
    pub fn state(&self) -> EditorState {
        self.lock().state.clone()
    }

    /// Observe the latest state. Intermediate transitions may be coalesced,
    /// so a slow reader can miss short-lived states such as `Ready`.
    pub fn subscribe(&self) -> watch::Receiver<EditorState> {
        self.shared.state_tx.subscribe()
    }

    /// Run `callback` with the updated record after each successful submit.
    /// Replaces any earlier callback.
    pub fn on_success(&self, callback: impl Fn(&Cat) + Send + Sync + 'static) {
        *self
            .shared
            .on_success
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(callback));
    }

    /// Open the session and fetch the current record.
    ///
    /// Resolves once the fetch has settled into `Ready` or `Failed`. Calling
    /// it while already `Loading` returns at once without a second fetch.
    pub async fn open(&self) -> Result<(), TransitionError> {
        let generation = {
            let mut session = self.lock();
            match session.state {
                EditorState::Idle => {}
                EditorState::Loading => {
                    tracing::debug!(
                        cat_id = %self.shared.cat_id,
                        "Open ignored, fetch already in flight"
                    );
                    return Ok(());
                }
                ref other => {
                    return Err(TransitionError::InvalidState {
                        action: "open",
                        state: other.name(),
                    })
                }
            }
            session.generation += 1;
            session.record = None;
            self.transition(&mut session, EditorState::Loading);
            session.generation
        };

        tracing::debug!(cat_id = %self.shared.cat_id, generation, "Fetching cat");
        let result = self
            .bounded(self.shared.source.fetch(&self.shared.cat_id))
            .await;

        let mut session = self.lock();
        if !Self::is_current(&session, generation, |s| matches!(s, EditorState::Loading)) {
            tracing::debug!(
                cat_id = %self.shared.cat_id,
                generation,
                "Discarding stale fetch response"
            );
            return Ok(());
        }
        match result {
            Ok(cat) => {
                let draft = EditorDraft::from_cat(&cat);
                session.record = Some(cat);
                self.transition(&mut session, EditorState::Ready { draft });
            }
            Err(error) => {
                tracing::warn!(cat_id = %self.shared.cat_id, error = %error, "Failed to fetch cat");
                self.transition(&mut session, EditorState::Failed { error, draft: None });
            }
        }
        Ok(())
    }

    /// Replace one field of the draft.
    ///
    /// Allowed in `Ready`, and in `Failed` when a draft survived the failed
    /// submit (the session returns to `Ready`).
    pub fn edit(&self, field: DraftField, value: impl Into<String>) -> Result<(), TransitionError> {
        let mut session = self.lock();
        let mut draft = match &session.state {
            EditorState::Ready { draft } => draft.clone(),
            EditorState::Failed {
                draft: Some(draft), ..
            } => draft.clone(),
            other => {
                return Err(TransitionError::InvalidState {
                    action: "edit",
                    state: other.name(),
                })
            }
        };
        draft.set(field, value);
        self.transition(&mut session, EditorState::Ready { draft });
        Ok(())
    }

    /// Submit the draft.
    ///
    /// Only the fields that differ from the fetched record are sent. A draft
    /// with no changes succeeds at once with the fetched record. Request
    /// failures end in `Failed` with the draft kept for a retry; the returned
    /// error is only for calls made in the wrong state.
    pub async fn submit(&self) -> Result<(), TransitionError> {
        let (generation, changes) = {
            let mut session = self.lock();
            let draft = match &session.state {
                EditorState::Ready { draft } => draft.clone(),
                EditorState::Failed {
                    draft: Some(draft), ..
                } => draft.clone(),
                EditorState::Submitting { .. } => return Err(TransitionError::SubmitInFlight),
                other => {
                    return Err(TransitionError::InvalidState {
                        action: "submit",
                        state: other.name(),
                    })
                }
            };

            if let Err(error) = draft.validate(self.shared.config.name_rule) {
                tracing::debug!(cat_id = %self.shared.cat_id, error = %error, "Draft rejected");
                self.transition(&mut session, EditorState::Failed { error, draft: Some(draft) });
                return Ok(());
            }

            let changes = match &session.record {
                Some(record) => draft.changes_from(record),
                None => draft.to_update(),
            };
            if changes.is_empty() {
                if let Some(cat) = session.record.clone() {
                    tracing::debug!(cat_id = %self.shared.cat_id, "Nothing to submit");
                    self.transition(&mut session, EditorState::Success { cat: cat.clone() });
                    drop(session);
                    self.notify_success(&cat);
                    return Ok(());
                }
            }

            self.transition(&mut session, EditorState::Submitting { draft });
            (session.generation, changes)
        };

        tracing::debug!(cat_id = %self.shared.cat_id, generation, "Submitting cat update");
        let result = self.send_update(&changes).await;

        let cat = {
            let mut session = self.lock();
            let draft = match &session.state {
                EditorState::Submitting { draft } if session.generation == generation => {
                    draft.clone()
                }
                _ => {
                    tracing::debug!(
                        cat_id = %self.shared.cat_id,
                        generation,
                        "Discarding stale submit response"
                    );
                    return Ok(());
                }
            };
            match result {
                Ok(cat) => {
                    tracing::info!(cat_id = %self.shared.cat_id, "Cat updated");
                    session.record = Some(cat.clone());
                    self.transition(&mut session, EditorState::Success { cat: cat.clone() });
                    cat
                }
                Err(error) => {
                    tracing::warn!(
                        cat_id = %self.shared.cat_id,
                        error = %error,
                        "Failed to update cat"
                    );
                    self.transition(
                        &mut session,
                        EditorState::Failed {
                            error,
                            draft: Some(draft),
                        },
                    );
                    return Ok(());
                }
            }
        };

        self.notify_success(&cat);
        Ok(())
    }

    /// Close the session from any state, discarding the draft. A request
    /// still in flight is not cancelled, but its response will be ignored.
    pub fn dismiss(&self) {
        let mut session = self.lock();
        if session.state.is_busy() {
            tracing::debug!(
                cat_id = %self.shared.cat_id,
                state = session.state.name(),
                "Dismissed with a request in flight"
            );
        }
        session.generation += 1;
        session.record = None;
        self.transition(&mut session, EditorState::Idle);
    }

    // ---- private helpers ----

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.shared
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the state and publish it. Called with the session lock held so
    /// subscribers observe transitions in order.
    fn transition(&self, session: &mut Session, next: EditorState) {
        session.state = next.clone();
        self.shared.state_tx.send_replace(next);
    }

    fn is_current(
        session: &Session,
        generation: u64,
        awaiting: impl Fn(&EditorState) -> bool,
    ) -> bool {
        session.generation == generation && awaiting(&session.state)
    }

    async fn send_update(&self, changes: &UpdateCat) -> Result<Cat, EditorError> {
        self.bounded(self.shared.source.update(&self.shared.cat_id, changes))
            .await
    }

    async fn bounded<T>(
        &self,
        request: impl Future<Output = Result<T, EditorError>>,
    ) -> Result<T, EditorError> {
        let limit = self.shared.config.request_timeout;
        match tokio::time::timeout(limit, request).await {
            Ok(result) => result,
            Err(_) => Err(EditorError::Timeout(limit)),
        }
    }

    fn notify_success(&self, cat: &Cat) {
        let callback = self
            .shared
            .on_success
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(callback) = callback {
            callback(cat);
        }
    }
}
