use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{RatingAggregate, RatingSubmission};
use crate::services::gateway::MovieGateway;

pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit rating. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    /// Waiting for a star selection and a username.
    Idle,
    /// Local checks are running; never observable between calls.
    Validating,
    /// One request is in flight; further submits are refused.
    Submitting,
    /// Accepted. The form clears itself once `reset_at` passes.
    Success {
        aggregate: RatingAggregate,
        reset_at: Instant,
    },
    /// The request failed. Any input returns the form to `Idle`.
    Failed,
}

/// Star rating form for a single movie.
///
/// Submission is split into [`begin_submit`](Self::begin_submit) and
/// [`complete`](Self::complete) so an event loop can release the form while
/// the request is pending; [`submit`](Self::submit) runs both around a
/// gateway call.
#[derive(Debug)]
pub struct RatingForm {
    movie_id: i64,
    score: u8,
    username: String,
    state: FormState,
    message: Option<&'static str>,
    reset_delay: Duration,
}

impl RatingForm {
    pub fn new(movie_id: i64, reset_delay: Duration) -> Self {
        Self {
            movie_id,
            score: 0,
            username: String::new(),
            state: FormState::Idle,
            message: None,
            reset_delay,
        }
    }

    pub fn movie_id(&self) -> i64 {
        self.movie_id
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Selected stars, 0 while none are selected.
    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Validation or failure text to show under the form.
    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn select_score(&mut self, score: u8) {
        if self.accepts_input() {
            self.score = score;
        }
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        if self.accepts_input() {
            self.username = username.into();
        }
    }

    fn accepts_input(&mut self) -> bool {
        match self.state {
            FormState::Submitting | FormState::Success { .. } => {
                debug!(movie_id = self.movie_id, state = ?self.state, "Ignoring input");
                false
            }
            FormState::Failed => {
                self.state = FormState::Idle;
                true
            }
            FormState::Idle | FormState::Validating => true,
        }
    }

    /// Validates the fields and moves to `Submitting`.
    ///
    /// Returns the payload to send, or an error without touching the network:
    /// [`Error::Validation`] for bad input (the form stays editable) and
    /// [`Error::SubmissionInProgress`] while a request is pending or the
    /// success notice is still showing.
    pub fn begin_submit(&mut self) -> Result<RatingSubmission> {
        if matches!(self.state, FormState::Submitting | FormState::Success { .. }) {
            return Err(Error::SubmissionInProgress);
        }

        self.state = FormState::Validating;
        match RatingSubmission::new(self.movie_id, &self.username, self.score) {
            Ok(submission) => {
                self.state = FormState::Submitting;
                self.message = None;
                Ok(submission)
            }
            Err(e) => {
                debug!(movie_id = self.movie_id, error = %e, "Rating rejected locally");
                self.state = FormState::Idle;
                self.message = Some(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Records the outcome of the request started by `begin_submit`.
    pub fn complete(
        &mut self,
        result: Result<RatingAggregate>,
        now: Instant,
    ) -> Result<RatingAggregate> {
        if self.state != FormState::Submitting {
            warn!(movie_id = self.movie_id, state = ?self.state, "Rating result arrived outside Submitting");
            return result;
        }

        match result {
            Ok(aggregate) => {
                info!(
                    movie_id = self.movie_id,
                    rating_count = aggregate.rating_count,
                    "Rating submitted"
                );
                self.state = FormState::Success {
                    aggregate,
                    reset_at: now + self.reset_delay,
                };
                Ok(aggregate)
            }
            Err(e) => {
                warn!(movie_id = self.movie_id, error = %e, "Rating submission failed");
                self.state = FormState::Failed;
                self.message = Some(SUBMIT_FAILED_MESSAGE);
                Err(e)
            }
        }
    }

    pub async fn submit<G>(&mut self, gateway: &G) -> Result<RatingAggregate>
    where
        G: MovieGateway + ?Sized,
    {
        let submission = self.begin_submit()?;
        let result = gateway.submit_rating(&submission).await;
        self.complete(result, Instant::now())
    }

    /// Clears the form once the success notice has been shown long enough.
    pub fn reset_if_elapsed(&mut self, now: Instant) -> bool {
        match self.state {
            FormState::Success { reset_at, .. } if now >= reset_at => {
                self.state = FormState::Idle;
                self.score = 0;
                self.username.clear();
                self.message = None;
                true
            }
            _ => false,
        }
    }

    /// Waits out the success notice, if one is showing, and resets.
    pub async fn settle(&mut self) {
        if let FormState::Success { reset_at, .. } = self.state {
            tokio::time::sleep_until(reset_at).await;
            self.reset_if_elapsed(Instant::now());
        }
    }
}
