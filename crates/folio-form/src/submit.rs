//! Submission capability.
//!
//! The gatekeeper does not know how a message is delivered. It hands the
//! captured [`FormValues`] to a [`Submitter`] once the configured latency has
//! elapsed and moves to Succeeded or Failed based on the result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::FormValues;

/// Acknowledgement of a delivered message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// Receipt reference, if the transport provides one
    pub reference: Option<String>,
}

/// Why a submission could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The receiving side refused the message.
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// The message could not be transmitted.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Delivers an accepted submission.
pub trait Submitter {
    fn submit(&mut self, payload: &FormValues) -> Result<Ack, SubmissionError>;
}

impl<F> Submitter for F
where
    F: FnMut(&FormValues) -> Result<Ack, SubmissionError>,
{
    fn submit(&mut self, payload: &FormValues) -> Result<Ack, SubmissionError> {
        self(payload)
    }
}

/// Stand-in for a real endpoint: acknowledges everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedSubmitter;

impl Submitter for SimulatedSubmitter {
    fn submit(&mut self, payload: &FormValues) -> Result<Ack, SubmissionError> {
        tracing::debug!(
            subject = %payload.subject,
            message_chars = payload.message.chars().count(),
            "Simulated delivery"
        );
        Ok(Ack::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_always_acknowledges() {
        let mut submitter = SimulatedSubmitter;
        let payload = FormValues::new("Al", "al@x.com", "Hi!", "This is ten+");
        assert_eq!(submitter.submit(&payload), Ok(Ack::default()));
    }

    #[test]
    fn closures_are_submitters() {
        let mut calls = 0;
        let mut submitter = |_: &FormValues| -> Result<Ack, SubmissionError> {
            calls += 1;
            Err(SubmissionError::Transport("offline".into()))
        };
        let result = submitter.submit(&FormValues::default());
        assert!(matches!(result, Err(SubmissionError::Transport(_))));
        assert_eq!(calls, 1);
    }
}
