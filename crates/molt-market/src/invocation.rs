//! Invocation requests handed off to the external executor.
//!
//! The marketplace only emits requests; executing the job and returning its
//! result happen outside this crate.

use chrono::{DateTime, Utc};
use molt_registry::AccountId;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Receiving end handed to the executor.
pub type InvocationReceiver = mpsc::UnboundedReceiver<InvocationRequest>;

/// Sending end held by the marketplace.
pub(crate) type InvocationSender = mpsc::UnboundedSender<InvocationRequest>;

/// Creates the invocation channel.
pub(crate) fn channel() -> (InvocationSender, InvocationReceiver) {
    mpsc::unbounded_channel()
}

/// A paid request to run a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Name of the function to run.
    pub function: String,
    /// Opaque payload passed to the function.
    pub payload: String,
    /// Caller-chosen identifier used to correlate the result.
    pub invocation_id: String,
    /// Account that paid for the invocation.
    pub caller: AccountId,
    /// When the settlement committed.
    pub requested_at: DateTime<Utc>,
}
