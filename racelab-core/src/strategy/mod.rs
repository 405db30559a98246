//! Handler strategies
//!
//! Three implementations of the same write/delay/read algorithm that differ
//! only in where the request id lives during the delay:
//!
//! - [`SharedMutableStrategy`] keeps it in a single process-wide field and
//!   loses updates under concurrency (the hazard this project demonstrates),
//! - [`PerCallInstanceStrategy`] allocates a fresh backing instance per call,
//! - [`CallLocalStrategy`] keeps it in a call-local binding on a shared
//!   instance, the recommended discipline.

mod call_local;
mod per_call;
mod shared;

pub use call_local::CallLocalStrategy;
pub use per_call::PerCallInstanceStrategy;
pub use shared::SharedMutableStrategy;

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::types::{Discipline, RequestContext, ResultRecord};

/// Common contract for the three request-handling strategies.
#[async_trait]
pub trait HandlerStrategy: Send + Sync {
    /// Human-readable strategy name, echoed in every result record
    fn strategy_name(&self) -> &'static str;

    /// The state-management discipline this strategy follows
    fn discipline(&self) -> Discipline;

    /// Resolve the request id after the requested delay.
    ///
    /// Never fails: an interrupted delay is logged and the call proceeds to
    /// its read-back regardless.
    async fn handle(&self, ctx: RequestContext) -> ResultRecord;
}

/// Process-wide counter backing the `instance_id` field of
/// [`crate::types::HandlerIdentity`].
pub(crate) fn next_instance_id() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}
