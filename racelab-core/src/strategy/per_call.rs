//! Per-call-instance strategy ("safe-prototype")
//!
//! Runs the same write/delay/read algorithm as the shared strategy, but
//! against a backing instance allocated fresh for each call and dropped at
//! its end. No other call can reach that instance, so the read-back always
//! returns the id this call wrote. Costs one allocation per call.

use async_trait::async_trait;
use tracing::warn;

use crate::delay::{simulate_processing, DelayOutcome, ShutdownSignal};
use crate::strategy::{next_instance_id, HandlerStrategy};
use crate::types::{Discipline, RequestContext, ResultRecord};

pub const STRATEGY_NAME: &str = "per-call-instance";

/// Backing state scoped to one call
struct CallScopedState {
    instance_id: u64,
    stored_id: Option<String>,
}

/// Factory-style strategy: the long-lived object holds no request state,
/// every call allocates its own [`CallScopedState`].
pub struct PerCallInstanceStrategy {
    shutdown: ShutdownSignal,
}

impl PerCallInstanceStrategy {
    pub fn new(shutdown: ShutdownSignal) -> Self {
        Self { shutdown }
    }
}

#[async_trait]
impl HandlerStrategy for PerCallInstanceStrategy {
    fn strategy_name(&self) -> &'static str {
        STRATEGY_NAME
    }

    fn discipline(&self) -> Discipline {
        Discipline::PerCallInstance
    }

    async fn handle(&self, ctx: RequestContext) -> ResultRecord {
        // Fresh instance, exclusively owned by this call.
        let mut state = CallScopedState {
            instance_id: next_instance_id(),
            stored_id: None,
        };

        state.stored_id = Some(ctx.id.clone());

        if simulate_processing(ctx.delay_ms, &self.shutdown).await == DelayOutcome::Interrupted {
            warn!(id = %ctx.id, strategy = STRATEGY_NAME, "delay interrupted, proceeding to read-back");
        }

        let resolved_id = state.stored_id.take().unwrap_or_default();

        ResultRecord::new(
            &ctx,
            resolved_id,
            STRATEGY_NAME,
            self.discipline(),
            state.instance_id,
        )
    }
}
