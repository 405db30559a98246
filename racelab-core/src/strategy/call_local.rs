//! Call-local strategy ("safe-singleton")
//!
//! One long-lived shared instance, like the unsafe strategy, but no instance
//! field is ever written: the resolved id is a call-local binding derived
//! from the request context and held across the delay. There is no shared
//! mutable state to race on, so correctness is structural. This is the
//! recommended discipline: singleton efficiency with call-local data only.

use async_trait::async_trait;
use tracing::warn;

use crate::delay::{simulate_processing, DelayOutcome, ShutdownSignal};
use crate::strategy::{next_instance_id, HandlerStrategy};
use crate::types::{Discipline, RequestContext, ResultRecord};

pub const STRATEGY_NAME: &str = "call-local";

/// Stateless singleton handler; request data never touches instance fields
pub struct CallLocalStrategy {
    instance_id: u64,
    shutdown: ShutdownSignal,
}

impl CallLocalStrategy {
    pub fn new(shutdown: ShutdownSignal) -> Self {
        Self {
            instance_id: next_instance_id(),
            shutdown,
        }
    }
}

#[async_trait]
impl HandlerStrategy for CallLocalStrategy {
    fn strategy_name(&self) -> &'static str {
        STRATEGY_NAME
    }

    fn discipline(&self) -> Discipline {
        Discipline::CallLocal
    }

    async fn handle(&self, ctx: RequestContext) -> ResultRecord {
        // Call-local binding; lives on this task's stack for the whole call.
        let resolved_id = ctx.id.clone();

        if simulate_processing(ctx.delay_ms, &self.shutdown).await == DelayOutcome::Interrupted {
            warn!(id = %ctx.id, strategy = STRATEGY_NAME, "delay interrupted, proceeding to read-back");
        }

        ResultRecord::new(
            &ctx,
            resolved_id,
            STRATEGY_NAME,
            self.discipline(),
            self.instance_id,
        )
    }
}
