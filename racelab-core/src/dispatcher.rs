//! Endpoint-to-strategy routing
//!
//! The dispatcher owns the long-lived strategy instances and maps endpoint
//! names onto them. The mapping is fixed at construction and read-only
//! afterwards, so concurrent routing needs no synchronization. The
//! dispatcher performs no correctness logic: it selects a strategy and
//! forwards the call, preserving each strategy's isolation policy.

use std::sync::Arc;

use tracing::debug;

use crate::delay::ShutdownSignal;
use crate::error::{CoreError, Result};
use crate::strategy::{
    CallLocalStrategy, HandlerStrategy, PerCallInstanceStrategy, SharedMutableStrategy,
};
use crate::types::{RequestContext, ResultRecord};

/// Endpoint served by the race-prone shared-mutable strategy
pub const UNSAFE_ENDPOINT: &str = "unsafe";
/// Endpoint served by the per-call-instance strategy
pub const SAFE_PROTOTYPE_ENDPOINT: &str = "safe-prototype";
/// Endpoint served by the call-local strategy
pub const SAFE_SINGLETON_ENDPOINT: &str = "safe-singleton";

/// Routes inbound calls to the strategy registered for an endpoint name.
///
/// Created once at process start; the two singleton-scoped strategies live
/// here for the process lifetime, while the per-call strategy allocates its
/// backing state inside each call.
pub struct Dispatcher {
    shared_mutable: Arc<SharedMutableStrategy>,
    per_call: Arc<PerCallInstanceStrategy>,
    call_local: Arc<CallLocalStrategy>,
}

impl Dispatcher {
    pub fn new(shutdown: ShutdownSignal) -> Self {
        Self {
            shared_mutable: Arc::new(SharedMutableStrategy::new(shutdown.clone())),
            per_call: Arc::new(PerCallInstanceStrategy::new(shutdown.clone())),
            call_local: Arc::new(CallLocalStrategy::new(shutdown)),
        }
    }

    /// The three registered endpoint names.
    pub fn endpoints() -> [&'static str; 3] {
        [
            UNSAFE_ENDPOINT,
            SAFE_PROTOTYPE_ENDPOINT,
            SAFE_SINGLETON_ENDPOINT,
        ]
    }

    fn strategy_for(&self, endpoint: &str) -> Option<Arc<dyn HandlerStrategy>> {
        match endpoint {
            UNSAFE_ENDPOINT => Some(self.shared_mutable.clone()),
            SAFE_PROTOTYPE_ENDPOINT => Some(self.per_call.clone()),
            SAFE_SINGLETON_ENDPOINT => Some(self.call_local.clone()),
            _ => None,
        }
    }

    /// Forward `ctx` to the strategy registered under `endpoint`.
    pub async fn route(&self, endpoint: &str, ctx: RequestContext) -> Result<ResultRecord> {
        let strategy = self
            .strategy_for(endpoint)
            .ok_or_else(|| CoreError::unknown_endpoint(endpoint))?;

        debug!(endpoint, id = %ctx.id, delay_ms = ctx.delay_ms, "routing call");
        Ok(strategy.handle(ctx).await)
    }
}
