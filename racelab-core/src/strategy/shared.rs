//! The deliberately race-prone strategy
//!
//! One instance of this strategy exists for the whole process, and every
//! call funnels its request id through the same `stored_id` field. The
//! write -> delay -> read sequence is completely unprotected: while one call
//! is suspended, any other call may overwrite the field, so the read-back
//! can resolve to a different in-flight call's id. That lost update is the
//! behavior this project exists to demonstrate; do not add synchronization
//! around the sequence.
//!
//! Each individual field access takes the mutex for the duration of that one
//! access only (the Rust rendition of an atomic reference store on the JVM).
//! The lock is never held across the delay.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::warn;

use crate::delay::{simulate_processing, DelayOutcome, ShutdownSignal};
use crate::strategy::{next_instance_id, HandlerStrategy};
use crate::types::{Discipline, RequestContext, ResultRecord};

pub const STRATEGY_NAME: &str = "shared-mutable";

/// Singleton handler whose `stored_id` field is shared by all calls
pub struct SharedMutableStrategy {
    instance_id: u64,
    stored_id: Mutex<Option<String>>,
    shutdown: ShutdownSignal,
}

impl SharedMutableStrategy {
    pub fn new(shutdown: ShutdownSignal) -> Self {
        Self {
            instance_id: next_instance_id(),
            stored_id: Mutex::new(None),
            shutdown,
        }
    }

    fn store(&self, id: &str) {
        let mut slot = self
            .stored_id
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(id.to_owned());
    }

    fn load(&self) -> String {
        let slot = self
            .stored_id
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.clone().unwrap_or_default()
    }
}

#[async_trait]
impl HandlerStrategy for SharedMutableStrategy {
    fn strategy_name(&self) -> &'static str {
        STRATEGY_NAME
    }

    fn discipline(&self) -> Discipline {
        Discipline::SharedMutable
    }

    async fn handle(&self, ctx: RequestContext) -> ResultRecord {
        // Step 1: publish this call's id into the shared field.
        self.store(&ctx.id);

        // Step 2: suspend. Other calls run their own step 1 meanwhile.
        if simulate_processing(ctx.delay_ms, &self.shutdown).await == DelayOutcome::Interrupted {
            warn!(id = %ctx.id, strategy = STRATEGY_NAME, "delay interrupted, proceeding to read-back");
        }

        // Step 3: read whatever the field holds now. Under overlap this may
        // be another call's id.
        let resolved_id = self.load();

        ResultRecord::new(
            &ctx,
            resolved_id,
            STRATEGY_NAME,
            self.discipline(),
            self.instance_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    /// Two overlapping calls with equal delays must cross-resolve: the
    /// second write lands while the first call is still suspended.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn overlapping_calls_lose_updates() {
        let strategy = Arc::new(SharedMutableStrategy::new(ShutdownSignal::none()));

        let mut crossed = false;
        for _ in 0..5 {
            let alice = {
                let strategy = strategy.clone();
                tokio::spawn(async move { strategy.handle(RequestContext::new("alice", 200)).await })
            };
            tokio::time::sleep(Duration::from_millis(30)).await;
            let bob = {
                let strategy = strategy.clone();
                tokio::spawn(async move { strategy.handle(RequestContext::new("bob", 200)).await })
            };

            let (alice, bob) = (alice.await.unwrap(), bob.await.unwrap());
            if !alice.is_correct() || !bob.is_correct() {
                crossed = true;
                break;
            }
        }

        assert!(crossed, "no lost update observed across five staggered trials");
    }

    /// The canonical interleaving: alice writes, bob overwrites during her
    /// delay, alice reads back bob's id.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn staggered_write_overwrites_suspended_call() {
        let strategy = Arc::new(SharedMutableStrategy::new(ShutdownSignal::none()));

        let first = {
            let strategy = strategy.clone();
            tokio::spawn(async move { strategy.handle(RequestContext::new("alice", 300)).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        // Bob's delay ends well after alice's read-back would.
        let second = {
            let strategy = strategy.clone();
            tokio::spawn(async move { strategy.handle(RequestContext::new("bob", 10)).await })
        };

        let second = second.await.unwrap();
        let first = first.await.unwrap();

        assert_eq!(second.resolved_id, "bob");
        assert_eq!(
            first.resolved_id, "bob",
            "alice's read-back should observe bob's overwrite"
        );
    }

    #[tokio::test]
    async fn single_caller_is_always_correct() {
        let strategy = SharedMutableStrategy::new(ShutdownSignal::none());
        for i in 0..10 {
            let record = strategy.handle(RequestContext::new(format!("req-{i}"), 5)).await;
            assert!(record.is_correct());
        }
    }

    #[tokio::test]
    async fn interrupted_delay_still_reads_back() {
        let (controller, signal) = crate::delay::shutdown_channel();
        let strategy = Arc::new(SharedMutableStrategy::new(signal));

        let call = {
            let strategy = strategy.clone();
            tokio::spawn(async move { strategy.handle(RequestContext::new("carol", 10_000)).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.trigger();

        let record = call.await.unwrap();
        assert_eq!(record.resolved_id, "carol");
    }
}
