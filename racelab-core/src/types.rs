//! Request and result data model
//!
//! `RequestContext` is the per-call input, `ResultRecord` the per-call
//! output. Both are created and destroyed within the scope of a single call;
//! the server never retains them after the response is sent.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-call input: the requested id and the requested processing delay.
///
/// Immutable once constructed; owned exclusively by the call that created it
/// until a strategy consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Opaque request identifier supplied by the caller
    pub id: String,
    /// Simulated processing time in milliseconds
    pub delay_ms: u64,
}

impl RequestContext {
    pub fn new(id: impl Into<String>, delay_ms: u64) -> Self {
        Self {
            id: id.into(),
            delay_ms,
        }
    }
}

/// The rule governing where request data lives during processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Discipline {
    /// One process-wide instance field, mutated by every call
    SharedMutable,
    /// A fresh backing instance allocated for each call
    PerCallInstance,
    /// No instance state at all; the id stays in a call-local binding
    CallLocal,
}

impl Discipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::SharedMutable => "shared-mutable",
            Discipline::PerCallInstance => "per-call-instance",
            Discipline::CallLocal => "call-local",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which backing instance and worker thread handled a call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerIdentity {
    /// Monotonic id assigned to the backing instance at construction
    pub instance_id: u64,
    /// Name of the OS thread that produced the record
    pub thread: String,
}

impl HandlerIdentity {
    /// Capture the identity of the current execution context.
    pub fn capture(instance_id: u64) -> Self {
        let thread = std::thread::current()
            .name()
            .unwrap_or("unnamed")
            .to_string();
        Self {
            instance_id,
            thread,
        }
    }
}

/// Produced once per call, immutable, returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    /// The id the caller sent
    pub requested_id: String,
    /// The id the strategy read back after the delay
    pub resolved_id: String,
    /// Echo of the requested delay
    pub delay_ms: u64,
    /// Name of the strategy that handled the call
    pub strategy: String,
    /// State-management discipline of that strategy
    pub discipline: Discipline,
    /// Wall-clock completion time, milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    /// Backing instance and thread that handled the call
    pub handler: HandlerIdentity,
}

impl ResultRecord {
    pub fn new(
        ctx: &RequestContext,
        resolved_id: String,
        strategy: &'static str,
        discipline: Discipline,
        instance_id: u64,
    ) -> Self {
        Self {
            requested_id: ctx.id.clone(),
            resolved_id,
            delay_ms: ctx.delay_ms,
            strategy: strategy.to_string(),
            discipline,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            handler: HandlerIdentity::capture(instance_id),
        }
    }

    /// True when the read-back id matches the id this call sent.
    pub fn is_correct(&self) -> bool {
        self.resolved_id == self.requested_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discipline_serializes_kebab_case() {
        let json = serde_json::to_string(&Discipline::PerCallInstance).unwrap();
        assert_eq!(json, "\"per-call-instance\"");
        assert_eq!(Discipline::SharedMutable.as_str(), "shared-mutable");
        assert_eq!(Discipline::CallLocal.to_string(), "call-local");
    }

    #[test]
    fn result_record_correctness_check() {
        let ctx = RequestContext::new("alice", 0);
        let ok = ResultRecord::new(&ctx, "alice".into(), "test", Discipline::CallLocal, 1);
        assert!(ok.is_correct());

        let bad = ResultRecord::new(&ctx, "bob".into(), "test", Discipline::SharedMutable, 1);
        assert!(!bad.is_correct());
        assert_eq!(bad.requested_id, "alice");
        assert_eq!(bad.delay_ms, 0);
    }
}
