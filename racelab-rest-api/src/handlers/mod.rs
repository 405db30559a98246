//! REST API request handlers

mod health;
mod strategies;

pub use health::{health_check, root};
pub use strategies::{
    call_local, call_local_with_timeout, per_call_instance, per_call_instance_with_timeout,
    shared_mutable, shared_mutable_with_timeout,
};
