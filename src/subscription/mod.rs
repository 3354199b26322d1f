//! Structures and traits for subscription management.
//!
//! This module defines the `Subscriber` type for handling observed values,
//! errors and completions, the `Subscription` handle for controlling one
//! active link to an observable, and the enums describing unsubscribe logic
//! and handles for awaiting asynchronous producers.
pub mod subscribe;
