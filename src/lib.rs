//! `rxl` provides a primitive for combining multiple independently-producing
//! streams of values into a single stream that emits the latest known value
//! from every input whenever any one input produces a new value.
//!
//! The building blocks are the classic push-based reactive trio:
//!
//! - [`Observable`] — a lazy producer of values, created from a subscribe
//!   function that starts producing only once subscribed and returns the
//!   teardown for that production session.
//! - [`Subscriber`] — the observer handed to `subscribe`, built from `next`,
//!   `error` and `complete` closures.
//! - [`Subscription`] — the live handle for one active link between an
//!   observable and a subscriber, used to unsubscribe or to await
//!   asynchronous producers.
//!
//! On top of them sits [`combine_latest`], the core of the crate: it
//! subscribes to N observables, tracks the most recent value seen from each,
//! and emits an ordered snapshot each time any input produces a value, once
//! every input has produced at least one. The combined stream completes only
//! when every input has completed, errors as soon as any input errors, and
//! releases every underlying subscription exactly once on teardown.
//!
//! ```no_run
//! use rxl::{combine_latest, Observable, Observer, Subscribeable};
//! use rxl::subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic};
//!
//! let source = |base: i32| {
//!     Observable::new(move |mut o: Subscriber<i32>| {
//!         o.next(base);
//!         o.next(base + 1);
//!         o.complete();
//!         Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
//!     })
//! };
//!
//! let mut combined = combine_latest(vec![source(10), source(20)]);
//! combined.subscribe(Subscriber::on_next(|snapshot: Vec<i32>| {
//!     println!("latest: {:?}", snapshot);
//! }));
//! ```
//!
//! [`Subscriber`]: subscribe::Subscriber
//! [`Subscription`]: subscribe::Subscription

mod observable;
mod observer;
mod subscription;

pub use observable::{combine_latest, Observable, ObservableExt};
pub use observer::Observer;
pub use subscription::subscribe::{Subscribeable, Unsubscribeable};

/// Types for handling subscriptions: the `Subscriber` observer, the
/// `Subscription` handle, and the unsubscribe logic it owns.
pub mod subscribe {
    pub use crate::subscription::subscribe::{
        Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic,
    };
}
