//! Latest-value combining of independently-producing observables.
//!
//! This module provides the `combine_latest` operator: given a sequence of
//! observables, it produces one observable that tracks the most recent value
//! seen from each input and emits an ordered snapshot of all of them each
//! time any single input produces a new value.
//!
//! Snapshots start flowing only once every input has produced at least one
//! value. The combined stream completes when every input has completed, so a
//! single input running dry never silences the others; an error from any
//! input ends the combined stream immediately and releases every underlying
//! subscription.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use crate::observer::Observer;
use crate::subscription::subscribe::{
    Subscribeable, Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic,
    Unsubscribeable,
};

use super::Observable;

/// Latest-value bookkeeping for one subscription to the combined observable.
///
/// Owned by exactly one subscription and dropped with it; re-subscribing the
/// combined observable allocates fresh slots.
struct LatestSlots<T> {
    values: Vec<Option<T>>,
    // Number of slots still waiting for their first value. Only ever
    // decreases; emissions are gated until it reaches zero.
    pending: usize,
}

impl<T: Clone> LatestSlots<T> {
    fn new(len: usize) -> Self {
        LatestSlots {
            values: vec![None; len],
            pending: len,
        }
    }

    /// Stores the latest value for one input slot and, once every slot has
    /// seen at least one value, returns the snapshot to emit.
    fn record(&mut self, index: usize, value: T) -> Option<Vec<T>> {
        if self.values[index].is_none() {
            self.pending -= 1;
        }
        self.values[index] = Some(value);

        if self.pending > 0 {
            return None;
        }
        // Slot order is input order, stable across every emission.
        Some(
            self.values
                .iter()
                .map(|v| v.clone().unwrap())
                .collect(),
        )
    }
}

type SharedSubscriptions = Arc<Mutex<Vec<Subscription>>>;

/// Drains and unsubscribes every underlying subscription collected so far.
///
/// Draining makes repeated calls no-ops, and the lock is released before any
/// producer teardown runs.
fn unsubscribe_all(subscriptions: &SharedSubscriptions) {
    let drained: Vec<Subscription> = subscriptions.lock().unwrap().drain(..).collect();
    for subscription in drained {
        subscription.unsubscribe();
    }
}

/// Combines a vector of observables into one observable that emits the
/// latest value from every input whenever any input produces a new value.
///
/// Each emission is a `Vec` with one slot per input, in input order. Nothing
/// is emitted until every input has produced at least one value; from then
/// on, every `next` from any single input produces exactly one combined
/// emission carrying that input's new value alongside the most recent values
/// of all the others. Consecutive identical snapshots are not deduplicated;
/// if a consumer only cares about changes, comparing against the previous
/// snapshot is its own concern.
///
/// The combined observable completes only once every input has completed;
/// inputs that complete early keep their last value in place and do not stop
/// emissions driven by the remaining inputs. If any input signals an error,
/// the error is forwarded downstream as is, every other underlying
/// subscription is unsubscribed, and no further notifications of any kind
/// follow. Unsubscribing from the combined observable unsubscribes every
/// underlying subscription exactly once.
///
/// An empty `sources` vector yields an observable that completes immediately
/// upon subscription without ever emitting.
///
/// # Example
///
/// ```no_run
/// use rxl::subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic};
/// use rxl::{combine_latest, Observable, Observer, Subscribeable};
///
/// let source = |values: Vec<u32>| {
///     Observable::new(move |mut o: Subscriber<u32>| {
///         for v in &values {
///             o.next(*v);
///         }
///         o.complete();
///         Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
///     })
/// };
///
/// let mut combined = combine_latest(vec![source(vec![1, 2]), source(vec![10])]);
///
/// combined.subscribe(Subscriber::new(
///     |snapshot| println!("latest {:?}", snapshot),
///     |_e| {},
///     || println!("all inputs completed"),
/// ));
/// ```
pub fn combine_latest<T>(mut sources: Vec<Observable<T>>) -> Observable<Vec<T>>
where
    T: Clone + Send + 'static,
{
    Observable::new(move |mut destination: Subscriber<Vec<T>>| {
        if sources.is_empty() {
            // No inputs means no latest values to snapshot.
            destination.complete();
            return Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil);
        }

        let source_count = sources.len();
        let slots = Arc::new(Mutex::new(LatestSlots::new(source_count)));
        let completed_sources = Arc::new(Mutex::new(0_usize));
        // Set exactly once, by whichever of downstream error, downstream
        // completion or teardown comes first. Every notification path checks
        // it so nothing is delivered past the terminal notification.
        let terminated = Arc::new(AtomicBool::new(false));
        let destination = Arc::new(Mutex::new(destination));
        let subscriptions: SharedSubscriptions =
            Arc::new(Mutex::new(Vec::with_capacity(source_count)));

        for (index, source) in sources.iter_mut().enumerate() {
            // An error from an earlier source ends the run before the
            // remaining sources are ever subscribed.
            if terminated.load(Ordering::SeqCst) {
                break;
            }

            let slots_cloned = Arc::clone(&slots);
            let destination_n = Arc::clone(&destination);
            let destination_e = Arc::clone(&destination);
            let destination_c = Arc::clone(&destination);
            let terminated_n = Arc::clone(&terminated);
            let terminated_e = Arc::clone(&terminated);
            let terminated_c = Arc::clone(&terminated);
            let subscriptions_e = Arc::clone(&subscriptions);
            let subscriptions_c = Arc::clone(&subscriptions);
            let completed_cloned = Arc::clone(&completed_sources);

            let u = Subscriber::new(
                move |v| {
                    if terminated_n.load(Ordering::SeqCst) {
                        return;
                    }
                    // The slot lock is held across the downstream call so
                    // concurrently firing producers cannot deliver their
                    // snapshots out of recording order.
                    let mut slots = slots_cloned.lock().unwrap();
                    if let Some(snapshot) = slots.record(index, v) {
                        let mut destination = destination_n.lock().unwrap();
                        // Re-check under the destination lock so an emission
                        // racing the terminal notification is dropped.
                        if !terminated_n.load(Ordering::SeqCst) {
                            destination.next(snapshot);
                        }
                    }
                },
                move |observable_error| {
                    if terminated_e.swap(true, Ordering::SeqCst) {
                        return;
                    }
                    destination_e.lock().unwrap().error(observable_error);
                    unsubscribe_all(&subscriptions_e);
                },
                move || {
                    if terminated_c.load(Ordering::SeqCst) {
                        return;
                    }
                    let mut completed = completed_cloned.lock().unwrap();
                    *completed += 1;
                    if *completed < source_count {
                        // Remaining live sources keep the combined stream
                        // going.
                        return;
                    }
                    drop(completed);

                    if !terminated_c.swap(true, Ordering::SeqCst) {
                        destination_c.lock().unwrap().complete();
                        unsubscribe_all(&subscriptions_c);
                    }
                },
            );

            let subscription = source.subscribe(u);

            if terminated.load(Ordering::SeqCst) {
                // The source errored inside its own subscribe call, before
                // its handle reached the shared list. Release it here and
                // leave the remaining sources untouched.
                subscription.unsubscribe();
                break;
            }
            subscriptions.lock().unwrap().push(subscription);
        }

        let terminated_teardown = Arc::clone(&terminated);
        Subscription::new(
            UnsubscribeLogic::Logic(Box::new(move || {
                // Suppress in-flight notifications before releasing anything,
                // then drain the shared list; both steps stay no-ops on
                // repeated teardown.
                terminated_teardown.store(true, Ordering::SeqCst);
                unsubscribe_all(&subscriptions);
            })),
            SubscriptionHandle::Nil,
        )
    })
}
