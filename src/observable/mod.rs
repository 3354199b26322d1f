//! The `observable` module provides the building blocks for creating and
//! combining observables.

use std::sync::{Arc, Mutex};

use crate::observer::Observer;
use crate::subscription::subscribe::{Subscribeable, Subscriber, Subscription};

mod combine_latest;

pub use combine_latest::combine_latest;


/// The `Observable` struct represents a lazy source of values that can be
/// observed and combined.
///
/// An `Observable` is created from a subscribe function and does nothing
/// until [`subscribe`] is called on it. Each call to `subscribe` invokes the
/// subscribe function again, starting a fresh, independent production
/// session; state captured inside the subscribe function (counters, timers)
/// belongs to that session alone and is released by the session's teardown.
///
/// # Example: basic synchronous `Observable`
///
/// This simple `Observable` emits values and completes. It returns an empty
/// `Subscription`, making it unable to be unsubscribed from; operators and
/// consumers that rely on cancellation need a real teardown instead.
///
/// ```no_run
/// use rxl::subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic};
/// use rxl::{Observable, Observer, Subscribeable};
///
/// // Create a custom observable that emits values from 1 to 10.
/// let mut emit_10_observable = Observable::new(|mut subscriber| {
///     let mut i = 1;
///
///     while i <= 10 {
///         // Emit the value to the subscriber.
///         subscriber.next(i);
///         i += 1;
///     }
///     // Signal completion to the subscriber.
///     subscriber.complete();
///
///     // Return the empty subscription.
///     Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
/// });
///
/// let observer = Subscriber::new(
///     |v| println!("Emitted {}", v),
///     |_e| {},
///     || println!("Completed"),
/// );
///
/// // Observables are cold: without this call nothing is emitted.
/// emit_10_observable.subscribe(observer);
/// ```
///
/// # Example: asynchronous `Observable` with `unsubscribe`
///
/// Emits values from an OS thread and returns a `Subscription` whose
/// teardown signals the thread to stop. The same shape works with `Tokio`
/// tasks and `UnsubscribeLogic::Future`.
///
/// ```no_run
/// use std::{
///     sync::{Arc, Mutex},
///     time::Duration,
/// };
///
/// use rxl::subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic};
/// use rxl::{Observable, Observer, Subscribeable};
///
/// const UNSUBSCRIBE_SIGNAL: bool = true;
///
/// let observable = Observable::new(|mut o: Subscriber<i32>| {
///     let done = Arc::new(Mutex::new(false));
///     let done_c = Arc::clone(&done);
///     let (tx, rx) = std::sync::mpsc::channel();
///
///     // Wait for a signal sent from the unsubscribe logic.
///     std::thread::spawn(move || {
///         if let Ok(UNSUBSCRIBE_SIGNAL) = rx.recv() {
///             *done_c.lock().unwrap() = UNSUBSCRIBE_SIGNAL;
///         }
///     });
///
///     let join_handle = std::thread::spawn(move || {
///         for i in 0..=10000 {
///             if *done.lock().unwrap() == UNSUBSCRIBE_SIGNAL {
///                 break;
///             }
///             o.next(i);
///             std::thread::sleep(Duration::from_millis(1));
///         }
///         o.complete();
///     });
///
///     Subscription::new(
///         UnsubscribeLogic::Logic(Box::new(move || {
///             if tx.send(UNSUBSCRIBE_SIGNAL).is_err() {
///                 println!("Receiver dropped.");
///             }
///         })),
///         SubscriptionHandle::JoinThread(join_handle),
///     )
/// });
/// ```
pub struct Observable<T> {
    subscribe_fn: Box<dyn FnMut(Subscriber<T>) -> Subscription + Send + Sync>,
}

impl<T> Observable<T> {
    /// Creates a new `Observable` with the provided subscribe function.
    ///
    /// The subscribe function `sf` defines the behavior of the `Observable`
    /// when subscribed: it receives the `Subscriber`, manages the delivery of
    /// values to it, and returns a `Subscription` that carries the teardown
    /// for that production session and, for asynchronous observables, the
    /// handle for awaiting its `Tokio` task or OS thread.
    pub fn new(sf: impl FnMut(Subscriber<T>) -> Subscription + Send + Sync + 'static) -> Self {
        Observable {
            subscribe_fn: Box::new(sf),
        }
    }
}

impl<T: 'static> Subscribeable for Observable<T> {
    type ObsType = T;

    fn subscribe(&mut self, v: Subscriber<Self::ObsType>) -> Subscription {
        (self.subscribe_fn)(v)
    }
}

/// The `ObservableExt` trait provides extension methods available on every
/// `Subscribeable`, allowing observables to be transformed and combined.
pub trait ObservableExt<T: 'static>: Subscribeable<ObsType = T> {
    /// Transforms the items emitted by the observable using a transformation
    /// function.
    ///
    /// The transformation function `f` is applied to each item emitted by the
    /// observable, and the resulting value is emitted by the resulting
    /// observable.
    fn map<U, F>(mut self, f: F) -> Observable<U>
    where
        Self: Sized + Send + Sync + 'static,
        F: (FnOnce(T) -> U) + Copy + Sync + Send + 'static,
        U: 'static,
    {
        Observable::new(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);

            let u = Subscriber::new(
                move |v| {
                    let t = f(v);
                    o_shared.lock().unwrap().next(t);
                },
                move |observable_error| {
                    o_cloned_e.lock().unwrap().error(observable_error);
                },
                move || {
                    o_cloned_c.lock().unwrap().complete();
                },
            );
            self.subscribe(u)
        })
    }

    /// Filters the items emitted by the observable based on a predicate
    /// function.
    ///
    /// Only items for which the predicate function returns `true` will be
    /// emitted by the resulting observable.
    fn filter<P>(mut self, predicate: P) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
        P: (FnOnce(&T) -> bool) + Copy + Sync + Send + 'static,
    {
        Observable::new(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);

            let u = Subscriber::new(
                move |v| {
                    if predicate(&v) {
                        o_shared.lock().unwrap().next(v);
                    }
                },
                move |observable_error| {
                    o_cloned_e.lock().unwrap().error(observable_error);
                },
                move || {
                    o_cloned_c.lock().unwrap().complete();
                },
            );
            self.subscribe(u)
        })
    }

    /// Combines this observable with a vector of observables of the same
    /// item type, emitting a snapshot of the latest values whenever any of
    /// them produces a new value.
    ///
    /// This observable occupies the first snapshot slot; `sources` follow in
    /// order. See [`combine_latest`] for the full contract.
    fn combine_latest(self, sources: Vec<Observable<T>>) -> Observable<Vec<T>>
    where
        Self: Sized + Send + Sync + 'static,
        T: Clone + Send,
    {
        let mut this = self;
        let first = Observable::new(move |s| this.subscribe(s));

        let mut all = Vec::with_capacity(sources.len() + 1);
        all.push(first);
        all.extend(sources);
        combine_latest(all)
    }
}

impl<O, T: 'static> ObservableExt<T> for O where O: Subscribeable<ObsType = T> {}
