use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rxl::subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic};
use rxl::{Observable, Observer};

/// Handle for driving a controlled observable by hand.
pub type ProducerHandle<T> = Arc<Mutex<Option<Subscriber<T>>>>;

pub fn producer_handle<T>() -> ProducerHandle<T> {
    Arc::new(Mutex::new(None))
}

/// An observable with no timing of its own: subscribing parks the subscriber
/// in `slot` so the test decides exactly when each notification fires and in
/// which order the sources interleave.
///
/// Teardown stores the number of times it ran in `teardowns`, which lets
/// tests assert that every underlying subscription is released exactly once.
pub fn generate_controlled_observable<T: 'static>(
    slot: &ProducerHandle<T>,
    teardowns: &Arc<Mutex<usize>>,
) -> Observable<T> {
    let slot = Arc::clone(slot);
    let teardowns = Arc::clone(teardowns);

    Observable::new(move |o| {
        *slot.lock().unwrap() = Some(o);
        let teardowns = Arc::clone(&teardowns);

        Subscription::new(
            UnsubscribeLogic::Logic(Box::new(move || {
                *teardowns.lock().unwrap() += 1;
            })),
            SubscriptionHandle::Nil,
        )
    })
}

pub fn emit<T>(slot: &ProducerHandle<T>, value: T) {
    slot.lock().unwrap().as_mut().unwrap().next(value);
}

pub fn complete<T>(slot: &ProducerHandle<T>) {
    slot.lock().unwrap().as_mut().unwrap().complete();
}

pub fn fail<T>(slot: &ProducerHandle<T>, e: Arc<dyn std::error::Error + Send + Sync>) {
    slot.lock().unwrap().as_mut().unwrap().error(e);
}

/// Emits `0..=end` from an OS thread, sleeping briefly between emissions, and
/// stops early when unsubscribed. `last_emit_assert` receives the last value
/// actually emitted before completion.
pub fn generate_u32_observable(
    end: u32,
    last_emit_assert: impl FnMut(u32) + Send + Sync + 'static,
) -> Observable<u32> {
    let last_emit_assert = Arc::new(Mutex::new(last_emit_assert));

    Observable::new(move |mut o: Subscriber<_>| {
        let done = Arc::new(Mutex::new(false));
        let done_c = Arc::clone(&done);
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            if let Ok(i) = rx.recv() {
                *done_c.lock().unwrap() = i;
            }
        });

        let last_emit_assert = Arc::clone(&last_emit_assert);
        let jh = std::thread::spawn(move || {
            let mut last_emit = 0;

            for i in 0..=end {
                if *done.lock().unwrap() {
                    break;
                }
                last_emit = i;
                o.next(i);
                // Important. Leave a pause after each emit so the unsubscribe
                // signal gets a chance to interrupt the loop.
                std::thread::sleep(Duration::from_millis(1));
            }
            o.complete();
            last_emit_assert.lock().unwrap()(last_emit);
        });

        Subscription::new(
            UnsubscribeLogic::Logic(Box::new(move || {
                if tx.send(true).is_err() {
                    eprintln!("receiver dropped");
                }
            })),
            SubscriptionHandle::JoinThread(jh),
        )
    })
}

/// Tokio-task variant of [`generate_u32_observable`].
pub fn generate_u32_observable_async(
    end: u32,
    last_emit_assert: impl FnMut(u32) + Send + Sync + 'static,
) -> Observable<u32> {
    let last_emit_assert = Arc::new(Mutex::new(last_emit_assert));

    Observable::new(move |mut o: Subscriber<_>| {
        let done = Arc::new(Mutex::new(false));
        let done_c = Arc::clone(&done);
        let (tx, mut rx) = tokio::sync::mpsc::channel(10);

        tokio::task::spawn(async move {
            if let Some(i) = rx.recv().await {
                *done_c.lock().unwrap() = i;
            }
        });

        let last_emit_assert = Arc::clone(&last_emit_assert);
        let jh = tokio::task::spawn(async move {
            let mut last_emit = 0;

            for i in 0..=end {
                if *done.lock().unwrap() {
                    break;
                }
                last_emit = i;
                o.next(i);
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
            o.complete();
            last_emit_assert.lock().unwrap()(last_emit);
        });

        Subscription::new(
            UnsubscribeLogic::Future(Box::pin(async move {
                if tx.send(true).await.is_err() {
                    eprintln!("receiver dropped");
                }
            })),
            SubscriptionHandle::JoinTask(jh),
        )
    })
}
