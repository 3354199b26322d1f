/**
 * Three inputs emit on independent, randomized timers: two flip a weighted
 * coin, the third produces a level between 0 and 100 and turns it into a
 * flag tracking sharp level changes. `combine_latest` merges them into a
 * stream of latest-value snapshots; the consumer ORs each snapshot together
 * and prints the result only when it changes.
 */
use std::{
    hash::Hasher,
    sync::{Arc, Mutex},
    time::Duration,
};

use rxl::subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic};
use rxl::{combine_latest, Observable, ObservableExt, Observer, Subscribeable, Unsubscribeable};

use tokio::{sync::mpsc::channel, task, time};

const RANDOMIZE_VALUE_MAX_TIMEOUT_MS: f64 = 1500.0;
const LEVEL_NORMALIZATION_FACTOR: f64 = 100.0;
const LEVEL_NORMALIZATION_FLOOR: f64 = 10.0;
const LEVEL_NORMALIZATION_CEILING: f64 = 20.0;

fn random_seed() -> u64 {
    std::hash::BuildHasher::build_hasher(&std::collections::hash_map::RandomState::new()).finish()
}

// Pseudorandom number generator from the "Xorshift RNGs" paper by George
// Marsaglia, scaled to the unit interval.
fn random_unit() -> impl FnMut() -> f64 + Send {
    let mut random: u64 = random_seed() | 1;
    move || {
        random ^= random << 13;
        random ^= random >> 17;
        random ^= random << 5;
        (random >> 11) as f64 / (1_u64 << 53) as f64
    }
}

/// An observable that repeatedly sleeps for a random slice of the timeout,
/// then feeds a fresh random number through `produce` and emits the result.
/// Unsubscribing cancels the timer loop.
fn randomized_source<T: Send + 'static>(
    produce: impl FnMut(f64) -> T + Send + 'static,
) -> Observable<T> {
    let produce = Arc::new(Mutex::new(produce));

    Observable::new(move |mut o: Subscriber<T>| {
        let produce = Arc::clone(&produce);
        let done = Arc::new(Mutex::new(false));
        let done_c = Arc::clone(&done);
        let (tx, mut rx) = channel(10);

        // Wait for a signal sent from the unsubscribe logic.
        task::spawn(async move {
            if let Some(true) = rx.recv().await {
                *done_c.lock().unwrap() = true;
            }
        });

        let jh = task::spawn(async move {
            let mut random = random_unit();
            loop {
                let pause = (random() * RANDOMIZE_VALUE_MAX_TIMEOUT_MS) as u64;
                time::sleep(Duration::from_millis(pause)).await;
                if *done.lock().unwrap() {
                    break;
                }
                let value = produce.lock().unwrap()(random());
                o.next(value);
            }
        });

        Subscription::new(
            UnsubscribeLogic::Future(Box::pin(async move {
                if tx.send(true).await.is_err() {
                    println!("Receiver dropped.");
                }
            })),
            SubscriptionHandle::JoinTask(jh),
        )
    })
}

#[tokio::main]
async fn main() {
    // The first two inputs share their logic: a fresh weighted coin flip on
    // every tick, with a 20% chance of coming up true.
    let chance_a = randomized_source(|r| r > 0.8);
    let chance_b = randomized_source(|r| r > 0.8);

    // The third input emits a level between 0 and 100 and reduces it to a
    // flag: true when the level jumped sharply above the previous one, false
    // when it dropped sharply below, unchanged-ish readings stay false.
    let mut previous_level = 0.0_f64;
    let level_flag = randomized_source(move |r| {
        let level = r * 100.0;
        if level > previous_level
            && (previous_level / level * LEVEL_NORMALIZATION_FACTOR >= LEVEL_NORMALIZATION_FLOOR
                || previous_level == 0.0)
        {
            previous_level = level;
            true
        } else if level < previous_level
            && level / previous_level * LEVEL_NORMALIZATION_FACTOR <= LEVEL_NORMALIZATION_CEILING
        {
            previous_level = level;
            false
        } else {
            false
        }
    });

    // Snapshots flow once all three inputs have produced; any true slot
    // flips the combined flag.
    let mut any_true =
        combine_latest(vec![chance_a, chance_b, level_flag]).map(|snapshot: Vec<bool>| {
            snapshot.contains(&true)
        });

    // Only react when the flag actually changed; the combinator itself does
    // not deduplicate consecutive identical snapshots.
    let mut previous_value = false;
    let subscription = any_true.subscribe(Subscriber::on_next(move |latest_is_true| {
        if latest_is_true != previous_value {
            println!("new value {}", latest_is_true);
            previous_value = latest_is_true;
        }
    }));

    time::sleep(Duration::from_secs(15)).await;

    // Stop all three timer loops.
    subscription.unsubscribe();
    time::sleep(Duration::from_millis(200)).await;
    println!("`main` function done");
}
