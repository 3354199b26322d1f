use std::sync::{Arc, Mutex};

use rxl::subscribe::Subscriber;

/// Builds a subscriber that records every notification it observes, together
/// with handles for inspecting them: emitted snapshots, a completion counter
/// and an error counter.
pub fn register_emissions_subscriber<T: Send + 'static>() -> (
    Subscriber<Vec<T>>,
    Arc<Mutex<Vec<Vec<T>>>>,
    Arc<Mutex<usize>>,
    Arc<Mutex<usize>>,
) {
    let nexts: Arc<Mutex<Vec<Vec<T>>>> = Arc::new(Mutex::new(Vec::new()));
    let nexts_c = Arc::clone(&nexts);

    let completes = Arc::new(Mutex::new(0));
    let completes_c = Arc::clone(&completes);

    let errors = Arc::new(Mutex::new(0));
    let errors_c = Arc::clone(&errors);

    let subscriber = Subscriber::new(
        move |snapshot| {
            // Track next() calls.
            nexts_c.lock().unwrap().push(snapshot);
        },
        move |_| {
            // Track error() calls.
            *errors_c.lock().unwrap() += 1;
        },
        move || {
            // Track complete() calls.
            *completes_c.lock().unwrap() += 1;
        },
    );
    (subscriber, nexts, completes, errors)
}
