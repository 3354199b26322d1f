use std::{error::Error, sync::Arc};

/// The three-callback capability that an observable pushes notifications into.
///
/// After `error` or `complete` is delivered, a well-behaved producer delivers
/// no further notifications on that subscription.
pub trait Observer {
    type NextFnType;

    fn next(&mut self, _: Self::NextFnType);
    fn complete(&mut self);
    fn error(&mut self, _: Arc<dyn Error + Send + Sync>);
}
