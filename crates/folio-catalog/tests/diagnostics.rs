//! Unknown catalog ids produce exactly one diagnostic and no state change.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use folio_catalog::{Catalog, Modal, ProjectId};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Counts error-level events.
#[derive(Clone, Default)]
struct ErrorCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn unknown_id_logs_once_and_mutates_nothing() {
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());

    let catalog = Catalog::builtin().unwrap();
    let mut modal = Modal::new();

    tracing::subscriber::with_default(subscriber, || {
        assert!(modal.open(&catalog, ProjectId(99)).is_err());
    });

    assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    assert!(!modal.is_open());
    assert!(!modal.scroll_locked());
}

#[test]
fn known_id_logs_no_error() {
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());

    let catalog = Catalog::builtin().unwrap();
    let mut modal = Modal::new();

    tracing::subscriber::with_default(subscriber, || {
        assert!(modal.open(&catalog, ProjectId(4)).is_ok());
    });

    assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    assert!(modal.is_open());
}
