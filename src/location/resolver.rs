use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::watch;

use crate::conf::GeocodingConfig;
use crate::model::{Coordinate, ResolvedLocation};

use super::address::normalize_address;
use super::debounce::Debouncer;
use super::geocoder::{GeocodeCandidate, Geocoder};

type ActivateHandler = Box<dyn Fn(&ResolvedLocation) + Send + Sync>;

#[derive(Debug, Default)]
struct ResolverState {
    target_key: Option<String>,
    /// Sequence number of the most recently issued lookup. Responses carrying
    /// any other number are stale.
    latest_issued: u64,
    candidates: Vec<GeocodeCandidate>,
    failed: bool,
    disposed: bool,
}

#[derive(Clone)]
struct Shared {
    geocoder: Arc<dyn Geocoder>,
    state: Arc<Mutex<ResolverState>>,
    display: Arc<watch::Sender<Option<ResolvedLocation>>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ResolverState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Called when the debounce window closes: claim a sequence number and
    /// start the remote lookup in the background.
    fn issue(self, coordinate: Coordinate) {
        let seq = {
            let mut state = self.lock();
            if state.disposed {
                return;
            }
            state.latest_issued += 1;
            state.latest_issued
        };
        debug!("issuing reverse geocode #{seq} for {coordinate}");
        tokio::spawn(async move {
            let result = self.geocoder.reverse(coordinate).await;
            self.complete(seq, coordinate, result);
        });
    }

    fn complete(
        &self,
        seq: u64,
        coordinate: Coordinate,
        result: Result<Vec<GeocodeCandidate>, crate::core::LoadboardError>,
    ) {
        let mut state = self.lock();
        if state.disposed || seq != state.latest_issued {
            debug!(
                "discarding stale geocode #{seq} for {coordinate}, latest is #{}",
                state.latest_issued
            );
            return;
        }

        match result {
            Ok(candidates) if candidates.is_empty() => {
                state.candidates.clear();
                self.promote(ResolvedLocation::from_coordinate(&coordinate));
            }
            Ok(candidates) => {
                state.candidates = candidates
                    .into_iter()
                    .map(|mut candidate| {
                        candidate.formatted_address = normalize_address(&candidate);
                        candidate
                    })
                    .collect();
                let first = &state.candidates[0];
                self.promote(ResolvedLocation {
                    place_id: first.place_id.clone(),
                    address: first.formatted_address.clone(),
                });
            }
            Err(err) => {
                warn!("reverse geocode for {coordinate} failed: {err}");
                state.candidates.clear();
                state.failed = true;
                self.display.send_if_modified(|current| current.take().is_some());
            }
        }
    }

    /// Replace the display unless it already shows the same place.
    fn promote(&self, resolved: ResolvedLocation) {
        self.display.send_if_modified(|current| {
            if current
                .as_ref()
                .is_some_and(|shown| shown.place_id == resolved.place_id)
            {
                debug!("place {} already shown", resolved.place_id);
                return false;
            }
            *current = Some(resolved);
            true
        });
    }
}

/// Turns a changing coordinate into a stable, human-readable address.
///
/// Targets are debounced, so only a coordinate that holds still for the
/// configured quiet period reaches the geocoder. Each issued lookup carries a
/// sequence number and only the latest one may touch the display. Dropping
/// the resolver cancels its timer and discards anything still in flight.
pub struct LocationResolver {
    shared: Shared,
    debouncer: Debouncer,
    on_activate: Option<ActivateHandler>,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, config: &GeocodingConfig) -> Self {
        Self::with_delay(geocoder, config.debounce)
    }

    pub fn with_delay(geocoder: Arc<dyn Geocoder>, delay: Duration) -> Self {
        let (display, _) = watch::channel(None);
        Self {
            shared: Shared {
                geocoder,
                state: Arc::new(Mutex::new(ResolverState::default())),
                display: Arc::new(display),
            },
            debouncer: Debouncer::new(delay),
            on_activate: None,
        }
    }

    /// Point the resolver at a new coordinate, or at nothing.
    ///
    /// Re-targeting the coordinate already being resolved is a no-op unless
    /// its last lookup failed. `None` clears the display immediately and
    /// invalidates any lookup still in flight.
    pub fn set_target(&mut self, coordinate: Option<Coordinate>) {
        let Some(coordinate) = coordinate else {
            self.debouncer.cancel();
            let mut state = self.shared.lock();
            state.target_key = None;
            state.latest_issued += 1;
            state.candidates.clear();
            state.failed = false;
            self.shared
                .display
                .send_if_modified(|current| current.take().is_some());
            return;
        };

        let key = coordinate.key();
        {
            let mut state = self.shared.lock();
            if state.disposed {
                return;
            }
            if state.target_key.as_deref() == Some(key.as_str()) && !state.failed {
                return;
            }
            state.target_key = Some(key);
            state.failed = false;
        }

        let shared = self.shared.clone();
        self.debouncer.schedule(move || shared.issue(coordinate));
    }

    pub fn current_display(&self) -> Option<ResolvedLocation> {
        self.shared.display.borrow().clone()
    }

    /// Receiver notified every time the display actually changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<ResolvedLocation>> {
        self.shared.display.subscribe()
    }

    /// Candidates of the last applied lookup, with normalized addresses.
    pub fn candidates(&self) -> Vec<GeocodeCandidate> {
        self.shared.lock().candidates.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn on_user_activate<F>(&mut self, callback: F)
    where
        F: Fn(&ResolvedLocation) + Send + Sync + 'static,
    {
        self.on_activate = Some(Box::new(callback));
    }

    /// Forward a user interaction with the shown address to the registered
    /// handler. Returns `false` when there is nothing shown or no handler.
    pub fn activate(&self) -> bool {
        let display = self.shared.display.borrow();
        match (display.as_ref(), self.on_activate.as_ref()) {
            (Some(location), Some(handler)) => {
                handler(location);
                true
            }
            _ => false,
        }
    }

    pub fn dispose(&mut self) {
        self.debouncer.cancel();
        self.shared.lock().disposed = true;
    }
}

impl Drop for LocationResolver {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::testutil::{ScriptedGeocoder, candidate};

    const DEBOUNCE: Duration = Duration::from_millis(400);

    fn resolver(geocoder: &Arc<ScriptedGeocoder>) -> LocationResolver {
        LocationResolver::with_delay(geocoder.clone(), DEBOUNCE)
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(401)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_targets_issue_one_lookup() {
        let chicago = Coordinate::new(41.8781, -87.6298);
        let geocoder = Arc::new(ScriptedGeocoder::new());
        geocoder.respond(chicago, vec![candidate("chi", "Chicago, IL", chicago)]);
        let mut r = resolver(&geocoder);

        for i in 0..5 {
            r.set_target(Some(Coordinate::new(40.0 + f64::from(i), -80.0)));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        r.set_target(Some(chicago));
        settle().await;

        assert_eq!(geocoder.calls(), vec![chicago]);
        assert_eq!(
            r.current_display(),
            Some(ResolvedLocation {
                place_id: "chi".to_string(),
                address: "Chicago, IL".to_string()
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_result_shows_coordinate() {
        let geocoder = Arc::new(ScriptedGeocoder::new());
        let mut r = resolver(&geocoder);
        r.set_target(Some(Coordinate::new(12.5, -3.25)));
        settle().await;

        let shown = r.current_display().unwrap();
        assert_eq!(shown.address, "[12.5, -3.25]");
        assert!(r.candidates().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_clears_candidates_and_display() {
        let a = Coordinate::new(1.0, 2.0);
        let b = Coordinate::new(3.0, 4.0);
        let geocoder = Arc::new(ScriptedGeocoder::new());
        geocoder.respond(a, vec![candidate("a", "A street", a)]);
        geocoder.fail(b, "quota exceeded");
        let mut r = resolver(&geocoder);

        r.set_target(Some(a));
        settle().await;
        assert_eq!(r.candidates().len(), 1);

        r.set_target(Some(b));
        settle().await;
        assert!(r.candidates().is_empty());
        assert_eq!(r.current_display(), None);

        // A failed target may be retried by setting it again.
        geocoder.respond(b, vec![candidate("b", "B street", b)]);
        r.set_target(Some(b));
        settle().await;
        assert_eq!(r.current_display().unwrap().place_id, "b");
        assert_eq!(geocoder.calls(), vec![a, b, b]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_place_does_not_redisplay() {
        let a = Coordinate::new(1.0, 2.0);
        let b = Coordinate::new(1.00001, 2.0);
        let geocoder = Arc::new(ScriptedGeocoder::new());
        geocoder.respond(a, vec![candidate("same", "Main St", a)]);
        geocoder.respond(b, vec![candidate("same", "Main Street", b)]);
        let mut r = resolver(&geocoder);
        let mut rx = r.subscribe();

        r.set_target(Some(a));
        settle().await;
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        r.set_target(Some(b));
        settle().await;
        assert_eq!(geocoder.calls().len(), 2);
        assert!(!rx.has_changed().unwrap());
        assert_eq!(r.current_display().unwrap().address, "Main St");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let slow = Coordinate::new(10.0, 10.0);
        let fast = Coordinate::new(20.0, 20.0);
        let geocoder = Arc::new(ScriptedGeocoder::new());
        geocoder.respond_after(
            slow,
            Duration::from_secs(5),
            vec![candidate("slow", "Slow Rd", slow)],
        );
        geocoder.respond(fast, vec![candidate("fast", "Fast Ave", fast)]);
        let mut r = resolver(&geocoder);

        r.set_target(Some(slow));
        settle().await;
        r.set_target(Some(fast));
        settle().await;
        assert_eq!(r.current_display().unwrap().place_id, "fast");

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(r.current_display().unwrap().place_id, "fast");
        assert_eq!(geocoder.calls(), vec![slow, fast]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_target_is_noop() {
        let a = Coordinate::new(5.0, 6.0);
        let geocoder = Arc::new(ScriptedGeocoder::new());
        let mut r = resolver(&geocoder);

        r.set_target(Some(a));
        settle().await;
        r.set_target(Some(Coordinate::new(5.0, 6.0)));
        assert!(!r.is_pending());
        settle().await;
        assert_eq!(geocoder.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_null_target_clears_and_cancels() {
        let a = Coordinate::new(5.0, 6.0);
        let b = Coordinate::new(7.0, 8.0);
        let geocoder = Arc::new(ScriptedGeocoder::new());
        geocoder.respond(a, vec![candidate("a", "A", a)]);
        geocoder.respond_after(b, Duration::from_secs(1), vec![candidate("b", "B", b)]);
        let mut r = resolver(&geocoder);

        r.set_target(Some(a));
        settle().await;
        assert!(r.current_display().is_some());

        r.set_target(None);
        assert_eq!(r.current_display(), None);

        // Pending timer is cancelled.
        r.set_target(Some(a));
        r.set_target(None);
        settle().await;
        assert_eq!(geocoder.calls().len(), 1);

        // In-flight lookup is ignored once the target is cleared.
        r.set_target(Some(b));
        settle().await;
        r.set_target(None);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(r.current_display(), None);
        assert_eq!(geocoder.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_lookups() {
        let a = Coordinate::new(5.0, 6.0);
        let geocoder = Arc::new(ScriptedGeocoder::new());
        {
            let mut r = resolver(&geocoder);
            r.set_target(Some(a));
        }
        settle().await;
        assert!(geocoder.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_activate_forwards_location() {
        let a = Coordinate::new(5.0, 6.0);
        let geocoder = Arc::new(ScriptedGeocoder::new());
        geocoder.respond(a, vec![candidate("a", "A", a)]);
        let mut r = resolver(&geocoder);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        r.on_user_activate(move |location| {
            assert_eq!(location.place_id, "a");
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!r.activate());
        r.set_target(Some(a));
        settle().await;
        assert!(r.activate());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
