//! Per-city weather cache
//!
//! Holds at most one snapshot per tracked city. A fetch is started on the
//! first access, when the cached snapshot is older than the TTL, or when the
//! previous fetch failed. While a fetch is outstanding `get` reports
//! [`CacheStatus::Loading`] and no second request is issued for that city.
//!
//! Access is split in three:
//! - [`PerCityWeatherCache::get`] may start a fetch.
//! - [`PerCityWeatherCache::refresh_stale`] only refetches stale snapshots
//!   and never retries a failure.
//! - [`PerCityWeatherCache::peek`] never fetches, so re-rendering on every
//!   clock tick keeps showing a failure until the user acts again. During a
//!   refetch it keeps showing the previous snapshot.

use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use domain::{CityName, WeatherSnapshot};
use parking_lot::Mutex;
use tokio::{sync::watch, time::Instant};
use tracing::{debug, instrument, warn};

use crate::{error::FetchError, ports::WeatherPort};

/// Default staleness window: five minutes
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

type FetchOutcome = Result<Arc<WeatherSnapshot>, FetchError>;

/// What a caller observes for one city
#[derive(Debug, Clone, PartialEq)]
pub enum CacheStatus {
    /// A fetch is outstanding, or nothing was requested yet
    Loading,
    /// The last fetch failed
    Error {
        /// The failure as reported by the fetcher
        error: FetchError,
    },
    /// A snapshot is available
    Ready {
        /// The snapshot fetched for this city
        snapshot: Arc<WeatherSnapshot>,
    },
}

impl CacheStatus {
    /// Whether a snapshot is available
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Whether a fetch is still outstanding
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Error message, if the last fetch failed
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Error { error } => Some(error.to_string()),
            _ => None,
        }
    }

    fn from_outcome(outcome: FetchOutcome) -> Self {
        match outcome {
            Ok(snapshot) => Self::Ready { snapshot },
            Err(error) => Self::Error { error },
        }
    }
}

enum Entry {
    InFlight {
        epoch: u64,
        done: watch::Receiver<Option<FetchOutcome>>,
        /// Snapshot being refetched, shown until the refetch lands
        previous: Option<Arc<WeatherSnapshot>>,
    },
    Ready {
        snapshot: Arc<WeatherSnapshot>,
        fetched_at: Instant,
    },
    Failed {
        error: FetchError,
    },
}

struct Inner {
    fetcher: Arc<dyn WeatherPort>,
    ttl: Duration,
    entries: Mutex<HashMap<CityName, Entry>>,
    next_epoch: AtomicU64,
}

impl Inner {
    /// Store the outcome of a fetch, unless the entry moved on meanwhile
    fn complete(&self, city: &CityName, epoch: u64, outcome: &FetchOutcome) {
        let mut entries = self.entries.lock();
        match entries.get(city) {
            Some(Entry::InFlight { epoch: current, .. }) if *current == epoch => {},
            _ => {
                debug!(city = %city, epoch, "Discarding result of superseded fetch");
                return;
            },
        }

        let entry = match outcome {
            Ok(snapshot) => {
                debug!(city = %city, "Weather cached");
                Entry::Ready {
                    snapshot: Arc::clone(snapshot),
                    fetched_at: Instant::now(),
                }
            },
            Err(error) => {
                warn!(city = %city, error = %error, "Weather fetch failed");
                Entry::Failed {
                    error: error.clone(),
                }
            },
        };
        entries.insert(city.clone(), entry);
    }
}

/// Fetch-with-cache keyed by city name
///
/// Cloning is cheap; clones share the same entries.
#[derive(Clone)]
pub struct PerCityWeatherCache {
    inner: Arc<Inner>,
}

impl fmt::Debug for PerCityWeatherCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerCityWeatherCache")
            .field("ttl", &self.inner.ttl)
            .field("entries", &self.inner.entries.lock().len())
            .finish_non_exhaustive()
    }
}

impl PerCityWeatherCache {
    /// Create a cache in front of the given fetcher
    pub fn new(fetcher: Arc<dyn WeatherPort>, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                ttl,
                entries: Mutex::new(HashMap::new()),
                next_epoch: AtomicU64::new(0),
            }),
        }
    }

    /// Create a cache with the default five minute TTL
    pub fn with_default_ttl(fetcher: Arc<dyn WeatherPort>) -> Self {
        Self::new(fetcher, DEFAULT_CACHE_TTL)
    }

    /// The staleness window
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Current status for a city, starting a fetch when needed
    ///
    /// A fetch starts when the city is unknown, its snapshot is stale, or the
    /// previous fetch failed; the call then returns `Loading`. Must be called
    /// from within a Tokio runtime.
    #[instrument(skip(self, city), fields(city = %city))]
    pub fn get(&self, city: &CityName) -> CacheStatus {
        let mut entries = self.inner.entries.lock();
        match entries.get(city) {
            Some(Entry::InFlight { .. }) => {
                debug!("Fetch already in flight");
                return CacheStatus::Loading;
            },
            Some(Entry::Ready {
                snapshot,
                fetched_at,
            }) if fetched_at.elapsed() < self.inner.ttl => {
                debug!("Cache hit");
                return CacheStatus::Ready {
                    snapshot: Arc::clone(snapshot),
                };
            },
            Some(Entry::Ready { .. }) => debug!("Cached weather is stale, refetching"),
            Some(Entry::Failed { .. }) => debug!("Retrying after failed fetch"),
            None => debug!("Cache miss"),
        }

        self.start_fetch(&mut entries, city.clone());
        CacheStatus::Loading
    }

    /// Current status for a city, without side effects
    ///
    /// A stale snapshot is still reported as `Ready`, also while it is being
    /// refetched; an unknown city is reported as `Loading`.
    #[must_use]
    pub fn peek(&self, city: &CityName) -> CacheStatus {
        match self.inner.entries.lock().get(city) {
            None
            | Some(Entry::InFlight {
                previous: None, ..
            }) => CacheStatus::Loading,
            Some(Entry::Ready { snapshot, .. })
            | Some(Entry::InFlight {
                previous: Some(snapshot),
                ..
            }) => CacheStatus::Ready {
                snapshot: Arc::clone(snapshot),
            },
            Some(Entry::Failed { error }) => CacheStatus::Error {
                error: error.clone(),
            },
        }
    }

    /// Refetch the city's snapshot if it is stale
    ///
    /// Unlike [`get`](Self::get) this never starts a fetch for an unknown
    /// city or retries a failed one. Returns whether a fetch was started.
    /// Must be called from within a Tokio runtime.
    #[instrument(skip(self, city), fields(city = %city))]
    pub fn refresh_stale(&self, city: &CityName) -> bool {
        let mut entries = self.inner.entries.lock();
        let stale = matches!(
            entries.get(city),
            Some(Entry::Ready { fetched_at, .. }) if fetched_at.elapsed() >= self.inner.ttl
        );
        if stale {
            debug!("Cached weather is stale, refetching");
            self.start_fetch(&mut entries, city.clone());
        }
        stale
    }

    /// Like [`get`](Self::get), but waits for an outstanding fetch to finish
    pub async fn resolve(&self, city: &CityName) -> CacheStatus {
        let status = self.get(city);
        if !status.is_loading() {
            return status;
        }

        let in_flight = match self.inner.entries.lock().get(city) {
            Some(Entry::InFlight { done, .. }) => Some(done.clone()),
            _ => None,
        };
        let Some(mut done) = in_flight else {
            return self.peek(city);
        };

        let outcome = done
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|value| (*value).clone());

        match outcome {
            Some(outcome) => CacheStatus::from_outcome(outcome),
            // Fetch task went away without reporting
            None => self.peek(city),
        }
    }

    /// Forget a city; a fetch still in flight for it is discarded on arrival
    pub fn remove(&self, city: &CityName) {
        if self.inner.entries.lock().remove(city).is_some() {
            debug!(city = %city, "Removed city from weather cache");
        }
    }

    /// Number of cities with an entry
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    /// Whether no city has an entry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.lock().is_empty()
    }

    fn start_fetch(&self, entries: &mut HashMap<CityName, Entry>, city: CityName) {
        let epoch = self.inner.next_epoch.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = watch::channel(None);
        let previous = match entries.get(&city) {
            Some(Entry::Ready { snapshot, .. }) => Some(Arc::clone(snapshot)),
            _ => None,
        };
        entries.insert(
            city.clone(),
            Entry::InFlight {
                epoch,
                done: rx,
                previous,
            },
        );

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            debug!(city = %city, epoch, "Fetching weather");
            let outcome = inner.fetcher.fetch_weather(&city).await.map(Arc::new);
            inner.complete(&city, epoch, &outcome);
            // Nobody waiting is fine
            let _ = tx.send(Some(outcome));
        });
    }
}
