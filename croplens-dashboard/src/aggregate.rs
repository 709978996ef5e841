//! Dashboard data aggregation
//!
//! One aggregation cycle fetches every dashboard data source concurrently
//! and records each result independently: a source that fails is marked
//! unavailable without cancelling, delaying, or failing its siblings.
//!
//! Cycles are numbered by a monotonically increasing counter. Every result
//! is applied through a staleness guard that compares its cycle to the
//! snapshot's, so when a refresh supersedes an in-flight cycle the old
//! cycle's late arrivals are dropped instead of overwriting newer data.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::api::DataApi;
use croplens_core::domain::analytics::{AnalyticsSummary, ChartPoint};
use croplens_core::domain::reading::SensorKind;

/// Per-source result slot
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSlot<T> {
    /// Fetch not finished (or never attempted) in this cycle
    Loading,
    /// Fetch succeeded
    Ready(T),
    /// Fetch failed or the source has no data; counts as resolved
    Unavailable,
}

impl<T> SourceSlot<T> {
    /// Whether the source has finished, successfully or not
    pub fn is_resolved(&self) -> bool {
        !matches!(self, SourceSlot::Loading)
    }

    /// The payload, if the fetch succeeded
    pub fn value(&self) -> Option<&T> {
        match self {
            SourceSlot::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Latest known state of every dashboard data source for one cycle
///
/// Replaced wholesale by the next cycle, never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationSnapshot {
    /// Cycle that produced this snapshot
    pub cycle: u64,
    pub temperature: SourceSlot<AnalyticsSummary>,
    pub soil_moisture: SourceSlot<AnalyticsSummary>,
    pub chart: SourceSlot<Vec<ChartPoint>>,
}

impl AggregationSnapshot {
    fn fresh(cycle: u64) -> Self {
        Self {
            cycle,
            temperature: SourceSlot::Loading,
            soil_moisture: SourceSlot::Loading,
            chart: SourceSlot::Loading,
        }
    }

    /// Both stat cards have resolved (success or failure)
    pub fn stats_ready(&self) -> bool {
        self.temperature.is_resolved() && self.soil_moisture.is_resolved()
    }

    /// The chart source has resolved
    pub fn chart_ready(&self) -> bool {
        self.chart.is_resolved()
    }

    /// Every source of the cycle has resolved
    pub fn is_complete(&self) -> bool {
        self.stats_ready() && self.chart_ready()
    }
}

impl Default for AggregationSnapshot {
    fn default() -> Self {
        Self::fresh(0)
    }
}

/// Stat-card fetch target, built per cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatQuery {
    pub field_id: i64,
    pub sensor: SensorKind,
}

/// Chart fetch target, built per cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartQuery {
    pub field_id: i64,
    pub hours: u32,
}

/// Concurrent fetcher of the dashboard's data sources
pub struct DataAggregator {
    api: Arc<dyn DataApi>,
    field_id: i64,
    chart_hours: u32,
    cycle: AtomicU64,
    snapshot: watch::Sender<AggregationSnapshot>,
}

impl DataAggregator {
    pub fn new(api: Arc<dyn DataApi>, field_id: i64, chart_hours: u32) -> Self {
        let (snapshot, _) = watch::channel(AggregationSnapshot::default());
        Self {
            api,
            field_id,
            chart_hours,
            cycle: AtomicU64::new(0),
            snapshot,
        }
    }

    /// Watch channel of partial snapshots
    ///
    /// Observers see each source land as it resolves; readiness flags flip
    /// once a whole group has resolved.
    pub fn subscribe(&self) -> watch::Receiver<AggregationSnapshot> {
        self.snapshot.subscribe()
    }

    /// The most recent snapshot, partial or complete
    pub fn latest(&self) -> AggregationSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Runs one aggregation cycle
    ///
    /// Issues all fetches concurrently and resolves when every source of
    /// this cycle has landed. Returns the latest snapshot at that point,
    /// which belongs to a newer cycle if one superseded this one meanwhile.
    pub async fn refresh(&self) -> AggregationSnapshot {
        let cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(cycle, "starting aggregation cycle");
        self.begin_cycle(cycle);

        let temperature = StatQuery {
            field_id: self.field_id,
            sensor: SensorKind::Temperature,
        };
        let soil_moisture = StatQuery {
            field_id: self.field_id,
            sensor: SensorKind::SoilMoisture,
        };
        let chart = ChartQuery {
            field_id: self.field_id,
            hours: self.chart_hours,
        };

        tokio::join!(
            async {
                let slot = self.fetch_stat(&temperature).await;
                self.apply(cycle, |snapshot| snapshot.temperature = slot);
            },
            async {
                let slot = self.fetch_stat(&soil_moisture).await;
                self.apply(cycle, |snapshot| snapshot.soil_moisture = slot);
            },
            async {
                let slot = self.fetch_chart(&chart).await;
                self.apply(cycle, |snapshot| snapshot.chart = slot);
            },
        );

        self.latest()
    }

    /// Drives a fresh cycle per refresh trigger
    ///
    /// Each trigger starts a new cycle immediately; an in-flight cycle is
    /// superseded and its stragglers dropped by the staleness guard. Returns
    /// when the trigger channel closes.
    pub async fn run(self: Arc<Self>, mut refresh: mpsc::Receiver<()>) {
        while refresh.recv().await.is_some() {
            let aggregator = Arc::clone(&self);
            tokio::spawn(async move {
                aggregator.refresh().await;
            });
        }
    }

    async fn fetch_stat(&self, query: &StatQuery) -> SourceSlot<AnalyticsSummary> {
        match self.api.analytics(query.field_id, query.sensor).await {
            Ok(summary) => SourceSlot::Ready(summary),
            Err(error) if error.is_not_found() => {
                // The backend answers 404 while a field has no readings for
                // the sensor yet; the card just shows N/A.
                debug!(sensor = %query.sensor, "no analytics data yet");
                SourceSlot::Unavailable
            }
            Err(error) => {
                warn!(sensor = %query.sensor, %error, "analytics fetch failed");
                SourceSlot::Unavailable
            }
        }
    }

    async fn fetch_chart(&self, query: &ChartQuery) -> SourceSlot<Vec<ChartPoint>> {
        match self.api.chart_data(query.field_id, query.hours).await {
            Ok(points) => SourceSlot::Ready(points),
            Err(error) => {
                warn!(hours = query.hours, %error, "chart fetch failed");
                SourceSlot::Unavailable
            }
        }
    }

    /// Installs the fresh snapshot for a cycle
    ///
    /// Cycle numbers are taken before the snapshot is installed, so two
    /// concurrent refreshes can reach this point in either order. Only a
    /// cycle newer than the installed one may replace it; a late starter
    /// is already superseded and leaves the snapshot alone.
    fn begin_cycle(&self, cycle: u64) -> bool {
        self.snapshot.send_if_modified(|snapshot| {
            if cycle <= snapshot.cycle {
                debug!(cycle, current = snapshot.cycle, "cycle start superseded");
                return false;
            }
            *snapshot = AggregationSnapshot::fresh(cycle);
            true
        })
    }

    /// Applies a source result to the snapshot unless its cycle was
    /// superseded
    fn apply<F>(&self, cycle: u64, update: F)
    where
        F: FnOnce(&mut AggregationSnapshot),
    {
        self.snapshot.send_if_modified(|snapshot| {
            if snapshot.cycle != cycle {
                debug!(cycle, current = snapshot.cycle, "dropping stale source result");
                return false;
            }
            update(snapshot);
            true
        });
    }
}
