pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod sinks;

use chrono::{DateTime, Utc};
use models::{
    chart::{ChartOptions, Series},
    pnl::{PnlData, PnlPeriod, PnlStep, SelectOption},
    query::{FetchTicket, QueryState},
    settings::ClientSettings,
};
use providers::{plasma::PlasmaPnlClient, traits::PnlSource};
use services::{feedback_service::FeedbackService, series_service::SeriesService};
use sinks::{
    traits::{ChartSink, Notifier},
    tracing_sink::TracingSink,
};

use errors::CoreError;

/// View model of the PNL page.
/// Holds the form state, the displayed series and the client used to fill them.
///
/// One fetch cycle: `begin_fetch` → request → `complete_fetch`. `mount`,
/// `update` and `fetch` run a whole cycle; the split methods exist so that
/// overlapping requests can be driven explicitly. Completions are applied in
/// the order they arrive: the last one to complete wins.
#[must_use]
pub struct PnlView {
    source: Box<dyn PnlSource>,
    chart_sink: Box<dyn ChartSink>,
    notifier: Box<dyn Notifier>,
    series_service: SeriesService,
    feedback_service: FeedbackService,
    query: QueryState,
    series: Vec<Series>,
    is_fetching: bool,
    mounted: bool,
    next_sequence: u64,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    last_error: Option<CoreError>,
}

impl std::fmt::Debug for PnlView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PnlView")
            .field("source", &self.source.name())
            .field("query", &self.query)
            .field("series_points", &self.series.iter().map(|s| s.data.len()).sum::<usize>())
            .field("is_fetching", &self.is_fetching)
            .field("mounted", &self.mounted)
            .finish()
    }
}

impl PnlView {
    /// Create a view over any PNL source, logging chart and toast output via `tracing`.
    pub fn new(source: Box<dyn PnlSource>) -> Self {
        Self::with_sinks(source, Box::new(TracingSink), Box::new(TracingSink))
    }

    /// Create a view wired to a chart widget and a toast notifier.
    pub fn with_sinks(
        source: Box<dyn PnlSource>,
        chart_sink: Box<dyn ChartSink>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let query = QueryState::default();
        let series_service = SeriesService::new();
        let placeholder = series_service.placeholder(&query.address, Utc::now());

        Self {
            source,
            chart_sink,
            notifier,
            series_service,
            feedback_service: FeedbackService::new(),
            query,
            series: vec![placeholder],
            is_fetching: false,
            mounted: false,
            next_sequence: 0,
            started_at: None,
            finished_at: None,
            last_error: None,
        }
    }

    /// Create a view backed by the Plasma HTTP client.
    /// The client is built once here and reused for every fetch of this view.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, CoreError> {
        let client = PlasmaPnlClient::new(settings)?;
        Ok(Self::new(Box::new(client)))
    }

    /// Same as `from_settings`, with explicit sinks.
    pub fn from_settings_with_sinks(
        settings: &ClientSettings,
        chart_sink: Box<dyn ChartSink>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self, CoreError> {
        let client = PlasmaPnlClient::new(settings)?;
        Ok(Self::with_sinks(Box::new(client), chart_sink, notifier))
    }

    // ── State ───────────────────────────────────────────────────────

    #[must_use]
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Frames of the last successful fetch; `None` before one and while fetching.
    #[must_use]
    pub fn frames(&self) -> Option<&PnlData> {
        self.query.frames.as_ref()
    }

    /// Series currently displayed.
    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Drives the spinner.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Error of the most recent failed fetch, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&CoreError> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    // ── Form Controls ───────────────────────────────────────────────

    /// Address input change. Never triggers a fetch.
    pub fn set_address(&mut self, address: impl Into<String>) {
        self.query.address = address.into();
    }

    /// Step selector change. The empty placeholder option is ignored;
    /// an unknown value is rejected and leaves the state untouched.
    pub fn set_step(&mut self, raw: &str) -> Result<(), CoreError> {
        if raw.is_empty() {
            return Ok(());
        }
        self.query.step = raw.parse()?;
        Ok(())
    }

    /// Period selector change, same rules as `set_step`.
    pub fn set_period(&mut self, raw: &str) -> Result<(), CoreError> {
        if raw.is_empty() {
            return Ok(());
        }
        self.query.period = raw.parse()?;
        Ok(())
    }

    #[must_use]
    pub fn step_options() -> Vec<SelectOption> {
        PnlStep::options()
    }

    #[must_use]
    pub fn period_options() -> Vec<SelectOption> {
        PnlPeriod::options()
    }

    /// Placeholder of the address input: the address currently queried.
    #[must_use]
    pub fn address_placeholder(&self) -> &str {
        &self.query.address
    }

    // ── Fetching ────────────────────────────────────────────────────

    /// True when mounting would start a fetch: no frames and nothing in flight.
    #[must_use]
    pub fn should_fetch_on_mount(&self) -> bool {
        self.query.frames.is_none() && !self.is_fetching
    }

    /// Mount the view: render the current series, then fetch with the current
    /// query if there is no data yet. Evaluated once; later calls do nothing.
    /// Returns whether a fetch ran.
    pub async fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        self.render_chart();

        if !self.should_fetch_on_mount() {
            return false;
        }
        self.update().await;
        true
    }

    /// The "Update PNL" action: fetch with the current form values.
    /// Not gated by the fetching flag.
    pub async fn update(&mut self) {
        let QueryState {
            address,
            step,
            period,
            ..
        } = self.query.clone();
        self.fetch(address, step, period).await;
    }

    /// Run one full fetch cycle. Errors are reported through the notifier
    /// and `last_error`, never returned.
    pub async fn fetch(&mut self, address: String, step: PnlStep, period: PnlPeriod) {
        let ticket = self.begin_fetch(address, step, period);
        let result = self.request(&ticket).await;
        self.complete_fetch(ticket, result);
    }

    /// Enter the fetching state: store the parameters, clear the frames,
    /// raise the fetching flag and record the start time.
    pub fn begin_fetch(
        &mut self,
        address: String,
        step: PnlStep,
        period: PnlPeriod,
    ) -> FetchTicket {
        let started_at = Utc::now();
        self.next_sequence += 1;

        self.query = QueryState {
            address: address.clone(),
            step,
            period,
            frames: None,
        };
        self.is_fetching = true;
        self.started_at = Some(started_at);

        tracing::debug!(
            sequence = self.next_sequence,
            %address,
            %step,
            %period,
            "PNL fetch started"
        );

        FetchTicket {
            sequence: self.next_sequence,
            address,
            step,
            period,
            started_at,
        }
    }

    /// Issue the request described by `ticket`. Takes `&self`, so several
    /// requests can be awaited concurrently.
    pub async fn request(&self, ticket: &FetchTicket) -> Result<PnlData, CoreError> {
        self.source
            .get_pnl(&ticket.address, ticket.step, ticket.period)
            .await
    }

    /// Apply the outcome of a request.
    ///
    /// Success replaces the frames and the displayed series; failure only
    /// clears the fetching flag and notifies. Any completion clears the flag.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<PnlData, CoreError>) {
        let finished_at = Utc::now();
        self.is_fetching = false;
        self.finished_at = Some(finished_at);
        let elapsed = FeedbackService::elapsed_secs(ticket.started_at, finished_at);

        match result {
            Ok(data) => {
                tracing::info!(
                    sequence = ticket.sequence,
                    address = %ticket.address,
                    points = data.len(),
                    elapsed_secs = elapsed,
                    "PNL fetch succeeded"
                );
                let notification = self.feedback_service.success(
                    &ticket.address,
                    ticket.step,
                    ticket.period,
                    elapsed,
                );
                self.notifier.notify(notification);

                self.series = vec![self.series_service.to_series(&ticket.address, &data)];
                self.query = QueryState {
                    address: ticket.address,
                    step: ticket.step,
                    period: ticket.period,
                    frames: Some(data),
                };
                self.last_error = None;
                self.render_chart();
            }
            Err(e) => {
                tracing::error!(
                    sequence = ticket.sequence,
                    address = %ticket.address,
                    elapsed_secs = elapsed,
                    "PNL fetch failed: {e}"
                );
                let notification = self.feedback_service.failure(elapsed);
                self.notifier.notify(notification);
                self.last_error = Some(e);
            }
        }
    }

    // ── Chart ───────────────────────────────────────────────────────

    /// Series plus axis descriptors, ready for the chart widget.
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions::for_series(self.series.clone())
    }

    /// Chart options as JSON, for a web frontend.
    pub fn chart_options_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(&self.chart_options()).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize chart options: {e}"))
        })
    }

    fn render_chart(&mut self) {
        let options = self.chart_options();
        self.chart_sink.render(&options);
    }
}
