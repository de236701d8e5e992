use calc_compute::Locale;
use std::sync::{Arc, Mutex, PoisonError};
use super::{
    analyzed::AnalyzedEquation,
    eval::evaluate_equation,
    opts::SamplerOptions,
    point::CurveSeries,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Receives sampled curves.
///
/// [`Sampler`] calls [`GraphSink::replace_series`] from a background thread, so implementations
/// must be [`Send`] and [`Sync`].
pub trait GraphSink: Send + Sync {
    /// Replaces the series currently shown on the graph with the given one.
    fn replace_series(&self, series: CurveSeries);
}

/// What [`Sampler::dispatch`] did with the display text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dispatch {
    /// The text was empty; the graph was cleared.
    Cleared,

    /// The text is not a complete equation; any live run was cancelled and the graph was left as
    /// is.
    Ignored,

    /// A sampling run was started in the background.
    Started,
}

/// Samples the given equation synchronously, returning a series titled with the equation's text.
pub fn sample(analyzed: &AnalyzedEquation, options: &SamplerOptions, locale: &Locale) -> CurveSeries {
    let points = evaluate_equation(analyzed, options, &CancellationToken::new()).unwrap_or_default();
    CurveSeries::new(format!("{}{}", locale.graph_title, analyzed.text), points)
}

/// Samples equations in the background and publishes them to a [`GraphSink`].
///
/// At most one run is live at a time: starting a new run cancels the previous one, and a cancelled
/// run never publishes its series. Dropping the sampler cancels its run.
pub struct Sampler {
    sink: Arc<dyn GraphSink>,
    locale: Locale,
    options: SamplerOptions,
    current: Option<CancellationToken>,

    /// Held while a run checks its token and publishes, and while a run is cancelled.
    publish: Arc<Mutex<()>>,
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("locale", &self.locale)
            .field("options", &self.options)
            .field("running", &self.current.is_some())
            .finish_non_exhaustive()
    }
}

impl Sampler {
    /// Creates a new sampler publishing to the given sink.
    pub fn new(sink: Arc<dyn GraphSink>, locale: Locale, options: SamplerOptions) -> Self {
        Self { sink, locale, options, current: None, publish: Arc::default() }
    }

    /// Returns the options used by this sampler.
    pub fn options(&self) -> &SamplerOptions {
        &self.options
    }

    /// Reacts to new display text.
    ///
    /// - Empty text cancels any live run and publishes an empty series titled with the locale's
    ///   graph title before returning.
    /// - Text that is not a complete equation cancels any live run, since its series no longer
    ///   matches the display, and leaves the graph as is.
    /// - Otherwise, the live run is cancelled and a new one is started on the [`rayon`] thread
    ///   pool.
    pub fn dispatch(&mut self, text: &str) -> Dispatch {
        if text.is_empty() {
            self.cancel();
            self.sink.replace_series(CurveSeries::empty(self.locale.graph_title.clone()));
            debug!("graph cleared");
            return Dispatch::Cleared;
        }

        let Some(analyzed) = AnalyzedEquation::analyze(text, &self.locale) else {
            trace!(text, "not a complete equation");
            self.cancel();
            return Dispatch::Ignored;
        };

        self.cancel();
        let token = CancellationToken::new();
        self.current = Some(token.clone());

        let sink = Arc::clone(&self.sink);
        let publish = Arc::clone(&self.publish);
        let options = self.options;
        let title = format!("{}{}", self.locale.graph_title, analyzed.text);
        debug!(text, relation = ?analyzed.relation, "sampling started");

        rayon::spawn(move || {
            let Some(points) = evaluate_equation(&analyzed, &options, &token) else {
                debug!(text = %analyzed.text, "sampling cancelled");
                return;
            };

            // cancellation takes the same lock, so a cancelled run never publishes after it
            let _guard = publish.lock().unwrap_or_else(PoisonError::into_inner);
            if token.is_cancelled() {
                debug!(text = %analyzed.text, "sampling cancelled");
                return;
            }

            debug!(text = %analyzed.text, points = points.len(), "sampling finished");
            sink.replace_series(CurveSeries::new(title, points));
        });

        Dispatch::Started
    }

    /// Cancels the live run, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            let _guard = self.publish.lock().unwrap_or_else(PoisonError::into_inner);
            token.cancel();
        }
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.cancel();
    }
}
