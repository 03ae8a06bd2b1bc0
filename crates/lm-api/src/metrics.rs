//! Prometheus counters for post creation and delete outcomes.

use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

use lm_core::AppError;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct OutcomeLabels {
    pub outcome: String,
}

pub struct Metrics {
    registry: Registry,
    posts_created: Counter,
    deletes: Family<OutcomeLabels, Counter>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::with_prefix("livemate");
        let posts_created = Counter::default();
        let deletes = Family::<OutcomeLabels, Counter>::default();

        registry.register("posts_created", "Posts created", posts_created.clone());
        registry.register("post_deletes", "Delete attempts by outcome", deletes.clone());

        Self { registry, posts_created, deletes }
    }

    pub fn record_create(&self) {
        self.posts_created.inc();
    }

    pub fn record_delete(&self, result: &lm_core::Result<()>) {
        let outcome = match result {
            Ok(()) => "authorized",
            Err(AppError::MissingCredential) => "missing_credential",
            Err(AppError::NotFound(_)) => "not_found",
            Err(AppError::InvalidCredential) => "invalid_credential",
            Err(_) => "error",
        };
        self.deletes
            .get_or_create(&OutcomeLabels { outcome: outcome.to_string() })
            .inc();
    }

    /// OpenMetrics text exposition.
    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        encode(&mut out, &self.registry)?;
        Ok(out)
    }
}
