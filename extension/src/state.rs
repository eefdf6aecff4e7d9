use std::sync::Arc;

use crate::{
    config::Config,
    error::CalendarError,
    services::{
        calendar::CalendarSource,
        evaluator::DateRuleEvaluator,
        holiday_provider::{FeiertageClient, HolidayProvider},
    },
};

/// Configuration plus the evaluator wired from it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub evaluator: DateRuleEvaluator,
}

impl AppState {
    /// Wires the evaluator to the remote holiday API named in `config`.
    pub fn new(config: Config) -> Result<Self, CalendarError> {
        let provider = FeiertageClient::new(
            config.holiday_api_url.clone(),
            config.request_timeout,
            config.time_zone,
        )?;
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    pub fn with_provider(config: Config, provider: Arc<dyn HolidayProvider>) -> Self {
        let calendar = CalendarSource::new(
            provider,
            config.holiday_region.clone(),
            config.vacations.clone(),
        );
        let evaluator = DateRuleEvaluator::new(calendar, config.time_zone);
        Self { config, evaluator }
    }
}
