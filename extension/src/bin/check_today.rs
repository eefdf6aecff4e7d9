use infoag_extension::{
    config::Config,
    handlers::{check_today, LogNotifier},
    init_tracing,
    state::AppState,
    utils::time::{now_in_timezone, weekday_name},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::load()?;
    tracing::info!(
        time_zone = %config.time_zone,
        target_weekday = config.target_weekday,
        target_weekday_name = weekday_name(config.target_weekday).unwrap_or("?"),
        holiday_api_url = %config.holiday_api_url,
        holiday_region = %config.holiday_region,
        request_timeout_secs = config.request_timeout.as_secs(),
        vacation_ranges = config.vacations.len(),
        "Loaded configuration from environment/.env"
    );

    let state = AppState::new(config)?;
    let now = now_in_timezone(&state.config.time_zone);

    check_today(
        &state.evaluator,
        &now,
        state.config.target_weekday,
        &LogNotifier,
    )
    .await?;

    Ok(())
}
