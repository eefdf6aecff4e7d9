use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

use crate::{
    error::CalendarError,
    services::evaluator::{DateRuleEvaluator, EvaluationOutcome},
    utils::time::weekday_name_de,
};

pub const FAILURE_MESSAGE: &str =
    "Fehler: Feiertage konnten nicht abgerufen werden, bitte später erneut versuchen.";

/// Host notification channel.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Prints to stdout and mirrors the message into the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(text = message, "Notification");
        println!("{}", message);
    }
}

/// The three notification texts for one weekday/timezone rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeMessages {
    pub affirmative: String,
    pub negative: String,
    pub failure: String,
}

impl OutcomeMessages {
    pub fn for_rule(target_weekday: u8, time_zone: Tz) -> Self {
        let day = weekday_name_de(target_weekday).unwrap_or("Zieltag");
        let zone = if time_zone == chrono_tz::Europe::Berlin {
            "Berliner Zeit".to_string()
        } else {
            format!("Zeitzone {}", time_zone)
        };

        Self {
            affirmative: format!("Ja, denn heute ist {} und kein freier Tag in {}.", day, zone),
            negative: format!(
                "Nein, denn heute ist kein {} oder es ist ein freier Tag in {}.",
                day, zone
            ),
            failure: FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn message_for(&self, result: &Result<bool, CalendarError>) -> &str {
        match result {
            Ok(true) => &self.affirmative,
            Ok(false) => &self.negative,
            Err(_) => &self.failure,
        }
    }
}

/// The "check today" action: evaluates once and sends exactly one message.
pub async fn check_today<Z: TimeZone>(
    evaluator: &DateRuleEvaluator,
    now: &DateTime<Z>,
    target_weekday: u8,
    notifier: &dyn Notifier,
) -> Result<EvaluationOutcome, CalendarError> {
    let outcome = evaluator.decide(now, target_weekday).await;

    match &outcome {
        Ok(outcome) => {
            tracing::info!(
                date = %outcome.date,
                matches = outcome.matches,
                reason = ?outcome.reason,
                "Checked today"
            );
        }
        Err(err) => {
            tracing::error!(code = err.code(), error = %err, "Check today failed");
        }
    }

    let messages = OutcomeMessages::for_rule(target_weekday, evaluator.time_zone());
    let result = outcome.as_ref().map(|o| o.matches).map_err(|err| err.clone());
    notifier.notify(messages.message_for(&result));
    outcome
}
