//! Decides whether an instant is the target weekday and not a day off.
//!
//! Weekdays use a fixed numbering, Sunday = 0 through Saturday = 6, and are
//! always read in the evaluator's timezone, never the host's local zone.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::{
    error::CalendarError,
    models::DateKey,
    services::calendar::{CalendarSource, ExclusionReason},
    utils::time::{local_date, weekday_number},
};

pub const TUESDAY: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeReason {
    WrongWeekday,
    Excluded(ExclusionReason),
    TargetWorkday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationOutcome {
    pub date: NaiveDate,
    pub matches: bool,
    pub reason: OutcomeReason,
}

#[derive(Clone)]
pub struct DateRuleEvaluator {
    calendar: CalendarSource,
    time_zone: Tz,
}

impl DateRuleEvaluator {
    pub fn new(calendar: CalendarSource, time_zone: Tz) -> Self {
        Self {
            calendar,
            time_zone,
        }
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn is_target_weekday<Z: TimeZone>(&self, now: &DateTime<Z>, target_weekday: u8) -> bool {
        weekday_number(local_date(now, &self.time_zone)) == target_weekday
    }

    pub async fn is_excluded_today<Z: TimeZone>(
        &self,
        now: &DateTime<Z>,
    ) -> Result<bool, CalendarError> {
        let today = local_date(now, &self.time_zone);
        Ok(self.exclusion_reason(today).await? != ExclusionReason::None)
    }

    /// True when `now` is the target weekday and not a holiday or vacation day.
    pub async fn evaluate<Z: TimeZone>(
        &self,
        now: &DateTime<Z>,
        target_weekday: u8,
    ) -> Result<bool, CalendarError> {
        Ok(self.decide(now, target_weekday).await?.matches)
    }

    /// Like [`evaluate`](Self::evaluate) but reports why.
    ///
    /// The weekday is checked first; on any other weekday the holiday
    /// provider is not contacted at all.
    pub async fn decide<Z: TimeZone>(
        &self,
        now: &DateTime<Z>,
        target_weekday: u8,
    ) -> Result<EvaluationOutcome, CalendarError> {
        let date = local_date(now, &self.time_zone);

        if weekday_number(date) != target_weekday {
            return Ok(EvaluationOutcome {
                date,
                matches: false,
                reason: OutcomeReason::WrongWeekday,
            });
        }

        let outcome = match self.exclusion_reason(date).await? {
            ExclusionReason::None => EvaluationOutcome {
                date,
                matches: true,
                reason: OutcomeReason::TargetWorkday,
            },
            excluded => EvaluationOutcome {
                date,
                matches: false,
                reason: OutcomeReason::Excluded(excluded),
            },
        };

        tracing::debug!(%date, matches = outcome.matches, reason = ?outcome.reason, "Evaluated date rule");
        Ok(outcome)
    }

    async fn exclusion_reason(&self, date: NaiveDate) -> Result<ExclusionReason, CalendarError> {
        let calendar = self.calendar.get_exclusion_calendar(date.year()).await?;
        Ok(calendar.reason_for(&DateKey::from_date(date)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::VacationRange,
        services::holiday_provider::HolidayProviderStub,
    };
    use chrono::Utc;
    use chrono_tz::Europe::Berlin;
    use std::sync::Arc;

    fn evaluator(provider: Arc<HolidayProviderStub>, vacations: Vec<VacationRange>) -> DateRuleEvaluator {
        DateRuleEvaluator::new(CalendarSource::new(provider, "MV", vacations), Berlin)
    }

    #[test]
    fn is_target_weekday_matches_exactly_one_code() {
        let evaluator = evaluator(Arc::new(HolidayProviderStub::new([])), Vec::new());
        // 2024-10-06 (Sunday) through 2024-10-12 (Saturday), noon in Berlin.
        for offset in 0..7u32 {
            let now = Berlin
                .with_ymd_and_hms(2024, 10, 6 + offset, 12, 0, 0)
                .unwrap();
            for target in 0..7u8 {
                assert_eq!(
                    evaluator.is_target_weekday(&now, target),
                    target as u32 == offset,
                    "day offset {offset}, target {target}"
                );
            }
        }
    }

    #[test]
    fn is_target_weekday_uses_fixed_timezone() {
        let evaluator = evaluator(Arc::new(HolidayProviderStub::new([])), Vec::new());
        // Monday 23:30 UTC is Tuesday 01:30 in Berlin (CEST).
        let now = Utc.with_ymd_and_hms(2024, 6, 3, 23, 30, 0).unwrap();
        assert!(evaluator.is_target_weekday(&now, TUESDAY));
        assert!(!evaluator.is_target_weekday(&now, 1));
    }

    #[test]
    fn out_of_range_target_never_matches() {
        let evaluator = evaluator(Arc::new(HolidayProviderStub::new([])), Vec::new());
        let now = Berlin.with_ymd_and_hms(2024, 6, 4, 12, 0, 0).unwrap();
        assert!(!evaluator.is_target_weekday(&now, 7));
        assert!(!evaluator.is_target_weekday(&now, u8::MAX));
    }

    #[tokio::test]
    async fn decide_skips_provider_on_other_weekdays() {
        let provider = Arc::new(HolidayProviderStub::failing(CalendarError::Network(
            "offline".into(),
        )));
        let evaluator = evaluator(provider.clone(), Vec::new());
        // 2024-06-05 is a Wednesday.
        let now = Berlin.with_ymd_and_hms(2024, 6, 5, 9, 0, 0).unwrap();

        let outcome = evaluator.decide(&now, TUESDAY).await.unwrap();
        assert!(!outcome.matches);
        assert_eq!(outcome.reason, OutcomeReason::WrongWeekday);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn decide_reports_public_holiday() {
        // 2024-12-24 is a Tuesday; treat it as a holiday here.
        let provider = Arc::new(HolidayProviderStub::new([DateKey::new(12, 24).unwrap()]));
        let evaluator = evaluator(provider, Vec::new());
        let now = Berlin.with_ymd_and_hms(2024, 12, 24, 8, 0, 0).unwrap();

        let outcome = evaluator.decide(&now, TUESDAY).await.unwrap();
        assert_eq!(
            outcome.reason,
            OutcomeReason::Excluded(ExclusionReason::PublicHoliday)
        );
        assert!(!outcome.matches);
        assert!(evaluator.is_excluded_today(&now).await.unwrap());
    }

    #[tokio::test]
    async fn is_excluded_today_is_false_on_regular_day() {
        let evaluator = evaluator(Arc::new(HolidayProviderStub::new([])), Vec::new());
        let now = Berlin.with_ymd_and_hms(2024, 11, 12, 8, 0, 0).unwrap();
        assert!(!evaluator.is_excluded_today(&now).await.unwrap());
        assert!(evaluator.evaluate(&now, TUESDAY).await.unwrap());
        assert_eq!(evaluator.time_zone(), Berlin);
    }
}
