pub mod calendar;
pub mod evaluator;
pub mod holiday_provider;
