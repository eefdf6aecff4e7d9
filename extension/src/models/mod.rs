//! Calendar data shared by the holiday provider, calendar source and evaluator.

pub mod date_key;
pub mod vacation;

pub use date_key::{DateKey, DateKeyError};
pub use vacation::{
    default_vacation_table, expand_vacation_days, parse_vacation_table, VacationRange,
    VacationTableError,
};
