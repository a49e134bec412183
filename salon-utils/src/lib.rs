pub mod span;
pub mod time_of_day;

pub use span::Span;
pub use time_of_day::{
    combine, local_date, minutes_to_time, minutes_to_time_of_day, parse_time_of_day,
    parse_weekday, time_of_day_to_minutes, time_to_minutes, SalonTimeError, MINUTES_PER_DAY,
};

/// Implement `From<T>` for a type which already implement From<&T>
#[macro_export]
macro_rules! derive_from_reference {
    ($from_type:ty, $impl_type:ty) => {
        impl From<$from_type> for $impl_type {
            fn from(value: $from_type) -> Self {
                Self::from(&value)
            }
        }
    };
}
