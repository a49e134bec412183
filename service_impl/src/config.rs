use std::{env, sync::Arc};

use async_trait::async_trait;
use salon_utils::{parse_time_of_day, parse_weekday};
use service::{
    config::{ConfigService, SalonConfig},
    ServiceError,
};
use time::{Time, Weekday};
use time_tz::timezones;

pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";
pub const DEFAULT_OPENING_TIME: &str = "09:00";
pub const DEFAULT_CLOSING_TIME: &str = "21:00";
pub const DEFAULT_SLOT_INTERVAL_MINUTES: &str = "30";

fn invalid(name: &str, value: &str) -> ServiceError {
    ServiceError::InvalidConfiguration(format!("{name}={value:?}").into())
}

fn time_setting(name: &str, value: &str) -> Result<Time, ServiceError> {
    parse_time_of_day(value).map_err(|_| invalid(name, value))
}

/// Builds the salon configuration from named settings, using defaults for
/// missing ones.
pub fn load_config(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SalonConfig, ServiceError> {
    let setting = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

    let timezone_name = setting("TIMEZONE", DEFAULT_TIMEZONE);
    let timezone = timezones::get_by_name(&timezone_name)
        .ok_or_else(|| ServiceError::UnknownTimezone(timezone_name.as_str().into()))?;

    let opening = time_setting("OPENING_TIME", &setting("OPENING_TIME", DEFAULT_OPENING_TIME))?;
    let closing = time_setting("CLOSING_TIME", &setting("CLOSING_TIME", DEFAULT_CLOSING_TIME))?;
    if closing <= opening {
        return Err(ServiceError::InvalidConfiguration(
            "CLOSING_TIME must be after OPENING_TIME".into(),
        ));
    }

    let interval = setting("SLOT_INTERVAL_MINUTES", DEFAULT_SLOT_INTERVAL_MINUTES);
    let slot_interval_minutes = interval
        .trim()
        .parse::<u16>()
        .ok()
        .filter(|minutes| *minutes > 0)
        .ok_or_else(|| invalid("SLOT_INTERVAL_MINUTES", &interval))?;

    let closed_weekdays = setting("CLOSED_WEEKDAYS", "")
        .split(',')
        .filter(|name| !name.trim().is_empty())
        .map(parse_weekday)
        .collect::<Result<Arc<[Weekday]>, _>>()?;

    Ok(SalonConfig {
        timezone,
        opening,
        closing,
        slot_interval_minutes,
        closed_weekdays,
    })
}

pub struct ConfigServiceImpl;

#[async_trait]
impl ConfigService for ConfigServiceImpl {
    async fn get_config(&self) -> Result<SalonConfig, ServiceError> {
        load_config(|name| env::var(name).ok())
    }
}
