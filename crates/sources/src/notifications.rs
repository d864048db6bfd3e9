//! Calendar countdowns for the notification panel
//!
//! Every countdown is a whole number of days, inclusive of the target day,
//! counted between calendar dates so the time of day never matters.

use chrono::{Datelike, NaiveDate};
use inkboard_types::NotificationConfig;

/// Days from `today` until `target`, counting both days. Zero once the
/// target has passed.
pub fn days_until(today: NaiveDate, target: NaiveDate) -> u32 {
    let days = (target - today).num_days() + 1;
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

/// Last day of the month containing `date`
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

/// Last day of the calendar quarter containing `date`
pub fn end_of_quarter(date: NaiveDate) -> NaiveDate {
    let last_month = (date.month0() / 3 + 1) * 3;
    NaiveDate::from_ymd_opt(date.year(), last_month, 1)
        .map(end_of_month)
        .unwrap_or(date)
}

/// Next occurrence of `month`/`day` after `today`
///
/// The date counts as passed on the day itself, so on that day the next
/// year's occurrence is returned.
///
/// Dates that do not exist every year (29 February) resolve to the next year
/// that has them. Returns `None` for dates that never exist.
pub fn next_yearly_date(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    (today.year()..=today.year() + 8)
        .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
        .find(|date| *date > today)
}

/// Pad labels and values into two left-justified columns
///
/// Widths are taken from this batch only.
pub fn align_columns(rows: &[(String, String)]) -> Vec<String> {
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|(label, value)| {
            format!(
                "{:<lw$} {:<vw$}",
                label,
                value,
                lw = label_width,
                vw = value_width
            )
        })
        .collect()
}

fn days_value(days: u32) -> String {
    format!("{} days", days)
}

/// Builds the notification panel lines
#[derive(Debug, Clone)]
pub struct NotificationBuilder {
    config: NotificationConfig,
}

impl NotificationBuilder {
    pub fn new(config: NotificationConfig) -> Self {
        Self { config }
    }

    /// Countdown lines for `today`
    ///
    /// `last_fetch` is the date of the last quote fetch, shown on the
    /// "Updated" line when that line is enabled.
    pub fn build(&self, today: NaiveDate, last_fetch: Option<NaiveDate>) -> Vec<String> {
        let seasonal_days = match next_yearly_date(
            today,
            self.config.seasonal_month,
            self.config.seasonal_day,
        ) {
            Some(date) => days_until(today, date),
            None => {
                log::warn!(
                    "Seasonal date {}-{} does not exist, showing 0 days",
                    self.config.seasonal_month,
                    self.config.seasonal_day
                );
                0
            }
        };

        let mut rows = vec![
            (
                "End of month:".to_string(),
                days_value(days_until(today, end_of_month(today))),
            ),
            (
                format!("{}:", self.config.seasonal_label),
                days_value(seasonal_days),
            ),
            (
                "End of quarter:".to_string(),
                days_value(days_until(today, end_of_quarter(today))),
            ),
            (
                format!("{}:", self.config.target_label),
                days_value(days_until(today, self.config.target_date)),
            ),
        ];

        if self.config.show_updated {
            let updated = last_fetch
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "never".to_string());
            rows.push(("Updated:".to_string(), updated));
        }

        align_columns(&rows)
    }
}
