//! Campaign calendar: the purchase window, selectable days and the
//! purchase-time wire format.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Hungarian month names used for day option labels.
pub const MONTH_NAMES: [&str; 12] = [
    "Január", "Február", "Március", "Április",
    "Május", "Június", "Július", "Augusztus",
    "Szeptember", "Október", "November", "December",
];

/// The fixed calendar range in which a purchase counts for the campaign.
///
/// # Examples
///
/// ```
/// use promo_upload::domain::CampaignWindow;
///
/// let window = CampaignWindow::default();
/// assert_eq!(window.start.to_string(), "2022-07-01 00:00:00");
/// assert_eq!(window.end.to_string(), "2022-08-31 23:59:59");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignWindow {
    /// First moment a purchase is accepted
    pub start: NaiveDateTime,
    /// Last moment a purchase is accepted
    pub end: NaiveDateTime,
}

impl Default for CampaignWindow {
    fn default() -> Self {
        Self {
            start: campaign_moment(2022, 7, 1, 0, 0, 0),
            end: campaign_moment(2022, 8, 31, 23, 59, 59),
        }
    }
}

fn campaign_moment(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, min, sec))
        .expect("campaign bounds are valid calendar moments")
}

/// A selectable purchase day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOption {
    pub date: NaiveDate,
    pub label: String,
}

impl CampaignWindow {
    /// The exclusive upper boundary for day options: the earlier of the
    /// campaign end and `now`.
    pub fn last_selectable(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.end.min(now)
    }

    /// Lists the days a purchase can be reported for.
    ///
    /// Starts at the campaign start date and keeps adding days while the
    /// day's midnight is strictly before [`last_selectable`](Self::last_selectable).
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use promo_upload::domain::CampaignWindow;
    ///
    /// let now = NaiveDate::from_ymd_opt(2022, 7, 3).unwrap().and_hms_opt(12, 0, 0).unwrap();
    /// let options = CampaignWindow::default().day_options(now);
    /// let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
    /// assert_eq!(labels, ["Július 1.", "Július 2.", "Július 3."]);
    /// ```
    pub fn day_options(&self, now: NaiveDateTime) -> Vec<DayOption> {
        let last = self.last_selectable(now);
        let mut current = self.start.date();
        let mut options = Vec::new();

        while current.and_time(NaiveTime::default()) < last {
            options.push(DayOption {
                date: current,
                label: day_label(current),
            });
            match current.checked_add_days(Days::new(1)) {
                Some(next) => current = next,
                None => break,
            }
        }

        options
    }
}

/// Formats a day the way the day selector shows it, e.g. `Július 1.`.
pub fn day_label(date: NaiveDate) -> String {
    format!("{} {}.", MONTH_NAMES[date.month0() as usize], date.day())
}

/// Builds the `YYYY-MM-DD HH:MM` purchase time the upload endpoint expects.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use promo_upload::domain::format_purchase_time;
///
/// let day = NaiveDate::from_ymd_opt(2022, 7, 5).unwrap();
/// assert_eq!(format_purchase_time(day, 9, 3), "2022-07-05 09:03");
/// ```
pub fn format_purchase_time(day: NaiveDate, hour: u32, minute: u32) -> String {
    format!("{} {:02}:{:02}", day.format("%Y-%m-%d"), hour, minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moment(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_day_options_start_with_campaign_start() {
        let window = CampaignWindow::default();
        let options = window.day_options(moment(2022, 7, 20, 8, 0));

        assert_eq!(options[0].date, NaiveDate::from_ymd_opt(2022, 7, 1).unwrap());
        assert_eq!(options[0].label, "Július 1.");
        assert_eq!(options.len(), 20);
    }

    #[test]
    fn test_day_options_exclude_boundary_midnight() {
        let window = CampaignWindow::default();

        // Midnight of the 5th is not strictly before "now", so the 5th is left out
        let options = window.day_options(moment(2022, 7, 5, 0, 0));
        assert_eq!(options.len(), 4);
        assert_eq!(options.last().unwrap().date, NaiveDate::from_ymd_opt(2022, 7, 4).unwrap());

        let options = window.day_options(moment(2022, 7, 5, 0, 1));
        assert_eq!(options.len(), 5);
    }

    #[test]
    fn test_day_options_capped_at_campaign_end() {
        let window = CampaignWindow::default();
        let options = window.day_options(moment(2026, 1, 1, 0, 0));

        assert_eq!(options.len(), 62);
        assert_eq!(options.last().unwrap().label, "Augusztus 31.");
        let last = window.last_selectable(moment(2026, 1, 1, 0, 0));
        assert!(options.iter().all(|o| o.date.and_hms_opt(0, 0, 0).unwrap() < last));
    }

    #[test]
    fn test_day_options_idempotent_for_fixed_now() {
        let window = CampaignWindow::default();
        let now = moment(2022, 8, 10, 17, 30);

        assert_eq!(window.day_options(now), window.day_options(now));
    }

    #[test]
    fn test_day_options_empty_before_campaign() {
        let window = CampaignWindow::default();
        assert!(window.day_options(moment(2022, 6, 30, 23, 0)).is_empty());
    }

    #[test]
    fn test_purchase_time_is_zero_padded() {
        let day = NaiveDate::from_ymd_opt(2022, 8, 1).unwrap();
        assert_eq!(format_purchase_time(day, 0, 0), "2022-08-01 00:00");
        assert_eq!(format_purchase_time(day, 23, 59), "2022-08-01 23:59");
    }

    #[test]
    fn test_day_label_uses_hungarian_month() {
        let day = NaiveDate::from_ymd_opt(2022, 8, 15).unwrap();
        assert_eq!(day_label(day), "Augusztus 15.");
    }
}
