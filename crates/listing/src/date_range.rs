use chrono::{Datelike, Duration, NaiveDate};

/// Quick picks offered by the date-range selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DatePreset {
    Today,
    Last7Days,
    Last30Days,
    #[default]
    ThisMonth,
    LastMonth,
    ThisYear,
    AllTime,
}

impl DatePreset {
    pub const ALL: [DatePreset; 7] = [
        Self::Today,
        Self::Last7Days,
        Self::Last30Days,
        Self::ThisMonth,
        Self::LastMonth,
        Self::ThisYear,
        Self::AllTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::ThisMonth => "This month",
            Self::LastMonth => "Last month",
            Self::ThisYear => "This year",
            Self::AllTime => "All time",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Inclusive `(from, to)` bounds relative to `today`; `None` for all time.
    pub fn range(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::Today => Some((today, today)),
            Self::Last7Days => Some((today - Duration::days(6), today)),
            Self::Last30Days => Some((today - Duration::days(29), today)),
            Self::ThisMonth => Some((first_of_month(today), last_of_month(today))),
            Self::LastMonth => {
                let previous = first_of_month(today).pred_opt()?;
                Some((first_of_month(previous), previous))
            }
            Self::ThisYear => Some((
                NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
                NaiveDate::from_ymd_opt(today.year(), 12, 31)?,
            )),
            Self::AllTime => None,
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}
