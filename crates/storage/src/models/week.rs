use chrono::{
    DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc,
};

/// Offset of Korea Standard Time from UTC. KST has no daylight saving time,
/// so a fixed offset is exact.
pub const KST_OFFSET_HOURS: i64 = 9;

pub const KST: FixedOffset = match FixedOffset::east_opt(KST_OFFSET_HOURS as i32 * 3600) {
    Some(offset) => offset,
    None => panic!("KST offset out of range"),
};

/// Calendar date of a UTC instant as seen in KST.
pub fn local_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&KST).date_naive()
}

/// Converts a KST wall-clock time to the UTC instant it denotes.
pub fn local_to_utc(local: NaiveDateTime) -> DateTime<Utc> {
    (local - KST).and_utc()
}

/// Today's date in KST. Only request handlers call this; the fine ledger
/// always receives its anchor date explicitly.
pub fn today_local() -> NaiveDate {
    local_date(Utc::now())
}

/// A Monday-to-Sunday week, identified by its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Week {
    start: NaiveDate,
}

impl Week {
    /// The week that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let days_since_monday = u64::from(date.weekday().num_days_from_monday());
        Self {
            start: date - Days::new(days_since_monday),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Days::new(6)
    }

    /// Monday 00:00:00.000 local time.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Sunday 23:59:59.999 local time.
    pub fn ends_at(&self) -> NaiveDateTime {
        self.next().starts_at() - TimeDelta::milliseconds(1)
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn previous(&self) -> Self {
        self.offset(-1)
    }

    /// Moves by a whole number of weeks, backwards when `weeks` is negative.
    pub fn offset(&self, weeks: i64) -> Self {
        Self {
            start: self.start + TimeDelta::weeks(weeks),
        }
    }

    pub fn as_range(&self) -> DateRange {
        DateRange::new(self.start, self.end())
    }

    /// Every week from `self` through `last`, inclusive. Empty when `last`
    /// precedes `self`.
    pub fn through(self, last: Week) -> impl Iterator<Item = Week> {
        std::iter::successors(Some(self), |week| Some(week.next()))
            .take_while(move |week| *week <= last)
    }

    /// `MM.DD` of the week's Sunday, e.g. `02.08`.
    pub fn label(&self) -> String {
        self.end().format("%m.%d").to_string()
    }

    /// `2026. 2. 2. ~ 2. 8.`, repeating the year on the right only when the
    /// week crosses into a new year.
    pub fn range_label(&self) -> String {
        let start = self.start;
        let end = self.end();

        if start.year() == end.year() {
            format!(
                "{}. {}. {}. ~ {}. {}.",
                start.year(),
                start.month(),
                start.day(),
                end.month(),
                end.day()
            )
        } else {
            format!(
                "{}. {}. {}. ~ {}. {}. {}.",
                start.year(),
                start.month(),
                start.day(),
                end.year(),
                end.month(),
                end.day()
            )
        }
    }
}

/// A closed range of local calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Half-open UTC interval `[start 00:00 KST, day after end 00:00 KST)`
    /// covering every instant whose local date falls in the range.
    pub fn utc_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let lower = local_to_utc(self.start.and_time(NaiveTime::MIN));
        let upper = local_to_utc((self.end + Days::new(1)).and_time(NaiveTime::MIN));
        (lower, upper)
    }
}
