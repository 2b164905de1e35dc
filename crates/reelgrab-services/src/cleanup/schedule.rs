use chrono::{DateTime, Days, LocalResult, TimeZone};

/// Fixed hours of the day, at minute zero, at which the retention sweep fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionSchedule {
    hours: Vec<u32>,
}

impl RetentionSchedule {
    /// Hours outside 0-23 are dropped; the rest are sorted and de-duplicated.
    pub fn new(hours: impl IntoIterator<Item = u32>) -> Self {
        let mut hours: Vec<u32> = hours.into_iter().filter(|h| *h < 24).collect();
        hours.sort_unstable();
        hours.dedup();
        Self { hours }
    }

    pub fn hours(&self) -> &[u32] {
        &self.hours
    }

    /// Earliest scheduled instant strictly after `now`, in `now`'s time zone.
    ///
    /// A local time that does not exist (skipped by a DST change) is not fired; a local
    /// time that occurs twice fires at its first occurrence only. Returns `None` for an
    /// empty schedule.
    pub fn next_fire_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        if self.hours.is_empty() {
            return None;
        }

        let tz = now.timezone();
        let today = now.date_naive();

        for offset in 0..=2 {
            let date = today.checked_add_days(Days::new(offset))?;
            for &hour in &self.hours {
                let Some(naive) = date.and_hms_opt(hour, 0, 0) else {
                    continue;
                };
                let candidate = match tz.from_local_datetime(&naive) {
                    LocalResult::Single(t) => t,
                    LocalResult::Ambiguous(earliest, _) => earliest,
                    LocalResult::None => continue,
                };
                if candidate > *now {
                    return Some(candidate);
                }
            }
        }

        None
    }
}
