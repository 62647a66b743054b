use serde::{Deserialize, Serialize};

/// A closed interval of timestamps in millis. Both `start_ts` and
/// `end_ts` belong to the `TimeSpan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSpan {
    start_ts: i64,
    end_ts: i64,
}

impl TimeSpan {
    pub fn new(start_ts: i64, end_ts: i64) -> Self {
        Self { start_ts, end_ts }
    }

    pub fn get_start(&self) -> i64 {
        self.start_ts
    }

    pub fn get_end(&self) -> i64 {
        self.end_ts
    }

    pub fn contains(&self, ts: i64) -> bool {
        self.start_ts <= ts && ts <= self.end_ts
    }
}
