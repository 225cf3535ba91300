// System clock
use crate::application::collaborators::Clock;
use chrono::{Local, Utc};

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn time_label(&self) -> String {
        Local::now().format("%H:%M:%S").to_string()
    }
}
