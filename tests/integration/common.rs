use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{NaiveDate, NaiveDateTime};
use stayledger::config::Config;
use stayledger::core::clock::FixedClock;
use stayledger::core::context::AppContext;
use stayledger::core::interval::Interval;
use stayledger::core::models::BookingDraft;
use stayledger::desk::BookingDesk;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

pub fn write_config(dir: &Path, lead_hours: f64, policy: &str) {
    let cfg = format!(
        r#"{{
      "check_in_reminders": {{ "value": "True", "description": "check-in reminders" }},
      "check_out_reminders": {{ "value": "True", "description": "check-out reminders" }},
      "check_in_lead_hours": {{ "value": {lead_hours}, "description": "lead in" }},
      "check_out_lead_hours": {{ "value": {lead_hours}, "description": "lead out" }},
      "settings_change_policy": {{ "value": "{policy}", "description": "policy" }},
      "file_logging_enabled": {{ "value": "True", "description": "file logging" }}
    }}"#
    );
    fs::write(dir.join("config.json"), cfg).unwrap();
}

pub fn write_valid_config(dir: &Path) {
    write_config(dir, 24.0, "keep-existing");
}

pub fn build_context(dir: &Path) -> AppContext {
    AppContext::new_with_paths(dir.join("config.json"), dir.join("logs"))
        .expect("context should build")
}

pub fn desk_at(ctx: &mut AppContext, now: NaiveDateTime) -> BookingDesk<'_> {
    BookingDesk::with_clock(ctx, Box::new(FixedClock(now)))
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn draft(name: &str, check_in: &str, check_out: &str) -> BookingDraft {
    BookingDraft::new(name, Interval::try_from_strs(check_in, check_out).unwrap())
}

pub fn reload_config(dir: &Path) -> Config {
    Config::load_from(dir.join("config.json")).expect("config should reload")
}

pub fn read_log_contents(dir: &Path) -> Option<String> {
    let logs_dir = dir.join("logs");
    let mut entries = fs::read_dir(&logs_dir).ok()?;
    let entry = entries.find_map(|e| e.ok())?;
    fs::read_to_string(entry.path()).ok()
}
