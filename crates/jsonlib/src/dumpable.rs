//! The `Dumpable` hook: JSON conversions for types outside serde's reach.
//!
//! This is the extension point consulted when a value has a natural JSON
//! form that its `Serialize` impl (if any) does not produce: filesystem
//! paths become strings, UUIDs become hyphenated strings, date/times become
//! ISO-8601 strings, durations become total seconds.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde_json::Value;
use uuid::Uuid;

/// Convert a value into its JSON representation.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use jsonbourne_jsonlib::Dumpable;
///
/// assert_eq!(Path::new("/tmp/x").dumpable(), serde_json::json!("/tmp/x"));
/// ```
pub trait Dumpable {
    fn dumpable(&self) -> Value;
}

impl<T: Dumpable + ?Sized> Dumpable for &T {
    fn dumpable(&self) -> Value {
        (**self).dumpable()
    }
}

impl Dumpable for Value {
    fn dumpable(&self) -> Value {
        self.clone()
    }
}

impl Dumpable for Path {
    fn dumpable(&self) -> Value {
        Value::String(self.to_string_lossy().into_owned())
    }
}

impl Dumpable for PathBuf {
    fn dumpable(&self) -> Value {
        self.as_path().dumpable()
    }
}

impl Dumpable for Uuid {
    fn dumpable(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl<Tz: TimeZone> Dumpable for DateTime<Tz>
where
    Tz::Offset: std::fmt::Display,
{
    fn dumpable(&self) -> Value {
        Value::String(self.to_rfc3339())
    }
}

impl Dumpable for NaiveDateTime {
    fn dumpable(&self) -> Value {
        Value::String(self.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }
}

impl Dumpable for NaiveDate {
    fn dumpable(&self) -> Value {
        Value::String(self.format("%Y-%m-%d").to_string())
    }
}

impl Dumpable for NaiveTime {
    fn dumpable(&self) -> Value {
        Value::String(self.format("%H:%M:%S%.f").to_string())
    }
}

/// Total seconds, fractional.
impl Dumpable for Duration {
    fn dumpable(&self) -> Value {
        Value::from(self.as_secs_f64())
    }
}

/// Seconds since the Unix epoch (negative before it).
impl Dumpable for SystemTime {
    fn dumpable(&self) -> Value {
        let secs = match self.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs_f64(),
            Err(e) => -e.duration().as_secs_f64(),
        };
        Value::from(secs)
    }
}
