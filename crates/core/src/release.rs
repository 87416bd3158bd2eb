//! Release gate for public result lookup.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Site-wide publication settings. At most one record exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSettings {
    /// Instant from which lookup is open. `None` means open immediately.
    pub release_at: Option<Timestamp>,
    pub site_title: Option<String>,
}

/// Whether public lookup is open at `now`.
///
/// Open when no settings exist, no release time is set, or the release time
/// has been reached.
pub fn is_released(settings: Option<&ReleaseSettings>, now: Timestamp) -> bool {
    match settings.and_then(|s| s.release_at) {
        Some(release_at) => now >= release_at,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn at(release_at: Timestamp) -> ReleaseSettings {
        ReleaseSettings {
            release_at: Some(release_at),
            site_title: None,
        }
    }

    #[test]
    fn open_without_settings_or_release_time() {
        let now = Utc::now();
        assert!(is_released(None, now));
        assert!(is_released(Some(&ReleaseSettings::default()), now));
    }

    #[test]
    fn closed_before_release_time() {
        let release = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let settings = at(release);
        assert!(!is_released(Some(&settings), release - Duration::seconds(1)));
    }

    #[test]
    fn open_at_and_after_release_time() {
        let release = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let settings = at(release);
        assert!(is_released(Some(&settings), release));
        assert!(is_released(Some(&settings), release + Duration::days(3)));
    }

    #[test]
    fn serializes_camel_case() {
        let settings = ReleaseSettings {
            release_at: None,
            site_title: Some("Annual Results".into()),
        };
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["siteTitle"], "Annual Results");
        assert!(value["releaseAt"].is_null());
    }
}
