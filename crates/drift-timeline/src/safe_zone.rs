//! Safe reading zones: scroll intervals where motion is damped so text can be read.

use serde::{Deserialize, Serialize};

/// A scroll-progress interval with a damping factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeZone {
    /// Inclusive start of the zone.
    pub start: f32,
    /// Inclusive end of the zone.
    pub end: f32,
    /// Motion multiplier in `(0, 1]`. Lower means slower.
    pub damping: f32,
    /// Section name, for logs and overlays.
    pub label: String,
}

impl SafeZone {
    /// Convenience constructor used by the built-in timeline.
    pub fn new(start: f32, end: f32, damping: f32, label: &str) -> Self {
        Self {
            start,
            end,
            damping,
            label: label.to_string(),
        }
    }

    /// Whether `progress` falls inside the zone, edges included.
    #[inline]
    pub fn contains(&self, progress: f32) -> bool {
        self.start <= progress && progress <= self.end
    }
}

/// Result of a damping query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneDamping<'a> {
    /// True when inside a zone.
    pub in_zone: bool,
    /// Motion multiplier, `1.0` outside every zone.
    pub factor: f32,
    /// Label of the matching zone.
    pub label: Option<&'a str>,
}

impl ZoneDamping<'_> {
    /// No damping: full speed.
    pub const FREE: ZoneDamping<'static> = ZoneDamping {
        in_zone: false,
        factor: 1.0,
        label: None,
    };
}

/// Damping at `progress`: the first zone in declaration order that contains
/// it, or full speed when none does.
pub fn damping_at(zones: &[SafeZone], progress: f32) -> ZoneDamping<'_> {
    zones
        .iter()
        .find(|zone| zone.contains(progress))
        .map(|zone| ZoneDamping {
            in_zone: true,
            factor: zone.damping,
            label: Some(zone.label.as_str()),
        })
        .unwrap_or(ZoneDamping::FREE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timeline;

    #[test]
    fn test_outside_zones_is_full_speed() {
        let zones = Timeline::default().safe_zones;
        let d = damping_at(&zones, 0.1);
        assert_eq!(d, ZoneDamping::FREE);
        assert_eq!(d.factor, 1.0);
    }

    #[test]
    fn test_inside_zone_returns_configured_factor() {
        let zones = Timeline::default().safe_zones;
        let d = damping_at(&zones, 0.2);
        assert!(d.in_zone);
        assert_eq!(d.factor, 0.3);
        assert_eq!(d.label, Some("2018 Section"));
    }

    #[test]
    fn test_zone_edges_are_inclusive() {
        let zones = vec![SafeZone::new(0.25, 0.5, 0.4, "mid")];
        assert!(damping_at(&zones, 0.25).in_zone);
        assert!(damping_at(&zones, 0.5).in_zone);
        assert!(!damping_at(&zones, 0.2499).in_zone);
        assert!(!damping_at(&zones, 0.5001).in_zone);
    }

    #[test]
    fn test_first_declared_zone_wins_on_overlap() {
        let zones = vec![
            SafeZone::new(0.0, 0.6, 0.5, "first"),
            SafeZone::new(0.4, 1.0, 0.2, "second"),
        ];
        assert_eq!(damping_at(&zones, 0.5).label, Some("first"));
        assert_eq!(damping_at(&zones, 0.7).label, Some("second"));
    }

    #[test]
    fn test_empty_zone_list_and_nan() {
        assert_eq!(damping_at(&[], 0.5), ZoneDamping::FREE);
        let zones = Timeline::default().safe_zones;
        assert_eq!(damping_at(&zones, f32::NAN), ZoneDamping::FREE);
    }
}
