//! Runtime configuration for the dashboard views.
//!
//! Values come from defaults, overridden by environment variables:
//! - `RESCUE_DASHBOARD_MAP_CENTER` - default map center as `lat,long`
//! - `RESCUE_DASHBOARD_MAP_ZOOM` - map zoom level
//! - `RESCUE_DASHBOARD_HIGHLIGHT_COLOR` - background for highlighted columns
//! - `RESCUE_DASHBOARD_PAGE_SIZE` - rows per table page

use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

/// Map center used when no row is selected (Austin, TX area).
pub const DEFAULT_MAP_CENTER: GeoPoint = GeoPoint {
    lat: 30.75,
    long: -97.48,
};

pub const DEFAULT_MAP_ZOOM: u8 = 10;
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#D2F3FF";
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub map_center: GeoPoint,
    pub map_zoom: u8,
    pub highlight_color: String,
    /// Rows per page the table should render. The table pages client-side;
    /// `/records` only pages when the caller passes `limit`.
    pub page_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            map_center: DEFAULT_MAP_CENTER,
            map_zoom: DEFAULT_MAP_ZOOM,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables. Malformed values are
    /// logged and replaced by their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("RESCUE_DASHBOARD_MAP_CENTER") {
            match parse_point(&raw) {
                Some(point) => config.map_center = point,
                None => tracing::warn!("Ignoring malformed map center: {}", raw),
            }
        }

        if let Some(raw) = lookup("RESCUE_DASHBOARD_MAP_ZOOM") {
            match raw.trim().parse() {
                Ok(zoom) => config.map_zoom = zoom,
                Err(_) => tracing::warn!("Ignoring malformed map zoom: {}", raw),
            }
        }

        if let Some(color) = lookup("RESCUE_DASHBOARD_HIGHLIGHT_COLOR") {
            config.highlight_color = color.trim().to_string();
        }

        if let Some(raw) = lookup("RESCUE_DASHBOARD_PAGE_SIZE") {
            match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => config.page_size = size,
                _ => tracing::warn!("Ignoring malformed page size: {}", raw),
            }
        }

        config
    }
}

fn parse_point(raw: &str) -> Option<GeoPoint> {
    let (lat, long) = raw.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let long: f64 = long.trim().parse().ok()?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&long) {
        return None;
    }
    Some(GeoPoint { lat, long })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_center_on_austin() {
        let config = DashboardConfig::from_lookup(lookup(&[]));
        assert_eq!(config.map_center, GeoPoint { lat: 30.75, long: -97.48 });
        assert_eq!(config.map_zoom, 10);
        assert_eq!(config.highlight_color, "#D2F3FF");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn env_overrides_apply() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("RESCUE_DASHBOARD_MAP_CENTER", "29.42, -98.49"),
            ("RESCUE_DASHBOARD_MAP_ZOOM", "12"),
            ("RESCUE_DASHBOARD_PAGE_SIZE", "25"),
        ]));
        assert_eq!(config.map_center, GeoPoint { lat: 29.42, long: -98.49 });
        assert_eq!(config.map_zoom, 12);
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("RESCUE_DASHBOARD_MAP_CENTER", "north"),
            ("RESCUE_DASHBOARD_MAP_ZOOM", "far"),
            ("RESCUE_DASHBOARD_PAGE_SIZE", "0"),
        ]));
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn out_of_range_center_is_rejected() {
        assert!(parse_point("95.0,-97.0").is_none());
        assert!(parse_point("30.0,-197.0").is_none());
    }
}
