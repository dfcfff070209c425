//! Derived views computed from the rows the table currently shows.
//!
//! Every function here is total: missing columns, empty input and stale
//! selections produce empty or default output rather than errors.

use std::collections::HashMap;

use crate::config::DashboardConfig;
use crate::models::{
    AnimalRecord, BreedCount, ColumnHighlight, GeoMarker, MapView, RowSelection, VisibleRow,
};

/// Column access the projector needs from a row.
pub trait ProjectedRow {
    fn breed(&self) -> Option<&str>;
    fn animal_type(&self) -> Option<&str>;
    fn name(&self) -> Option<&str>;
    fn location_lat(&self) -> Option<f64>;
    fn location_long(&self) -> Option<f64>;
}

impl ProjectedRow for VisibleRow {
    fn breed(&self) -> Option<&str> {
        self.breed.as_deref()
    }

    fn animal_type(&self) -> Option<&str> {
        self.animal_type.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn location_lat(&self) -> Option<f64> {
        self.location_lat
    }

    fn location_long(&self) -> Option<f64> {
        self.location_long
    }
}

impl ProjectedRow for AnimalRecord {
    fn breed(&self) -> Option<&str> {
        Some(self.breed.as_str())
    }

    fn animal_type(&self) -> Option<&str> {
        Some(self.animal_type.as_str())
    }

    fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }

    fn location_lat(&self) -> Option<f64> {
        self.location_lat
    }

    fn location_long(&self) -> Option<f64> {
        self.location_long
    }
}

/// Count visible rows per breed.
///
/// Rows without a breed are left out. The result is ordered by count,
/// largest first, with ties broken by breed name.
pub fn aggregate<R: ProjectedRow>(rows: &[R]) -> Vec<BreedCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for breed in rows.iter().filter_map(|row| row.breed()) {
        *counts.entry(breed).or_default() += 1;
    }

    let mut aggregate: Vec<BreedCount> = counts
        .into_iter()
        .map(|(breed, count)| BreedCount {
            breed: breed.to_string(),
            count,
        })
        .collect();
    aggregate.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.breed.cmp(&b.breed)));
    aggregate
}

/// Marker for the selected visible row, if it has coordinates.
///
/// The index refers to `rows` as the view presents them, not to the order
/// of the working set.
pub fn locate<R: ProjectedRow>(rows: &[R], selection: RowSelection) -> Option<GeoMarker> {
    let row = rows.get(selection.index()?)?;

    Some(GeoMarker {
        lat: row.location_lat()?,
        long: row.location_long()?,
        animal_type: row.animal_type().unwrap_or_default().to_string(),
        name: row.name().unwrap_or_default().to_string(),
    })
}

/// Map state for an optional marker: centered on it, or on the configured default.
pub fn map_view(marker: Option<GeoMarker>, config: &DashboardConfig) -> MapView {
    MapView {
        center: marker
            .as_ref()
            .map(GeoMarker::point)
            .unwrap_or(config.map_center),
        zoom: config.map_zoom,
        marker,
    }
}

/// Background rules for the selected table columns, in selection order.
pub fn highlight(selected_columns: &[String], color: &str) -> Vec<ColumnHighlight> {
    let mut highlights: Vec<ColumnHighlight> = Vec::with_capacity(selected_columns.len());
    for column in selected_columns {
        if highlights.iter().any(|h| &h.column_id == column) {
            continue;
        }
        highlights.push(ColumnHighlight {
            column_id: column.clone(),
            background_color: color.to_string(),
        });
    }
    highlights
}
