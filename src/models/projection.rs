use serde::{Deserialize, Serialize};

use super::AnimalRecord;

/// A row as the view layer currently renders it.
///
/// The view may sort, filter or hide columns, so every column is optional
/// here. Columns the projector does not use are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisibleRow {
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub animal_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location_lat: Option<f64>,
    #[serde(default)]
    pub location_long: Option<f64>,
}

impl From<&AnimalRecord> for VisibleRow {
    fn from(record: &AnimalRecord) -> Self {
        Self {
            breed: Some(record.breed.clone()),
            animal_type: Some(record.animal_type.clone()),
            name: Some(record.name.clone()),
            location_lat: record.location_lat,
            location_long: record.location_long,
        }
    }
}

/// Number of visible rows of one breed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedCount {
    pub breed: String,
    pub count: usize,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub long: f64,
}

/// Map marker for the selected row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoMarker {
    pub lat: f64,
    pub long: f64,
    /// Shown as the marker tooltip.
    pub animal_type: String,
    /// Shown in the marker popup.
    pub name: String,
}

impl GeoMarker {
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            long: self.long,
        }
    }
}

/// What the map should display: a marker and its location, or the default center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub marker: Option<GeoMarker>,
}

/// Background rule for one highlighted table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHighlight {
    pub column_id: String,
    pub background_color: String,
}

/// Zero or one index into the visible rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSelection(pub Option<usize>);

impl RowSelection {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn at(index: usize) -> Self {
        Self(Some(index))
    }

    /// Build from the index list a table reports. Only the first entry is
    /// used; a negative first entry means nothing is selected.
    pub fn from_indices(indices: &[i64]) -> Self {
        Self(
            indices
                .first()
                .and_then(|&index| usize::try_from(index).ok()),
        )
    }

    pub fn index(&self) -> Option<usize> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_uses_first_index_only() {
        assert_eq!(RowSelection::from_indices(&[4, 1]), RowSelection::at(4));
        assert_eq!(RowSelection::from_indices(&[]), RowSelection::none());
        assert_eq!(RowSelection::from_indices(&[-1]), RowSelection::none());
    }

    #[test]
    fn visible_row_tolerates_hidden_columns() {
        let row: VisibleRow =
            serde_json::from_value(serde_json::json!({ "name": "Rex", "color": "Tan" })).unwrap();
        assert_eq!(row.name.as_deref(), Some("Rex"));
        assert!(row.breed.is_none());
        assert!(row.location_lat.is_none());
    }
}
