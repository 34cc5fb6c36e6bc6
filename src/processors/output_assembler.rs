use crate::models::{Attributes, Category, ColumnData, DenseRecord, OutputBundle, VariableKey};
use crate::utils::constants::{
    ATTR_COORDINATES, ATTR_UNITS, COORDINATES_LON_LAT, DIM_LOCATION, UNITS_METERS,
    VAR_DATE_TIME, VAR_HEIGHT, VAR_LATITUDE, VAR_LONGITUDE, VAR_SNOW_DEPTH, VAR_STATION_ID,
};

/// Reshapes densified rows into the column set handed to the writer.
/// Values are only narrowed to their storage types here.
pub struct OutputAssembler {
    global_attributes: Attributes,
}

impl OutputAssembler {
    pub fn new() -> Self {
        Self {
            global_attributes: Attributes::new(),
        }
    }

    pub fn with_global_attribute(mut self, name: &str, value: &str) -> Self {
        self.global_attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn assemble(&self, records: &[DenseRecord]) -> OutputBundle {
        let mut bundle = OutputBundle::new();

        let date_time = VariableKey::metadata(VAR_DATE_TIME);
        let station_id = VariableKey::metadata(VAR_STATION_ID);
        let latitude = VariableKey::metadata(VAR_LATITUDE);
        let longitude = VariableKey::metadata(VAR_LONGITUDE);
        let height = VariableKey::metadata(VAR_HEIGHT);
        let value = VariableKey::new(VAR_SNOW_DEPTH, Category::ObsValue);
        let error = VariableKey::new(VAR_SNOW_DEPTH, Category::ObsError);
        let quality = VariableKey::new(VAR_SNOW_DEPTH, Category::PreQc);

        bundle.insert(
            date_time,
            ColumnData::Utf8(records.iter().map(|r| r.date_time.clone()).collect()),
        );
        bundle.insert(
            station_id,
            ColumnData::Utf8(records.iter().map(|r| r.station_id.clone()).collect()),
        );
        bundle.insert(
            latitude,
            ColumnData::Float32(records.iter().map(|r| r.latitude as f32).collect()),
        );
        bundle.insert(
            longitude,
            ColumnData::Float32(records.iter().map(|r| r.longitude as f32).collect()),
        );
        bundle.insert(
            height.clone(),
            ColumnData::Float32(records.iter().map(|r| r.elevation as f32).collect()),
        );
        bundle.insert(
            value.clone(),
            ColumnData::Float32(records.iter().map(|r| r.value as f32).collect()),
        );
        bundle.insert(
            error.clone(),
            ColumnData::Float32(records.iter().map(|r| r.error as f32).collect()),
        );
        bundle.insert(
            quality.clone(),
            ColumnData::Int32(records.iter().map(|r| r.quality_flag).collect()),
        );

        bundle.set_attribute(&height, ATTR_UNITS, UNITS_METERS);
        for key in [&value, &error, &quality] {
            bundle.set_attribute(key, ATTR_COORDINATES, COORDINATES_LON_LAT);
        }
        bundle.set_attribute(&value, ATTR_UNITS, UNITS_METERS);
        bundle.set_attribute(&error, ATTR_UNITS, UNITS_METERS);

        bundle
            .dimensions
            .insert(DIM_LOCATION.to_string(), records.len());
        bundle
            .variable_dimensions
            .insert(VAR_SNOW_DEPTH.to_string(), vec![DIM_LOCATION.to_string()]);
        bundle.global_attributes = self.global_attributes.clone();

        bundle
    }
}

impl Default for OutputAssembler {
    fn default() -> Self {
        Self::new()
    }
}
