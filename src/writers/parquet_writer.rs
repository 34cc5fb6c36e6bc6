use crate::error::{ProcessingError, Result};
use crate::models::{Attributes, ColumnData, OutputBundle, VariableKey};
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE, META_DIMENSIONS, META_VARIABLE_DIMENSIONS,
};
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    /// Write a bundle to `path`.
    ///
    /// The file is staged next to the destination and only renamed into place
    /// once complete, so a failed write never leaves a partial file behind.
    /// An empty bundle still produces a valid zero-row file. The returned
    /// statistics are read from the staged file before it is renamed.
    pub fn write_bundle(&self, bundle: &OutputBundle, path: &Path) -> Result<ParquetFileInfo> {
        let schema = self.create_schema(bundle)?;
        let batch = self.bundle_to_batch(bundle, schema.clone())?;

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let staging = NamedTempFile::new_in(parent)?;

        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(staging, schema, Some(props))?;
        writer.write(&batch)?;
        let staging = writer.into_inner()?;
        let file_info = self.get_file_info(staging.path())?;

        staging.persist(path).map_err(|e| e.error)?;

        info!(
            "Wrote {} rows x {} variables to {}",
            batch.num_rows(),
            batch.num_columns(),
            path.display()
        );

        Ok(file_info)
    }

    /// Arrow schema with one field per variable; attributes become field
    /// metadata and dimensions plus global attributes become schema metadata
    fn create_schema(&self, bundle: &OutputBundle) -> Result<Arc<Schema>> {
        let fields: Vec<Field> = bundle
            .variables
            .iter()
            .map(|(key, data)| {
                let data_type = match data {
                    ColumnData::Float32(_) => DataType::Float32,
                    ColumnData::Int32(_) => DataType::Int32,
                    ColumnData::Utf8(_) => DataType::Utf8,
                };
                let metadata: HashMap<String, String> = bundle
                    .attributes
                    .get(key)
                    .map(|attrs| attrs.clone().into_iter().collect())
                    .unwrap_or_default();

                Field::new(key.column_name(), data_type, false).with_metadata(metadata)
            })
            .collect();

        let mut metadata: HashMap<String, String> = bundle
            .global_attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        metadata.insert(
            META_DIMENSIONS.to_string(),
            serde_json::to_string(&bundle.dimensions)?,
        );
        metadata.insert(
            META_VARIABLE_DIMENSIONS.to_string(),
            serde_json::to_string(&bundle.variable_dimensions)?,
        );

        Ok(Arc::new(Schema::new_with_metadata(fields, metadata)))
    }

    /// Convert bundle columns to an Arrow RecordBatch
    fn bundle_to_batch(&self, bundle: &OutputBundle, schema: Arc<Schema>) -> Result<RecordBatch> {
        let columns: Vec<ArrayRef> = bundle
            .variables
            .values()
            .map(|data| -> ArrayRef {
                match data {
                    ColumnData::Float32(values) => Arc::new(Float32Array::from(values.clone())),
                    ColumnData::Int32(values) => Arc::new(Int32Array::from(values.clone())),
                    ColumnData::Utf8(values) => Arc::new(StringArray::from(values.clone())),
                }
            })
            .collect();

        Ok(RecordBatch::try_new(schema, columns)?)
    }

    /// Read a file written by [`ParquetWriter::write_bundle`] back into a bundle
    pub fn read_bundle(&self, path: &Path) -> Result<OutputBundle> {
        use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

        let file = File::open(path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        let schema = builder.schema().clone();
        let reader = builder.build()?;

        let mut bundle = OutputBundle::new();
        let mut keys = Vec::with_capacity(schema.fields().len());

        for field in schema.fields() {
            let key = VariableKey::from_column_name(field.name()).ok_or_else(|| {
                ProcessingError::Config(format!("Unexpected column name: {}", field.name()))
            })?;
            let empty = match field.data_type() {
                DataType::Float32 => ColumnData::Float32(Vec::new()),
                DataType::Int32 => ColumnData::Int32(Vec::new()),
                DataType::Utf8 => ColumnData::Utf8(Vec::new()),
                other => {
                    return Err(ProcessingError::Config(format!(
                        "Unsupported column type {} for {}",
                        other,
                        field.name()
                    )))
                }
            };
            if !field.metadata().is_empty() {
                let attrs: Attributes = field
                    .metadata()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                bundle.attributes.insert(key.clone(), attrs);
            }
            bundle.insert(key.clone(), empty);
            keys.push(key);
        }

        for batch_result in reader {
            let batch = batch_result?;
            for (index, key) in keys.iter().enumerate() {
                let column = batch.column(index);
                let invalid =
                    || ProcessingError::Config(format!("Invalid {} column type", key.column_name()));

                match bundle.variables.get_mut(key) {
                    Some(ColumnData::Float32(values)) => {
                        let array = column
                            .as_any()
                            .downcast_ref::<Float32Array>()
                            .ok_or_else(invalid)?;
                        values.extend(array.values().iter().copied());
                    }
                    Some(ColumnData::Int32(values)) => {
                        let array = column
                            .as_any()
                            .downcast_ref::<Int32Array>()
                            .ok_or_else(invalid)?;
                        values.extend(array.values().iter().copied());
                    }
                    Some(ColumnData::Utf8(values)) => {
                        let array = column
                            .as_any()
                            .downcast_ref::<StringArray>()
                            .ok_or_else(invalid)?;
                        values.extend(array.iter().map(|v| v.unwrap_or_default().to_string()));
                    }
                    None => return Err(invalid()),
                }
            }
        }

        for (name, value) in schema.metadata() {
            match name.as_str() {
                META_DIMENSIONS => bundle.dimensions = serde_json::from_str(value)?,
                META_VARIABLE_DIMENSIONS => bundle.variable_dimensions = serde_json::from_str(value)?,
                _ if name.starts_with("ARROW:") => {}
                _ => {
                    bundle.global_attributes.insert(name.clone(), value.clone());
                }
            }
        }

        debug!("Read {} rows from {}", bundle.num_rows(), path.display());
        Ok(bundle)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let file_metadata = metadata.file_metadata();
        let row_groups = metadata.num_row_groups();
        let total_rows = file_metadata.num_rows();
        let total_columns = file_metadata.schema_descr().num_columns();
        let file_size = std::fs::metadata(path)?.len();

        let mut row_group_sizes = Vec::new();
        for i in 0..row_groups {
            let rg_metadata = metadata.row_group(i);
            row_group_sizes.push(rg_metadata.num_rows());
        }

        Ok(ParquetFileInfo {
            total_rows,
            total_columns,
            row_groups: row_groups as i32,
            row_group_sizes,
            file_size,
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub total_columns: usize,
    pub row_groups: i32,
    pub row_group_sizes: Vec<i64>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        let avg_rows = if self.row_groups > 0 {
            self.total_rows as f64 / self.row_groups as f64
        } else {
            0.0
        };

        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Variables: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} KB\n\
            - Compression: {:?}\n\
            - Avg rows per group: {:.0}",
            self.total_rows,
            self.total_columns,
            self.row_groups,
            self.file_size as f64 / 1024.0,
            self.compression,
            avg_rows
        )
    }
}
