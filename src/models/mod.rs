pub mod dense;
pub mod observation;
pub mod output;
pub mod station;

pub use dense::DenseRecord;
pub use observation::ObservationRecord;
pub use output::{Attributes, Category, ColumnData, OutputBundle, VariableKey};
pub use station::StationRecord;
