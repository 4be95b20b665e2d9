pub mod publish;
pub mod types;

pub use publish::publish_dataset;
pub use types::{ColumnMetadata, Columns, DataRole, DataSetData, DataType, Row, EXPECTED_COLUMNS};
