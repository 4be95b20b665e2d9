use std::io::Write;
use tracing::{info, instrument};

use super::DataSetData;
use crate::{
    api::{DataSetList, ImpactApi},
    Result,
};

/// Upload `table` as dataset `dataset_name`, then list the account's datasets
/// to `out`.
#[instrument(level = "info", skip(api, table, out), fields(rows = table.data.len()))]
pub fn publish_dataset<A, W>(
    api: &A,
    dataset_name: &str,
    table: &DataSetData,
    out: &mut W,
) -> Result<DataSetList>
where
    A: ImpactApi + ?Sized,
    W: Write,
{
    api.create_dataset(dataset_name, table)?;
    info!("dataset uploaded");

    let list = api.list_datasets()?;
    writeln!(out, "Number of datasets: {}", list.items.len())?;
    for summary in &list.items {
        writeln!(out, "Name: {}", summary.data_set_name)?;
    }
    Ok(list)
}
