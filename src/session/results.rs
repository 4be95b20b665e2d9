use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::{info, instrument};

use crate::{
    api::{ImpactApi, SessionId, SessionResult},
    Error, Result,
};

/// Save the raw results of session `id` to `path`, then fetch them again
/// as a typed [`SessionResult`].
///
/// The two fetches hit two different representations of the same results;
/// both are kept. `path` is created or truncated, and is flushed and closed
/// before the second request.
#[instrument(level = "info", skip(api, path, out), fields(path = %path.display()))]
pub fn retrieve_results<A, W>(
    api: &A,
    id: SessionId,
    path: &Path,
    out: &mut W,
) -> Result<SessionResult>
where
    A: ImpactApi + ?Sized,
    W: Write,
{
    let file_error = |source| Error::ResultsFile {
        path: path.to_path_buf(),
        source,
    };

    let status = {
        let file = File::create(path).map_err(file_error)?;
        let mut writer = BufWriter::new(file);
        let status = api.stream_session_results(id, &mut writer)?;
        writer.flush().map_err(file_error)?;
        status
    };
    info!(?status, "raw results saved");
    writeln!(out, "Results written to {}", path.display())?;
    match status {
        Some(status) => writeln!(out, "{}", status.label())?,
        None => writeln!(out, "UNKNOWN")?,
    }

    Ok(api.session_results(id)?)
}

/// One `name: value` line per metric, in name order. Metrics the service
/// left empty print as `null`.
pub fn print_metrics<W: Write>(result: &SessionResult, out: &mut W) -> Result<()> {
    for (name, value) in &result.metrics {
        writeln!(out, "{name}: {}", format_metric(*value))?;
    }
    Ok(())
}

/// Decimal form for magnitudes in `[1e-3, 1e7)`, always with a fractional
/// part (`12.0`); scientific `1.5E-5` outside that range.
fn format_metric(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "null".to_string();
    };
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = v.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return if v.fract() == 0.0 {
            format!("{v:.1}")
        } else {
            v.to_string()
        };
    }
    let sci = format!("{v:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((&sci, "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}
