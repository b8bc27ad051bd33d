// src/aggregate.rs

use chrono::NaiveDate;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::fetch::{Fetcher, Transport};
use crate::process::Table;
use crate::request::parse_date;

/// Every calendar day from `start` to `end`, both included.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    if start > end {
        return Err(Error::Validation(format!(
            "start date {start} is after end date {end}"
        )));
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Fetch `report` for each day of `start..=end` in order and stack the
/// results into one table.
///
/// The first failing day aborts the run; its error comes back tagged with
/// that day's date.
#[tracing::instrument(level = "info", skip_all, fields(%report, %start, %end))]
pub fn aggregate<T: Transport>(
    fetcher: &Fetcher<T>,
    report: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Table> {
    let dates = date_range(start, end)?;
    // Build every descriptor first so bad input never reaches the network.
    let requests = dates
        .iter()
        .map(|&date| fetcher.descriptor(report, date))
        .collect::<Result<Vec<_>>>()?;
    info!(days = requests.len(), "aggregating report");

    let mut tables = Vec::with_capacity(requests.len());
    for req in &requests {
        let table = fetcher.fetch(req).map_err(|e| {
            error!(date = %req.date(), error = %e, "fetch failed; aborting range");
            e.on_date(req.date())
        })?;
        tables.push(table);
    }

    let combined = Table::concat(&tables)?;
    info!(
        rows = combined.num_rows(),
        columns = combined.num_columns(),
        "aggregation complete"
    );
    Ok(combined)
}

/// [`aggregate`] with `YYYY-MM-DD` dates.
pub fn aggregate_str<T: Transport>(
    fetcher: &Fetcher<T>,
    report: &str,
    start: &str,
    end: &str,
) -> Result<Table> {
    aggregate(fetcher, report, parse_date(start)?, parse_date(end)?)
}
