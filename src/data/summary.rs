//! Summarizer: accident counts grouped by (year, month), pivoted wide.

use polars::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::data::{read_years, DataError, YearData};

/// Count accidents per (year, month) across the requested years and pivot
/// into a wide table: one row per observed month, one column per
/// successfully loaded year (in request order), cells null where a year has
/// no data for that month.
///
/// Years that fail to load are dropped with a warning by [`read_years`];
/// with no loadable year at all the result is an empty single-column frame.
pub fn summarize_years(dir: &Path, years: &[i32]) -> Result<DataFrame, DataError> {
    let loaded: Vec<LazyFrame> = read_years(dir, years)
        .into_iter()
        .filter_map(|result| match result {
            YearData::Loaded(df) => Some(df.lazy()),
            YearData::Skipped(_) => None,
        })
        .collect();

    if loaded.is_empty() {
        let empty = DataFrame::new(vec![Column::new("MONTH".into(), Vec::<i32>::new())])?;
        return Ok(empty);
    }

    let grouped = concat(loaded, UnionArgs::default())?
        .group_by([col("year"), col("MONTH")])
        .agg([len().alias("accidents")])
        .collect()?;

    pivot_wide(&grouped, years)
}

/// Reshape grouped counts so month is the row key and each year a column.
///
/// Built as an explicit month -> year -> count mapping so that a missing
/// (month, year) combination stays null rather than becoming zero: the
/// source data cannot represent "zero accidents", only "no data".
fn pivot_wide(grouped: &DataFrame, requested: &[i32]) -> Result<DataFrame, DataError> {
    let year_i32 = grouped.column("year")?.cast(&DataType::Int32)?;
    let year_ca = year_i32.i32()?;
    let month_i32 = grouped.column("MONTH")?.cast(&DataType::Int32)?;
    let month_ca = month_i32.i32()?;
    let count_u32 = grouped.column("accidents")?.cast(&DataType::UInt32)?;
    let count_ca = count_u32.u32()?;

    let mut by_month: BTreeMap<i32, HashMap<i32, u32>> = BTreeMap::new();
    let mut seen_years: HashSet<i32> = HashSet::new();
    for i in 0..grouped.height() {
        if let (Some(year), Some(month), Some(count)) =
            (year_ca.get(i), month_ca.get(i), count_ca.get(i))
        {
            by_month.entry(month).or_default().insert(year, count);
            seen_years.insert(year);
        }
    }

    let months: Vec<i32> = by_month.keys().copied().collect();
    let mut columns = vec![Column::new("MONTH".into(), months.clone())];

    let mut added: HashSet<i32> = HashSet::new();
    for &year in requested {
        if !seen_years.contains(&year) || !added.insert(year) {
            continue;
        }
        let cells: Vec<Option<u32>> = months
            .iter()
            .map(|month| {
                by_month
                    .get(month)
                    .and_then(|by_year| by_year.get(&year))
                    .copied()
            })
            .collect();
        columns.push(Column::new(year.to_string().into(), cells));
    }

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_year(dir: &Path, year: i32, months: &[i32]) {
        let mut csv = String::from("STATE,MONTH,LATITUDE,LONGITUD\n");
        for month in months {
            csv.push_str(&format!("1,{month},32.4,-86.7\n"));
        }
        fs::write(dir.join(format!("accident_{year}.csv")), csv).unwrap();
    }

    fn cell(df: &DataFrame, column: &str, row: usize) -> Option<u32> {
        df.column(column).unwrap().u32().unwrap().get(row)
    }

    #[test]
    fn one_row_per_month_one_column_per_year() {
        let dir = TempDir::new().unwrap();
        write_year(dir.path(), 2013, &[1, 1, 2]);
        write_year(dir.path(), 2014, &[2, 3]);

        let wide = summarize_years(dir.path(), &[2013, 2014]).unwrap();

        // months 1, 2, 3 observed; MONTH key plus two year columns
        assert_eq!(wide.height(), 3);
        assert_eq!(wide.width(), 3);
        let names: Vec<String> = wide
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, ["MONTH", "2013", "2014"]);

        let month_col = wide.column("MONTH").unwrap();
        let months = month_col.i32().unwrap();
        assert_eq!(months.get(0), Some(1));
        assert_eq!(months.get(1), Some(2));
        assert_eq!(months.get(2), Some(3));

        assert_eq!(cell(&wide, "2013", 0), Some(2));
        assert_eq!(cell(&wide, "2013", 1), Some(1));
        assert_eq!(cell(&wide, "2013", 2), None); // no data, not zero
        assert_eq!(cell(&wide, "2014", 0), None);
        assert_eq!(cell(&wide, "2014", 1), Some(1));
        assert_eq!(cell(&wide, "2014", 2), Some(1));
    }

    #[test]
    fn failed_years_are_dropped_from_the_table() {
        let dir = TempDir::new().unwrap();
        write_year(dir.path(), 2013, &[1, 2]);

        let wide = summarize_years(dir.path(), &[2013, 9999]).unwrap();
        assert_eq!(wide.width(), 2);
        assert_eq!(wide.height(), 2);
        assert_eq!(cell(&wide, "2013", 0), Some(1));
    }

    #[test]
    fn no_loadable_year_yields_empty_frame() {
        let dir = TempDir::new().unwrap();

        let wide = summarize_years(dir.path(), &[9998, 9999]).unwrap();
        assert_eq!(wide.width(), 1);
        assert_eq!(wide.height(), 0);
    }
}
