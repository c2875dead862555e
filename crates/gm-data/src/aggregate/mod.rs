//! Per-country medal aggregation
//!
//! Every view is fed from here: the map and bar chart from [`aggregate`],
//! the line chart from [`aggregate_by_year`], and the default highlight set
//! from [`top_n`].

use std::cmp::Ordering;

use ahash::AHashMap;
use gm_core::{Category, GamesYear, MedalRecord, YearFilter};

use crate::store::RecordStore;

/// One country's summed count under the active filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRow {
    pub country_code: String,
    pub value: u64,
}

/// One Games on a country's line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearPoint {
    pub year: GamesYear,
    pub value: u64,
}

/// A country's counts at each Games it has a record for, ascending by year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountrySeries {
    pub country_code: String,
    pub country_name: String,
    pub points: Vec<YearPoint>,
}

/// Sum `category` per country over the records matching `year`.
///
/// Across all years this answers "how many medals has this country won in
/// every tracked Games". Rows come back sorted by country code.
pub fn aggregate(records: &[MedalRecord], year: YearFilter, category: Category) -> Vec<AggregateRow> {
    let mut totals: AHashMap<&str, u64> = AHashMap::new();
    for record in records.iter().filter(|r| year.matches(r.year)) {
        *totals.entry(record.country_code.as_str()).or_insert(0) += u64::from(record.value(category));
    }

    let mut rows: Vec<AggregateRow> = totals
        .into_iter()
        .map(|(code, value)| AggregateRow {
            country_code: code.to_string(),
            value,
        })
        .collect();
    rows.sort_by(|a, b| a.country_code.cmp(&b.country_code));
    rows
}

/// Per-year points for each of `countries`, in the order given.
///
/// Countries without any record are left out.
pub fn aggregate_by_year(records: &[MedalRecord], category: Category, countries: &[&str]) -> Vec<CountrySeries> {
    countries
        .iter()
        .filter_map(|&code| {
            let mut matching: Vec<&MedalRecord> = records.iter().filter(|r| r.country_code == code).collect();
            if matching.is_empty() {
                return None;
            }
            matching.sort_by_key(|r| r.year);

            Some(CountrySeries {
                country_code: code.to_string(),
                country_name: matching[0].country_name.clone(),
                points: matching
                    .iter()
                    .map(|r| YearPoint {
                        year: r.year,
                        value: u64::from(r.value(category)),
                    })
                    .collect(),
            })
        })
        .collect()
}

/// Ranking order: larger value first, ties by country code ascending
pub fn rank_order(a: &AggregateRow, b: &AggregateRow) -> Ordering {
    b.value
        .cmp(&a.value)
        .then_with(|| a.country_code.cmp(&b.country_code))
}

/// Sort rows into ranking order
pub fn rank(rows: &mut [AggregateRow]) {
    rows.sort_by(rank_order);
}

/// The `n` highest-ranked rows
pub fn top_n(rows: &[AggregateRow], n: usize) -> Vec<AggregateRow> {
    let mut ranked = rows.to_vec();
    rank(&mut ranked);
    ranked.truncate(n);
    ranked
}

/// Smallest and largest value, `None` for no rows
pub fn value_extent(rows: &[AggregateRow]) -> Option<(u64, u64)> {
    let min = rows.iter().map(|r| r.value).min()?;
    let max = rows.iter().map(|r| r.value).max()?;
    Some((min, max))
}

/// Aggregation over a loaded [`RecordStore`]
#[derive(Clone, Copy)]
pub struct AggregationEngine<'a> {
    store: &'a RecordStore,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    pub fn aggregate(&self, year: YearFilter, category: Category) -> Vec<AggregateRow> {
        aggregate(self.store.records(), year, category)
    }

    pub fn aggregate_by_year(&self, category: Category, countries: &[&str]) -> Vec<CountrySeries> {
        aggregate_by_year(self.store.records(), category, countries)
    }

    /// Codes of the `n` leading countries under the given filter
    pub fn top_codes(&self, year: YearFilter, category: Category, n: usize) -> Vec<String> {
        top_n(&self.aggregate(year, category), n)
            .into_iter()
            .map(|row| row.country_code)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gm_core::MedalCounts;

    fn year(y: u16) -> GamesYear {
        GamesYear::new(y).unwrap()
    }

    fn gold(code: &str, y: u16, count: u32) -> MedalRecord {
        MedalRecord::new(code, code, year(y), MedalCounts::new(count, 0, 0))
    }

    fn row(code: &str, value: u64) -> AggregateRow {
        AggregateRow {
            country_code: code.to_string(),
            value,
        }
    }

    fn sample() -> Vec<MedalRecord> {
        vec![gold("FRA", 2008, 5), gold("FRA", 2012, 3), gold("USA", 2008, 10)]
    }

    #[test]
    fn test_all_years_sums_across_games() {
        let rows = aggregate(&sample(), YearFilter::All, Category::Gold);
        assert_eq!(rows, vec![row("FRA", 8), row("USA", 10)]);
    }

    #[test]
    fn test_single_year_filter() {
        let rows = aggregate(&sample(), YearFilter::Year(year(2008)), Category::Gold);
        assert_eq!(rows, vec![row("FRA", 5), row("USA", 10)]);

        let rows = aggregate(&sample(), YearFilter::Year(year(2012)), Category::Gold);
        assert_eq!(rows, vec![row("FRA", 3)]);
    }

    #[test]
    fn test_year_filter_equals_aggregating_the_subset() {
        let records = vec![
            MedalRecord::new("GBR", "Great Britain", year(2012), MedalCounts::new(29, 17, 19)),
            MedalRecord::new("GBR", "Great Britain", year(2016), MedalCounts::new(27, 23, 17)),
            MedalRecord::new("CHN", "China", year(2012), MedalCounts::new(38, 27, 23)),
            MedalRecord::new("BRA", "Brazil", year(2016), MedalCounts::new(7, 6, 6)),
        ];
        for y in GamesYear::ALL {
            let subset: Vec<MedalRecord> = records.iter().filter(|r| r.year == y).cloned().collect();
            for category in Category::ALL {
                assert_eq!(
                    aggregate(&records, YearFilter::Year(y), category),
                    aggregate(&subset, YearFilter::All, category)
                );
            }
        }
    }

    #[test]
    fn test_all_years_sum_matches_record_sum() {
        let records = vec![
            MedalRecord::new("JPN", "Japan", year(2020), MedalCounts::new(27, 14, 17)),
            MedalRecord::new("JPN", "Japan", year(2024), MedalCounts::new(20, 12, 13)),
            MedalRecord::new("KOR", "Korea", year(2024), MedalCounts::new(13, 9, 10)),
        ];
        for category in Category::ALL {
            let rows = aggregate(&records, YearFilter::All, category);
            let aggregated: u64 = rows.iter().map(|r| r.value).sum();
            let direct: u64 = records.iter().map(|r| u64::from(r.value(category))).sum();
            assert_eq!(aggregated, direct);
            assert_eq!(rows.len(), 2);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[], YearFilter::All, Category::Total).is_empty());
        assert!(aggregate(&sample(), YearFilter::Year(year(2024)), Category::Gold).is_empty());
        assert!(top_n(&[], 5).is_empty());
        assert_eq!(value_extent(&[]), None);
    }

    #[test]
    fn test_top_n_orders_and_bounds() {
        let rows = vec![
            row("AAA", 3),
            row("BBB", 9),
            row("CCC", 9),
            row("DDD", 1),
            row("EEE", 7),
            row("FFF", 0),
            row("GGG", 7),
        ];
        let top = top_n(&rows, 5);
        let codes: Vec<_> = top.iter().map(|r| r.country_code.as_str()).collect();
        assert_eq!(codes, vec!["BBB", "CCC", "EEE", "GGG", "AAA"]);

        let min_kept = top.iter().map(|r| r.value).min().unwrap();
        for excluded in rows.iter().filter(|r| !top.contains(r)) {
            assert!(excluded.value <= min_kept);
        }

        assert_eq!(top_n(&rows[..2], 5).len(), 2);
    }

    #[test]
    fn test_series_per_year_not_summed() {
        let records = vec![gold("FRA", 2012, 3), gold("FRA", 2008, 5), gold("USA", 2008, 10)];
        let series = aggregate_by_year(&records, Category::Gold, &["USA", "FRA", "XYZ"]);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].country_code, "USA");
        assert_eq!(series[1].points, vec![
            YearPoint { year: year(2008), value: 5 },
            YearPoint { year: year(2012), value: 3 },
        ]);
    }

    #[test]
    fn test_engine_over_store() {
        let store = RecordStore::from_records(sample()).unwrap();
        let engine = AggregationEngine::new(&store);
        assert_eq!(engine.top_codes(YearFilter::All, Category::Gold, 1), vec!["USA".to_string()]);
        assert_eq!(value_extent(&engine.aggregate(YearFilter::All, Category::Gold)), Some((8, 10)));
    }
}
