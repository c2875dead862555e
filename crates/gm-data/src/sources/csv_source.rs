use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord};
use gm_core::{GamesYear, MedalCounts, MedalRecord};

use super::MedalSource;
use crate::config::{DashboardConfig, NullConfig};
use crate::schema::MedalColumns;
use crate::DataError;

/// One Games' medal table stored as CSV
pub struct CsvMedalSource {
    /// Path to the CSV file
    path: PathBuf,
    /// File name, used in log and error messages
    name: String,
    /// Games the whole file belongs to
    year: GamesYear,
    null_config: NullConfig,
}

impl CsvMedalSource {
    pub fn new(path: PathBuf, year: GamesYear, null_config: NullConfig) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
            .to_string();
        Self {
            path,
            name,
            year,
            null_config,
        }
    }

    /// One source per configured year
    pub fn for_config(config: &DashboardConfig) -> Vec<Self> {
        config
            .years
            .iter()
            .map(|&year| Self::new(config.medal_path(year), year, config.null_config.clone()))
            .collect()
    }

    pub fn year(&self) -> GamesYear {
        self.year
    }

    /// Read the file on the blocking pool
    pub async fn read_records(&self) -> Result<Vec<MedalRecord>, DataError> {
        let path = self.path.clone();
        let name = self.name.clone();
        let year = self.year;
        let null_config = self.null_config.clone();

        tokio::task::spawn_blocking(move || {
            let file = File::open(&path)?;
            parse_reader(BufReader::new(file), year, &name, &null_config)
        })
        .await?
    }
}

/// Parse a medal table, attaching `year` to every row
pub fn parse_reader<R: Read>(
    reader: R,
    year: GamesYear,
    source_name: &str,
    null_config: &NullConfig,
) -> Result<Vec<MedalRecord>, DataError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = MedalColumns::detect(&headers, source_name)?;

    let mut records = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let row = result?;
        // header is line 1
        let line = idx + 2;

        let code = cell(&row, columns.country_code).trim();
        if code.is_empty() {
            tracing::warn!("{} row {}: no country code, skipping", source_name, line);
            continue;
        }
        let name = cell(&row, columns.country).trim();

        let count = |column: usize, column_name: &str| {
            let raw = cell(&row, column);
            null_config.parse_count(raw).ok_or_else(|| DataError::InvalidValue {
                source_name: source_name.to_string(),
                row: line,
                column: column_name.to_string(),
                value: raw.to_string(),
            })
        };

        let gold = count(columns.gold, "Gold")?;
        let silver = count(columns.silver, "Silver")?;
        let bronze = count(columns.bronze, "Bronze")?;
        let mut counts = MedalCounts::checked(gold, silver, bronze).ok_or_else(|| DataError::InvalidValue {
            source_name: source_name.to_string(),
            row: line,
            column: "Total".to_string(),
            value: (u64::from(gold) + u64::from(silver) + u64::from(bronze)).to_string(),
        })?;
        if let Some(total_column) = columns.total {
            if !null_config.is_null(cell(&row, total_column)) {
                counts.total = count(total_column, "Total")?;
            }
        }

        let rank_of = |column: Option<usize>| {
            column
                .map(|c| cell(&row, c))
                .filter(|raw| !null_config.is_null(raw))
                .and_then(|raw| raw.trim().parse::<u32>().ok())
        };

        records.push(MedalRecord {
            country_code: code.to_string(),
            country_name: if name.is_empty() { code.to_string() } else { name.to_string() },
            year,
            counts,
            rank: rank_of(columns.rank),
            rank_by_total: rank_of(columns.rank_by_total),
        });
    }

    tracing::info!("Read {} records from {} ({})", records.len(), source_name, year);
    Ok(records)
}

fn cell(row: &StringRecord, column: usize) -> &str {
    row.get(column).unwrap_or("")
}

#[async_trait]
impl MedalSource for CsvMedalSource {
    async fn load(&self) -> anyhow::Result<Vec<MedalRecord>> {
        Ok(self.read_records().await?)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Rank,country,country_code,Gold,Silver,Bronze,Total,Rank by Total
1,United States,USA,40,44,42,126,1
2,China,CHN,40,27,24,91,2
3,Japan,JPN,20,12,13,45,6
";

    fn year(y: u16) -> GamesYear {
        GamesYear::new(y).unwrap()
    }

    #[test]
    fn test_parse_sample() {
        let records = parse_reader(SAMPLE.as_bytes(), year(2024), "sample.csv", &NullConfig::default()).unwrap();
        assert_eq!(records.len(), 3);

        let usa = &records[0];
        assert_eq!(usa.country_code, "USA");
        assert_eq!(usa.country_name, "United States");
        assert_eq!(usa.year, year(2024));
        assert_eq!(usa.counts, MedalCounts { gold: 40, silver: 44, bronze: 42, total: 126 });
        assert_eq!(usa.rank, Some(1));
        assert_eq!(records[2].rank_by_total, Some(6));
    }

    #[test]
    fn test_missing_cells_read_as_zero() {
        let data = "country,country_code,Gold,Silver,Bronze,Total\nFiji,FIJ,1,,N/A,1\n";
        let records = parse_reader(data.as_bytes(), year(2016), "fiji.csv", &NullConfig::default()).unwrap();
        assert_eq!(records[0].counts, MedalCounts { gold: 1, silver: 0, bronze: 0, total: 1 });
        assert_eq!(records[0].rank, None);
    }

    #[test]
    fn test_total_derived_when_absent() {
        let data = "country,country_code,Gold,Silver,Bronze\nKenya,KEN,6,6,1\n";
        let records = parse_reader(data.as_bytes(), year(2020), "ken.csv", &NullConfig::default()).unwrap();
        assert_eq!(records[0].counts.total, 13);

        let blank_total = "country,country_code,Gold,Silver,Bronze,Total\nKenya,KEN,6,6,1,\n";
        let records = parse_reader(blank_total.as_bytes(), year(2020), "ken.csv", &NullConfig::default()).unwrap();
        assert_eq!(records[0].counts.total, 13);
    }

    #[test]
    fn test_total_trusted_verbatim() {
        let data = "country,country_code,Gold,Silver,Bronze,Total\nItaly,ITA,10,10,10,31\n";
        let records = parse_reader(data.as_bytes(), year(2008), "ita.csv", &NullConfig::default()).unwrap();
        assert_eq!(records[0].counts.total, 31);
    }

    #[test]
    fn test_invalid_count_is_an_error() {
        let data = "country,country_code,Gold,Silver,Bronze\nSpain,ESP,three,1,1\n";
        match parse_reader(data.as_bytes(), year(2012), "esp.csv", &NullConfig::default()) {
            Err(DataError::InvalidValue { row, column, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "Gold");
                assert_eq!(value, "three");
            }
            other => panic!("expected invalid value, got {:?}", other),
        }
    }

    #[test]
    fn test_medal_sum_overflow_is_an_error() {
        let data = "country,country_code,Gold,Silver,Bronze\nBig,BIG,4294967295,1,0\n";
        match parse_reader(data.as_bytes(), year(2016), "big.csv", &NullConfig::default()) {
            Err(DataError::InvalidValue { row, column, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "Total");
                assert_eq!(value, "4294967296");
            }
            other => panic!("expected invalid value, got {:?}", other),
        }
    }

    #[test]
    fn test_rows_without_code_are_skipped() {
        let data = "country,country_code,Gold,Silver,Bronze\nNowhere,,1,1,1\nChile,CHI,0,1,0\n";
        let records = parse_reader(data.as_bytes(), year(2024), "chi.csv", &NullConfig::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country_code, "CHI");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("gm-data-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("medals_total_2024.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let source = CsvMedalSource::new(path, year(2024), NullConfig::default());
        assert_eq!(source.source_name(), "medals_total_2024.csv");
        let records = source.load().await.unwrap();
        assert_eq!(records.len(), 3);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("gm-missing-{}.csv", uuid::Uuid::new_v4()));
        let source = CsvMedalSource::new(path, year(2008), NullConfig::default());
        assert!(matches!(source.read_records().await, Err(DataError::Io(_))));
    }
}
