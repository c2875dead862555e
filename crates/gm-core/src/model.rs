//! Medal data model
//!
//! The closed enumerations here replace string lookups into raw rows: a
//! [`Category`] knows how to read its own count out of [`MedalCounts`], and a
//! [`GamesYear`] can only hold one of the tracked Games.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// One of the Summer Games covered by the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct GamesYear(u16);

impl GamesYear {
    /// Every tracked Games, ascending
    pub const ALL: [GamesYear; 5] = [
        GamesYear(2008),
        GamesYear(2012),
        GamesYear(2016),
        GamesYear(2020),
        GamesYear(2024),
    ];

    pub const FIRST: GamesYear = GamesYear(2008);
    pub const LAST: GamesYear = GamesYear(2024);

    /// Validate a raw year against the tracked set
    pub fn new(year: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|y| y.0 == year)
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Map a (possibly fractional) year onto the Games at or before it.
    ///
    /// Anything before the first Games maps to the first one and anything at
    /// or after the last maps to the last, so `2014.7` gives 2012 and
    /// `1990.0` gives 2008.
    pub fn snap(year: f64) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|y| f64::from(y.0) <= year)
            .unwrap_or(Self::FIRST)
    }
}

impl TryFrom<u16> for GamesYear {
    type Error = CoreError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(CoreError::UnknownYear(value.to_string()))
    }
}

impl From<GamesYear> for u16 {
    fn from(year: GamesYear) -> Self {
        year.0
    }
}

impl fmt::Display for GamesYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GamesYear {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| CoreError::UnknownYear(s.to_string()))
    }
}

/// Medal category a view is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    Gold,
    Silver,
    Bronze,
    #[default]
    Total,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Gold, Category::Silver, Category::Bronze, Category::Total];

    /// Read this category's count from a record
    pub fn count(self, counts: &MedalCounts) -> u32 {
        match self {
            Category::Gold => counts.gold,
            Category::Silver => counts.silver,
            Category::Bronze => counts.bronze,
            Category::Total => counts.total,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Gold => "Gold",
            Category::Silver => "Silver",
            Category::Bronze => "Bronze",
            Category::Total => "Total",
        }
    }

    /// Axis label, e.g. "Gold Medals"
    pub fn label(self) -> String {
        format!("{} Medals", self.name())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/// Which Games the aggregate covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum YearFilter {
    #[default]
    All,
    Year(GamesYear),
}

impl YearFilter {
    pub fn matches(self, year: GamesYear) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(y) => y == year,
        }
    }

    /// Label used in chart captions ("All Years" or the year itself)
    pub fn label(self) -> String {
        match self {
            YearFilter::All => "All Years".to_string(),
            YearFilter::Year(y) => y.to_string(),
        }
    }

    /// Every option offered by the year selector
    pub fn options() -> impl Iterator<Item = YearFilter> {
        std::iter::once(YearFilter::All).chain(GamesYear::ALL.into_iter().map(YearFilter::Year))
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => f.write_str("All"),
            YearFilter::Year(y) => write!(f, "{y}"),
        }
    }
}

impl FromStr for YearFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // the original selector used "Total" for the all-years option
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("total") {
            return Ok(YearFilter::All);
        }
        trimmed.parse().map(YearFilter::Year)
    }
}

/// Chart shown next to the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    Bar,
    Line,
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartType::Bar => f.write_str("Bar"),
            ChartType::Line => f.write_str("Line"),
        }
    }
}

impl FromStr for ChartType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartType::Bar),
            "line" => Ok(ChartType::Line),
            _ => Err(CoreError::UnknownChartType(s.to_string())),
        }
    }
}

/// Medal counts for one country at one Games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MedalCounts {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    /// Taken from the source as-is, see [`MedalCounts::is_consistent`]
    pub total: u32,
}

impl MedalCounts {
    /// Build counts whose total is the sum of the three medal types,
    /// saturating at `u32::MAX`
    pub fn new(gold: u32, silver: u32, bronze: u32) -> Self {
        Self {
            gold,
            silver,
            bronze,
            total: gold.saturating_add(silver).saturating_add(bronze),
        }
    }

    /// Like [`MedalCounts::new`], `None` when the total does not fit a `u32`
    pub fn checked(gold: u32, silver: u32, bronze: u32) -> Option<Self> {
        let total = gold.checked_add(silver)?.checked_add(bronze)?;
        Some(Self { gold, silver, bronze, total })
    }

    pub fn component_sum(&self) -> u64 {
        u64::from(self.gold) + u64::from(self.silver) + u64::from(self.bronze)
    }

    pub fn is_consistent(&self) -> bool {
        u64::from(self.total) == self.component_sum()
    }
}

/// One row of medal data: a country at one Games
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalRecord {
    pub country_code: String,
    pub country_name: String,
    pub year: GamesYear,
    pub counts: MedalCounts,
    /// Medal-table position, when the source provides it
    pub rank: Option<u32>,
    pub rank_by_total: Option<u32>,
}

impl MedalRecord {
    pub fn new(
        country_code: impl Into<String>,
        country_name: impl Into<String>,
        year: GamesYear,
        counts: MedalCounts,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            country_name: country_name.into(),
            year,
            counts,
            rank: None,
            rank_by_total: None,
        }
    }

    pub fn value(&self, category: Category) -> u32 {
        category.count(&self.counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_uses_floor_buckets() {
        assert_eq!(GamesYear::snap(2014.0).get(), 2012);
        assert_eq!(GamesYear::snap(2008.0).get(), 2008);
        assert_eq!(GamesYear::snap(2011.99).get(), 2008);
        assert_eq!(GamesYear::snap(2019.5).get(), 2016);
        assert_eq!(GamesYear::snap(2023.0).get(), 2020);
    }

    #[test]
    fn test_snap_clamps_outside_range() {
        assert_eq!(GamesYear::snap(1990.0), GamesYear::FIRST);
        assert_eq!(GamesYear::snap(2007.9), GamesYear::FIRST);
        assert_eq!(GamesYear::snap(2024.0), GamesYear::LAST);
        assert_eq!(GamesYear::snap(2100.0), GamesYear::LAST);
    }

    #[test]
    fn test_games_year_rejects_untracked() {
        assert!(GamesYear::new(2010).is_none());
        assert!("2000".parse::<GamesYear>().is_err());
        assert_eq!("2016".parse::<GamesYear>().unwrap().get(), 2016);
    }

    #[test]
    fn test_category_accessor() {
        let counts = MedalCounts { gold: 1, silver: 2, bronze: 3, total: 7 };
        assert_eq!(Category::Gold.count(&counts), 1);
        assert_eq!(Category::Silver.count(&counts), 2);
        assert_eq!(Category::Bronze.count(&counts), 3);
        // total is trusted, not re-derived
        assert_eq!(Category::Total.count(&counts), 7);
        assert!(!counts.is_consistent());
    }

    #[test]
    fn test_counts_near_u32_max() {
        assert_eq!(MedalCounts::checked(u32::MAX, 1, 0), None);
        assert_eq!(MedalCounts::checked(1, 2, 3).map(|c| c.total), Some(6));

        let saturated = MedalCounts::new(u32::MAX, 1, 0);
        assert_eq!(saturated.total, u32::MAX);
        assert_eq!(saturated.component_sum(), u64::from(u32::MAX) + 1);
        assert!(!saturated.is_consistent());
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("All".parse::<YearFilter>().unwrap(), YearFilter::All);
        assert_eq!("Total".parse::<YearFilter>().unwrap(), YearFilter::All);
        assert_eq!(
            "2020".parse::<YearFilter>().unwrap(),
            YearFilter::Year(GamesYear::new(2020).unwrap())
        );
        assert!("2021".parse::<YearFilter>().is_err());
        assert_eq!("silver".parse::<Category>().unwrap(), Category::Silver);
        assert!("Platinum".parse::<Category>().is_err());
        assert_eq!("line".parse::<ChartType>().unwrap(), ChartType::Line);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::Total.label(), "Total Medals");
        assert_eq!(YearFilter::All.label(), "All Years");
        assert_eq!(YearFilter::options().count(), 6);
    }
}
