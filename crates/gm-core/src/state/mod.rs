//! Filter state shared by the dashboard views

use crate::model::{Category, ChartType, YearFilter};

/// Active year, category and chart selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Which Games the map and bar chart aggregate over
    pub year: YearFilter,

    /// Medal category every view reads
    pub category: Category,

    /// Chart shown next to the map
    pub chart: ChartType,
}

impl FilterState {
    /// Caption for the ranked bar chart, e.g. "Gold Medals in 2008"
    pub fn caption(&self) -> String {
        format!("{} in {}", self.category.label(), self.year.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GamesYear;

    #[test]
    fn test_caption() {
        let mut filters = FilterState::default();
        assert_eq!(filters.caption(), "Total Medals in All Years");

        filters.category = Category::Gold;
        filters.year = YearFilter::Year(GamesYear::FIRST);
        assert_eq!(filters.caption(), "Gold Medals in 2008");
    }
}
