//! Category score calculator
//!
//! Scores five fixed metric-group subsets independently. Each category starts
//! from the catalog defaults and takes only its own groups from the live
//! selection, so a change in one group never leaks into a category that does
//! not include it.

use serde::Serialize;
use types::catalog::MetricCatalog;
use types::metric::MetricGroup;
use types::numeric::Score;
use types::selection::Selection;
use types::severity::ScoreResult;

use crate::macro_vector::MacroVectorDeriver;
use crate::oracle::{LookupTable, MaxSeverityTable, OracleError, ScoringOracle};

/// Metric groups a category takes from the live selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CategoryInclude {
    pub base: bool,
    pub supplemental: bool,
    pub env_modified: bool,
    pub env_security: bool,
    pub threat: bool,
}

impl CategoryInclude {
    const fn base() -> Self {
        Self {
            base: true,
            supplemental: false,
            env_modified: false,
            env_security: false,
            threat: false,
        }
    }

    pub fn any(&self) -> bool {
        self.base || self.supplemental || self.env_modified || self.env_security || self.threat
    }

    /// Groups to overlay. Base comes with any flag since every score needs it.
    pub fn groups(&self) -> Vec<MetricGroup> {
        let mut groups = Vec::new();
        if self.any() {
            groups.push(MetricGroup::Base);
        }
        if self.supplemental {
            groups.push(MetricGroup::Supplemental);
        }
        if self.env_security {
            groups.push(MetricGroup::EnvironmentalSecurity);
        }
        if self.env_modified {
            groups.push(MetricGroup::EnvironmentalModified);
        }
        if self.threat {
            groups.push(MetricGroup::Threat);
        }
        groups
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryConfig {
    pub label: &'static str,
    pub include: CategoryInclude,
}

/// The five categories, in display order
pub const SCORE_CATEGORIES: [CategoryConfig; 5] = [
    CategoryConfig {
        label: "Base Metrics",
        include: CategoryInclude::base(),
    },
    CategoryConfig {
        label: "Supplemental Metrics",
        include: CategoryInclude {
            supplemental: true,
            ..CategoryInclude::base()
        },
    },
    CategoryConfig {
        label: "Environmental (Modified Base Metrics)",
        include: CategoryInclude {
            env_security: true,
            env_modified: true,
            ..CategoryInclude::base()
        },
    },
    CategoryConfig {
        label: "Environmental (Security Requirements)",
        include: CategoryInclude {
            env_security: true,
            ..CategoryInclude::base()
        },
    },
    CategoryConfig {
        label: "Threat Metrics",
        include: CategoryInclude {
            threat: true,
            ..CategoryInclude::base()
        },
    },
];

/// Score of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub label: &'static str,
    #[serde(flatten)]
    pub result: ScoreResult,
}

/// Parallel series consumed by a bar chart, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub labels: Vec<&'static str>,
    pub scores: Vec<Score>,
    pub colors: Vec<&'static str>,
    pub severities: Vec<&'static str>,
}

impl ChartData {
    pub fn from_scores(scores: &[CategoryScore]) -> Self {
        let mut chart = ChartData::default();
        for category in scores {
            chart.labels.push(category.label);
            chart.scores.push(category.result.score);
            chart.colors.push(category.result.color);
            chart.severities.push(category.result.label);
        }
        chart
    }
}

/// Computes category scores from a live selection
pub struct CategoryScorer<'a> {
    pub catalog: &'a MetricCatalog,
    pub deriver: &'a dyn MacroVectorDeriver,
    pub oracle: &'a dyn ScoringOracle,
    pub lookup: &'a LookupTable,
    pub max_severity: &'a MaxSeverityTable,
}

impl<'a> CategoryScorer<'a> {
    /// Build the overlay selection a category is scored on
    pub fn overlay(
        &self,
        category: &CategoryConfig,
        defaults: &Selection,
        live: &Selection,
    ) -> Selection {
        let mut selection = defaults.snapshot();
        for group in category.include.groups() {
            selection.overlay(live, self.catalog.codes_in(group));
        }
        selection
    }

    /// Score a single category
    pub fn score(
        &self,
        category: &CategoryConfig,
        defaults: &Selection,
        live: &Selection,
    ) -> Result<CategoryScore, OracleError> {
        let selection = self.overlay(category, defaults, live);
        let macro_vector = self.deriver.derive(&selection);
        let raw = self
            .oracle
            .score(&selection, self.lookup, self.max_severity, &macro_vector)?;

        Ok(CategoryScore {
            label: category.label,
            result: ScoreResult::new(Score::new(raw)),
        })
    }

    /// Score every category in display order
    pub fn score_all(
        &self,
        defaults: &Selection,
        live: &Selection,
    ) -> Result<Vec<CategoryScore>, OracleError> {
        SCORE_CATEGORIES
            .iter()
            .map(|category| self.score(category, defaults, live))
            .collect()
    }
}
