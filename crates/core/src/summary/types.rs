//! Summary section types.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::budget::{KpiData, TrendLabel, VarianceCategory, YtdComposition};
use crate::compliance::ComplianceMetrics;
use crate::vendor::{DependencyAnalysis, VendorConcentrationData, VendorRiskScore};

/// A narrative section of the summary, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySection {
    /// Headline YTD position.
    Overview,
    /// Largest category variances.
    Variance,
    /// Full-year forecast against target.
    Forecast,
    /// Burn rate and remaining budget.
    Runway,
    /// Spend concentration.
    VendorConcentration,
    /// Vendor risk scores.
    VendorRisk,
    /// Compliance and audit readiness.
    Compliance,
}

impl SummarySection {
    /// Every section in output order.
    pub const ALL: [Self; 7] = [
        Self::Overview,
        Self::Variance,
        Self::Forecast,
        Self::Runway,
        Self::VendorConcentration,
        Self::VendorRisk,
        Self::Compliance,
    ];

    /// Configuration name of the section.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Variance => "variance",
            Self::Forecast => "forecast",
            Self::Runway => "runway",
            Self::VendorConcentration => "vendor_concentration",
            Self::VendorRisk => "vendor_risk",
            Self::Compliance => "compliance",
        }
    }
}

impl fmt::Display for SummarySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised section name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown summary section: {0}")]
pub struct UnknownSection(pub String);

impl FromStr for SummarySection {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == normalized)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// The set of sections to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryToggles(BTreeSet<SummarySection>);

impl SummaryToggles {
    /// Every section enabled.
    #[must_use]
    pub fn all() -> Self {
        Self(SummarySection::ALL.into_iter().collect())
    }

    /// No section enabled.
    #[must_use]
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    /// Sections named in configuration. Unknown names are skipped with a
    /// warning; an empty list enables every section.
    #[must_use]
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        if names.is_empty() {
            return Self::all();
        }
        let mut toggles = Self::none();
        for name in names {
            match name.as_ref().parse::<SummarySection>() {
                Ok(section) => toggles.enable(section),
                Err(err) => warn!(section = %name.as_ref(), "{err}"),
            }
        }
        toggles
    }

    /// Enables a section.
    pub fn enable(&mut self, section: SummarySection) {
        self.0.insert(section);
    }

    /// Disables a section.
    pub fn disable(&mut self, section: SummarySection) {
        self.0.remove(&section);
    }

    /// Returns true if `section` is enabled.
    #[must_use]
    pub fn is_enabled(&self, section: SummarySection) -> bool {
        self.0.contains(&section)
    }

    /// Enabled sections in output order.
    pub fn enabled(&self) -> impl Iterator<Item = SummarySection> + '_ {
        self.0.iter().copied()
    }
}

impl Default for SummaryToggles {
    fn default() -> Self {
        Self::all()
    }
}

/// Everything a section generator may read.
#[derive(Debug, Clone, Copy)]
pub struct SummaryContext<'a> {
    /// Selected year.
    pub year: i32,
    /// Derived KPIs.
    pub kpis: &'a KpiData,
    /// YTD composition.
    pub ytd: &'a YtdComposition,
    /// Spend trend.
    pub trend: TrendLabel,
    /// Category variances, largest first.
    pub variance: &'a [VarianceCategory],
    /// Vendor concentration.
    pub concentration: &'a VendorConcentrationData,
    /// Vendor risk scores, highest first.
    pub risk: &'a [VendorRiskScore],
    /// Vendor dependencies.
    pub dependencies: &'a DependencyAnalysis,
    /// Compliance metrics.
    pub compliance: &'a ComplianceMetrics,
}

/// One generated paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryParagraph {
    /// Section.
    pub section: SummarySection,
    /// Text.
    pub text: String,
}
