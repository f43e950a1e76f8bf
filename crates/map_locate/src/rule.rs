//! Declarative probability rules.
//!
//! A [`Rule`] pairs a reference geometry with a density function: evaluating
//! it over grid points computes each point's distance to the geometry and
//! maps that distance through the density. Rules are plain data, so a plan
//! is a list of rules rather than a hardcoded call sequence.
use glam::DVec2;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::density::Density;
use crate::error::{Error, Result};
use crate::field::ProbabilityField;
use crate::geometry::{point_distance, Polyline};

pub type RuleId = String;

/// Fixed geometry a rule measures distances against.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum ReferenceGeometry {
    /// Distance to the nearest point on a polyline.
    Polyline(Polyline),
    /// Distance to a single fixed coordinate.
    Point(DVec2),
}

impl ReferenceGeometry {
    /// Distance from `p` to this geometry in raw coordinate units.
    pub fn distance_to(&self, p: DVec2) -> f64 {
        match self {
            ReferenceGeometry::Polyline(polyline) => polyline.distance_to(p),
            ReferenceGeometry::Point(point) => point_distance(p, *point),
        }
    }
}

/// A probability rule: reference geometry plus the density evaluated at the
/// distance to it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    /// Identifier used to label this rule's field in results.
    pub id: RuleId,
    /// Geometry distances are measured against.
    pub geometry: ReferenceGeometry,
    /// Density evaluated at each distance.
    pub density: Density,
}

impl Rule {
    /// Creates a rule from its parts.
    pub fn new(id: impl Into<RuleId>, geometry: ReferenceGeometry, density: Density) -> Self {
        Self {
            id: id.into(),
            geometry,
            density,
        }
    }

    /// River-style rule: Gaussian density over the distance to a polyline.
    pub fn near_polyline(id: impl Into<RuleId>, polyline: Polyline, mu: f64, sigma: f64) -> Self {
        Self::new(
            id,
            ReferenceGeometry::Polyline(polyline),
            Density::gaussian(mu, sigma),
        )
    }

    /// Landmark-style rule: log-normal density over the distance to a fixed
    /// coordinate, parameterized by the distribution's target mean and mode
    /// in distance units.
    ///
    /// Fails when `mean <= mode`, which admits no positive derived variance.
    pub fn near_point(
        id: impl Into<RuleId>,
        landmark: DVec2,
        mean: f64,
        mode: f64,
    ) -> Result<Self> {
        Ok(Self::new(
            id,
            ReferenceGeometry::Point(landmark),
            Density::log_normal_from_mean_mode(mean, mode)?,
        ))
    }

    /// Overpass-style rule: Gaussian density over the distance to the
    /// two-point track from `start` to `end`.
    ///
    /// `earth_radius_km` is accepted for callers that carry it alongside
    /// track data, but it does not enter any calculation: distances remain
    /// planar coordinate-degree values, not great-circle lengths.
    pub fn near_track(
        id: impl Into<RuleId>,
        start: DVec2,
        end: DVec2,
        earth_radius_km: f64,
        mu: f64,
        sigma: f64,
    ) -> Self {
        let rule = Self::new(
            id,
            ReferenceGeometry::Polyline(Polyline::segment(start, end)),
            Density::gaussian(mu, sigma),
        );
        debug!(
            "Track rule '{}' keeps planar distances; earth radius {} km is unused.",
            rule.id, earth_radius_km
        );
        rule
    }

    /// Checks the rule's geometry and density parameters.
    pub fn validate(&self) -> Result<()> {
        if let ReferenceGeometry::Polyline(polyline) = &self.geometry {
            if polyline.points().len() < 2 {
                return Err(Error::InvalidConfig(format!(
                    "rule '{}' references a polyline with fewer than 2 points",
                    self.id
                )));
            }
        }
        self.density.validate()
    }

    /// Distance from `p` to this rule's reference geometry.
    pub fn distance(&self, p: DVec2) -> f64 {
        self.geometry.distance_to(p)
    }

    /// Evaluates the rule over grid points, yielding one density value per
    /// point in the same order.
    pub fn evaluate(&self, points: &[DVec2]) -> ProbabilityField {
        let values = points
            .iter()
            .map(|&p| self.density.eval(self.distance(p)))
            .collect();
        ProbabilityField::from_values(values)
    }
}
