//! Plan evaluation over a geographic grid.
//!
//! A [`Plan`] lists the rules whose fields participate in the composite.
//! [`run_plan`] evaluates every rule over the grid independently, composes
//! the per-rule fields into a combined field, and returns all of them so
//! callers can render or inspect each one.
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::field::{compose, ProbabilityField};
use crate::grid::GeoGrid;
use crate::rule::{Rule, RuleId};

/// A heatmap plan composed of one or more [`Rule`]s.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct Plan {
    pub rules: Vec<Rule>,
}

impl Plan {
    /// Creates a new empty plan.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a single rule to the plan.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds multiple rules to the plan.
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Validates the plan, returning an error if it cannot be run.
    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(Error::InvalidConfig(
                "plan requires at least one rule".into(),
            ));
        }
        for rule in &self.rules {
            rule.validate()?;
        }
        Ok(())
    }
}

/// A rule's evaluated field, labeled with the rule id.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct RuleField {
    pub rule_id: RuleId,
    pub field: ProbabilityField,
}

/// Result of running a plan: the grid, every rule's field, and their
/// composite, all index-aligned.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct RunResult {
    /// Grid the fields were evaluated over.
    pub grid: GeoGrid,
    /// Per-rule fields in plan order.
    pub fields: Vec<RuleField>,
    /// Pointwise product of all rule fields.
    pub combined: ProbabilityField,
}

impl RunResult {
    /// Looks up a rule's field by id.
    pub fn field(&self, rule_id: &str) -> Option<&ProbabilityField> {
        self.fields
            .iter()
            .find(|rule_field| rule_field.rule_id == rule_id)
            .map(|rule_field| &rule_field.field)
    }
}

/// Runs the plan over the grid: one fresh field per rule, then the
/// composite.
///
/// A single deterministic pass; the same plan and grid always yield the same
/// result.
pub fn run_plan(plan: &Plan, grid: &GeoGrid) -> Result<RunResult> {
    plan.validate()?;

    info!(
        "Evaluating {} rules over {} grid points.",
        plan.rules.len(),
        grid.len()
    );

    let mut fields = Vec::with_capacity(plan.rules.len());
    for rule in &plan.rules {
        debug!("Evaluating rule '{}'.", rule.id);
        fields.push(RuleField {
            rule_id: rule.id.clone(),
            field: rule.evaluate(grid.points()),
        });
    }

    let combined = compose(fields.iter().map(|rule_field| &rule_field.field))?;

    Ok(RunResult {
        grid: grid.clone(),
        fields,
        combined,
    })
}
