//! Per-pass orchestration: policy, classification, exclusion, emission.

use awaitguard_core::config::AwaitGuardConfig;
use awaitguard_core::traits::Cancellable;
use rayon::prelude::*;
use serde::Serialize;

use super::classifier::SuspensionPointClassifier;
use super::compilation::Compilation;
use super::exclusion::{exclusion_reason, ExclusionReason};
use super::policy::{ConfigurationPolicy, ConfigurationResolver};
use super::semantic::SemanticContext;
use super::suspension::SuspensionPoint;
use super::CONFIGURE_AWAIT_FALSE_MUST_BE_USED;
use crate::rules::types::{Diagnostic, DiagnosticSink};

/// Whether the rule enforces anything for a pass. Fixed at pass start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleState {
    Inactive,
    Active,
}

impl From<ConfigurationPolicy> for RuleState {
    fn from(policy: ConfigurationPolicy) -> Self {
        if policy.is_enforcing() {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

/// Outcome for a single suspension point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    PolicyInactive,
    ClassifiedExcluded(ExclusionReason),
    ClassifiedViolation(Diagnostic),
}

/// Counters for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub state: RuleState,
    /// Points that received a decision.
    pub visited: usize,
    pub excluded: usize,
    pub emitted: usize,
    /// The pass stopped early on cancellation.
    pub cancelled: bool,
}

impl RunSummary {
    fn new(state: RuleState) -> Self {
        Self {
            state,
            visited: 0,
            excluded: 0,
            emitted: 0,
            cancelled: false,
        }
    }

    fn record(&mut self, decision: &Decision) {
        self.visited += 1;
        match decision {
            Decision::PolicyInactive => {}
            Decision::ClassifiedExcluded(_) => self.excluded += 1,
            Decision::ClassifiedViolation(_) => self.emitted += 1,
        }
    }
}

/// The `ConfigureAwait(false)` rule.
///
/// Holds no state besides the policy cache, so one instance can serve any
/// number of compilations and concurrent callbacks.
pub struct ConfigureAwaitRule {
    resolver: ConfigurationResolver,
    parallel: bool,
}

impl ConfigureAwaitRule {
    pub fn new(resolver: ConfigurationResolver) -> Self {
        Self {
            resolver,
            parallel: false,
        }
    }

    pub fn from_config(config: &AwaitGuardConfig) -> Self {
        Self {
            resolver: ConfigurationResolver::from_config(&config.analysis),
            parallel: config.analysis.effective_parallel(),
        }
    }

    pub fn resolver(&self) -> &ConfigurationResolver {
        &self.resolver
    }

    pub fn state_for(&self, compilation: &dyn Compilation) -> RuleState {
        self.resolver.resolve_policy(compilation).into()
    }

    /// Decision for one point under an already-resolved state.
    pub fn decide(
        &self,
        state: RuleState,
        point: &SuspensionPoint,
        semantic: &dyn SemanticContext,
    ) -> Decision {
        match state {
            RuleState::Inactive => Decision::PolicyInactive,
            RuleState::Active => decide_active(&SuspensionPointClassifier::new(semantic), point),
        }
    }

    /// Per-node entry point for hosts that invoke the rule once per await
    /// expression, possibly from several threads.
    pub fn analyze_point(
        &self,
        compilation: &dyn Compilation,
        point: &SuspensionPoint,
        semantic: &dyn SemanticContext,
    ) -> Decision {
        self.decide(self.state_for(compilation), point, semantic)
    }

    /// Sequential pass. Cancellation is checked before each point.
    pub fn analyze<'p, I>(
        &self,
        compilation: &dyn Compilation,
        points: I,
        semantic: &dyn SemanticContext,
        cancel: &dyn Cancellable,
        sink: &mut dyn DiagnosticSink,
    ) -> RunSummary
    where
        I: IntoIterator<Item = &'p SuspensionPoint>,
    {
        let state = self.state_for(compilation);
        let mut summary = RunSummary::new(state);
        if state == RuleState::Inactive {
            tracing::debug!(compilation = %compilation.id(), "ConfigureAwait rule inactive");
            return summary;
        }

        let classifier = SuspensionPointClassifier::new(semantic);
        for point in points {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                tracing::debug!(visited = summary.visited, "ConfigureAwait pass cancelled");
                break;
            }
            let decision = decide_active(&classifier, point);
            summary.record(&decision);
            if let Decision::ClassifiedViolation(diagnostic) = decision {
                sink.report(diagnostic);
            }
        }
        summary
    }

    /// Parallel pass over a slice. Diagnostics come back in input order.
    pub fn analyze_parallel(
        &self,
        compilation: &dyn Compilation,
        points: &[SuspensionPoint],
        semantic: &dyn SemanticContext,
        cancel: &(dyn Cancellable + Sync),
    ) -> (Vec<Diagnostic>, RunSummary) {
        let state = self.state_for(compilation);
        let mut summary = RunSummary::new(state);
        if state == RuleState::Inactive {
            tracing::debug!(compilation = %compilation.id(), "ConfigureAwait rule inactive");
            return (Vec::new(), summary);
        }

        let classifier = SuspensionPointClassifier::new(semantic);
        let decisions: Vec<Option<Decision>> = points
            .par_iter()
            .map(|point| (!cancel.is_cancelled()).then(|| decide_active(&classifier, point)))
            .collect();

        let mut diagnostics = Vec::new();
        for decision in decisions {
            match decision {
                Some(decision) => {
                    summary.record(&decision);
                    if let Decision::ClassifiedViolation(diagnostic) = decision {
                        diagnostics.push(diagnostic);
                    }
                }
                None => summary.cancelled = true,
            }
        }
        if summary.cancelled {
            tracing::debug!(visited = summary.visited, "ConfigureAwait pass cancelled");
        }
        (diagnostics, summary)
    }

    /// Run a pass, in parallel if configured to.
    pub fn run(
        &self,
        compilation: &dyn Compilation,
        points: &[SuspensionPoint],
        semantic: &dyn SemanticContext,
        cancel: &(dyn Cancellable + Sync),
    ) -> (Vec<Diagnostic>, RunSummary) {
        if self.parallel {
            return self.analyze_parallel(compilation, points, semantic, cancel);
        }
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let summary = self.analyze(compilation, points, semantic, cancel, &mut diagnostics);
        (diagnostics, summary)
    }
}

impl Default for ConfigureAwaitRule {
    fn default() -> Self {
        Self::new(ConfigurationResolver::default())
    }
}

fn decide_active(classifier: &SuspensionPointClassifier<'_>, point: &SuspensionPoint) -> Decision {
    let info = classifier.classify(point);
    let decision = match exclusion_reason(&info) {
        Some(reason) => Decision::ClassifiedExcluded(reason),
        None => Decision::ClassifiedViolation(
            CONFIGURE_AWAIT_FALSE_MUST_BE_USED.create(point.span.clone()),
        ),
    };
    tracing::trace!(location = %point.span, ?info, ?decision, "ConfigureAwait decision");
    decision
}
