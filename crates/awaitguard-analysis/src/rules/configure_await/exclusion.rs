//! Exemptions from the rule. The set is closed: these two and no others.

use serde::Serialize;

use super::classifier::SuspensionPointInfo;

/// Why a classified point is exempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// The awaited call is `ConfigureAwait` itself.
    AlreadyDeclinesContext,
    /// The awaited call returns the scheduler-yield primitive.
    SchedulerYield,
}

/// First matching exemption, if any.
pub fn exclusion_reason(info: &SuspensionPointInfo) -> Option<ExclusionReason> {
    if info.inner_invocation_already_declines_context {
        Some(ExclusionReason::AlreadyDeclinesContext)
    } else if info.result_type_is_scheduler_yield {
        Some(ExclusionReason::SchedulerYield)
    } else {
        None
    }
}

pub fn is_excluded(info: &SuspensionPointInfo) -> bool {
    exclusion_reason(info).is_some()
}
