//! Rule-based router.
//!
//! Every rule is checked against the lower-cased query and fires on its
//! own. A fired rule claims the first installed provider carrying its
//! capability, or is dropped when there is none. An empty plan falls back
//! to the default docs and memory providers.

use crate::models::{Provider, Request, RoutingPlan, RoutingStep};
use tracing::debug;

/// One row of the routing table.
#[derive(Debug, Clone, Copy)]
pub struct RoutingRule {
    /// Substrings of the lower-cased query that fire the rule.
    pub triggers: &'static [&'static str],
    pub capability: &'static str,
    pub priority: i32,
    pub reason: &'static str,
}

impl RoutingRule {
    pub fn fires(&self, query: &str) -> bool {
        self.triggers.iter().any(|t| query.contains(t))
    }
}

pub const ROUTING_RULES: &[RoutingRule] = &[
    RoutingRule {
        triggers: &["issue", "pr", "pull request"],
        capability: "github",
        priority: 10,
        reason: "GitHub issue/PR mentioned",
    },
    RoutingRule {
        triggers: &["how to", "implement", "api"],
        capability: "docs",
        priority: 9,
        reason: "Documentation needed",
    },
    RoutingRule {
        triggers: &["remember", "previous", "we did"],
        capability: "memory",
        priority: 8,
        reason: "Project memory needed",
    },
    RoutingRule {
        triggers: &["similar", "example", "find code"],
        capability: "semantic",
        priority: 7,
        reason: "Code search needed",
    },
];

const DEFAULT_PRIORITY: i32 = 5;

/// Fallbacks applied when no rule selected anything.
const DEFAULTS: &[(&str, &str)] = &[("docs", "Default context"), ("memory", "Default memory")];

fn first_installed<'a>(providers: &'a [Provider], capability: &str) -> Option<&'a Provider> {
    providers
        .iter()
        .find(|p| p.installed && p.has_capability(capability))
}

/// Build the routing plan for a request.
pub fn route(request: &Request, providers: &[Provider]) -> RoutingPlan {
    let query = request.query.to_lowercase();
    let mut plan = RoutingPlan::default();

    for rule in ROUTING_RULES {
        if !rule.fires(&query) {
            continue;
        }

        match first_installed(providers, rule.capability) {
            Some(provider) => plan.steps.push(RoutingStep {
                provider: provider.clone(),
                priority: rule.priority,
                reason: rule.reason.to_string(),
            }),
            None => debug!(
                "Rule '{}' fired but no installed provider has '{}'",
                rule.reason, rule.capability
            ),
        }
    }

    if plan.is_empty() {
        for (capability, reason) in DEFAULTS {
            if let Some(provider) = first_installed(providers, capability) {
                if !plan.contains_provider(&provider.name) {
                    plan.steps.push(RoutingStep {
                        provider: provider.clone(),
                        priority: DEFAULT_PRIORITY,
                        reason: reason.to_string(),
                    });
                }
            }
        }
    }

    // Stable: equal priorities keep rule order.
    plan.steps.sort_by(|a, b| b.priority.cmp(&a.priority));
    plan
}
