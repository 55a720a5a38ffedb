//! Retry budget for invocation faults.

use std::fmt;
use std::str::FromStr;

/// What the `max_retry_limit` of an agent counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryScope {
    /// One budget for the agent's whole lifetime: failures on earlier missions
    /// leave fewer retries for later ones.
    #[default]
    AgentLifetime,
    /// A fresh budget for every mission.
    PerMission,
}

impl RetryScope {
    /// Whether the retry budget is exhausted after this failure.
    ///
    /// `lifetime_failures` and `mission_failures` already include the failure just seen.
    pub fn exhausted(&self, max_retry_limit: u32, lifetime_failures: u32, mission_failures: u32) -> bool {
        let failures = match self {
            RetryScope::AgentLifetime => lifetime_failures,
            RetryScope::PerMission => mission_failures,
        };
        failures > max_retry_limit
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RetryScope::AgentLifetime => "agent",
            RetryScope::PerMission => "mission",
        }
    }
}

impl fmt::Display for RetryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetryScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "agent" | "lifetime" => Ok(RetryScope::AgentLifetime),
            "mission" => Ok(RetryScope::PerMission),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_scope_counts_all_failures() {
        let scope = RetryScope::AgentLifetime;
        assert!(!scope.exhausted(2, 2, 1));
        assert!(scope.exhausted(2, 3, 1));
    }

    #[test]
    fn mission_scope_ignores_earlier_missions() {
        let scope = RetryScope::PerMission;
        assert!(!scope.exhausted(2, 7, 2));
        assert!(scope.exhausted(2, 7, 3));
    }

    #[test]
    fn zero_limit_fails_on_first_error() {
        assert!(RetryScope::AgentLifetime.exhausted(0, 1, 1));
        assert!(RetryScope::PerMission.exhausted(0, 1, 1));
    }

    #[test]
    fn parses_scope_names() {
        assert_eq!("agent".parse::<RetryScope>(), Ok(RetryScope::AgentLifetime));
        assert_eq!(" Mission ".parse::<RetryScope>(), Ok(RetryScope::PerMission));
        assert!("squad".parse::<RetryScope>().is_err());
    }
}
