use serde::Serialize;

use crate::core::registry::GroupBuyRegistry;
use crate::domain::model::GroupStatus;

/// Aggregates shown on the supplier/vendor dashboards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
    pub total_groups: usize,
    pub active: usize,
    pub completed: usize,
    pub upcoming: usize,
    pub pooled_amount: f64,
    pub target_amount: f64,
    pub average_progress: f64,
    pub funded_groups: usize,
    pub total_participants: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroupSummary {
    pub joined: usize,
    pub active_joined: usize,
    pub organized: usize,
}

impl RegistryStats {
    pub fn collect(registry: &GroupBuyRegistry) -> Self {
        let mut stats = RegistryStats::default();
        let mut progress_sum = 0.0;
        let mut progress_count = 0usize;

        for group in registry.groups() {
            stats.total_groups += 1;
            match group.status {
                GroupStatus::Active => stats.active += 1,
                GroupStatus::Completed => stats.completed += 1,
                GroupStatus::Upcoming => stats.upcoming += 1,
            }
            stats.pooled_amount += group.current_amount;
            stats.target_amount += group.target_amount;
            stats.total_participants += group.participants.len();
            if group.is_funded() {
                stats.funded_groups += 1;
            }
            // 目標金額為 0 的群組不列入平均
            if let Ok(progress) = group.progress_percent() {
                progress_sum += progress;
                progress_count += 1;
            }
        }

        if progress_count > 0 {
            stats.average_progress = progress_sum / progress_count as f64;
        }
        stats
    }
}

impl UserGroupSummary {
    pub fn collect(registry: &GroupBuyRegistry, user_id: &str) -> Self {
        let joined = registry.groups_for_user(user_id);
        Self {
            joined: joined.len(),
            active_joined: joined
                .iter()
                .filter(|g| g.status == GroupStatus::Active)
                .count(),
            organized: registry.groups_organized_by(user_id).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::demo_groups;
    use crate::domain::policy::RegistryPolicy;

    #[test]
    fn test_stats_over_demo_data() {
        let registry = GroupBuyRegistry::with_groups(demo_groups(), RegistryPolicy::default());
        let stats = RegistryStats::collect(&registry);

        assert_eq!(stats.total_groups, 2);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.pooled_amount, 30500.0);
        assert_eq!(stats.target_amount, 40000.0);
        assert_eq!(stats.total_participants, 6);
        assert_eq!(stats.funded_groups, 0);
        // (80 + 74) / 2
        assert!((stats.average_progress - 77.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_registry_stats() {
        let stats = RegistryStats::collect(&GroupBuyRegistry::default());
        assert_eq!(stats, RegistryStats::default());
    }

    #[test]
    fn test_user_summary() {
        let registry = GroupBuyRegistry::with_groups(demo_groups(), RegistryPolicy::default());

        let vendor2 = UserGroupSummary::collect(&registry, "vendor2");
        assert_eq!(
            vendor2,
            UserGroupSummary {
                joined: 2,
                active_joined: 2,
                organized: 1
            }
        );
        assert_eq!(UserGroupSummary::collect(&registry, "nobody"), UserGroupSummary::default());
    }
}
