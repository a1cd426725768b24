use chrono::{Duration, Utc};

use crate::domain::model::{GroupBuy, GroupStatus};

/// The two sample campaigns a fresh marketplace starts with.
pub fn demo_groups() -> Vec<GroupBuy> {
    let now = Utc::now();
    vec![
        GroupBuy {
            id: "1".to_string(),
            title: "Bulk Onion Purchase - Andheri".to_string(),
            description: "Group buying 500kg onions at wholesale price from trusted supplier. \
                          Premium quality onions sourced directly from Maharashtra farms."
                .to_string(),
            organizer: "Raj Kumar".to_string(),
            organizer_id: "vendor1".to_string(),
            location: "Andheri, Mumbai".to_string(),
            target_amount: 15000.0,
            current_amount: 12000.0,
            participants: vec![
                "vendor1".to_string(),
                "vendor2".to_string(),
                "vendor3".to_string(),
            ],
            max_participants: 12,
            time_left: "2 days".to_string(),
            category: "vegetables".to_string(),
            savings: "25%".to_string(),
            status: GroupStatus::Active,
            created_at: now - Duration::days(2),
            expires_at: now + Duration::days(2),
        },
        GroupBuy {
            id: "2".to_string(),
            title: "Spice Mix Wholesale Deal".to_string(),
            description: "Premium spices at 30% discount for bulk order. Includes turmeric, \
                          red chili powder, coriander powder, and garam masala."
                .to_string(),
            organizer: "Priya Sharma".to_string(),
            organizer_id: "vendor2".to_string(),
            location: "Karol Bagh, Delhi".to_string(),
            target_amount: 25000.0,
            current_amount: 18500.0,
            participants: vec![
                "vendor2".to_string(),
                "vendor4".to_string(),
                "vendor5".to_string(),
            ],
            max_participants: 20,
            time_left: "5 days".to_string(),
            category: "spices".to_string(),
            savings: "30%".to_string(),
            status: GroupStatus::Active,
            created_at: now - Duration::days(1),
            expires_at: now + Duration::days(5),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_groups_hold_membership_invariants() {
        for group in demo_groups() {
            assert!(group.is_member(&group.organizer_id));
            assert!(group.participants.len() <= group.max_participants as usize);
            assert!(group.current_amount >= 0.0);
        }
    }
}
