use crate::models::{Alert, EmployeeRecord, Insight};
use crate::risk::RiskLevel;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketStat {
    pub count: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamAggregate {
    pub total: usize,
    pub low: BucketStat,
    pub medium: BucketStat,
    pub high: BucketStat,
}

impl TeamAggregate {
    pub fn bucket(&self, level: RiskLevel) -> BucketStat {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }
}

pub fn aggregate(records: &[EmployeeRecord]) -> TeamAggregate {
    let total = records.len();
    let count_for = |level: RiskLevel| {
        records
            .iter()
            .filter(|record| record.risk_level() == level)
            .count()
    };
    let stat = |count: usize| BucketStat {
        count,
        percent: percent_of(count, total),
    };

    TeamAggregate {
        total,
        low: stat(count_for(RiskLevel::Low)),
        medium: stat(count_for(RiskLevel::Medium)),
        high: stat(count_for(RiskLevel::High)),
    }
}

/// Half-up rounding; 0 when the team is empty.
fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count * 100) as f64 / total as f64).round() as u32
}

/// Urgent first; ties keep the feed's order.
pub fn sort_insights(mut insights: Vec<Insight>) -> Vec<Insight> {
    insights.sort_by_key(|insight| insight.priority);
    insights
}

/// Newest first.
pub fn sort_alerts(mut alerts: Vec<Alert>) -> Vec<Alert> {
    alerts.sort_by(|a, b| b.noted_at.cmp(&a.noted_at));
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed;
    use crate::models::Priority;
    use chrono::{Duration, Utc};

    #[test]
    fn empty_collection_aggregates_to_zeros() {
        let summary = aggregate(&[]);
        assert_eq!(summary.total, 0);
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            assert_eq!(summary.bucket(level), BucketStat { count: 0, percent: 0 });
        }
    }

    #[test]
    fn demo_roster_splits_forty_forty_twenty() {
        let snapshot = feed::demo_snapshot().unwrap();
        let summary = aggregate(&snapshot.employees);

        assert_eq!(summary.total, 5);
        assert_eq!(summary.low, BucketStat { count: 2, percent: 40 });
        assert_eq!(summary.medium, BucketStat { count: 2, percent: 40 });
        assert_eq!(summary.high, BucketStat { count: 1, percent: 20 });
    }

    #[test]
    fn counts_sum_to_total_and_percentages_stay_near_hundred() {
        let snapshot = feed::demo_snapshot().unwrap();
        for records in [&snapshot.employees[..], &snapshot.employees[..3]] {
            let summary = aggregate(records);
            let counts = summary.low.count + summary.medium.count + summary.high.count;
            let percents = summary.low.percent + summary.medium.percent + summary.high.percent;
            assert_eq!(counts, summary.total);
            assert!((99..=101).contains(&percents));
        }
    }

    #[test]
    fn iteration_order_does_not_change_the_aggregate() {
        let snapshot = feed::demo_snapshot().unwrap();
        let mut reversed = snapshot.employees.clone();
        reversed.reverse();
        assert_eq!(aggregate(&snapshot.employees), aggregate(&reversed));
    }

    #[test]
    fn insights_sort_urgent_first_and_keep_feed_order_within_a_tier() {
        let snapshot = feed::demo_snapshot().unwrap();
        let sorted = sort_insights(snapshot.insights);

        let priorities: Vec<Priority> = sorted.iter().map(|insight| insight.priority).collect();
        let mut expected = priorities.clone();
        expected.sort();
        assert_eq!(priorities, expected);

        let urgent: Vec<&str> = sorted
            .iter()
            .filter(|insight| insight.priority == Priority::Urgent)
            .map(|insight| insight.title.as_str())
            .collect();
        assert_eq!(
            urgent,
            ["Team Communication Declining", "After-Hours Work Pattern"]
        );
    }

    #[test]
    fn alerts_sort_newest_first() {
        let snapshot = feed::demo_snapshot().unwrap();
        let sorted = sort_alerts(snapshot.alerts);
        for pair in sorted.windows(2) {
            assert!(pair[0].noted_at >= pair[1].noted_at);
        }
        assert_eq!(sorted[0].employee, "Employee #1247");
    }

    #[test]
    fn rounding_is_half_up() {
        let now = Utc::now();
        let record = |score: u8| EmployeeRecord {
            id: score.to_string(),
            name: format!("Employee #{score}"),
            department: "Engineering".to_string(),
            title: "Developer".to_string(),
            risk_score: score,
            sentiment_trend: 0,
            productivity_score: 80,
            last_activity: now - Duration::hours(1),
            recent_changes: Vec::new(),
        };

        // 1 of 8 is 12.5%, which rounds up to 13.
        let mut records = vec![record(90)];
        records.extend((0u8..7).map(|n| record(10 + n)));
        let summary = aggregate(&records);
        assert_eq!(summary.high.percent, 13);
        assert_eq!(summary.low.percent, 88);
    }
}
