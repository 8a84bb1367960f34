use std::fmt::Write;

use crate::aggregate;
use crate::models::{EmployeeRecord, PersonalSnapshot, WellnessSnapshot};
use crate::risk::RiskLevel;

pub fn build_team_report(snapshot: &WellnessSnapshot) -> String {
    let summary = aggregate::aggregate(&snapshot.employees);
    let mut output = String::new();

    let _ = writeln!(output, "# Team Wellness Report");
    let _ = writeln!(
        output,
        "Generated {} for {} employees",
        snapshot.generated_at.format("%Y-%m-%d %H:%M UTC"),
        summary.total
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Risk Distribution");

    if summary.total == 0 {
        let _ = writeln!(output, "No employees in this snapshot.");
    } else {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            let stat = summary.bucket(level);
            let _ = writeln!(
                output,
                "- {} risk: {} employees ({}% of team)",
                level.label(),
                stat.count,
                stat.percent
            );
        }
    }

    let mut ranked = snapshot.employees.clone();
    ranked.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Highest Risk Employees");

    if ranked.is_empty() {
        let _ = writeln!(output, "No employees in this snapshot.");
    } else {
        for record in ranked.iter().take(10) {
            let _ = writeln!(
                output,
                "- {} ({}, {}) score {}/100, sentiment {:+}%, productivity {}%",
                record.name,
                record.title,
                record.department,
                record.risk_score,
                record.sentiment_trend,
                record.productivity_score
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Alerts");

    let alerts = aggregate::sort_alerts(snapshot.alerts.clone());
    if alerts.is_empty() {
        let _ = writeln!(output, "No active alerts.");
    } else {
        for alert in alerts.iter().take(5) {
            let _ = writeln!(
                output,
                "- {} ({} risk) on {}: {}",
                alert.employee,
                alert.risk_level.label(),
                alert.noted_at.format("%Y-%m-%d"),
                alert.reason
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Key Insights");

    let insights = aggregate::sort_insights(snapshot.insights.clone());
    if insights.is_empty() {
        let _ = writeln!(output, "No insights for this period.");
    } else {
        for insight in insights.iter() {
            let _ = writeln!(
                output,
                "- [{}] {} ({}): {} (trend {:+}%, {} affected)",
                insight.priority.label(),
                insight.title,
                insight.category,
                insight.description,
                insight.trend,
                insight.affected_count
            );
            for recommendation in insight.recommendations.iter() {
                let _ = writeln!(output, "  - {recommendation}");
            }
        }
    }

    output
}

pub fn render_team_overview(snapshot: &WellnessSnapshot) -> String {
    let summary = aggregate::aggregate(&snapshot.employees);
    let mut output = String::new();

    let _ = writeln!(output, "Team Overview");
    let _ = writeln!(output, "Total employees: {}", summary.total);
    for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
        let stat = summary.bucket(level);
        let _ = writeln!(
            output,
            "{} risk [{}]: {} employees ({}% of team)",
            level.label(),
            level.badge_variant().token(),
            stat.count,
            stat.percent
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Recent alerts:");
    let alerts = aggregate::sort_alerts(snapshot.alerts.clone());
    if alerts.is_empty() {
        let _ = writeln!(output, "- none");
    } else {
        for alert in alerts.iter() {
            let _ = writeln!(
                output,
                "- {} ({} risk): {}",
                alert.employee,
                alert.risk_level.label(),
                alert.reason
            );
        }
    }

    output
}

pub fn render_employee_list(records: &[EmployeeRecord]) -> String {
    let mut output = String::new();

    if records.is_empty() {
        let _ = writeln!(output, "No employees found matching your filters.");
        return output;
    }

    for record in records {
        let level = record.risk_level();
        let _ = writeln!(
            output,
            "{} - {} ({})",
            record.name, record.title, record.department
        );
        let _ = writeln!(
            output,
            "  {} risk [{}], score {}/100, sentiment {:+}%, productivity {}%",
            level.label(),
            level.badge_variant().token(),
            record.risk_score,
            record.sentiment_trend,
            record.productivity_score
        );
        let _ = writeln!(
            output,
            "  Last activity: {}",
            record.last_activity.format("%Y-%m-%d %H:%M UTC")
        );
        for change in record.recent_changes.iter() {
            let _ = writeln!(output, "  * {change}");
        }
    }

    output
}

pub fn render_personal_dashboard(personal: &PersonalSnapshot) -> String {
    let level = RiskLevel::classify(personal.risk_score);
    let mut output = String::new();

    let _ = writeln!(output, "My Wellness Dashboard");
    let _ = writeln!(
        output,
        "Current risk level: {} [{}] (score {}/100)",
        level.label(),
        level.badge_variant().token(),
        personal.risk_score
    );
    let _ = writeln!(
        output,
        "Sentiment trend: {:+}% vs last week",
        personal.sentiment_trend
    );
    let _ = writeln!(output, "Productivity score: {}/100", personal.productivity_score);
    let _ = writeln!(
        output,
        "Weekly hours: {}h ({})",
        personal.weekly_hours,
        if personal.weekly_hours > 40 {
            "above average"
        } else {
            "within range"
        }
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "Weekly trends:");
    for metric in personal.weekly.iter() {
        let _ = writeln!(
            output,
            "- {}: sentiment {}%, productivity {}%",
            metric.day, metric.sentiment, metric.productivity
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Wellness recommendations:");
    if personal.recommendations.is_empty() {
        let _ = writeln!(output, "- none");
    } else {
        for recommendation in personal.recommendations.iter() {
            let _ = writeln!(output, "- {recommendation}");
        }
    }

    output
}

pub fn render_insights(snapshot: &WellnessSnapshot) -> String {
    let metrics = &snapshot.team_metrics;
    let mut output = String::new();

    let _ = writeln!(output, "AI Insights & Recommendations");
    let _ = writeln!(
        output,
        "Average risk score: {} ({:+}% vs last month)",
        metrics.avg_risk_score, metrics.risk_trend
    );
    let _ = writeln!(output, "Satisfaction: {}%", metrics.satisfaction_score);
    let _ = writeln!(output, "Retention risk: {}%", metrics.retention_risk);
    let _ = writeln!(output, "Prevention score: {}%", metrics.burnout_prevention);
    let _ = writeln!(output, "Active insights: {}", snapshot.insights.len());

    let insights = aggregate::sort_insights(snapshot.insights.clone());
    for insight in insights.iter() {
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "[{}] {} ({}, {} impact)",
            insight.priority.badge_variant().token(),
            insight.title,
            insight.category,
            insight.impact.label()
        );
        let _ = writeln!(output, "{}", insight.description);
        let _ = writeln!(
            output,
            "Trend {:+}%, {} employees affected",
            insight.trend, insight.affected_count
        );
        let _ = writeln!(output, "Recommendations:");
        for recommendation in insight.recommendations.iter() {
            let _ = writeln!(output, "- {recommendation}");
        }
    }

    output
}
