// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only report rendering for the `stats` and `budget` command surfaces.
//!
//! Presentation only: every number here comes from the accountant, the
//! feedback recorder, or the catalog. Nothing feeds back into routing.

use tollgate_core::CreditTier;
use tollgate_cost::{BudgetState, SessionStats};
use tollgate_feedback::FeedbackStats;

/// Render the session usage report.
pub fn render_stats(stats: &SessionStats, feedback: &FeedbackStats) -> String {
    let mut out = String::new();
    out.push_str("Session usage\n");
    out.push_str(&format!("  requests:       {}\n", stats.request_count));
    out.push_str(&format!(
        "  tokens (est.):  {} in / {} out\n",
        stats.token_count.input, stats.token_count.output
    ));
    out.push_str(&format!("  credits used:   {:.2}\n", stats.total_credits_used));

    if !stats.credits_by_model.is_empty() {
        out.push_str("  by model:\n");
        for (model, credits) in &stats.credits_by_model {
            out.push_str(&format!("    {model:<20} {credits:.2}\n"));
        }
    }
    if !stats.task_types.is_empty() {
        out.push_str("  by task:\n");
        for (task, count) in &stats.task_types {
            out.push_str(&format!("    {task:<20} {count}\n"));
        }
    }

    out.push_str(&format!(
        "Feedback: {} total ({} positive, {} negative, {} overrides)\n",
        feedback.total, feedback.positive, feedback.negative, feedback.overrides
    ));
    out
}

/// Render the budget utilization report.
pub fn render_budget(
    stats: &SessionStats,
    monthly_budget: f64,
    percent: f64,
    state: BudgetState,
) -> String {
    let mut out = String::new();
    out.push_str("Budget\n");
    if monthly_budget > 0.0 {
        out.push_str(&format!(
            "  {:.2} of {monthly_budget:.2} credits used ({percent:.1}%)\n",
            stats.total_credits_used
        ));
        match state {
            BudgetState::HardWarning => {
                out.push_str("  warning: budget nearly exhausted (90%+)\n");
            }
            BudgetState::SoftWarning => {
                out.push_str("  warning: approaching budget (70%+)\n");
            }
            BudgetState::Normal => {}
        }
    } else {
        out.push_str(&format!(
            "  {:.2} credits used (no monthly budget configured)\n",
            stats.total_credits_used
        ));
    }
    out
}

/// Render the model catalog grouped by credit tier.
pub fn render_models() -> String {
    let mut out = String::new();
    for tier in [
        CreditTier::Free,
        CreditTier::Cheap,
        CreditTier::Standard,
        CreditTier::Premium,
    ] {
        let models = tollgate_catalog::by_tier(tier);
        if models.is_empty() {
            continue;
        }
        out.push_str(&format!("{tier}\n"));
        for model in models {
            let preview = if model.preview { " (preview)" } else { "" };
            out.push_str(&format!(
                "  {:<16} {}x  {}{preview}\n",
                model.id, model.credit_multiplier, model.name
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use tollgate_core::TaskType;
    use tollgate_cost::SessionAccountant;

    use super::*;

    fn sample_stats() -> SessionStats {
        let mut accountant = SessionAccountant::new();
        let sonnet = tollgate_catalog::lookup("claude-sonnet-4").unwrap();
        let free = tollgate_catalog::lookup("gpt-4.1").unwrap();
        accountant.record_completion(sonnet, TaskType::Test, 40, 400);
        accountant.record_completion(free, TaskType::Simple, 12, 80);
        accountant.snapshot()
    }

    #[test]
    fn stats_report_lists_models_and_tasks() {
        let report = render_stats(&sample_stats(), &FeedbackStats::default());
        assert!(report.contains("requests:       2"));
        assert!(report.contains("claude-sonnet-4"));
        assert!(report.contains("test"));
        assert!(report.contains("simple"));
        assert!(report.contains("0 overrides"));
    }

    #[test]
    fn budget_report_shows_percentage_and_warning() {
        let stats = sample_stats(); // 1.0 credits used
        let percent = tollgate_cost::budget_percent(stats.total_credits_used, 1.05);
        let state = tollgate_cost::state_for(percent);
        let report = render_budget(&stats, 1.05, percent, state);
        assert!(report.contains("1.00 of 1.05"));
        assert!(report.contains("90%+"), "95% utilization is a hard warning");
    }

    #[test]
    fn budget_report_without_budget() {
        let stats = SessionStats::default();
        let report = render_budget(&stats, 0.0, 0.0, BudgetState::Normal);
        assert!(report.contains("no monthly budget configured"));
    }

    #[test]
    fn models_report_groups_by_tier() {
        let report = render_models();
        let free_pos = report.find("free").unwrap();
        let premium_pos = report.find("premium").unwrap();
        assert!(free_pos < premium_pos);
        assert!(report.contains("gpt-4.1"));
        assert!(report.contains("(preview)"));
    }
}
