// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tollgate - cost-aware model routing under administrator policy.
//!
//! This is the binary entry point for the Tollgate command surface.

mod report;

use clap::{Parser, Subcommand};
use tollgate_cost::{budget_percent, state_for, SessionStats};
use tollgate_feedback::FeedbackStats;

/// Tollgate - cost-aware model routing under administrator policy.
#[derive(Parser, Debug)]
#[command(name = "tollgate", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show session usage statistics.
    Stats,
    /// Show budget utilization.
    Budget,
    /// List the model catalog grouped by credit tier.
    Models,
    /// Validate and summarize the active configuration.
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match tollgate_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            tollgate_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Stats) => {
            // A fresh process owns a fresh session; counters accumulate only
            // while requests are routed through it.
            let stats = SessionStats::default();
            print!("{}", report::render_stats(&stats, &FeedbackStats::default()));
        }
        Some(Commands::Budget) => {
            let stats = SessionStats::default();
            let monthly = config.cost.monthly_budget_credits;
            let percent = budget_percent(stats.total_credits_used, monthly);
            print!(
                "{}",
                report::render_budget(&stats, monthly, percent, state_for(percent))
            );
        }
        Some(Commands::Models) => {
            print!("{}", report::render_models());
        }
        Some(Commands::Config) => {
            println!("router.enabled          = {}", config.router.enabled);
            println!("router.classifier_model = {}", config.router.classifier_model);
            println!("router.max_credit_tier  = {}", config.router.max_credit_tier);
            println!(
                "router.blocked_models   = [{}]",
                config
                    .router
                    .blocked_models
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            for (task, model) in &config.router.task_routing {
                println!("router.task_routing.{task} = {model}");
            }
            println!("cost.monthly_budget_credits = {}", config.cost.monthly_budget_credits);
            println!("feedback.collect        = {}", config.feedback.collect);
        }
        None => {
            println!("tollgate: use --help for available commands");
        }
    }
}
