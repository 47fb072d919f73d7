//! The `pitchforge metrics` command group.

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{Cell, Table};

use pitchforge_core::dashboard::{
    alerts, concentration_risk, derived_economics, scenario_runway, single_point_failures,
    status_tone, trend_series, Direction, Tone, TrendPeriod,
};

use super::Session;

#[derive(Subcommand)]
pub enum MetricsCommand {
    /// Show KPI cards, unit economics, scenarios, and the watchlist
    Show,

    /// Update a metric value
    Set {
        /// Metric name (e.g. monthly_revenue, churn_rate)
        key: String,
        /// New value
        value: f64,
    },

    /// Update a target value
    Target {
        /// Target name (e.g. monthly_revenue, churn_rate)
        key: String,
        /// New value
        value: f64,
    },

    /// Update an alert rule
    Rule {
        /// Rule name (e.g. max_churn_rate, min_runway_months)
        key: String,
        /// New value
        value: f64,
    },

    /// Print a synthesized trend series for a metric
    Trend {
        /// Metric name
        key: String,
        /// 7d, 30d, 90d
        #[arg(long, default_value = "30d")]
        period: String,
    },
}

pub fn execute(command: MetricsCommand, config: Option<&Path>) -> Result<()> {
    let mut session = Session::open(config)?;

    match command {
        MetricsCommand::Show => {
            print_dashboard(&session);
            return Ok(());
        }
        MetricsCommand::Set { key, value } => {
            set_metric(&mut session, &key, value)?;
            println!("Set {key} = {value}");
        }
        MetricsCommand::Target { key, value } => {
            set_target(&mut session, &key, value)?;
            println!("Set target {key} = {value}");
        }
        MetricsCommand::Rule { key, value } => {
            set_rule(&mut session, &key, value)?;
            println!("Set rule {key} = {value}");
        }
        MetricsCommand::Trend { key, period } => {
            let period: TrendPeriod = period.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let metrics = &session.metrics.metrics;
            let (current, growth) = match key.as_str() {
                "monthly_revenue" => (metrics.monthly_revenue, metrics.monthly_growth_pct),
                "active_users" => (metrics.active_users, metrics.monthly_growth_pct * 0.6),
                "churn_rate" => (metrics.churn_rate, -metrics.monthly_growth_pct * 0.15),
                "burn_rate" => (metrics.burn_rate, metrics.monthly_growth_pct * 0.3),
                other => anyhow::bail!("no trend series for '{other}'"),
            };
            let series = trend_series(current, growth, period);
            let rendered: Vec<String> = series.iter().map(|v| format!("{v:.0}")).collect();
            println!("{key} ({period}): {}", rendered.join(" -> "));
            return Ok(());
        }
    }

    session.save_metrics();
    Ok(())
}

fn tone_label(tone: Tone) -> &'static str {
    match tone {
        Tone::Ok => "ok",
        Tone::Warn => "warn",
        Tone::Risk => "risk",
    }
}

fn print_dashboard(session: &Session) {
    let state = &session.metrics;
    let metrics = &state.metrics;
    let targets = &state.targets;

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value", "Target", "Variance", "Status"]);
    let cards: [(&str, f64, f64, Direction); 6] = [
        ("Monthly Revenue", metrics.monthly_revenue, targets.monthly_revenue, Direction::High),
        ("Monthly Growth %", metrics.monthly_growth_pct, targets.monthly_growth_pct, Direction::High),
        ("Active Users", metrics.active_users, targets.active_users, Direction::High),
        ("Churn Rate", metrics.churn_rate, targets.churn_rate, Direction::Low),
        ("Burn Rate", metrics.burn_rate, targets.burn_rate, Direction::Low),
        ("Runway (months)", metrics.runway_months, targets.runway_months, Direction::High),
    ];
    for (label, value, target, direction) in cards {
        let variance = value - target;
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{value:.1}")),
            Cell::new(format!("{target:.1}")),
            Cell::new(format!("{}{variance:.1}", if variance >= 0.0 { "+" } else { "" })),
            Cell::new(tone_label(status_tone(value, target, direction))),
        ]);
    }
    println!("{table}");

    let derived = derived_economics(metrics);
    println!(
        "\nARPU ${:.0} | LTV ${:.0} | LTV:CAC {:.2}x | Payback {:.1} mo | Magic # {:.2}",
        derived.arpu, derived.ltv, derived.ltv_to_cac, derived.payback_months, derived.magic_number
    );

    println!("\nRunway scenarios:");
    for scenario in scenario_runway(metrics) {
        println!("  {} case: {} months", scenario.label, scenario.months);
    }

    println!(
        "\nTop customer concentration: {:.1}% (risk tier: {})",
        metrics.top_customer_revenue_pct,
        concentration_risk(metrics, &state.alert_rules)
    );
    for risk in single_point_failures(metrics) {
        println!("  single-point failure: {risk}");
    }

    println!("\nWatchlist:");
    for alert in alerts(metrics, &state.alert_rules) {
        println!("  {}: {}", alert.severity.to_string().to_uppercase(), alert.label);
    }
}

fn set_metric(session: &mut Session, key: &str, value: f64) -> Result<()> {
    let metrics = &mut session.metrics.metrics;
    match key {
        "monthly_revenue" => metrics.monthly_revenue = value,
        "monthly_growth_pct" => metrics.monthly_growth_pct = value,
        "active_users" => metrics.active_users = value,
        "churn_rate" => metrics.churn_rate = value,
        "burn_rate" => metrics.burn_rate = value,
        "runway_months" => metrics.runway_months = value,
        "cash_on_hand" => metrics.cash_on_hand = value,
        "top_customer_revenue_pct" => metrics.top_customer_revenue_pct = value,
        "cac" => metrics.cac = value,
        "gross_margin_pct" => metrics.gross_margin_pct = value,
        "sales_marketing_spend" => metrics.sales_marketing_spend = value,
        "activation_rate" => metrics.activation_rate = value,
        "expansion_revenue_pct" => metrics.expansion_revenue_pct = value,
        "pipeline_coverage" => metrics.pipeline_coverage = value,
        "net_dollar_retention" => metrics.net_dollar_retention = value,
        other => anyhow::bail!("unknown metric: {other}"),
    }
    Ok(())
}

fn set_target(session: &mut Session, key: &str, value: f64) -> Result<()> {
    let targets = &mut session.metrics.targets;
    match key {
        "monthly_revenue" => targets.monthly_revenue = value,
        "monthly_growth_pct" => targets.monthly_growth_pct = value,
        "active_users" => targets.active_users = value,
        "churn_rate" => targets.churn_rate = value,
        "burn_rate" => targets.burn_rate = value,
        "runway_months" => targets.runway_months = value,
        "activation_rate" => targets.activation_rate = value,
        "net_dollar_retention" => targets.net_dollar_retention = value,
        other => anyhow::bail!("unknown target: {other}"),
    }
    Ok(())
}

fn set_rule(session: &mut Session, key: &str, value: f64) -> Result<()> {
    let rules = &mut session.metrics.alert_rules;
    match key {
        "max_churn_rate" => rules.max_churn_rate = value,
        "min_runway_months" => rules.min_runway_months = value,
        "min_ndr" => rules.min_ndr = value,
        "min_pipeline_coverage" => rules.min_pipeline_coverage = value,
        "max_top_customer_pct" => rules.max_top_customer_pct = value,
        other => anyhow::bail!("unknown rule: {other}"),
    }
    Ok(())
}
