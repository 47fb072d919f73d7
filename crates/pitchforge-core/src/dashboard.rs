//! Startup metrics engine.
//!
//! Derived unit economics, deterministic trend series, runway scenario
//! simulation, and the alert watchlist behind the investor KPI view. All
//! numeric inputs are defensively defaulted so partial snapshots load.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data quality attached to a headline metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Verified,
    Partial,
    Estimated,
}

/// Per-metric data quality flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricConfidence {
    #[serde(default = "verified")]
    pub monthly_revenue: Confidence,
    #[serde(default = "partial")]
    pub monthly_growth_pct: Confidence,
    #[serde(default = "verified")]
    pub active_users: Confidence,
    #[serde(default = "partial")]
    pub churn_rate: Confidence,
    #[serde(default = "verified")]
    pub burn_rate: Confidence,
    #[serde(default = "estimated")]
    pub runway_months: Confidence,
}

fn verified() -> Confidence {
    Confidence::Verified
}
fn partial() -> Confidence {
    Confidence::Partial
}
fn estimated() -> Confidence {
    Confidence::Estimated
}

impl Default for MetricConfidence {
    fn default() -> Self {
        Self {
            monthly_revenue: verified(),
            monthly_growth_pct: partial(),
            active_users: verified(),
            churn_rate: partial(),
            burn_rate: verified(),
            runway_months: estimated(),
        }
    }
}

/// Current startup metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupMetrics {
    #[serde(default = "d_revenue")]
    pub monthly_revenue: f64,
    #[serde(default = "d_growth")]
    pub monthly_growth_pct: f64,
    #[serde(default = "d_users")]
    pub active_users: f64,
    #[serde(default = "d_churn")]
    pub churn_rate: f64,
    #[serde(default = "d_burn")]
    pub burn_rate: f64,
    #[serde(default = "d_runway")]
    pub runway_months: f64,
    #[serde(default = "d_cash")]
    pub cash_on_hand: f64,
    #[serde(default = "d_top_customer")]
    pub top_customer_revenue_pct: f64,
    #[serde(default = "d_cac")]
    pub cac: f64,
    #[serde(default = "d_gross_margin")]
    pub gross_margin_pct: f64,
    #[serde(default = "d_sm_spend")]
    pub sales_marketing_spend: f64,
    #[serde(default = "d_activation")]
    pub activation_rate: f64,
    #[serde(default = "d_expansion")]
    pub expansion_revenue_pct: f64,
    #[serde(default = "d_pipeline")]
    pub pipeline_coverage: f64,
    #[serde(default = "d_ndr")]
    pub net_dollar_retention: f64,
}

fn d_revenue() -> f64 {
    48_000.0
}
fn d_growth() -> f64 {
    12.0
}
fn d_users() -> f64 {
    8_200.0
}
fn d_churn() -> f64 {
    3.2
}
fn d_burn() -> f64 {
    36_000.0
}
fn d_runway() -> f64 {
    14.0
}
fn d_cash() -> f64 {
    d_burn() * d_runway()
}
fn d_top_customer() -> f64 {
    34.0
}
fn d_cac() -> f64 {
    900.0
}
fn d_gross_margin() -> f64 {
    78.0
}
fn d_sm_spend() -> f64 {
    16_000.0
}
fn d_activation() -> f64 {
    37.0
}
fn d_expansion() -> f64 {
    21.0
}
fn d_pipeline() -> f64 {
    2.6
}
fn d_ndr() -> f64 {
    112.0
}

impl Default for StartupMetrics {
    fn default() -> Self {
        Self {
            monthly_revenue: d_revenue(),
            monthly_growth_pct: d_growth(),
            active_users: d_users(),
            churn_rate: d_churn(),
            burn_rate: d_burn(),
            runway_months: d_runway(),
            cash_on_hand: d_cash(),
            top_customer_revenue_pct: d_top_customer(),
            cac: d_cac(),
            gross_margin_pct: d_gross_margin(),
            sales_marketing_spend: d_sm_spend(),
            activation_rate: d_activation(),
            expansion_revenue_pct: d_expansion(),
            pipeline_coverage: d_pipeline(),
            net_dollar_retention: d_ndr(),
        }
    }
}

/// Targets the headline metrics are compared against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricTargets {
    #[serde(default = "t_revenue")]
    pub monthly_revenue: f64,
    #[serde(default = "t_growth")]
    pub monthly_growth_pct: f64,
    #[serde(default = "t_users")]
    pub active_users: f64,
    #[serde(default = "t_churn")]
    pub churn_rate: f64,
    #[serde(default = "t_burn")]
    pub burn_rate: f64,
    #[serde(default = "t_runway")]
    pub runway_months: f64,
    #[serde(default = "t_activation")]
    pub activation_rate: f64,
    #[serde(default = "t_ndr")]
    pub net_dollar_retention: f64,
}

fn t_revenue() -> f64 {
    60_000.0
}
fn t_growth() -> f64 {
    15.0
}
fn t_users() -> f64 {
    10_000.0
}
fn t_churn() -> f64 {
    3.0
}
fn t_burn() -> f64 {
    40_000.0
}
fn t_runway() -> f64 {
    16.0
}
fn t_activation() -> f64 {
    40.0
}
fn t_ndr() -> f64 {
    115.0
}

impl Default for MetricTargets {
    fn default() -> Self {
        Self {
            monthly_revenue: t_revenue(),
            monthly_growth_pct: t_growth(),
            active_users: t_users(),
            churn_rate: t_churn(),
            burn_rate: t_burn(),
            runway_months: t_runway(),
            activation_rate: t_activation(),
            net_dollar_retention: t_ndr(),
        }
    }
}

/// Thresholds driving the watchlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRules {
    #[serde(default = "r_churn")]
    pub max_churn_rate: f64,
    #[serde(default = "r_runway")]
    pub min_runway_months: f64,
    #[serde(default = "r_ndr")]
    pub min_ndr: f64,
    #[serde(default = "r_pipeline")]
    pub min_pipeline_coverage: f64,
    #[serde(default = "r_concentration")]
    pub max_top_customer_pct: f64,
}

fn r_churn() -> f64 {
    5.0
}
fn r_runway() -> f64 {
    9.0
}
fn r_ndr() -> f64 {
    105.0
}
fn r_pipeline() -> f64 {
    2.0
}
fn r_concentration() -> f64 {
    40.0
}

impl Default for AlertRules {
    fn default() -> Self {
        Self {
            max_churn_rate: r_churn(),
            min_runway_months: r_runway(),
            min_ndr: r_ndr(),
            min_pipeline_coverage: r_pipeline(),
            max_top_customer_pct: r_concentration(),
        }
    }
}

/// The persisted dashboard snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsState {
    #[serde(default)]
    pub metrics: StartupMetrics,
    #[serde(default)]
    pub targets: MetricTargets,
    #[serde(default)]
    pub confidence: MetricConfidence,
    #[serde(default)]
    pub alert_rules: AlertRules,
}

/// Unit economics derived from the current metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedEconomics {
    pub arpu: f64,
    pub ltv: f64,
    pub ltv_to_cac: f64,
    pub payback_months: f64,
    pub magic_number: f64,
}

pub fn derived_economics(metrics: &StartupMetrics) -> DerivedEconomics {
    let arpu = if metrics.active_users > 0.0 {
        metrics.monthly_revenue / metrics.active_users
    } else {
        0.0
    };
    let churn_decimal = (metrics.churn_rate / 100.0).max(0.001);
    let ltv = arpu / churn_decimal;
    let ltv_to_cac = if metrics.cac != 0.0 { ltv / metrics.cac } else { 0.0 };
    let payback_months = if arpu > 0.0 {
        metrics.cac / (arpu * (metrics.gross_margin_pct / 100.0))
    } else {
        0.0
    };
    let magic_number = if metrics.sales_marketing_spend > 0.0 {
        (metrics.monthly_revenue * (metrics.monthly_growth_pct / 100.0)) * 4.0
            / metrics.sales_marketing_spend
    } else {
        0.0
    };

    DerivedEconomics {
        arpu,
        ltv,
        ltv_to_cac,
        payback_months,
        magic_number,
    }
}

/// Sparkline window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendPeriod {
    SevenDays,
    ThirtyDays,
    NinetyDays,
}

impl TrendPeriod {
    fn points(&self) -> usize {
        match self {
            TrendPeriod::SevenDays => 7,
            TrendPeriod::ThirtyDays => 10,
            TrendPeriod::NinetyDays => 12,
        }
    }
}

impl Default for TrendPeriod {
    fn default() -> Self {
        TrendPeriod::ThirtyDays
    }
}

impl fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendPeriod::SevenDays => write!(f, "7d"),
            TrendPeriod::ThirtyDays => write!(f, "30d"),
            TrendPeriod::NinetyDays => write!(f, "90d"),
        }
    }
}

impl FromStr for TrendPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(TrendPeriod::SevenDays),
            "30d" => Ok(TrendPeriod::ThirtyDays),
            "90d" => Ok(TrendPeriod::NinetyDays),
            other => Err(format!("unknown trend period: {other}")),
        }
    }
}

/// Synthesize a backward-looking series ending at the current value.
///
/// Deterministic: a linear drift from the growth factor plus a fixed sine
/// ripple, floored at zero.
pub fn trend_series(current: f64, growth_factor_pct: f64, period: TrendPeriod) -> Vec<f64> {
    let points = period.points();
    let drift = growth_factor_pct / 100.0;
    let mut series = Vec::with_capacity(points);

    for index in (0..points).rev() {
        let multiplier = 1.0 - drift * (index as f64 / (points.max(4) as f64));
        let wave = 1.0 + (index as f64 * 1.4).sin() * 0.03;
        series.push((current * multiplier * wave).max(0.0));
    }

    series
}

/// A what-if runway scenario.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub id: &'static str,
    pub label: &'static str,
    pub growth_delta: f64,
    pub churn_delta: f64,
    pub burn_multiplier: f64,
}

pub const SCENARIOS: [Scenario; 3] = [
    Scenario { id: "base", label: "Base", growth_delta: 0.0, churn_delta: 0.0, burn_multiplier: 1.0 },
    Scenario { id: "best", label: "Best", growth_delta: 5.0, churn_delta: -0.8, burn_multiplier: 0.9 },
    Scenario { id: "worst", label: "Worst", growth_delta: -6.0, churn_delta: 1.3, burn_multiplier: 1.15 },
];

/// Months of cash left under compounding revenue and a burn floor, capped
/// at 72 months.
pub fn simulate_runway_months(
    cash: f64,
    revenue: f64,
    growth_pct: f64,
    churn_pct: f64,
    burn: f64,
) -> u32 {
    let mut remaining_cash = cash.max(0.0);
    let mut monthly_revenue = revenue.max(0.0);
    let monthly_growth = growth_pct / 100.0;
    let monthly_churn = churn_pct / 100.0;
    let monthly_burn = burn.max(1.0);
    let mut months = 0u32;

    while remaining_cash > 0.0 && months < 72 {
        let effective_growth = (monthly_growth - monthly_churn).clamp(-0.4, 0.45);
        monthly_revenue = (monthly_revenue * (1.0 + effective_growth)).max(0.0);
        let net_burn = (monthly_burn - monthly_revenue).max(1_000.0);
        remaining_cash -= net_burn;
        months += 1;
    }

    months
}

/// Runway months for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRunway {
    pub label: String,
    pub months: u32,
}

pub fn scenario_runway(metrics: &StartupMetrics) -> Vec<ScenarioRunway> {
    SCENARIOS
        .iter()
        .map(|scenario| ScenarioRunway {
            label: scenario.label.to_string(),
            months: simulate_runway_months(
                metrics.cash_on_hand,
                metrics.monthly_revenue,
                metrics.monthly_growth_pct + scenario.growth_delta,
                (metrics.churn_rate + scenario.churn_delta).max(0.0),
                metrics.burn_rate * scenario.burn_multiplier,
            ),
        })
        .collect()
}

/// Whether a metric is healthier above or below its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    High,
    Low,
}

/// Traffic-light status against a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Ok,
    Warn,
    Risk,
}

pub fn status_tone(value: f64, target: f64, direction: Direction) -> Tone {
    match direction {
        Direction::Low => {
            if value <= target {
                Tone::Ok
            } else if value <= target * 1.15 {
                Tone::Warn
            } else {
                Tone::Risk
            }
        }
        Direction::High => {
            if value >= target {
                Tone::Ok
            } else if value >= target * 0.9 {
                Tone::Warn
            } else {
                Tone::Risk
            }
        }
    }
}

/// Revenue concentration tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "Low"),
            RiskTier::Medium => write!(f, "Medium"),
            RiskTier::High => write!(f, "High"),
        }
    }
}

pub fn concentration_risk(metrics: &StartupMetrics, rules: &AlertRules) -> RiskTier {
    if metrics.top_customer_revenue_pct >= rules.max_top_customer_pct {
        RiskTier::High
    } else if metrics.top_customer_revenue_pct >= rules.max_top_customer_pct * 0.75 {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Fixed-threshold single-point-failure checks.
pub fn single_point_failures(metrics: &StartupMetrics) -> Vec<&'static str> {
    let mut risks = Vec::new();
    if metrics.top_customer_revenue_pct >= 45.0 {
        risks.push("Revenue dependency on top account");
    }
    if metrics.pipeline_coverage < 1.7 {
        risks.push("Pipeline coverage below safe level");
    }
    if metrics.net_dollar_retention < 100.0 {
        risks.push("Negative net revenue expansion");
    }
    risks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    AtRisk,
    Warning,
    Healthy,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::AtRisk => write!(f, "at risk"),
            Severity::Warning => write!(f, "warning"),
            Severity::Healthy => write!(f, "healthy"),
        }
    }
}

/// One watchlist entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub label: String,
    pub severity: Severity,
}

/// Evaluate the alert rules. Always returns at least one entry.
pub fn alerts(metrics: &StartupMetrics, rules: &AlertRules) -> Vec<Alert> {
    let mut watchlist = Vec::new();

    if metrics.churn_rate > rules.max_churn_rate {
        watchlist.push(Alert {
            label: "Churn above threshold".into(),
            severity: Severity::AtRisk,
        });
    }
    if metrics.runway_months < rules.min_runway_months {
        watchlist.push(Alert {
            label: "Runway below minimum".into(),
            severity: Severity::AtRisk,
        });
    }
    if metrics.net_dollar_retention < rules.min_ndr {
        watchlist.push(Alert {
            label: "Net dollar retention below target".into(),
            severity: Severity::Warning,
        });
    }
    if metrics.pipeline_coverage < rules.min_pipeline_coverage {
        watchlist.push(Alert {
            label: "Pipeline coverage too low".into(),
            severity: Severity::Warning,
        });
    }
    if metrics.top_customer_revenue_pct > rules.max_top_customer_pct {
        watchlist.push(Alert {
            label: "Customer concentration too high".into(),
            severity: Severity::AtRisk,
        });
    }

    if watchlist.is_empty() {
        watchlist.push(Alert {
            label: "No triggered alerts".into(),
            severity: Severity::Healthy,
        });
    }

    watchlist
}
