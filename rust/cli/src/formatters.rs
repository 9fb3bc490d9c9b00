//! Text rendering of hands, conditions and run results.
//!
//! Pass/fail marks use Unicode symbols with an ASCII fallback for Windows
//! consoles that cannot render them.

use handsim_engine::cards::CardId;
use handsim_engine::condition::{Condition, GroupMember, Operator, TargetHand};
use handsim_engine::filter::{FilterCard, StatRange};
use handsim_engine::simulation::SimulationResult;

/// Check if the terminal supports Unicode symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_mark(ok: bool) -> &'static str {
    match (ok, supports_unicode()) {
        (true, true) => "✓",
        (false, true) => "✗",
        (true, false) => "+",
        (false, false) => "x",
    }
}

/// `33.76%`
pub fn format_percent(p: f64) -> String {
    format!("{:.2}%", p)
}

/// `[A, B, C]`
pub fn format_hand(cards: &[CardId]) -> String {
    let ids: Vec<&str> = cards.iter().map(CardId::as_str).collect();
    format!("[{}]", ids.join(", "))
}

fn format_range(range: &StatRange) -> String {
    match (range.min, range.max) {
        (Some(lo), Some(hi)) if lo == hi => lo.to_string(),
        (Some(lo), Some(hi)) => format!("{}..{}", lo, hi),
        (Some(lo), None) => format!("{}..", lo),
        (None, Some(hi)) => format!("..{}", hi),
        (None, None) => "any".to_string(),
    }
}

/// Compact description of a filter, e.g. `filter(DARK, level 1..4)`.
pub fn format_filter(filter: &FilterCard) -> String {
    let mut parts = Vec::new();
    if let Some(attr) = filter.attribute {
        parts.push(attr.to_string());
    }
    if let Some(t) = &filter.card_type {
        parts.push(format!("type {}", t));
    }
    if let Some(level) = &filter.level {
        parts.push(format!("level {}", format_range(level)));
    }
    if let Some(atk) = &filter.atk {
        parts.push(format!("ATK {}", format_range(atk)));
    }
    if let Some(a) = &filter.archetype {
        parts.push(format!("archetype {}", a));
    }
    if parts.is_empty() {
        "filter(any)".to_string()
    } else {
        format!("filter({})", parts.join(", "))
    }
}

/// `{A | filter(DARK)} >= 1`; the count is omitted for `!=`.
pub fn format_condition(condition: &Condition) -> String {
    let members: Vec<String> = condition
        .group
        .iter()
        .map(|m| match m {
            GroupMember::Card(card) => card.id.to_string(),
            GroupMember::Filter(f) => format_filter(f),
        })
        .collect();
    let group = format!("{{{}}}", members.join(" | "));
    match condition.op {
        Operator::Exclude => format!("{} {}", group, condition.op.symbol()),
        op => format!("{} {} {}", group, op.symbol(), condition.count),
    }
}

/// Aligned per-target table of hits and percentages.
pub fn format_result_table(targets: &[TargetHand], result: &SimulationResult) -> String {
    let labels: Vec<String> = targets
        .iter()
        .enumerate()
        .map(|(i, t)| t.label(i))
        .collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0).max(6);
    let mut lines = vec![format!("{:<width$}  {:>10}  {:>8}", "target", "hits", "rate")];
    for (i, label) in labels.iter().enumerate() {
        lines.push(format!(
            "{:<width$}  {:>10}  {:>8}",
            label,
            result.hits[i],
            format_percent(result.percentage(i)),
        ));
    }
    lines.join("\n")
}
