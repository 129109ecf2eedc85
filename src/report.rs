use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::core::TradeRequest;
use crate::models::{CalculationResult, Stage};
use crate::repository::ReferenceData;

/// Layout used when printing a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportStyle {
    #[default]
    Table,
    Compact,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    request: &'a TradeRequest,
    result: &'a CalculationResult,
    source: &'a str,
}

pub fn render(
    req: &TradeRequest,
    result: &CalculationResult,
    reference: &ReferenceData,
    style: ReportStyle,
) -> Result<String> {
    match style {
        ReportStyle::Table => Ok(render_table(req, result)),
        ReportStyle::Compact => Ok(render_compact(req, result)),
        ReportStyle::Json => Ok(serde_json::to_string_pretty(&JsonReport {
            request: req,
            result,
            source: reference.source(),
        })?),
    }
}

fn render_table(req: &TradeRequest, r: &CalculationResult) -> String {
    let mut out = Vec::new();
    out.push("╔══════════════════════════════════════════════╗".to_string());
    let title = format!("{} STAGE: {}", req.stage, req.segment);
    out.push(format!("║  {:<44}║", truncate(&title, 44)));
    out.push("╠══════════════════════════════════════════════╣".to_string());
    out.push(row("Account", req.account.as_str()));
    out.push(row("Action", req.action.as_str()));

    if r.is_zero() {
        out.push(row("Result", "no matching segment"));
        out.push("╚══════════════════════════════════════════════╝".to_string());
        return out.join("\n");
    }

    out.push(row("PF lot", &format!("{:.3}", r.pf_lot)));
    out.push(row("PF open", &format!("{:.3}", req.pf_open)));
    out.push(row("PF TP", &format!("{:.3}", r.pf_tp)));
    out.push(row("PF SL", &format!("{:.3}", r.pf_sl)));
    out.push(row("Real lot", &format!("{:.3}", r.real_lot)));
    out.push(row("Real open", &format!("{:.3}", req.real_open)));
    out.push(row("Real TP", &format!("{:.3}", r.real_tp)));
    out.push(row("Real SL", &format!("{:.3}", r.real_sl)));
    out.push(row("Balance", &format!("${:.2}", r.balance)));
    out.push("╚══════════════════════════════════════════════╝".to_string());
    out.join("\n")
}

fn render_compact(req: &TradeRequest, r: &CalculationResult) -> String {
    if r.is_zero() {
        return format!(
            "{} {} {} {}: no matching segment",
            req.stage, req.account, req.segment, req.action
        );
    }
    format!(
        "{} {} {} {} | PF {:.3} lot TP {:.3} SL {:.3} | REAL {:.3} lot TP {:.3} SL {:.3} | balance {:.2}",
        req.stage,
        req.account,
        req.segment,
        req.action,
        r.pf_lot,
        r.pf_tp,
        r.pf_sl,
        r.real_lot,
        r.real_tp,
        r.real_sl,
        r.balance
    )
}

/// Lists a stage's segments with TP/SL and the per-tier lot pairs.
pub fn render_segments(reference: &ReferenceData, stage: Stage) -> String {
    let tiers: Vec<_> = reference.balances().keys().copied().collect();

    let mut header = format!("{:<14} {:>6} {:>6}", "SEGMENT", "TP", "SL");
    for tier in &tiers {
        header.push_str(&format!(" {:>13}", format!("{} pf/real", tier)));
    }

    let mut out = vec![format!("{} STAGE ({})", stage, reference.source()), header];
    for seg in reference.segments(stage) {
        let mut line = format!("{:<14} {:>6.1} {:>6.1}", seg.name, seg.tp, seg.sl);
        for tier in &tiers {
            let cell = match seg.lot_for(*tier) {
                Some(l) => format!("{}/{}", l.pf, l.real),
                None => "-".to_string(),
            };
            line.push_str(&format!(" {:>13}", cell));
        }
        out.push(line);
    }

    if stage == Stage::Evaluation {
        let balances: Vec<String> = reference
            .balances()
            .iter()
            .map(|(t, b)| format!("{}={:.0}", t, b))
            .collect();
        out.push(format!("Starting balances: {}", balances.join(", ")));
    }

    out.join("\n")
}

fn row(label: &str, value: &str) -> String {
    format!("║  {:<12}{:>32}║", label, value)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}
