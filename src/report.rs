use chrono::Local;
use std::io::Write;

use crate::config::Config;
use crate::ledger::LedgerSummary;
use crate::signal::{ChainView, SentimentReading, Side, TradeSignal};

pub fn print_banner(config: &Config) {
    println!("\n╔═══════════════════════════════════════════════════════════╗");
    println!("║            {} Intraday Options Signal Agent         ║", config.signal.index);
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();
    println!("🌏 Sentiment basket: {}", config.signal.sentiment_basket.join(", "));
    println!(
        "💰 Premium budget: ₹{:.0} – ₹{:.0}",
        config.budget.min_premium, config.budget.max_premium
    );
    println!(
        "📊 PCR thresholds: bullish < {:.2}, bearish > {:.2}",
        config.thresholds.bullish_pcr_max, config.thresholds.bearish_pcr_min
    );
    println!(
        "🎯 Reward:risk: {:.1}× target, {:.1}× stop",
        config.risk.target_multiplier, config.risk.stop_loss_multiplier
    );
    println!("🧾 Trade log: {}", config.ledger.path);
    println!("═══════════════════════════════════════════════════════════");
    println!();
}

pub fn print_trend(reading: &SentimentReading) {
    println!("🌏 Global market trend:");
    for change in &reading.changes {
        let arrow = if change.percent_change > 0.0 {
            "🟢"
        } else if change.percent_change < 0.0 {
            "🔴"
        } else {
            "⚪"
        };
        println!("   {} {:<8} {:+.2}%", arrow, change.ticker, change.percent_change);
    }
    println!("   Σ sentiment score: {:+.2}", reading.score);
    println!();
}

pub fn print_recommendation(signal: &TradeSignal, view: &ChainView) {
    let side = match signal.side {
        Side::Call => "CALL (Bullish)",
        Side::Put => "PUT (Bearish)",
    };
    println!("📣 Recommendation: {}", side);
    println!("   🎫 Symbol:     {}", signal.symbol);
    println!("   💵 Entry:      ₹{:.2}", signal.entry);
    println!("   🎯 Target:     ₹{:.2}", signal.target);
    println!("   🛑 Stop Loss:  ₹{:.2}", signal.stop_loss);
    println!("   ⭐ Confidence: {}/100", signal.confidence);
    println!("   🔢 PCR:        {:.2}", view.pcr);
    println!();
}

pub fn print_neutral(view: &ChainView) {
    println!("😐 Recommendation: NEUTRAL — stay out today");
    println!("   🔢 PCR:        {:.2}", view.pcr);
    if view.underlying > 0.0 {
        println!("   📍 Underlying: {:.2}", view.underlying);
    }
    println!();
}

pub fn print_summary(summary: &LedgerSummary) {
    println!("📒 Trade log summary:");
    println!("   Trades recorded:  {}", summary.count);
    match summary.avg_confidence {
        Some(avg) => println!("   Avg confidence:   {:.1}", avg),
        None => println!("   Avg confidence:   N/A"),
    }
    println!("   High confidence:  {}", summary.high_confidence);
    println!();
}

/// Markdown report mirroring the console recommendation.
pub fn write_markdown(
    path: &str,
    index: &str,
    reading: &SentimentReading,
    view: &ChainView,
    signal: Option<&TradeSignal>,
) -> std::io::Result<()> {
    let mut out = std::fs::File::create(path)?;

    writeln!(out, "# 📈 {} Trading Call\n", index)?;
    writeln!(out, "**Sentiment score:** {:+.2}  ", reading.score)?;
    writeln!(out, "**Put/Call ratio:** {:.2}  ", view.pcr)?;
    match &view.valid_expiry {
        Some(expiry) => writeln!(out, "**Expiry:** {}  ", expiry)?,
        None => writeln!(out, "**Expiry:** unavailable  ")?,
    }
    writeln!(out)?;

    match signal {
        Some(signal) => {
            let side = match signal.side {
                Side::Call => "CALL (Bullish)",
                Side::Put => "PUT (Bearish)",
            };
            writeln!(out, "**Side:** {}  ", side)?;
            writeln!(out, "**Symbol:** `{}`  ", signal.symbol)?;
            writeln!(out, "**Entry Price:** ₹{:.2}  ", signal.entry)?;
            writeln!(out, "- 🎯 Target: ₹{:.2}  ", signal.target)?;
            writeln!(out, "- 🛑 Stop Loss: ₹{:.2}  ", signal.stop_loss)?;
            writeln!(out, "**Confidence:** {}/100  ", signal.confidence)?;
        }
        None => {
            writeln!(out, "**Side:** NEUTRAL — no trade today  ")?;
        }
    }

    writeln!(
        out,
        "\n_Last updated: {}_",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    Ok(())
}
