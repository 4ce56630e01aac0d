/// Display utilities for terminal output

use std::fmt::{self, Write};

use colored::Colorize;

use crate::handlers::dashboard::{DashboardView, PassportPanel};
use crate::util::format::truncate_address;

const WIDTH: usize = 60;

pub fn print_dashboard(view: &DashboardView) {
    println!("{}", render_dashboard(view));
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    write_dashboard(&mut out, view).ok();
    out
}

fn write_dashboard(out: &mut impl Write, view: &DashboardView) -> fmt::Result {
    writeln!(out, "\n{}", "🛂 LINERA PASSPORT NFT".bold())?;
    writeln!(out, "{}", "═".repeat(WIDTH))?;
    match &view.wallet {
        Some(address) => writeln!(out, "👛 Wallet: {}", truncate_address(address, 6, 4).bold())?,
        None => writeln!(out, "👛 Wallet: {}", "not connected".bright_black())?,
    }
    if let Some(at) = view.refreshed_at {
        writeln!(out, "🕒 Updated: {}", at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    }
    writeln!(out, "{}", "─".repeat(WIDTH).bright_black())?;

    write_passport(out, &view.passport)?;

    writeln!(out, "{}", "─".repeat(WIDTH).bright_black())?;
    writeln!(out, "{} {}", "Your Place".bold(), format!("#{}", view.your_place).red().bold())?;
    writeln!(out, "\n{} ({} ranked)", "🏆 Top Rankings".bold(), view.ranked_total)?;

    if view.leaderboard.is_empty() {
        writeln!(out, "   {}", "No ranked passports yet".bright_yellow())?;
    }
    for entry in &view.leaderboard {
        let is_caller = view
            .wallet
            .as_deref()
            .is_some_and(|w| w.eq_ignore_ascii_case(&entry.address));
        let row = format!(
            "{:>3}. {:<16} {:>8}",
            entry.rank,
            truncate_address(&entry.address, 6, 4),
            entry.score
        );
        if is_caller {
            writeln!(out, "{}", row.green().bold())?;
        } else {
            writeln!(out, "{}", row)?;
        }
    }
    write!(out, "{}", "═".repeat(WIDTH))
}

fn write_passport(out: &mut impl Write, panel: &PassportPanel) -> fmt::Result {
    match panel {
        PassportPanel::Disconnected => {
            writeln!(out, "{}", "Connect your Linera wallet to view passport".bright_black())
        }
        PassportPanel::Loading => writeln!(out, "Loading passport..."),
        PassportPanel::Error(message) => {
            writeln!(out, "{} {}", "❌ Error:".red().bold(), message.red())?;
            writeln!(out, "   {}", "Make sure the passport snapshot is being refreshed".bright_black())
        }
        PassportPanel::Missing => {
            writeln!(out, "{}", "No passport found for this wallet".bright_yellow())?;
            writeln!(out, "   Run `passport-board mint` to mint one")
        }
        PassportPanel::Card(card) => {
            writeln!(out, "{}", "✨ Passport NFT".bold())?;
            writeln!(out, "   Token ID:  {}... (#{})", card.token_hex, card.short_id)?;
            writeln!(out, "   Owner:     {}", card.owner_display)?;
            if !card.chain.is_empty() {
                writeln!(out, "   Chain:     {}", truncate_address(&card.chain, 8, 4))?;
            }
            writeln!(out, "   Reputation Score: {}", card.score.to_string().red().bold())?;
            writeln!(out, "   Achievements ({}):", card.achievements.len())?;
            if card.achievements.is_empty() {
                writeln!(out, "     {}", "No achievements yet".bright_black())?;
            }
            for achievement in &card.achievements {
                writeln!(out, "     • {}", achievement)?;
            }
            Ok(())
        }
    }
}
