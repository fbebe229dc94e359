//! Text and JSON rendering of simulation results.

use super::explorer::Exploration;
use super::population::PopulationReport;
use super::profiler::RiskProfile;
use crate::election::Standing;
use serde::Serialize;

const RULE: &str = "═══════════════════════════════════════════════════════════════\n";

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn bar(percent: f64) -> String {
    "█".repeat((percent.clamp(0.0, 100.0) / 5.0) as usize)
}

fn names(list: &[String]) -> String {
    if list.is_empty() {
        "-".to_string()
    } else {
        list.join(", ")
    }
}

impl PopulationReport {
    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str(RULE);
        report.push_str("                    WIN PROBABILITIES\n");
        report.push_str(RULE);
        report.push_str(&format!(
            "Iterations: {}   Seed: {}\n\n",
            self.iterations, self.seed
        ));

        report.push_str("── PLAYERS ──────────────────────────────────────────────────────\n");
        for player in &self.players {
            report.push_str(&format!(
                "  {:<20} {:>5.1}% {}\n",
                player.display_name,
                player.win_probability,
                bar(player.win_probability)
            ));
            let critical = &player.critical_states;
            if !critical.needs_blue.is_empty() {
                report.push_str(&format!("      needs blue: {}\n", critical.needs_blue.join(", ")));
            }
            if !critical.needs_red.is_empty() {
                report.push_str(&format!("      needs red:  {}\n", critical.needs_red.join(", ")));
            }
            if !player.excluded_picks.is_empty() {
                report.push_str(&format!(
                    "      ⚠️  excluded picks: {}\n",
                    player.excluded_picks.join(", ")
                ));
            }
        }
        report.push('\n');

        report.push_str("── DECISIVE STATES ──────────────────────────────────────────────\n");
        for impact in self.region_impacts.iter().filter(|i| i.importance > 0.0) {
            report.push_str(&format!(
                "  {:<20} {:>5.1}%\n",
                impact.state,
                impact.importance * 100.0
            ));
            report.push_str(&format!(
                "      blue helps {} / hurts {}\n",
                names(&impact.blue_outcome.helps),
                names(&impact.blue_outcome.hurts)
            ));
            report.push_str(&format!(
                "      red helps  {} / hurts {}\n",
                names(&impact.red_outcome.helps),
                names(&impact.red_outcome.hurts)
            ));
        }
        report.push('\n');
        report.push_str(RULE);
        report
    }

    pub fn to_json(&self) -> String {
        to_json(self)
    }
}

impl RiskProfile {
    pub fn to_text(&self) -> String {
        let mut report = String::new();
        let metrics = &self.risk_metrics;

        report.push_str(RULE);
        report.push_str(&format!("                 RISK PROFILE: {}\n", self.player));
        report.push_str(RULE);
        report.push_str(&format!(
            "Iterations: {}   Seed: {}\n\n",
            self.iterations, self.seed
        ));

        report.push_str("── METRICS ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Risk Rating:        {}\n", metrics.risk_rating));
        report.push_str(&format!("  Win Frequency:      {:.1}%\n", metrics.win_frequency));
        report.push_str(&format!("  Volatility:         ${:.0}\n", metrics.volatility));
        report.push_str(&format!(
            "  Avg Winning Picks:  {:.2}\n\n",
            metrics.avg_winning_picks
        ));

        report.push_str("── MOST COMMON SCENARIOS ────────────────────────────────────────\n");
        for (rank, scenario) in self.winning_scenarios.iter().enumerate() {
            let share = scenario.frequency as f64 / self.iterations.max(1) as f64 * 100.0;
            report.push_str(&format!(
                "  #{} {:>5.1}%  net ${}\n",
                rank + 1,
                share,
                scenario.win_amount
            ));
            for (state, side) in &scenario.picks {
                report.push_str(&format!("      {:<20} {}\n", state, side));
            }
        }
        if !self.excluded_picks.is_empty() {
            report.push_str(&format!(
                "\n  ⚠️  excluded picks: {}\n",
                self.excluded_picks.join(", ")
            ));
        }
        report.push('\n');
        report.push_str(RULE);
        report
    }

    pub fn to_json(&self) -> String {
        to_json(self)
    }
}

impl Exploration {
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str(RULE);
        report.push_str("                    SCENARIO RESULTS\n");
        report.push_str(RULE);
        report.push_str(&format!("Based on {} state outcomes\n\n", self.determined));

        match &self.winner {
            Some(winner) => report.push_str(&format!("  Winner: {}\n\n", winner)),
            None => report.push_str("  No players\n\n"),
        }

        let mut rows: Vec<_> = self.winnings.iter().collect();
        rows.sort_by(|a, b| b.winnings.cmp(&a.winnings));
        for row in rows {
            let crown = if self.winner.as_deref() == Some(row.display_name.as_str()) {
                " 👑"
            } else {
                ""
            };
            report.push_str(&format!(
                "  {:<20} ${:>7}{}\n",
                row.display_name, row.winnings, crown
            ));
        }
        report.push('\n');
        report.push_str(RULE);
        report
    }

    pub fn to_json(&self) -> String {
        to_json(self)
    }
}

/// Leaderboard table.
pub fn standings_text(rows: &[Standing]) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("                       STANDINGS\n");
    report.push_str(RULE);
    report.push_str("  #   Player               Picks   Potential   Returned      Net\n");
    report.push_str("  ─   ──────               ─────   ─────────   ────────      ───\n");
    for (rank, row) in rows.iter().enumerate() {
        let returned = row
            .realized_return
            .map(|r| format!("${r}"))
            .unwrap_or_else(|| "-".to_string());
        report.push_str(&format!(
            "  {:<3} {:<20} {:>5}   {:>9}   {:>8}   {:>6}\n",
            rank + 1,
            row.display_name,
            row.num_picks,
            format!("${}", row.potential_winnings),
            returned,
            format!("${}", row.net)
        ));
    }
    report.push('\n');
    report.push_str(RULE);
    report
}
