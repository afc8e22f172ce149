//! Simulation report generation.

use super::runner::RunStats;
use crate::progression::GameType;
use serde::Serialize;

/// Per-game averages across all runs.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub game: GameType,
    pub total_rounds: u32,
    pub total_wins: u32,
    pub total_losses: u32,
    pub win_rate: f64,
    /// Average length of one round in seconds
    pub avg_round_secs: f64,
}

fn average(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    runs.iter().map(f).sum::<f64>() / runs.len().max(1) as f64
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_cleared: u32,

    pub avg_rounds: f64,
    pub avg_play_minutes: f64,
    pub avg_levels_completed: f64,

    pub avg_shards_of_insight: f64,
    pub avg_flow_ribbons: f64,
    pub avg_realm_echoes: f64,

    pub games: Vec<GameSummary>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let runs_cleared = runs.iter().filter(|r| r.cleared).count() as u32;

        let avg_rounds = average(&runs, |r| r.rounds_played as f64);
        let avg_play_minutes = average(&runs, |r| r.play_time_ms as f64 / 60_000.0);
        let avg_levels_completed = average(&runs, |r| r.levels_completed as f64);
        let avg_shards_of_insight = average(&runs, |r| r.rewards.shards_of_insight as f64);
        let avg_flow_ribbons = average(&runs, |r| r.rewards.flow_ribbons as f64);
        let avg_realm_echoes = average(&runs, |r| r.rewards.realm_echoes as f64);

        let games = GameType::ALL
            .iter()
            .map(|&game| {
                let total_rounds: u32 = runs.iter().map(|r| r.tally(game).rounds).sum();
                let total_wins: u32 = runs.iter().map(|r| r.tally(game).wins).sum();
                let total_losses: u32 = runs.iter().map(|r| r.tally(game).losses).sum();
                let total_ms: u64 = runs.iter().map(|r| r.tally(game).play_ms).sum();
                let rounds = total_rounds.max(1) as f64;
                GameSummary {
                    game,
                    total_rounds,
                    total_wins,
                    total_losses,
                    win_rate: total_wins as f64 / rounds,
                    avg_round_secs: total_ms as f64 / 1000.0 / rounds,
                }
            })
            .collect();

        Self {
            num_runs,
            runs_cleared,
            avg_rounds,
            avg_play_minutes,
            avg_levels_completed,
            avg_shards_of_insight,
            avg_flow_ribbons,
            avg_realm_echoes,
            games,
            run_stats: runs,
        }
    }

    pub fn clear_rate(&self) -> f64 {
        self.runs_cleared as f64 / self.num_runs.max(1) as f64
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} cleared ({:.1}%)\n\n",
            self.num_runs,
            self.runs_cleared,
            self.clear_rate() * 100.0
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Rounds Played:   {:.1}\n", self.avg_rounds));
        report.push_str(&format!(
            "  Avg Levels Cleared:  {:.1}\n",
            self.avg_levels_completed
        ));
        report.push_str(&format!(
            "  Avg Play Time:       {:.1} min\n\n",
            self.avg_play_minutes
        ));

        report.push_str("── PER-GAME BREAKDOWN ───────────────────────────────────────────\n");
        report.push_str("  Game                  Rounds    Wins   Losses   Win %   Secs/Round\n");
        report.push_str("  ────                  ──────    ────   ──────   ─────   ──────────\n");
        for summary in &self.games {
            report.push_str(&format!(
                "  {:<20}  {:6}  {:6}   {:6}   {:5.1}   {:10.1}\n",
                summary.game.name(),
                summary.total_rounds,
                summary.total_wins,
                summary.total_losses,
                summary.win_rate * 100.0,
                summary.avg_round_secs
            ));
        }
        report.push('\n');

        report.push_str("── REWARDS (avg per run) ────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Shards of Insight:   {:.1}\n",
            self.avg_shards_of_insight
        ));
        report.push_str(&format!("  Flow Ribbons:        {:.1}\n", self.avg_flow_ribbons));
        report.push_str(&format!("  Realm Echoes:        {:.1}\n\n", self.avg_realm_echoes));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        for summary in &self.games {
            if summary.total_rounds > 0 && summary.win_rate < 0.5 {
                report.push_str(&format!(
                    "  ⚠️  {} is lost more often than won ({:.1}% wins)\n",
                    summary.game.name(),
                    summary.win_rate * 100.0
                ));
            }
        }
        if self.num_runs > 0 && self.runs_cleared == 0 {
            report.push_str("  ⚠️  No run cleared the catalog - round limit too low or games too hard?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::super::runner::GameTally;
    use super::*;
    use crate::progression::{Difficulty, RewardLedger};

    fn run(cleared: bool, pulse_wins: u32, pulse_losses: u32) -> RunStats {
        let mut games = [GameTally::default(); 3];
        games[0] = GameTally {
            rounds: pulse_wins + pulse_losses,
            wins: pulse_wins,
            losses: pulse_losses,
            play_ms: 10_000 * (pulse_wins + pulse_losses) as u64,
        };
        RunStats {
            rounds_played: pulse_wins + pulse_losses,
            games,
            play_time_ms: 120_000,
            levels_completed: pulse_wins as usize,
            rewards: RewardLedger {
                shards_of_insight: pulse_wins,
                ..RewardLedger::default()
            },
            highest_difficulty: Difficulty::Easy,
            cleared,
        }
    }

    #[test]
    fn test_report_generation() {
        let report = SimReport::from_runs(vec![run(true, 4, 0), run(false, 2, 2)]);

        assert_eq!(report.num_runs, 2);
        assert_eq!(report.runs_cleared, 1);
        assert!((report.avg_rounds - 4.0).abs() < 1e-9);
        assert!((report.avg_play_minutes - 2.0).abs() < 1e-9);
        assert!((report.avg_shards_of_insight - 3.0).abs() < 1e-9);

        let pulse = &report.games[0];
        assert_eq!(pulse.game, GameType::PulseGridPath);
        assert_eq!(pulse.total_rounds, 8);
        assert!((pulse.win_rate - 0.75).abs() < 1e-9);
        assert!((pulse.avg_round_secs - 10.0).abs() < 1e-9);
        assert_eq!(report.games[1].total_rounds, 0);
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new());
        assert_eq!(report.num_runs, 0);
        assert_eq!(report.clear_rate(), 0.0);
        assert!(report.to_text().contains("SIMULATION REPORT"));
    }

    #[test]
    fn test_text_flags_hard_games() {
        let report = SimReport::from_runs(vec![run(false, 1, 3)]);
        let text = report.to_text();
        assert!(text.contains("Pulse Grid Path is lost more often"));
        assert!(text.contains("No run cleared"));
    }

    #[test]
    fn test_json_report() {
        let report = SimReport::from_runs(vec![run(true, 4, 0)]);
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["num_runs"], 1);
        assert_eq!(json["games"][0]["game"], "Pulse Grid Path");
        assert!(json.get("run_stats").is_none());
    }
}
