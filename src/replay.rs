// Replay module for analyzing recorded ticks and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs written by the debug logger
// 2. Replay the bot on the recorded boards
// 3. Compare recorded vs replayed actions
// 4. Generate a summary report
//
// Decisions involve random tie-breaking, so a mismatch is not necessarily a
// regression. Replays are seeded and therefore repeatable.

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::board::BoardSnapshot;
use crate::bot::{Bot, SessionMemory};
use crate::config::Config;
use crate::debug_logger::TickLogEntry;
use crate::rng::SeededRandom;
use crate::types::{Action, Direction};

/// Result of replaying a single tick
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub tick: u64,
    pub original_action: Action,
    pub replayed_action: Action,
    pub matches: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_ticks: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub exits: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    bot: Bot,
    seed: u64,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, seed: u64, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            seed,
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<TickLogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: TickLogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays one entry against the given session state
    fn replay_with(
        &self,
        entry: &TickLogEntry,
        memory: &mut SessionMemory,
        rng: &mut SeededRandom,
    ) -> Result<ReplayResult, String> {
        let original_action: Action = entry.action.parse()?;
        let board = BoardSnapshot::parse(&entry.board)
            .map_err(|e| format!("Tick {}: {}", entry.tick, e))?;

        let start_time = Instant::now();
        let replayed_action = self.bot.decide(&board, memory, rng);
        let computation_time_us = start_time.elapsed().as_micros();

        let matches = original_action == replayed_action;
        if self.verbose {
            if matches {
                info!("Tick {}: ✓ MATCH - {}", entry.tick, replayed_action);
            } else {
                warn!(
                    "Tick {}: ✗ MISMATCH - Original: {}, Replayed: {}",
                    entry.tick, original_action, replayed_action
                );
            }
        }

        Ok(ReplayResult {
            tick: entry.tick,
            original_action,
            replayed_action,
            matches,
            computation_time_us,
        })
    }

    /// Replays a single tick with empty session memory
    pub fn replay_entry(&self, entry: &TickLogEntry) -> Result<ReplayResult, String> {
        let mut memory = self.bot.new_memory();
        let mut rng = SeededRandom::from_seed(self.seed);
        self.replay_with(entry, &mut memory, &mut rng)
    }

    /// Replays all entries in order, carrying session memory across ticks
    /// the way a live run does
    pub fn replay_all(&self, entries: &[TickLogEntry]) -> Vec<ReplayResult> {
        let mut memory = self.bot.new_memory();
        let mut rng = SeededRandom::from_seed(self.seed);
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_with(entry, &mut memory, &mut rng) {
                Ok(result) => results.push(result),
                Err(e) => warn!("Failed to replay tick {}: {}", entry.tick, e),
            }
        }

        results
    }

    /// Replays specific ticks, each with empty session memory
    pub fn replay_ticks(
        &self,
        entries: &[TickLogEntry],
        ticks: &[u64],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for tick in ticks {
            let entry = entries
                .iter()
                .find(|e| e.tick == *tick)
                .ok_or_else(|| format!("Tick {} not found in log file", tick))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => warn!("Failed to replay tick {}: {}", tick, e),
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_ticks = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let exits = results
            .iter()
            .filter(|r| r.replayed_action.exit_requested)
            .count();
        let match_rate = if total_ticks > 0 {
            (matches as f64 / total_ticks as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_ticks,
            matches,
            mismatches: total_ticks - matches,
            exits,
            match_rate,
        }
    }

    /// Validates that the recorded actions at given ticks are among the acceptable ones
    pub fn validate_expected_moves(
        &self,
        entries: &[TickLogEntry],
        expected: &[(u64, Vec<Direction>)],
    ) -> Result<(), String> {
        for (tick, acceptable) in expected {
            let entry = entries
                .iter()
                .find(|e| e.tick == *tick)
                .ok_or_else(|| format!("Tick {} not found in log", tick))?;

            let actual: Action = entry.action.parse()?;

            if !acceptable.contains(&actual.direction) {
                return Err(format!(
                    "Tick {}: Expected one of {:?}, but got {}",
                    tick,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual
                ));
            }
        }

        Ok(())
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Ticks:    {}", stats.total_ticks);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("Exits:          {}", stats.exits);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Decision Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Tick {}: {} → {}",
                    result.tick, result.original_action, result.replayed_action
                );
            }
            println!();
        }
    }
}
