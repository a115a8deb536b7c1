// Debug logging module for asynchronous tick logging
//
// This module provides fire-and-forget logging to avoid blocking the
// per-frame decision; a background task does the file writes. Each tick's board and answer is written to a JSONL file.

use log::error;
use serde::{Deserialize, Serialize};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Represents a single debug log entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TickLogEntry {
    pub tick: u64,
    /// Raw board string with the protocol prefix removed
    pub board: String,
    /// Outbound wire token
    pub action: String,
    pub timestamp: String,
}

/// Debug logger handle
/// Entries go through one channel to a single writer task, so lines land in
/// the order `log_tick` was called.
pub struct DebugLogger {
    sender: Option<mpsc::UnboundedSender<TickLogEntry>>,
    writer: Option<JoinHandle<()>>,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                let (sender, receiver) = mpsc::unbounded_channel();
                let writer = tokio::spawn(Self::write_entries(file, receiver));
                DebugLogger {
                    sender: Some(sender),
                    writer: Some(writer),
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            sender: None,
            writer: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Queues one tick for writing (fire-and-forget)
    pub fn log_tick(&self, tick: u64, board: &str, action: &str) {
        let sender = match &self.sender {
            Some(sender) => sender,
            None => return,
        };

        let entry = TickLogEntry {
            tick,
            board: board.to_string(),
            action: action.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        if sender.send(entry).is_err() {
            error!("Debug log writer is gone, dropping tick {}", tick);
        }
    }

    /// Stops accepting entries and waits until everything queued is on disk
    pub async fn close(mut self) {
        self.sender.take();
        if let Some(writer) = self.writer.take() {
            if let Err(e) = writer.await {
                error!("Debug log writer failed: {}", e);
            }
        }
    }

    /// Writer task: drains the channel until every sender is dropped
    async fn write_entries(mut file: File, mut receiver: mpsc::UnboundedReceiver<TickLogEntry>) {
        while let Some(entry) = receiver.recv().await {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
