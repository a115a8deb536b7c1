// Per-frame protocol handling
//
// The control loop owns everything that lives for the whole run: the bot, its
// session memory and the random source. The transport hands it one inbound
// frame at a time and sends back whatever it returns before reading the next.

use log::{error, info, warn};

use crate::board::BoardSnapshot;
use crate::bot::{Bot, SessionMemory};
use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    Terminated,
}

pub struct ControlLoop {
    bot: Bot,
    memory: SessionMemory,
    rng: Box<dyn RandomSource + Send>,
    debug_logger: DebugLogger,
    response_prefix: String,
    state: SessionState,
    ticks: u64,
}

impl ControlLoop {
    pub fn new(
        config: Config,
        rng: Box<dyn RandomSource + Send>,
        debug_logger: DebugLogger,
    ) -> Self {
        let response_prefix = config.connection.response_prefix.clone();
        let bot = Bot::new(config);
        let memory = bot.new_memory();

        ControlLoop {
            bot,
            memory,
            rng,
            debug_logger,
            response_prefix,
            state: SessionState::Connected,
            ticks: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of frames answered so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn memory(&self) -> &SessionMemory {
        &self.memory
    }

    /// Handles one inbound frame and returns the outbound token to send.
    ///
    /// A frame without the board prefix terminates the session; from then on
    /// every frame is ignored.
    pub fn handle_frame(&mut self, frame: &str) -> Option<String> {
        if self.state == SessionState::Terminated {
            return None;
        }

        let raw_board = match frame.strip_prefix(self.response_prefix.as_str()) {
            Some(raw) => raw,
            None => {
                error!(
                    "Something strange is happening on the server... Response:\n{}",
                    frame
                );
                self.state = SessionState::Terminated;
                return None;
            }
        };

        let board = match BoardSnapshot::parse(raw_board) {
            Ok(board) => board,
            Err(e) => {
                error!("Skipping unreadable board: {}", e);
                return None;
            }
        };

        let action = self.bot.decide(&board, &mut self.memory, self.rng.as_mut());
        let token = action.to_string();

        info!("Tick {}: Chose {}", self.ticks, token);
        self.debug_logger.log_tick(self.ticks, raw_board, &token);
        self.ticks += 1;

        Some(token)
    }

    /// Flushes the debug log; call once the session is over
    pub async fn close(self) {
        self.debug_logger.close().await;
    }

    /// Stops answering frames; the transport closes the connection afterwards
    pub fn request_exit(&mut self) {
        if self.state == SessionState::Connected {
            warn!("Exit requested after {} ticks", self.ticks);
        }
        self.state = SessionState::Terminated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedRandom;

    fn control_loop() -> ControlLoop {
        ControlLoop::new(
            Config::default_hardcoded(),
            Box::new(FixedRandom(0)),
            DebugLogger::disabled(),
        )
    }

    #[test]
    fn test_answers_board_frames() {
        let mut control = control_loop();
        let frame = format!("board={}", ["☼☼☼☼", "☼$ ☼", "☼▲ ☼", "☼☼☼☼"].concat());

        assert_eq!(control.handle_frame(&frame), Some("UP".to_string()));
        assert_eq!(control.ticks(), 1);
        assert_eq!(control.state(), SessionState::Connected);
    }

    #[test]
    fn test_missing_prefix_terminates() {
        let mut control = control_loop();
        assert_eq!(control.handle_frame("hello"), None);
        assert_eq!(control.state(), SessionState::Terminated);

        let frame = format!("board={}", ["☼☼☼☼", "☼$ ☼", "☼▲ ☼", "☼☼☼☼"].concat());
        assert_eq!(control.handle_frame(&frame), None);
        assert_eq!(control.ticks(), 0);
    }

    #[test]
    fn test_unreadable_board_is_skipped() {
        let mut control = control_loop();
        assert_eq!(control.handle_frame("board=☼☼☼"), None);
        assert_eq!(control.state(), SessionState::Connected);
    }

    #[test]
    fn test_request_exit_stops_answers() {
        let mut control = control_loop();
        control.request_exit();
        assert_eq!(control.state(), SessionState::Terminated);
        let frame = format!("board={}", ["☼☼☼☼", "☼$ ☼", "☼▲ ☼", "☼☼☼☼"].concat());
        assert_eq!(control.handle_frame(&frame), None);
    }
}
