use bot_core::{legal_moves, move_to_uci, set_position_from_uci, validate_play, Board, Engine};
use move_predictor::{PolicyPredictor, PredictError};
use predictor_engine::{EngineFactory, PredictorEngine};
use random_engine::RandomEngine;
use std::io::{self, Write};
use tracing::{debug, error, info, warn};

/// Whether the command loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives one predictor engine over the UCI protocol.
///
/// A bad reply from the predictor never reaches the GUI: it is logged and a
/// random legal move is sent instead.
pub struct UciHost {
    factory: EngineFactory,
    engine: PredictorEngine<PolicyPredictor>,
    fallback: RandomEngine,
    /// `None` after a `position` command that could not be applied.
    board: Option<Board>,
}

impl UciHost {
    pub fn new(mut factory: EngineFactory) -> Result<Self, PredictError> {
        let engine = factory.build()?;
        Ok(Self {
            factory,
            engine,
            fallback: RandomEngine::new(),
            board: Some(Board::default()),
        })
    }

    /// Use a seeded fallback so tests are reproducible.
    pub fn with_fallback(mut self, fallback: RandomEngine) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn engine(&self) -> &PredictorEngine<PolicyPredictor> {
        &self.engine
    }

    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = parts.split_first() else {
            return Ok(Flow::Continue);
        };

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author ML-chess")?;
                writeln!(
                    out,
                    "option name Stochastic type check default {}",
                    self.engine.stochastic()
                )?;
                writeln!(
                    out,
                    "option name Temperature type string default {}",
                    self.engine.predictor().temperature()
                )?;
                writeln!(out, "uciok")?;
                out.flush()?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
                out.flush()?;
            }
            "setoption" => self.set_option(args),
            "ucinewgame" => {
                match self.factory.build() {
                    Ok(engine) => self.engine = engine,
                    Err(e) => error!(error = %e, "could not build engine for new game"),
                }
                self.board = Some(Board::default());
            }
            "position" => match set_position_from_uci(args) {
                Ok(board) => self.board = Some(board),
                Err(e) => {
                    warn!(error = %e, "rejected position command, no move until the next one");
                    self.board = None;
                }
            },
            "go" => {
                // Time controls are the GUI's business; the predictor answers at once.
                let reply = self.choose_move().unwrap_or_else(|| "0000".to_string());
                writeln!(out, "bestmove {}", reply)?;
                out.flush()?;
            }
            "quit" => return Ok(Flow::Quit),
            _ => debug!(command = cmd, "ignoring unknown command"),
        }
        Ok(Flow::Continue)
    }

    fn set_option(&mut self, args: &[&str]) {
        // setoption name <id> value <x>
        let name_at = args.iter().position(|&a| a == "name");
        let value_at = args.iter().position(|&a| a == "value");
        let (Some(n), Some(v)) = (name_at, value_at) else {
            warn!(?args, "malformed setoption");
            return;
        };
        if n + 1 >= v {
            warn!(?args, "malformed setoption");
            return;
        }
        let name = args[n + 1..v].join(" ");
        let value = args[v + 1..].join(" ");

        match name.to_lowercase().as_str() {
            "stochastic" => match value.parse::<bool>() {
                Ok(on) => {
                    self.engine.set_stochastic(on);
                    self.factory.config_mut().engine.stochastic = on;
                    info!(stochastic = on, "option set");
                }
                Err(_) => warn!(%value, "Stochastic expects true or false"),
            },
            "temperature" => match value.parse::<f32>() {
                Ok(t) => match self.engine.predictor_mut().set_temperature(t) {
                    Ok(()) => {
                        self.factory.config_mut().predictor.temperature = t;
                        info!(temperature = t, "option set");
                    }
                    Err(e) => warn!(error = %e, "rejected Temperature"),
                },
                Err(_) => warn!(%value, "Temperature expects a number"),
            },
            _ => debug!(option = %name, "unknown option"),
        }
    }

    /// The predictor's move if it is legal here, else a random legal move.
    fn choose_move(&mut self) -> Option<String> {
        let Some(board) = self.board.as_ref() else {
            warn!("go without a valid position");
            return None;
        };
        if legal_moves(board).is_empty() {
            return None;
        }

        match self.engine.search(board) {
            Ok(reply) => match validate_play(board, &reply) {
                Ok(mv) => return Some(move_to_uci(board, mv)),
                Err(e) => warn!(error = %e, "predictor move rejected"),
            },
            Err(e) => error!(error = %e, "predictor engine failed"),
        }

        match self.fallback.search(board) {
            Ok(reply) => {
                warn!(mv = %reply.best_move, "playing fallback move");
                Some(reply.best_move)
            }
            Err(e) => {
                error!(error = %e, "fallback engine failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod host_tests;
