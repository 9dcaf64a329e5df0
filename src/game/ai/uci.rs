//! UCI engine transport
//!
//! Talks to an external engine process over the line-based UCI protocol.
//! Every call blocks the caller until the engine answers; there is no
//! background search and no cancellation. Engine output is read on its own
//! thread and handed over through a channel, so every wait has a deadline:
//! [`HANDSHAKE_TIMEOUT`] for `uciok`/`readyok`, and the search budget plus
//! [`SEARCH_GRACE`] for `bestmove`. A missed deadline is
//! [`EngineError::Timeout`].
//!
//! # Protocol Flow
//!
//! ```text
//! launch     -> uci ... uciok
//! configure  -> setoption ...; ucinewgame; isready ... readyok
//! best_move  -> position fen F; go movetime T ... bestmove M
//! analyse    -> position fen F; go movetime T ... info score .. pv ..; bestmove M
//! quit       -> quit
//! ```

use crate::game::ai::{EngineStrength, SearchLimit};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
use shakmaty::fen::Fen;
use shakmaty::uci::Uci;
use shakmaty::{Chess, EnPassantMode, Move, Position};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Longest wait for `uciok` and `readyok`
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Extra time allowed past `movetime` before a search counts as hung
pub const SEARCH_GRACE: Duration = Duration::from_secs(5);

/// Errors raised by the engine transport
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine process could not be started
    #[error("Failed to launch engine '{path}': {source}")]
    Launch {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to the engine failed
    #[error("Engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine closed its output stream
    #[error("Engine closed the connection")]
    Closed,

    /// The engine did not answer before the deadline
    #[error("Engine did not send '{expected}' in time")]
    Timeout { expected: &'static str },

    /// The engine produced something we could not interpret
    #[error("Engine protocol error: {message}")]
    Protocol { message: String },

    /// The engine answered with a move that is illegal in the position
    #[error("Engine returned illegal move '{uci}'")]
    IllegalMove { uci: String },
}

/// Raw engine score, relative to the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineScore {
    /// Centipawns
    Cp(i32),
    /// Mate in N moves; negative when the side to move is getting mated
    Mate(i32),
}

/// Result of an `analyse` query
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub score: EngineScore,
    /// Principal variation, first move playable in the analysed position
    pub pv: Vec<Move>,
}

/// Operations the session needs from an engine
///
/// The UCI process implements this; tests substitute scripted engines.
pub trait EngineBackend {
    /// Push strength options and start a new game
    fn configure(&mut self, strength: &EngineStrength) -> Result<(), EngineError>;

    /// Best move for the side to move
    fn best_move(&mut self, position: &Chess, limit: SearchLimit) -> Result<Move, EngineError>;

    /// Score and principal variation of the position
    fn analyse(&mut self, position: &Chess, limit: SearchLimit) -> Result<Analysis, EngineError>;
}

/// Engine identity reported in the `uci` handshake
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineId {
    pub name: Option<String>,
    pub author: Option<String>,
}

/// A UCI engine running as a child process
pub struct UciEngine {
    child: Child,
    stdin: BufWriter<ChildStdin>,
    lines: Receiver<String>,
    id: EngineId,
}

/// Forward engine output lines into a channel until EOF
fn spawn_reader(stdout: ChildStdout) -> Result<Receiver<String>, EngineError> {
    let (tx, rx) = unbounded();
    thread::Builder::new()
        .name("uci-reader".to_string())
        .spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

impl UciEngine {
    /// Spawn the engine and complete the `uci` handshake
    pub fn launch(path: &Path) -> Result<Self, EngineError> {
        Self::launch_with_timeout(path, HANDSHAKE_TIMEOUT)
    }

    /// Like [`UciEngine::launch`] with a custom handshake deadline
    pub fn launch_with_timeout(path: &Path, handshake: Duration) -> Result<Self, EngineError> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EngineError::Launch {
                path: path.display().to_string(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| EngineError::Protocol {
            message: "engine stdin unavailable".to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| EngineError::Protocol {
            message: "engine stdout unavailable".to_string(),
        })?;

        let mut engine = Self {
            child,
            stdin: BufWriter::new(stdin),
            lines: spawn_reader(stdout)?,
            id: EngineId::default(),
        };

        engine.send("uci")?;
        let deadline = Instant::now() + handshake;
        loop {
            let line = engine.read_line("uciok", deadline)?;
            if let Some(name) = line.strip_prefix("id name ") {
                engine.id.name = Some(name.trim().to_string());
            } else if let Some(author) = line.strip_prefix("id author ") {
                engine.id.author = Some(author.trim().to_string());
            } else if line.trim() == "uciok" {
                break;
            }
        }

        info!(
            "[AI] ENGINE: {} | AUTHOR: {}",
            engine.id.name.as_deref().unwrap_or("Stockfish"),
            engine.id.author.as_deref().unwrap_or("Unknown")
        );
        Ok(engine)
    }

    pub fn id(&self) -> &EngineId {
        &self.id
    }

    fn send(&mut self, command: &str) -> Result<(), EngineError> {
        debug!("[AI] >> {}", command);
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Next output line, failing once `deadline` passes
    fn read_line(&mut self, expected: &'static str, deadline: Instant) -> Result<String, EngineError> {
        match self.lines.recv_deadline(deadline) {
            Ok(line) => {
                let line = line.trim_end().to_string();
                debug!("[AI] << {}", line);
                Ok(line)
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!("[AI] Timed out waiting for '{}'", expected);
                Err(EngineError::Timeout { expected })
            }
            Err(RecvTimeoutError::Disconnected) => Err(EngineError::Closed),
        }
    }

    fn wait_ready(&mut self) -> Result<(), EngineError> {
        self.send("isready")?;
        let deadline = Instant::now() + HANDSHAKE_TIMEOUT;
        while self.read_line("readyok", deadline)?.trim() != "readyok" {}
        Ok(())
    }

    /// Send the position and a time-limited `go`, collecting output
    /// until `bestmove`
    fn search(&mut self, position: &Chess, limit: SearchLimit) -> Result<SearchOutput, EngineError> {
        let fen = Fen::from_position(position.clone(), EnPassantMode::Legal);
        self.send(&format!("position fen {fen}"))?;
        self.send(&format!("go movetime {}", limit.millis()))?;

        let deadline = Instant::now() + limit.movetime + SEARCH_GRACE;
        let mut output = SearchOutput::default();
        loop {
            let line = self.read_line("bestmove", deadline)?;
            if line.starts_with("info") {
                if let Some(info) = parse_info_line(&line) {
                    output.last_info = Some(info);
                }
            } else if line.starts_with("bestmove") {
                output.bestmove = parse_bestmove_line(&line);
                return Ok(output);
            }
        }
    }
}

impl EngineBackend for UciEngine {
    fn configure(&mut self, strength: &EngineStrength) -> Result<(), EngineError> {
        for (name, value) in strength.uci_options() {
            self.send(&format!("setoption name {name} value {value}"))?;
        }
        self.send("ucinewgame")?;
        self.wait_ready()
    }

    fn best_move(&mut self, position: &Chess, limit: SearchLimit) -> Result<Move, EngineError> {
        let output = self.search(position, limit)?;
        let uci = output.bestmove.ok_or_else(|| EngineError::Protocol {
            message: "engine returned no best move".to_string(),
        })?;
        uci_to_move(position, &uci)
    }

    fn analyse(&mut self, position: &Chess, limit: SearchLimit) -> Result<Analysis, EngineError> {
        let output = self.search(position, limit)?;
        let info = output.last_info.ok_or_else(|| EngineError::Protocol {
            message: "engine reported no score".to_string(),
        })?;
        Ok(Analysis {
            score: info.score,
            pv: pv_to_moves(position, &info.pv),
        })
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        if let Err(e) = self.send("quit") {
            warn!("[AI] Failed to send quit to engine: {}", e);
        }
        // Already-exited engines make kill fail; only the reap matters.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[derive(Debug, Default)]
struct SearchOutput {
    last_info: Option<InfoLine>,
    bestmove: Option<String>,
}

/// The parts of an `info` line the session uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoLine {
    pub score: EngineScore,
    pub pv: Vec<String>,
}

/// Parse an `info` line, returning `None` when it carries no score
pub fn parse_info_line(line: &str) -> Option<InfoLine> {
    let mut tokens = line.split_whitespace();
    if tokens.next()? != "info" {
        return None;
    }

    let mut score = None;
    let mut pv = Vec::new();
    while let Some(token) = tokens.next() {
        match token {
            "score" => {
                let kind = tokens.next()?;
                let value: i32 = tokens.next()?.parse().ok()?;
                score = match kind {
                    "cp" => Some(EngineScore::Cp(value)),
                    "mate" => Some(EngineScore::Mate(value)),
                    _ => None,
                };
            }
            // pv runs to the end of the line
            "pv" => {
                pv.extend(tokens.by_ref().map(str::to_string));
            }
            // free text, nothing after it is structured
            "string" => break,
            _ => {}
        }
    }

    score.map(|score| InfoLine { score, pv })
}

/// Extract the move from a `bestmove` line; `None` for `(none)`
pub fn parse_bestmove_line(line: &str) -> Option<String> {
    let mut tokens = line.split_whitespace();
    if tokens.next()? != "bestmove" {
        return None;
    }
    match tokens.next()? {
        "(none)" | "0000" => None,
        mv => Some(mv.to_string()),
    }
}

/// Resolve a UCI move string against a position
pub fn uci_to_move(position: &Chess, uci: &str) -> Result<Move, EngineError> {
    let parsed: Uci = uci.parse().map_err(|_| EngineError::Protocol {
        message: format!("unparseable move '{uci}'"),
    })?;
    parsed
        .to_move(position)
        .map_err(|_| EngineError::IllegalMove { uci: uci.to_string() })
}

/// Convert a principal variation, stopping at the first move that does not
/// apply
fn pv_to_moves(position: &Chess, pv: &[String]) -> Vec<Move> {
    let mut board = position.clone();
    let mut moves = Vec::with_capacity(pv.len());
    for uci in pv {
        let Ok(mv) = uci_to_move(&board, uci) else {
            break;
        };
        board.play_unchecked(&mv);
        moves.push(mv);
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Square;

    #[test]
    fn test_parse_info_with_cp_and_pv() {
        //! Typical search output yields score and principal variation
        let info = parse_info_line(
            "info depth 12 seldepth 15 multipv 1 score cp 34 nodes 12345 nps 500000 pv e2e4 e7e5 g1f3",
        )
        .unwrap();
        assert_eq!(info.score, EngineScore::Cp(34));
        assert_eq!(info.pv, vec!["e2e4", "e7e5", "g1f3"]);
    }

    #[test]
    fn test_parse_info_with_mate_and_bound() {
        //! Mate scores and bound markers are understood
        let info = parse_info_line("info depth 5 score mate -2 upperbound pv h7h8").unwrap();
        assert_eq!(info.score, EngineScore::Mate(-2));
    }

    #[test]
    fn test_parse_info_without_score() {
        //! Progress lines without a score are skipped
        assert!(parse_info_line("info depth 3 currmove e2e4 currmovenumber 1").is_none());
        assert!(parse_info_line("info string NNUE evaluation enabled").is_none());
    }

    #[test]
    fn test_parse_bestmove() {
        //! bestmove lines with ponder suffix and terminal positions
        assert_eq!(parse_bestmove_line("bestmove e2e4 ponder e7e5").as_deref(), Some("e2e4"));
        assert_eq!(parse_bestmove_line("bestmove (none)"), None);
        assert_eq!(parse_bestmove_line("readyok"), None);
    }

    #[test]
    fn test_uci_to_move_legal_and_illegal() {
        //! Engine moves are validated against the position
        let board = Chess::default();
        let mv = uci_to_move(&board, "g1f3").unwrap();
        assert_eq!(mv.from(), Some(Square::G1));
        assert_eq!(mv.to(), Square::F3);

        assert!(matches!(
            uci_to_move(&board, "e2e5"),
            Err(EngineError::IllegalMove { .. })
        ));
        assert!(matches!(
            uci_to_move(&board, "zz"),
            Err(EngineError::Protocol { .. })
        ));
    }

    #[test]
    fn test_pv_stops_at_illegal_move() {
        //! A corrupt tail in the PV is dropped, the playable prefix kept
        let board = Chess::default();
        let pv = vec!["e2e4".to_string(), "e7e5".to_string(), "e1e3".to_string()];
        let moves = pv_to_moves(&board, &pv);
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn test_silent_engine_times_out() {
        //! A process that never answers `uci` fails the handshake in time
        //!
        //! `cat` echoes the command back but never sends `uciok`.
        let started = Instant::now();
        let result = UciEngine::launch_with_timeout(Path::new("cat"), Duration::from_millis(300));
        assert!(matches!(
            result,
            Err(EngineError::Timeout { expected: "uciok" })
        ));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_launch_missing_engine_fails() {
        //! A missing executable is reported, not panicked on
        let result = UciEngine::launch(Path::new("/definitely/not/an/engine"));
        assert!(matches!(result, Err(EngineError::Launch { .. })));
    }
}
