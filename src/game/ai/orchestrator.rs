//! Engine orchestration
//!
//! Owns the engine handle for the lifetime of the session controller and
//! serialises every query through a single in-flight flag. The session
//! checks [`EngineOrchestrator::is_busy`] before accepting any input that
//! could mutate the board.
//!
//! # Degraded Mode
//!
//! When the engine cannot be launched, or dies mid-game, the orchestrator
//! drops the handle and keeps answering `None`. The session keeps running
//! without opponent moves or evaluations instead of terminating.

use super::uci::{Analysis, EngineBackend, EngineError, UciEngine};
use super::{EngineStrength, SearchLimit};
use shakmaty::{Chess, Move};
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, warn};

/// Counters for engine activity
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EngineStatistics {
    pub replies: u32,
    pub analyses: u32,
    pub failures: u32,
    /// Wall-clock seconds spent in the most recent query
    pub last_query_secs: f32,
}

impl std::fmt::Display for EngineStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} replies, {} analyses, {} failures (last query {:.2}s)",
            self.replies, self.analyses, self.failures, self.last_query_secs
        )
    }
}

/// Single owner of the engine connection
pub struct EngineOrchestrator {
    backend: Option<Box<dyn EngineBackend>>,
    in_flight: bool,
    stats: EngineStatistics,
}

impl EngineOrchestrator {
    /// Launch a UCI engine, degrading to no engine on failure
    pub fn launch(path: &Path) -> Self {
        match UciEngine::launch(path) {
            Ok(engine) => {
                info!(
                    "[AI] STATUS: {} CONNECTED & OPERATIONAL",
                    engine.id().name.as_deref().unwrap_or("ENGINE")
                );
                Self::with_backend(Box::new(engine))
            }
            Err(e) => {
                error!("[AI] Engine not found at {:?}: {}", path, e);
                warn!("[AI] Continuing without engine: no opponent moves, no evaluations");
                Self::disconnected()
            }
        }
    }

    pub fn with_backend(backend: Box<dyn EngineBackend>) -> Self {
        Self {
            backend: Some(backend),
            in_flight: false,
            stats: EngineStatistics::default(),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            backend: None,
            in_flight: false,
            stats: EngineStatistics::default(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Whether a query is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn stats(&self) -> &EngineStatistics {
        &self.stats
    }

    /// Push strength options for a new game
    pub fn configure(&mut self, strength: &EngineStrength) -> bool {
        info!("[AI] Configuring engine: {}", strength.description());
        self.query("configure", |backend| backend.configure(strength))
            .is_some()
    }

    /// Blocking best-move query at the reply budget
    pub fn best_move(&mut self, position: &Chess) -> Option<Move> {
        let mv = self.query("best_move", |backend| {
            backend.best_move(position, SearchLimit::REPLY)
        })?;
        self.stats.replies += 1;
        Some(mv)
    }

    /// Blocking analysis query
    pub fn analyse(&mut self, position: &Chess, limit: SearchLimit) -> Option<Analysis> {
        let analysis = self.query("analyse", |backend| backend.analyse(position, limit))?;
        self.stats.analyses += 1;
        Some(analysis)
    }

    /// Run one query with the in-flight flag raised
    ///
    /// Engine failures are logged and the handle dropped; the session
    /// continues in degraded mode.
    fn query<T>(
        &mut self,
        kind: &str,
        run: impl FnOnce(&mut Box<dyn EngineBackend>) -> Result<T, EngineError>,
    ) -> Option<T> {
        if self.in_flight {
            warn!("[AI] Refusing {} while another query is outstanding", kind);
            return None;
        }
        let backend = self.backend.as_mut()?;

        self.in_flight = true;
        let start = Instant::now();
        let result = run(backend);
        self.stats.last_query_secs = start.elapsed().as_secs_f32();
        self.in_flight = false;

        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.stats.failures += 1;
                error!("[AI] Engine {} failed: {}", kind, e);
                error!("[AI] Dropping engine connection; game continues without engine");
                self.backend = None;
                None
            }
        }
    }
}

impl std::fmt::Debug for EngineOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineOrchestrator")
            .field("available", &self.is_available())
            .field("in_flight", &self.in_flight)
            .field("stats", &self.stats)
            .finish()
    }
}
