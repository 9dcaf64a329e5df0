//! Move execution shared by the human and engine paths
//!
//! Both sides apply moves through [`execute_move`], so SAN, capture
//! bookkeeping, hint clearing and the post-move evaluation happen exactly
//! once per move no matter who played it.

use crate::game::ai::{EngineOrchestrator, SearchLimit};
use crate::game::resources::{
    white_relative, CapturedPieces, EvalTracker, HintGuard, LegalMoveSet, MoveHistory, MoveQuality,
    RepetitionTracker,
};
use shakmaty::san::SanPlus;
use shakmaty::{CastlingMode, Chess, Move, Piece, Position};
use tracing::{debug, info};

/// Mutable borrows of everything a move touches
pub struct MoveContext<'a> {
    pub board: &'a mut Chess,
    pub legal: &'a mut LegalMoveSet,
    pub history: &'a mut MoveHistory,
    pub captured: &'a mut CapturedPieces,
    pub repetitions: &'a mut RepetitionTracker,
    pub hints: &'a mut HintGuard,
    pub eval: &'a mut EvalTracker,
    pub engine: &'a mut EngineOrchestrator,
}

/// Core function to execute a validated move
///
/// Handles:
/// 1. SAN, computed on the pre-move position
/// 2. Capture bookkeeping (en passant included, castling excluded)
/// 3. Applying the move and refreshing the legal-move set
/// 4. History append, repetition count and hint clearing
/// 5. One evaluation update
///
/// Returns the SAN of the move.
pub fn execute_move(origin: &str, ctx: &mut MoveContext<'_>, mv: &Move) -> String {
    let mover = ctx.board.turn();
    let san = SanPlus::from_move(ctx.board.clone(), mv).to_string();

    if let Some(role) = mv.capture() {
        ctx.captured.add_capture(Piece { color: !mover, role });
    }

    ctx.board.play_unchecked(mv);
    *ctx.legal = LegalMoveSet::from_position(ctx.board);
    ctx.history.add_move(san.clone());
    ctx.repetitions.record(ctx.board);
    ctx.hints.clear_hint();

    debug!(
        "[MOVE] {}: {:?} {} ({}){}",
        origin,
        mover,
        san,
        mv.to_uci(CastlingMode::Standard),
        if mv.is_capture() { " (capture)" } else { "" }
    );

    evaluate_position(ctx.engine, ctx.board, ctx.eval);
    san
}

/// Score the current position and grade the move that led to it
///
/// Without an engine the tracker is left untouched.
pub fn evaluate_position(
    engine: &mut EngineOrchestrator,
    board: &Chess,
    eval: &mut EvalTracker,
) -> Option<MoveQuality> {
    let analysis = engine.analyse(board, SearchLimit::EVALUATION)?;
    let score = white_relative(analysis.score, board.turn());
    let quality = eval.update(score);
    info!(
        "[EVAL] {} (delta {:.2}){}",
        eval.display_score(),
        eval.delta(),
        quality.label().map(|l| format!(" {}", l)).unwrap_or_default()
    );
    Some(quality)
}
