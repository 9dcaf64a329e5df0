//! Game session controller
//!
//! [`Session`] is the aggregate root of one interactive game against the
//! engine. It owns the configuration, the engine handle and every per-game
//! resource, and routes pointer input by phase:
//!
//! - `Menu`: menu buttons adjust [`GameSettings`]; Start begins a game
//! - `Playing`: board clicks run the two-click protocol, sidebar buttons
//!   trigger Home, Hint and PGN export; once the game is over only the
//!   "back to menu" overlay responds
//! - `Promoting`: only the four promotion choices respond
//!
//! # Frame Contract
//!
//! The driver calls [`Session::advance_frame`] once per frame with the
//! wall-clock delta, renders, and then calls
//! [`Session::play_engine_reply`] when [`Session::engine_reply_due`] holds.
//! The whole reply call is charged to the engine's clock inside the call:
//! the search and the evaluation of the resulting position. The driver
//! must not charge it again through the next frame delta. The evaluation
//! after a human move runs while the engine is to move, so it reaches the
//! engine's clock through the next frame delta. Both sides' evaluations
//! are therefore paid by the engine, never by the human.
//!
//! # Anti-Cheat
//!
//! The fourth hint request forfeits the game. From then on the board,
//! hints and clock refuse to change; only returning to the menu works.

use crate::core::{GameSettings, GameState};
use crate::game::ai::{EngineOrchestrator, SearchLimit};
use crate::game::error::{GameError, GameResult};
use crate::game::export::{write_pgn, PgnHeaders};
use crate::game::resources::{
    CapturedPieces, EvalTracker, GameClock, GameStatus, HintGuard, LegalMoveSet, MoveHistory,
    PendingPromotion, RepetitionTracker, Selection,
};
use crate::game::systems::{
    check_square, derive_status, execute_move, handle_square_click, resolve_promotion,
    update_game_clock, MoveContext, SquareClick,
};
use crate::input::{
    control_at, menu_action_at, promotion_choice_at, BoardGeometry, ControlButton, MenuAction,
    Point, BACK_TO_MENU,
};
use shakmaty::{Chess, Color, Move, Position, Role, Square};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What a click did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    MenuChanged(MenuAction),
    Started,
    ReturnedHome,
    Selected(Square),
    Deselected,
    /// A move was executed; carries its SAN
    Moved(String),
    PromotionPending,
    Hint(HintOutcome),
    Exported(PathBuf),
    ExportFailed(String),
}

/// Result of a hint request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// Not the human's turn, game over, or already forfeited
    Refused,
    /// Within budget; the engine suggested this move
    Suggested(Move),
    /// Within budget but no engine answer
    Unavailable,
    /// This request exceeded the budget
    Forfeited,
}

/// One interactive game session
#[derive(Debug)]
pub struct Session {
    settings: GameSettings,
    state: GameState,
    geometry: BoardGeometry,
    board: Chess,
    legal: LegalMoveSet,
    selection: Selection,
    promotion: PendingPromotion,
    history: MoveHistory,
    captured: CapturedPieces,
    repetitions: RepetitionTracker,
    clock: GameClock,
    eval: EvalTracker,
    hints: HintGuard,
    engine: EngineOrchestrator,
}

impl Session {
    /// New session in the menu
    pub fn new(settings: GameSettings, engine: EngineOrchestrator) -> Self {
        let board = Chess::default();
        Self {
            clock: GameClock::new(settings.time_control_secs),
            settings,
            state: GameState::Menu,
            geometry: BoardGeometry::default(),
            legal: LegalMoveSet::from_position(&board),
            repetitions: RepetitionTracker::new(&board),
            board,
            selection: Selection::default(),
            promotion: PendingPromotion::default(),
            history: MoveHistory::default(),
            captured: CapturedPieces::default(),
            eval: EvalTracker::default(),
            hints: HintGuard::default(),
            engine,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Settings are editable only from the menu
    pub fn settings_mut(&mut self) -> Option<&mut GameSettings> {
        (self.state == GameState::Menu).then_some(&mut self.settings)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn board(&self) -> &Chess {
        &self.board
    }

    pub fn human_color(&self) -> Color {
        self.settings.human_color.into()
    }

    /// Board orientation, always the human's colour
    pub fn orientation(&self) -> Color {
        self.human_color()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn pending_promotion(&self) -> &PendingPromotion {
        &self.promotion
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn eval(&self) -> &EvalTracker {
        &self.eval
    }

    pub fn hints(&self) -> &HintGuard {
        &self.hints
    }

    pub fn hint_move(&self) -> Option<&Move> {
        self.hints.hint_move.as_ref()
    }

    pub fn engine(&self) -> &EngineOrchestrator {
        &self.engine
    }

    pub fn is_forfeited(&self) -> bool {
        self.hints.forfeited
    }

    pub fn is_human_turn(&self) -> bool {
        self.board.turn() == self.human_color()
    }

    /// Derived game status; `InProgress` in the menu
    pub fn status(&self) -> GameStatus {
        if !self.state.in_game() {
            return GameStatus::InProgress;
        }
        derive_status(
            &self.board,
            &self.clock,
            &self.hints,
            &self.repetitions,
            self.human_color(),
        )
    }

    /// King square to highlight when the side to move is in check
    pub fn check_square(&self) -> Option<Square> {
        if self.state.in_game() {
            check_square(&self.board)
        } else {
            None
        }
    }

    // ------------------------------------------------------------------
    // Phase transitions
    // ------------------------------------------------------------------

    fn transition(&mut self, next: GameState) -> GameResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(GameError::InvalidStateTransition {
                message: format!("{:?} -> {:?}", self.state, next),
            });
        }
        debug!("[SESSION] {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Start a new game from the menu
    ///
    /// Rebuilds the board, clocks and trackers from the settings and
    /// pushes the strength configuration to the engine.
    pub fn start(&mut self) -> GameResult<()> {
        self.transition(GameState::Playing)?;

        self.board = Chess::default();
        self.legal = LegalMoveSet::from_position(&self.board);
        self.selection.clear();
        self.promotion.clear();
        self.history.clear();
        self.captured.clear();
        self.repetitions.reset(&self.board);
        self.clock = GameClock::new(self.settings.time_control_secs);
        self.clock.start();
        self.eval.reset();
        self.hints.reset();

        let strength = self.settings.strength();
        if !self.engine.configure(&strength) {
            warn!("[SESSION] Engine not configured, playing without opponent replies");
        }

        info!("[SESSION] ========== NEW GAME ==========");
        info!(
            "[SESSION] Human: {:?} | Bot: {} | Time: {}s",
            self.settings.human_color,
            strength.description(),
            self.settings.time_control_secs
        );
        Ok(())
    }

    /// Abandon the game and return to the menu
    pub fn go_home(&mut self) -> GameResult<()> {
        self.transition(GameState::Menu)?;
        self.clock.stop();
        self.selection.clear();
        self.promotion.clear();
        info!("[SESSION] Returned to menu after {} moves", self.history.len());
        info!("[AI] Engine activity: {}", self.engine.stats());
        Ok(())
    }

    /// Apply a menu adjustment; ignored outside the menu
    pub fn apply_menu_action(&mut self, action: MenuAction) -> ClickOutcome {
        if action == MenuAction::Start {
            return match self.start() {
                Ok(()) => ClickOutcome::Started,
                Err(e) => {
                    debug!("[SESSION] {}", e);
                    ClickOutcome::Ignored
                }
            };
        }
        let Some(settings) = self.settings_mut() else {
            return ClickOutcome::Ignored;
        };
        match action {
            MenuAction::SelectLevel(level) => settings.select_level(level),
            MenuAction::AdjustElo(delta) => settings.adjust_elo(delta),
            MenuAction::SetColor(color) => settings.human_color = color,
            MenuAction::AdjustTime(delta) => settings.adjust_time_control(delta),
            MenuAction::CycleTheme => settings.cycle_theme(),
            MenuAction::Start => {}
        }
        debug!("[SESSION] Menu: {:?}", action);
        ClickOutcome::MenuChanged(action)
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Dispatch a pointer click by phase
    pub fn handle_click(&mut self, point: Point) -> ClickOutcome {
        match self.state {
            GameState::Menu => match menu_action_at(point) {
                Some(action) => self.apply_menu_action(action),
                None => ClickOutcome::Ignored,
            },
            GameState::Promoting => match promotion_choice_at(point) {
                Some(role) => self.choose_promotion(role),
                None => ClickOutcome::Ignored,
            },
            GameState::Playing => self.handle_playing_click(point),
        }
    }

    fn handle_playing_click(&mut self, point: Point) -> ClickOutcome {
        if self.status().is_game_over() {
            if BACK_TO_MENU.contains(point) && self.go_home().is_ok() {
                return ClickOutcome::ReturnedHome;
            }
            return ClickOutcome::Ignored;
        }

        if let Some(button) = control_at(point) {
            return match button {
                ControlButton::Home => match self.go_home() {
                    Ok(()) => ClickOutcome::ReturnedHome,
                    Err(_) => ClickOutcome::Ignored,
                },
                ControlButton::Hint => ClickOutcome::Hint(self.request_hint()),
                ControlButton::Pgn => match self.export_pgn() {
                    Ok(path) => ClickOutcome::Exported(path),
                    Err(e) => {
                        warn!("[PGN] {}", e);
                        ClickOutcome::ExportFailed(e.to_string())
                    }
                },
            };
        }

        match self.geometry.square_from_point(point, self.orientation()) {
            Some(square) => self.click_square(square),
            None => ClickOutcome::Ignored,
        }
    }

    /// Whether the human may touch the board right now
    fn board_input_allowed(&self) -> bool {
        self.state == GameState::Playing
            && !self.engine.is_busy()
            && self.is_human_turn()
            && !self.status().is_game_over()
    }

    /// Run one step of the two-click protocol on `square`
    pub fn click_square(&mut self, square: Square) -> ClickOutcome {
        if !self.board_input_allowed() {
            debug!("[INPUT] Board click on {} refused", square);
            return ClickOutcome::Ignored;
        }
        let human = self.human_color();
        let click = handle_square_click(
            &self.board,
            &self.legal,
            &mut self.selection,
            &mut self.promotion,
            human,
            square,
        );
        match click {
            SquareClick::Selected(square) => ClickOutcome::Selected(square),
            SquareClick::Deselected => ClickOutcome::Deselected,
            SquareClick::Ignored => ClickOutcome::Ignored,
            SquareClick::PromotionPending => {
                if self.transition(GameState::Promoting).is_err() {
                    self.promotion.clear();
                    return ClickOutcome::Ignored;
                }
                info!("[PROMOTION] Choose a piece: Q, R, B or N");
                ClickOutcome::PromotionPending
            }
            SquareClick::Move(mv) => ClickOutcome::Moved(self.apply_move("human", &mv)),
        }
    }

    /// Complete the pending promotion with `role`
    pub fn choose_promotion(&mut self, role: Role) -> ClickOutcome {
        if self.state != GameState::Promoting || self.engine.is_busy() {
            return ClickOutcome::Ignored;
        }
        if self.status().is_game_over() {
            // Flag fell while the dialog was open
            self.promotion.clear();
            self.state = GameState::Playing;
            return ClickOutcome::Ignored;
        }
        let Some(mv) = resolve_promotion(&mut self.promotion, &self.legal, role) else {
            return ClickOutcome::Ignored;
        };
        if let Err(e) = self.transition(GameState::Playing) {
            warn!("[PROMOTION] {}", e);
            return ClickOutcome::Ignored;
        }
        ClickOutcome::Moved(self.apply_move("human", &mv))
    }

    /// Ask the engine for a hint, counting against the budget
    pub fn request_hint(&mut self) -> HintOutcome {
        if !self.board_input_allowed() {
            return HintOutcome::Refused;
        }
        if !self.hints.try_consume() {
            self.selection.clear();
            return HintOutcome::Forfeited;
        }
        info!(
            "[HINT] Hint {} used ({} left)",
            self.hints.hints_used,
            self.hints.remaining()
        );
        let suggestion = self
            .engine
            .analyse(&self.board, SearchLimit::HINT)
            .and_then(|analysis| analysis.pv.into_iter().next());
        match suggestion {
            Some(mv) => {
                info!("[HINT] Suggested {}", mv.to_uci(shakmaty::CastlingMode::Standard));
                self.hints.hint_move = Some(mv.clone());
                HintOutcome::Suggested(mv)
            }
            None => HintOutcome::Unavailable,
        }
    }

    /// Export the current game as PGN
    pub fn export_pgn(&self) -> GameResult<PathBuf> {
        if !self.state.in_game() {
            return Err(GameError::InvalidStateTransition {
                message: "no game to export".to_string(),
            });
        }
        let headers = PgnHeaders::new(self.human_color());
        write_pgn(&self.settings.export_dir, &headers, &self.history, self.status())
    }

    // ------------------------------------------------------------------
    // Frame and engine
    // ------------------------------------------------------------------

    /// Advance the clock by `elapsed` seconds and return the status
    pub fn advance_frame(&mut self, elapsed: f32) -> GameStatus {
        let status = self.status();
        update_game_clock(
            &mut self.clock,
            self.state,
            status,
            self.board.turn(),
            elapsed,
            self.settings.freeze_clock_during_promotion,
        );
        self.status()
    }

    /// Whether the engine should move now
    pub fn engine_reply_due(&self) -> bool {
        self.state == GameState::Playing
            && !self.is_human_turn()
            && self.engine.is_available()
            && !self.engine.is_busy()
            && !self.status().is_game_over()
    }

    /// Query the engine and play its move
    ///
    /// The time spent thinking and evaluating the resulting position is
    /// charged to the engine's clock. Returns
    /// the SAN of the move, or `None` when no reply was due, the engine
    /// failed, or its flag fell while thinking.
    pub fn play_engine_reply(&mut self) -> Option<String> {
        if !self.engine_reply_due() {
            return None;
        }
        let engine_color = self.board.turn();
        let started = Instant::now();
        let reply = self.engine.best_move(&self.board);
        self.clock.tick(engine_color, started.elapsed().as_secs_f32());

        let mv = reply?;
        if self.clock.flagged().is_some() {
            info!("[AI] Reply discarded, {:?} flag fell while thinking", engine_color);
            return None;
        }
        if !self.board.is_legal(&mv) {
            warn!("[AI] Engine returned illegal move {:?}", mv);
            return None;
        }
        let evaluation_started = Instant::now();
        let san = self.apply_move("engine", &mv);
        self.clock.tick(engine_color, evaluation_started.elapsed().as_secs_f32());
        Some(san)
    }

    fn apply_move(&mut self, origin: &str, mv: &Move) -> String {
        let mut ctx = MoveContext {
            board: &mut self.board,
            legal: &mut self.legal,
            history: &mut self.history,
            captured: &mut self.captured,
            repetitions: &mut self.repetitions,
            hints: &mut self.hints,
            eval: &mut self.eval,
            engine: &mut self.engine,
        };
        let san = execute_move(origin, &mut ctx, mv);
        info!("[SESSION] {} played {}", origin, san);

        let status = self.status();
        if status.is_game_over() {
            self.clock.stop();
            info!("[GAME] ========== GAME OVER ==========");
            info!("[GAME] {}", status.message());
            info!("[AI] Engine activity: {}", self.engine.stats());
        }
        san
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerColor;
    use crate::game::ai::testing::{EngineLog, ScriptedEngine};
    use crate::game::ai::{EngineScore, EngineStrength};
    use crate::game::resources::{MoveQuality, HINT_BUDGET};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn scripted_session(settings: GameSettings) -> (Session, Rc<RefCell<EngineLog>>) {
        let log = EngineLog::shared();
        let engine = EngineOrchestrator::with_backend(Box::new(ScriptedEngine::new(log.clone())));
        (Session::new(settings, engine), log)
    }

    fn session_with(engine: ScriptedEngine, settings: GameSettings) -> Session {
        Session::new(settings, EngineOrchestrator::with_backend(Box::new(engine)))
    }

    fn play(session: &mut Session, from: Square, to: Square) -> ClickOutcome {
        session.click_square(from);
        session.click_square(to)
    }

    #[test]
    fn test_new_session_starts_in_menu() {
        //! Board clicks are ignored before a game starts
        let (mut session, _) = scripted_session(GameSettings::default());
        assert_eq!(session.state(), GameState::Menu);
        assert_eq!(session.click_square(Square::E2), ClickOutcome::Ignored);
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_start_configures_engine() {
        //! Starting pushes the strength and resets per-game state
        let mut settings = GameSettings::default();
        settings.select_level(4);
        let (mut session, log) = scripted_session(settings);
        session.start().unwrap();
        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(log.borrow().configured, vec![EngineStrength::Level(4)]);
        assert!(session.clock().is_running);
        assert!(session.settings_mut().is_none());
        assert!(session.start().is_err());
    }

    #[test]
    fn test_human_move_and_engine_reply() {
        //! One human move, one reply: two SAN entries and two evaluations
        let log = EngineLog::shared();
        let mut engine = ScriptedEngine::new(log.clone());
        engine.replies.push_back("e7e5".to_string());
        let mut session = session_with(engine, GameSettings::default());
        session.start().unwrap();

        assert_eq!(play(&mut session, Square::E2, Square::E4), ClickOutcome::Moved("e4".to_string()));
        assert!(session.engine_reply_due());
        assert_eq!(session.play_engine_reply(), Some("e5".to_string()));

        assert_eq!(session.history().moves, vec!["e4", "e5"]);
        assert_eq!(session.eval().samples, 2);
        assert_eq!(log.borrow().best_move_calls, 1);
        assert!(!session.engine_reply_due());
        assert!(session.is_human_turn());
    }

    #[test]
    fn test_board_refused_on_engine_turn() {
        //! The human cannot move the engine's pieces or move twice
        let (mut session, _) = scripted_session(GameSettings::default());
        session.start().unwrap();
        play(&mut session, Square::E2, Square::E4);
        assert_eq!(session.click_square(Square::E7), ClickOutcome::Ignored);
        assert_eq!(session.click_square(Square::D2), ClickOutcome::Ignored);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_black_human_waits_for_engine() {
        //! Playing Black, the engine opens
        let mut settings = GameSettings::default();
        settings.human_color = PlayerColor::Black;
        let (mut session, _) = scripted_session(settings);
        session.start().unwrap();
        assert!(!session.is_human_turn());
        assert!(session.engine_reply_due());
        assert!(session.play_engine_reply().is_some());
        assert!(session.is_human_turn());
    }

    #[test]
    fn test_clock_charges_only_side_to_move() {
        //! Frames charge the side to move and nothing in the menu
        let (mut session, _) = scripted_session(GameSettings::default());
        session.advance_frame(5.0);
        assert_eq!(session.clock().remaining(Color::White), 600.0);

        session.start().unwrap();
        session.advance_frame(2.0);
        assert_eq!(session.clock().remaining(Color::White), 598.0);
        assert_eq!(session.clock().remaining(Color::Black), 600.0);
    }

    #[test]
    fn test_reply_charges_evaluation_to_engine() {
        //! The engine's clock pays for its search and the evaluation after it
        let mut engine = ScriptedEngine::new(EngineLog::shared());
        engine.analyse_delay = Duration::from_millis(40);
        let mut session = session_with(engine, GameSettings::default());
        session.start().unwrap();

        play(&mut session, Square::E2, Square::E4);
        assert_eq!(session.clock().remaining(Color::Black), 600.0);

        assert!(session.play_engine_reply().is_some());
        assert!(session.clock().remaining(Color::Black) < 599.97);
        assert_eq!(session.clock().remaining(Color::White), 600.0);
    }

    #[test]
    fn test_timeout_ends_game() {
        //! A fallen flag is terminal and blocks further input
        let mut settings = GameSettings::default();
        settings.time_control_secs = 10;
        let (mut session, _) = scripted_session(settings);
        session.start().unwrap();
        let status = session.advance_frame(11.0);
        assert_eq!(status, GameStatus::Timeout { winner: Color::Black });
        assert_eq!(session.click_square(Square::E2), ClickOutcome::Ignored);
        assert!(!session.engine_reply_due());
        session.advance_frame(5.0);
        assert_eq!(session.clock().remaining(Color::Black), 10.0);
    }

    #[test]
    fn test_hint_budget_and_forfeit() {
        //! Three hints are allowed, the fourth forfeits permanently
        let (mut session, log) = scripted_session(GameSettings::default());
        session.start().unwrap();

        for _ in 0..HINT_BUDGET {
            assert!(matches!(session.request_hint(), HintOutcome::Suggested(_)));
        }
        assert!(!session.is_forfeited());
        assert_eq!(session.hints().hints_used, 3);
        assert!(session.hint_move().is_some());
        assert_eq!(log.borrow().analyse_limits, vec![SearchLimit::HINT; 3]);

        assert_eq!(session.request_hint(), HintOutcome::Forfeited);
        assert!(session.is_forfeited());
        assert_eq!(session.status(), GameStatus::Forfeited { winner: Color::Black });

        assert_eq!(session.request_hint(), HintOutcome::Refused);
        assert_eq!(session.click_square(Square::E2), ClickOutcome::Ignored);
        let before = session.clock().remaining(Color::White);
        session.advance_frame(3.0);
        assert_eq!(session.clock().remaining(Color::White), before);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_hint_cleared_by_next_move() {
        //! Executing any move drops the hint
        let (mut session, _) = scripted_session(GameSettings::default());
        session.start().unwrap();
        session.request_hint();
        assert!(session.hint_move().is_some());
        play(&mut session, Square::D2, Square::D4);
        assert!(session.hint_move().is_none());
    }

    #[test]
    fn test_forfeit_allows_only_home() {
        //! After forfeiting only the overlay returns to the menu
        let (mut session, _) = scripted_session(GameSettings::default());
        session.start().unwrap();
        for _ in 0..=HINT_BUDGET {
            session.request_hint();
        }
        let hint_button = ControlButton::Hint.rect().center();
        assert_eq!(session.handle_click(hint_button), ClickOutcome::Ignored);
        assert_eq!(session.handle_click(BACK_TO_MENU.center()), ClickOutcome::ReturnedHome);
        assert_eq!(session.state(), GameState::Menu);

        session.start().unwrap();
        assert!(!session.is_forfeited());
        assert_eq!(session.hints().hints_used, 0);
    }

    #[test]
    fn test_promotion_flow() {
        //! Promotion waits for a choice, then places the chosen piece
        let mut session = Session::new(GameSettings::default(), EngineOrchestrator::disconnected());
        session.start().unwrap();
        // Walk the h-pawn up while Black shuffles its knight
        for (from, to) in [
            (Square::H2, Square::H4),
            (Square::G8, Square::F6),
            (Square::H4, Square::H5),
            (Square::F6, Square::G8),
            (Square::H5, Square::H6),
            (Square::G8, Square::F6),
            (Square::H6, Square::G7),
            (Square::F6, Square::G8),
        ] {
            let mv = session.legal.get(from, to, None).cloned().unwrap();
            session.apply_move("test", &mv);
        }
        let before = session.board().clone();

        session.click_square(Square::G7);
        assert_eq!(session.click_square(Square::H8), ClickOutcome::PromotionPending);
        assert_eq!(session.state(), GameState::Promoting);
        assert_eq!(session.board().board(), before.board());
        assert_eq!(session.click_square(Square::G8), ClickOutcome::Ignored);

        let outcome = session.choose_promotion(Role::Knight);
        assert!(matches!(outcome, ClickOutcome::Moved(ref san) if san.starts_with("gxh8=N")));
        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(
            session.board().board().piece_at(Square::H8),
            Some(shakmaty::Piece { color: Color::White, role: Role::Knight })
        );
        assert_eq!(session.captured().symbols(Color::White), "pr");
    }

    #[test]
    fn test_promotion_click_dispatch() {
        //! Clicks in the promotion phase only hit the choice buttons
        let mut session = Session::new(GameSettings::default(), EngineOrchestrator::disconnected());
        session.start().unwrap();
        session.state = GameState::Promoting;
        assert_eq!(session.handle_click(ControlButton::Home.rect().center()), ClickOutcome::Ignored);
        assert_eq!(session.state(), GameState::Promoting);
    }

    #[test]
    fn test_evaluation_grades_moves() {
        //! Engine scores flow into the quality tag
        let log = EngineLog::shared();
        let mut engine = ScriptedEngine::new(log);
        engine.scores.extend([EngineScore::Cp(-10), EngineScore::Mate(2)]);
        let mut session = session_with(engine, GameSettings::default());
        session.start().unwrap();

        play(&mut session, Square::E2, Square::E4);
        assert_eq!(session.eval().quality, MoveQuality::Brilliant);
        session.play_engine_reply();
        assert_eq!(session.eval().quality, MoveQuality::Blunder);
        assert!(session.eval().score > 9.0);
    }

    #[test]
    fn test_engine_crash_degrades() {
        //! A dead engine leaves the game playable without replies
        let (mut session, _) = scripted_session(GameSettings::default());
        session.start().unwrap();
        play(&mut session, Square::E2, Square::E4);

        let mut failing = ScriptedEngine::new(EngineLog::shared());
        failing.fail_next = true;
        session.engine = EngineOrchestrator::with_backend(Box::new(failing));

        assert_eq!(session.play_engine_reply(), None);
        assert!(!session.engine().is_available());
        assert!(!session.engine_reply_due());
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_menu_clicks_adjust_settings() {
        //! Menu buttons change the settings and Start begins a game
        let (mut session, _) = scripted_session(GameSettings::default());
        let black = crate::input::menu_buttons()
            .into_iter()
            .find(|(action, _)| *action == MenuAction::SetColor(PlayerColor::Black))
            .map(|(_, rect)| rect.center())
            .unwrap();
        assert!(matches!(session.handle_click(black), ClickOutcome::MenuChanged(_)));
        assert_eq!(session.settings().human_color, PlayerColor::Black);
        session.apply_menu_action(MenuAction::AdjustTime(-1000));
        assert_eq!(session.settings().time_control_secs, 10);

        let start = Point::new(600, 700);
        assert_eq!(session.handle_click(start), ClickOutcome::Started);
        assert_eq!(session.orientation(), Color::Black);
        assert_eq!(session.apply_menu_action(MenuAction::CycleTheme), ClickOutcome::Ignored);
    }

    #[test]
    fn test_board_click_uses_orientation() {
        //! Pixel clicks respect the human's orientation
        let (mut session, _) = scripted_session(GameSettings::default());
        session.start().unwrap();
        let e2 = session.geometry().point_for_square(Square::E2, Color::White);
        assert_eq!(session.handle_click(e2), ClickOutcome::Selected(Square::E2));
    }

    #[test]
    fn test_fivefold_repetition_ends_game() {
        //! Knight shuffles that return to the start a fifth time draw
        let mut engine = ScriptedEngine::new(EngineLog::shared());
        for _ in 0..4 {
            engine.replies.extend(["g8f6", "f6g8"].map(String::from));
        }
        let mut session = session_with(engine, GameSettings::default());
        session.start().unwrap();

        for _ in 0..4 {
            assert_eq!(session.status(), GameStatus::InProgress);
            play(&mut session, Square::G1, Square::F3);
            assert!(session.play_engine_reply().is_some());
            play(&mut session, Square::F3, Square::G1);
            assert!(session.play_engine_reply().is_some());
        }

        assert_eq!(session.history().len(), 16);
        assert_eq!(session.status(), GameStatus::Repetition);
        assert_eq!(session.status().pgn_result(), "1/2-1/2");
        assert!(!session.clock().is_running);
        assert_eq!(session.click_square(Square::G1), ClickOutcome::Ignored);

        session.go_home().unwrap();
        session.start().unwrap();
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_history_replays_to_board() {
        //! The SAN record reproduces the live position
        let mut engine = ScriptedEngine::new(EngineLog::shared());
        engine.replies.extend(["e7e5", "b8c6", "g8f6"].map(String::from));
        let mut session = session_with(engine, GameSettings::default());
        session.start().unwrap();
        for (from, to) in [(Square::E2, Square::E4), (Square::G1, Square::F3), (Square::F1, Square::C4)] {
            play(&mut session, from, to);
            session.play_engine_reply();
        }
        assert_eq!(session.history().moves, vec!["e4", "e5", "Nf3", "Nc6", "Bc4", "Nf6"]);
        let replayed = session.history().replay().unwrap();
        assert_eq!(replayed.board(), session.board().board());
    }

    #[test]
    fn test_export_writes_file() {
        //! PGN export lands in the configured directory
        let dir = tempfile::tempdir().unwrap();
        let mut settings = GameSettings::default();
        settings.export_dir = dir.path().to_path_buf();
        let (mut session, _) = scripted_session(settings);
        assert!(session.export_pgn().is_err());
        session.start().unwrap();
        play(&mut session, Square::E2, Square::E4);
        let path = session.export_pgn().unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("[White \"Player\"]"));
        assert!(text.contains("1. e4 *"));
    }
}
