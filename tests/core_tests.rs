//! Integration tests for session phases and settings
//!
//! Tests the menu-to-game lifecycle through the public session API,
//! verifying that settings only change in the menu, that every new game
//! starts clean, and that menu choices survive a restart on disk.

use omnichess::core::settings_persistence::{load_settings, save_settings};
use omnichess::core::{BoardTheme, GameSettings, GameState, PlayerColor, StrengthMode};
use omnichess::game::ai::{EngineOrchestrator, EngineStrength};
use omnichess::input::{menu_buttons, MenuAction};
use omnichess::{ClickOutcome, Session};
use shakmaty::{Color, Position, Square};

fn offline_session(settings: GameSettings) -> Session {
    Session::new(settings, EngineOrchestrator::disconnected())
}

fn click_menu(session: &mut Session, action: MenuAction) -> ClickOutcome {
    let rect = menu_buttons()
        .into_iter()
        .find(|(candidate, _)| *candidate == action)
        .map(|(_, rect)| rect)
        .expect("menu button exists");
    session.handle_click(rect.center())
}

// ============================================================================
// Phase lifecycle
// ============================================================================

#[test]
fn test_initial_state_is_menu() {
    //! A new session opens on the menu with nothing running

    let session = offline_session(GameSettings::default());
    assert_eq!(session.state(), GameState::Menu);
    assert!(!session.clock().is_running);
    assert!(session.history().is_empty());
}

#[test]
fn test_home_and_restart_resets_game() {
    //! Returning to the menu and starting again gives a fresh game
    //!
    //! Moves, captures, hints and clocks from the abandoned game must not
    //! leak into the next one.

    let mut session = offline_session(GameSettings::default());
    session.start().unwrap();
    session.advance_frame(30.0);
    session.click_square(Square::E2);
    session.click_square(Square::E4);
    assert_eq!(session.history().len(), 1);

    session.go_home().unwrap();
    assert_eq!(session.state(), GameState::Menu);
    assert!(!session.clock().is_running);
    assert!(session.go_home().is_err());

    session.start().unwrap();
    assert!(session.history().is_empty());
    assert_eq!(session.clock().remaining(Color::White), 600.0);
    assert_eq!(session.board().board().piece_at(Square::E2).map(|p| p.color), Some(Color::White));
    assert_eq!(session.hints().hints_used, 0);
}

#[test]
fn test_home_button_during_game() {
    //! The sidebar Home button abandons the game

    let mut session = offline_session(GameSettings::default());
    session.start().unwrap();
    let home = omnichess::input::ControlButton::Home.rect().center();
    assert_eq!(session.handle_click(home), ClickOutcome::ReturnedHome);
    assert_eq!(session.state(), GameState::Menu);
}

// ============================================================================
// Menu adjustments
// ============================================================================

#[test]
fn test_menu_buttons_configure_next_game() {
    //! Level, Elo, colour, time and theme buttons shape the next game

    let mut session = offline_session(GameSettings::default());

    assert!(matches!(click_menu(&mut session, MenuAction::SelectLevel(5)), ClickOutcome::MenuChanged(_)));
    assert_eq!(session.settings().strength(), EngineStrength::Level(5));

    click_menu(&mut session, MenuAction::AdjustElo(100));
    assert_eq!(session.settings().strength_mode, StrengthMode::Elo);
    assert_eq!(session.settings().custom_elo, 1600);

    click_menu(&mut session, MenuAction::SetColor(PlayerColor::Black));
    click_menu(&mut session, MenuAction::CycleTheme);
    assert_eq!(session.settings().board_theme, BoardTheme::BlueSky);

    assert_eq!(click_menu(&mut session, MenuAction::Start), ClickOutcome::Started);
    assert_eq!(session.orientation(), Color::Black);
    assert!(session.settings_mut().is_none());
    assert_eq!(
        session.apply_menu_action(MenuAction::SelectLevel(2)),
        ClickOutcome::Ignored
    );
    assert_eq!(session.settings().strength_mode, StrengthMode::Elo);
}

#[test]
fn test_time_control_has_floor() {
    //! The time control never drops below ten seconds

    let mut session = offline_session(GameSettings::default());
    for _ in 0..100 {
        session.apply_menu_action(MenuAction::AdjustTime(-60));
    }
    assert_eq!(session.settings().time_control_secs, 10);
    session.start().unwrap();
    assert_eq!(session.clock().remaining(Color::Black), 10.0);
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_menu_choices_survive_restart() {
    //! Settings saved after the menu are loaded unchanged next run

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut session = offline_session(load_settings(&path));
    session.apply_menu_action(MenuAction::SelectLevel(7));
    session.apply_menu_action(MenuAction::SetColor(PlayerColor::Black));
    session.apply_menu_action(MenuAction::AdjustTime(300));
    save_settings(&path, session.settings()).unwrap();

    let restored = load_settings(&path);
    assert_eq!(&restored, session.settings());
    assert_eq!(restored.level, 7);
    assert_eq!(restored.time_control_secs, 900);
}

#[test]
fn test_out_of_range_file_is_sanitized() {
    //! Hand-edited values are clamped into range on load

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "level": 42, "custom_elo": 100, "time_control_secs": 1 }"#).unwrap();

    let loaded = load_settings(&path);
    assert_eq!(loaded.level, 8);
    assert_eq!(loaded.custom_elo, 1350);
    assert_eq!(loaded.time_control_secs, 10);
}
