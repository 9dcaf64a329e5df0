//! Pointer geometry and hit testing
//!
//! Maps window pixel coordinates to board squares and to the rectangles of
//! every clickable control. The layout is a fixed 1200x800 window with the
//! board drawn at (160, 100), 600 pixels square.
//!
//! # Orientation
//!
//! The board is drawn from the human's side. When the human plays Black
//! both the file and the rank are mirrored, so a8 sits bottom-right.
//!
//! # Layout
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │      ┌──────────────┐          ┌───────────┐           │
//! │      │              │          │   Home    │ (800,350) │
//! │      │    board     │          │   Hint    │ (800,410) │
//! │      │  600 x 600   │          │   PGN     │ (800,470) │
//! │      └──────────────┘          └───────────┘           │
//! └────────────────────────────────────────────────────────┘
//! ```

use crate::core::PlayerColor;
use shakmaty::{Color, File, Rank, Role, Square};

/// Window width in pixels
pub const WIDTH: i32 = 1200;
/// Window height in pixels
pub const HEIGHT: i32 = 800;

/// A window coordinate in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned clickable rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.x + self.w && point.y >= self.y && point.y < self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Placement of the board inside the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub offset_x: i32,
    pub offset_y: i32,
    pub size: i32,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            offset_x: 160,
            offset_y: 100,
            size: 600,
        }
    }
}

impl BoardGeometry {
    /// Side length of one square
    pub fn square_size(&self) -> i32 {
        self.size / 8
    }

    /// Square under `point`, seen from `orientation`
    ///
    /// Points on or past the far edges resolve to nothing.
    pub fn square_from_point(&self, point: Point, orientation: Color) -> Option<Square> {
        let inside_x = self.offset_x <= point.x && point.x < self.offset_x + self.size;
        let inside_y = self.offset_y <= point.y && point.y < self.offset_y + self.size;
        if !inside_x || !inside_y {
            return None;
        }

        let sq = self.square_size();
        let mut col = (point.x - self.offset_x) / sq;
        let mut row = 7 - (point.y - self.offset_y) / sq;
        if orientation == Color::Black {
            col = 7 - col;
            row = 7 - row;
        }
        Some(Square::from_coords(
            File::new(u32::try_from(col).ok()?),
            Rank::new(u32::try_from(row).ok()?),
        ))
    }

    /// Centre pixel of `square`, seen from `orientation`
    pub fn point_for_square(&self, square: Square, orientation: Color) -> Point {
        let sq = self.square_size();
        let (mut col, mut row) = (i32::from(square.file()), i32::from(square.rank()));
        if orientation == Color::Black {
            col = 7 - col;
            row = 7 - row;
        }
        Point::new(
            self.offset_x + col * sq + sq / 2,
            self.offset_y + (7 - row) * sq + sq / 2,
        )
    }
}

/// Sidebar buttons shown during a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    Home,
    Hint,
    Pgn,
}

impl ControlButton {
    pub const ALL: [ControlButton; 3] = [ControlButton::Home, ControlButton::Hint, ControlButton::Pgn];

    pub fn rect(&self) -> Rect {
        match self {
            ControlButton::Home => Rect::new(800, 350, 350, 50),
            ControlButton::Hint => Rect::new(800, 410, 350, 50),
            ControlButton::Pgn => Rect::new(800, 470, 350, 50),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ControlButton::Home => "HOME",
            ControlButton::Hint => "HINT",
            ControlButton::Pgn => "EXPORT PGN",
        }
    }
}

/// Sidebar button under `point`
pub fn control_at(point: Point) -> Option<ControlButton> {
    ControlButton::ALL.into_iter().find(|button| button.rect().contains(point))
}

/// "Back to menu" button on the game-over overlay
pub const BACK_TO_MENU: Rect = Rect::new(WIDTH / 2 - 100, HEIGHT / 2 + 60, 200, 50);

/// Promotion choice rectangles in dialog order (Q, R, B, N)
pub fn promotion_rects() -> [(Role, Rect); 4] {
    let roles = [Role::Queen, Role::Rook, Role::Bishop, Role::Knight];
    let mut i = 0;
    roles.map(|role| {
        let rect = Rect::new(WIDTH / 2 - 140 + i * 70, HEIGHT / 2 - 35, 60, 60);
        i += 1;
        (role, rect)
    })
}

/// Promotion piece under `point`
pub fn promotion_choice_at(point: Point) -> Option<Role> {
    promotion_rects()
        .into_iter()
        .find(|(_, rect)| rect.contains(point))
        .map(|(role, _)| role)
}

/// Menu adjustments reachable by click or console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SelectLevel(u8),
    AdjustElo(i32),
    SetColor(PlayerColor),
    AdjustTime(i32),
    CycleTheme,
    Start,
}

/// Level preset buttons, two per row
pub fn level_rect(level: u8) -> Rect {
    let i = i32::from(level.saturating_sub(1));
    Rect::new(180 + (i % 2) * 140, 220 + (i / 2) * 70, 120, 55)
}

/// Every menu button and the action it triggers
pub fn menu_buttons() -> Vec<(MenuAction, Rect)> {
    let mut buttons: Vec<(MenuAction, Rect)> = (1..=8)
        .map(|level| (MenuAction::SelectLevel(level), level_rect(level)))
        .collect();
    buttons.extend([
        (MenuAction::AdjustElo(-100), Rect::new(800, 270, 60, 45)),
        (MenuAction::AdjustElo(-10), Rect::new(865, 270, 45, 45)),
        (MenuAction::AdjustElo(10), Rect::new(980, 270, 45, 45)),
        (MenuAction::AdjustElo(100), Rect::new(1030, 270, 60, 45)),
        (MenuAction::SetColor(PlayerColor::White), Rect::new(500, 460, 100, 45)),
        (MenuAction::SetColor(PlayerColor::Black), Rect::new(620, 460, 100, 45)),
        (MenuAction::AdjustTime(-60), Rect::new(430, 580, 50, 45)),
        (MenuAction::AdjustTime(-10), Rect::new(490, 580, 50, 45)),
        (MenuAction::AdjustTime(10), Rect::new(660, 580, 50, 45)),
        (MenuAction::AdjustTime(60), Rect::new(720, 580, 50, 45)),
        (MenuAction::CycleTheme, Rect::new(800, 460, 200, 45)),
        (MenuAction::Start, Rect::new(WIDTH / 2 - 120, 680, 240, 70)),
    ]);
    buttons
}

/// Menu action under `point`
pub fn menu_action_at(point: Point) -> Option<MenuAction> {
    menu_buttons()
        .into_iter()
        .find(|(_, rect)| rect.contains(point))
        .map(|(action, _)| action)
}
