/// All game entity types — pure data, no logic.
///
/// Positions are world units on the configured screen (800×700 by default),
/// origin top-left, y growing downward.  Every entity is just a rectangle
/// plus whatever per-type parameters it carries.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding rectangle.  The only geometric representation the
/// game uses; collisions and boundary tests all go through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Rectangle of the given size whose centre sits on (`cx`, `cy`).
    pub const fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Rect { x: cx - w / 2, y: cy - h / 2, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub const fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Move so the centre lands on (`cx`, `cy`), keeping the size.
    pub fn set_center(&mut self, cx: i32, cy: i32) {
        self.x = cx - self.w / 2;
        self.y = cy - self.h / 2;
    }

    /// Strict overlap: rectangles that merely share an edge do not collide.
    pub const fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Tunables that belong to the entities themselves ───────────────────────────

pub const SHIP_WIDTH: i32 = 50;
pub const SHIP_HEIGHT: i32 = 100;
/// Starting (and maximum) ship health.
pub const MAX_HEALTH: u8 = 5;

pub const BULLET_SIZE: i32 = 20;

/// Number of alien sprite variants; kinds are numbered 1..=ALIEN_KINDS.
pub const ALIEN_KINDS: u8 = 6;

/// The explosion is cleared as soon as its frame counter reaches this value;
/// frames 1..EXPLOSION_FRAMES are the visible ones.
pub const EXPLOSION_FRAMES: u8 = 10;

// ── Enums ─────────────────────────────────────────────────────────────────────

/// Which alien sprite an enemy uses.  Always in 1..=ALIEN_KINDS.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AlienKind(u8);

impl AlienKind {
    /// Clamp into the valid variant range.
    pub fn new(n: u8) -> Self {
        AlienKind(n.clamp(1, ALIEN_KINDS))
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub rect: Rect,
    /// 0..=MAX_HEALTH
    pub health: u8,
    pub score: u32,
}

impl Ship {
    /// Fresh ship for a new session, parked near the bottom centre.
    pub fn spawn(width: i32, height: i32) -> Self {
        Ship {
            rect: Rect::from_center(width / 2, height - 100, SHIP_WIDTH, SHIP_HEIGHT),
            health: MAX_HEALTH,
            score: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// World units moved downward per tick.
    pub speed: i32,
    pub kind: AlienKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
}

impl Bullet {
    /// A new bullet leaves from the ship's centre.
    pub fn fired_from(ship: &Ship) -> Self {
        Bullet {
            rect: Rect::from_center(
                ship.rect.center_x(),
                ship.rect.center_y(),
                BULLET_SIZE,
                BULLET_SIZE,
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub rect: Rect,
    /// Current animation frame, starting at 1.
    pub frame: u8,
}

impl Explosion {
    pub fn at(rect: Rect) -> Self {
        Explosion { rect, frame: 1 }
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

/// Everything one Playing session owns.  Cloneable so the pure update
/// functions in `compute` can return a new copy without touching the input.
#[derive(Clone, Debug)]
pub struct PlayState {
    pub ship: Ship,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    /// At most one explosion animates at a time.
    pub explosion: Option<Explosion>,
    pub status: GameStatus,
    pub frame: u64,
    pub width: i32,
    pub height: i32,
}

impl PlayState {
    pub fn screen_rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}
