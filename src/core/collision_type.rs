use serde::{Deserialize, Serialize};

/// Discrete tag deciding which pairs of objects may collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollisionType {
    /// Trigger volume: detects overlap, never pushes anything.
    Passive,
    InvisibleWall,
    VisibleWall,
    #[default]
    Mob,
    Projectile,
    Misc,
}

impl CollisionType {
    pub const COUNT: usize = 6;

    pub const ALL: [CollisionType; Self::COUNT] = [
        CollisionType::Passive,
        CollisionType::InvisibleWall,
        CollisionType::VisibleWall,
        CollisionType::Mob,
        CollisionType::Projectile,
        CollisionType::Misc,
    ];

    /// Maps a raw type index to a tag; anything out of range becomes `Mob`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(CollisionType::Mob)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_passive(self) -> bool {
        self == CollisionType::Passive
    }
}

/// Symmetric table of which collision types physically collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionMatrix {
    cells: [[bool; CollisionType::COUNT]; CollisionType::COUNT],
}

impl Default for CollisionMatrix {
    fn default() -> Self {
        const T: bool = true;
        const F: bool = false;
        Self {
            cells: [
                // P  IW VW Mob Proj Misc
                [F, F, F, T, F, F],
                [F, F, F, T, F, T],
                [F, F, F, T, T, T],
                [T, T, T, T, T, T],
                [F, F, T, T, F, T],
                [F, T, T, T, T, T],
            ],
        }
    }
}

impl CollisionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allows(&self, a: CollisionType, b: CollisionType) -> bool {
        self.cells[a.index()][b.index()]
    }

    /// Writes both `(a, b)` and `(b, a)`.
    pub fn set(&mut self, a: CollisionType, b: CollisionType, allowed: bool) {
        self.cells[a.index()][b.index()] = allowed;
        self.cells[b.index()][a.index()] = allowed;
    }
}
