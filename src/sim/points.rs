//! Spatial membership sets
//!
//! One set of pixel X coordinates per feature category. Level setup fills
//! them; gameplay only asks "is pixel X in category C".

use std::collections::HashSet;

use crate::column_x;

/// Feature category of a membership set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    Fall,
    Mountain,
    Pipe,
    EnemyType0,
}

#[derive(Debug, Clone, Default)]
pub struct SpatialSets {
    fall: HashSet<i32>,
    mountain: HashSet<i32>,
    pipe: HashSet<i32>,
    enemy_type0: HashSet<i32>,
}

impl SpatialSets {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, kind: PointKind) -> &HashSet<i32> {
        match kind {
            PointKind::Fall => &self.fall,
            PointKind::Mountain => &self.mountain,
            PointKind::Pipe => &self.pipe,
            PointKind::EnemyType0 => &self.enemy_type0,
        }
    }

    fn set_mut(&mut self, kind: PointKind) -> &mut HashSet<i32> {
        match kind {
            PointKind::Fall => &mut self.fall,
            PointKind::Mountain => &mut self.mountain,
            PointKind::Pipe => &mut self.pipe,
            PointKind::EnemyType0 => &mut self.enemy_type0,
        }
    }

    pub fn insert(&mut self, kind: PointKind, x: i32) {
        self.set_mut(kind).insert(x);
    }

    /// Insert `len` consecutive pixels starting at `start`
    pub fn insert_span(&mut self, kind: PointKind, start: i32, len: i32) {
        self.set_mut(kind).extend(start..start + len);
    }

    #[inline]
    pub fn contains(&self, kind: PointKind, x: i32) -> bool {
        self.set(kind).contains(&x)
    }

    #[inline]
    pub fn is_fall(&self, x: i32) -> bool {
        self.fall.contains(&x)
    }

    #[inline]
    pub fn is_pipe(&self, x: i32) -> bool {
        self.pipe.contains(&x)
    }

    /// True if the left edge of any of `count` columns from `first_column`
    /// belongs to `kind`
    pub fn any_column(&self, kind: PointKind, first_column: i32, count: i32) -> bool {
        (first_column..first_column + count).any(|c| self.contains(kind, column_x(c)))
    }

    pub fn len(&self, kind: PointKind) -> usize {
        self.set(kind).len()
    }

    pub fn iter(&self, kind: PointKind) -> impl Iterator<Item = i32> + '_ {
        self.set(kind).iter().copied()
    }
}
