use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Every deployable unit kind in the game, stationary and mobile alike.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum UnitKind {
    Wall,
    Support,
    Turret,
    Scout,
    Demolisher,
    Interceptor,
}

impl UnitKind {
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Wall,
        UnitKind::Support,
        UnitKind::Turret,
        UnitKind::Scout,
        UnitKind::Demolisher,
        UnitKind::Interceptor,
    ];
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct UnitFlags: u8 {
        const STATIONARY = 1;
        const ATTACKER = 2;
        const MOBILE = 4;
    }
}

/// Which player a unit or resource pool belongs to, from the engine's
/// perspective.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Side {
    Friendly,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Friendly => Side::Enemy,
            Side::Enemy => Side::Friendly,
        }
    }
}

/// The two independent per-player budgets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Resource {
    Structure,
    Mobile,
}

/// A placed structure occupying a cell, as reported by the board.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct StationaryUnit {
    pub kind: UnitKind,
    pub side: Side,
    pub upgraded: bool,
}

/// Per-kind combat and cost values.
#[derive(Copy, Clone, Debug)]
pub struct UnitStats {
    pub cost: u32,
    pub upgrade_cost: u32,
    pub damage: u32,
    pub upgraded_damage: u32,
    pub range: f32,
    pub upgraded_range: f32,
    pub flags: UnitFlags,
}

/// Immutable unit catalog, built once at startup and passed explicitly to
/// every component that needs unit costs or combat values. Stands in for
/// whatever shorthand codes the external engine configures; the decision
/// logic only ever sees this value.
#[derive(Clone, Debug)]
pub struct UnitCatalog {
    stats: [UnitStats; 6],
}

impl UnitCatalog {
    /// The observed game configuration.
    pub fn standard() -> Self {
        let entry = |kind: UnitKind| -> UnitStats {
            match kind {
                UnitKind::Wall => UnitStats {
                    cost: 1,
                    upgrade_cost: 1,
                    damage: 0,
                    upgraded_damage: 0,
                    range: 0.0,
                    upgraded_range: 0.0,
                    flags: UnitFlags::STATIONARY,
                },
                UnitKind::Support => UnitStats {
                    cost: 4,
                    upgrade_cost: 2,
                    damage: 0,
                    upgraded_damage: 0,
                    range: 3.5,
                    upgraded_range: 7.0,
                    flags: UnitFlags::STATIONARY,
                },
                UnitKind::Turret => UnitStats {
                    cost: 2,
                    upgrade_cost: 4,
                    damage: 5,
                    upgraded_damage: 15,
                    range: 2.5,
                    upgraded_range: 3.5,
                    flags: UnitFlags::STATIONARY.union(UnitFlags::ATTACKER),
                },
                UnitKind::Scout => UnitStats {
                    cost: 1,
                    upgrade_cost: 0,
                    damage: 2,
                    upgraded_damage: 2,
                    range: 3.5,
                    upgraded_range: 3.5,
                    flags: UnitFlags::MOBILE.union(UnitFlags::ATTACKER),
                },
                UnitKind::Demolisher => UnitStats {
                    cost: 3,
                    upgrade_cost: 0,
                    damage: 8,
                    upgraded_damage: 8,
                    range: 4.5,
                    upgraded_range: 4.5,
                    flags: UnitFlags::MOBILE.union(UnitFlags::ATTACKER),
                },
                UnitKind::Interceptor => UnitStats {
                    cost: 1,
                    upgrade_cost: 0,
                    damage: 20,
                    upgraded_damage: 20,
                    range: 4.5,
                    upgraded_range: 4.5,
                    flags: UnitFlags::MOBILE.union(UnitFlags::ATTACKER),
                },
            }
        };

        let mut stats = [entry(UnitKind::Wall); 6];
        for (slot, kind) in stats.iter_mut().zip(UnitKind::ALL) {
            *slot = entry(kind);
        }
        UnitCatalog { stats }
    }

    #[inline]
    fn index(kind: UnitKind) -> usize {
        match kind {
            UnitKind::Wall => 0,
            UnitKind::Support => 1,
            UnitKind::Turret => 2,
            UnitKind::Scout => 3,
            UnitKind::Demolisher => 4,
            UnitKind::Interceptor => 5,
        }
    }

    pub fn stats(&self, kind: UnitKind) -> &UnitStats {
        &self.stats[Self::index(kind)]
    }

    pub fn cost(&self, kind: UnitKind) -> u32 {
        self.stats(kind).cost
    }

    pub fn upgrade_cost(&self, kind: UnitKind) -> u32 {
        self.stats(kind).upgrade_cost
    }

    /// Which budget this kind is paid from.
    pub fn resource(&self, kind: UnitKind) -> Resource {
        if self.stats(kind).flags.contains(UnitFlags::MOBILE) {
            Resource::Mobile
        } else {
            Resource::Structure
        }
    }

    pub fn is_stationary(&self, kind: UnitKind) -> bool {
        self.stats(kind).flags.contains(UnitFlags::STATIONARY)
    }

    pub fn is_stationary_attacker(&self, kind: UnitKind) -> bool {
        self.stats(kind)
            .flags
            .contains(UnitFlags::STATIONARY.union(UnitFlags::ATTACKER))
    }

    pub fn damage(&self, kind: UnitKind, upgraded: bool) -> u32 {
        let stats = self.stats(kind);
        if upgraded {
            stats.upgraded_damage
        } else {
            stats.damage
        }
    }

    pub fn range(&self, kind: UnitKind, upgraded: bool) -> f32 {
        let stats = self.stats(kind);
        if upgraded {
            stats.upgraded_range
        } else {
            stats.range
        }
    }
}
