pub mod attack;
pub mod board;
pub mod deploy;
pub mod grid;
pub mod profile;
pub mod queue;
pub mod regions;
pub mod sim;
pub mod tactician;
pub mod threat;
pub mod units;

pub use attack::{attack_threshold, AttackPlanner, AttackState};
pub use board::{Board, Edges};
pub use grid::{Cell, GridArray, ARENA_SIZE, HALF_ARENA};
pub use profile::StrategyProfile;
pub use queue::{apply_queue, BuildItem};
pub use regions::{threat_by_sector, Sector, SectorTable, SectorThreat};
pub use sim::SimBoard;
pub use tactician::{Directive, Tactician};
pub use threat::ThreatMap;
pub use units::{Resource, Side, StationaryUnit, UnitCatalog, UnitKind};
