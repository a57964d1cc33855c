//! Priority-ordered build queue application.
//!
//! A queue is an ordered list of placement/upgrade batches. Batches are
//! applied strictly in order, each filtered against the turn's exception
//! set, and the whole pass halts as soon as the read-back structure budget
//! is exactly zero -- later batches are dropped for the turn and a future
//! turn re-attempts the same static queue. Partial fulfillment is logged,
//! never retried.

use crate::board::Board;
use crate::grid::Cell;
use crate::units::{Resource, Side, UnitKind};
use fnv::FnvHashSet;
use log::*;
use serde::{Deserialize, Serialize};

/// One prioritized placement or upgrade batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildItem {
    /// Kind to place; `None` on upgrade batches means "whatever already
    /// occupies these cells".
    pub kind: Option<UnitKind>,
    pub upgrade: bool,
    pub cells: Vec<Cell>,
}

impl BuildItem {
    pub fn place(kind: UnitKind, cells: Vec<Cell>) -> Self {
        BuildItem {
            kind: Some(kind),
            upgrade: false,
            cells,
        }
    }

    pub fn upgrade(cells: Vec<Cell>) -> Self {
        BuildItem {
            kind: None,
            upgrade: true,
            cells,
        }
    }
}

/// Apply a queue against the structure budget, skipping excepted cells.
pub fn apply_queue(board: &mut dyn Board, queue: &[BuildItem], exceptions: &FnvHashSet<Cell>) {
    for item in queue {
        let cells: Vec<Cell> = item
            .cells
            .iter()
            .copied()
            .filter(|cell| !exceptions.contains(cell))
            .collect();

        if item.upgrade {
            let accepted = board.request_upgrade(&cells);
            if (accepted as usize) < cells.len() {
                debug!(
                    "build: upgraded {} of {} requested cells",
                    accepted,
                    cells.len()
                );
            }
        } else if let Some(kind) = item.kind {
            let accepted = board.request_place(kind, &cells, 1);
            if (accepted as usize) < cells.len() {
                debug!(
                    "build: placed {} of {} requested {:?} units",
                    accepted,
                    cells.len(),
                    kind
                );
            }
        } else {
            error!("build: placement batch without a unit kind, skipping");
        }

        if board.resource_count(Resource::Structure, Side::Friendly) == 0 {
            break;
        }
    }
}
