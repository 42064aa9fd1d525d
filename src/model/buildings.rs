//! Building entrance/exit tables and ground outlines

use geo::{Contains, Point, Polygon};
use hashbrown::HashMap;

use crate::{BuildingId, NodeId};

/// Routing tables for campus buildings.
///
/// Entrances are routing targets into a building, exits are routing origins
/// out of one. Outlines keep their load order, and containment queries return
/// the first matching building in that order.
#[derive(Debug, Clone, Default)]
pub struct BuildingDirectory {
    entrances: HashMap<BuildingId, NodeId>,
    exits: HashMap<BuildingId, NodeId>,
    outlines: Vec<(BuildingId, Polygon<f64>)>,
}

impl BuildingDirectory {
    pub(crate) fn insert_entrance(&mut self, building: BuildingId, node: NodeId) {
        self.entrances.insert(building, node);
    }

    pub(crate) fn insert_exit(&mut self, building: BuildingId, node: NodeId) {
        self.exits.insert(building, node);
    }

    pub(crate) fn push_outline(&mut self, building: BuildingId, outline: Polygon<f64>) {
        self.outlines.push((building, outline));
    }

    /// Entrance node of a building, if one is registered.
    pub fn entrance_of(&self, building: &str) -> Option<&NodeId> {
        self.entrances.get(building)
    }

    /// Exit node of a building, if one is registered.
    pub fn exit_of(&self, building: &str) -> Option<&NodeId> {
        self.exits.get(building)
    }

    /// Ground outlines registered for a building.
    pub fn outlines_of<'a>(&'a self, building: &'a str) -> impl Iterator<Item = &'a Polygon<f64>> {
        self.outlines
            .iter()
            .filter(move |(id, _)| id.as_str() == building)
            .map(|(_, outline)| outline)
    }

    /// First building (in load order) whose outline contains `point`.
    ///
    /// Points exactly on an outline boundary are treated as outside, which is
    /// stable across calls for identical inputs.
    pub fn containing(&self, point: &Point<f64>) -> Option<&BuildingId> {
        self.outlines
            .iter()
            .find(|(_, outline)| outline.contains(point))
            .map(|(id, _)| id)
    }

    pub fn outline_count(&self) -> usize {
        self.outlines.len()
    }
}
