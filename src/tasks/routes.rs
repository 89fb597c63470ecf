//! Follow-up routing after a scoring attempt.
//!
//! Where to go next depends on where the robot actually ended up, so
//! the next leg is chosen by re-resolving the nearest scoring marker
//! *after* the attempt and looking its id up in a closed table. An id
//! with no entry is a designed fallback: warn and stay put.

use crate::core::types::Pose2D;
use crate::field::{FieldLayout, MarkerRole};
use crate::navigation::{find_nearest, MotionStep};
use log::{debug, warn};
use std::collections::HashMap;

/// A named, pre-built travel leg.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Name shown to the operator.
    pub name: String,
    /// Steps the drivetrain should execute, in order.
    pub steps: Vec<MotionStep>,
}

impl Route {
    /// A route.
    pub fn new(name: impl Into<String>, steps: Vec<MotionStep>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    /// The explicit stay-put route.
    pub fn no_op() -> Self {
        Self {
            name: "Stay".to_string(),
            steps: Vec::new(),
        }
    }

    /// Whether this route moves the robot at all.
    pub fn is_no_op(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Finite marker-id → route lookup with an explicit no-op default.
#[derive(Debug)]
pub struct RouteTable {
    routes: HashMap<u32, Route>,
    fallback: Route,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// Empty table; every lookup hits the no-op fallback.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            fallback: Route::no_op(),
        }
    }

    /// Register the follow-up route for a marker id.
    pub fn insert(&mut self, marker_id: u32, route: Route) {
        self.routes.insert(marker_id, route);
    }

    /// Route for a marker id; unmapped ids warn and return the no-op
    /// fallback rather than failing.
    pub fn lookup(&self, marker_id: u32) -> &Route {
        match self.routes.get(&marker_id) {
            Some(route) => route,
            None => {
                warn!("No follow-up route for marker {}, staying put", marker_id);
                &self.fallback
            }
        }
    }

    /// The route used when no mapping applies.
    pub fn fallback(&self) -> &Route {
        &self.fallback
    }

    /// Names of all registered routes, for operator selection.
    pub fn route_names(&self) -> Vec<&str> {
        self.routes.values().map(|r| r.name.as_str()).collect()
    }
}

/// Pick the follow-up leg after a finished attempt: nearest scoring
/// marker as of now, looked up in the table.
///
/// Returns the no-op fallback both when the id is unmapped and when no
/// scoring marker exists at all.
pub fn select_follow_up<'a>(
    table: &'a RouteTable,
    pose: &Pose2D,
    layout: &FieldLayout,
) -> &'a Route {
    match find_nearest(pose, MarkerRole::Scoring, layout) {
        Some(marker) => {
            let route = table.lookup(marker.id);
            debug!("Follow-up after marker {}: {}", marker.id, route.name);
            route
        }
        None => {
            warn!("No scoring marker to key the follow-up on");
            table.fallback()
        }
    }
}
