//! Agent position sources

use corridor_math::Vec3;

/// Supplies the tracked agent's world position
pub trait AgentPositionProvider {
    fn agent_position(&self) -> Vec3;
}

impl AgentPositionProvider for Vec3 {
    fn agent_position(&self) -> Vec3 {
        *self
    }
}

impl<P: AgentPositionProvider + ?Sized> AgentPositionProvider for &P {
    fn agent_position(&self) -> Vec3 {
        (**self).agent_position()
    }
}

/// Agent walking a polyline at constant speed
#[derive(Debug, Clone)]
pub struct WaypointAgent {
    waypoints: Vec<Vec3>,
    speed: f32,
    position: Vec3,
    /// Index of the waypoint being walked towards
    next: usize,
}

impl WaypointAgent {
    /// Start at the first waypoint
    pub fn new(waypoints: Vec<Vec3>, speed: f32) -> Self {
        let position = waypoints.first().copied().unwrap_or(Vec3::ZERO);
        Self {
            waypoints,
            speed: speed.max(0.0),
            position,
            next: 1,
        }
    }

    /// Move along the path for `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        let mut budget = self.speed * dt;
        while budget > 0.0 {
            let Some(&target) = self.waypoints.get(self.next) else {
                return;
            };
            let remaining = self.position.distance(target);
            if remaining <= budget {
                self.position = target;
                self.next += 1;
                budget -= remaining;
            } else {
                self.position += (target - self.position).normalize() * budget;
                return;
            }
        }
    }

    /// Whether the last waypoint has been reached
    pub fn is_finished(&self) -> bool {
        self.next >= self.waypoints.len()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

impl AgentPositionProvider for WaypointAgent {
    fn agent_position(&self) -> Vec3 {
        self.position
    }
}
