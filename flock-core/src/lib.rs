#![cfg_attr(not(feature = "std"), no_std)]

use core::f32::consts::PI;

#[cfg(feature = "std")]
use rand::Rng;

fn sqrt(x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        x.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrtf(x)
    }
}

fn powf(base: f32, exponent: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        base.powf(exponent)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::powf(base, exponent)
    }
}

fn atan2(y: f32, x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        y.atan2(x)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::atan2f(y, x)
    }
}

/// A 2D vector used for positions, velocities and steering forces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub const fn unit_x() -> Self {
        Self { x: 1.0, y: 0.0 }
    }

    pub fn magnitude(self) -> f32 {
        sqrt(self.x * self.x + self.y * self.y)
    }

    /// Unit vector in the same direction, or zero when the magnitude is zero.
    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            self / mag
        } else {
            Self::zero()
        }
    }

    /// Unit vector in the same direction, or `fallback` when the magnitude is zero.
    pub fn normalize_or(self, fallback: Vec2) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            self / mag
        } else {
            fallback
        }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).magnitude()
    }
}

impl core::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vec2 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

/// Heading of a vector in degrees, in the range (-90, 270].
///
/// The range matches screen-space rotation conventions where 0 points along
/// +x and angles grow clockwise (y axis points down). Defined for every
/// input: a vector with `x == 0` maps to 90 or 270, and the zero vector
/// maps to 0.
pub fn direction_degrees(v: Vec2) -> f32 {
    let mut degrees = atan2(v.y, v.x) * (180.0 / PI);
    if degrees <= -90.0 {
        degrees += 360.0;
    }
    degrees
}

/// Per-agent steering configuration, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringProfile {
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub center_weight: f32,
    pub separation_enabled: bool,
    pub alignment_enabled: bool,
    pub cohesion_enabled: bool,
    pub center_enabled: bool,
    /// Neighbor cutoff distance. Must be positive.
    pub perception_radius: f32,
    /// Cruise speed in world units per second.
    pub move_speed: f32,
    /// Damping applied to the combined acceleration before integration.
    pub turn_speed: f32,
}

impl SteeringProfile {
    /// Baseline tuning with every behavior weighted equally.
    pub const fn standard() -> Self {
        Self {
            separation_weight: 1.0,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            center_weight: 1.0,
            separation_enabled: true,
            alignment_enabled: true,
            cohesion_enabled: true,
            center_enabled: true,
            perception_radius: 50.0,
            move_speed: 100.0,
            turn_speed: 0.25,
        }
    }

    /// Tuning applied to agents added through the spawn interface.
    pub const fn spawned() -> Self {
        Self {
            separation_weight: 1.5,
            alignment_weight: 0.25,
            cohesion_weight: 0.025,
            center_weight: 0.05,
            separation_enabled: true,
            alignment_enabled: true,
            cohesion_enabled: true,
            center_enabled: true,
            perception_radius: 60.0,
            move_speed: 175.0,
            turn_speed: 0.1,
        }
    }
}

impl Default for SteeringProfile {
    fn default() -> Self {
        Self::standard()
    }
}

/// What happens to an agent that leaves the simulation space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Positions are unconstrained; the centering bias is the only containment.
    #[default]
    None,
    /// Positions wrap around to the opposite edge.
    Wrap,
}

/// Default extent of the simulation space in each axis
pub const DEFAULT_EXTENT: f32 = 800.0;

/// Simulation-space bounds and the policy applied at its edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub extent: Vec2,
    pub policy: BoundaryPolicy,
}

impl Domain {
    pub const fn new(width: f32, height: f32, policy: BoundaryPolicy) -> Self {
        Self {
            extent: Vec2::new(width, height),
            policy,
        }
    }

    /// Fixed target of the centering bias: half the extent in each axis.
    pub fn center(&self) -> Vec2 {
        self.extent * 0.5
    }

    /// Distance scale of the centering bias. The bias stays below 1 inside
    /// this radius and grows exponentially beyond it.
    pub fn center_radius(&self) -> f32 {
        0.5 * self.extent.x.min(self.extent.y)
    }

    pub fn apply_boundary(&self, position: &mut Vec2) {
        match self.policy {
            BoundaryPolicy::None => {}
            BoundaryPolicy::Wrap => {
                if position.x > self.extent.x {
                    position.x = 0.0;
                } else if position.x < 0.0 {
                    position.x = self.extent.x;
                }
                if position.y > self.extent.y {
                    position.y = 0.0;
                } else if position.y < 0.0 {
                    position.y = self.extent.y;
                }
            }
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENT, DEFAULT_EXTENT, BoundaryPolicy::None)
    }
}

/// A single flocking agent
#[derive(Debug, Clone)]
pub struct Agent {
    pub position: Vec2,
    pub velocity: Vec2,
    acceleration: Vec2,
    profile: SteeringProfile,
    // Aggregates over neighbors, kept for the debug interface
    position_difference: Vec2,
    average_velocity: Vec2,
    average_position: Vec2,
    // Steering vectors produced by the last perception pass
    separation: Vec2,
    alignment: Vec2,
    cohesion: Vec2,
    center: Vec2,
}

impl Agent {
    /// The initial velocity is reduced to a heading; a zero velocity falls
    /// back to +x.
    pub fn new(position: Vec2, velocity: Vec2, profile: SteeringProfile) -> Self {
        Self {
            position,
            velocity: velocity.normalize_or(Vec2::unit_x()),
            acceleration: Vec2::zero(),
            profile,
            position_difference: Vec2::zero(),
            average_velocity: Vec2::zero(),
            average_position: Vec2::zero(),
            separation: Vec2::zero(),
            alignment: Vec2::zero(),
            cohesion: Vec2::zero(),
            center: Vec2::zero(),
        }
    }

    /// Agent at a uniformly random position inside the domain with a random
    /// heading.
    #[cfg(feature = "std")]
    pub fn random(domain: &Domain, profile: SteeringProfile) -> Self {
        let mut rng = rand::thread_rng();
        let position = Vec2::new(
            rng.gen_range(0.0..domain.extent.x),
            rng.gen_range(0.0..domain.extent.y),
        );
        let velocity = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        Self::new(position, velocity, profile)
    }

    /// Perception pass: scan the flock snapshot and derive this agent's
    /// steering vectors. Reads other agents, mutates only this one.
    ///
    /// Each flockmate within `perception_radius` contributes a unit vector
    /// away from it (separation), its velocity (alignment) and its position
    /// (cohesion); the aggregates are then averaged. With no flockmate in
    /// range the aggregates degrade to the agent's own velocity and
    /// position, so the derived vectors cancel to zero instead of braking
    /// the agent. An agent never counts itself: its own entry in the
    /// snapshot sits at distance zero, which the range check excludes.
    pub fn steer(&mut self, flock: &[Agent], domain: &Domain) {
        self.position_difference = Vec2::zero();
        self.average_velocity = Vec2::zero();
        self.average_position = Vec2::zero();
        let mut total = 0u32;

        for other in flock {
            let distance = self.position.distance(other.position);
            if distance > 0.0 && distance <= self.profile.perception_radius {
                if self.profile.separation_enabled {
                    self.position_difference += (self.position - other.position) / distance;
                }
                if self.profile.alignment_enabled {
                    self.average_velocity += other.velocity;
                }
                if self.profile.cohesion_enabled {
                    self.average_position += other.position;
                }
                total += 1;
            }
        }

        if total > 0 {
            let count = total as f32;
            self.position_difference = self.position_difference / count;
            self.average_velocity = self.average_velocity / count;
            self.average_position = self.average_position / count;
        } else {
            self.position_difference = self.velocity;
            self.average_velocity = self.velocity;
            self.average_position = self.position;
        }

        // Disabled behaviors contribute a zero vector rather than a stale one.
        self.separation = if self.profile.separation_enabled {
            self.position_difference - self.velocity
        } else {
            Vec2::zero()
        };
        self.alignment = if self.profile.alignment_enabled {
            self.average_velocity - self.velocity
        } else {
            Vec2::zero()
        };
        self.cohesion = if self.profile.cohesion_enabled {
            self.average_position - self.position
        } else {
            Vec2::zero()
        };
        self.center = if self.profile.center_enabled {
            let target = domain.center();
            let from_center = self.position.distance(target);
            let bias = powf(1.5, (from_center - domain.center_radius()) / 10.0);
            (target - self.position).normalize() * bias
        } else {
            Vec2::zero()
        };
    }

    /// Integration pass: fold the steering vectors into a damped
    /// acceleration and step position over `dt` seconds.
    ///
    /// Only the heading survives from frame to frame. The new velocity is
    /// renormalized and rescaled to `move_speed * dt`, so speed never
    /// accumulates. When heading and acceleration cancel exactly the
    /// previous heading is kept, and failing that +x, so integration never
    /// divides by a zero magnitude.
    pub fn advance(&mut self, dt: f32) {
        self.acceleration = self.separation * self.profile.separation_weight
            + self.alignment * self.profile.alignment_weight
            + self.cohesion * self.profile.cohesion_weight
            + self.center * self.profile.center_weight;
        self.acceleration = self.acceleration * self.profile.turn_speed;

        let heading = (self.velocity + self.acceleration)
            .normalize_or(self.velocity.normalize_or(Vec2::unit_x()));
        self.velocity = heading * (dt * self.profile.move_speed);
        self.position += self.velocity;
    }

    pub fn separation(&self) -> Vec2 {
        self.separation
    }

    pub fn alignment(&self) -> Vec2 {
        self.alignment
    }

    pub fn cohesion(&self) -> Vec2 {
        self.cohesion
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn position_difference(&self) -> Vec2 {
        self.position_difference
    }

    pub fn average_velocity(&self) -> Vec2 {
        self.average_velocity
    }

    pub fn perception_radius(&self) -> f32 {
        self.profile.perception_radius
    }

    pub fn profile(&self) -> &SteeringProfile {
        &self.profile
    }
}

fn step_agents(agents: &mut [Agent], snapshot: &[Agent], domain: &Domain, dt: f32) {
    // Every agent perceives the same start-of-frame snapshot before any
    // agent moves; interleaving the two passes would make the outcome
    // depend on iteration order.
    for agent in agents.iter_mut() {
        agent.steer(snapshot, domain);
    }
    for agent in agents.iter_mut() {
        agent.advance(dt);
        domain.apply_boundary(&mut agent.position);
    }
}

/// A fixed-capacity flock for no_std environments
pub struct FixedFlock<const N: usize> {
    pub agents: heapless::Vec<Agent, N>,
    pub domain: Domain,
}

impl<const N: usize> FixedFlock<N> {
    pub fn new(domain: Domain) -> Self {
        Self {
            agents: heapless::Vec::new(),
            domain,
        }
    }

    pub fn add_agent(&mut self, agent: Agent) -> Result<(), Agent> {
        self.agents.push(agent)
    }

    /// Append an agent with the spawn tuning. Call between frames only.
    pub fn spawn(&mut self, position: Vec2, velocity: Vec2) -> Result<(), Agent> {
        self.agents
            .push(Agent::new(position, velocity, SteeringProfile::spawned()))
    }

    pub fn step(&mut self, dt: f32) {
        let snapshot = self.agents.clone();
        step_agents(&mut self.agents, &snapshot, &self.domain, dt);
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// A growable flock for std environments
#[cfg(feature = "std")]
pub struct Flock {
    pub agents: Vec<Agent>,
    pub domain: Domain,
}

#[cfg(feature = "std")]
impl Flock {
    pub fn new(domain: Domain) -> Self {
        Self {
            agents: Vec::new(),
            domain,
        }
    }

    /// Flock of `count` randomly placed agents with the spawn tuning.
    pub fn with_random_agents(domain: Domain, count: usize) -> Self {
        let agents = (0..count)
            .map(|_| Agent::random(&domain, SteeringProfile::spawned()))
            .collect();
        Self { agents, domain }
    }

    pub fn add_agent(&mut self, agent: Agent) {
        self.agents.push(agent);
    }

    /// Append an agent with the spawn tuning. Call between frames only; a
    /// `step` in progress never observes the new agent.
    pub fn spawn(&mut self, position: Vec2, velocity: Vec2) {
        self.agents
            .push(Agent::new(position, velocity, SteeringProfile::spawned()));
    }

    /// One simulation frame: every agent perceives the start-of-frame
    /// snapshot, then every agent integrates over `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        let snapshot = self.agents.clone();
        step_agents(&mut self.agents, &snapshot, &self.domain, dt);
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
