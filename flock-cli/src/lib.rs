use flock_core::{direction_degrees, Agent, BoundaryPolicy, Domain, Flock, SteeringProfile};
use flock_shared::{AgentReport, FlockSettings, ProfileSettings, RunSummary};

pub fn build_profile(settings: &ProfileSettings) -> SteeringProfile {
    SteeringProfile {
        separation_weight: settings.separation_weight,
        alignment_weight: settings.alignment_weight,
        cohesion_weight: settings.cohesion_weight,
        center_weight: settings.center_weight,
        separation_enabled: settings.separation_enabled,
        alignment_enabled: settings.alignment_enabled,
        cohesion_enabled: settings.cohesion_enabled,
        center_enabled: settings.center_enabled,
        perception_radius: settings.perception_radius,
        move_speed: settings.move_speed,
        turn_speed: settings.turn_speed,
    }
}

pub fn build_flock(settings: &FlockSettings) -> Flock {
    let policy = if settings.wrap_edges {
        BoundaryPolicy::Wrap
    } else {
        BoundaryPolicy::None
    };
    let domain = Domain::new(settings.width, settings.height, policy);
    let profile = build_profile(&settings.profile);
    let mut flock = Flock::new(domain);
    for _ in 0..settings.agent_count {
        flock.add_agent(Agent::random(&domain, profile));
    }
    flock
}

/// Drive the flock for a fixed number of frames at a fixed timestep.
pub fn run(flock: &mut Flock, frames: u64, dt: f32) {
    for frame in 0..frames {
        flock.step(dt);
        if frame % 120 == 0 {
            log::debug!("frame {}: {} agents", frame, flock.len());
        }
    }
}

pub fn agent_reports(flock: &Flock) -> Vec<AgentReport> {
    flock
        .agents
        .iter()
        .map(|agent| AgentReport {
            x: agent.position.x,
            y: agent.position.y,
            vx: agent.velocity.x,
            vy: agent.velocity.y,
            heading_degrees: direction_degrees(agent.velocity),
        })
        .collect()
}

pub fn summarize(flock: &Flock, frames: u64) -> RunSummary {
    let agent_count = flock.len();
    let mean_speed = if agent_count > 0 {
        flock
            .agents
            .iter()
            .map(|agent| agent.velocity.magnitude())
            .sum::<f32>()
            / agent_count as f32
    } else {
        0.0
    };
    RunSummary {
        frames,
        agent_count,
        mean_speed,
    }
}
