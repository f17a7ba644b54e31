#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};

/// Steering tuning for agents, as carried across the presentation boundary.
///
/// Frontends build an immutable core profile from this once, at flock
/// construction; changing the tuning afterwards means rebuilding the flock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProfileSettings {
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub center_weight: f32,
    pub separation_enabled: bool,
    pub alignment_enabled: bool,
    pub cohesion_enabled: bool,
    pub center_enabled: bool,
    pub perception_radius: f32,
    pub move_speed: f32,
    pub turn_speed: f32,
}

impl Default for ProfileSettings {
    fn default() -> Self {
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

/// Full simulation setup a frontend needs to build a flock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlockSettings {
    pub agent_count: usize,
    pub width: f32,
    pub height: f32,
    /// Wrap positions at the edges instead of leaving them unconstrained.
    pub wrap_edges: bool,
    pub profile: ProfileSettings,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self {
            agent_count: 60,
            width: 800.0,
            height: 800.0,
            wrap_edges: false,
            profile: ProfileSettings::default(),
        }
    }
}

/// Snapshot of a single agent, emitted by headless runs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentReport {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub heading_degrees: f32,
}

/// Aggregate outcome of a headless run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub agent_count: usize,
    pub mean_speed: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_matches_spawn_tuning() {
        let profile = ProfileSettings::default();
        assert_eq!(profile.separation_weight, 1.5);
        assert_eq!(profile.alignment_weight, 0.25);
        assert_eq!(profile.cohesion_weight, 0.025);
        assert_eq!(profile.center_weight, 0.05);
        assert_eq!(profile.perception_radius, 60.0);
        assert_eq!(profile.move_speed, 175.0);
        assert_eq!(profile.turn_speed, 0.1);
    }

    #[test]
    fn test_settings_from_partial_json() {
        // Hand-written settings files usually override a field or two.
        let settings: FlockSettings = serde_json::from_str(
            r#"{
                "agent_count": 12,
                "width": 400.0,
                "height": 400.0,
                "wrap_edges": true,
                "profile": {
                    "separation_weight": 2.0,
                    "alignment_weight": 0.25,
                    "cohesion_weight": 0.025,
                    "center_weight": 0.05,
                    "separation_enabled": true,
                    "alignment_enabled": true,
                    "cohesion_enabled": true,
                    "center_enabled": false,
                    "perception_radius": 60.0,
                    "move_speed": 175.0,
                    "turn_speed": 0.1
                }
            }"#,
        )
        .unwrap();
        assert_eq!(settings.agent_count, 12);
        assert!(settings.wrap_edges);
        assert_eq!(settings.profile.separation_weight, 2.0);
        assert!(!settings.profile.center_enabled);
    }
}
