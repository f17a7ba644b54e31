use flock_cli::{agent_reports, build_flock, run, summarize};
use flock_core::Vec2;
use flock_shared::FlockSettings;

const DT: f32 = 1.0 / 60.0;

#[test]
fn headless_run_keeps_state_finite() {
    let settings = FlockSettings {
        agent_count: 30,
        ..FlockSettings::default()
    };
    let mut flock = build_flock(&settings);
    run(&mut flock, 120, DT);

    assert_eq!(flock.len(), 30);
    for agent in &flock.agents {
        assert!(agent.position.x.is_finite());
        assert!(agent.position.y.is_finite());
        assert!(agent.velocity.x.is_finite());
        assert!(agent.velocity.y.is_finite());
    }
}

#[test]
fn mean_speed_matches_move_speed() {
    let settings = FlockSettings::default();
    let mut flock = build_flock(&settings);
    run(&mut flock, 10, DT);

    let summary = summarize(&flock, 10);
    let expected = settings.profile.move_speed * DT;
    assert_eq!(summary.agent_count, settings.agent_count);
    assert!(
        (summary.mean_speed - expected).abs() < expected * 1e-3,
        "mean speed {} != {}",
        summary.mean_speed,
        expected
    );
}

#[test]
fn spawning_between_frames_grows_the_flock() {
    let settings = FlockSettings {
        agent_count: 10,
        ..FlockSettings::default()
    };
    let mut flock = build_flock(&settings);
    run(&mut flock, 10, DT);

    flock.spawn(Vec2::new(400.0, 400.0), Vec2::new(1.0, -1.0));
    run(&mut flock, 10, DT);

    assert_eq!(flock.len(), 11);
    let reports = agent_reports(&flock);
    assert_eq!(reports.len(), 11);
    for report in &reports {
        assert!(report.heading_degrees > -90.0 && report.heading_degrees <= 270.0);
    }
}

#[test]
fn wrap_policy_keeps_agents_inside_the_domain() {
    let settings = FlockSettings {
        agent_count: 20,
        wrap_edges: true,
        ..FlockSettings::default()
    };
    let mut flock = build_flock(&settings);
    run(&mut flock, 600, DT);

    for agent in &flock.agents {
        assert!(agent.position.x >= 0.0 && agent.position.x <= settings.width);
        assert!(agent.position.y >= 0.0 && agent.position.y <= settings.height);
    }
}

#[test]
fn settings_document_shapes_the_run() {
    let json = r#"{
        "agent_count": 8,
        "width": 400.0,
        "height": 300.0,
        "wrap_edges": false,
        "profile": {
            "separation_weight": 1.0,
            "alignment_weight": 1.0,
            "cohesion_weight": 1.0,
            "center_weight": 1.0,
            "separation_enabled": true,
            "alignment_enabled": true,
            "cohesion_enabled": true,
            "center_enabled": true,
            "perception_radius": 50.0,
            "move_speed": 100.0,
            "turn_speed": 0.25
        }
    }"#;
    let settings: FlockSettings = serde_json::from_str(json).unwrap();
    let mut flock = build_flock(&settings);
    run(&mut flock, 30, DT);

    assert_eq!(flock.len(), 8);
    assert_eq!(flock.domain.extent, Vec2::new(400.0, 300.0));
}
