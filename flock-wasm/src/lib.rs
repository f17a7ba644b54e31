use flock_core::{direction_degrees, Agent, BoundaryPolicy, Domain, Flock, SteeringProfile, Vec2};
use flock_shared::{FlockSettings, ProfileSettings};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

const AGENT_SIZE: f64 = 8.0;
const DEBUG_AGENT: usize = 0;

fn build_profile(settings: &ProfileSettings) -> SteeringProfile {
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

fn build_flock(settings: &FlockSettings) -> Flock {
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

#[wasm_bindgen]
pub struct FlockSimulation {
    flock: Flock,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    running: bool,
    debug_overlay: bool,
}

#[wasm_bindgen]
impl FlockSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        width: f32,
        height: f32,
        agent_count: usize,
    ) -> Result<FlockSimulation, JsValue> {
        console_log!("Initializing flock simulation with {} agents", agent_count);

        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let settings = FlockSettings {
            agent_count,
            width,
            height,
            ..FlockSettings::default()
        };

        Ok(FlockSimulation {
            flock: build_flock(&settings),
            canvas,
            context,
            running: true,
            debug_overlay: false,
        })
    }

    /// Rebuild the flock from a JSON `FlockSettings` document. Steering
    /// profiles are fixed at construction, so retuning means a rebuild.
    pub fn reset(&mut self, settings_json: &str) -> Result<(), JsValue> {
        let settings: FlockSettings = serde_json::from_str(settings_json)
            .map_err(|e| JsValue::from_str(&format!("bad settings: {}", e)))?;
        self.canvas.set_width(settings.width as u32);
        self.canvas.set_height(settings.height as u32);
        self.flock = build_flock(&settings);
        console_log!("Reset flock with {} agents", self.flock.len());
        Ok(())
    }

    /// Advance one frame. `dt` is the measured seconds since the previous
    /// animation frame.
    pub fn update(&mut self, dt: f32) {
        if self.running && dt > 0.0 {
            self.flock.step(dt);
        }
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;

        self.context.set_fill_style_str("#0a0a0a");
        self.context.fill_rect(0.0, 0.0, width, height);

        for agent in &self.flock.agents {
            self.draw_agent(agent)?;
        }

        if self.debug_overlay {
            self.draw_debug_overlay()?;
        }

        Ok(())
    }

    fn draw_agent(&self, agent: &Agent) -> Result<(), JsValue> {
        // The triangle is authored pointing up; +90 degrees turns "up" into
        // the agent's heading.
        let rotation = (direction_degrees(agent.velocity) + 90.0).to_radians() as f64;

        self.context.save();
        self.context
            .translate(agent.position.x as f64, agent.position.y as f64)?;
        self.context.rotate(rotation)?;

        self.context.begin_path();
        self.context.move_to(0.0, -AGENT_SIZE);
        self.context.line_to(-AGENT_SIZE / 2.0, AGENT_SIZE / 2.0);
        self.context.line_to(AGENT_SIZE / 2.0, AGENT_SIZE / 2.0);
        self.context.close_path();

        self.context.set_fill_style_str("#e8e8e8");
        self.context.fill();

        self.context.restore();

        Ok(())
    }

    /// Overlay for one highlighted agent: perception circle, a red line to
    /// each flockmate in range, the separation and alignment aggregates as
    /// lines, and the cohesion target as a dot.
    fn draw_debug_overlay(&self) -> Result<(), JsValue> {
        let Some(agent) = self.flock.agents.get(DEBUG_AGENT) else {
            return Ok(());
        };
        let x = agent.position.x as f64;
        let y = agent.position.y as f64;
        let radius = agent.perception_radius() as f64;

        self.context.set_line_width(1.0);

        self.context.begin_path();
        self.context
            .arc(x, y, radius, 0.0, std::f64::consts::TAU)?;
        self.context.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
        self.context.stroke();

        self.context.set_stroke_style_str("#d04040");
        for other in &self.flock.agents {
            let distance = agent.position.distance(other.position);
            if distance > 0.0 && distance <= agent.perception_radius() {
                self.context.begin_path();
                self.context.move_to(x, y);
                self.context
                    .line_to(other.position.x as f64, other.position.y as f64);
                self.context.stroke();
            }
        }

        // Separation aggregate, scaled up to stay visible.
        let separation_tip =
            agent.position + agent.position_difference() * 10.0;
        self.context.set_stroke_style_str("#4060d0");
        self.context.begin_path();
        self.context.move_to(x, y);
        self.context
            .line_to(separation_tip.x as f64, separation_tip.y as f64);
        self.context.stroke();

        // Mean neighbor heading, drawn at perception-radius length.
        let alignment_tip = agent.position
            + agent.average_velocity().normalize() * agent.perception_radius();
        self.context.set_stroke_style_str("#40c060");
        self.context.begin_path();
        self.context.move_to(x, y);
        self.context
            .line_to(alignment_tip.x as f64, alignment_tip.y as f64);
        self.context.stroke();

        // Mean neighbor position, relative to the agent.
        let cohesion_point = agent.position + agent.cohesion();
        self.context.begin_path();
        self.context.arc(
            cohesion_point.x as f64,
            cohesion_point.y as f64,
            3.0,
            0.0,
            std::f64::consts::TAU,
        )?;
        self.context.set_fill_style_str("#ffffff");
        self.context.fill();

        Ok(())
    }

    /// Spawn one agent at the given point with a random heading. Call
    /// between frames, not from inside `update`.
    pub fn spawn_at(&mut self, x: f32, y: f32) {
        let velocity = Vec2::new(
            (js_sys::Math::random() as f32 - 0.5) * 2.0,
            (js_sys::Math::random() as f32 - 0.5) * 2.0,
        );
        self.flock.spawn(Vec2::new(x, y), velocity);
        console_log!(
            "Spawned agent at ({}, {}). Total agents: {}",
            x,
            y,
            self.flock.len()
        );
    }

    pub fn handle_mouse_click(&mut self, event: MouseEvent) {
        let canvas_element: &Element = self.canvas.as_ref();
        let rect = canvas_element.get_bounding_client_rect();
        let x = event.client_x() as f64 - rect.left();
        let y = event.client_y() as f64 - rect.top();
        self.spawn_at(x as f32, y as f32);
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    pub fn set_debug_overlay(&mut self, enabled: bool) {
        self.debug_overlay = enabled;
    }

    pub fn agent_count(&self) -> usize {
        self.flock.len()
    }
}
