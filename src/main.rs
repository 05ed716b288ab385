use anyhow::Result;
use gilrs::Gilrs;
use log::{debug, info, warn};
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use dash_runner::engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use dash_runner::engine::input::{Action, InputManager, TouchZone};
use dash_runner::engine::physics::{
    body::BodyBuilder, presets, ColliderHandle, CollisionTag, PhysicsWorld, RapierBody,
    RigidBodyHandle, Vector,
};
use dash_runner::game::run::{RunContext, RunState};
use dash_runner::game::runner::{
    Animator, AudioSink, ControllerEvent, HapticSink, MovementController, Presentation,
    RunnerConfig, SoundId,
};

const CONFIG_PATH: &str = "config/runner.ron";
const RUNNER_START: (f32, f32) = (0.0, 1.5);
const OBSTACLE_SPEED: f32 = 6.0;
const OBSTACLE_SPAWN_X: f32 = 20.0;
const OBSTACLE_DESPAWN_X: f32 = -15.0;

struct LogAnimator;

impl Animator for LogAnimator {
    fn trigger(&mut self, name: &'static str) {
        debug!("anim trigger: {}", name);
    }

    fn set_flag(&mut self, _name: &'static str, _value: bool) {}
}

struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, sound: SoundId) {
        debug!("sound: {:?}", sound);
    }
}

struct LogHaptics;

impl HapticSink for LogHaptics {
    fn rumble(&mut self, strength: f32, duration: f32) {
        debug!("rumble: {:.2} for {:.2}s", strength, duration);
    }
}

/// One runner on a flat floor with a single obstacle scrolling past
struct Demo {
    world: PhysicsWorld,
    runner: RigidBodyHandle,
    runner_collider: ColliderHandle,
    obstacle: RigidBodyHandle,
    controller: MovementController,
    run: RunState,
    input: InputManager,
    /// None when no gamepad backend is available
    gamepads: Option<Gilrs>,
    game_loop: GameLoop,
}

impl Demo {
    fn new(config: RunnerConfig) -> Self {
        let run = RunState::default();
        let gravity = run.gravity();
        let mut world = PhysicsWorld::with_gravity(Vector::new(gravity.x, gravity.y));
        world.set_timestep(FIXED_TIMESTEP);

        let floor = world.add_rigid_body(presets::static_body(0.0, 0.0));
        world.add_tagged_collider(
            presets::level_collider(CollisionTag::Ground, 60.0, 1.0),
            floor,
            CollisionTag::Ground,
        );
        let ceiling = world.add_rigid_body(presets::static_body(0.0, 8.0));
        world.add_tagged_collider(
            presets::level_collider(CollisionTag::Ground, 60.0, 1.0),
            ceiling,
            CollisionTag::Ground,
        );

        let obstacle = world.add_rigid_body(
            BodyBuilder::new_kinematic()
                .position(OBSTACLE_SPAWN_X, 1.0)
                .linvel(-OBSTACLE_SPEED, 0.0)
                .build(),
        );
        world.add_tagged_collider(
            presets::level_collider(CollisionTag::Obstacle, 1.0, 1.0),
            obstacle,
            CollisionTag::Obstacle,
        );

        let runner = world.add_rigid_body(presets::runner_body(RUNNER_START.0, RUNNER_START.1));
        let runner_collider = world.add_collider(presets::runner_collider(1.0, 2.0), runner);

        let presentation = Presentation::none()
            .with_animator(LogAnimator)
            .with_audio(LogAudio)
            .with_haptics(LogHaptics);
        let controller = MovementController::new(
            config,
            presentation,
            &RapierBody::new(&mut world, runner, runner_collider),
        );

        Self {
            world,
            runner,
            runner_collider,
            obstacle,
            controller,
            run,
            input: InputManager::default(),
            gamepads: init_gamepads(),
            game_loop: GameLoop::new(),
        }
    }

    fn start(&mut self) {
        self.run.start();
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        // Debug effect, not a bindable action
        if event.physical_key == PhysicalKey::Code(KeyCode::KeyG)
            && event.state == ElementState::Pressed
            && !event.repeat
        {
            self.run.flip_gravity();
        }
        self.input.process_keyboard_event(event);
    }

    fn poll_gamepads(&mut self) {
        let Some(gilrs) = self.gamepads.as_mut() else {
            return;
        };
        while let Some(event) = gilrs.next_event() {
            self.input.process_gamepad_event(&event.event);
        }
    }

    fn frame(&mut self) {
        self.poll_gamepads();
        let ticks = self.game_loop.begin_frame();

        if self.game_loop.is_paused() {
            if self.input.just_pressed(Action::Pause) {
                self.game_loop.resume();
            }
            // Nothing pressed while paused carries over
            self.input.update();
            return;
        }

        for _ in 0..ticks {
            if self.input.just_pressed(Action::Pause) {
                self.game_loop.pause();
                self.input.update();
                break;
            }
            if self.input.just_pressed(Action::Restart) {
                self.restart();
            }
            self.tick();
            self.input.update();
        }
    }

    fn tick(&mut self) {
        let gravity = self.run.gravity();
        self.world.set_gravity(Vector::new(gravity.x, gravity.y));

        {
            let mut body = RapierBody::new(&mut self.world, self.runner, self.runner_collider);
            self.controller
                .tick(FIXED_TIMESTEP, &self.run, self.input.player(), &mut body);
        }

        self.world.step();
        self.recycle_obstacle();

        for tag in self.world.contacts_started(self.runner_collider) {
            self.controller.on_collision(&self.run, tag);
        }

        let events: Vec<ControllerEvent> = self.controller.drain_events().collect();
        for event in events {
            match event {
                ControllerEvent::GameOver => {
                    info!("Game over - press R to restart");
                    self.run.end();
                }
                other => debug!("{:?}", other),
            }
        }
    }

    fn recycle_obstacle(&mut self) {
        if let Some(body) = self.world.get_rigid_body_mut(self.obstacle) {
            if body.translation().x < OBSTACLE_DESPAWN_X {
                body.set_translation(Vector::new(OBSTACLE_SPAWN_X, 1.0), true);
            }
        }
    }

    fn restart(&mut self) {
        {
            let mut body = RapierBody::new(&mut self.world, self.runner, self.runner_collider);
            self.controller.reset(&mut body);
        }
        if let Some(body) = self.world.get_rigid_body_mut(self.runner) {
            body.set_translation(Vector::new(RUNNER_START.0, RUNNER_START.1), true);
            body.set_linvel(Vector::zeros(), true);
        }
        if let Some(body) = self.world.get_rigid_body_mut(self.obstacle) {
            body.set_translation(Vector::new(OBSTACLE_SPAWN_X, 1.0), true);
        }
        self.run.end();
        self.run.start();
    }
}

fn init_gamepads() -> Option<Gilrs> {
    match Gilrs::new() {
        Ok(gilrs) => {
            for (_id, pad) in gilrs.gamepads() {
                info!("Gamepad found: {}", pad.name());
            }
            Some(gilrs)
        }
        Err(err) => {
            warn!("Gamepad support disabled ({})", err);
            None
        }
    }
}

fn load_config() -> RunnerConfig {
    match RunnerConfig::load(CONFIG_PATH) {
        Ok(config) => {
            info!("Loaded runner config from {}", CONFIG_PATH);
            config
        }
        Err(err) => {
            warn!("Using default runner config ({})", err);
            RunnerConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Dash Runner...");

    let mut demo = Demo::new(load_config());

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Dash Runner")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");
    info!("Space/W jump, S/Shift slide, A/D steer, G flips gravity, Esc pauses, R restarts");
    info!("Gamepad: South jumps, East slides, left stick or d-pad steers, Start pauses");
    demo.start();

    // Main event loop
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                demo.handle_key(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => {
                demo.input.process_mouse_button(button, state);
            }
            Event::WindowEvent {
                event: WindowEvent::Touch(touch),
                ..
            } => {
                // Upper half of the screen jumps, lower half slides
                let half = window.inner_size().height as f64 / 2.0;
                let zone = if touch.location.y < half {
                    TouchZone::Upper
                } else {
                    TouchZone::Lower
                };
                demo.input.process_touch(zone, touch.phase);
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                demo.frame();
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        }
    }).map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
