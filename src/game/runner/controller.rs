// Runner movement controller: ground state, jumps, slides, air moves, grants, hits

use glam::Vec2;
use log::{debug, info, trace, warn};

use crate::core::math::{gravity_direction, right_axis, strip_component, tick_down};
use crate::engine::input::InputSource;
use crate::engine::physics::{ColliderShape, CollisionTag, MotionBody};
use crate::game::run::RunContext;

use super::abilities::{AbilityKind, AbilityState};
use super::config::{FeedbackConfig, MovementConfig, RunnerConfig};
use super::events::{anim, ControllerEvent, Presentation, SoundId};
use super::gravity::GravityModel;
use super::ground::GroundSensor;
use super::state::{MovementPhase, MovementState};
use super::ControllerError;

/// What a collision did to the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Not lethal, or the run is already over
    Ignored,
    /// The shield took the hit
    Absorbed,
    /// The run ended
    GameOver,
}

/// Drives one runner body from per-tick input.
///
/// The controller owns its movement state and timers. Everything external is
/// passed in per call: the run context, the input snapshot and the body.
#[derive(Debug)]
pub struct MovementController {
    config: MovementConfig,
    feedback: FeedbackConfig,
    gravity: GravityModel,
    ground: GroundSensor,
    abilities: AbilityState,
    state: MovementState,
    phase: MovementPhase,
    /// Collider captured at construction; every slide restores exactly this
    base_shape: Option<ColliderShape>,
    presentation: Presentation,
    events: Vec<ControllerEvent>,
    game_over: bool,
}

impl MovementController {
    pub fn new<B: MotionBody + ?Sized>(config: RunnerConfig, presentation: Presentation, body: &B) -> Self {
        let RunnerConfig { movement, feedback } = config;
        let base_shape = body.collider_shape();
        if base_shape.is_none() {
            warn!("Runner body has no resizable collider; slides will not change its shape");
        }

        Self {
            gravity: GravityModel::from_config(&movement),
            ground: GroundSensor::new(movement.ground_probe_distance),
            abilities: AbilityState::new(),
            state: MovementState::grounded(movement.base_air_jumps, movement.coyote_time),
            phase: MovementPhase::Running,
            base_shape,
            presentation,
            events: Vec::new(),
            game_over: false,
            config: movement,
            feedback,
        }
    }

    /// Advance the controller by one fixed step.
    ///
    /// Does nothing while the run is inactive or after game over.
    pub fn tick<B: MotionBody + ?Sized>(
        &mut self,
        dt: f32,
        run: &dyn RunContext,
        input: &dyn InputSource,
        body: &mut B,
    ) {
        if !run.is_run_active() || self.game_over {
            return;
        }
        if !(dt.is_finite() && dt > 0.0) {
            warn!("Ignoring tick with dt = {}", dt);
            return;
        }

        let gravity = run.gravity();
        // Re-derived every tick; gravity may flip between any two steps.
        // Zero gravity keeps probing and launching along world down.
        let down = gravity_direction(gravity, self.config.gravity_epsilon).unwrap_or(Vec2::NEG_Y);

        self.update_ground(body, down, dt);

        self.state.dash_cooldown_timer = tick_down(self.state.dash_cooldown_timer, dt);
        self.abilities.tick(dt);
        self.state.jump_held = input.jump_held();

        self.update_jump(input, body, down, dt);
        self.update_variable_jump(input, body, down, dt);

        // Cleared by a jump this tick, so a same-tick slide press acts airborne
        let on_ground = self.state.grounded;
        let mut slide_started = false;
        if input.slide_pressed() {
            slide_started = self.on_slide_pressed(input.horizontal(), on_ground, body, down);
        }
        slide_started |= self.update_slide_buffer(on_ground, body, down, dt);
        self.update_slide(input, body, dt, slide_started);

        let extra = self.gravity.extra_acceleration(
            body.velocity(),
            gravity,
            input.jump_held(),
            input.down_held(),
            dt,
        );
        if extra != Vec2::ZERO {
            trace!("Gravity shaping: ({:.3}, {:.3})", extra.x, extra.y);
            body.apply_impulse(extra);
        }

        self.phase = MovementPhase::from_state(
            &self.state,
            body.velocity().dot(down),
            input.down_held(),
            self.game_over,
        );
        self.presentation.set_flag(anim::GROUNDED, self.state.grounded);
        self.presentation.set_flag(anim::SLIDING, self.state.sliding);
    }

    /// Report a contact with level geometry.
    ///
    /// Non-lethal tags are ignored, and so is everything while the run is inactive.
    pub fn on_collision(&mut self, run: &dyn RunContext, tag: CollisionTag) -> HitOutcome {
        if !run.is_run_active() || self.game_over || !tag.is_lethal() {
            return HitOutcome::Ignored;
        }

        if self.abilities.absorb_hit() {
            info!("Shield absorbed {:?} contact", tag);
            self.events.push(ControllerEvent::ShieldAbsorbed);
            self.presentation.sound(SoundId::ShieldBreak);
            self.presentation.rumble(self.feedback.shield_rumble);
            return HitOutcome::Absorbed;
        }

        info!("Runner hit {:?}: game over", tag);
        self.game_over = true;
        self.phase = MovementPhase::Dead;
        self.events.push(ControllerEvent::Hit);
        self.events.push(ControllerEvent::GameOver);
        self.presentation.trigger(anim::HIT);
        self.presentation.sound(SoundId::Hit);
        self.presentation.rumble(self.feedback.hit_rumble);
        HitOutcome::GameOver
    }

    /// Grant one bonus air jump for `duration` seconds.
    ///
    /// While grounded the charge is available immediately.
    pub fn activate_extra_air_jump(
        &mut self,
        run: &dyn RunContext,
        duration: f32,
    ) -> Result<(), ControllerError> {
        self.activate(run, AbilityKind::ExtraAirJump, duration)?;
        if self.state.grounded {
            let granted = self.config.base_air_jumps + self.abilities.bonus_air_jumps();
            self.state.jumps_remaining = self.state.jumps_remaining.max(granted);
        }
        Ok(())
    }

    /// Absorb the next lethal contact within `duration` seconds
    pub fn activate_shield(
        &mut self,
        run: &dyn RunContext,
        duration: f32,
    ) -> Result<(), ControllerError> {
        self.activate(run, AbilityKind::Shield, duration)
    }

    fn activate(
        &mut self,
        run: &dyn RunContext,
        kind: AbilityKind,
        duration: f32,
    ) -> Result<(), ControllerError> {
        if !run.is_run_active() || self.game_over {
            let err = ControllerError::RunInactive { ability: kind };
            warn!("{}", err);
            return Err(err);
        }
        if let Err(err) = self.abilities.activate(kind, duration) {
            warn!("{}", err);
            return Err(err);
        }
        info!("{:?} active for {:.2}s", kind, duration);
        self.presentation.sound(SoundId::PowerUp);
        Ok(())
    }

    /// Back to a fresh grounded runner: grants cleared, collider restored
    pub fn reset<B: MotionBody + ?Sized>(&mut self, body: &mut B) {
        if let Some(base) = self.base_shape {
            body.set_collider_shape(base);
        }
        self.state = MovementState::grounded(self.config.base_air_jumps, self.config.coyote_time);
        self.phase = MovementPhase::Running;
        self.abilities.clear();
        self.events.clear();
        self.game_over = false;
        debug!("Runner controller reset");
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn phase(&self) -> MovementPhase {
        self.phase
    }

    pub fn abilities(&self) -> &AbilityState {
        &self.abilities
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    pub fn is_sliding(&self) -> bool {
        self.state.sliding
    }

    pub fn jumps_remaining(&self) -> u32 {
        self.state.jumps_remaining
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Take all events queued since the last drain, oldest first
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, ControllerEvent> {
        self.events.drain(..)
    }

    fn update_ground<B: MotionBody + ?Sized>(&mut self, body: &mut B, down: Vec2, dt: f32) {
        let was_grounded = self.state.grounded;
        // Right after a jump the ground cast can still reach the floor we launched from
        self.state.ground_lockout_timer = tick_down(self.state.ground_lockout_timer, dt);
        let grounded = self.state.ground_lockout_timer <= 0.0
            && self.ground.query(&*body, body.position(), down);
        self.state.grounded = grounded;

        if grounded {
            if !was_grounded {
                self.state.jumps_remaining =
                    self.config.base_air_jumps + self.abilities.bonus_air_jumps();
                self.state.coyote_timer = self.config.coyote_time;
                self.state.air_dive_pending = false;
                debug!("Landed, {} air jumps", self.state.jumps_remaining);
                self.events.push(ControllerEvent::Landed);
            }
        } else {
            self.state.coyote_timer = tick_down(self.state.coyote_timer, dt);
            if self.state.sliding {
                self.end_slide(body);
            }
        }
    }

    fn update_jump<B: MotionBody + ?Sized>(
        &mut self,
        input: &dyn InputSource,
        body: &mut B,
        down: Vec2,
        dt: f32,
    ) {
        if input.jump_pressed() {
            self.state.jump_buffer_timer = self.config.jump_buffer_time;
        } else if self.state.jump_buffer_timer <= 0.0 {
            return;
        }

        let can_jump = self.state.grounded
            || self.state.coyote_timer > 0.0
            || self.state.jumps_remaining > 0;
        if !can_jump {
            self.state.jump_buffer_timer = tick_down(self.state.jump_buffer_timer, dt);
            return;
        }

        self.jump(body, down, input.jump_held());
        self.state.jump_buffer_timer = 0.0;
    }

    /// The boost window only opens if jump is still held when the launch fires
    fn jump<B: MotionBody + ?Sized>(&mut self, body: &mut B, down: Vec2, held: bool) {
        let air_jump = !self.state.grounded && self.state.coyote_timer <= 0.0;
        if air_jump {
            self.state.jumps_remaining = self.state.jumps_remaining.saturating_sub(1);
        }
        if self.state.sliding {
            self.end_slide(body);
        }

        // Fresh launch: whatever was moving along gravity is discarded
        let velocity = strip_component(body.velocity(), down);
        body.set_velocity(velocity);
        body.apply_impulse(-down * self.config.jump_force);

        self.state.variable_jump_timer = if held {
            self.config.variable_jump_time
        } else {
            0.0
        };
        self.state.coyote_timer = 0.0;
        self.state.ground_lockout_timer = self.config.jump_ground_lockout;
        self.state.grounded = false;

        debug!(
            "Jump (air: {}), {} air jumps left",
            air_jump, self.state.jumps_remaining
        );
        self.events.push(ControllerEvent::Jumped { air_jump });
        self.presentation.trigger(anim::JUMP);
        self.presentation.sound(SoundId::Jump);
        self.presentation.rumble(self.feedback.jump_rumble);
    }

    fn update_variable_jump<B: MotionBody + ?Sized>(
        &mut self,
        input: &dyn InputSource,
        body: &mut B,
        down: Vec2,
        dt: f32,
    ) {
        if input.jump_released() {
            self.state.variable_jump_timer = 0.0;
            return;
        }
        if self.state.variable_jump_timer <= 0.0 {
            return;
        }
        // The window closes on time whether or not jump is held
        if input.jump_held() {
            let window = dt.min(self.state.variable_jump_timer);
            body.apply_impulse(-down * self.config.variable_jump_force * window);
        }
        self.state.variable_jump_timer = tick_down(self.state.variable_jump_timer, dt);
    }

    /// Returns whether a slide started
    fn on_slide_pressed<B: MotionBody + ?Sized>(
        &mut self,
        horizontal: f32,
        on_ground: bool,
        body: &mut B,
        down: Vec2,
    ) -> bool {
        if on_ground {
            if self.state.sliding {
                return false;
            }
            return self.start_slide(body, down);
        }

        let horizontal = horizontal.clamp(-1.0, 1.0);
        if horizontal.abs() > self.config.dash_input_threshold
            && self.state.dash_cooldown_timer <= 0.0
        {
            self.air_dash(body, down, horizontal);
            return false;
        }

        self.state.slide_buffer_timer = self.config.slide_buffer_time;
        if !self.state.air_dive_pending {
            self.state.air_dive_pending = true;
            body.apply_impulse(down * self.config.air_dive_force);
            debug!("Air dive");
            self.events.push(ControllerEvent::AirDiveStarted);
        }
        false
    }

    fn air_dash<B: MotionBody + ?Sized>(&mut self, body: &mut B, down: Vec2, horizontal: f32) {
        let direction = right_axis(down) * horizontal.signum();
        let velocity = strip_component(body.velocity(), direction);
        body.set_velocity(velocity);
        body.apply_impulse(direction * self.config.dash_force);
        self.state.dash_cooldown_timer = self.config.dash_cooldown;

        debug!("Air dash towards ({:.2}, {:.2})", direction.x, direction.y);
        self.events.push(ControllerEvent::AirDashed { direction });
        self.presentation.trigger(anim::AIR_DASH);
        self.presentation.sound(SoundId::Dash);
        self.presentation.rumble(self.feedback.dash_rumble);
    }

    /// Returns whether a buffered slide started on touchdown
    fn update_slide_buffer<B: MotionBody + ?Sized>(
        &mut self,
        on_ground: bool,
        body: &mut B,
        down: Vec2,
        dt: f32,
    ) -> bool {
        if self.state.slide_buffer_timer <= 0.0 || self.state.sliding {
            return false;
        }
        if on_ground {
            return self.start_slide(body, down);
        }
        self.state.slide_buffer_timer = tick_down(self.state.slide_buffer_timer, dt);
        false
    }

    fn update_slide<B: MotionBody + ?Sized>(
        &mut self,
        input: &dyn InputSource,
        body: &mut B,
        dt: f32,
        started_this_tick: bool,
    ) {
        if !self.state.sliding {
            return;
        }
        if input.slide_released() {
            self.end_slide(body);
            return;
        }
        if started_this_tick {
            return;
        }
        self.state.slide_timer = tick_down(self.state.slide_timer, dt);
        if self.state.slide_timer <= 0.0 {
            self.end_slide(body);
        }
    }

    fn start_slide<B: MotionBody + ?Sized>(&mut self, body: &mut B, down: Vec2) -> bool {
        if self.config.slide_duration <= 0.0 {
            return false;
        }

        self.state.sliding = true;
        self.state.slide_timer = self.config.slide_duration;
        self.state.slide_buffer_timer = 0.0;
        self.state.air_dive_pending = false;
        if let Some(base) = self.base_shape {
            body.set_collider_shape(base.crouched(down));
        }

        debug!("Slide started");
        self.events.push(ControllerEvent::SlideStarted);
        self.presentation.trigger(anim::SLIDE);
        self.presentation.sound(SoundId::Slide);
        true
    }

    fn end_slide<B: MotionBody + ?Sized>(&mut self, body: &mut B) {
        self.state.sliding = false;
        self.state.slide_timer = 0.0;
        if let Some(base) = self.base_shape {
            body.set_collider_shape(base);
        }
        debug!("Slide ended");
        self.events.push(ControllerEvent::SlideEnded);
    }
}
