// Timed power-up grants (extra air jump, shield)

use crate::core::math::tick_down;

use super::ControllerError;

/// Kinds of temporary grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    /// One extra air jump per airborne excursion
    ExtraAirJump,
    /// Absorbs one obstacle or hazard contact
    Shield,
}

/// A live grant and its remaining time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityGrant {
    pub kind: AbilityKind,
    pub remaining: f32,
}

/// Countdown timers for the temporary grants
#[derive(Debug, Default, Clone)]
pub struct AbilityState {
    extra_air_jump: Option<AbilityGrant>,
    shield: Option<AbilityGrant>,
}

impl AbilityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start or refresh a grant. Non-positive durations are rejected untouched.
    pub fn activate(&mut self, kind: AbilityKind, duration: f32) -> Result<(), ControllerError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(ControllerError::InvalidDuration {
                ability: kind,
                duration,
            });
        }

        *self.slot_mut(kind) = Some(AbilityGrant {
            kind,
            remaining: duration,
        });
        Ok(())
    }

    pub fn is_active(&self, kind: AbilityKind) -> bool {
        self.slot(kind).is_some()
    }

    pub fn remaining(&self, kind: AbilityKind) -> f32 {
        self.slot(kind).map_or(0.0, |grant| grant.remaining)
    }

    /// Bonus air jumps currently granted
    pub fn bonus_air_jumps(&self) -> u32 {
        u32::from(self.is_active(AbilityKind::ExtraAirJump))
    }

    /// Consume the shield if one is up; returns whether a hit was absorbed
    pub fn absorb_hit(&mut self) -> bool {
        self.shield.take().is_some()
    }

    /// Count every grant down; grants reaching zero are cleared
    pub fn tick(&mut self, dt: f32) {
        for slot in [&mut self.extra_air_jump, &mut self.shield] {
            let expired = match slot.as_mut() {
                Some(grant) => {
                    grant.remaining = tick_down(grant.remaining, dt);
                    grant.remaining <= 0.0
                }
                None => false,
            };
            if expired {
                if let Some(grant) = slot.take() {
                    log::debug!("{:?} expired", grant.kind);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.extra_air_jump = None;
        self.shield = None;
    }

    fn slot(&self, kind: AbilityKind) -> Option<&AbilityGrant> {
        match kind {
            AbilityKind::ExtraAirJump => self.extra_air_jump.as_ref(),
            AbilityKind::Shield => self.shield.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: AbilityKind) -> &mut Option<AbilityGrant> {
        match kind {
            AbilityKind::ExtraAirJump => &mut self.extra_air_jump,
            AbilityKind::Shield => &mut self.shield,
        }
    }
}
