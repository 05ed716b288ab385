// Outbound notifications: lifecycle events and fire-and-forget presentation requests

use glam::Vec2;

/// Lifecycle notifications, queued in tick order and drained by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    Jumped { air_jump: bool },
    Landed,
    SlideStarted,
    SlideEnded,
    AirDashed { direction: Vec2 },
    AirDiveStarted,
    ShieldAbsorbed,
    Hit,
    GameOver,
}

/// Sounds the controller may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Jump,
    Slide,
    Dash,
    Hit,
    ShieldBreak,
    PowerUp,
}

/// Animation trigger/flag names
pub mod anim {
    pub const JUMP: &str = "jump";
    pub const SLIDE: &str = "slide";
    pub const AIR_DASH: &str = "air_dash";
    pub const HIT: &str = "hit";
    pub const GROUNDED: &str = "grounded";
    pub const SLIDING: &str = "sliding";
}

pub trait Animator {
    fn trigger(&mut self, name: &'static str);
    fn set_flag(&mut self, name: &'static str, value: bool);
}

pub trait AudioSink {
    fn play(&mut self, sound: SoundId);
}

pub trait HapticSink {
    /// `strength` in [0, 1], `duration` in seconds
    fn rumble(&mut self, strength: f32, duration: f32);
}

/// Optional presentation collaborators, fixed at construction.
///
/// Absent sinks make the matching request a no-op.
#[derive(Default)]
pub struct Presentation {
    animator: Option<Box<dyn Animator>>,
    audio: Option<Box<dyn AudioSink>>,
    haptics: Option<Box<dyn HapticSink>>,
}

impl Presentation {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_animator(mut self, animator: impl Animator + 'static) -> Self {
        self.animator = Some(Box::new(animator));
        self
    }

    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    pub fn with_haptics(mut self, haptics: impl HapticSink + 'static) -> Self {
        self.haptics = Some(Box::new(haptics));
        self
    }

    pub(crate) fn trigger(&mut self, name: &'static str) {
        if let Some(animator) = self.animator.as_mut() {
            animator.trigger(name);
        }
    }

    pub(crate) fn set_flag(&mut self, name: &'static str, value: bool) {
        if let Some(animator) = self.animator.as_mut() {
            animator.set_flag(name, value);
        }
    }

    pub(crate) fn sound(&mut self, sound: SoundId) {
        if let Some(audio) = self.audio.as_mut() {
            audio.play(sound);
        }
    }

    pub(crate) fn rumble(&mut self, (strength, duration): (f32, f32)) {
        if let Some(haptics) = self.haptics.as_mut() {
            haptics.rumble(strength.clamp(0.0, 1.0), duration.max(0.0));
        }
    }
}

impl std::fmt::Debug for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presentation")
            .field("animator", &self.animator.is_some())
            .field("audio", &self.audio.is_some())
            .field("haptics", &self.haptics.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Rumbles(Rc<RefCell<Vec<(f32, f32)>>>);

    impl HapticSink for Rumbles {
        fn rumble(&mut self, strength: f32, duration: f32) {
            self.0.borrow_mut().push((strength, duration));
        }
    }

    #[test]
    fn test_missing_sinks_are_noops() {
        let mut presentation = Presentation::none();
        presentation.trigger(anim::JUMP);
        presentation.set_flag(anim::GROUNDED, true);
        presentation.sound(SoundId::Jump);
        presentation.rumble((1.0, 0.1));
    }

    #[test]
    fn test_rumble_clamped() {
        let rumbles = Rumbles::default();
        let mut presentation = Presentation::none().with_haptics(rumbles.clone());

        presentation.rumble((1.7, -0.2));
        presentation.rumble((-0.5, 0.3));
        assert_eq!(*rumbles.0.borrow(), vec![(1.0, 0.0), (0.0, 0.3)]);
    }

    #[test]
    fn test_debug_shows_presence_only() {
        let presentation = Presentation::none().with_haptics(Rumbles::default());
        let text = format!("{:?}", presentation);
        assert!(text.contains("haptics: true"));
        assert!(text.contains("audio: false"));
    }
}
