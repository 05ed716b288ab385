// Per-tick input contract consumed by the runner controller

/// Logical input snapshot for one simulation tick.
///
/// `*_pressed` / `*_released` are true only on the tick the logical state changed;
/// `*_held` is the level. When several physical devices feed the same signal, each
/// query reflects the OR of all of them.
pub trait InputSource {
    fn jump_pressed(&self) -> bool;
    fn jump_held(&self) -> bool;
    fn jump_released(&self) -> bool;

    fn slide_pressed(&self) -> bool;
    fn slide_held(&self) -> bool;
    fn slide_released(&self) -> bool;

    /// Fast-fall modifier
    fn down_held(&self) -> bool;

    /// Signed horizontal axis in [-1, 1]
    fn horizontal(&self) -> f32;
}

/// Plain-data snapshot, handy for scripted input and replays
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub jump_released: bool,
    pub slide_pressed: bool,
    pub slide_held: bool,
    pub slide_released: bool,
    pub down_held: bool,
    pub horizontal: f32,
}

impl InputFrame {
    /// Capture the current state of any input source
    pub fn capture(source: &dyn InputSource) -> Self {
        Self {
            jump_pressed: source.jump_pressed(),
            jump_held: source.jump_held(),
            jump_released: source.jump_released(),
            slide_pressed: source.slide_pressed(),
            slide_held: source.slide_held(),
            slide_released: source.slide_released(),
            down_held: source.down_held(),
            horizontal: source.horizontal().clamp(-1.0, 1.0),
        }
    }
}

impl InputSource for InputFrame {
    fn jump_pressed(&self) -> bool {
        self.jump_pressed
    }

    fn jump_held(&self) -> bool {
        self.jump_held
    }

    fn jump_released(&self) -> bool {
        self.jump_released
    }

    fn slide_pressed(&self) -> bool {
        self.slide_pressed
    }

    fn slide_held(&self) -> bool {
        self.slide_held
    }

    fn slide_released(&self) -> bool {
        self.slide_released
    }

    fn down_held(&self) -> bool {
        self.down_held
    }

    fn horizontal(&self) -> f32 {
        self.horizontal
    }
}
