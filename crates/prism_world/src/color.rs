use prism_dependencies::nalgebra_glm as glm;

/// Frequencies of the red, green and blue channels of [`pulse_color`].
pub const PULSE_FREQUENCIES: [f32; 3] = [1.0, 0.6, 0.2];

/// Each channel oscillates in `[0, 1]` at its own frequency. Alpha is always 1.
pub fn pulse_color(seconds: f32) -> glm::Vec4 {
    let channel = |frequency: f32| ((frequency * seconds).sin() + 1.0) / 2.0;
    glm::vec4(
        channel(PULSE_FREQUENCIES[0]),
        channel(PULSE_FREQUENCIES[1]),
        channel(PULSE_FREQUENCIES[2]),
        1.0,
    )
}

/// A single channel that walks by `step` each frame and turns around at 0 and 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BouncingColor {
    value: f32,
    step: f32,
}

impl BouncingColor {
    pub fn new(value: f32, step: f32) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            step,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn advance(&mut self) -> f32 {
        self.value += self.step;
        if self.value >= 1.0 {
            self.value = 1.0;
            self.step = -self.step.abs();
        } else if self.value <= 0.0 {
            self.value = 0.0;
            self.step = self.step.abs();
        }
        self.value
    }
}
