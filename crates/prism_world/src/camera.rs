use prism_dependencies::nalgebra_glm as glm;

/// Pitch is kept just short of straight up/down so `look_at` never sees
/// a front vector parallel to the up vector.
pub const MAX_PITCH_DEGREES: f32 = 89.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CameraDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// First person camera driven by yaw/pitch angles in degrees.
#[derive(Debug, Copy, Clone)]
pub struct FlyCamera {
    pub position: glm::Vec3,
    pub front: glm::Vec3,
    pub up: glm::Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub sensitivity: f32,
    pub speed: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(glm::vec3(0.0, 0.0, 3.0), -90.0, 0.0)
    }
}

impl FlyCamera {
    pub fn new(position: glm::Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: glm::vec3(0.0, 0.0, -1.0),
            up: glm::Vec3::y(),
            yaw,
            pitch: pitch.clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES),
            sensitivity: 0.05,
            speed: 3.0,
        };
        camera.update_front();
        camera
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Offsets are raw cursor deltas. Positive `y_offset` looks up.
    pub fn rotate(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.sensitivity;
        self.pitch = (self.pitch + y_offset * self.sensitivity)
            .clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES);
        self.update_front();
    }

    pub fn translate(&mut self, direction: CameraDirection, delta_time: f32) {
        let velocity = self.speed * delta_time;
        match direction {
            CameraDirection::Forward => self.position += self.front * velocity,
            CameraDirection::Backward => self.position -= self.front * velocity,
            CameraDirection::Left => self.position -= self.right() * velocity,
            CameraDirection::Right => self.position += self.right() * velocity,
        }
    }

    pub fn right(&self) -> glm::Vec3 {
        glm::normalize(&glm::cross(&self.front, &self.up))
    }

    pub fn view_matrix(&self) -> glm::Mat4 {
        glm::look_at(&self.position, &(self.position + self.front), &self.up)
    }

    fn update_front(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = glm::vec3(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.front = glm::normalize(&front);
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub y_fov_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            y_fov_rad: 45_f32.to_radians(),
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

impl PerspectiveCamera {
    pub fn matrix(&self, aspect_ratio: f32) -> glm::Mat4 {
        glm::perspective(aspect_ratio, self.y_fov_rad, self.z_near, self.z_far)
    }
}
