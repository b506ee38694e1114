use crate::Transform;
use prism_dependencies::nalgebra_glm as glm;

/// Position only.
pub const TRIANGLE_LAYOUT: [u32; 1] = [3];

#[rustfmt::skip]
pub const TRIANGLE_VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

/// Position only.
pub const RECTANGLE_LAYOUT: [u32; 1] = [3];

#[rustfmt::skip]
pub const RECTANGLE_VERTICES: [f32; 12] = [
     0.5,  0.5, 0.0, // top right
     0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5,  0.5, 0.0, // top left
];

#[rustfmt::skip]
pub const RECTANGLE_INDICES: [u32; 6] = [
    0, 1, 3,
    1, 2, 3,
];

/// Position, color, texture coordinates.
pub const CUBE_LAYOUT: [u32; 3] = [3, 3, 2];

pub const CUBE_VERTEX_COUNT: usize = 36;

#[rustfmt::skip]
pub const CUBE_VERTICES: [f32; CUBE_VERTEX_COUNT * 8] = [
    -0.5, -0.5, -0.5,  0.0, 0.4, 0.2,  0.0, 0.0,
     0.5, -0.5, -0.5,  0.0, 0.4, 0.2,  1.0, 0.0,
     0.5,  0.5, -0.5,  0.0, 0.4, 0.2,  1.0, 1.0,
     0.5,  0.5, -0.5,  0.0, 0.4, 0.2,  1.0, 1.0,
    -0.5,  0.5, -0.5,  0.0, 0.4, 0.2,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 0.4, 0.2,  0.0, 0.0,

    -0.5, -0.5,  0.5,  0.0, 0.4, 0.2,  0.0, 0.0,
     0.5, -0.5,  0.5,  0.0, 0.4, 0.2,  1.0, 0.0,
     0.5,  0.5,  0.5,  0.0, 0.4, 0.2,  1.0, 1.0,
     0.5,  0.5,  0.5,  0.0, 0.4, 0.2,  1.0, 1.0,
    -0.5,  0.5,  0.5,  0.0, 0.4, 0.2,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.4, 0.2,  0.0, 0.0,

    -0.5,  0.5,  0.5,  0.0, 0.4, 0.2,  1.0, 0.0,
    -0.5,  0.5, -0.5,  0.0, 0.4, 0.2,  1.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 0.4, 0.2,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 0.4, 0.2,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.4, 0.2,  0.0, 0.0,
    -0.5,  0.5,  0.5,  0.0, 0.4, 0.2,  1.0, 0.0,

     0.5,  0.5,  0.5,  0.0, 0.4, 0.2,  1.0, 0.0,
     0.5,  0.5, -0.5,  0.0, 0.4, 0.2,  1.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 0.4, 0.2,  0.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 0.4, 0.2,  0.0, 1.0,
     0.5, -0.5,  0.5,  0.0, 0.4, 0.2,  0.0, 0.0,
     0.5,  0.5,  0.5,  0.0, 0.4, 0.2,  1.0, 0.0,

    -0.5, -0.5, -0.5,  0.0, 0.4, 0.2,  0.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 0.4, 0.2,  1.0, 1.0,
     0.5, -0.5,  0.5,  0.0, 0.4, 0.2,  1.0, 0.0,
     0.5, -0.5,  0.5,  0.0, 0.4, 0.2,  1.0, 0.0,
    -0.5, -0.5,  0.5,  0.0, 0.4, 0.2,  0.0, 0.0,
    -0.5, -0.5, -0.5,  0.0, 0.4, 0.2,  0.0, 1.0,

    -0.5,  0.5, -0.5,  0.0, 0.4, 0.2,  0.0, 1.0,
     0.5,  0.5, -0.5,  0.0, 0.4, 0.2,  1.0, 1.0,
     0.5,  0.5,  0.5,  0.0, 0.4, 0.2,  1.0, 0.0,
     0.5,  0.5,  0.5,  0.0, 0.4, 0.2,  1.0, 0.0,
    -0.5,  0.5,  0.5,  0.0, 0.4, 0.2,  0.0, 0.0,
    -0.5,  0.5, -0.5,  0.0, 0.4, 0.2,  0.0, 1.0,
];

#[rustfmt::skip]
pub const CUBE_POSITIONS: [[f32; 3]; 10] = [
    [ 0.0,  0.0,   0.0],
    [ 2.0,  5.0, -15.0],
    [-1.5, -2.2,  -2.5],
    [-3.8, -2.0, -12.3],
    [ 2.4, -0.4,  -3.5],
    [-1.7,  3.0,  -7.5],
    [ 1.3, -2.0,  -2.5],
    [ 1.5,  2.0,  -2.5],
    [ 1.5,  0.2,  -1.5],
    [-1.3,  1.0,  -1.5],
];

/// Axis every cube spins around. Not normalized.
pub fn cube_rotation_axis() -> glm::Vec3 {
    glm::vec3(1_f32.cos(), 1_f32.sin(), 0.0)
}

pub fn cube_positions() -> impl Iterator<Item = glm::Vec3> {
    CUBE_POSITIONS
        .iter()
        .map(|position| glm::make_vec3(position))
}

/// Model matrix of every cube at `seconds`. Cube `i` has turned
/// `seconds * (i + 1)` radians around [`cube_rotation_axis`].
pub fn cube_models(seconds: f32) -> impl Iterator<Item = glm::Mat4> {
    let axis = cube_rotation_axis();
    cube_positions().enumerate().map(move |(index, position)| {
        let angle = seconds * (index + 1) as f32;
        Transform::spinning(position, &axis, angle).matrix()
    })
}
