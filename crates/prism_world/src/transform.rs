use prism_dependencies::nalgebra_glm as glm;

#[derive(Copy, Clone, Debug)]
pub struct Transform {
    pub translation: glm::Vec3,
    pub rotation: glm::Quat,
    pub scale: glm::Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: glm::vec3(0.0, 0.0, 0.0),
            rotation: glm::quat_identity(),
            scale: glm::vec3(1.0, 1.0, 1.0),
        }
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        let approximate = |x: f32, y: f32| (x - y).abs() < 0.001;
        ![
            // Translation
            approximate(self.translation.x, other.translation.x),
            approximate(self.translation.y, other.translation.y),
            approximate(self.translation.z, other.translation.z),
            // Rotation
            approximate(self.rotation.i, other.rotation.i),
            approximate(self.rotation.j, other.rotation.j),
            approximate(self.rotation.k, other.rotation.k),
            approximate(self.rotation.w, other.rotation.w),
            // Scale
            approximate(self.scale.x, other.scale.x),
            approximate(self.scale.y, other.scale.y),
            approximate(self.scale.z, other.scale.z),
        ]
        .contains(&false)
    }
}

impl Transform {
    pub fn new(translation: glm::Vec3, rotation: glm::Quat, scale: glm::Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Placed at `position` and turned `angle` radians around `axis`.
    /// The axis does not need to be normalized.
    pub fn spinning(position: glm::Vec3, axis: &glm::Vec3, angle: f32) -> Self {
        Self {
            translation: position,
            rotation: glm::quat_angle_axis(angle, &glm::normalize(axis)),
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> glm::Mat4 {
        glm::translation(&self.translation)
            * glm::quat_to_mat4(&self.rotation)
            * glm::scaling(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube_rotation_axis;

    fn assert_matrix_eq(left: &glm::Mat4, right: &glm::Mat4) {
        for (l, r) in left.iter().zip(right.iter()) {
            assert!((l - r).abs() < 1e-5, "{:?} != {:?}", left, right);
        }
    }

    #[test]
    fn default_is_identity() {
        assert_matrix_eq(&Transform::default().matrix(), &glm::Mat4::identity());
    }

    #[test]
    fn translation_lands_in_last_column() {
        let transform = Transform {
            translation: glm::vec3(2.0, 5.0, -15.0),
            ..Default::default()
        };
        let matrix = transform.matrix();
        assert_eq!(
            glm::vec3(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]),
            glm::vec3(2.0, 5.0, -15.0)
        );
    }

    #[test]
    fn spinning_matches_translate_then_rotate() {
        let position = glm::vec3(-1.5, -2.2, -2.5);
        let axis = cube_rotation_axis();
        let angle = 1.25 * 3.0;

        let expected = glm::rotate(
            &glm::translate(&glm::Mat4::identity(), &position),
            angle,
            &axis,
        );
        assert_matrix_eq(&Transform::spinning(position, &axis, angle).matrix(), &expected);
    }

    #[test]
    fn spinning_normalizes_axis() {
        let position = glm::vec3(0.0, 0.0, 0.0);
        let short = Transform::spinning(position, &glm::vec3(0.0, 1.0, 0.0), 0.7);
        let long = Transform::spinning(position, &glm::vec3(0.0, 4.0, 0.0), 0.7);
        assert_eq!(short, long);
    }
}
