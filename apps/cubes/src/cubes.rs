use anyhow::Result;
use nalgebra_glm as glm;
use prism::{
    app::{Input, Mouse, Resources, State, StateResult, Transition},
    config::{AssetConfig, Config},
    render::{
        check_errors, DepthTestFunction, GeometryBuffer, Graphics, ShaderProgram,
        Texture as GpuTexture,
    },
    world::{
        cube_models, pulse_color, CameraDirection, Filter, FlyCamera, PerspectiveCamera,
        Sampler, Texture, WrappingMode, CUBE_LAYOUT, CUBE_VERTICES,
    },
};
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode};

const VERTEX_SHADER_SOURCE: &str = r#"
#version 330 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;
layout (location = 2) in vec2 aTexCoord;

uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;

out vec3 vertexColor;
out vec2 texCoord;

void main()
{
    gl_Position = projection * view * model * vec4(aPos, 1.0);
    texCoord = aTexCoord;
    vertexColor = aColor;
}
"#;

const FRAGMENT_SHADER_SOURCE: &str = r#"
#version 330 core
uniform vec4 ucolor;
uniform sampler2D texture1;
uniform sampler2D texture2;

in vec3 vertexColor;
in vec2 texCoord;

out vec4 fragmentColor;

void main()
{
    fragmentColor = mix(texture(texture1, texCoord), texture(texture2, texCoord), ucolor.x);
}
"#;

const CONTAINER_TEXTURE: &str = "container.jpg";
const FACE_TEXTURE: &str = "awesomeface.png";

const TEXTURE_SAMPLER: Sampler = Sampler {
    min_filter: Filter::LinearMipmapLinear,
    mag_filter: Filter::Nearest,
    wrap_s: WrappingMode::MirroredRepeat,
    wrap_t: WrappingMode::MirroredRepeat,
};

static MOVEMENT_KEYS: [(VirtualKeyCode, CameraDirection); 4] = [
    (VirtualKeyCode::W, CameraDirection::Forward),
    (VirtualKeyCode::S, CameraDirection::Backward),
    (VirtualKeyCode::A, CameraDirection::Left),
    (VirtualKeyCode::D, CameraDirection::Right),
];

/// Directions whose keys are currently held.
pub fn held_directions(input: &Input) -> impl Iterator<Item = CameraDirection> + '_ {
    MOVEMENT_KEYS
        .iter()
        .filter(|(keycode, _)| input.is_key_pressed(*keycode))
        .map(|(_, direction)| *direction)
}

/// Look offset for this frame with positive y meaning "up".
/// A grabbed cursor stops producing `CursorMoved`, so raw motion is used instead.
pub fn look_offset(mouse: &Mouse, cursor_captured: bool) -> glm::Vec2 {
    let delta = if cursor_captured {
        mouse.motion
    } else {
        mouse.position_delta
    };
    glm::vec2(delta.x, -delta.y)
}

/// Loads an image from the asset directory, substituting a checker
/// pattern when it is missing or unreadable.
fn load_texture(assets: &AssetConfig, file_name: &str, flip_vertically: bool) -> Texture {
    let path = assets.path(file_name);
    let texture = match Texture::from_file(&path, flip_vertically) {
        Ok(texture) => {
            log::info!(
                "Loaded texture {} ({}x{})",
                path.display(),
                texture.width,
                texture.height
            );
            texture
        }
        Err(error) => {
            log::warn!(
                "{:#}. Using a placeholder texture instead.",
                anyhow::Error::from(error)
            );
            Texture::placeholder()
        }
    };
    texture.with_sampler(TEXTURE_SAMPLER)
}

struct Scene {
    shader_program: ShaderProgram,
    geometry: GeometryBuffer,
    textures: [GpuTexture; 2],
}

impl Scene {
    fn new(assets: &AssetConfig) -> Result<Self> {
        let mut shader_program = ShaderProgram::new();
        shader_program
            .vertex_shader_source(VERTEX_SHADER_SOURCE)?
            .fragment_shader_source(FRAGMENT_SHADER_SOURCE)?
            .link()?;

        let geometry = GeometryBuffer::new(&CUBE_VERTICES, None, &CUBE_LAYOUT);

        let textures = [
            GpuTexture::try_from(&load_texture(assets, CONTAINER_TEXTURE, false))?,
            GpuTexture::try_from(&load_texture(assets, FACE_TEXTURE, true))?,
        ];

        shader_program.use_program();
        shader_program.set_uniform_int("texture1", 0);
        shader_program.set_uniform_int("texture2", 1);

        check_errors("scene setup");

        Ok(Self {
            shader_program,
            geometry,
            textures,
        })
    }

    fn render(&self, view: &glm::Mat4, projection: &glm::Mat4, seconds: f32) {
        for (unit, texture) in self.textures.iter().enumerate() {
            texture.bind(unit as u32);
        }

        self.shader_program.use_program();
        self.shader_program
            .set_uniform_matrix4x4("view", view.as_slice());
        self.shader_program
            .set_uniform_matrix4x4("projection", projection.as_slice());
        self.shader_program
            .set_uniform_vec4("ucolor", pulse_color(seconds).as_slice());

        self.geometry.bind();
        for model in cube_models(seconds) {
            self.shader_program
                .set_uniform_matrix4x4("model", model.as_slice());
            self.geometry.draw();
        }
    }
}

pub struct Cubes {
    scene: Option<Scene>,
    camera: FlyCamera,
    projection: PerspectiveCamera,
}

impl Cubes {
    pub fn new(config: &Config) -> Self {
        let camera_config = &config.camera;
        let camera = FlyCamera::new(
            glm::make_vec3(&camera_config.position),
            camera_config.yaw_degrees,
            camera_config.pitch_degrees,
        )
        .with_sensitivity(camera_config.sensitivity)
        .with_speed(camera_config.speed);
        let projection = PerspectiveCamera {
            y_fov_rad: camera_config.fov_degrees.to_radians(),
            z_near: camera_config.z_near,
            z_far: camera_config.z_far,
        };
        Self {
            scene: None,
            camera,
            projection,
        }
    }
}

impl State for Cubes {
    fn label(&self) -> String {
        "Cubes".to_string()
    }

    fn on_start(&mut self, resources: &mut Resources) -> StateResult<()> {
        Graphics::enable_depth_testing(DepthTestFunction::LessThan);
        self.scene = Some(Scene::new(&resources.config.assets)?);
        Ok(())
    }

    fn on_stop(&mut self, _resources: &mut Resources) -> StateResult<()> {
        self.scene = None;
        Ok(())
    }

    fn update(&mut self, resources: &mut Resources) -> StateResult<Transition> {
        let delta_time = resources.system.delta_time as f32;
        for direction in held_directions(resources.input) {
            self.camera.translate(direction, delta_time);
        }

        let offset = look_offset(
            &resources.input.mouse,
            resources.config.window.capture_cursor,
        );
        if offset != glm::Vec2::zeros() {
            self.camera.rotate(offset.x, offset.y);
        }

        Ok(Transition::None)
    }

    fn render(&mut self, resources: &mut Resources) -> StateResult<()> {
        Graphics::clear_buffers();
        if let Some(scene) = self.scene.as_ref() {
            let view = self.camera.view_matrix();
            let projection = self.projection.matrix(resources.system.aspect_ratio());
            scene.render(&view, &projection, resources.system.elapsed_seconds());
        }
        Ok(())
    }

    fn on_key(
        &mut self,
        resources: &mut Resources,
        input: KeyboardInput,
    ) -> StateResult<Transition> {
        if let (Some(VirtualKeyCode::Escape), ElementState::Pressed) =
            (input.virtual_keycode, input.state)
        {
            resources.system.exit_requested = true;
        }
        Ok(Transition::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_maps_to_camera_directions() {
        let mut input = Input::default();
        assert_eq!(held_directions(&input).count(), 0);

        input
            .keystates
            .insert(VirtualKeyCode::W, ElementState::Pressed);
        input
            .keystates
            .insert(VirtualKeyCode::D, ElementState::Pressed);
        input
            .keystates
            .insert(VirtualKeyCode::S, ElementState::Released);
        let directions = held_directions(&input).collect::<Vec<_>>();
        assert_eq!(
            directions,
            vec![CameraDirection::Forward, CameraDirection::Right]
        );
    }

    #[test]
    fn look_offset_inverts_vertical_motion() {
        let mut mouse = Mouse::default();
        mouse.position_delta = glm::vec2(4.0, 2.0);
        mouse.motion = glm::vec2(-1.0, -3.0);

        assert_eq!(look_offset(&mouse, false), glm::vec2(4.0, -2.0));
        assert_eq!(look_offset(&mouse, true), glm::vec2(-1.0, 3.0));
    }

    #[test]
    fn camera_follows_config() {
        let mut config = Config::default();
        config.camera.position = [1.0, 2.0, 3.0];
        config.camera.fov_degrees = 90.0;
        let cubes = Cubes::new(&config);
        assert_eq!(cubes.camera.position, glm::vec3(1.0, 2.0, 3.0));
        assert_eq!(cubes.camera.speed, config.camera.speed);
        assert!((cubes.projection.y_fov_rad - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn missing_texture_falls_back_to_placeholder() {
        let assets = AssetConfig {
            directory: "no/such/directory".into(),
        };
        let texture = load_texture(&assets, CONTAINER_TEXTURE, false);
        assert_eq!((texture.width, texture.height), (2, 2));
        assert_eq!(texture.sampler, TEXTURE_SAMPLER);
    }
}
