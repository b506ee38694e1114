use anyhow::Result;
use nalgebra_glm as glm;
use prism::{
    app::{Resources, State, StateResult, Transition},
    render::{GeometryBuffer, Graphics, ShaderProgram},
    world::{TRIANGLE_LAYOUT, TRIANGLE_VERTICES},
};
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode};

const VERTEX_SHADER_SOURCE: &str = r#"
#version 330 core
layout (location = 0) in vec3 aPos;

void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
"#;

const FRAGMENT_SHADER_SOURCE: &str = r#"
#version 330 core
uniform vec4 ourColor;

out vec4 FragColor;

void main()
{
    FragColor = ourColor;
}
"#;

/// Green channel of the triangle at `seconds`, swinging between 0 and 1.
pub fn green_value(seconds: f32) -> f32 {
    seconds.sin() / 2.0 + 0.5
}

struct Scene {
    shader_program: ShaderProgram,
    geometry: GeometryBuffer,
}

impl Scene {
    fn new() -> Result<Self> {
        let mut shader_program = ShaderProgram::new();
        shader_program
            .vertex_shader_source(VERTEX_SHADER_SOURCE)?
            .fragment_shader_source(FRAGMENT_SHADER_SOURCE)?
            .link()?;
        let geometry = GeometryBuffer::new(&TRIANGLE_VERTICES, None, &TRIANGLE_LAYOUT);
        Ok(Self {
            shader_program,
            geometry,
        })
    }
}

#[derive(Default)]
pub struct Triangle {
    scene: Option<Scene>,
}

impl State for Triangle {
    fn label(&self) -> String {
        "Triangle".to_string()
    }

    fn on_start(&mut self, _resources: &mut Resources) -> StateResult<()> {
        self.scene = Some(Scene::new()?);
        Ok(())
    }

    fn on_stop(&mut self, _resources: &mut Resources) -> StateResult<()> {
        self.scene = None;
        Ok(())
    }

    fn render(&mut self, resources: &mut Resources) -> StateResult<()> {
        Graphics::clear_buffers();

        let scene = match self.scene.as_ref() {
            Some(scene) => scene,
            None => return Ok(()),
        };

        let green = green_value(resources.system.elapsed_seconds());
        scene.shader_program.use_program();
        scene
            .shader_program
            .set_uniform_vec4("ourColor", glm::vec4(0.0, green, 0.0, 1.0).as_slice());

        scene.geometry.bind();
        scene.geometry.draw();
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
