use anyhow::Result;
use prism::{
    app::{Resources, State, StateResult, Transition},
    render::{GeometryBuffer, Graphics, PolygonMode, ShaderProgram},
    world::{BouncingColor, RECTANGLE_INDICES, RECTANGLE_LAYOUT, RECTANGLE_VERTICES},
};
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode};

const VERTEX_SHADER_SOURCE: &str = r#"
#version 330 core
layout (location = 0) in vec3 aPos;

void main()
{
    gl_Position = vec4(aPos, 1.0);
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

const COLOR_STEP: f32 = 0.01;

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
        let geometry = GeometryBuffer::new(
            &RECTANGLE_VERTICES,
            Some(&RECTANGLE_INDICES),
            &RECTANGLE_LAYOUT,
        );
        log::info!(
            "Uploaded rectangle with {} vertices and {} indices",
            geometry.vertex_count(),
            geometry.index_count()
        );
        Ok(Self {
            shader_program,
            geometry,
        })
    }
}

pub struct Rectangle {
    scene: Option<Scene>,
    red: BouncingColor,
    wireframe: bool,
}

impl Rectangle {
    pub fn new(wireframe: bool) -> Self {
        Self {
            scene: None,
            red: BouncingColor::new(0.0, COLOR_STEP),
            wireframe,
        }
    }

    fn toggle_wireframe(&mut self) -> PolygonMode {
        self.wireframe = !self.wireframe;
        PolygonMode::wireframe(self.wireframe)
    }
}

impl State for Rectangle {
    fn label(&self) -> String {
        "Rectangle".to_string()
    }

    fn on_start(&mut self, _resources: &mut Resources) -> StateResult<()> {
        Graphics::set_polygon_mode(PolygonMode::wireframe(self.wireframe));
        self.scene = Some(Scene::new()?);
        Ok(())
    }

    fn on_stop(&mut self, _resources: &mut Resources) -> StateResult<()> {
        self.scene = None;
        Ok(())
    }

    fn update(&mut self, _resources: &mut Resources) -> StateResult<Transition> {
        self.red.advance();
        Ok(Transition::None)
    }

    fn render(&mut self, _resources: &mut Resources) -> StateResult<()> {
        Graphics::clear_buffers();

        if let Some(scene) = self.scene.as_ref() {
            scene.shader_program.use_program();
            scene
                .shader_program
                .set_uniform_vec4("ourColor", &[self.red.value(), 0.5, 0.2, 1.0]);
            scene.geometry.bind();
            scene.geometry.draw();
        }
        Ok(())
    }

    fn on_key(
        &mut self,
        resources: &mut Resources,
        input: KeyboardInput,
    ) -> StateResult<Transition> {
        if input.state != ElementState::Pressed {
            return Ok(Transition::None);
        }
        match input.virtual_keycode {
            Some(VirtualKeyCode::Escape) => resources.system.exit_requested = true,
            Some(VirtualKeyCode::Space) => {
                let mode = self.toggle_wireframe();
                log::info!("Polygon mode: {:?}", mode);
                Graphics::set_polygon_mode(mode);
            }
            _ => {}
        }
        Ok(Transition::None)
    }
}
