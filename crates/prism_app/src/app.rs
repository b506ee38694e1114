use crate::{Input, Resources, State, StateMachine, System};
use prism_config::Config;
use prism_dependencies::{
    glutin::ContextError,
    log,
    nalgebra_glm as glm,
    winit::{
        event::{Event, StartCause, WindowEvent},
        event_loop::ControlFlow,
    },
};
use prism_render::{check_errors, load_gl_functions, Graphics, PolygonMode};
use prism_window::{capture_cursor, Window, WindowContext, WindowError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Failed to create a window!")]
    CreateWindow(#[source] WindowError),

    #[error("Failed to handle an event in the state machine!")]
    HandleEvent(#[source] Box<dyn std::error::Error>),

    #[error("Failed to render a frame!")]
    RenderFrame(#[source] Box<dyn std::error::Error>),

    #[error("Failed to start the state machine!")]
    StartStateMachine(#[source] Box<dyn std::error::Error>),

    #[error("Failed to stop the state machine!")]
    StopStateMachine(#[source] Box<dyn std::error::Error>),

    #[error("Failed to swap the window buffers!")]
    SwapBuffers(#[source] ContextError),

    #[error("Failed to update the state machine!")]
    UpdateStateMachine(#[source] Box<dyn std::error::Error>),
}

type Result<T, E = ApplicationError> = std::result::Result<T, E>;

pub fn run(initial_state: impl State + 'static, mut config: Config) -> Result<()> {
    log::info!("Prism app started");

    let Window {
        event_loop,
        context,
    } = Window::new(&config.window).map_err(ApplicationError::CreateWindow)?;

    load_gl_functions(&context);

    let physical_size = context.window().inner_size();
    let mut system = System::new([physical_size.width, physical_size.height]);
    let mut input = Input::default();

    Graphics::viewport(&system.viewport());
    Graphics::clear_color(&glm::make_vec3(&config.graphics.clear_color));
    Graphics::set_polygon_mode(PolygonMode::wireframe(config.graphics.wireframe));

    if config.window.capture_cursor {
        capture_cursor(context.window(), true);
    }

    check_errors("window setup");

    let mut state_machine = StateMachine::new(initial_state);

    event_loop.run(move |event, _, control_flow| {
        let resources = Resources {
            config: &mut config,
            input: &mut input,
            system: &mut system,
        };
        if let Err(error) = run_loop(&mut state_machine, &context, &event, control_flow, resources)
        {
            for message in error_chain(&error) {
                log::error!("{}", message);
            }
        }
    });
}

/// The error followed by each of its sources, outermost first.
fn error_chain(error: &dyn std::error::Error) -> Vec<String> {
    let mut messages = vec![format!("Application error: {}", error)];
    let mut source = error.source();
    while let Some(cause) = source {
        messages.push(format!("Caused by: {}", cause));
        source = cause.source();
    }
    messages
}

fn run_loop(
    state_machine: &mut StateMachine,
    context: &WindowContext,
    event: &Event<()>,
    control_flow: &mut ControlFlow,
    mut resources: Resources,
) -> Result<()> {
    control_flow.set_poll();

    if resources.system.exit_requested {
        control_flow.set_exit();
    }

    resources.system.handle_event(event);
    resources.input.handle_event(event);

    // A state that fails to start stays active, so the window remains open
    if let Event::NewEvents(StartCause::Init) = event {
        state_machine
            .start(&mut resources)
            .map_err(ApplicationError::StartStateMachine)?;
    }

    state_machine
        .on_event(&mut resources, event)
        .map_err(ApplicationError::HandleEvent)?;

    match event {
        Event::MainEventsCleared => {
            if !state_machine.is_running() {
                control_flow.set_exit();
                return Ok(());
            }

            resources.system.update();

            state_machine
                .update(&mut resources)
                .map_err(ApplicationError::UpdateStateMachine)?;

            if resources.system.is_minimized() {
                resources.input.end_frame();
                return Ok(());
            }

            state_machine
                .render(&mut resources)
                .map_err(ApplicationError::RenderFrame)?;

            context
                .swap_buffers()
                .map_err(ApplicationError::SwapBuffers)?;

            resources.input.end_frame();
        }

        Event::WindowEvent {
            ref event,
            window_id,
        } if *window_id == context.window().id() => match event {
            WindowEvent::CloseRequested => control_flow.set_exit(),

            WindowEvent::KeyboardInput { input, .. } => {
                state_machine
                    .on_key(&mut resources, *input)
                    .map_err(ApplicationError::HandleEvent)?;
            }

            WindowEvent::MouseInput { button, state, .. } => {
                state_machine
                    .on_mouse(&mut resources, button, state)
                    .map_err(ApplicationError::HandleEvent)?;
            }

            WindowEvent::Resized(physical_size) => {
                context.resize(*physical_size);
                if !resources.system.is_minimized() {
                    Graphics::viewport(&resources.system.viewport());
                }
                state_machine
                    .on_resize(&mut resources, physical_size)
                    .map_err(ApplicationError::HandleEvent)?;
            }

            _ => {}
        },

        Event::LoopDestroyed => {
            if let Some(label) = state_machine.active_state_label() {
                log::info!("Shutting down from state: {}", label);
            }
            state_machine
                .stop(&mut resources)
                .map_err(ApplicationError::StopStateMachine)?;
            check_errors("shutdown");
        }

        _ => {}
    }
    Ok(())
}
