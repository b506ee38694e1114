use crate::Resources;
use prism_dependencies::{
    log,
    winit::{
        dpi::PhysicalSize,
        event::{ElementState, Event, KeyboardInput, MouseButton},
    },
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateMachineError {
    #[error("No states are present in the state machine!")]
    NoStatesPresent,
}

type Result<T, E = StateMachineError> = std::result::Result<T, E>;
pub type StateResult<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;

pub trait State {
    fn label(&self) -> String {
        "Unlabeled State".to_string()
    }

    fn on_start(&mut self, _resources: &mut Resources) -> StateResult<()> {
        Ok(())
    }

    fn on_pause(&mut self, _resources: &mut Resources) -> StateResult<()> {
        Ok(())
    }

    fn on_stop(&mut self, _resources: &mut Resources) -> StateResult<()> {
        Ok(())
    }

    fn on_resume(&mut self, _resources: &mut Resources) -> StateResult<()> {
        Ok(())
    }

    fn update(&mut self, _resources: &mut Resources) -> StateResult<Transition> {
        Ok(Transition::None)
    }

    /// Draws the frame. The back buffer is swapped afterwards.
    fn render(&mut self, _resources: &mut Resources) -> StateResult<()> {
        Ok(())
    }

    fn on_resize(
        &mut self,
        _resources: &mut Resources,
        _physical_size: &PhysicalSize<u32>,
    ) -> StateResult<Transition> {
        Ok(Transition::None)
    }

    fn on_mouse(
        &mut self,
        _resources: &mut Resources,
        _button: &MouseButton,
        _button_state: &ElementState,
    ) -> StateResult<Transition> {
        Ok(Transition::None)
    }

    fn on_key(
        &mut self,
        _resources: &mut Resources,
        _input: KeyboardInput,
    ) -> StateResult<Transition> {
        Ok(Transition::None)
    }

    fn on_event(
        &mut self,
        _resources: &mut Resources,
        _event: &Event<()>,
    ) -> StateResult<Transition> {
        Ok(Transition::None)
    }
}

pub enum Transition {
    None,
    Pop,
    Push(Box<dyn State>),
    Switch(Box<dyn State>),
    Quit,
}

/// A stack of states. Only the top state receives hooks. States underneath
/// are paused until everything above them is popped.
pub struct StateMachine {
    running: bool,
    states: Vec<Box<dyn State>>,
}

impl StateMachine {
    pub fn new(initial_state: impl State + 'static) -> Self {
        Self {
            running: false,
            states: vec![Box::new(initial_state)],
        }
    }

    pub fn active_state_label(&self) -> Option<String> {
        if !self.running {
            return None;
        }
        self.states.last().map(|state| state.label())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts the top state. The machine counts as running even when
    /// `on_start` fails, so the failed state still gets frames and events.
    pub fn start(&mut self, resources: &mut Resources) -> StateResult<()> {
        if self.running {
            return Ok(());
        }
        self.running = true;
        let state = self.active_state_mut()?;
        log::info!("Starting state: {}", state.label());
        state.on_start(resources)
    }

    pub fn stop(&mut self, resources: &mut Resources) -> StateResult<()> {
        if !self.running {
            return Ok(());
        }
        while !self.states.is_empty() {
            self.leave(resources)?;
        }
        self.running = false;
        Ok(())
    }

    pub fn update(&mut self, resources: &mut Resources) -> StateResult<()> {
        self.dispatch(resources, |state, resources| state.update(resources))
    }

    pub fn render(&mut self, resources: &mut Resources) -> StateResult<()> {
        if !self.running {
            return Ok(());
        }
        self.active_state_mut()?.render(resources)
    }

    pub fn on_resize(
        &mut self,
        resources: &mut Resources,
        physical_size: &PhysicalSize<u32>,
    ) -> StateResult<()> {
        self.dispatch(resources, |state, resources| {
            state.on_resize(resources, physical_size)
        })
    }

    pub fn on_mouse(
        &mut self,
        resources: &mut Resources,
        button: &MouseButton,
        button_state: &ElementState,
    ) -> StateResult<()> {
        self.dispatch(resources, |state, resources| {
            state.on_mouse(resources, button, button_state)
        })
    }

    pub fn on_key(&mut self, resources: &mut Resources, input: KeyboardInput) -> StateResult<()> {
        self.dispatch(resources, |state, resources| state.on_key(resources, input))
    }

    pub fn on_event(&mut self, resources: &mut Resources, event: &Event<()>) -> StateResult<()> {
        self.dispatch(resources, |state, resources| state.on_event(resources, event))
    }

    /// Runs one hook on the top state and applies the transition it asks for.
    fn dispatch(
        &mut self,
        resources: &mut Resources,
        hook: impl FnOnce(&mut Box<dyn State>, &mut Resources) -> StateResult<Transition>,
    ) -> StateResult<()> {
        if !self.running {
            return Ok(());
        }
        let transition = hook(self.active_state_mut()?, resources)?;
        self.apply(transition, resources)
    }

    fn apply(&mut self, transition: Transition, resources: &mut Resources) -> StateResult<()> {
        match transition {
            Transition::None => Ok(()),
            Transition::Push(state) => {
                if let Some(paused) = self.states.last_mut() {
                    paused.on_pause(resources)?;
                }
                self.enter(state, resources)
            }
            Transition::Switch(state) => {
                self.leave(resources)?;
                self.enter(state, resources)
            }
            Transition::Pop => {
                self.leave(resources)?;
                match self.states.last_mut() {
                    Some(resumed) => resumed.on_resume(resources),
                    None => {
                        self.running = false;
                        Ok(())
                    }
                }
            }
            Transition::Quit => self.stop(resources),
        }
    }

    fn enter(&mut self, state: Box<dyn State>, resources: &mut Resources) -> StateResult<()> {
        log::info!("Starting state: {}", state.label());
        self.states.push(state);
        self.active_state_mut()?.on_start(resources)
    }

    fn leave(&mut self, resources: &mut Resources) -> StateResult<()> {
        match self.states.pop() {
            Some(mut state) => {
                log::info!("Stopping state: {}", state.label());
                state.on_stop(resources)
            }
            None => Ok(()),
        }
    }

    fn active_state_mut(&mut self) -> Result<&mut Box<dyn State>> {
        self.states
            .last_mut()
            .ok_or(StateMachineError::NoStatesPresent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Input, System};
    use prism_config::Config;
    use std::{cell::RefCell, io, rc::Rc};

    type Journal = Rc<RefCell<Vec<String>>>;

    /// Writes every lifecycle hook it receives into a shared journal and
    /// answers its next `update` with a queued transition.
    struct Recorder {
        name: &'static str,
        journal: Journal,
        next: Option<Transition>,
        fail_start: bool,
    }

    impl Recorder {
        fn new(name: &'static str, journal: &Journal) -> Self {
            Self {
                name,
                journal: journal.clone(),
                next: None,
                fail_start: false,
            }
        }

        fn then(mut self, transition: Transition) -> Self {
            self.next = Some(transition);
            self
        }

        fn record(&self, hook: &str) {
            self.journal
                .borrow_mut()
                .push(format!("{}:{}", self.name, hook));
        }
    }

    impl State for Recorder {
        fn label(&self) -> String {
            self.name.to_string()
        }

        fn on_start(&mut self, _resources: &mut Resources) -> StateResult<()> {
            self.record("start");
            if self.fail_start {
                return Err(Box::new(io::Error::new(io::ErrorKind::Other, "bad shader")));
            }
            Ok(())
        }

        fn on_pause(&mut self, _resources: &mut Resources) -> StateResult<()> {
            self.record("pause");
            Ok(())
        }

        fn on_stop(&mut self, _resources: &mut Resources) -> StateResult<()> {
            self.record("stop");
            Ok(())
        }

        fn on_resume(&mut self, _resources: &mut Resources) -> StateResult<()> {
            self.record("resume");
            Ok(())
        }

        fn update(&mut self, _resources: &mut Resources) -> StateResult<Transition> {
            Ok(self.next.take().unwrap_or(Transition::None))
        }

        fn render(&mut self, _resources: &mut Resources) -> StateResult<()> {
            self.record("render");
            Ok(())
        }
    }

    fn with_resources(test: impl FnOnce(&mut Resources)) {
        let mut config = Config::default();
        let mut input = Input::default();
        let mut system = System::new([800, 600]);
        let mut resources = Resources {
            config: &mut config,
            input: &mut input,
            system: &mut system,
        };
        test(&mut resources);
    }

    fn entries(journal: &Journal) -> Vec<String> {
        journal.borrow().clone()
    }

    #[test]
    fn hooks_wait_for_start() {
        let journal = Journal::default();
        with_resources(|resources| {
            let mut machine = StateMachine::new(Recorder::new("a", &journal));
            assert!(machine.update(resources).is_ok());
            assert!(machine.render(resources).is_ok());
            assert!(!machine.is_running());
            assert_eq!(machine.active_state_label(), None);
            assert!(entries(&journal).is_empty());
        });
    }

    #[test]
    fn start_runs_once() {
        let journal = Journal::default();
        with_resources(|resources| {
            let mut machine = StateMachine::new(Recorder::new("a", &journal));
            assert!(machine.start(resources).is_ok());
            assert!(machine.start(resources).is_ok());
            assert!(machine.is_running());
            assert_eq!(machine.active_state_label(), Some("a".to_string()));
            assert_eq!(entries(&journal), vec!["a:start"]);
        });
    }

    #[test]
    fn failed_start_keeps_the_machine_running() {
        let journal = Journal::default();
        with_resources(|resources| {
            let mut failing = Recorder::new("a", &journal);
            failing.fail_start = true;
            let mut machine = StateMachine::new(failing);

            assert!(machine.start(resources).is_err());
            assert!(machine.is_running());
            assert!(machine.render(resources).is_ok());
            assert_eq!(entries(&journal), vec!["a:start", "a:render"]);
        });
    }

    #[test]
    fn push_pauses_and_pop_resumes() {
        let journal = Journal::default();
        with_resources(|resources| {
            let top = Recorder::new("b", &journal).then(Transition::Pop);
            let bottom = Recorder::new("a", &journal).then(Transition::Push(Box::new(top)));
            let mut machine = StateMachine::new(bottom);
            assert!(machine.start(resources).is_ok());

            assert!(machine.update(resources).is_ok());
            assert_eq!(machine.active_state_label(), Some("b".to_string()));

            assert!(machine.update(resources).is_ok());
            assert_eq!(machine.active_state_label(), Some("a".to_string()));
            assert_eq!(
                entries(&journal),
                vec!["a:start", "a:pause", "b:start", "b:stop", "a:resume"]
            );
        });
    }

    #[test]
    fn switch_replaces_the_top_state() {
        let journal = Journal::default();
        with_resources(|resources| {
            let next = Recorder::new("b", &journal);
            let first = Recorder::new("a", &journal).then(Transition::Switch(Box::new(next)));
            let mut machine = StateMachine::new(first);
            assert!(machine.start(resources).is_ok());
            assert!(machine.update(resources).is_ok());

            assert_eq!(machine.active_state_label(), Some("b".to_string()));
            assert_eq!(entries(&journal), vec!["a:start", "a:stop", "b:start"]);

            assert!(machine.stop(resources).is_ok());
            assert!(!machine.is_running());
        });
    }

    #[test]
    fn popping_the_last_state_stops_the_machine() {
        let journal = Journal::default();
        with_resources(|resources| {
            let mut machine = StateMachine::new(Recorder::new("a", &journal).then(Transition::Pop));
            assert!(machine.start(resources).is_ok());
            assert!(machine.update(resources).is_ok());
            assert!(!machine.is_running());
            assert_eq!(entries(&journal), vec!["a:start", "a:stop"]);
        });
    }

    #[test]
    fn quit_stops_every_state_from_the_top() {
        let journal = Journal::default();
        with_resources(|resources| {
            let top = Recorder::new("b", &journal).then(Transition::Quit);
            let bottom = Recorder::new("a", &journal).then(Transition::Push(Box::new(top)));
            let mut machine = StateMachine::new(bottom);
            assert!(machine.start(resources).is_ok());
            assert!(machine.update(resources).is_ok());
            assert!(machine.update(resources).is_ok());

            assert!(!machine.is_running());
            assert_eq!(
                entries(&journal),
                vec!["a:start", "a:pause", "b:start", "b:stop", "a:stop"]
            );

            // Shutdown stops the machine again once the loop is destroyed
            assert!(machine.stop(resources).is_ok());
            assert_eq!(entries(&journal).len(), 5);
        });
    }
}
