use prism_dependencies::{
    log,
    winit::event::{Event, WindowEvent},
};
use prism_render::Viewport;
use std::time::Instant;

pub struct System {
    pub window_dimensions: [u32; 2],
    /// Seconds between the two most recent frames.
    pub delta_time: f64,
    pub start_time: Instant,
    pub last_frame: Instant,
    pub exit_requested: bool,
}

impl System {
    pub fn new(window_dimensions: [u32; 2]) -> Self {
        let now = Instant::now();
        Self {
            window_dimensions,
            delta_time: 0.01,
            start_time: now,
            last_frame: now,
            exit_requested: false,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.viewport().aspect_ratio()
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.window_dimensions[0], self.window_dimensions[1])
    }

    /// A minimized window reports a zero sized surface with no aspect ratio.
    pub fn is_minimized(&self) -> bool {
        self.window_dimensions.contains(&0)
    }

    /// Seconds since the system was created.
    pub fn elapsed_seconds(&self) -> f32 {
        self.last_frame
            .saturating_duration_since(self.start_time)
            .as_secs_f32()
    }

    pub fn update(&mut self) {
        self.advance_to(Instant::now());
    }

    pub fn advance_to(&mut self, now: Instant) {
        self.delta_time = now.saturating_duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
    }

    pub fn handle_event<T>(&mut self, event: &Event<T>) {
        if let Event::WindowEvent {
            event: WindowEvent::Resized(physical_size),
            ..
        } = event
        {
            log::info!(
                "Window resized to: ({}, {})",
                physical_size.width,
                physical_size.height
            );
            self.window_dimensions = [physical_size.width, physical_size.height];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn delta_time_is_time_between_frames() {
        let mut system = System::new([800, 600]);
        let start = system.last_frame;

        system.advance_to(start + Duration::from_millis(16));
        assert!((system.delta_time - 0.016).abs() < 1e-9);

        system.advance_to(start + Duration::from_millis(48));
        assert!((system.delta_time - 0.032).abs() < 1e-9);
        assert!((system.elapsed_seconds() - 0.048).abs() < 1e-6);
    }

    #[test]
    fn time_never_runs_backwards() {
        let mut system = System::new([800, 600]);
        let start = system.last_frame;
        system.advance_to(start + Duration::from_millis(10));
        system.advance_to(start);
        assert_eq!(system.delta_time, 0.0);
    }

    #[test]
    fn window_geometry() {
        let system = System::new([800, 600]);
        assert!(!system.is_minimized());
        assert_eq!(system.aspect_ratio(), 800.0 / 600.0);
        assert_eq!(system.viewport(), Viewport::new(800, 600));
    }

    #[test]
    fn zero_sized_window_is_minimized() {
        let mut system = System::new([800, 600]);
        for dimensions in [[0, 0], [0, 600], [800, 0]] {
            system.window_dimensions = dimensions;
            assert!(system.is_minimized());
        }
    }
}
