pub mod app {
    pub use prism_app::*;
}

pub mod config {
    pub use prism_config::*;
}

pub mod dependencies {
    pub use prism_dependencies::*;
}

pub mod render {
    pub use prism_render::*;
}

pub mod window {
    pub use prism_window::*;
}

pub mod world {
    pub use prism_world::*;
}
