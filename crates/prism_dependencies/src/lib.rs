pub use gl;
pub use glutin;
pub use image;
pub use log;
pub use nalgebra_glm;
pub use serde;
pub use serde_json;
pub use winit;
