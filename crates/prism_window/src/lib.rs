mod window;

pub use self::window::*;
