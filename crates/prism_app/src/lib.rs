mod app;
mod resources;
mod state;

pub use self::{app::*, resources::*, state::*};
