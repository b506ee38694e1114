mod input;
mod system;

pub use self::{input::*, system::*};

use prism_config::Config;

/// Everything a state may touch during one frame. The GL context stays with
/// the event loop, which swaps and resizes it.
pub struct Resources<'a> {
    pub config: &'a mut Config,
    pub input: &'a mut Input,
    pub system: &'a mut System,
}
