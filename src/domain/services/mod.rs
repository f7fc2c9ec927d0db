mod duration;
mod parser;
mod prompt_reasoning;
mod tracker;

pub use duration::*;
pub use parser::*;
pub use prompt_reasoning::*;
pub use tracker::*;
