mod event;
mod hidden_model;
mod message;
mod parsed_reasoning;
mod reasoning;
mod transform;

pub use event::*;
pub use hidden_model::*;
pub use message::*;
pub use parsed_reasoning::*;
pub use reasoning::*;
pub use transform::*;
