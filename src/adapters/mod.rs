pub mod command;
pub mod fileops;
pub mod prompt;
pub mod replace;

pub use command::*;
pub use fileops::*;
pub use prompt::*;
pub use replace::*;
