//! Command-line surface: arguments and the interactive prompt.

pub mod args;
pub mod prompt;

pub use args::{Args, SanitizeModeArg};
pub use prompt::{can_prompt, prompt_for_settings};
