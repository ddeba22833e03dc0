mod namer;
mod openai;

pub use namer::ClusterNamer;
pub use openai::{NAMING_SYSTEM_PROMPT, OpenAINamer, format_samples};

#[cfg(test)]
pub use namer::MockClusterNamer;
