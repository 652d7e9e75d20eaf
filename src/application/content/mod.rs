//! Content services - variant resolution and step assembly.

mod assembler;
mod resolver;

pub use assembler::ContentAssembler;
pub use resolver::VariantResolver;
