//! Shader-source handling for the effect core: dialect classification,
//! textual transformation, file reading, path normalization, and the
//! persisted last-used-path store. The runtime crate (`effect`) sequences
//! these pieces; nothing in here touches the GPU.

mod path;
mod source;
mod store;
mod transform;

pub use path::{default_extension, strip_quotes, ShaderLocator, DEFAULT_EXTENSION};
pub use source::{read_shader_source, SourceError};
pub use store::LastPathStore;
pub use transform::{
    classify_and_transform, DialectError, ShaderDialect, ToyEntryPoint, INPUT_COLOUR_UNIFORM,
    TOY_UNIFORM_BLOCK, VERTEX_PASSTHROUGH,
};
