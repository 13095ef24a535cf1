use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid color `{0}`")]
    InvalidColor(String),
    #[error("unknown demo `{0}` (expected galaxy, materials or textures)")]
    UnknownDemo(String),
    #[error("unknown parameter `{0}`")]
    UnknownParam(String),
    #[error("parameter `{name}` expects a {expected} value")]
    ParamType { name: String, expected: &'static str },
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, DemoError>;
