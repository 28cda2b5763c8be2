#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("edge {edge} references unknown {endpoint} node: {node}")]
    DanglingEdge {
        edge: String,
        endpoint: Endpoint,
        node: String,
    },

    #[error("invalid layout option {field}: {value} (must be a finite positive number)")]
    InvalidOptions { field: &'static str, value: f64 },

    #[error("invalid layout options JSON: {message}")]
    InvalidOptionsJson { message: String },

    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("duplicate edge id: {id}")]
    DuplicateEdge { id: String },

    #[error("node {id} has invalid size {width}x{height}")]
    InvalidNodeSize { id: String, width: f64, height: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
