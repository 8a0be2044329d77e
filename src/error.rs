pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Graph construction error: {0}")]
    GraphConstruction(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Entity id {id} out of range for vocabulary of size {num_entities}")]
    EntityOutOfRange { id: u32, num_entities: usize },

    #[error("Triple not found: {0}")]
    TripleNotFound(String),

    #[error("Graph is empty")]
    EmptyGraph,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GraphError {
    pub fn graph_construction<S: Into<String>>(msg: S) -> Self {
        GraphError::GraphConstruction(msg.into())
    }

    pub fn algorithm<S: Into<String>>(msg: S) -> Self {
        GraphError::Algorithm(msg.into())
    }

    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        GraphError::InvalidParameter(msg.into())
    }

    pub fn not_implemented<S: Into<String>>(msg: S) -> Self {
        GraphError::NotImplemented(msg.into())
    }

    pub fn triple_not_found<S: Into<String>>(triple: S) -> Self {
        GraphError::TripleNotFound(triple.into())
    }

    pub fn entity_out_of_range(id: u32, num_entities: usize) -> Self {
        GraphError::EntityOutOfRange { id, num_entities }
    }
}
