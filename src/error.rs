use thiserror::Error;

#[derive(Error, Debug)]
pub enum CbeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("RDF parse failed: {0}")]
    RdfParse(#[from] oxrdfio::RdfParseError),

    #[error("Invalid IRI: {0}")]
    Iri(#[from] oxrdf::IriParseError),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid CBE ID: {0}")]
    InvalidKey(String),

    #[error("Upstream error: {message}")]
    Upstream { message: String },
}

pub type Result<T> = std::result::Result<T, CbeError>;
