use thiserror::Error;

#[derive(Error, Debug)]
pub enum CobertifyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error at position {position}: {source}")]
    Xml {
        source: quick_xml::Error,
        position: usize,
    },

    #[error("<{parent}> has no <{element}> element")]
    MissingElement {
        parent: &'static str,
        element: &'static str,
    },

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("<{element}> has invalid value '{value}' for attribute '{attribute}'")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("XML write error: {0}")]
    Write(quick_xml::Error),
}

pub type Result<T> = std::result::Result<T, CobertifyError>;
