//! Errors raised while producing SVG output.

use std::string::FromUtf8Error;

use strata_css::StackingError;
use thiserror::Error;

/// A failure while writing XML.
#[derive(Debug, Error)]
pub enum SvgError {
    /// The XML writer reported an error.
    #[error("failed to write SVG: {0}")]
    Xml(String),

    /// The written document is not valid UTF-8.
    #[error("SVG output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// A failure anywhere in the conversion pipeline.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Building the stacking tree failed.
    #[error(transparent)]
    Stacking(#[from] StackingError),

    /// Writing the SVG failed.
    #[error(transparent)]
    Svg(#[from] SvgError),
}
