//! Boundary detection between the publisher's wrapper text and the
//! embedded JSON literal.

use crate::config::Envelope;
use crate::error::IngestError;

/// The marker separating the wrapper from the literal in `Assignment` mode.
pub const ASSIGNMENT_MARKER: char = '=';

/// Return the embedded literal of `raw` according to `envelope`.
///
/// For [`Envelope::Assignment`] the literal is everything after the
/// **first** `=`; a body without one means the publisher changed format and
/// yields [`IngestError::FormatError`]. Surrounding whitespace and a single
/// statement-terminating `;` are dropped. No validation of the literal
/// itself happens here.
///
/// ```rust
/// use iam_dataset::{Envelope, extract_embedded_literal};
/// let literal = extract_embedded_literal("app.Config = {\"a\":1};", Envelope::Assignment).unwrap();
/// assert_eq!(literal, "{\"a\":1}");
/// ```
pub fn extract_embedded_literal(raw: &str, envelope: Envelope) -> Result<&str, IngestError> {
    let literal = match envelope {
        Envelope::Assignment => match raw.find(ASSIGNMENT_MARKER) {
            Some(index) => &raw[index + ASSIGNMENT_MARKER.len_utf8()..],
            None => {
                return Err(IngestError::FormatError(format!(
                    "'{ASSIGNMENT_MARKER}' not found in {} bytes of input",
                    raw.len()
                )));
            }
        },
        Envelope::Bare => raw,
    };

    let literal = literal.trim();
    Ok(literal.strip_suffix(';').map(str::trim_end).unwrap_or(literal))
}
