use gridcalc_common::CellValue;
use gridcalc_common::text::unquote_text;

use crate::ParseError;
use crate::literal::{parse_double, parse_integer};
use crate::recognizer::recognize;

/// Turn one raw file or edit token into a cell value.
///
/// Precedence: integer, quoted text, double, then the formula shapes in
/// recognizer order. A formula that is shaped correctly but cannot be
/// extracted reports the extraction error rather than `Rejected`.
pub fn classify_and_build(token: &str) -> Result<CellValue, ParseError> {
    if let Some(i) = parse_integer(token) {
        return Ok(CellValue::Integer(i));
    }
    if let Some(text) = unquote_text(token) {
        return Ok(CellValue::Text(text));
    }
    if let Some(d) = parse_double(token) {
        return Ok(CellValue::Double(d));
    }
    match recognize(token) {
        Some(recognized) => recognized.extract().map(CellValue::Formula),
        None => Err(ParseError::Rejected {
            token: token.to_string(),
        }),
    }
}
