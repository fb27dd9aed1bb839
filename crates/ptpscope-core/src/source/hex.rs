use super::SourceError;

/// Decode a hex trace string into bytes.
///
/// ASCII whitespace and `0x`/`0X` prefixes are tolerated anywhere in the
/// input, matching the loose format of hand-pasted capture dumps.
///
/// # Examples
/// ```
/// use ptpscope_core::parse_hex_trace;
///
/// let bytes = parse_hex_trace("0C 00 00 00 01 00 02 10 01 00 00 00")?;
/// assert_eq!(bytes.len(), 12);
/// # Ok::<(), ptpscope_core::SourceError>(())
/// ```
pub fn parse_hex_trace(input: &str) -> Result<Vec<u8>, SourceError> {
    let cleaned = input.replace("0x", "").replace("0X", "");
    let mut digits = Vec::new();
    for (pos, ch) in cleaned.char_indices() {
        if ch.is_ascii_whitespace() {
            continue;
        }
        let value = ch
            .to_digit(16)
            .ok_or(SourceError::InvalidHexDigit { ch, pos })? as u8;
        digits.push(value);
    }
    if digits.len() % 2 != 0 {
        return Err(SourceError::OddDigitCount {
            count: digits.len(),
        });
    }
    Ok(digits
        .chunks(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}
