//! Input bytes, BOM stripping, and encoding guardrails.
//!
//! Reports are plain text. Binary coverage databases and UTF-16/32 exports
//! are refused up front rather than scanned as garbage lines.

/// Maximum number of bytes to scan for NUL (0x00).
pub const NUL_SCAN_LIMIT: usize = 8 * 1024;

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 LE BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-32 BE BOM bytes.
pub const UTF32_BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

/// Encoding guardrail failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingIssue {
    /// UTF-16/UTF-32 BOM detected.
    Utf16Or32Bom,
    /// NUL byte detected within the first 8KB (likely a binary database).
    NulByte,
    /// Bytes are not valid UTF-8; `valid_up_to` is the byte offset.
    InvalidUtf8 { valid_up_to: usize },
}

impl EncodingIssue {
    pub fn describe(self) -> String {
        match self {
            EncodingIssue::Utf16Or32Bom => "report starts with a UTF-16/UTF-32 byte order mark".to_string(),
            EncodingIssue::NulByte => "report contains NUL bytes (binary coverage database?)".to_string(),
            EncodingIssue::InvalidUtf8 { valid_up_to } => {
                format!("report is not valid UTF-8 (first bad byte at offset {valid_up_to})")
            }
        }
    }
}

/// Strip a UTF-8 BOM if present. Returns the stripped slice and a flag.
#[inline]
pub fn strip_utf8_bom(input: &[u8]) -> (&[u8], bool) {
    if input.starts_with(&UTF8_BOM) {
        (&input[UTF8_BOM.len()..], true)
    } else {
        (input, false)
    }
}

/// Returns true if the input begins with a UTF-16 or UTF-32 BOM.
#[inline]
pub fn has_utf16_or_utf32_bom(input: &[u8]) -> bool {
    matches!(
        input,
        [0x00, 0x00, 0xFE, 0xFF, ..]
            | [0xFF, 0xFE, 0x00, 0x00, ..]
            | [0xFE, 0xFF, ..]
            | [0xFF, 0xFE, ..]
    )
}

/// Returns true if a NUL byte (0x00) is found within the first 8KB.
#[inline]
pub fn has_nul_in_first_8k(input: &[u8]) -> bool {
    input.iter().take(NUL_SCAN_LIMIT).any(|byte| *byte == 0)
}

/// Apply encoding guardrails and return the report text.
///
/// Order:
/// 1) UTF-16/UTF-32 BOM ⇒ refuse (E_ENCODING)
/// 2) UTF-8 BOM ⇒ strip and continue
/// 3) NUL byte in first 8KB ⇒ refuse (E_ENCODING)
/// 4) invalid UTF-8 ⇒ refuse (E_ENCODING)
pub fn guard_input_bytes(input: &[u8]) -> Result<&str, EncodingIssue> {
    if has_utf16_or_utf32_bom(input) {
        return Err(EncodingIssue::Utf16Or32Bom);
    }
    let (stripped, _had_utf8_bom) = strip_utf8_bom(input);
    if has_nul_in_first_8k(stripped) {
        return Err(EncodingIssue::NulByte);
    }
    std::str::from_utf8(stripped).map_err(|err| EncodingIssue::InvalidUtf8 {
        valid_up_to: err.valid_up_to(),
    })
}
