//! Normalization of text arriving from the keyboard or a paste.
//!
//! Contract:
//! - Input: raw `&str` from key commits or bracketed paste.
//! - Output: NFC-normalized `String` with CRLF / CR line endings folded to LF.
//! - Does not log content; callers log lengths only.
//!
//! Uploaded files are not routed through here: their content is loaded
//! verbatim apart from line-ending folding.

use unicode_normalization::UnicodeNormalization;

/// NFC-normalize input text and fold line endings to `\n`.
pub fn normalize_input(input: &str) -> String {
    let nfc: String = input.nfc().collect();
    if nfc.contains('\r') {
        nfc.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        nfc
    }
}
