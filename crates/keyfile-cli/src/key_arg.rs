//! Decoding of key arguments given on the command line
//!
//! - `-` reads the key from stdin
//! - `#x<hex>` is a string of hexadecimal digits
//! - `@<base64>` is standard base64
//! - anything else is taken verbatim

use std::io::Read;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Error, Debug)]
pub enum KeyArgError {
    #[error("invalid hex key: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid base64 key: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("reading key from stdin: {0}")]
    Stdin(#[from] std::io::Error),
}

/// Decode `arg`, reading from `stdin` when it is `-`
pub fn decode_key<R: Read>(arg: &str, stdin: R) -> Result<Zeroizing<Vec<u8>>, KeyArgError> {
    if arg == "-" {
        let mut buf = Zeroizing::new(Vec::new());
        let mut stdin = stdin;
        stdin.read_to_end(&mut buf)?;
        return Ok(buf);
    }
    if let Some(digits) = arg.strip_prefix("#x") {
        return Ok(Zeroizing::new(hex::decode(digits)?));
    }
    if let Some(encoded) = arg.strip_prefix('@') {
        return Ok(Zeroizing::new(STANDARD.decode(encoded)?));
    }
    Ok(Zeroizing::new(arg.as_bytes().to_vec()))
}

/// Format a key for display on stdout
pub fn encode_key(key: &[u8]) -> String {
    STANDARD.encode(key)
}
