//! Binary packet layout
//!
//! ```text
//! magic[3] | slen[1] | nlen[1] | salt[slen] | nonce[nlen] | ciphertext[..]
//! ```

use crate::error::{KeyfileError, Result};

/// Format tag at the start of every packet
pub const MAGIC: &[u8; 3] = b"KF\x02";

/// Magic plus the two length bytes
pub const HEADER_LEN: usize = MAGIC.len() + 2;

/// Borrowed view of the fields of a structurally valid packet
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Fields<'a> {
    pub salt: &'a [u8],
    pub nonce: &'a [u8],
    pub ciphertext: &'a [u8],
}

fn malformed(msg: impl Into<String>) -> KeyfileError {
    KeyfileError::MalformedPacket(msg.into())
}

/// Split `data` into its fields without any cryptographic checks.
pub(crate) fn split(data: &[u8]) -> Result<Fields<'_>> {
    let rest = data
        .strip_prefix(MAGIC.as_slice())
        .ok_or_else(|| malformed("missing format tag"))?;

    let (lengths, body) = match rest {
        [slen, nlen, body @ ..] => ((*slen as usize, *nlen as usize), body),
        _ => return Err(malformed("truncated header")),
    };
    let (slen, nlen) = lengths;

    if body.len() < slen {
        return Err(malformed(format!(
            "truncated salt: want {} bytes, have {}",
            slen,
            body.len()
        )));
    }
    let (salt, body) = body.split_at(slen);

    if body.len() < nlen {
        return Err(malformed(format!(
            "truncated nonce: want {} bytes, have {}",
            nlen,
            body.len()
        )));
    }
    let (nonce, ciphertext) = body.split_at(nlen);

    if salt.is_empty() != nonce.is_empty() {
        return Err(malformed("salt and nonce must both be present or both absent"));
    }

    Ok(Fields {
        salt,
        nonce,
        ciphertext,
    })
}

/// Serialize fields in packet order. Salt and nonce are at most 255 bytes.
pub(crate) fn join(fields: &Fields<'_>) -> Vec<u8> {
    debug_assert!(fields.salt.len() <= u8::MAX as usize);
    debug_assert!(fields.nonce.len() <= u8::MAX as usize);

    let mut out = Vec::with_capacity(
        HEADER_LEN + fields.salt.len() + fields.nonce.len() + fields.ciphertext.len(),
    );
    out.extend_from_slice(MAGIC);
    out.push(fields.salt.len() as u8);
    out.push(fields.nonce.len() as u8);
    out.extend_from_slice(fields.salt);
    out.extend_from_slice(fields.nonce);
    out.extend_from_slice(fields.ciphertext);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<u8> {
        join(&Fields {
            salt: &[0xAA; 4],
            nonce: &[0xBB; 3],
            ciphertext: b"xyz",
        })
    }

    #[test]
    fn test_layout() {
        let bits = sample();
        assert_eq!(&bits[..3], b"KF\x02");
        assert_eq!(bits[3], 4);
        assert_eq!(bits[4], 3);
        assert_eq!(&bits[5..9], &[0xAA; 4]);
        assert_eq!(&bits[9..12], &[0xBB; 3]);
        assert_eq!(&bits[12..], b"xyz");
    }

    #[test]
    fn test_split_join_identity() {
        let bits = sample();
        let fields = split(&bits).unwrap();
        assert_eq!(fields.salt, &[0xAA; 4]);
        assert_eq!(fields.nonce, &[0xBB; 3]);
        assert_eq!(fields.ciphertext, b"xyz");
        assert_eq!(join(&fields), bits);
    }

    #[test]
    fn test_empty_packet() {
        let fields = split(b"KF\x02\x00\x00").unwrap();
        assert!(fields.salt.is_empty());
        assert!(fields.nonce.is_empty());
        assert!(fields.ciphertext.is_empty());
    }

    #[test]
    fn test_bad_magic() {
        assert!(matches!(split(b""), Err(KeyfileError::MalformedPacket(_))));
        assert!(matches!(split(b"KF"), Err(KeyfileError::MalformedPacket(_))));
        assert!(matches!(
            split(b"KF\x01\x00\x00"),
            Err(KeyfileError::MalformedPacket(_))
        ));
        assert!(matches!(
            split(b"XYZ\x00\x00"),
            Err(KeyfileError::MalformedPacket(_))
        ));
    }

    #[test]
    fn test_every_truncation_before_ciphertext_fails() {
        let bits = sample();
        let body_start = HEADER_LEN + 4 + 3;
        for n in 0..body_start {
            let err = split(&bits[..n]).unwrap_err();
            assert!(
                matches!(err, KeyfileError::MalformedPacket(_)),
                "prefix of length {} gave {:?}",
                n,
                err
            );
        }
        assert!(split(&bits[..body_start]).is_ok());
    }

    #[test]
    fn test_oversized_lengths() {
        let err = split(b"KF\x02\xff\xff").unwrap_err();
        assert!(err.to_string().contains("truncated salt"));
    }

    #[test]
    fn test_half_populated_rejected() {
        assert!(matches!(
            split(b"KF\x02\x02\x00ab"),
            Err(KeyfileError::MalformedPacket(_))
        ));
        assert!(matches!(
            split(b"KF\x02\x00\x02ab"),
            Err(KeyfileError::MalformedPacket(_))
        ));
    }
}
