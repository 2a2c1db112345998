//! End-to-end checks of the keyfile format through the public API.

use keyfile_core::{load_key, read_keyfile, rekey, Keyfile, KeyfileError, HEADER_LEN, MAGIC};
use tempfile::TempDir;

#[test]
fn random_secret_survives_encode_and_parse() {
    let mut kf = Keyfile::new();
    let secret = kf.random("correct horse", 48).unwrap();
    assert_eq!(secret.len(), 48);

    let bits = kf.encode();
    assert!(bits.starts_with(MAGIC));

    let parsed = Keyfile::parse(&bits).unwrap();
    assert_eq!(parsed.get("correct horse").unwrap(), secret);
    assert!(matches!(
        parsed.get("wrong"),
        Err(KeyfileError::BadPassphrase)
    ));
}

#[test]
fn round_trip_various_secrets() {
    let cases: [(&str, &[u8]); 4] = [
        ("", b""),
        ("apoplexis", b"rhubarb is disgusting"),
        ("unicode \u{1F511} passphrase", &[0u8, 1, 2, 255, 254]),
        ("long", &[0x5A; 1024]),
    ];

    for (passphrase, secret) in cases {
        let mut kf = Keyfile::new();
        kf.set(passphrase, secret).unwrap();

        let parsed = Keyfile::parse(&kf.encode()).unwrap();
        let got = parsed.get(passphrase).unwrap();
        assert_eq!(got.expose(), secret, "passphrase {:?}", passphrase);
    }
}

#[test]
fn truncated_packets_are_malformed() {
    let mut kf = Keyfile::new();
    kf.set("passphrase", b"truncate me").unwrap();
    let bits = kf.encode();

    let body_start = HEADER_LEN + kf.salt().len() + kf.nonce().len();
    for n in 0..body_start {
        match Keyfile::parse(&bits[..n]) {
            Err(KeyfileError::MalformedPacket(_)) => {}
            other => panic!("prefix of length {}: got {:?}", n, other),
        }
    }
}

#[test]
fn truncated_ciphertext_fails_authentication() {
    let mut kf = Keyfile::new();
    kf.set("passphrase", b"truncate me").unwrap();
    let bits = kf.encode();

    let parsed = Keyfile::parse(&bits[..bits.len() - 1]).unwrap();
    assert!(matches!(
        parsed.get("passphrase"),
        Err(KeyfileError::BadPassphrase)
    ));
}

#[test]
fn stored_file_loads_and_rekeys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("service.key");

    let mut kf = Keyfile::new();
    let secret = kf.random("first", 32).unwrap();
    std::fs::write(&path, kf.encode()).unwrap();

    let loaded = load_key(&path, || Ok("first")).unwrap();
    assert_eq!(loaded, secret);

    let rekeyed = rekey(&read_keyfile(&path).unwrap(), "first", || Ok("second")).unwrap();
    std::fs::write(&path, rekeyed.encode()).unwrap();

    let err = load_key(&path, || Ok("first")).unwrap_err();
    assert!(matches!(err.root(), KeyfileError::BadPassphrase));
    assert_eq!(load_key(&path, || Ok("second")).unwrap(), secret);
}
