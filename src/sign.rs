// Copyright (C) 2018 Stephane Raux. Distributed under the MIT license.

use crate::{Error, ErrorKind};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine, GeneralPurpose,
    GeneralPurposeConfig};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

// Signing keys are handed out padded, but trailing `=` is often lost when
// they get pasted around.
const PADDING: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);

const URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE,
    PADDING);

const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD,
    PADDING);

/// Base64 with `-` and `_` in place of `+` and `/`.
pub fn encode_url_safe<T: AsRef<[u8]>>(bytes: T) -> String {
    URL_SAFE.encode(bytes)
}

/// Decodes Base64 written with either alphabet, or a mix of both.
pub fn decode_url_safe(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(s.replace('-', "+").replace('_', "/"))
}

/// Signs request paths for business clients.
///
/// The signature is the HMAC-SHA1 of the path and query string (scheme and
/// host excluded), keyed with the decoded signing key and encoded with
/// [`encode_url_safe`].
#[derive(Clone)]
pub struct UrlSigner {
    mac: HmacSha1,
}

impl UrlSigner {
    pub fn new(signing_key: &str) -> Result<Self, Error> {
        let key = decode_url_safe(signing_key)
            .map_err(|e| Error::new(ErrorKind::InvalidSigningKey, e))?;
        let mac = HmacSha1::new_from_slice(&key)
            .map_err(|e| Error::new(ErrorKind::InvalidSigningKey,
                e.to_string()))?;
        Ok(UrlSigner {mac})
    }

    pub fn sign(&self, path_query: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(path_query.as_bytes());
        encode_url_safe(mac.finalize().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "vNIXE0xscrmjlyV-12Nj_BvUPaw=";

    #[test]
    fn published_signature() {
        let signer = UrlSigner::new(KEY).unwrap();
        let path = "/maps/api/geocode/json?address=New+York&client=clientID";
        assert_eq!(signer.sign(path), "chaRF2hTJKOScPr-RQCEhZbSzIE=");
    }

    #[test]
    fn signing_is_deterministic() {
        let signer = UrlSigner::new(KEY).unwrap();
        let path = "/maps/api/geocode/xml?latlng=40.714%2C-73.961&client=gme-x";
        assert_eq!(signer.sign(path), signer.sign(path));
        assert_ne!(signer.sign(path), signer.sign("/maps/api/geocode/xml?"));
    }

    #[test]
    fn unpadded_key_signs_the_same() {
        let padded = UrlSigner::new(KEY).unwrap();
        let unpadded = UrlSigner::new(KEY.trim_end_matches('=')).unwrap();
        assert_eq!(padded.sign("/path?a=b"), unpadded.sign("/path?a=b"));
    }

    #[test]
    fn standard_alphabet_key_signs_the_same() {
        let path = "/maps/api/geocode/json?address=New+York&client=clientID";
        let keys = ["vNIXE0xscrmjlyV+12Nj/BvUPaw=",
            "vNIXE0xscrmjlyV+12Nj_BvUPaw"];
        for key in &keys {
            let signer = UrlSigner::new(key).unwrap();
            assert_eq!(signer.sign(path), "chaRF2hTJKOScPr-RQCEhZbSzIE=");
        }
    }

    #[test]
    fn bad_key() {
        let e = UrlSigner::new("not base64!").err().unwrap();
        assert_eq!(e.kind(), &ErrorKind::InvalidSigningKey);
    }

    #[test]
    fn url_safe_alphabet() {
        let bytes = [0xfb, 0xff, 0xbf, 0x00, 0x10];
        let encoded = encode_url_safe(&bytes);
        assert_eq!(encoded, "-_-_ABA=");
        assert_eq!(decode_url_safe(&encoded).unwrap(), bytes.to_vec());
        for s in &[&b""[..], b"f", b"fo", b"foo", b"\x00\xff\xfe"] {
            assert_eq!(decode_url_safe(&encode_url_safe(s)).unwrap(), *s);
        }
    }
}
