use log::trace;
use rsa::{
    pkcs1::ALGORITHM_OID as RSA_ALGORITHM_OID,
    pkcs8::{der::Document, SubjectPublicKeyInfoRef},
    RsaPublicKey,
};

use crate::EpayApiError;

/// Parses a PEM-encoded PKIX (`SubjectPublicKeyInfo`) RSA public key.
///
/// * A missing or malformed PEM block is a [`EpayApiError::KeyDecode`].
/// * A PEM block that is not a PKIX public key is a [`EpayApiError::KeyParse`].
/// * A valid PKIX key for any algorithm other than RSA is a [`EpayApiError::KeyType`].
pub fn parse_public_key_pem(pem: &[u8]) -> Result<RsaPublicKey, EpayApiError> {
    let text = std::str::from_utf8(pem).map_err(|e| EpayApiError::KeyDecode(e.to_string()))?;
    let (label, document) = Document::from_pem(text.trim()).map_err(|e| EpayApiError::KeyDecode(e.to_string()))?;
    trace!("Decoded PEM block labelled '{label}'");
    let spki = SubjectPublicKeyInfoRef::try_from(document.as_bytes())
        .map_err(|e| EpayApiError::KeyParse(e.to_string()))?;
    if spki.algorithm.oid != RSA_ALGORITHM_OID {
        return Err(EpayApiError::KeyType(spki.algorithm.oid.to_string()));
    }
    RsaPublicKey::try_from(spki).map_err(|e| EpayApiError::KeyParse(e.to_string()))
}
