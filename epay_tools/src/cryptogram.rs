use rsa::{rand_core::CryptoRngCore, traits::PublicKeyParts, Pkcs1v15Encrypt, RsaPublicKey};
use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::{CardDetails, EpayApiError};

/// Bytes of padding PKCS#1 v1.5 encryption needs. A key of `n` bytes can encrypt at most `n - 11` bytes of plaintext.
pub const PKCS1_V15_OVERHEAD: usize = 11;

/// The card fields the processor expects inside a cryptogram.
///
/// Fields are declared in lexicographic order of their JSON keys, so the serialized plaintext is stable.
#[derive(Serialize, Zeroize, ZeroizeOnDrop)]
pub struct CardCryptogram {
    cvc: String,
    #[serde(rename = "expDate")]
    exp_date: String,
    hpan: String,
    #[serde(rename = "terminalId")]
    terminal_id: String,
}

impl CardCryptogram {
    pub fn new(card: &CardDetails, terminal_id: &str) -> Self {
        Self {
            cvc: card.cvc.reveal().clone(),
            exp_date: card.expiry.reveal().clone(),
            hpan: card.pan.reveal().clone(),
            terminal_id: terminal_id.to_string(),
        }
    }
}

/// Encrypts the card fields with the processor's public key, using the thread-local CSPRNG.
/// See [`encrypt_cryptogram_with_rng`].
pub fn encrypt_cryptogram(card: &CardCryptogram, key: &RsaPublicKey) -> Result<String, EpayApiError> {
    let mut rng = rand::thread_rng();
    encrypt_cryptogram_with_rng(card, key, &mut rng)
}

/// Serializes the card fields to JSON, encrypts them with PKCS#1 v1.5 and returns the ciphertext in padded standard
/// base64.
///
/// The plaintext is zeroed before this function returns, on every path.
pub fn encrypt_cryptogram_with_rng<R: CryptoRngCore>(
    card: &CardCryptogram,
    key: &RsaPublicKey,
    rng: &mut R,
) -> Result<String, EpayApiError> {
    let plaintext =
        Zeroizing::new(serde_json::to_vec(card).map_err(|e| EpayApiError::Encryption(e.to_string()))?);
    let capacity = key.size().saturating_sub(PKCS1_V15_OVERHEAD);
    if plaintext.len() > capacity {
        return Err(EpayApiError::Encryption(format!(
            "The cryptogram plaintext is {} bytes, but a {}-bit key can only encrypt {capacity} bytes",
            plaintext.len(),
            key.size() * 8
        )));
    }
    let ciphertext =
        key.encrypt(rng, Pkcs1v15Encrypt, plaintext.as_slice()).map_err(|e| EpayApiError::Encryption(e.to_string()))?;
    Ok(base64::encode(ciphertext))
}
