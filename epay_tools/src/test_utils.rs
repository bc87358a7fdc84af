//! Key material for tests. These keys were generated for this test suite only. DO NOT use them anywhere else.

/// A 2048-bit RSA public key in PKIX (`SubjectPublicKeyInfo`) PEM format
pub const TEST_RSA_PUBLIC_KEY_PEM: &str = include_str!("../test_data/rsa_public_key.pem");
/// The PKCS#8 private key matching [`TEST_RSA_PUBLIC_KEY_PEM`]
pub const TEST_RSA_PRIVATE_KEY_PEM: &str = include_str!("../test_data/rsa_private_key.pem");
/// A P-256 EC public key in PKIX PEM format
pub const TEST_EC_PUBLIC_KEY_PEM: &str = include_str!("../test_data/ec_public_key.pem");
