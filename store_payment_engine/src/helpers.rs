use rand::Rng;

/// Number of digits in a processor invoice id.
pub const INVOICE_ID_LENGTH: usize = 12;

/// Generates a fresh numeric invoice id for a payment attempt.
pub fn new_invoice_id() -> String {
    let mut rng = rand::thread_rng();
    (0..INVOICE_ID_LENGTH).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
}
