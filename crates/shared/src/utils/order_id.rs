use anyhow::Result;
use rand::TryRngCore;
use rand::rngs::OsRng;
use uuid::Builder;

/// Random (v4) UUID drawn straight from the OS generator, so an unavailable
/// entropy source is reported instead of panicking.
pub fn generate_order_id() -> Result<String> {
    let mut bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut bytes)?;

    Ok(Builder::from_random_bytes(bytes).into_uuid().to_string())
}
