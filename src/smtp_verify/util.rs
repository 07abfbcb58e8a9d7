use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, distributions::Alphanumeric};

/// Local part that no real mailbox should carry: `nonexistent` followed by
/// the current time in milliseconds and a random lowercase suffix.
pub fn synthetic_local_part() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|byte| char::from(byte).to_ascii_lowercase())
        .collect();
    format!("nonexistent{millis}{suffix}")
}
