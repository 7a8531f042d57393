//! Event id generation

use rand::distributions::Alphanumeric;
use rand::Rng;

use super::time::current_timestamp_millis;

/// Length of the random suffix appended to each event id
const SUFFIX_LEN: usize = 9;

/// Generate a unique event id of the form `evt_<millis>_<suffix>`
///
/// The millisecond prefix keeps ids roughly sortable by creation time;
/// the random suffix disambiguates ids minted within the same millisecond.
pub fn generate_event_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();

    format!("evt_{}_{}", current_timestamp_millis(), suffix)
}
