pub mod event_config;
pub mod item;
pub mod participant;
pub mod rsvp;

/// Convert a stored timestamp into the unix seconds used on the wire.
pub fn unix_timestamp(at: time::PrimitiveDateTime) -> i64 {
    at.assume_utc().unix_timestamp()
}
