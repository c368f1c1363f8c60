//! User records and their JSON text form

pub mod codec;
mod types;

pub use codec::{decode, decode_all, encode, encode_all};
pub use types::{new_record_id, now_timestamp, NewRecord, Record, RecordPatch, FIELD_KEYS};
