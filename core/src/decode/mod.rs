mod document;
mod noise;

pub(crate) use document::decode_next;
pub use document::parse_document;
pub use noise::NoiseFilter;
