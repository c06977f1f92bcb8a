// Winterfell reexports for convenient access to commonly used components

// Reexport commonly used types and traits
pub use winter_fri::FriOptions;
pub use winter_math::FieldElement;

// Reexport specific field types
pub use winter_math::fields::{f128, f64};

// Reexport the binary codec
pub use winter_utils::{
    ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable, SliceReader,
};
