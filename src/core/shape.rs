//! Capability Classifier
//!
//! A type is eligible for the codec when it implements both [`Encodable`] and
//! [`Decodable`]. Eligibility composes through the trait bounds on the
//! container impls: `Vec<T>` is eligible only if `T` is, a tuple only if every
//! field is, and so on. There is no runtime override; an ineligible type is a
//! build error wherever the bound is required.
//!
//! ```compile_fail
//! use std::rc::Rc;
//! use wirepack::Codec;
//!
//! // Rc<u32> owns a heap allocation: not a scalar, not a container.
//! let value: (u32, Vec<Rc<u32>>) = (1, vec![Rc::new(2)]);
//! Codec::LITTLE.encode_to_vec(&value).unwrap();
//! ```
//!
//! ```compile_fail
//! // No `Encodable` impl: a struct holding a `Vec` is not a scalar, and it
//! // makes any tuple containing it ineligible.
//! struct WithVec {
//!     values: Vec<i32>,
//! }
//! wirepack::assert_encodable!((u32, WithVec));
//! ```

use super::cursor::{ByteReader, ByteWriter};
use super::order::Codec;
use crate::error::CodecResult;

/// Wire category of an encodable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Fixed-width value copied through the byte-order converter.
    Scalar,
    /// Growable homogeneous collection, `u32` count prefix.
    Sequence,
    /// Homogeneous collection with a length fixed by its type, no prefix.
    FixedArray,
    /// Heterogeneous fields in declared order, no prefix.
    Tuple,
    /// Owned null-terminated text, `u32` length prefix, no terminator on the wire.
    CString,
}

/// Types the codec can size and write.
///
/// `encoded_len` must equal the number of bytes `encode_to` writes.
pub trait Encodable {
    const SHAPE: Shape;

    /// Exact encoded size in bytes.
    fn encoded_len(&self) -> usize;

    fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()>;

    /// Human-readable rendering for logs. Not part of the wire format.
    fn preview(&self, out: &mut String) {
        out.push_str(std::any::type_name::<Self>());
    }
}

/// Types the codec can reconstruct.
pub trait Decodable: Encodable + Sized {
    fn decode_from(codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<Self>;

    /// Decode over an existing value, reusing its storage where the shape allows.
    ///
    /// If this returns an error, `self` may be partly overwritten.
    fn decode_in_place(&mut self, codec: &Codec, reader: &mut ByteReader<'_>) -> CodecResult<()> {
        *self = Self::decode_from(codec, reader)?;
        Ok(())
    }
}

/// Shape the classifier assigned to `T`.
pub const fn shape_of<T: Encodable + ?Sized>() -> Shape {
    T::SHAPE
}

impl<T: Encodable + ?Sized> Encodable for &T {
    const SHAPE: Shape = T::SHAPE;

    #[inline(always)]
    fn encoded_len(&self) -> usize {
        (**self).encoded_len()
    }

    #[inline(always)]
    fn encode_to(&self, codec: &Codec, writer: &mut ByteWriter<'_>) -> CodecResult<()> {
        (**self).encode_to(codec, writer)
    }

    fn preview(&self, out: &mut String) {
        (**self).preview(out)
    }
}

#[doc(hidden)]
pub mod probe {
    //! Autoref probe behind `is_encodable!`. Method resolution picks
    //! `Eligible` when the bound holds and falls back to `Ineligible` otherwise.
    //! Only meaningful for concrete types.

    use std::marker::PhantomData;

    use super::{Decodable, Encodable};

    pub struct Probe<T: ?Sized>(PhantomData<T>);

    impl<T: ?Sized> Probe<T> {
        pub const fn new() -> Self {
            Probe(PhantomData)
        }
    }

    pub trait Eligible {
        fn is_encodable(&self) -> bool {
            true
        }
    }

    impl<T: Encodable + Decodable> Eligible for Probe<T> {}

    pub trait Ineligible {
        fn is_encodable(&self) -> bool {
            false
        }
    }

    impl<T: ?Sized> Ineligible for &Probe<T> {}
}

/// Classify a concrete type: `true` when it can be both encoded and decoded.
///
/// ```
/// use std::ffi::CString;
/// use std::rc::Rc;
///
/// assert!(wirepack::is_encodable!((String, Vec<i32>, f64)));
/// assert!(wirepack::is_encodable!([Vec<CString>; 2]));
/// assert!(!wirepack::is_encodable!(Vec<Rc<u8>>));
/// assert!(!wirepack::is_encodable!((u32, Box<u32>)));
/// ```
#[macro_export]
macro_rules! is_encodable {
    ($ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::__private::{Eligible as _, Ineligible as _};
        (&$crate::__private::Probe::<$ty>::new()).is_encodable()
    }};
}

/// Fail the build unless every listed type is eligible.
///
/// ```
/// wirepack::assert_encodable!(u8, Vec<(u16, String)>, [f32; 8]);
/// ```
///
/// ```compile_fail
/// wirepack::assert_encodable!(Vec<std::cell::RefCell<u8>>);
/// ```
#[macro_export]
macro_rules! assert_encodable {
    ($($ty:ty),+ $(,)?) => {
        const _: () = {
            const fn eligible<T: $crate::Encodable + $crate::Decodable>() {}
            $( eligible::<$ty>(); )+
        };
    };
}
