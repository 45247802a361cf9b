use num_traits::{ToBytes, Unsigned};

/// Types usable as tree keys: anything exposing an ordered byte view.
///
/// Traversal, matching, and iteration all operate on the view returned by
/// [`bytes`](RadixKey::bytes); iteration order is the lexicographic order of
/// those views. Borrowed lookups (`get`, `remove`, ...) accept any `Q` where
/// `K: Borrow<Q>`, which requires the two views to agree on the same bytes.
/// The provided impls hold that for `String`/`str` and `Vec<u8>`/`[u8]`.
///
/// Fixed-width integers are viewed as big-endian bytes, with the sign bit
/// flipped for signed types, so their iteration order is numeric order.
pub trait RadixKey {
    /// Byte view of the key, borrowed or built on the fly.
    type Bytes<'a>: AsRef<[u8]>
    where
        Self: 'a;

    fn bytes(&self) -> Self::Bytes<'_>;
}

impl RadixKey for String {
    type Bytes<'a> = &'a [u8];

    fn bytes(&self) -> Self::Bytes<'_> {
        self.as_bytes()
    }
}

impl RadixKey for str {
    type Bytes<'a> = &'a [u8];

    fn bytes(&self) -> Self::Bytes<'_> {
        self.as_bytes()
    }
}

impl RadixKey for Vec<u8> {
    type Bytes<'a> = &'a [u8];

    fn bytes(&self) -> Self::Bytes<'_> {
        self.as_slice()
    }
}

impl RadixKey for [u8] {
    type Bytes<'a> = &'a [u8];

    fn bytes(&self) -> Self::Bytes<'_> {
        self
    }
}

impl<const N: usize> RadixKey for [u8; N] {
    type Bytes<'a> = &'a [u8];

    fn bytes(&self) -> Self::Bytes<'_> {
        self.as_slice()
    }
}

impl<T: RadixKey + ?Sized> RadixKey for &T {
    type Bytes<'a>
        = T::Bytes<'a>
    where
        Self: 'a;

    fn bytes(&self) -> Self::Bytes<'_> {
        (**self).bytes()
    }
}

fn be_bytes<T: Unsigned + ToBytes>(value: &T) -> T::Bytes {
    value.to_be_bytes()
}

macro_rules! unsigned_key {
    ($($t:ty),*) => {
        $(
            impl RadixKey for $t {
                type Bytes<'a> = <$t as ToBytes>::Bytes;

                fn bytes(&self) -> Self::Bytes<'_> {
                    be_bytes(self)
                }
            }
        )*
    };
}

unsigned_key!(u8, u16, u32, u64, u128, usize);

macro_rules! signed_key {
    ($(($t:ty, $ut:ty)),*) => {
        $(
            impl RadixKey for $t {
                type Bytes<'a> = <$ut as ToBytes>::Bytes;

                fn bytes(&self) -> Self::Bytes<'_> {
                    // Flip the sign bit so the byte order matches numeric
                    // order: MIN maps to all-zeroes, -1 just below 0.
                    let flipped = (*self as $ut) ^ ((1 as $ut) << (<$ut>::BITS - 1));
                    be_bytes(&flipped)
                }
            }
        )*
    };
}

signed_key!(
    (i8, u8),
    (i16, u16),
    (i32, u32),
    (i64, u64),
    (i128, u128),
    (isize, usize)
);

#[cfg(test)]
mod tests {
    use super::RadixKey;

    fn view<K: RadixKey + ?Sized>(key: &K) -> Vec<u8> {
        key.bytes().as_ref().to_vec()
    }

    #[test]
    fn string_views_agree_with_str() {
        let owned = String::from("route");
        assert_eq!(view(&owned), view("route"));
        assert_eq!(view(&owned), b"route");
    }

    #[test]
    fn vec_views_agree_with_slice() {
        let owned = vec![1u8, 2, 3];
        assert_eq!(view(&owned), view(&[1u8, 2, 3][..]));
        assert_eq!(view(&owned), view(&[1u8, 2, 3]));
    }

    #[test]
    fn unsigned_order_is_numeric() {
        let mut pairs: Vec<u32> = vec![300, 2, 70_000, 0, u32::MAX];
        pairs.sort_by_key(|v| view(v));
        assert_eq!(pairs, vec![0, 2, 300, 70_000, u32::MAX]);
    }

    #[test]
    fn signed_order_is_numeric_across_zero() {
        let mut vals: Vec<i64> = vec![5, -1, i64::MIN, 0, -500, i64::MAX];
        vals.sort_by_key(|v| view(v));
        assert_eq!(vals, vec![i64::MIN, -500, -1, 0, 5, i64::MAX]);
    }

    #[test]
    fn reference_keys_delegate() {
        let s = "abc";
        assert_eq!(view(&s), view(s));
        assert_eq!(view(&&s), view(s));
    }
}
