use crate::predicate::Predicate;
use sha2::{Digest, Sha256};
use std::fmt::{self, Write as _};

///
/// ShapeSignature
///
/// Stable, deterministic hash of a predicate's structural shape.
/// Covers node kinds, tree layout, field names and `InList` arity.
/// Excludes literal values, which backends bind as parameters.
///
/// Two predicates share a signature exactly when a plan cache keyed by
/// predicate shape would reuse one compiled plan for both.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ShapeSignature([u8; 32]);

impl ShapeSignature {
    #[must_use]
    pub const fn into_bytes(self) -> [u8; 32] {
        self.0
    }

    #[must_use]
    pub fn as_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for byte in self.0 {
            let _ = write!(out, "{byte:02x}");
        }

        out
    }
}

impl fmt::Display for ShapeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

impl<T, K> Predicate<T, K> {
    /// Compute the shape signature of this predicate.
    #[must_use]
    pub fn shape_signature(&self) -> ShapeSignature {
        let mut hasher = Sha256::new();
        hasher.update(b"shapesig:v1");
        hash_shape(&mut hasher, self);

        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        ShapeSignature(out)
    }
}

/// Hash predicate structure into the shape hash stream.
fn hash_shape<T, K>(hasher: &mut Sha256, predicate: &Predicate<T, K>) {
    match predicate {
        Predicate::True => write_tag(hasher, 0x21),
        Predicate::False => write_tag(hasher, 0x22),
        Predicate::Eq { field, .. } => {
            write_tag(hasher, 0x26);
            write_str(hasher, field.name());
        }
        Predicate::Or(left, right) => {
            write_tag(hasher, 0x24);
            hash_shape(hasher, left);
            hash_shape(hasher, right);
        }
        Predicate::Not(inner) => {
            write_tag(hasher, 0x25);
            hash_shape(hasher, inner);
        }
        Predicate::InList { field, values } => {
            write_tag(hasher, 0x2b);
            write_str(hasher, field.name());
            write_len_u32(hasher, values.len());
        }
    }
}

///
/// Encode one string with length prefix into the shape hash stream.
///

fn write_str(hasher: &mut Sha256, value: &str) {
    write_len_u32(hasher, value.len());
    hasher.update(value.as_bytes());
}

/// Encode a platform-sized length as u32 with deterministic saturation.
fn write_len_u32(hasher: &mut Sha256, len: usize) {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    hasher.update(len.to_be_bytes());
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}
