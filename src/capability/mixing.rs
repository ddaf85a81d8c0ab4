//! Hash accumulation and output expansion for the software generator.

use crate::config::{ExpansionMode, HashAlgorithm};
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

/// Context string for XOF expansion.
const XOF_CONTEXT: &str = "hwrng 2024 xof expansion v1";

/// Output blocks a single HKDF expand can produce.
const HKDF_MAX_BLOCKS: usize = 255;

/// Runs `$body` with `$d` bound to the digest type for `$alg`.
macro_rules! with_digest {
    ($alg:expr, $d:ident => $body:expr) => {
        match $alg {
            HashAlgorithm::Sha256 => {
                type $d = Sha256;
                $body
            }
            HashAlgorithm::Sha512 => {
                type $d = Sha512;
                $body
            }
            HashAlgorithm::Sha1 => {
                type $d = Sha1;
                $body
            }
        }
    };
}

/// Running hash over collected entropy.
#[derive(Clone)]
pub(crate) enum Accumulator {
    Sha256(Sha256),
    Sha512(Sha512),
    Sha1(Sha1),
}

impl Accumulator {
    pub(crate) fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            HashAlgorithm::Sha512 => Self::Sha512(Sha512::new()),
            HashAlgorithm::Sha1 => Self::Sha1(Sha1::new()),
        }
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        match self {
            Self::Sha256(h) => Digest::update(h, data),
            Self::Sha512(h) => Digest::update(h, data),
            Self::Sha1(h) => Digest::update(h, data),
        }
    }

    /// Finalizes the current digest and resets the hasher.
    pub(crate) fn finalize_reset(&mut self) -> Vec<u8> {
        match self {
            Self::Sha256(h) => h.finalize_reset().to_vec(),
            Self::Sha512(h) => h.finalize_reset().to_vec(),
            Self::Sha1(h) => h.finalize_reset().to_vec(),
        }
    }
}

/// One-shot hash of the concatenated parts.
pub(crate) fn hash_parts(algorithm: HashAlgorithm, parts: &[&[u8]]) -> Vec<u8> {
    let mut acc = Accumulator::new(algorithm);
    for part in parts {
        acc.update(part);
    }
    acc.finalize_reset()
}

/// Stretches `digest` to fill `out`.
///
/// HKDF output beyond 255 blocks is produced in segments; segment `n > 0`
/// appends `n` as a little-endian u32 to `info`.
pub(crate) fn expand(
    algorithm: HashAlgorithm,
    mode: ExpansionMode,
    digest: &[u8],
    seed: Option<&[u8]>,
    info: Option<&[u8]>,
    out: &mut [u8],
) -> bool {
    match mode {
        ExpansionMode::Counter => {
            expand_counter(algorithm, digest, out);
            true
        }
        ExpansionMode::Hkdf => with_digest!(algorithm, D => {
            let hkdf = Hkdf::<D>::new(seed, digest);
            let info = info.unwrap_or_default();
            out.chunks_mut(algorithm.digest_len() * HKDF_MAX_BLOCKS)
                .zip(0u32..)
                .all(|(segment, index)| match index {
                    0 => hkdf.expand(info, segment).is_ok(),
                    _ => hkdf
                        .expand_multi_info(&[info, &index.to_le_bytes()], segment)
                        .is_ok(),
                })
        }),
        ExpansionMode::HmacChain => with_digest!(algorithm, D => {
            expand_hmac_chain::<Hmac<D>>(digest, out)
        }),
        ExpansionMode::Xof => {
            let mut hasher = blake3::Hasher::new_derive_key(XOF_CONTEXT);
            hasher.update(digest);
            hasher.finalize_xof().fill(out);
            true
        }
    }
}

/// First block is the digest itself; each later block hashes the previous
/// block with a little-endian counter starting at 1.
fn expand_counter(algorithm: HashAlgorithm, digest: &[u8], out: &mut [u8]) {
    let mut block = digest.to_vec();
    let mut counter: u32 = 1;
    let mut chunks = out.chunks_mut(digest.len());

    if let Some(first) = chunks.next() {
        first.copy_from_slice(&block[..first.len()]);
    }
    for chunk in chunks {
        block = hash_parts(algorithm, &[&block, &counter.to_le_bytes()]);
        chunk.copy_from_slice(&block[..chunk.len()]);
        counter = counter.wrapping_add(1);
    }
}

/// `block_i = HMAC(digest, block_{i-1} || i)`.
fn expand_hmac_chain<M: Mac + hmac::digest::KeyInit>(digest: &[u8], out: &mut [u8]) -> bool {
    let mut previous: Vec<u8> = Vec::new();
    let mut counter: u32 = 1;
    let mut written = 0;

    while written < out.len() {
        let mut mac = match <M as Mac>::new_from_slice(digest) {
            Ok(mac) => mac,
            Err(_) => return false,
        };
        mac.update(&previous);
        mac.update(&counter.to_le_bytes());
        previous = mac.finalize().into_bytes().to_vec();

        let take = previous.len().min(out.len() - written);
        out[written..written + take].copy_from_slice(&previous[..take]);
        written += take;
        counter = counter.wrapping_add(1);
    }
    true
}
