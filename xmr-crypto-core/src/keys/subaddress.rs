//! Subaddress key derivation
//!
//! ```text
//! m = Hs("SubAddr\0" || a || le32(major) || le32(minor))
//! D = B + m*G          (subaddress spend public key)
//! C = a*D              (subaddress view public key)
//! d = b + m            (subaddress spend secret key)
//! ```
//! Index `(0, 0)` is the main address and is returned unchanged.

use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::Scalar;

use crate::hash::hash_parts_to_scalar;
use crate::keys::derive::{public_point, secret_scalar};
use crate::point::encode_point;
use crate::types::errors::CryptoResult;
use crate::types::keys::{PublicKey, SecretKey};

const SUBADDRESS_DOMAIN: &[u8] = b"SubAddr\0";

/// Account and address index of a subaddress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SubaddressIndex {
    /// Account index
    pub major: u32,
    /// Address index within the account
    pub minor: u32,
}

impl SubaddressIndex {
    /// Create an index
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// True for the main address `(0, 0)`
    #[must_use]
    pub const fn is_main(&self) -> bool {
        self.major == 0 && self.minor == 0
    }
}

/// Public keys of a subaddress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubaddressKeys {
    /// Spend public key D
    pub spend_public: PublicKey,
    /// View public key C
    pub view_public: PublicKey,
}

/// The subaddress secret `m`.
///
/// # Errors
/// `InvalidSecretKey` if `view_secret` is not canonical.
pub fn subaddress_secret(view_secret: &SecretKey, index: SubaddressIndex) -> CryptoResult<Scalar> {
    secret_scalar(view_secret)?;
    Ok(hash_parts_to_scalar(&[
        SUBADDRESS_DOMAIN,
        view_secret.as_bytes(),
        &index.major.to_le_bytes(),
        &index.minor.to_le_bytes(),
    ]))
}

/// Spend and view public keys for `index`.
///
/// # Errors
/// `InvalidSecretKey` for a non-canonical view key, `InvalidPublicKey` if
/// `spend_public` fails `key_check`.
pub fn subaddress_keys(
    view_secret: &SecretKey,
    spend_public: &PublicKey,
    index: SubaddressIndex,
) -> CryptoResult<SubaddressKeys> {
    let a = secret_scalar(view_secret)?;
    let b_point = public_point(spend_public)?;

    if index.is_main() {
        return Ok(SubaddressKeys {
            spend_public: *spend_public,
            view_public: PublicKey(encode_point(&(ED25519_BASEPOINT_TABLE * &a))),
        });
    }

    let m = subaddress_secret(view_secret, index)?;
    let d = b_point + ED25519_BASEPOINT_TABLE * &m;
    Ok(SubaddressKeys {
        spend_public: PublicKey(encode_point(&d)),
        view_public: PublicKey(encode_point(&(a * d))),
    })
}

/// Spend secret key for `index`, `b + m`.
///
/// # Errors
/// `InvalidSecretKey` if either secret key is not canonical.
pub fn subaddress_spend_secret(
    view_secret: &SecretKey,
    spend_secret: &SecretKey,
    index: SubaddressIndex,
) -> CryptoResult<SecretKey> {
    let b = secret_scalar(spend_secret)?;
    if index.is_main() {
        secret_scalar(view_secret)?;
        return Ok(spend_secret.clone());
    }
    let m = subaddress_secret(view_secret, index)?;
    Ok(SecretKey((b + m).to_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::derive::{derive_view_key, generate_keys_from_seed, secret_to_public};

    const SPEND_SECRET: &str = "132d0ca6e9a1f3ae316c12682d132ffa0f1112131415161718191a1b1c1d1e0f";
    const SPEND_PUBLIC: &str = "ca4a448c3fc4d04945da9fdf920976c05e9bbe3d8cebb1858ea44d587c5e63c3";
    const VIEW_SECRET: &str = "73111dc718bf267d0cdf37e4096a051cecb7dac1f487af47d59ecd7b2ae1e00a";
    const VIEW_PUBLIC: &str = "88c1ef1bf8b7575ea2a8ccbc0bbde2d1b5e00da2980097a8b1a51e6d09f707ae";

    fn keys(major: u32, minor: u32) -> SubaddressKeys {
        subaddress_keys(
            &SecretKey::from_hex(VIEW_SECRET).unwrap(),
            &PublicKey::from_hex(SPEND_PUBLIC).unwrap(),
            SubaddressIndex::new(major, minor),
        )
        .unwrap()
    }

    #[test]
    fn test_main_address_passthrough() {
        let main = keys(0, 0);
        assert_eq!(main.spend_public.to_hex(), SPEND_PUBLIC);
        assert_eq!(main.view_public.to_hex(), VIEW_PUBLIC);
    }

    #[test]
    fn test_subaddress_vectors() {
        let sub = keys(0, 1);
        assert_eq!(
            sub.spend_public.to_hex(),
            "b4c4701686dfd7cac7450f31333730de09ca61179fdecf244dc3793f8c7cc86e"
        );
        assert_eq!(
            sub.view_public.to_hex(),
            "15061ca226c8d7656c6fff68ab7444c803c2ec00aefde1b929fb097df026b3cd"
        );

        let sub = keys(2, 7);
        assert_eq!(
            sub.spend_public.to_hex(),
            "f5893619fa5c6fc5fd7aa18a3d0b89c69eee5a1f23cd6b4219c863197c114e8b"
        );
        assert_eq!(
            sub.view_public.to_hex(),
            "c9a60e349ab5c6e1abdaf2c8f40589a2c438a295005cd5e403102d4d1b760a8e"
        );
    }

    #[test]
    fn test_subaddress_secret_vector() {
        let m = subaddress_secret(
            &SecretKey::from_hex(VIEW_SECRET).unwrap(),
            SubaddressIndex::new(1, 0),
        )
        .unwrap();
        assert_eq!(
            hex::encode(m.to_bytes()),
            "1a3b985a6f1780f0a148c802a14973b2536828bd42aa5339579d5bdba707cb04"
        );
    }

    #[test]
    fn test_spend_secret_matches_public() {
        let view = SecretKey::from_hex(VIEW_SECRET).unwrap();
        let spend = SecretKey::from_hex(SPEND_SECRET).unwrap();
        let index = SubaddressIndex::new(1, 0);
        let d = subaddress_spend_secret(&view, &spend, index).unwrap();
        assert_eq!(
            d.to_hex(),
            "4094aea33e566147fd17e3c7ef62c39763793ad056bf69506fb675f6c324e903"
        );
        assert_eq!(secret_to_public(&d).unwrap(), keys(1, 0).spend_public);

        let main = subaddress_spend_secret(&view, &spend, SubaddressIndex::default()).unwrap();
        assert_eq!(main, spend);
    }

    #[test]
    fn test_wallet_from_seed_vectors() {
        let seed = [0xffu8; 32];
        let spend = generate_keys_from_seed(&seed);
        assert_eq!(
            spend.secret.to_hex(),
            "1c95988d7431ecd670cf7d73f45befc6feffffffffffffffffffffffffffff0f"
        );
        assert_eq!(
            spend.public.to_hex(),
            "db27fe4b7a4beb8c1b8c38a21e943a852304c9bb3035a5f36626b51162a68f9c"
        );
        let view = derive_view_key(&spend.secret);
        assert_eq!(
            view.secret.to_hex(),
            "9fe83aa6104612b587eb2e6ee1f0c929f85ce047804a789f4d579f9d2e20de0b"
        );
        assert_eq!(
            view.public.to_hex(),
            "beb87b123ca0be6228ef692cecc4ba5170cc55f3987f08006dc638743776ebb3"
        );
    }

    #[test]
    fn test_seeded_wallet_subaddress_1_1() {
        let mut seed = [0u8; 32];
        hex::decode_to_slice(
            "8d8c8eeca38ac3b46aa293fd519b3860e96b5f873c12a95e3e1cdeda0bac4903",
            &mut seed,
        )
        .unwrap();
        let spend = generate_keys_from_seed(&seed);
        let view = derive_view_key(&spend.secret);
        let index = SubaddressIndex::new(1, 1);

        let m = subaddress_secret(&view.secret, index).unwrap();
        assert_eq!(
            hex::encode(m.to_bytes()),
            "81dea0953b33dcaed5097a7c2b94cf5e94a5d8fa9796631331ed656da187ea01"
        );

        let d = subaddress_spend_secret(&view.secret, &spend.secret, index).unwrap();
        assert_eq!(
            d.to_hex(),
            "0e6b2f82dfbd9f6340ac0d7a7d2f08bf7d113882d4a80c726f094448ad333405"
        );

        let sub = subaddress_keys(&view.secret, &spend.public, index).unwrap();
        assert_eq!(
            sub.spend_public.to_hex(),
            "4a3e863f2a7a43f7fbaa0320e06982009f2986dd04173eaee32aa8473317f19d"
        );
        assert_eq!(
            sub.view_public.to_hex(),
            "d247f90799916273407c1c71230d5ae0a9c71b8a7492da035e5e8ad972eea18b"
        );
        assert_eq!(secret_to_public(&d).unwrap(), sub.spend_public);
    }
}
