//! Integration tests: transaction IDs, extra parsing and output scanning.
//!
//! Run: `cargo test --test tx_codec`

mod common;

use common::bytes32;
use rand_core::OsRng;
use xmr_crypto_core::prelude::*;

// =====================================================================
// Transaction IDs
// =====================================================================

/// Mainnet genesis block miner transaction (version 1)
const GENESIS_TX: &str = "013c01ff0001ffffffffffff03029b2e4c0281c0b02e7c53291a94d1d0cbff8883f8024f5142ee494ffbbd08807121017767aafcde9be00dcfd098715ebcf7f410daebc582fda69d24a28e9d0bc890d1";

/// Coinbase, RCT type `Null`
const COINBASE_TX: &str = "023c01ffe8070180e0a596bb11031111111111111111111111111111111111111111111111111111111111111111ab2101222222222222222222222222222222222222222222222222222222222222222200";

/// One input, two outputs, CLSAG with compact ECDH
const CLSAG_TX: &str = "0200010200030a0507333333333333333333333333333333333333333333333333333333333333333302000244444444444444444444444444444444444444444444444444444444444444440002555555555555555555555555555555555555555555555555555555555555555500058087a70e666666666666666666666666666666667777777777777777777777777777777777777777777777777777777777777777777777777777777777777777777777777777777777777777777777777777777788888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888888";

/// Two inputs, one output, `Simple` with pseudo-outs in the base
const SIMPLE_TX: &str = "020002020002010131313131313131313131313131313131313131313131313131313131313131310200020101323232323232323232323232323232323232323232323232323232323232323201000241414141414141414141414141414141414141414141414141414141414141410002d209515151515151515151515151515151515151515151515151515151515151515151515151515151515151515151515151515151515151515151515151515151516161616161616161616161616161616161616161616161616161616161616161616161616161616161616161616161616161616161616161616161616161616171717171717171717171717171717171717171717171717171717171717171718181818181818181818181818181818181818181818181818181818181818181818181818181818181818181818181818181";

#[test]
fn test_tx_ids() {
    let cases = [
        (
            COINBASE_TX,
            "bbb603d491878327a9ae73464e0f541dd60a993ace54061fab57627abf49cc69",
        ),
        (
            CLSAG_TX,
            "7541f8bfaa902ea104b98254c8e9c52f6591abbf1e160f6d62a0da949971e3d0",
        ),
        (
            SIMPLE_TX,
            "c2b610f062d088876b9aee034aedea54b4acd5f132f1a0577cc3266539d41d26",
        ),
    ];
    for (tx_hex, expected) in cases {
        assert_eq!(get_tx_id_from_hex(tx_hex).unwrap().to_hex(), expected);
    }
}

#[test]
fn test_mainnet_genesis_tx() {
    assert_eq!(
        get_tx_id_from_hex(GENESIS_TX).unwrap().to_hex(),
        "c88ce9783b4f11190d7b9c17a69c1c52200f9faaee8e98dd07e6811175177139"
    );

    let blob = hex::decode(GENESIS_TX).unwrap();
    let parsed = parse_transaction(&blob).unwrap();
    assert_eq!(parsed.version, 1);
    assert_eq!(parsed.unlock_time, 60);
    assert!(parsed.is_coinbase());
    assert_eq!(parsed.inputs, vec![TxInput::Gen { height: 0 }]);
    assert_eq!(parsed.outputs.len(), 1);
    assert_eq!(parsed.outputs[0].amount, 17_592_186_044_415);
    assert_eq!(
        parsed.outputs[0].key.to_hex(),
        "9b2e4c0281c0b02e7c53291a94d1d0cbff8883f8024f5142ee494ffbbd088071"
    );
    assert_eq!(parsed.outputs[0].view_tag, None);
    assert_eq!(parsed.rct_type(), None);
    assert_eq!(parsed.prefix.len(), blob.len());

    let extra = parse_tx_extra(parsed.extra);
    assert_eq!(
        extra.tx_pub_key.unwrap().to_hex(),
        "7767aafcde9be00dcfd098715ebcf7f410daebc582fda69d24a28e9d0bc890d1"
    );
}

#[test]
fn test_null_type_ignores_trailing_bytes() {
    let mut blob = hex::decode(COINBASE_TX).unwrap();
    let id = get_tx_id(&blob).unwrap();
    blob.extend_from_slice(&[0xee; 16]);
    assert_eq!(get_tx_id(&blob).unwrap(), id);
}

#[test]
fn test_prunable_change_changes_id() {
    let mut blob = hex::decode(CLSAG_TX).unwrap();
    let id = get_tx_id(&blob).unwrap();
    let last = blob.len() - 1;
    blob[last] ^= 0xff;
    assert_ne!(get_tx_id(&blob).unwrap(), id);
}

#[test]
fn test_simple_base_layout() {
    let blob = hex::decode(SIMPLE_TX).unwrap();
    let parsed = parse_transaction(&blob).unwrap();
    let rct = parsed.rct.as_ref().unwrap();
    assert_eq!(rct.rct_type, RctType::Simple);
    assert_eq!(rct.fee, 1234);
    assert_eq!(rct.pseudo_outs.len(), 2);
    assert_eq!(rct.ecdh_info[0].mask, [0x61; 32]);
    assert_eq!(rct.out_commitments[0], Commitment([0x71; 32]));
    assert_eq!(parsed.base.len(), 1 + 2 + 64 + 64 + 32);
    assert_eq!(parsed.prunable, &[0x81; 50][..]);
}

#[test]
fn test_every_truncation_fails() {
    let blob = hex::decode(CLSAG_TX).unwrap();
    let parsed = parse_transaction(&blob).unwrap();
    let base_end = parsed.prefix.len() + parsed.base.len();
    for len in 0..base_end {
        assert!(
            get_tx_id(&blob[..len]).is_err(),
            "truncation at {len} should fail"
        );
    }
}

// =====================================================================
// Extra
// =====================================================================

const TX_PUB_KEY: &str = "1ed062a285405553705bbc59d31883279a16e4503fc68dad6ff4b70495ba8ce6";

fn pubkey_entry() -> Vec<u8> {
    let mut entry = vec![1u8];
    entry.extend_from_slice(&bytes32(TX_PUB_KEY));
    entry
}

#[test]
fn test_extra_padding_only() {
    assert!(parse_tx_extra(&[]).is_empty());
    assert!(parse_tx_extra(&[0]).is_empty());
    assert!(parse_tx_extra(&[0, 0]).is_empty());
    assert!(parse_tx_extra(&[0; 255]).is_empty());
    assert!(parse_tx_extra(&[0; 256]).is_empty());
    assert!(parse_tx_extra(&[0, 42]).is_empty());
}

#[test]
fn test_extra_pubkey_only() {
    let parsed = parse_tx_extra(&pubkey_entry());
    assert_eq!(parsed.tx_pub_key.unwrap().to_hex(), TX_PUB_KEY);
    assert_eq!(parsed.encrypted_payment_id, None);
}

#[test]
fn test_extra_short_nonce_only() {
    assert!(parse_tx_extra(&[2, 1, 42]).is_empty());
}

#[test]
fn test_extra_pubkey_and_padding() {
    let mut extra = pubkey_entry();
    extra.extend_from_slice(&[0; 100]);
    assert_eq!(parse_tx_extra(&extra).tx_pub_key.unwrap().to_hex(), TX_PUB_KEY);
}

#[test]
fn test_extra_first_pubkey_wins() {
    let mut extra = pubkey_entry();
    extra.push(1);
    extra.extend_from_slice(&[0x99; 32]);
    assert_eq!(parse_tx_extra(&extra).tx_pub_key.unwrap().to_hex(), TX_PUB_KEY);
}

#[test]
fn test_extra_encrypted_payment_id_either_order() {
    let nonce = [2u8, 9, 1, 0, 0, 0, 0, 0, 0, 0, 0];

    let mut forward = pubkey_entry();
    forward.extend_from_slice(&nonce);
    let mut reverse = nonce.to_vec();
    reverse.extend_from_slice(&pubkey_entry());

    for extra in [forward, reverse] {
        let parsed = parse_tx_extra(&extra);
        assert_eq!(parsed.tx_pub_key.unwrap().to_hex(), TX_PUB_KEY);
        assert_eq!(parsed.encrypted_payment_id, Some([0u8; 8]));
    }
}

// =====================================================================
// Scanning
// =====================================================================

struct Wallet {
    spend: KeyPair,
    view: KeyPair,
}

/// Build a one-input CLSAG transaction paying `amount` to `wallet` at
/// output 1, with a decoy output 0. Returns the blob.
fn pay(wallet: &Wallet, amount: u64) -> Vec<u8> {
    let tx_key = generate_keys(&mut OsRng);
    let derivation = generate_key_derivation(&wallet.view.public, &tx_key.secret).unwrap();
    let decoy = generate_keys(&mut OsRng);

    let mut blob = vec![2, 0, 1, 0x02, 0, 1, 42];
    blob.extend_from_slice(&[0x33; 32]);

    blob.push(2);
    // output 0: someone else
    blob.extend_from_slice(&[0, 0x03]);
    blob.extend_from_slice(decoy.public.as_bytes());
    blob.push(0);
    // output 1: the wallet
    let output_key = derive_public_key(&derivation, 1, &wallet.spend.public).unwrap();
    blob.extend_from_slice(&[0, 0x03]);
    blob.extend_from_slice(output_key.as_bytes());
    blob.push(derive_view_tag(&derivation, 1));

    let mut extra = vec![1u8];
    extra.extend_from_slice(tx_key.public.as_bytes());
    write_varint(&mut blob, extra.len() as u64);
    blob.extend_from_slice(&extra);

    blob.push(RctType::Clsag as u8);
    write_varint(&mut blob, 30_720_000);

    let decoy_ecdh = [0xabu8; 8];
    let shared = derivation_to_scalar(&derivation, 1).to_bytes();
    let masked = ecdh_encode(
        &EcdhTuple::from_amount(amount, [0u8; 32]),
        &shared,
        RctType::Clsag,
    );
    blob.extend_from_slice(&decoy_ecdh);
    blob.extend_from_slice(&masked.amount[..8]);

    blob.extend_from_slice(zero_commit(1).as_bytes());
    blob.extend_from_slice(commit(amount, &gen_commitment_mask(&shared)).as_bytes());

    blob.extend_from_slice(&[0x55; 96]);
    blob
}

#[test]
fn test_scan_and_decode_owned_output() {
    let wallet = Wallet {
        spend: generate_keys(&mut OsRng),
        view: generate_keys(&mut OsRng),
    };
    let amount = 1_234_567_890_123;
    let blob = pay(&wallet, amount);

    let parsed = parse_transaction(&blob).unwrap();
    let extra = parse_tx_extra(parsed.extra);
    let tx_pub_key = extra.tx_pub_key.unwrap();
    let derivation = generate_key_derivation(&tx_pub_key, &wallet.view.secret).unwrap();
    let rct = parsed.rct.as_ref().unwrap();

    let mut found = Vec::new();
    for (index, output) in parsed.outputs.iter().enumerate() {
        let index = index as u64;
        if output.view_tag != Some(derive_view_tag(&derivation, index)) {
            continue;
        }
        let expected = derive_public_key(&derivation, index, &wallet.spend.public).unwrap();
        if expected != output.key {
            continue;
        }
        let decoded = decode_rct(
            &rct.ecdh_info[index as usize],
            &rct.out_commitments[index as usize],
            rct.rct_type,
            index,
            &derivation,
        )
        .unwrap();
        found.push((index, decoded));
    }

    assert_eq!(found.len(), 1);
    let (index, decoded) = &found[0];
    assert_eq!(*index, 1);
    assert_eq!(decoded.amount_u64(), Some(amount));
    assert_eq!(decoded.amount, amount.to_string());

    // The wallet can spend it: key image from the output secret
    let image =
        compute_output_key_image(&tx_pub_key, &wallet.view.secret, &wallet.spend.secret, 1)
            .unwrap();
    assert_eq!(image.output_key, parsed.outputs[1].key);

    // Decoding the decoy slot against our derivation fails the commitment
    assert_eq!(
        decode_rct(
            &rct.ecdh_info[0],
            &rct.out_commitments[0],
            rct.rct_type,
            0,
            &derivation
        ),
        Err(CryptoError::MismatchedCommitments)
    );
}

#[test]
fn test_fee_estimate_with_priority() {
    let params = FeeParams::new(6836, 10_000).with_priority(FeePriority::Normal);
    let fee = estimate_fee(&TxShape::new(1, 15, 2, 44), &params).unwrap();
    let weight = estimate_tx_weight(&TxShape::new(1, 15, 2, 44)).unwrap();
    assert_eq!(fee % 10_000, 0);
    assert!(fee >= 6836 * weight * 4);
    assert!(fee < 6836 * weight * 4 + 10_000);
}
