// Signer suite. Catches:

// * any drift in the Argus / Gorgon / Ladon arithmetic (golden vectors)
// * seed-hash variant regressions
// * randomness consumption order changes

#[cfg(test)]
mod tests {

use base64::{engine::general_purpose::STANDARD, Engine as _};
use proptest::prelude::*;
use reqsign_core::headers::request_digests;
use reqsign_core::random::{RngSource, ScriptedRandom};
use reqsign_core::signers::*;
use reqsign_core::types::SignError;

const QUERY_1: &str = "req_id=1d123522-3e4e-4e7d-9e4f-3e2b190e4e96&device_platform=android&os=android&ssmix=a&_rticket=1767424033997&cdid=42857e2a-b162-49ab-a3f0-3f709f3873f4&channel=googleplay&aid=1233&app_name=musical_ly&version_code=400603&version_name=40.6.3&manifest_version_code=2024006030&update_version_code=2024006030&ab_version=40.6.3&resolution=1080*2029&dpi=440&device_type=MI%208&device_brand=Xiaomi&language=zh-Hant&os_api=29&os_version=10&ac=wifi&is_pad=0&app_type=normal&sys_region=TW&last_install_time=1767424023&timezone_name=Asia%2FYerevan&app_language=zh-Hant&timezone_offset=14400&host_abi=arm64-v8a&locale=zh-Hant-TW&ac2=unknown&uoo=1&op_region=TW&build_number=40.6.3&region=TW&ts=1767424033&openudid=b0049f7a25806c51&okhttp_version=4.2.228.18-tiktok&use_store_region_cookie=1";
const QUERY_2: &str = "os=android&aid=1233&ts=1767424033";
const TS: i64 = 1767424033;
const SDK: &str = "0000000020020205";

const PB_1: &str = "08d2a4808204100218988a8ea50d2204313233332a0130320a323134323834303535313a0634302e362e3342147630352e30322e30322d6f762d616e64726f696448c08890505208000000000000000060c280c6950d6a0688ecb10217e87206bf102c0b12757a0e080210042804300638c280c6950d8801c280c6950d9a01208d45ac03abd287ea96c2effd72990c6c764ce5773bca05db06699a361a6c7564a2010130a801e205ba011d0a044d49203810161a0d73616d73756e675f73746f72652080a085c401c8010ad801c280c6950de001ee07e80190c01ff00106f801d5f1a7f708880204";
const ARGUS_1: &str = "AQK9QzM6AvRkS1hbMd9PvCfkj4ERBNbgJcRGrVQYn/CHhg7oao9ixxHq9N536IXdE5L/rAn6yHj5bJEuI1wbZy/NlNCkkZoGambMgRu5AWB4LfNdEaxQm9fLgaFntiBB7nEi4BD6CFFbmqo5rHtGf1w4tp5JW9ySWAPQxxxVCcvtBHv4FX/0Sb2dl83z6Pff+AWG3HX2efWjTCLmIyiJVUXVH4rcB+8vACcYXk+r/41EVxttlICLcBKeQL2S7qcuHkLwu61Qpe9LiYglin5ukjDwfwIbEGOLdE8Z0OdGoEZTEYnUh7UAFy3S0jGHPTJoIRgWNeXzco+vYz1K8TDIgQ19vUtaIROEHF95XBw8+zFI/g==";
const LADON: &str = "3q2+73k/gXmDR0McsWZx2JFO0tmMzX3FfE14XCPWxI3g9Sk2";

fn argus_rng() -> ScriptedRandom {
    ScriptedRandom::new()
        .with_bytes([0x01, 0x02, 0x03, 0x04])
        .with_bytes([0xa1, 0xb2, 0xc3, 0xd4])
        .with_value(0x7b0c622222)
}

// ## 1️⃣ Argus

    #[test]
    fn argus_golden_vector() {
        let d = request_digests(QUERY_1, "799968CE27B184778C807AF28435A589").unwrap();
        let pb = hex::decode(PB_1).unwrap();
        let mut rng = argus_rng();
        assert_eq!(argus_sign(&pb, &d.query_hash, &mut rng).unwrap(), ARGUS_1);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn argus_output_starts_with_key_seed_prefix() {
        let raw = STANDARD.decode(ARGUS_1).unwrap();
        assert_eq!(&raw[..2], &[0x01, 0x02]);
        assert_eq!((raw.len() - 2) % 16, 0);
    }

    #[test]
    fn argus_handles_empty_message() {
        let mut rng = RngSource::seeded(7);
        let out = argus_sign(&[], &[0; 6], &mut rng).unwrap();
        assert_eq!((STANDARD.decode(out).unwrap().len() - 2) % 16, 0);
    }

// ## 2️⃣ Gorgon

    #[test]
    fn gorgon_golden_vectors() {
        assert_eq!(
            gorgon_sign(TS, QUERY_1, "88BE78B13F24BAF95A6307A57087B8B6", SDK).unwrap(),
            "840480a800008f76925857aa0f1f3005a642e740a532d86abb4a"
        );
        assert_eq!(
            gorgon_sign(TS, QUERY_2, "94263E4D553BCEC128704E354B659526", SDK).unwrap(),
            "840480a80000686b20a7cd5916ec3005a642e740a532d86abbad"
        );
    }

    #[test]
    fn gorgon_accepts_lowercase_and_empty_stub() {
        let upper = gorgon_sign(TS, QUERY_2, "94263E4D553BCEC128704E354B659526", SDK).unwrap();
        let lower = gorgon_sign(TS, QUERY_2, "94263e4d553bcec128704e354b659526", SDK).unwrap();
        assert_eq!(upper, lower);
        assert_eq!(gorgon_sign(TS, QUERY_2, "", SDK).unwrap().len(), 52);
    }

    #[test]
    fn gorgon_rejects_bad_input() {
        assert!(matches!(gorgon_sign(-1, QUERY_2, "", SDK), Err(SignError::InvalidTimestamp(-1))));
        assert!(matches!(gorgon_sign(TS, QUERY_2, "zz00zz00", SDK), Err(SignError::InvalidHexInput(_))));
        assert!(matches!(gorgon_sign(TS, QUERY_2, "abc", SDK), Err(SignError::InvalidHexInput(_))));
    }

// ## 3️⃣ Ladon

    #[test]
    fn ladon_golden_vector() {
        let mut rng = ScriptedRandom::new().with_bytes([0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(ladon_sign(TS, b"1233", &mut rng).unwrap(), LADON);
    }

    #[test]
    fn ladon_rejects_oversized_timestamp() {
        let mut rng = ScriptedRandom::new();
        assert!(matches!(ladon_sign(i64::MAX, b"1233", &mut rng), Err(SignError::InvalidTimestamp(_))));
    }

// ## 4️⃣ Seed hash

    #[test]
    fn seed_hash_variants() {
        let stub = "5d41402abc4b2a76b9719d911017c592";
        let rand26 = [0x6A, 0x51, 0xC2, 0x8C];
        let expected = [
            (1, "6c52877d6cc3d2ee93dd6eb2"),
            (2, "0a6196930a78c3aaf599086f"),
            (3, "3608dd27369988b4c98734e8"),
            (4, "0a9160030a18cacaf560f7f0"),
            (5, "c9fec45224e94bde66abedcc"),
            (6, "a23adeefa790ae1abb2d6ba0"),
            (7, "b6be5ba020c3819e4b458dac"),
            (8, "e040b2c7643d3feb440a7b00"),
        ];
        for (kind, hex_out) in expected {
            let out = seed_hash(kind, QUERY_2, stub, rand26).unwrap();
            assert_eq!(hex::encode(out), hex_out, "encode type {}", kind);
        }
    }

    #[test]
    fn seed_hash_empty_stub_and_unknown_type() {
        let rand26 = [0x6A, 0x51, 0xC2, 0x8C];
        assert_eq!(hex::encode(seed_hash(1, QUERY_2, "", rand26).unwrap()), "6c52877d5c4225c693dd6eb2");
        assert!(seed_hash(0, QUERY_2, "", rand26).unwrap().is_empty());
        assert!(seed_hash(9, QUERY_2, "", rand26).unwrap().is_empty());
    }

// ## 5️⃣ Properties

    proptest! {
        #[test]
        fn prop_gorgon_deterministic_and_fixed_width(ts in 0i64..=u32::MAX as i64, q in "[a-z0-9=&]{0,64}") {
            let a = gorgon_sign(ts, &q, "", SDK).unwrap();
            let b = gorgon_sign(ts, &q, "", SDK).unwrap();
            prop_assert_eq!(&a, &b);
            prop_assert!(a.starts_with("840480a80000"));
        }

        #[test]
        fn prop_ladon_deterministic_for_fixed_salt(ts in 0i64..=u32::MAX as i64, salt in any::<[u8; 4]>()) {
            let mut r1 = ScriptedRandom::new().with_bytes(salt);
            let mut r2 = ScriptedRandom::new().with_bytes(salt);
            let a = ladon_sign(ts, b"1233", &mut r1).unwrap();
            prop_assert_eq!(&a, &ladon_sign(ts, b"1233", &mut r2).unwrap());
            let raw = STANDARD.decode(&a).unwrap();
            prop_assert_eq!(raw.len(), 36);
            prop_assert_eq!(&raw[..4], &salt[..]);
        }

        #[test]
        fn prop_argus_deterministic_for_scripted_rng(msg in proptest::collection::vec(any::<u8>(), 0..256)) {
            let a = argus_sign(&msg, &[7; 6], &mut argus_rng()).unwrap();
            let b = argus_sign(&msg, &[7; 6], &mut argus_rng()).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
