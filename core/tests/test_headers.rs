// Header orchestrator suite. Catches:

// * end-to-end drift in any of the five header values
// * randomness consumption order changes between signers
// * profile default / override regressions

#[cfg(test)]
mod tests {

use proptest::prelude::*;
use reqsign_core::config::AppProfile;
use reqsign_core::headers::*;
use reqsign_core::random::{RngSource, ScriptedRandom};
use reqsign_core::signers::argus_sign;
use reqsign_core::types::SignError;

const QUERY_1: &str = "req_id=1d123522-3e4e-4e7d-9e4f-3e2b190e4e96&device_platform=android&os=android&ssmix=a&_rticket=1767424033997&cdid=42857e2a-b162-49ab-a3f0-3f709f3873f4&channel=googleplay&aid=1233&app_name=musical_ly&version_code=400603&version_name=40.6.3&manifest_version_code=2024006030&update_version_code=2024006030&ab_version=40.6.3&resolution=1080*2029&dpi=440&device_type=MI%208&device_brand=Xiaomi&language=zh-Hant&os_api=29&os_version=10&ac=wifi&is_pad=0&app_type=normal&sys_region=TW&last_install_time=1767424023&timezone_name=Asia%2FYerevan&app_language=zh-Hant&timezone_offset=14400&host_abi=arm64-v8a&locale=zh-Hant-TW&ac2=unknown&uoo=1&op_region=TW&build_number=40.6.3&region=TW&ts=1767424033&openudid=b0049f7a25806c51&okhttp_version=4.2.228.18-tiktok&use_store_region_cookie=1";
const QUERY_2: &str = "os=android&aid=1233&ts=1767424033";
const TS: i64 = 1767424033;

const PB_2: &str = "08d2a4808204100218988a8ea50d2204313233332a1337353833313739343333303133303532393833320a323134323834303535313a0634322e342e3342147630352e30322e30322d6f762d616e64726f696448c08890505208000000000000000060c280c6950d6a062e485d87bfe5720663b335b7d6207a10086a10042804300638b680c6950d4006820106746f6b656e588801c280c6950d9a01207755019ebf1d05ee9fc5b76f3b80758becb4b287d4f71928613df254e8d1cd29a2010130a801e205ba01200a07506978656c203610161a0d73616d73756e675f73746f72652080a085c401c201057365656459c8010ad201100806120c3608dd2720fe3c28c98734e8d2010708e00f12020102d801c280c6950de001ee07e80190c01ff00106f801d5a1a6b70e880204";

fn scripted(alloc: u64) -> ScriptedRandom {
    ScriptedRandom::new()
        .with_bytes([0x01, 0x02, 0x03, 0x04])
        .with_bytes([0xa1, 0xb2, 0xc3, 0xd4])
        .with_bytes([0xde, 0xad, 0xbe, 0xef])
        .with_value(alloc)
}

fn scenario_1() -> HeaderParams {
    HeaderParams {
        device_id: "0".into(),
        create_time: TS,
        sign_count: 1,
        app_launch_time: TS,
        phone_info: "MI 8".into(),
        query_string: QUERY_1.into(),
        post_data_hex: "799968CE27B184778C807AF28435A589".into(),
        profile: AppProfile { app_version: "40.6.3".into(), ..AppProfile::default() },
        ..HeaderParams::default()
    }
}

fn scenario_2() -> HeaderParams {
    HeaderParams {
        device_id: "7583179433013052983".into(),
        create_time: TS,
        sign_count: 53,
        app_launch_time: 1767424027,
        sec_device_token: "tokenX".into(),
        phone_info: "Pixel 6".into(),
        seed: "seedY".into(),
        seed_encode_type: 3,
        query_string: QUERY_2.into(),
        post_data_hex: "0a0b0c".into(),
        seed_algorithm_data: vec![0x01, 0x02],
        ..HeaderParams::default()
    }
}

// ## 1️⃣ Golden vectors

    #[test]
    fn scenario_without_seed() {
        let mut rng = scripted(0x7b0c622222);
        let h = build_headers_with(&scenario_1(), &mut rng).unwrap();
        assert_eq!(h.x_ss_stub, "88BE78B13F24BAF95A6307A57087B8B6");
        assert_eq!(h.x_khronos, "1767424033");
        assert_eq!(h.x_gorgon, "840480a800008f76925857aa0f1f3005a642e740a532d86abb4a");
        assert_eq!(h.x_ladon, "3q2+73k/gXmDR0McsWZx2JFO0tmMzX3FfE14XCPWxI3g9Sk2");
        assert_eq!(
            h.x_argus,
            "AQK9QzM6AvRkS1hbMd9PvCfkj4ERBNbgJcRGrVQYn/CHhg7oao9ixxHq9N536IXdE5L/rAn6yHj5bJEuI1wbZy/NlNCkkZoGambMgRu5AWB4LfNdEaxQm9fLgaFntiBB7nEi4BD6CFFbmqo5rHtGf1w4tp5JW9ySWAPQxxxVCcvtBHv4FX/0Sb2dl83z6Pff+AWG3HX2efWjTCLmIyiJVUXVH4rcB+8vACcYXk+r/41EVxttlICLcBKeQL2S7qcuHkLwu61Qpe9LiYglin5ukjDwfwIbEGOLdE8Z0OdGoEZTEYnUh7UAFy3S0jGHPTJoIRgWNeXzco+vYz1K8TDIgQ19vUtaIROEHF95XBw8+zFI/g=="
        );
        assert!(rng.is_exhausted());
    }

    #[test]
    fn scenario_with_seed() {
        let h = build_headers_with(&scenario_2(), &mut scripted(0x7b0c611111)).unwrap();
        assert_eq!(h.x_ss_stub, "94263E4D553BCEC128704E354B659526");
        assert_eq!(h.x_gorgon, "840480a80000686b20a7cd5916ec3005a642e740a532d86abbad");
        assert_eq!(h.x_ladon, "3q2+73k/gXmDR0McsWZx2JFO0tmMzX3FfE14XCPWxI3g9Sk2");

        let d = request_digests(QUERY_2, "0a0b0c").unwrap();
        let mut argus_rng = ScriptedRandom::new()
            .with_bytes([0x01, 0x02, 0x03, 0x04])
            .with_bytes([0xa1, 0xb2, 0xc3, 0xd4])
            .with_value(0x7b0c611111);
        let expected = argus_sign(&hex::decode(PB_2).unwrap(), &d.query_hash, &mut argus_rng).unwrap();
        assert_eq!(h.x_argus, expected);
    }

// ## 2️⃣ Inputs and defaults

    #[test]
    fn empty_body_uses_zero_stub() {
        let params = HeaderParams { query_string: QUERY_2.into(), create_time: TS, ..HeaderParams::default() };
        let h = build_headers_with(&params, &mut RngSource::seeded(1)).unwrap();
        assert_eq!(h.x_ss_stub, "0".repeat(32));
        let d = request_digests(QUERY_2, "").unwrap();
        assert_eq!(d.stub, "0".repeat(32));
    }

    #[test]
    fn counters_do_not_reach_the_wire() {
        let mut a = scenario_1();
        a.report_count = 9;
        a.setting_count = 17;
        let x = build_headers_with(&a, &mut scripted(0x7b0c622222)).unwrap();
        let y = build_headers_with(&scenario_1(), &mut scripted(0x7b0c622222)).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn zero_profile_values_fall_back_to_defaults() {
        let mut zeroed = scenario_2();
        zeroed.profile = AppProfile {
            app_version: String::new(),
            sdk_version_str: String::new(),
            sdk_version: 0,
            call_type: 0,
            app_version_constant: 0,
            ms_app_id: String::new(),
            license_id: String::new(),
            gorgon_sdk_version: String::new(),
            channel: String::new(),
            rand26: 0,
        };
        let x = build_headers_with(&zeroed, &mut scripted(0x7b0c611111)).unwrap();
        let y = build_headers_with(&scenario_2(), &mut scripted(0x7b0c611111)).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn profile_loads_from_partial_json() {
        let p = AppProfile::from_json(r#"{"app_version":"40.6.3","call_type":0}"#).unwrap();
        assert_eq!(p.app_version, "40.6.3");
        assert_eq!(p.call_type, 738);
        assert_eq!(p.sdk_version, 0x0502_0220);
    }

    #[test]
    fn bad_inputs_are_rejected() {
        let mut p = scenario_1();
        p.post_data_hex = "not hex".into();
        assert!(matches!(build_headers(&p), Err(SignError::InvalidHexInput(_))));
        let mut p = scenario_1();
        p.create_time = -5;
        assert!(matches!(build_headers(&p), Err(SignError::InvalidTimestamp(-5))));
    }

    #[test]
    fn header_set_serializes_with_wire_names() {
        let h = build_headers_with(&scenario_1(), &mut scripted(0x7b0c622222)).unwrap();
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json["x-khronos"], "1767424033");
        assert_eq!(json["x-ss-stub"], "88BE78B13F24BAF95A6307A57087B8B6");
        let names: Vec<&str> = h.to_pairs().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["x-ss-stub", "x-khronos", "x-argus", "x-gorgon", "x-ladon"]);
    }

// ## 3️⃣ Trace id

    #[test]
    fn trace_id_layout() {
        let mut rng = ScriptedRandom::new().with_value(5);
        assert_eq!(
            make_trace_id("7583179433013052983", TS, &mut rng),
            "00-000000006958c0210000000000000005-0000000000000000-01"
        );
        let mut rng = ScriptedRandom::new().with_value(7).with_value(5);
        assert_eq!(
            make_trace_id("", TS, &mut rng),
            "00-00000000000000070000000000000005-0000000000000000-01"
        );
        assert_eq!(make_trace_id_now("1").len(), 55);
    }

// ## 4️⃣ Properties

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_headers_deterministic_for_scripted_rng(
            sign_count in any::<u32>(),
            seed_type in 0u32..=8,
            body in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let mut params = scenario_2();
            params.sign_count = sign_count;
            params.seed_encode_type = seed_type;
            params.post_data_hex = hex::encode(&body);
            let a = build_headers_with(&params, &mut scripted(0x7b0c633333)).unwrap();
            let b = build_headers_with(&params, &mut scripted(0x7b0c633333)).unwrap();
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.x_ss_stub.len(), 32);
            prop_assert_eq!(a.x_gorgon.len(), 52);
        }
    }
}
