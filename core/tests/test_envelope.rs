// Envelope codec suite. Catches:

// * XTEA / round-count / key-derivation drift
// * trailer length algebra regressions
// * padding rules that break decode
// * failure to read envelopes produced by other clients

#[cfg(test)]
mod tests {

use proptest::prelude::*;
use reqsign_core::constants::envelope::XTEA_KEY;
use reqsign_core::envelope::*;
use reqsign_core::random::{RngSource, ScriptedRandom};

/// bytes 00..13, standard key, salt c0133eb5, produced by an independent zlib client.
const CT_STANDARD: &str = "668e34a1141256ae553172a7c4b06b3e523ecc55514c6f835edf2a6407e991478b53e07c84300c1c80fb861f3bb4838046218d29cf7cffdd1b29a9efc6e3ebad";
/// Same payload, report key, salt c0133eb2 (40 rounds).
const CT_REPORT: &str = "7759c608b1c4fb430a2e63ea81fcf4a498e987422ba23df0e1da9c867870e083f5054cae8c66499b8db3d79f7689d8e0b4c519d776237f61eb7952d58ac1e987";
/// "hello envelope" compressed at level 9 (78 da), salt c0133eb9.
const CT_RESPONSE: &str = "d39ddf66795c4ad6ea751c14debdea45909deb858b536b1eb4eb8ba855424b10fb9a9588cfeccaa04ccdb989d8907dfc";

fn payload_20() -> String {
    hex::encode((0u8..20).collect::<Vec<u8>>())
}

// ## 1️⃣ Building blocks

    #[test]
    fn report_key_derivation() {
        assert_eq!(hex::encode(report_key_prefix()), "49d7093925082333");
        let key = xtea_key(EnvelopeVariant::Report);
        assert_eq!(&key[8..], b"20100404");
        assert_eq!(xtea_key(EnvelopeVariant::Standard), XTEA_KEY);
    }

    #[test]
    fn rounds_follow_salt() {
        for salt in ["c0133eb0", "c0133eb5", "c0133ebf"] {
            let iv: [u8; 4] = hex::decode(salt).unwrap().try_into().unwrap();
            assert_eq!(rounds_from_iv(&iv), 64);
        }
        assert_eq!(rounds_from_iv(&[0xc0, 0x13, 0x3e, 0xb2]), 40);
        assert_eq!(rounds_from_iv(&[0xc0, 0x13, 0x3e, 0xb9]), 56);
    }

    #[test]
    fn xtea_block_vector() {
        let cipher = Xtea::new(&XTEA_KEY, 32);
        let mut block = hex::decode("0011223344556677").unwrap();
        cipher.encrypt_block(&mut block);
        assert_eq!(hex::encode(&block), "feb595bddcf5f534");
        cipher.decrypt_block(&mut block);
        assert_eq!(hex::encode(&block), "0011223344556677");
    }

    #[test]
    fn xtea_cbc_vector_and_padding() {
        let iv = hex::decode("c0133eb527042020").unwrap().try_into().unwrap();
        let data: Vec<u8> = (0u8..12).collect();
        let ct = xtea_cbc_encrypt(&iv, &XTEA_KEY, &data);
        assert_eq!(hex::encode(&ct), "a48192ea7999ed8e2464a3628c299e72d46ddc18a8632c5c");
        let pt = xtea_cbc_decrypt(&iv, &XTEA_KEY, &ct).unwrap();
        assert_eq!(&pt[..12], data.as_slice());
        assert!(pt[12..].iter().all(|b| *b == 0));
        assert!(xtea_cbc_decrypt(&iv, &XTEA_KEY, &ct[..7]).is_err());
    }

    #[test]
    fn trailer_vectors() {
        assert_eq!(hex::encode(make_two_part(&(1u8..=9).collect::<Vec<_>>())), "2378");
        assert_eq!(hex::encode(make_two_part(&(1u8..=12).collect::<Vec<_>>())), "f284d1");
        assert_eq!(hex::encode(make_two_part(&[0u8; 8])), "000000");
        assert_eq!(hex::encode(make_two_part(&(0u8..16).collect::<Vec<_>>())), "9b513d");
    }

    #[test]
    fn tag_byte_low_bits_are_set() {
        assert_eq!(tag_byte(&[0x00], 0), 0x07);
        assert_eq!(tag_byte(&[0xff], 0x14), ((((0xffu32 ^ 0x14) << 1) & 0xf8) | 7) as u8);
    }

// ## 2️⃣ Compression stage

    #[test]
    fn fixed_length_padding_rules() {
        let data = [0u8; 20];
        let natural = compress_payload(&data, 0).unwrap();
        assert_eq!(&natural[..2], &[0x78, 0x01]);

        // 170 hex digits is already 2 mod 8
        assert_eq!(compress_payload(&data, 170).unwrap().len(), 85);
        // 172 -> 178
        assert_eq!(compress_payload(&data, 172).unwrap().len(), 89);
        // 176 -> 186
        assert_eq!(compress_payload(&data, 176).unwrap().len(), 93);
    }

    #[test]
    fn fixed_length_below_natural_is_rejected() {
        let err = compress_payload(&[0u8; 20], 4).unwrap_err();
        assert!(matches!(err, EnvelopeError::PaddingTooSmall { requested: 4, .. }));
        assert!(matches!(compress_payload(&[0u8; 20], 171), Err(EnvelopeError::InvalidFixedLength(171))));
    }

    #[test]
    fn inflate_skips_false_magic() {
        let stream = compress_payload(b"abc", 0).unwrap();
        let mut data = vec![0x00, 0x78, 0x01, 0xff, 0xff];
        data.extend_from_slice(&stream);
        data.extend_from_slice(&[0u8; 7]);
        assert_eq!(locate_and_inflate(&data, PayloadKind::Request).unwrap(), b"abc");
    }

    #[test]
    fn inflate_reports_missing_or_broken_stream() {
        assert_eq!(
            locate_and_inflate(&[1, 2, 3, 4], PayloadKind::Response).unwrap_err(),
            EnvelopeError::ZlibHeaderNotFound { magic: [0x78, 0xda] }
        );
        assert!(matches!(
            locate_and_inflate(&[0x78, 0x01, 0xff, 0xff], PayloadKind::Request),
            Err(EnvelopeError::DecompressionFailure(_))
        ));
    }

// ## 3️⃣ Full codec

    #[test]
    fn decodes_foreign_envelopes() {
        assert_eq!(mssdk_decrypt(CT_STANDARD, EnvelopeVariant::Standard, true).unwrap(), payload_20());
        assert_eq!(mssdk_decrypt(CT_REPORT, EnvelopeVariant::Report, true).unwrap(), payload_20());
        assert_eq!(
            mssdk_decrypt(CT_RESPONSE, EnvelopeVariant::Standard, false).unwrap(),
            hex::encode("hello envelope")
        );
    }

    #[test]
    fn wrong_key_fails_to_decode() {
        assert!(mssdk_decrypt(CT_STANDARD, EnvelopeVariant::Report, true).is_err());
    }

    #[test]
    fn encode_is_deterministic_for_scripted_salt() {
        let mut a = ScriptedRandom::new().with_value(0xc0133eb5);
        let mut b = ScriptedRandom::new().with_value(0xc0133eb5);
        let x = mssdk_encrypt_with(&payload_20(), EnvelopeVariant::Standard, 0, &mut a).unwrap();
        let y = mssdk_encrypt_with(&payload_20(), EnvelopeVariant::Standard, 0, &mut b).unwrap();
        assert_eq!(x, y);
        assert_eq!(x.len() % 32, 0);
        assert_eq!(mssdk_decrypt(&x, EnvelopeVariant::Standard, true).unwrap(), payload_20());
    }

    #[test]
    fn fixed_length_envelope_round_trips() {
        let ct = mssdk_encrypt(&payload_20(), EnvelopeVariant::Report, 170).unwrap();
        assert_eq!(mssdk_decrypt(&ct, EnvelopeVariant::Report, true).unwrap(), payload_20());
    }

    #[test]
    fn encode_rejects_bad_input() {
        assert!(matches!(
            mssdk_encrypt("xyz", EnvelopeVariant::Standard, 0),
            Err(EnvelopeError::InvalidHexInput(_))
        ));
        assert!(matches!(
            mssdk_encrypt(&payload_20(), EnvelopeVariant::Standard, 8),
            Err(EnvelopeError::PaddingTooSmall { .. })
        ));
    }

    #[test]
    fn decode_rejects_bad_ciphertext() {
        assert!(matches!(
            mssdk_decrypt("nothex", EnvelopeVariant::Standard, true),
            Err(EnvelopeError::InvalidHexInput(_))
        ));
        assert!(matches!(
            mssdk_decrypt("00112233", EnvelopeVariant::Standard, true),
            Err(EnvelopeError::Cipher(_))
        ));
    }

// ## 4️⃣ Properties

    proptest! {
        #[test]
        fn prop_round_trip(
            payload in proptest::collection::vec(any::<u8>(), 0..512),
            report in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let variant = EnvelopeVariant::from_is_report(report);
            let mut rng = RngSource::seeded(seed);
            let ct = mssdk_encrypt_bytes_with(&payload, variant, 0, &mut rng).unwrap();
            prop_assert_eq!(mssdk_decrypt_bytes(&ct, variant, PayloadKind::Request).unwrap(), payload);
        }

        #[test]
        fn prop_trailer_length(data in proptest::collection::vec(any::<u8>(), 0..64)) {
            let t = make_two_part(&data);
            prop_assert_eq!(t.len(), trailer_len(data.len()));
            prop_assert!(t.len() <= 3);
        }

        #[test]
        fn prop_xtea_cbc_inverts(data in proptest::collection::vec(any::<u8>(), 0..96), salt in 0xc0133eb0u32..0xc0133ec0) {
            let mut iv = [0u8; 8];
            iv[..4].copy_from_slice(&salt.to_be_bytes());
            let ct = xtea_cbc_encrypt(&iv, &XTEA_KEY, &data);
            let pt = xtea_cbc_decrypt(&iv, &XTEA_KEY, &ct).unwrap();
            prop_assert_eq!(&pt[..data.len()], data.as_slice());
        }
    }
}
