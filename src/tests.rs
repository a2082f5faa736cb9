//! Properties shared by the slice and streaming codecs.

use crate::{
    decode_to_vec, encode_to_vec, max_encoded_len, setup, Decoder, Encoder, DELIMITER, MAX_RUN,
};
use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use std::io::Write;

/// Non-empty payload with a varying density of zeros.
#[derive(Clone, Debug)]
struct Payload(Vec<u8>);

impl Arbitrary for Payload {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = 1 + usize::arbitrary(g) % (4 * MAX_RUN);
        // 0 means no zeros at all
        let zero_one_in = *g.choose(&[0usize, 2, 16, MAX_RUN, MAX_RUN + 1]).unwrap();
        let bytes = (0..len)
            .map(|_| {
                if zero_one_in != 0 && usize::arbitrary(g) % zero_one_in == 0 {
                    0
                } else {
                    u8::arbitrary(g).max(1)
                }
            })
            .collect();
        Payload(bytes)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(
            self.0
                .shrink()
                .filter(|bytes| !bytes.is_empty())
                .map(Payload),
        )
    }
}

fn check_round_trip(raw: &[u8]) {
    let enc = encode_to_vec(raw).unwrap();
    assert!(!enc.contains(&DELIMITER), "zero in {enc:02x?}");
    assert!(enc.len() > raw.len());
    assert!(enc.len() <= max_encoded_len(raw.len()));
    assert_eq!(decode_to_vec(&enc).unwrap(), raw);
}

#[test]
fn round_trip_quickcheck() {
    setup();
    #[allow(clippy::needless_pass_by_value)]
    fn prop(payload: Payload) -> bool {
        let raw = payload.0;
        let Ok(enc) = encode_to_vec(&raw) else {
            return false;
        };
        !enc.contains(&DELIMITER)
            && enc.len() > raw.len()
            && enc.len() <= max_encoded_len(raw.len())
            && decode_to_vec(&enc).as_deref() == Ok(&raw[..])
    }
    QuickCheck::new()
        .tests(1000)
        .quickcheck(prop as fn(Payload) -> bool);
}

#[test]
fn stream_matches_slice_quickcheck() {
    setup();
    #[allow(clippy::needless_pass_by_value)]
    fn prop(payload: Payload, splits: Vec<usize>) -> TestResult {
        let raw = payload.0;
        let expected = encode_to_vec(&raw).unwrap();

        let mut encoder = Encoder::new(Vec::<u8>::new());
        let mut decoder = Decoder::new(Vec::<u8>::new());
        let mut rest = &raw[..];
        let mut enc_rest = &expected[..];
        for s in splits {
            if !rest.is_empty() {
                let (chunk, tail) = rest.split_at(1 + s % rest.len());
                encoder.write_all(chunk).unwrap();
                rest = tail;
            }
            if !enc_rest.is_empty() {
                let (chunk, tail) = enc_rest.split_at(1 + s % enc_rest.len());
                decoder.write_all(chunk).unwrap();
                enc_rest = tail;
            }
        }
        encoder.write_all(rest).unwrap();
        decoder.write_all(enc_rest).unwrap();

        let streamed = encoder.finalize().unwrap();
        let decoded = decoder.finalize().unwrap();
        TestResult::from_bool(streamed == expected && decoded == raw)
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Payload, Vec<usize>) -> TestResult);
}

#[test]
fn corrupted_zero_rejected_quickcheck() {
    setup();
    #[allow(clippy::needless_pass_by_value)]
    fn prop(payload: Payload, at: usize) -> bool {
        let mut enc = encode_to_vec(&payload.0).unwrap();
        let at = at % enc.len();
        enc[at] = DELIMITER;
        decode_to_vec(&enc).map_or_else(|err| err.is_malformed(), |_| false)
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Payload, usize) -> bool);
}

#[test]
fn run_length_sweep() {
    setup();
    for n in 1..=3 * MAX_RUN + 2 {
        let run: Vec<u8> = (0..n).map(|i| (i % 255) as u8 + 1).collect();
        check_round_trip(&run);

        let mut tail_zero = run.clone();
        tail_zero.push(0);
        check_round_trip(&tail_zero);

        let mut head_zero = vec![0];
        head_zero.extend(&run);
        check_round_trip(&head_zero);
    }
}

#[test]
fn full_block_boundary() {
    setup();
    for blocks in 1..=3 {
        let raw = vec![0x5A; blocks * MAX_RUN];
        let enc = encode_to_vec(&raw).unwrap();
        // no empty block after the last full one
        assert_eq!(enc.len(), raw.len() + blocks);
        assert!(enc.chunks(MAX_RUN + 1).all(|block| block[0] == 0xFF));
        assert_eq!(decode_to_vec(&enc).unwrap(), raw);
    }
}

#[test]
fn large_payload() {
    setup();
    let mut state = 0x2545_f491u32;
    let raw: Vec<u8> = (0..u16::MAX)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    check_round_trip(&raw);
}
