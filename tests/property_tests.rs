// tests/property_tests.rs
mod common;

use common::NexFileBuilder;
use nex_rs::*;
use proptest::prelude::*;
use std::io::Cursor;

fn frequency() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(1000.0),
        Just(25_000.0),
        Just(40_000.0),
        Just(30_000.0),
        1.0f64..1.0e6,
    ]
}

proptest! {
    #[test]
    fn neuron_timestamps_are_ticks_over_frequency(
        freq in frequency(),
        ticks in prop::collection::vec(any::<i32>(), 0..64),
    ) {
        let bytes = NexFileBuilder::new(freq).neuron("unit", 1, 1, &ticks).build();
        let mut reader = NexReader::from_reader(Cursor::new(bytes)).unwrap();

        let neurons = reader.read_neurons(None).unwrap();
        let expected: Vec<f64> = ticks.iter().map(|&t| t as f64 / freq).collect();
        prop_assert_eq!(&neurons[0].timestamps, &expected);
    }

    #[test]
    fn interval_durations_are_derived(
        freq in frequency(),
        pairs in prop::collection::vec((0i32..1_000_000, 0i32..1_000_000), 1..32),
    ) {
        let pairs: Vec<(i32, i32)> = pairs.into_iter().map(|(a, len)| (a, a + len)).collect();
        let bytes = NexFileBuilder::new(freq).interval("Epoch", &pairs).build();
        let mut reader = NexReader::from_reader(Cursor::new(bytes)).unwrap();

        let record = reader.read_intervals("Epoch", true, None).unwrap().remove(0);
        prop_assert_eq!(record.len(), pairs.len());
        for (interval, &(start, end)) in record.intervals.iter().zip(&pairs) {
            prop_assert_eq!(interval.start, start as f64 / freq);
            prop_assert_eq!(interval.end, end as f64 / freq);
            prop_assert_eq!(interval.duration(), interval.end - interval.start);
        }
    }

    #[test]
    fn case_folded_lookup_finds_any_casing(name in "[A-Za-z][A-Za-z0-9_]{0,30}") {
        let bytes = NexFileBuilder::new(1000.0).interval(&name, &[(0, 10)]).build();
        let mut reader = NexReader::from_reader(Cursor::new(bytes)).unwrap();

        prop_assert!(reader.read_intervals(&name.to_uppercase(), false, None).is_ok());
        prop_assert!(reader.read_intervals(&name.to_lowercase(), false, None).is_ok());
        prop_assert!(reader.read_intervals(&name, true, None).is_ok());

        let swapped: String = name
            .chars()
            .map(|c| if c.is_ascii_uppercase() { c.to_ascii_lowercase() } else { c.to_ascii_uppercase() })
            .collect();
        if swapped != name {
            prop_assert!(reader.read_intervals(&swapped, true, None).is_err());
        }
    }

    #[test]
    fn any_non_nex_signature_is_rejected(
        magic in prop::array::uniform4(any::<u8>()),
        tail in prop::collection::vec(any::<u8>(), 0..2048),
    ) {
        prop_assume!(&magic != b"NEX1");
        let mut bytes = magic.to_vec();
        bytes.extend(tail);

        let err = NexReader::from_reader(Cursor::new(bytes)).err().unwrap();
        prop_assert!(
            matches!(err, NexError::InvalidMagic { .. }),
            "expected InvalidMagic, got {:?}",
            err
        );
    }

    #[test]
    fn list_variables_len_matches_header(counts in prop::collection::vec(0usize..3, 0..12)) {
        let mut builder = NexFileBuilder::new(1000.0);
        for (i, kind) in counts.iter().enumerate() {
            let name = format!("var{}", i);
            builder = match kind {
                0 => builder.neuron(&name, 1, 1, &[1, 2]),
                1 => builder.interval(&name, &[(1, 2)]),
                _ => builder.event(&name, &[3]),
            };
        }
        let reader = NexReader::from_reader(Cursor::new(builder.build())).unwrap();

        prop_assert_eq!(reader.list_variables(None).len(), reader.read_header().num_vars as usize);
        prop_assert_eq!(reader.variable_count(), counts.len());
    }
}
