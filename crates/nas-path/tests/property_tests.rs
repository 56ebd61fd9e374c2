use nas_path::{DatasetIdentity, decode, encode};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.:-]{1,12}"
}

proptest! {
    #[test]
    fn test_encode_decode_roundtrip(segments in prop::collection::vec(segment(), 2..8)) {
        let input = segments.join("/");
        let id = decode(&input).unwrap();
        prop_assert_eq!(encode(&id), input);
    }

    #[test]
    fn test_decode_encode_roundtrip(
        pool in segment(),
        parent in prop::collection::vec(segment(), 0..5),
        name in segment(),
    ) {
        let id = DatasetIdentity::new(pool, parent.join("/"), name).unwrap();
        let decoded = decode(&encode(&id)).unwrap();
        prop_assert_eq!(decoded, id);
    }

    #[test]
    fn test_single_segment_never_decodes(s in segment()) {
        prop_assert!(decode(&s).is_err());
    }
}
