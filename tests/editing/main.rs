use png_splice::{
    append_trailer, calculate_crc, extract_trailer, extract_trailer_text, iter_chunks,
    parse_signature, patch_dimensions, patch_dimensions_confirmed, query_dimensions,
    DimensionSpec, Error,
};

const FILE: &[u8] = include_bytes!("test.png");

#[test]
fn fixture_parses() {
    let (rest, _) = parse_signature(FILE).unwrap();
    assert_eq!(rest.len(), FILE.len() - 8);
    let tags: Vec<_> = iter_chunks(FILE)
        .unwrap()
        .map(|chunk| chunk.type_tag)
        .collect();
    assert_eq!(tags, [*b"IHDR", *b"IDAT", *b"IEND"]);
}

#[test]
fn reports_dimensions() {
    assert_eq!(query_dimensions(FILE).unwrap(), (8, 8));
}

#[test]
fn trailer_round_trip() {
    let stashed = append_trailer(FILE, b"hello").unwrap();
    assert_eq!(stashed.len(), FILE.len() + 4 + 5);
    assert_eq!(&stashed[FILE.len()..FILE.len() + 4], &[0, 0, 0, 5]);
    assert_eq!(&stashed[FILE.len() + 4..], b"hello");
    assert_eq!(extract_trailer(&stashed).unwrap().as_deref(), Some(&b"hello"[..]));
    assert_eq!(
        extract_trailer_text(&stashed).unwrap().as_deref(),
        Some("hello")
    );
}

#[test]
fn trailer_round_trip_arbitrary_bytes() {
    let payload: Vec<u8> = (0..=255).collect();
    let stashed = append_trailer(FILE, &payload).unwrap();
    assert_eq!(stashed.len(), FILE.len() + 4 + payload.len());
    assert_eq!(extract_trailer(&stashed).unwrap(), Some(payload));
}

#[test]
fn stashed_file_still_walks_like_the_original() {
    let stashed = append_trailer(FILE, b"trailing data").unwrap();
    let before: Vec<_> = iter_chunks(FILE).unwrap().collect();
    let after: Vec<_> = iter_chunks(&stashed).unwrap().collect();
    assert_eq!(before, after);
}

#[test]
fn no_trailer_reports_absent() {
    assert_eq!(extract_trailer(FILE).unwrap(), None);
}

#[test]
fn overlong_declared_trailer_is_corrupt() {
    let mut buf = FILE.to_vec();
    buf.extend(&[0, 0, 1, 0, b'a', b'b']);
    assert!(matches!(
        extract_trailer(&buf),
        Err(Error::CorruptTrailer(_))
    ));
}

#[test]
fn scale_patch_halves_both_dimensions() {
    let spec = DimensionSpec {
        scale: Some(0.5),
        ..Default::default()
    };
    let patched = patch_dimensions(FILE, &spec).unwrap();
    assert_eq!(query_dimensions(&patched).unwrap(), (4, 4));
}

#[test]
fn width_with_aspect_lock_scales_height() {
    let spec = DimensionSpec {
        width: Some(16),
        keep_aspect: true,
        ..Default::default()
    };
    let patched = patch_dimensions(FILE, &spec).unwrap();
    assert_eq!(query_dimensions(&patched).unwrap(), (16, 16));
}

#[test]
fn patch_then_query_round_trips() {
    let spec = DimensionSpec {
        width: Some(3),
        height: Some(5),
        ..Default::default()
    };
    let patched = patch_dimensions(FILE, &spec).unwrap();
    assert_eq!(query_dimensions(&patched).unwrap(), (3, 5));
}

#[test]
fn patched_header_carries_a_valid_crc() {
    let spec = DimensionSpec {
        width: Some(640),
        height: Some(480),
        ..Default::default()
    };
    let patched = patch_dimensions(FILE, &spec).unwrap();
    let header = iter_chunks(&patched)
        .unwrap()
        .find(|chunk| &chunk.type_tag == b"IHDR")
        .unwrap();
    let recomputed = calculate_crc(
        patched[header.data_offset - 4..header.crc_offset]
            .iter()
            .copied(),
    );
    assert_eq!(recomputed, header.stored_crc(&patched));
}

#[test]
fn patch_leaves_every_other_chunk_byte_identical() {
    let spec = DimensionSpec {
        scale: Some(2.0),
        ..Default::default()
    };
    let patched = patch_dimensions(FILE, &spec).unwrap();
    assert_eq!(patched.len(), FILE.len());

    let header = iter_chunks(FILE)
        .unwrap()
        .find(|chunk| &chunk.type_tag == b"IHDR")
        .unwrap();
    assert_eq!(&patched[..header.start()], &FILE[..header.start()]);
    assert_eq!(&patched[header.end()..], &FILE[header.end()..]);
}

#[test]
fn patch_preserves_the_non_dimension_header_fields() {
    let spec = DimensionSpec {
        width: Some(1),
        height: Some(1),
        ..Default::default()
    };
    let patched = patch_dimensions(FILE, &spec).unwrap();
    let header = iter_chunks(&patched)
        .unwrap()
        .find(|chunk| &chunk.type_tag == b"IHDR")
        .unwrap();
    // bit depth 8, color type 6 (RGBA), no compression/filter/interlace tweaks
    assert_eq!(header.data(&patched)[8..], [8, 6, 0, 0, 0]);
}

#[test]
fn declined_confirmation_patches_nothing() {
    let spec = DimensionSpec {
        scale: Some(0.5),
        ..Default::default()
    };
    let mut seen = None;
    let patched = patch_dimensions_confirmed(FILE, &spec, |current, target| {
        seen = Some((current, target));
        false
    })
    .unwrap();
    assert_eq!(patched, None);
    assert_eq!(seen, Some(((8, 8), (4, 4))));
}

#[test]
fn empty_spec_is_invalid_arguments() {
    assert!(matches!(
        patch_dimensions(FILE, &DimensionSpec::default()),
        Err(Error::InvalidArguments(_))
    ));
}

#[test]
fn every_operation_rejects_a_non_png_buffer() {
    let junk = b"JFIF pretending to be a PNG";
    assert!(matches!(
        append_trailer(junk, b"x"),
        Err(Error::InvalidFormat(_))
    ));
    assert!(matches!(extract_trailer(junk), Err(Error::InvalidFormat(_))));
    assert!(matches!(
        patch_dimensions(
            junk,
            &DimensionSpec {
                scale: Some(2.0),
                ..Default::default()
            }
        ),
        Err(Error::InvalidFormat(_))
    ));
    assert!(matches!(
        query_dimensions(junk),
        Err(Error::InvalidFormat(_))
    ));
}

#[test]
fn headerless_stream_is_missing_header() {
    // signature plus a lone terminal chunk: walkable, but no IHDR
    let mut buf = FILE[..8].to_vec();
    buf.extend(&FILE[FILE.len() - 12..]);
    assert!(matches!(query_dimensions(&buf), Err(Error::MissingHeader)));
    assert!(matches!(
        patch_dimensions(
            &buf,
            &DimensionSpec {
                scale: Some(2.0),
                ..Default::default()
            }
        ),
        Err(Error::MissingHeader)
    ));
}
