use hcbin::{keys, Chunk, FirmwareImage, ImageError, StaticImage, DEFAULT_PACKET_LEN, DUMMY};

static PAYLOAD: [u8; 150] = {
    let mut bytes = [0u8; 150];
    let mut i = 0;
    while i < bytes.len() {
        bytes[i] = i as u8;
        i += 1;
    }
    bytes
};

static IMAGE: StaticImage = StaticImage::new(
    &[
        (keys::FW_FORMAT, "BNO_V1"),
        (keys::SW_VERSION, "3.2.1"),
    ],
    &PAYLOAD,
);

#[test]
fn metadata_lookup() {
    assert_eq!(IMAGE.metadata(keys::FW_FORMAT), Some("BNO_V1"));
    assert_eq!(IMAGE.metadata(keys::SW_VERSION), Some("3.2.1"));
    assert_eq!(IMAGE.metadata(keys::SW_BUILD), None);
    assert_eq!(IMAGE.metadata("fw-format"), None);
}

#[test]
fn read_copies_the_requested_range() {
    let mut buffer = [0u8; 4];
    IMAGE.read(10, &mut buffer).unwrap();
    assert_eq!(buffer, [10, 11, 12, 13]);
}

#[test]
fn read_past_the_end_fails_and_leaves_buffer_untouched() {
    let mut buffer = [0xAA; 8];
    let err = IMAGE.read(145, &mut buffer).unwrap_err();

    assert_eq!(
        err,
        ImageError::OutOfBounds {
            offset: 145,
            len: 8,
            app_len: 150
        }
    );
    assert_eq!(buffer, [0xAA; 8]);
    assert_eq!(
        err.to_string(),
        "Read of 8 bytes at offset 145 exceeds image length 150"
    );
}

#[test]
fn open_and_close_succeed_for_static_images() {
    let mut image = IMAGE;
    image.open().unwrap();
    assert_eq!(image.app_len(), 150);
    image.close().unwrap();
}

#[test]
fn chunks_fall_back_to_the_default_packet_len() {
    assert_eq!(IMAGE.packet_len(), 0);

    let chunks: Vec<Chunk> = IMAGE.chunks().collect();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0], Chunk { offset: 0, len: DEFAULT_PACKET_LEN });
    assert_eq!(chunks[2], Chunk { offset: 128, len: 22 });
}

#[test]
fn chunks_use_the_preferred_packet_len_and_cover_the_payload() {
    let image = IMAGE.with_packet_len(32);

    let mut copy = Vec::new();
    for chunk in image.chunks() {
        assert!(chunk.len <= 32);
        let mut buffer = vec![0u8; chunk.len as usize];
        image.read(chunk.offset, &mut buffer).unwrap();
        copy.extend_from_slice(&buffer);
    }
    assert_eq!(copy, PAYLOAD);
}

#[test]
fn dummy_image_is_marked_as_such() {
    assert_eq!(DUMMY.metadata(keys::FW_FORMAT), Some("DUMMY"));
    assert!(DUMMY.app_len() > 0);
    assert_eq!(DUMMY.chunks().count(), 1);
}
