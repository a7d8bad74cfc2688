//! Loading the four time-constant tables from a synthetic image

use nmstdp_lut::{load_four, ImageWriter, LutError, TABLE_HEADER_BYTES};

const TABLES: [[i16; 4]; 4] = [
    [2048, 1600, 1200, 0],
    [2040, 1500, 700, 0],
    [2048, 2047, 2046, 2045],
    [1024, 512, 256, 128],
];

fn four_table_image(prefix: usize) -> Vec<u8> {
    let mut writer = ImageWriter::new();
    writer.write_bytes(&vec![0xFF; prefix]);
    for entries in &TABLES {
        writer.write_raw_table(0, entries);
    }
    writer.write_u32(0x0BAD_F00D);
    writer.finish()
}

#[test]
fn next_offset_covers_headers_and_entries() {
    let start = 16;
    let image = four_table_image(start);
    let loaded = load_four(&image, start).expect("well-formed image");

    let entries_bytes: usize = TABLES.iter().map(|t| t.len() * 2).sum();
    assert_eq!(loaded.next_offset, start + entries_bytes + 4 * TABLE_HEADER_BYTES);
    assert_eq!(loaded.next_offset, start + 48);

    let trailer = &image[loaded.next_offset..loaded.next_offset + 4];
    assert_eq!(u32::from_le_bytes(trailer.try_into().unwrap()), 0x0BAD_F00D);
}

#[test]
fn each_table_peaks_at_its_first_entry() {
    let image = four_table_image(0);
    let tables = load_four(&image, 0).unwrap().tables;

    assert_eq!(tables.tau_plus.lookup(0).to_raw(), 2048);
    assert_eq!(tables.tau_minus.lookup(0).to_raw(), 2040);
    assert_eq!(tables.tau_c.lookup(0).to_raw(), 2048);
    assert_eq!(tables.tau_d.lookup(0).to_raw(), 1024);

    assert_eq!(tables.tau_c.lookup(100).to_raw(), 2045);
    assert_eq!(tables.tau_d.lookup(4).to_raw(), 128);
}

#[test]
fn truncated_mid_third_table_fails_whole_load() {
    let image = four_table_image(0);
    // Two full tables (24 bytes), the third header and one entry.
    let truncated = &image[..24 + 4 + 2];

    let err = load_four(truncated, 0).unwrap_err();
    assert!(
        matches!(err, LutError::TruncatedImage { offset: 28, needed: 8, available: 2 }),
        "unexpected error: {}",
        err
    );
}

#[test]
fn truncated_inside_header_fails() {
    let image = four_table_image(0);
    let err = load_four(&image[..24 + 1], 0).unwrap_err();
    assert!(matches!(err, LutError::TruncatedImage { .. }));
}

#[test]
fn oversized_declaration_is_malformed() {
    let mut writer = ImageWriter::new();
    writer.write_raw_table(0, &TABLES[0]);
    writer.write_u16(1024).write_u16(0);
    writer.write_bytes(&vec![0u8; 2048]);
    let image = writer.finish();

    let err = load_four(&image, 0).unwrap_err();
    assert!(err.to_string().contains("1024 entries"), "unexpected error: {}", err);
}
