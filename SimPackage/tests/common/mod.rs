//! Synthetic DBPF packages for tests

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

/// Size of the header, tag included
pub const HEADER_SIZE: u32 = 96;

/// Payloads are written right after the header, before the index
pub const PAYLOAD_OFFSET: u32 = HEADER_SIZE;

pub const DIRECTORY_TYPE: u32 = 0xE86B_1EEF;

pub fn dwords(buf: &mut Vec<u8>, values: &[u32]) {
    for value in values {
        buf.write_u32::<LittleEndian>(*value).unwrap();
    }
}

pub fn words(buf: &mut Vec<u8>, values: &[u16]) {
    for value in values {
        buf.write_u16::<LittleEndian>(*value).unwrap();
    }
}

/// Modern (major version 2) package: header, payload, index
pub fn modern_package(
    minor: u32,
    index_major: u32,
    count: u32,
    payload: &[u8],
    index: &[u8],
) -> Vec<u8> {
    package_with_major(2, minor, index_major, count, payload, index)
}

/// Package with the modern header layout and any major version
pub fn package_with_major(
    major: u32,
    minor: u32,
    index_major: u32,
    count: u32,
    payload: &[u8],
    index: &[u8],
) -> Vec<u8> {
    let mut bytes = b"DBPF".to_vec();
    dwords(&mut bytes, &[major, minor]);
    bytes.extend_from_slice(&[0u8; 24]);
    dwords(&mut bytes, &[count]);
    bytes.extend_from_slice(&[0u8; 4]);
    dwords(&mut bytes, &[index.len() as u32]);
    bytes.extend_from_slice(&[0u8; 12]);
    dwords(&mut bytes, &[index_major, HEADER_SIZE + payload.len() as u32]);
    bytes.extend_from_slice(&[0u8; 28]);
    assert_eq!(bytes.len(), HEADER_SIZE as usize);

    bytes.extend_from_slice(payload);
    bytes.extend_from_slice(index);
    bytes
}

/// Legacy (major version 1) package: header, payload, index
pub fn legacy_package(
    index_major: u32,
    index_minor_on_disk: u32,
    count: u32,
    payload: &[u8],
    index: &[u8],
) -> Vec<u8> {
    let mut bytes = b"DBPF".to_vec();
    dwords(&mut bytes, &[1, 1]);
    bytes.extend_from_slice(&[0u8; 20]);
    dwords(
        &mut bytes,
        &[
            index_major,
            count,
            HEADER_SIZE + payload.len() as u32,
            index.len() as u32,
            0,
            0,
            0,
            index_minor_on_disk,
        ],
    );
    bytes.extend_from_slice(&[0u8; 32]);
    assert_eq!(bytes.len(), HEADER_SIZE as usize);

    bytes.extend_from_slice(payload);
    bytes.extend_from_slice(index);
    bytes
}

/// Modern index entry without the extended flag bit
pub fn modern_entry(index: &mut Vec<u8>, tgi: [u32; 3], offset: u32, file_size: u32, true_size: u32) {
    dwords(index, &tgi);
    dwords(index, &[offset, file_size, true_size]);
}

/// Modern index entry with the extended flag bit and two trailing words
/// written in on-disk order
pub fn modern_extended_entry(
    index: &mut Vec<u8>,
    tgi: [u32; 3],
    offset: u32,
    file_size: u32,
    true_size: u32,
    trailing: [u16; 2],
) {
    dwords(index, &tgi);
    dwords(index, &[offset, file_size | 0x8000_0000, true_size]);
    words(index, &trailing);
}
