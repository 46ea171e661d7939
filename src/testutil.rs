//! Fixtures shared by unit tests

use std::fs::File;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

pub(crate) enum Item<'a> {
    File(&'a str, &'a [u8]),
    Dir(&'a str),
}

/// Write a gzip-compressed tar archive containing `items` to `path`
pub(crate) fn write_archive(path: &Path, items: &[Item<'_>]) {
    let file = File::create(path).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));

    for item in items {
        let mut header = tar::Header::new_gnu();
        match item {
            Item::File(name, data) => {
                header.set_entry_type(tar::EntryType::Regular);
                header.set_size(data.len() as u64);
                header.set_mode(0o644);
                builder.append_data(&mut header, name, *data).unwrap();
            }
            Item::Dir(name) => {
                header.set_entry_type(tar::EntryType::Directory);
                header.set_size(0);
                header.set_mode(0o755);
                builder.append_data(&mut header, name, std::io::empty()).unwrap();
            }
        }
    }

    builder.into_inner().unwrap().finish().unwrap();
}

/// Archive bytes as served by a release host
pub(crate) fn archive_bytes(items: &[Item<'_>]) -> Vec<u8> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("release.tar.gz");
    write_archive(&path, items);
    std::fs::read(path).unwrap()
}
