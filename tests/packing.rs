//! Full-pipeline test through the srcpack facade: list file in,
//! shards out, records read back in write order.

use srcpack::{read_shard, FileList, Label, PackConfig, ShardedWriter};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_list_to_shards_to_records() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();

    const N: usize = 7;
    const CAPACITY: usize = 3;

    let mut list = String::new();
    let mut paths = Vec::new();
    for i in 0..N {
        let path = src.path().join(format!("file{i}.js"));
        fs::write(&path, format!("var v{i} = {i};")).unwrap();
        let path = path.to_string_lossy().into_owned();
        list.push_str(&path);
        list.push('\n');
        paths.push(path);
    }
    let list_path = src.path().join("files.txt");
    fs::write(&list_path, list).unwrap();

    let config = PackConfig::new(Label::Obfuscated).capacity(CAPACITY);
    let writer = ShardedWriter::new(out.path(), config).unwrap();
    let summary = writer
        .pack_lines(FileList::open(&list_path).unwrap())
        .unwrap();

    // ceil(7 / 3) = 3 shards
    assert_eq!(summary.shards_written, 3);
    assert_eq!(summary.records_written, N as u64);

    // The i-th input (1-based) lands in shard ceil(i / C) at
    // zero-based offset (i - 1) % C.
    for (i, path) in paths.iter().enumerate() {
        let shard_index = i / CAPACITY + 1;
        let offset = i % CAPACITY;

        let shard = read_shard(out.path().join(format!("{shard_index}.rec"))).unwrap();
        assert_eq!(shard[offset].filename, path.as_bytes());
        assert_eq!(
            shard[offset].data,
            format!("var v{i} = {i};").as_bytes()
        );
        assert_eq!(shard[offset].label, 1);
    }
}

#[test]
fn test_clean_label_round_trips_as_zero() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    let path = src.path().join("plain.js");
    fs::write(&path, b"function f() {}").unwrap();

    let writer = ShardedWriter::new(out.path(), PackConfig::new(Label::Clean)).unwrap();
    writer.pack([path.to_string_lossy()]).unwrap();

    let shard = read_shard(out.path().join("1.rec")).unwrap();
    assert_eq!(shard[0].label, 0);
}
