//! Archive round-trip: the zip holds exactly the source tree.

#![allow(clippy::expect_used)]

use std::collections::BTreeMap;
use std::fs;
use std::io::Read as _;
use std::path::Path;

use gcf_deploy_cli::application::ports::SourceArchiver;
use gcf_deploy_cli::infra::archive::{ZipArchiver, write_zip};
use gcf_deploy_cli::infra::fs::sha256_file;
use tempfile::TempDir;

fn source_tree() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();
    fs::write(root.join("index.js"), "exports.helloHttp = (req, res) => res.send('hi');\n")
        .expect("write");
    fs::write(root.join("package.json"), r#"{"name":"hello","version":"1.0.0"}"#).expect("write");
    fs::create_dir_all(root.join("lib/util")).expect("mkdir");
    fs::write(root.join("lib/util/greet.js"), "module.exports = 'hello';\n").expect("write");
    fs::create_dir_all(root.join("empty")).expect("mkdir");
    dir
}

fn read_zip(path: &Path) -> BTreeMap<String, Option<Vec<u8>>> {
    let file = fs::File::open(path).expect("open zip");
    let mut archive = zip::ZipArchive::new(file).expect("read zip");
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).expect("entry");
        let name = entry.name().to_string();
        if entry.is_dir() {
            entries.insert(name, None);
        } else {
            let mut data = Vec::new();
            entry.read_to_end(&mut data).expect("read entry");
            entries.insert(name, Some(data));
        }
    }
    entries
}

#[test]
fn zip_contains_every_file_with_identical_contents() {
    let src = source_tree();
    let out = TempDir::new().expect("tempdir");
    let dest = out.path().join("function-source.zip");

    let summary = write_zip(src.path(), &dest).expect("zip");
    let entries = read_zip(&dest);

    let files: BTreeMap<&str, &[u8]> = entries
        .iter()
        .filter_map(|(k, v)| v.as_deref().map(|d| (k.as_str(), d)))
        .collect();
    assert_eq!(files.len(), 3);
    assert_eq!(summary.files, 3);
    for (name, data) in files {
        let on_disk = fs::read(src.path().join(name)).expect("source file");
        assert_eq!(on_disk, data, "{name}");
    }
    assert!(entries.keys().any(|k| k.trim_end_matches('/') == "empty"));
    assert!(entries.keys().any(|k| k.trim_end_matches('/') == "lib/util"));
}

#[test]
fn summary_matches_written_file() {
    let src = source_tree();
    let out = TempDir::new().expect("tempdir");
    let dest = out.path().join("a.zip");

    let summary = write_zip(src.path(), &dest).expect("zip");

    assert_eq!(summary.path, dest);
    assert_eq!(summary.bytes, fs::metadata(&dest).expect("meta").len());
    assert_eq!(summary.sha256, sha256_file(&dest).expect("hash"));
}

#[test]
fn existing_archive_is_overwritten() {
    let src = source_tree();
    let out = TempDir::new().expect("tempdir");
    let dest = out.path().join("a.zip");
    fs::write(&dest, b"stale").expect("write");

    write_zip(src.path(), &dest).expect("zip");

    assert_eq!(read_zip(&dest).values().filter(|v| v.is_some()).count(), 3);
}

#[test]
fn missing_source_directory_fails() {
    let out = TempDir::new().expect("tempdir");
    let result = write_zip(&out.path().join("nope"), &out.path().join("a.zip"));
    assert!(result.is_err());
}

#[tokio::test]
async fn async_archiver_produces_same_file_set() {
    let src = source_tree();
    let out = TempDir::new().expect("tempdir");
    let dest = out.path().join("b.zip");

    let summary = ZipArchiver.archive(src.path(), &dest).await.expect("archive");

    assert_eq!(summary.files, 3);
    assert_eq!(read_zip(&dest).len(), 6);
}
