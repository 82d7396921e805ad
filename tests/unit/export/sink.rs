use super::*;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("coverkit-sink-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn directory_sink_creates_dir_and_overwrites() {
    let dir = scratch_dir("overwrite");
    let mut sink = DirectorySink::new(&dir, true);
    sink.save("cover.png", b"one").unwrap();
    sink.save("cover.png", b"two").unwrap();
    assert_eq!(std::fs::read(dir.join("cover.png")).unwrap(), b"two");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn directory_sink_refuses_to_clobber_when_asked() {
    let dir = scratch_dir("keep");
    let mut sink = DirectorySink::new(&dir, false);
    sink.save("cover.png", b"one").unwrap();
    let err = sink.save("cover.png", b"two").unwrap_err();
    assert!(matches!(err, CoverError::Export(_)));
    assert_eq!(std::fs::read(dir.join("cover.png")).unwrap(), b"one");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn directory_sink_rejects_paths() {
    let sink = DirectorySink::new("out", true);
    for bad in ["", "..", "../cover.png", "a/b.png", "a\\b.png"] {
        assert!(sink.path_for(bad).is_err(), "{bad:?}");
    }
    assert_eq!(
        sink.path_for("ATI-TEAS-Study-Guide-Cover.png").unwrap(),
        Path::new("out").join("ATI-TEAS-Study-Guide-Cover.png")
    );
}

#[test]
fn in_memory_downloads_keep_order_and_latest() {
    let mut mem = InMemoryDownloads::new();
    mem.save("a.png", b"1").unwrap();
    mem.save("a.png", b"2").unwrap();
    assert_eq!(mem.files.len(), 2);
    assert_eq!(mem.get("a.png"), Some(&b"2"[..]));
    assert_eq!(mem.get("b.png"), None);
}
