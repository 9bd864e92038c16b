//! Snapshot store integration tests: publication and concurrent access

use super::test_utils::{manifest_map, test_store, write_file};
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

#[test]
fn test_recalculate_changes_only_touched_entries() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "stable/a.txt", "a");
    write_file(root, "stable/b.txt", "b");
    write_file(root, "modify.txt", "before");
    write_file(root, "remove.txt", "doomed");

    let store = test_store(root);
    let before = manifest_map(&store.current_snapshot());

    fs::write(root.join("modify.txt"), "after, and longer").unwrap();
    fs::remove_file(root.join("remove.txt")).unwrap();
    write_file(root, "added/new.txt", "fresh");

    assert_eq!(store.recalculate().unwrap(), 4);
    let after = manifest_map(&store.current_snapshot());

    assert_eq!(after["stable/a.txt"], before["stable/a.txt"]);
    assert_eq!(after["stable/b.txt"], before["stable/b.txt"]);
    assert_ne!(after["modify.txt"], before["modify.txt"]);
    assert_eq!(after["modify.txt"].1, "after, and longer".len() as u64);
    assert!(!after.contains_key("remove.txt"));
    assert!(after.contains_key("added/new.txt"));
}

#[test]
fn test_failed_recalculation_keeps_old_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("served");
    write_file(&root, "one.txt", "1");
    write_file(&root, "two.txt", "2");

    let store = test_store(&root);
    let before = store.current_snapshot();

    fs::remove_dir_all(&root).unwrap();
    let err = store.recalculate().unwrap_err();
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));

    assert_eq!(*store.current_snapshot(), *before);
    assert_eq!(store.generation(), 1);

    // Restoring the root makes recalculation succeed again
    write_file(&root, "three.txt", "3");
    assert_eq!(store.recalculate().unwrap(), 1);
    assert_eq!(store.generation(), 2);
}

#[test]
fn test_readers_never_observe_partial_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    for i in 0..50 {
        write_file(root, &format!("old/{:03}.bin", i), vec![i as u8; 4096]);
    }

    let store = test_store(root);
    assert_eq!(store.current_snapshot().len(), 50);

    for i in 0..150 {
        write_file(root, &format!("new/{:03}.bin", i), vec![i as u8; 4096]);
    }

    let done = Arc::new(AtomicBool::new(false));
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut observed = Vec::new();
                while !done.load(Ordering::Acquire) {
                    let len = store.current_snapshot().len();
                    assert!(len == 50 || len == 200, "observed partial manifest of {}", len);
                    observed.push(len);
                }
                observed
            })
        })
        .collect();

    assert_eq!(store.recalculate().unwrap(), 200);
    done.store(true, Ordering::Release);

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(store.current_snapshot().len(), 200);
}

#[test]
fn test_concurrent_recalculations_serialize_and_agree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    for i in 0..20 {
        write_file(root, &format!("{}.txt", i), format!("{}", i));
    }
    let store = test_store(root);

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.recalculate().unwrap())
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), 20);
    }
    assert_eq!(store.generation(), 5);
    assert_eq!(store.current_snapshot().len(), 20);
}

#[cfg(unix)]
#[test]
fn test_store_accepts_symlinked_root() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("target");
    write_file(&target, "a.txt", "a");
    let link = temp_dir.path().join("link");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let store = test_store(&link);
    assert_eq!(store.current_snapshot().len(), 1);

    write_file(&target, "b.txt", "b");
    assert_eq!(store.recalculate().unwrap(), 2);
}
