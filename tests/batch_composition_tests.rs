//! Exact batches submitted to the backing store for sequences of writes,
//! showing where link markers are created and retired.

mod common;

use common::{RecordingStore, del, link, put};
use std::sync::Arc;
use sublink::Op;

fn create_recorded_root() -> (Arc<RecordingStore>, sublink::Namespace<RecordingStore>) {
    common::init_tracing();
    let store = Arc::new(RecordingStore::default());
    let root = sublink::open(Arc::clone(&store));
    (store, root)
}

#[tokio::test]
async fn test_put_and_del_batch_ordering() {
    let (store, root) = create_recorded_root();
    let a = root.sublink("a");
    let b = a.sublink("b");

    b.put("x", b"42").await.unwrap();
    assert_eq!(
        store.take_batches(),
        vec![vec![put("~a~~b~x", "42"), link("~a~b^"), link("a^")]],
        "first write below a/b links every ancestor, bottom-up"
    );

    a.put("x", b"42").await.unwrap();
    assert_eq!(store.take_batches(), vec![vec![put("~a~x", "42")]]);

    b.put("y", b"42").await.unwrap();
    assert_eq!(store.take_batches(), vec![vec![put("~a~~b~y", "42")]]);

    b.del("x").await.unwrap();
    assert_eq!(
        store.take_batches(),
        vec![vec![del("~a~~b~x")]],
        "a/b still holds y, so its marker stays"
    );

    b.del("y").await.unwrap();
    assert_eq!(
        store.take_batches(),
        vec![vec![del("~a~~b~y"), del("~a~b^")]],
        "emptying a/b retires its marker but a still holds x"
    );

    a.del("x").await.unwrap();
    assert_eq!(store.take_batches(), vec![vec![del("~a~x"), del("a^")]]);

    assert!(store.inner.is_empty().unwrap());
}

#[tokio::test]
async fn test_batch_ordering() {
    let (store, root) = create_recorded_root();
    let b = root.sublink("a").sublink("b");

    b.batch(vec![Op::put("c", "42")]).await.unwrap();
    assert_eq!(
        store.take_batches(),
        vec![vec![put("~a~~b~c", "42"), link("~a~b^"), link("a^")]]
    );

    b.batch(vec![Op::put("d", "42"), Op::del("c")]).await.unwrap();
    assert_eq!(
        store.take_batches(),
        vec![vec![put("~a~~b~d", "42"), del("~a~~b~c")]]
    );

    root.batch(vec![Op::del("a")]).await.unwrap();
    assert_eq!(
        store.take_batches(),
        vec![vec![del("~a~b^"), del("~a~~b~d"), del("a^")]],
        "deleting a linked name drops its whole subtree, then its marker"
    );

    assert!(store.inner.is_empty().unwrap());
}

#[tokio::test]
async fn test_every_mutation_is_one_submission() {
    let (store, root) = create_recorded_root();
    let deep = root.sublink("q").sublink("w").sublink("e");

    deep.put("x", b"1").await.unwrap();
    deep.put("y", b"2").await.unwrap();
    root.put("q", b"flat").await.unwrap();
    root.del("q").await.unwrap();

    let batches = store.take_batches();
    assert_eq!(batches.len(), 4);
    assert_eq!(batches[0].len(), 4, "value plus three markers");
    assert_eq!(batches[1].len(), 1, "ancestors already linked");
    assert_eq!(
        batches[2],
        vec![
            del("~q~w^"),
            del("~q~~w~e^"),
            del("~q~~w~~e~x"),
            del("~q~~w~~e~y"),
            del("q^"),
            put("q", "flat"),
        ],
        "putting over a linked name rewrites the subtree atomically"
    );
    assert_eq!(batches[3], vec![del("q")]);
}

#[tokio::test]
async fn test_empty_batch_submits_nothing() {
    let (store, root) = create_recorded_root();

    root.sublink("a").batch(Vec::new()).await.unwrap();

    assert!(store.take_batches().is_empty());
}

#[tokio::test]
async fn test_idempotent_put_submits_no_extra_markers() {
    let (store, root) = create_recorded_root();
    let b = root.sublink("a").sublink("b");

    b.put("x", b"42").await.unwrap();
    let after_first = store.inner.entries().unwrap();
    store.take_batches();

    b.put("x", b"42").await.unwrap();
    assert_eq!(store.take_batches(), vec![vec![put("~a~~b~x", "42")]]);
    assert_eq!(store.inner.entries().unwrap(), after_first);
}
