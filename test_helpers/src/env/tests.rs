//! Unit tests for the environment guards.

use super::*;
use std::sync::{Arc, Barrier};
use std::thread;

fn current(key: &str) -> Option<String> {
    env::var(key).ok()
}

#[test]
fn set_var_restores_absent_variable() {
    let key = "OPTBIND_HELPERS_ABSENT";
    drop(remove_var(key));
    {
        let _guard = set_var(key, "temp");
        assert_eq!(current(key).as_deref(), Some("temp"));
    }
    assert_eq!(current(key), None);
}

#[test]
fn remove_var_restores_previous_value() {
    let key = "OPTBIND_HELPERS_REMOVE";
    let outer = set_var(key, "kept");
    {
        let _guard = remove_var(key);
        assert_eq!(current(key), None);
    }
    assert_eq!(current(key).as_deref(), Some("kept"));
    drop(outer);
}

#[test]
fn nested_guards_unwind_in_lifo_order() {
    let key = "OPTBIND_HELPERS_STACK";
    let first = set_var(key, "v1");
    let second = set_var(key, "v2");
    assert_eq!(current(key).as_deref(), Some("v2"));
    drop(second);
    assert_eq!(current(key).as_deref(), Some("v1"));
    drop(first);
}

#[test]
fn vars_sets_and_clears_in_one_scope() {
    let cleared = "OPTBIND_HELPERS_CLEARED";
    let before = set_var(cleared, "stray");
    {
        let scope = vars([
            ("OPTBIND_HELPERS_SET", Some("1")),
            (cleared, None),
        ]);
        let keys: Vec<_> = scope.keys().collect();
        assert_eq!(keys, ["OPTBIND_HELPERS_SET", cleared]);
        assert_eq!(current("OPTBIND_HELPERS_SET").as_deref(), Some("1"));
        assert_eq!(current(cleared), None);
    }
    assert_eq!(current("OPTBIND_HELPERS_SET"), None);
    assert_eq!(current(cleared).as_deref(), Some("stray"));
    drop(before);
}

#[test]
fn concurrent_writers_restore_their_own_keys() {
    const THREADS: usize = 4;
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let key = format!("OPTBIND_HELPERS_THREAD_{i}");
                barrier.wait();
                for round in 0..8 {
                    let value = format!("{i}-{round}");
                    let guard = set_var(&key, &value);
                    assert_eq!(current(&key), Some(value));
                    drop(guard);
                    assert_eq!(current(&key), None);
                }
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().is_ok(), "worker panicked");
    }
}
