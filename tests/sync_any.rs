use smallany::cast::{any_cast, try_any_cast_ref};
use smallany::space::*;
use smallany::{SmallAny, SyncAny, TypeInfo};

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn payload_crosses_thread() {
    let (tx, rx) = mpsc::channel::<SyncAny<S2>>();

    let producer = thread::spawn(move || {
        tx.send(SyncAny::new(42u32)).unwrap();
        tx.send(SyncAny::new(String::from("done"))).unwrap();
    });

    let first = rx.recv().unwrap();
    let second = rx.recv().unwrap();
    producer.join().unwrap();

    assert_eq!(first.downcast_ref::<u32>(), Some(&42));
    assert_eq!(any_cast::<String, _>(&second).unwrap(), "done");
}

#[test]
fn concurrent_readers() {
    let any: SyncAny = SyncAny::new(vec![1u32, 2, 3]);

    thread::scope(|s| {
        let readers: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    assert_eq!(any.type_info(), TypeInfo::of::<Vec<u32>>());
                    try_any_cast_ref::<Vec<u32>, _>(&any).unwrap().iter().sum::<u32>()
                })
            })
            .collect();
        for reader in readers {
            assert_eq!(reader.join().unwrap(), 6);
        }
    });
}

#[test]
fn shared_mutable_state() {
    let any: SyncAny = SyncAny::new(Arc::new(Mutex::new(0u32)));
    let shared = Arc::new(any);

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let counter = shared.downcast_ref::<Arc<Mutex<u32>>>().unwrap();
                *counter.lock().unwrap() += 1;
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let counter = shared.downcast_ref::<Arc<Mutex<u32>>>().unwrap();
    assert_eq!(*counter.lock().unwrap(), 8);
}

#[test]
fn received_value_can_be_relaxed() {
    let handle = thread::spawn(|| SyncAny::<S1>::new(String::from("local")));
    let any = SmallAny::from(handle.join().unwrap());
    assert_eq!(any.downcast_ref::<String>().map(String::as_str), Some("local"));
}
