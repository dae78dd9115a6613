#![cfg(loom)]

use loom::sync::Arc;
use loom::thread;
use two_lock_queue::Queue;

// Run all tests:
//
// RUSTFLAGS="--cfg loom" cargo test --package two-lock-queue --test loom_queue --release
//
// Add `LOOM_MAX_PREEMPTIONS=2` (or =3) to the command above to reduce the test complexity
// and so its duration.

// RUSTFLAGS="--cfg loom" cargo test --package two-lock-queue --test loom_queue --release -- test_mpsc --exact
#[test]
fn test_mpsc() {
    loom::model(|| {
        let queue: Arc<Queue<usize>> = Arc::new(Queue::new());

        let q1 = queue.clone();
        let th1 = thread::spawn(move || {
            q1.push(0);
            q1.push(1);
        });

        let q2 = queue.clone();
        let th2 = thread::spawn(move || {
            q2.push(2);
        });

        th1.join().unwrap();
        th2.join().unwrap();

        let mut got: Vec<_> = (0..3).map(|_| *queue.try_pop().unwrap()).collect();
        assert!(queue.is_empty());

        // Each producer's items stay in push order.
        assert!(got.iter().position(|&i| i == 0) < got.iter().position(|&i| i == 1));
        got.sort_unstable();
        assert_eq!(vec![0, 1, 2], got);
    });
}

// RUSTFLAGS="--cfg loom" cargo test --package two-lock-queue --test loom_queue --release -- test_spmc --exact
#[test]
fn test_spmc() {
    loom::model(|| {
        const COUNT: usize = 3;
        let queue: Arc<Queue<usize>> = Arc::new(Queue::new());

        for i in 0..COUNT {
            queue.push(i);
        }

        let q1 = queue.clone();
        let th1 = thread::spawn(move || {
            let mut x = 0;
            while q1.try_pop().is_some() {
                x += 1;
            }

            x
        });

        let q2 = queue.clone();
        let th2 = thread::spawn(move || {
            let mut x = 0;
            while q2.try_pop().is_some() {
                x += 1;
            }

            x
        });

        let n = th1.join().unwrap() + th2.join().unwrap();
        assert_eq!(n, COUNT);
    });
}

// RUSTFLAGS="--cfg loom" cargo test --package two-lock-queue --test loom_queue --release -- test_concurrent_push_and_try_pop --exact
#[test]
fn test_concurrent_push_and_try_pop() {
    loom::model(|| {
        const COUNT: usize = 3;
        let queue: Arc<Queue<usize>> = Arc::new(Queue::new());

        let q1 = queue.clone();
        let th1 = thread::spawn(move || {
            for i in 0..COUNT {
                q1.push(i);
            }
        });

        let q2 = queue.clone();
        let th2 = thread::spawn(move || {
            for i in 0..COUNT {
                loop {
                    if let Some(x) = q2.try_pop() {
                        assert_eq!(i, *x);
                        break;
                    } else {
                        // Loom scheduler is, by design, not fair. Yielding here tells Loom this
                        // thread needs the producer to be scheduled before making progress.
                        thread::yield_now()
                    }
                }
            }
        });

        th1.join().unwrap();
        th2.join().unwrap();

        assert!(queue.is_empty());
    });
}

// A lost wake up leaves the consumer blocked forever, which Loom reports as a deadlock.
//
// RUSTFLAGS="--cfg loom" cargo test --package two-lock-queue --test loom_queue --release -- test_wait_and_pop --exact
#[test]
fn test_wait_and_pop() {
    loom::model(|| {
        let queue: Arc<Queue<usize>> = Arc::new(Queue::new());

        let q1 = queue.clone();
        let th1 = thread::spawn(move || *q1.wait_and_pop());

        queue.push(42);

        assert_eq!(42, th1.join().unwrap());
        assert!(queue.is_empty());
    });
}

// RUSTFLAGS="--cfg loom" cargo test --package two-lock-queue --test loom_queue --release -- test_two_waiters --exact
#[test]
fn test_two_waiters() {
    loom::model(|| {
        let queue: Arc<Queue<usize>> = Arc::new(Queue::new());

        let q1 = queue.clone();
        let th1 = thread::spawn(move || q1.wait_and_pop_value());

        let q2 = queue.clone();
        let th2 = thread::spawn(move || q2.wait_and_pop_value());

        queue.push(1);
        queue.push(2);

        assert_eq!(3, th1.join().unwrap() + th2.join().unwrap());
        assert!(queue.is_empty());
    });
}
