//! cargo bench --package two-lock-queue --bench queue

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::thread;
use two_lock_queue::Queue;

const COUNT: usize = 1_000;
const CONCURRENCY: usize = 4;

fn bench_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_thread");
    group.throughput(Throughput::Elements(1));

    group.bench_function("push_try_pop", |b| {
        let queue: Queue<usize> = Queue::new();
        let mut i = 0_usize;
        b.iter(|| {
            queue.push(black_box(i));
            black_box(queue.try_pop());
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("try_pop_empty", |b| {
        let queue: Queue<usize> = Queue::new();
        b.iter(|| black_box(queue.try_pop()));
    });

    group.finish();
}

fn bench_mpmc(c: &mut Criterion) {
    let mut group = c.benchmark_group("mpmc");
    group.throughput(Throughput::Elements((COUNT * CONCURRENCY) as u64));

    group.bench_function("wait_and_pop", |b| {
        let queue: Queue<usize> = Queue::new();
        b.iter(|| {
            thread::scope(|s| {
                for _ in 0..CONCURRENCY {
                    let _ = s.spawn(|| {
                        for _ in 0..COUNT {
                            black_box(queue.wait_and_pop());
                        }
                    });
                    let _ = s.spawn(|| {
                        for i in 0..COUNT {
                            queue.push(i);
                        }
                    });
                }
            });
        });
    });

    group.finish();
}

criterion_group!(benches, bench_single_thread, bench_mpmc);
criterion_main!(benches);
