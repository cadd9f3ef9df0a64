use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use jobpool::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

fn benchmark_pool_lifecycle(c: &mut Criterion) {
    c.bench_function("pool_construct_and_join", |b| {
        b.iter(|| {
            let pool = ThreadPool::with_workers(4).expect("Failed to create pool");
            pool.join().expect("Failed to join pool");
        });
    });
}

fn benchmark_job_submission(c: &mut Criterion) {
    let mut group = c.benchmark_group("job_submission");

    // Lightweight jobs
    group.bench_function("lightweight_jobs_100", |b| {
        b.iter_batched(
            || ThreadPool::with_workers(4).expect("Failed to create pool"),
            |pool| {
                for _ in 0..100 {
                    pool.execute(|| {
                        black_box(1 + 1);
                        Ok(())
                    })
                    .expect("Failed to submit job");
                }
                pool.join().expect("Failed to join pool");
            },
            BatchSize::SmallInput,
        );
    });

    // Medium workload
    group.bench_function("medium_jobs_100", |b| {
        b.iter_batched(
            || ThreadPool::with_workers(4).expect("Failed to create pool"),
            |pool| {
                for _ in 0..100 {
                    pool.execute(|| {
                        let mut sum = 0u64;
                        for i in 0..1000 {
                            sum = sum.wrapping_add(i);
                        }
                        black_box(sum);
                        Ok(())
                    })
                    .expect("Failed to submit job");
                }
                pool.join().expect("Failed to join pool");
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn benchmark_concurrent_submission(c: &mut Criterion) {
    c.bench_function("concurrent_submission_4_producers", |b| {
        b.iter_batched(
            || Arc::new(ThreadPool::with_workers(4).expect("Failed to create pool")),
            |pool| {
                let handles: Vec<_> = (0..4)
                    .map(|_| {
                        let pool = Arc::clone(&pool);
                        std::thread::spawn(move || {
                            for _ in 0..25 {
                                pool.execute(|| Ok(())).expect("Failed to submit job");
                            }
                        })
                    })
                    .collect();

                for handle in handles {
                    handle.join().expect("Thread panicked");
                }

                pool.join().expect("Failed to join pool");
            },
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_drain_throughput(c: &mut Criterion) {
    c.bench_function("drain_1000_jobs", |b| {
        b.iter_batched(
            || {
                let pool = ThreadPool::with_workers(8).expect("Failed to create pool");
                let counter = Arc::new(AtomicU64::new(0));
                (pool, counter)
            },
            |(pool, counter)| {
                for _ in 0..1000 {
                    let counter = Arc::clone(&counter);
                    pool.execute(move || {
                        counter.fetch_add(1, Ordering::Relaxed);
                        Ok(())
                    })
                    .expect("Failed to submit job");
                }

                pool.join().expect("Failed to join pool");

                assert_eq!(counter.load(Ordering::Relaxed), 1000);
            },
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_bounded_queue(c: &mut Criterion) {
    c.bench_function("bounded_queue_pressure", |b| {
        b.iter_batched(
            || {
                let config = PoolConfig::new(4).with_queue_capacity(100);
                ThreadPool::new(config).expect("Failed to create pool")
            },
            |pool| {
                // Submissions beyond capacity block until workers free space
                for _ in 0..150 {
                    pool.execute(|| {
                        black_box(1 + 1);
                        Ok(())
                    })
                    .expect("Failed to submit job");
                }
                pool.join().expect("Failed to join pool");
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    benchmark_pool_lifecycle,
    benchmark_job_submission,
    benchmark_concurrent_submission,
    benchmark_drain_throughput,
    benchmark_bounded_queue
);
criterion_main!(benches);
