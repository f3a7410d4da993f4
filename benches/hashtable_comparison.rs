use std::hash::Hash;
use std::hash::Hasher;
use std::hint::black_box;

use chain_hash::HashTable as ChainHashTable;
use chain_hash::hash_table::Entry as ChainEntry;
use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::hash_table::Entry as HashbrownEntry;
use hashbrown::hash_table::HashTable as HashbrownHashTable;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::distr;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

trait KeyValuePair: Clone {
    fn new(key: u64) -> Self;

    fn hash_key(&self) -> u64;
    fn eq_key(&self, other: &Self) -> bool;
}

#[derive(Clone)]
struct TestItem {
    key: String,
    _value: u64,
}

impl KeyValuePair for TestItem {
    fn new(key: u64) -> Self {
        black_box(Self {
            key: format!("key_{:016X}", key),
            _value: key,
        })
    }

    fn hash_key(&self) -> u64 {
        let mut hasher = SipHasher::new();
        self.key.hash(&mut hasher);
        hasher.finish()
    }

    fn eq_key(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

#[derive(Clone)]
struct SmallTestItem {
    key: u64,
}

impl KeyValuePair for SmallTestItem {
    fn new(key: u64) -> Self {
        black_box(Self { key })
    }

    fn hash_key(&self) -> u64 {
        let mut hasher = SipHasher::new();
        self.key.hash(&mut hasher);
        hasher.finish()
    }

    fn eq_key(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

#[derive(Clone)]
struct LargeTestItem {
    key: String,
    _value: [u8; 256],
}

impl KeyValuePair for LargeTestItem {
    fn new(key: u64) -> Self {
        let mut value = [0u8; 256];
        for (i, byte) in value.iter_mut().enumerate() {
            *byte = ((key >> ((i % 8) * 8)) & 0xFF) as u8;
        }
        black_box(Self {
            key: format!("key_{:064b}", key),
            _value: value,
        })
    }

    fn hash_key(&self) -> u64 {
        let mut hasher = SipHasher::new();
        self.key.hash(&mut hasher);
        hasher.finish()
    }

    fn eq_key(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 11),
    (1 << 12),
    (1 << 13),
    (1 << 14),
    (1 << 15),
    (1 << 16),
    (1 << 17),
    (1 << 18),
];

fn random_items<TestItem: KeyValuePair>(count: usize) -> Vec<(u64, TestItem)> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| {
            let item = TestItem::new(rng.try_next_u64().unwrap());
            let hash = item.hash_key();
            (hash, item)
        })
        .collect()
}

fn sequential_items<TestItem: KeyValuePair>(count: usize) -> Vec<(u64, TestItem)> {
    (0..count as u64)
        .map(|key| {
            let item = TestItem::new(key);
            let hash = item.hash_key();
            (hash, item)
        })
        .collect()
}

fn fill_chain<TestItem: KeyValuePair>(
    table: &mut ChainHashTable<TestItem>,
    items: &[(u64, TestItem)],
) {
    for (hash, item) in items.iter().cloned() {
        match table.entry(hash, |v| v.eq_key(&item)) {
            ChainEntry::Vacant(entry) => {
                entry.insert(item);
            }
            ChainEntry::Occupied(_) => unreachable!(),
        }
    }
}

fn fill_hashbrown<TestItem: KeyValuePair>(
    table: &mut HashbrownHashTable<TestItem>,
    items: &[(u64, TestItem)],
) {
    for (hash, item) in items.iter().cloned() {
        match table.entry(hash, |v| v.eq_key(&item), |v| v.hash_key()) {
            HashbrownEntry::Vacant(entry) => {
                entry.insert(item);
            }
            HashbrownEntry::Occupied(_) => unreachable!(),
        }
    }
}

fn bench_insert_random<TestItem: KeyValuePair, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "insert_random_{}",
        std::any::type_name::<TestItem>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        let hash_and_item = random_items::<TestItem>(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || {
                    let mut hash_and_item = hash_and_item.clone();
                    hash_and_item.shuffle(&mut SmallRng::from_os_rng());
                    hash_and_item
                },
                |hash_and_item| {
                    let mut table = ChainHashTable::<TestItem>::new();
                    fill_chain(&mut table, &hash_and_item);
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || {
                    let mut hash_and_item = hash_and_item.clone();
                    hash_and_item.shuffle(&mut SmallRng::from_os_rng());
                    hash_and_item
                },
                |hash_and_item| {
                    let mut table = HashbrownHashTable::with_capacity(0);
                    fill_hashbrown(&mut table, &hash_and_item);
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_insert_random_preallocated<TestItem: KeyValuePair, const MAX_SIZE: usize>(
    c: &mut Criterion,
) {
    let mut group = c.benchmark_group(format!(
        "insert_random_preallocated_{}",
        std::any::type_name::<TestItem>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        let hash_and_item = random_items::<TestItem>(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || {
                    let mut hash_and_item = hash_and_item.clone();
                    hash_and_item.shuffle(&mut SmallRng::from_os_rng());
                    hash_and_item
                },
                |hash_and_item| {
                    let mut table = ChainHashTable::<TestItem>::new();
                    table.reserve(size);
                    fill_chain(&mut table, &hash_and_item);
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || {
                    let mut hash_and_item = hash_and_item.clone();
                    hash_and_item.shuffle(&mut SmallRng::from_os_rng());
                    hash_and_item
                },
                |hash_and_item| {
                    let mut table = HashbrownHashTable::<TestItem>::with_capacity(size);
                    fill_hashbrown(&mut table, &hash_and_item);
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit<TestItem: KeyValuePair, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_hit_{}", std::any::type_name::<TestItem>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        let hash_and_item = sequential_items::<TestItem>(size);

        let mut chain_table = ChainHashTable::<TestItem>::new();
        let mut hashbrown_table = HashbrownHashTable::<TestItem>::with_capacity(size);
        fill_chain(&mut chain_table, &hash_and_item);
        fill_hashbrown(&mut hashbrown_table, &hash_and_item);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || {
                    let mut hash_and_item = hash_and_item.clone();
                    hash_and_item.shuffle(&mut SmallRng::from_os_rng());
                    hash_and_item
                },
                |hash_and_item| {
                    for (hash, item) in hash_and_item.iter() {
                        black_box(chain_table.find(*hash, |v| v.eq_key(item)));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || {
                    let mut hash_and_item = hash_and_item.clone();
                    hash_and_item.shuffle(&mut SmallRng::from_os_rng());
                    hash_and_item
                },
                |hash_and_item| {
                    for (hash, item) in hash_and_item.iter() {
                        black_box(hashbrown_table.find(*hash, |v| v.eq_key(item)));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_miss<TestItem: KeyValuePair, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_miss_{}", std::any::type_name::<TestItem>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        // Even keys are stored, odd keys are probed.
        let hash_and_item = (0..size as u64 * 2)
            .step_by(2)
            .map(|key| {
                let item = TestItem::new(key);
                let hash = item.hash_key();
                (hash, item)
            })
            .collect::<Vec<(u64, TestItem)>>();

        let misses_hash_and_key = (1..=size as u64 * 2)
            .step_by(2)
            .map(|key| {
                let item = TestItem::new(key);
                let hash = item.hash_key();
                (hash, item)
            })
            .collect::<Vec<(u64, TestItem)>>();

        let mut chain_table = ChainHashTable::<TestItem>::new();
        let mut hashbrown_table = HashbrownHashTable::<TestItem>::with_capacity(size);
        fill_chain(&mut chain_table, &hash_and_item);
        fill_hashbrown(&mut hashbrown_table, &hash_and_item);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || {
                    let mut misses_hash_and_key = misses_hash_and_key.clone();
                    misses_hash_and_key.shuffle(&mut SmallRng::from_os_rng());
                    misses_hash_and_key
                },
                |misses_hash_and_key| {
                    for (hash, key) in misses_hash_and_key.iter() {
                        black_box(chain_table.find(*hash, |v| v.eq_key(key)));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || {
                    let mut misses_hash_and_key = misses_hash_and_key.clone();
                    misses_hash_and_key.shuffle(&mut SmallRng::from_os_rng());
                    misses_hash_and_key
                },
                |misses_hash_and_key| {
                    for (hash, key) in misses_hash_and_key.iter() {
                        black_box(hashbrown_table.find(*hash, |v| v.eq_key(key)));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_remove<TestItem: KeyValuePair, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", std::any::type_name::<TestItem>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        let hash_and_item = sequential_items::<TestItem>(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || {
                    let mut hash_and_item = hash_and_item.clone();
                    let mut table = ChainHashTable::<TestItem>::new();
                    fill_chain(&mut table, &hash_and_item);
                    hash_and_item.shuffle(&mut SmallRng::from_os_rng());
                    (table, hash_and_item)
                },
                |(mut table, hash_and_item)| {
                    for (hash, item) in hash_and_item.iter() {
                        black_box(table.remove(*hash, |v| v.eq_key(item)));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || {
                    let mut hash_and_item = hash_and_item.clone();
                    let mut table = HashbrownHashTable::<TestItem>::with_capacity(0);
                    fill_hashbrown(&mut table, &hash_and_item);
                    hash_and_item.shuffle(&mut SmallRng::from_os_rng());
                    (table, hash_and_item)
                },
                |(mut table, hash_and_item)| {
                    for (hash, item) in hash_and_item.iter() {
                        let result = match table.find_entry(*hash, |v| v.eq_key(item)) {
                            Ok(entry) => Some(entry.remove().0),
                            Err(_) => None,
                        };
                        black_box(result);
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_iteration<TestItem: KeyValuePair, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("iteration_{}", std::any::type_name::<TestItem>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        let hash_and_item = sequential_items::<TestItem>(size);

        let mut chain_table = ChainHashTable::<TestItem>::new();
        let mut hashbrown_table = HashbrownHashTable::<TestItem>::with_capacity(0);
        fill_chain(&mut chain_table, &hash_and_item);
        fill_hashbrown(&mut hashbrown_table, &hash_and_item);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function("chain_hash", |b| {
            b.iter(|| {
                let mut count = 0;
                for item in chain_table.iter() {
                    black_box(item);
                    count += 1;
                }
                black_box(count)
            })
        });

        group.bench_function("hashbrown", |b| {
            b.iter(|| {
                let mut count = 0;
                for item in hashbrown_table.iter() {
                    black_box(item);
                    count += 1;
                }
                black_box(count)
            })
        });
    }

    group.finish();
}

#[derive(Clone, Copy)]
enum Operation {
    Insert,
    Remove,
    Find,
}

fn bench_mixed_probabilistic<TestItem: KeyValuePair, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "mixed_probabilistic_{}",
        std::any::type_name::<TestItem>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    const KEY_SPACE_MULTIPLIER: u64 = 2;

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        let mut rng = SmallRng::from_os_rng();

        let operations = (0..size * 3)
            .map(|_| {
                let op_choice: f64 = rng.sample(distr::Uniform::new(0.0, 1.0).unwrap());
                if op_choice < 0.5 {
                    Operation::Find
                } else if op_choice < 0.75 {
                    Operation::Insert
                } else {
                    Operation::Remove
                }
            })
            .collect::<Vec<Operation>>();

        let mut rng = SmallRng::from_os_rng();
        let insert_distr = Zipf::new(size as f32 - 1.0, 1.0).unwrap();
        let find_remove_distr =
            Zipf::new(size as f32 * KEY_SPACE_MULTIPLIER as f32 - 1.0, 1.0).unwrap();

        group.throughput(Throughput::Elements(size as u64 * 3));
        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || {
                    let mut operations = operations.clone();
                    operations.shuffle(&mut SmallRng::from_os_rng());
                    operations
                },
                |operations| {
                    let mut table = ChainHashTable::<TestItem>::new();
                    for operation in operations {
                        match operation {
                            Operation::Insert => {
                                let key = rng.sample(insert_distr) as u64;
                                let item = TestItem::new(key);
                                let hash = item.hash_key();
                                match table.entry(hash, |v| v.eq_key(&item)) {
                                    ChainEntry::Vacant(entry) => {
                                        black_box(entry.insert(item));
                                    }
                                    ChainEntry::Occupied(mut occupied) => {
                                        *occupied.get_mut() = item;
                                    }
                                }
                            }
                            Operation::Remove => {
                                let key = rng.sample(find_remove_distr) as u64;
                                let item = TestItem::new(key);
                                let hash = item.hash_key();
                                black_box(table.remove(hash, |v| v.eq_key(&item)));
                            }
                            Operation::Find => {
                                let key = rng.sample(find_remove_distr) as u64;
                                let item = TestItem::new(key);
                                let hash = item.hash_key();
                                black_box(table.find(hash, |v| v.eq_key(&item)));
                            }
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || {
                    let mut operations = operations.clone();
                    operations.shuffle(&mut SmallRng::from_os_rng());
                    operations
                },
                |operations| {
                    let mut table = HashbrownHashTable::<TestItem>::with_capacity(0);
                    for operation in operations {
                        match operation {
                            Operation::Insert => {
                                let key = rng.sample(insert_distr) as u64;
                                let item = TestItem::new(key);
                                let hash = item.hash_key();
                                match table.entry(hash, |v| v.eq_key(&item), |v| v.hash_key()) {
                                    HashbrownEntry::Vacant(entry) => {
                                        black_box(entry.insert(item));
                                    }
                                    HashbrownEntry::Occupied(mut occupied) => {
                                        *occupied.get_mut() = item;
                                    }
                                }
                            }
                            Operation::Remove => {
                                let key = rng.sample(find_remove_distr) as u64;
                                let item = TestItem::new(key);
                                let hash = item.hash_key();
                                let result = match table.find_entry(hash, |v| v.eq_key(&item)) {
                                    Ok(entry) => Some(entry.remove().0),
                                    Err(_) => None,
                                };
                                black_box(result);
                            }
                            Operation::Find => {
                                let key = rng.sample(find_remove_distr) as u64;
                                let item = TestItem::new(key);
                                let hash = item.hash_key();
                                black_box(table.find(hash, |v| v.eq_key(&item)));
                            }
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_churn<TestItem: KeyValuePair, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("churn_{}", std::any::type_name::<TestItem>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        // Every key appears twice: the first occurrence inserts, the second
        // removes.
        let insertions_and_removals = (0..size as u64)
            .flat_map(|key| {
                let item = TestItem::new(key);
                let hash = item.hash_key();
                [(hash, item.clone()), (hash, item)]
            })
            .collect::<Vec<(u64, TestItem)>>();

        group.throughput(Throughput::Elements(size as u64 * 2));
        group.bench_function("chain_hash", |b| {
            b.iter_batched(
                || {
                    let mut hash_and_item = insertions_and_removals.clone();
                    hash_and_item.shuffle(&mut SmallRng::from_os_rng());
                    hash_and_item
                },
                |hash_and_item| {
                    let mut table = ChainHashTable::<TestItem>::new();
                    for (hash, item) in hash_and_item {
                        match table.entry(hash, |v| v.eq_key(&item)) {
                            ChainEntry::Vacant(entry) => {
                                entry.insert(item);
                            }
                            ChainEntry::Occupied(entry) => {
                                black_box(entry.remove());
                            }
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function("hashbrown", |b| {
            b.iter_batched(
                || {
                    let mut hash_and_item = insertions_and_removals.clone();
                    hash_and_item.shuffle(&mut SmallRng::from_os_rng());
                    hash_and_item
                },
                |hash_and_item| {
                    let mut table = HashbrownHashTable::<TestItem>::with_capacity(0);
                    for (hash, item) in hash_and_item {
                        match table.entry(hash, |v| v.eq_key(&item), |v| v.hash_key()) {
                            HashbrownEntry::Vacant(entry) => {
                                black_box(entry.insert(item));
                            }
                            HashbrownEntry::Occupied(entry) => {
                                black_box(entry.remove().0);
                            }
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_mixed_probabilistic::<SmallTestItem, 8>,
    bench_mixed_probabilistic::<TestItem, 8>,
    bench_mixed_probabilistic::<LargeTestItem, 5>,
    bench_churn::<SmallTestItem, 8>,
    bench_churn::<TestItem, 8>,
    bench_churn::<LargeTestItem, 5>,
    bench_insert_random::<SmallTestItem, 8>,
    bench_insert_random::<TestItem, 8>,
    bench_insert_random::<LargeTestItem, 5>,
    bench_insert_random_preallocated::<SmallTestItem, 8>,
    bench_insert_random_preallocated::<TestItem, 8>,
    bench_insert_random_preallocated::<LargeTestItem, 5>,
    bench_find_hit::<SmallTestItem, 8>,
    bench_find_hit::<TestItem, 8>,
    bench_find_hit::<LargeTestItem, 5>,
    bench_find_miss::<SmallTestItem, 8>,
    bench_find_miss::<TestItem, 8>,
    bench_find_miss::<LargeTestItem, 5>,
    bench_remove::<SmallTestItem, 8>,
    bench_remove::<TestItem, 8>,
    bench_remove::<LargeTestItem, 5>,
    bench_iteration::<SmallTestItem, 8>,
    bench_iteration::<TestItem, 8>,
    bench_iteration::<LargeTestItem, 5>,
);

criterion_main!(benches);
