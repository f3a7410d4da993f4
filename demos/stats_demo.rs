use std::hash::BuildHasher;

use chain_hash::HashTable;
use chain_hash::hash_table::Entry;
use chain_hash::hasher::AdditiveState;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    /// Number of buckets to allocate up front.
    #[arg(short = 'c', long = "capacity", default_value_t = 1000)]
    capacity: usize,

    /// Number of string keys to insert.
    #[arg(short = 'n', long = "entries", default_value_t = 700)]
    entries: usize,

    /// Hash with the byte-sum hasher instead of the default one.
    #[arg(long = "additive")]
    additive: bool,
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating HashTable with {} buckets, inserting {} keys ({})",
        args.capacity,
        args.entries,
        if args.additive {
            "additive hasher"
        } else {
            "default hasher"
        },
    );

    let mut table: HashTable<String> = HashTable::with_capacity(args.capacity);

    let additive = AdditiveState::new();
    let default = chain_hash::DefaultHashBuilder::default();
    let hash_key = |key: &String| {
        if args.additive {
            additive.hash_one(key)
        } else {
            default.hash_one(key)
        }
    };

    for i in 0..args.entries {
        let key = format!("key_{i}");
        let hash = hash_key(&key);
        match table.entry(hash, |k| *k == key) {
            Entry::Vacant(entry) => {
                entry.insert(key);
            }
            Entry::Occupied(_) => {
                panic!("key already exists in table: {}", key);
            }
        }
    }

    println!("Inserted {} keys into {} buckets", table.len(), table.capacity());
    println!(
        "Final load factor: {:.2}%",
        (table.len() as f64 / table.capacity() as f64) * 100.0
    );

    table.print_chain_histogram();
    table.stats().print();
}
