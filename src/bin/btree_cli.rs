//! Simple CLI for exercising the in-memory B-tree.
//!
//! Usage:
//!   btree_cli <degree> [script]
//!
//! Commands are read one per line from the script file, or from stdin when
//! no script is given:
//!   insert <key>...      remove <key>...
//!   find <key>           get <key>
//!   count                stats
//!   dump                 debug <key>
//!   bulk_insert <count>  bulk_remove <count>
//!   clear
//!
//! Set `RUST_LOG=btree_index=debug` to watch splits and removals.

use btree_index::BTree;
use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::exit;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: btree_cli <degree> [script]");
        eprintln!("Commands:");
        eprintln!("  insert <key>...      - Insert one or more keys");
        eprintln!("  remove <key>...      - Remove one or more keys");
        eprintln!("  find <key>           - Report whether a key is present");
        eprintln!("  get <key>            - Retrieve a key");
        eprintln!("  count                - Count all keys");
        eprintln!("  stats                - Show tree statistics");
        eprintln!("  dump                 - Print the tree structure as JSON");
        eprintln!("  debug <key>          - Trace the search path for a key");
        eprintln!("  bulk_insert <count>  - Insert keys 1..=count");
        eprintln!("  bulk_remove <count>  - Remove keys 1..=count");
        eprintln!("  clear                - Drop every key");
        exit(1);
    }

    let degree: usize = match args[1].parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("ERROR: Invalid degree: {}", args[1]);
            exit(1);
        }
    };

    let mut tree = match BTree::new(degree) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("ERROR: Failed to create tree: {}", e);
            exit(1);
        }
    };

    let input: Box<dyn BufRead> = match args.get(2) {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("ERROR: Failed to open script {}: {}", path, e);
                exit(1);
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("ERROR: Failed to read input: {}", e);
                exit(1);
            }
        };

        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((command, rest)) = words.split_first() else {
            continue;
        };
        if command.starts_with('#') {
            continue;
        }

        run_command(&mut tree, command, rest);
    }
}

fn run_command(tree: &mut BTree<i64>, command: &str, args: &[&str]) {
    match command {
        "insert" => {
            for key in parse_keys(args) {
                match tree.insert(key) {
                    Ok(()) => println!("INSERTED {}", key),
                    Err(e) => eprintln!("ERROR: {} ({})", e, key),
                }
            }
        }

        "remove" => {
            for key in parse_keys(args) {
                match tree.find_and_remove(&key) {
                    Ok(()) => println!("REMOVED {}", key),
                    Err(e) => eprintln!("ERROR: {} ({})", e, key),
                }
            }
        }

        "find" => {
            for key in parse_keys(args) {
                println!("{}", if tree.find(&key) { "FOUND" } else { "NOT_FOUND" });
            }
        }

        "get" => {
            for key in parse_keys(args) {
                match tree.find_and_retrieve(&key) {
                    Ok(found) => println!("Found value: {}", found),
                    Err(e) => eprintln!("ERROR: {} ({})", e, key),
                }
            }
        }

        "count" => {
            println!("Key count: {}", tree.count());
        }

        "stats" => {
            let stats = tree.stats();
            println!("key_count: {}", stats.key_count);
            println!("node_count: {}", stats.node_count);
            println!("leaf_count: {}", stats.leaf_count);
            println!("tree_height: {}", stats.height);
            println!("min_degree: {}", stats.min_degree);
        }

        "dump" => match tree.export_tree() {
            Some(root) => match serde_json::to_string_pretty(&root) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("ERROR: {}", e),
            },
            None => println!("EMPTY"),
        },

        "debug" => {
            for key in parse_keys(args) {
                for line in tree.debug_find(&key) {
                    println!("{}", line);
                }
            }
        }

        "bulk_insert" | "bulk_remove" => {
            let count: i64 = match args.first().map(|s| s.parse()) {
                Some(Ok(n)) => n,
                _ => {
                    eprintln!("ERROR: Usage: {} <count>", command);
                    return;
                }
            };

            let start = std::time::Instant::now();
            let mut failures = 0usize;
            for key in 1..=count {
                let result = if command == "bulk_insert" {
                    tree.insert(key)
                } else {
                    tree.find_and_remove(&key)
                };
                if let Err(e) = result {
                    eprintln!("ERROR at {}: {}", key, e);
                    failures += 1;
                }
            }
            let elapsed = start.elapsed();

            println!("PROCESSED: {}", count);
            println!("FAILURES: {}", failures);
            println!("TIME_MS: {}", elapsed.as_millis());
        }

        "clear" => {
            tree.clear();
            println!("CLEARED");
        }

        _ => {
            eprintln!("Unknown command: {}", command);
        }
    }
}

/// Parse every argument as a key, reporting the ones that are not integers
fn parse_keys(args: &[&str]) -> Vec<i64> {
    args.iter()
        .filter_map(|arg| match arg.parse() {
            Ok(key) => Some(key),
            Err(_) => {
                eprintln!("ERROR: Invalid key: {}", arg);
                None
            }
        })
        .collect()
}
