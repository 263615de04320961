//! Weighted draws from a counted lottery box.
//!
//! Raising counts to an exponent skews the draw: exponent 0 is uniform over
//! the items still in the box, larger exponents favour the frequent ones.

use kujibako::{Multiset, Value};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut bag = Multiset::new();
    for (ticket, copies) in [("red", 1), ("green", 2), ("blue", 3)] {
        for _ in 0..copies {
            bag.add(Value::from(ticket));
        }
    }
    // Structured tickets are matched by shape, not by key order.
    bag.add(Value::from(json!({"prize": "bike", "tier": 1})));
    bag.add(Value::from(json!({"tier": 1, "prize": "bike"})));

    println!("tickets:");
    for (item, count) in bag.iter() {
        println!("  {item:?}  x{count}");
    }
    println!();

    let draws = 10_000;
    for exponent in [0.0, 1.0, 2.0] {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut hits = vec![0usize; bag.len()];
        for _ in 0..draws {
            let item = bag
                .get_with_rng(exponent, &mut rng)
                .ok_or("box is empty")?;
            let i = bag.index_of(item).ok_or("drawn item is not stored")?;
            hits[i] += 1;
        }
        let freqs: Vec<String> = hits
            .iter()
            .map(|&h| format!("{:.3}", h as f64 / draws as f64))
            .collect();
        println!("exponent {exponent}: {}", freqs.join("  "));
    }

    bag.purge(&Value::from("blue"));
    println!();
    println!(
        "after purging blue: has={} count={} len={}",
        bag.has(&Value::from("blue")),
        bag.count_of(&Value::from("blue")),
        bag.len()
    );

    Ok(())
}
