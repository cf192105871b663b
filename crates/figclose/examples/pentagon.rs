//! Closure of a fully connected irregular pentagon.
//!
//! Usage:
//!   cargo run -p figclose --example pentagon
//!
//! Prints the 5 crossings of the diagonals and the segment counts per stage
//! (15 implicit pieces, 20 minimal, 15 composites).

use figclose::{PointDatabase, PointRegistry, Preprocessor, Result};

fn main() -> Result<()> {
    let mut db = PointDatabase::new();
    for (name, x, y) in [
        ("A", 2.0, 0.0),
        ("B", 4.0, 0.0),
        ("C", 6.0, 3.0),
        ("D", 3.0, 7.0),
        ("E", -2.0, 4.0),
    ] {
        db.put(name, x, y);
    }
    let names = ["A", "B", "C", "D", "E"];
    let mut pairs = Vec::new();
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            pairs.push((*a, *b));
        }
    }
    let pp = Preprocessor::from_names(&mut db, &pairs)?;
    for p in pp.implicit_points() {
        println!("implicit {p}");
    }
    println!(
        "pieces={} minimal={} composites={} total={}",
        pp.implicit_segments().len(),
        pp.minimal_segments().len(),
        pp.non_minimal_segments().len(),
        pp.database().len()
    );
    println!("A resolves to {}", db.lookup("A")?);
    Ok(())
}
