//! Reading and writing dash text.
//!
//! Run with: cargo run --example simple

use dashdb::DashDb;
use std::error::Error;

const TEXT: &str = "\
kernels-0-name=update_positions
kernels-0-partitioning=x
kernels-0-arguments-0-element size=32
kernels-1-name=update_speed
kernels-1-partitioning=x
meta information=None
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut db: DashDb = TEXT.parse()?;

    for i in 0..db.key("kernels").length() {
        let name = db.key("kernels").index(i).key("name").read_string();
        println!("kernel {}: {}", i, name);
    }

    let size = db
        .key("kernels")
        .index(0)
        .key("arguments")
        .index(0)
        .key("element size")
        .read_int()?;
    println!("first argument is {} bytes", size);

    db.key_mut("kernels").index(2).key("name").write("foo_kernel")?;
    db.key_mut("kernels").index(2).key("enabled").write(true)?;

    println!("\nSaved form:\n{}", db);
    Ok(())
}
