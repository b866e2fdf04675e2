//! Walkthrough of the list lifecycle. Run with `RUST_LOG=debug` to see
//! growth and compaction events.

use tracing::info;
use tracing_subscriber::EnvFilter;

use tomblist::ListOptions;
use tomblist::Result;
use tomblist::TombList;
use tomblist::view;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = ListOptions::new()
        .with_initial_capacity(4)
        .with_growth_increment(4)
        .with_compaction_threshold(3);
    let mut list = TombList::with_options(options)?;

    for i in 1..=3 {
        list.push(i)?;
    }
    list.remove_at(1)?;
    println!("after remove_at(1): {:?} (capacity {})", list, list.capacity());

    let mut fixed = view::fixed_size(&list);
    match fixed.push(4) {
        Ok(()) => println!("fixed-size view accepted a push"),
        Err(e) => println!("fixed-size view: {}", e),
    }
    println!("view still holds {:?}", fixed);

    for i in 4..=10 {
        list.push(i)?;
    }
    list.remove_at(0)?;
    list.remove_at(0)?;
    info!(len = list.len(), capacity = list.capacity(), "after compaction");
    println!("after compaction: {:?} (capacity {})", list, list.capacity());

    let found = list.binary_search(&7)?;
    println!("binary_search(7) = {:?}", found);

    return Ok(());
}
