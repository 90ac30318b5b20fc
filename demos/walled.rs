//! Animate a search in the terminal.
//!
//! cargo run --example walled [seed]

use std::ops::ControlFlow;
use std::{thread, time::Duration};

use gridpath::{Grid, GridConfig, Pos, SearchOutcome, run};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);
    let mut rng = StdRng::seed_from_u64(seed);

    let config = GridConfig::new(16, 320);
    let mut grid = match Grid::from_config(&config) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    // Same order of clicks as the editor: start, end, then barriers
    let n = config.rows;
    let clicks = [Pos::new(0, 0), Pos::new(n - 1, n - 1)];
    for pos in clicks {
        grid.paint(pos).ok();
    }
    for row in 0..n {
        for col in 0..n {
            if rng.random_bool(0.25) {
                grid.paint(Pos::new(row, col)).ok();
            }
        }
    }

    let mut frame = 0;
    let outcome = run(&mut grid, |g| {
        frame += 1;
        println!("\x1b[2J\x1b[H{g}frame {frame}");
        thread::sleep(Duration::from_millis(20));
        ControlFlow::Continue(())
    });

    match outcome {
        Ok(SearchOutcome::Found(path)) => println!("path of {} moves", path.len()),
        Ok(SearchOutcome::NoPath) => println!("no path"),
        Ok(SearchOutcome::Cancelled) => println!("cancelled"),
        Err(e) => println!("{e}"),
    }
}
