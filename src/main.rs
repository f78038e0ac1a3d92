use std::env;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use gridlife::Grid;

const DEFAULT_WIDTH: u32 = 150;
const DEFAULT_HEIGHT: u32 = 40;

struct MainArgs {
    width: u32,
    height: u32,
    seed: u64,
    generations: Option<u32>,
}

fn parse_args() -> MainArgs {
    let args: Vec<String> = env::args().collect();
    let mut parsed = MainArgs {
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        seed: clock_seed(),
        generations: None,
    };
    let next_arg = |i: usize, flag: &str| -> &str {
        args.get(i)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("{flag} requires a value"))
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                i += 1;
                parsed.width = next_arg(i, "--width")
                    .parse()
                    .expect("--width requires a positive integer");
            }
            "--height" => {
                i += 1;
                parsed.height = next_arg(i, "--height")
                    .parse()
                    .expect("--height requires a positive integer");
            }
            "--seed" => {
                i += 1;
                parsed.seed = next_arg(i, "--seed")
                    .parse()
                    .expect("--seed requires an integer");
            }
            "--generations" => {
                i += 1;
                parsed.generations = Some(
                    next_arg(i, "--generations")
                        .parse()
                        .expect("--generations requires a positive integer"),
                );
            }
            other => panic!("unknown flag: {other}"),
        }
        i += 1;
    }
    parsed
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn to_ms(nanos: f64) -> f64 {
    nanos / 1_000_000.0
}

fn main() {
    env_logger::init();
    let args = parse_args();
    let minimal = env::var("MINIMAL").is_ok();

    let mut grid = match Grid::new(args.width, args.height, args.seed) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if !minimal {
        print!("{grid}");
    }

    let mut total_tick = 0.0;
    let mut lowest_tick = f64::INFINITY;
    let mut total_render = 0.0;
    let mut lowest_render = f64::INFINITY;

    loop {
        let tick_start = Instant::now();
        grid.tick();
        let tick_time = tick_start.elapsed().as_nanos() as f64;
        total_tick += tick_time;
        lowest_tick = lowest_tick.min(tick_time);
        let avg_tick = total_tick / f64::from(grid.ticks());

        let render_start = Instant::now();
        let rendered = grid.render();
        let render_time = render_start.elapsed().as_nanos() as f64;
        total_render += render_time;
        lowest_render = lowest_render.min(render_time);
        let avg_render = total_render / f64::from(grid.ticks());

        if !minimal {
            // Cursor home, then clear.
            print!("\u{1b}[H\u{1b}[2J");
        }
        println!(
            "#{} - World Tick (L: {:.3}; A: {:.3}) - Rendering (L: {:.3}; A: {:.3})",
            grid.ticks(),
            to_ms(lowest_tick),
            to_ms(avg_tick),
            to_ms(lowest_render),
            to_ms(avg_render),
        );
        if !minimal {
            print!("{rendered}");
        }

        if args.generations.is_some_and(|n| grid.ticks() >= n) {
            break;
        }
    }
}
