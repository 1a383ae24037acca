use std::env;

use wld_reader::WorldFile;

/// Sandstone Brick, the tile the original survey tooling hunted for.
const DEFAULT_TARGET: u16 = 151;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: {} <path-to-wld-file> [--target <tile-id>] [--census]",
            args[0]
        );
        std::process::exit(1);
    }

    let world_path = &args[1];
    let mut target = DEFAULT_TARGET;
    // Parse --target argument
    if let Some(target_idx) = args.iter().position(|arg| arg == "--target") {
        match args.get(target_idx + 1).and_then(|s| s.parse::<u16>().ok()) {
            Some(id) => target = id,
            None => {
                eprintln!("ERROR: --target requires a tile id (0-65535).");
                std::process::exit(1);
            }
        }
    }
    let census = args.iter().any(|arg| arg == "--census");

    println!("Reading world file: {}", world_path);
    println!("{}", "=".repeat(60));

    let world = match WorldFile::open(world_path) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("\nERROR: Failed to open world file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    let header = world.header();
    println!("\nWorld Information:");
    println!("  Name: {}", header.name);
    println!("  Size: {} x {}", header.width, header.height);
    println!("  Format version: {}", header.version);
    println!("  Sections: {}", header.section_offsets.len());

    if census {
        match world.tile_census() {
            Ok(counts) => {
                println!("\nTile census ({} unique tile types):", counts.len());
                for (id, count) in &counts {
                    println!("  {:>5}: {}", id, count);
                }
            }
            Err(e) => {
                eprintln!("\nERROR: Failed to scan world file");
                eprintln!("  {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    match world.find_tiles(target) {
        Ok(result) => {
            println!("\n{}", "=".repeat(60));
            if result.matches.is_empty() {
                println!("No tiles with id {} found in the world.", target);
            } else {
                println!("Found {} tiles with id {}.", result.match_count(), target);
                if let Some((x, y)) = result.extremal {
                    println!("Highest point coordinates: X={}, Y={}", x, y);
                }
            }
            println!("{}", "=".repeat(60));
        }
        Err(e) => {
            eprintln!("\nERROR: Failed to scan world file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
